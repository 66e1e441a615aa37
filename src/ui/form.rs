use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Focus};
use crate::script::{FormField, ScriptMode};
use crate::ui::{components, results};

const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub fn render_form_view(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form and result
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    let [header, body, footer] = &chunks[..] else {
        return;
    };

    render_header(f, *header, app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(*body);
    if let [form_area, result_area] = &columns[..] {
        render_form_panel(f, *form_area, app);
        results::render_result_panel(f, *result_area, app);
    }

    render_footer(f, *footer, app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mode = app.form.mode();
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            "ScriptDesk",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{} Script", mode.title()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  {}", mode.summary()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if app.has_credential() {
        spans.push(Span::styled("  ● key", Style::default().fg(Color::Green)));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        area,
    );
}

fn field_height(field: FormField) -> u16 {
    match field {
        FormField::RawScript => 10,
        FormField::Description => 5,
        FormField::Mode | FormField::Duration => 4,
        FormField::Topic | FormField::Genre | FormField::Keywords | FormField::Submit => 3,
    }
}

fn render_form_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Script Details ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let fields = app.form.visible_fields();
    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|field| Constraint::Length(field_height(*field)))
        .collect();
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (field, row) in fields.iter().zip(rows.iter()) {
        render_field(f, *row, app, *field);
    }
    if let Some(message_area) = rows.last() {
        render_messages(f, *message_area, app);
    }
}

fn field_title(app: &App, field: FormField) -> String {
    if app.form.is_required(field) {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    }
}

fn render_field(f: &mut Frame, area: Rect, app: &App, field: FormField) {
    let focused = app.focus == Focus::Form(field);
    let invalid = app.is_invalid(field);
    let title = field_title(app, field);

    match field {
        FormField::Mode => {
            let mode = app.form.mode();
            let value = format!("{} Script", mode.title());
            let hint = match mode {
                ScriptMode::Humanize => "Generate Script available with ◀ ▶",
                ScriptMode::Generate => "Humanize Script available with ◀ ▶",
            };
            components::render_select(f, area, &title, &value, Some(hint), focused, invalid);
        }
        FormField::Genre => {
            components::render_select(
                f,
                area,
                &title,
                app.form.genre.label(),
                None,
                focused,
                invalid,
            );
        }
        FormField::Duration => {
            let duration = app.form.duration;
            components::render_select(
                f,
                area,
                &title,
                duration.label(),
                Some(duration.format_group()),
                focused,
                invalid,
            );
        }
        FormField::Submit => render_submit(f, area, app, focused),
        FormField::RawScript | FormField::Topic | FormField::Description | FormField::Keywords => {
            let content = app.form.text(field).unwrap_or("");
            let cursor = app
                .text_input(field)
                .map_or(content.chars().count(), |input| input.cursor_position());
            let config = components::TextInputConfig::new(content, &title)
                .with_placeholder(field.placeholder())
                .with_focus(focused)
                .with_invalid(invalid)
                .with_multiline(field.is_multiline())
                .with_cursor_position(cursor);
            components::render_text_input(f, area, config);
        }
    }
}

fn render_submit(f: &mut Frame, area: Rect, app: &App, focused: bool) {
    let enabled = app.lifecycle.is_submit_enabled();
    let label = if enabled {
        format!("▶ {}", app.submit_label())
    } else {
        let frame = SPINNER_FRAMES
            .get(usize::from(app.loading_frame) % SPINNER_FRAMES.len())
            .copied()
            .unwrap_or("");
        format!("{} {}", frame, app.submit_label())
    };

    let style = match (enabled, focused) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    };

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(label, style)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(components::field_border_style(focused, false)),
            ),
        area,
    );
}

fn render_messages(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }

    if let Some(error) = &app.validation_error {
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("⚠ ", Style::default().fg(Color::Red)),
                Span::styled(error.to_string(), Style::default().fg(Color::Red)),
            ]))
            .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    if let Some(message) = app.lifecycle.error_message() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red),
            )))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Error ")
                    .border_style(Style::default().fg(Color::Red)),
            ),
            area,
        );
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let keybindings: &[(&str, &str)] = match app.focus {
        Focus::Result(_) => &[
            ("↑↓", "section"),
            ("c", "copy"),
            ("Ctrl+Y", "copy all"),
            ("PgUp/PgDn", "scroll"),
            ("Tab", "back"),
        ],
        Focus::Form(_) => &[
            ("Tab", "next"),
            ("◀▶", "change"),
            ("Ctrl+S", "submit"),
            ("Ctrl+K", "API key"),
            ("F1", "help"),
        ],
    };
    components::render_navigation_footer(
        f,
        area,
        app.form.mode().title(),
        keybindings,
        &[("KEY", app.has_credential())],
        app.status_toast_message(),
    );
}
