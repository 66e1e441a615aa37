use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Focus, RequestState};
use crate::script::{ResultField, ResultPayload, result::TITLE_LENGTH_LIMIT};
use crate::ui::utils::wrap_words;

pub fn render_result_panel(f: &mut Frame, area: Rect, app: &App) {
    let focused = matches!(app.focus, Focus::Result(_));
    let mut title = vec![Span::styled(
        " Result ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if let RequestState::Success { received_at, .. } = app.lifecycle.state() {
        title.push(Span::styled(
            format!("{} ", received_at),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title))
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::DarkGray }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.lifecycle.state() {
        RequestState::Idle => render_placeholder(f, inner, app),
        RequestState::Loading { mode, .. } => {
            render_centered(
                f,
                inner,
                Line::from(Span::styled(
                    mode.busy_label(),
                    Style::default().fg(Color::Yellow),
                )),
            );
        }
        RequestState::Failure { message, .. } => {
            f.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(
                        "Request failed",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(message.clone(), Style::default().fg(Color::White))),
                ])
                .wrap(Wrap { trim: true }),
                inner,
            );
        }
        RequestState::Success { result, .. } => render_success(f, inner, app, result),
    }
}

fn render_placeholder(f: &mut Frame, area: Rect, app: &App) {
    render_centered(
        f,
        area,
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Ctrl+S", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(" to {}", app.form.mode().submit_label().to_lowercase()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    );
}

fn render_centered(f: &mut Frame, area: Rect, line: Line<'static>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    if let Some(row) = rows.get(1) {
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), *row);
    }
}

fn render_success(f: &mut Frame, area: Rect, app: &App, result: &ResultPayload) {
    let notes = result.notes_lines();
    let notes_height = if notes.is_empty() {
        0
    } else {
        notes.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Section tabs
            Constraint::Length(1),            // Stats
            Constraint::Min(0),               // Section content
            Constraint::Length(notes_height), // Notes
        ])
        .split(area);
    let [tabs, stats, content, notes_area] = &chunks[..] else {
        return;
    };

    let fields = result.available_fields();
    let selected = app
        .focused_result_field()
        .filter(|field| fields.contains(field))
        .unwrap_or(ResultField::Title);

    render_section_tabs(f, *tabs, &fields, selected, app.focused_result_field().is_some());
    render_stats(f, *stats, result);
    render_section(f, *content, result, selected, app.result_scroll);

    if !notes.is_empty() {
        let lines: Vec<Line> = notes
            .into_iter()
            .map(|note| Line::from(Span::styled(note, Style::default().fg(Color::White))))
            .collect();
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Notes ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            *notes_area,
        );
    }
}

fn render_section_tabs(
    f: &mut Frame,
    area: Rect,
    fields: &[ResultField],
    selected: ResultField,
    active: bool,
) {
    let mut spans = Vec::new();
    for field in fields {
        let style = if *field == selected && active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if *field == selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", field.label()), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_stats(f: &mut Frame, area: Rect, result: &ResultPayload) {
    let length_style = if result.title_too_long() {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![Span::styled(
        format!("Title {}/{} chars", result.title_length(), TITLE_LENGTH_LIMIT),
        length_style,
    )];
    if result.title_too_long() {
        spans.push(Span::styled(" (too long)", length_style));
    }
    let hashtag_count = result.hashtag_count();
    if hashtag_count > 0 {
        spans.push(Span::styled(
            format!("  {} hashtags", hashtag_count),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_section(f: &mut Frame, area: Rect, result: &ResultPayload, field: ResultField, scroll: u16) {
    let width = area.width as usize;
    let text_style = match field {
        ResultField::Title => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ResultField::Hashtags | ResultField::YoutubeTags => Style::default().fg(Color::Blue),
        ResultField::Script | ResultField::OnScreenText | ResultField::Description => {
            Style::default().fg(Color::White)
        }
    };

    let rows: Vec<Line> = result
        .display_lines(field)
        .iter()
        .flat_map(|line| wrap_words(line, width))
        .map(|row| Line::from(Span::styled(row, text_style)))
        .collect();

    let max_scroll = rows.len().saturating_sub(area.height as usize);
    let offset = (scroll as usize).min(max_scroll);
    let visible: Vec<Line> = rows.into_iter().skip(offset).collect();
    f.render_widget(Paragraph::new(visible), area);
}
