use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::services::credentials::{CREDENTIAL_MIN_LENGTH, CREDENTIAL_PREFIX, masked};
use crate::ui::components;
use crate::ui::utils::centered_rect;

/// Render the API key modal over the form
pub fn render_api_settings(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 45, f.area());
    f.render_widget(Clear, area);

    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::styled(" ", Style::default()),
                Span::styled(
                    "API Settings",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" ", Style::default()),
            ]))
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(2), // Status
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Help
        ])
        .split(area);

    let [status_area, input_area, help_area] = &chunks[..] else {
        return;
    };

    let status = if app.has_credential() {
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::styled("Gemini API key configured", Style::default().fg(Color::White)),
        ])
    } else {
        Line::from(vec![
            Span::styled("○ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "No key set, requests use the shared quota",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };
    f.render_widget(Paragraph::new(status), *status_area);

    let content = app.api_key_input.content();
    let shown = if app.api_key_visible {
        content.to_string()
    } else {
        masked(content)
    };
    let key_len = content.chars().count();
    let title = if key_len > 0 {
        format!("Gemini API Key ({} chars)", key_len)
    } else {
        "Gemini API Key".to_string()
    };
    let cursor = if app.api_key_visible {
        app.api_key_input.cursor_position()
    } else {
        shown.chars().count()
    };
    let config = components::TextInputConfig::new(&shown, &title)
        .with_placeholder(Some("Paste or type your API key..."))
        .with_focus(true)
        .with_cursor_position(cursor);
    components::render_text_input(f, *input_area, config);

    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::White);
    let help = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Keys start with '{}' and are at least {} characters.",
                CREDENTIAL_PREFIX, CREDENTIAL_MIN_LENGTH
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled("    Get your key: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "https://aistudio.google.com/app/apikey",
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", key_style),
            Span::styled(" save  ", text_style),
            Span::styled("Tab", key_style),
            Span::styled(if app.api_key_visible { " hide  " } else { " show  " }, text_style),
            Span::styled("Ctrl+D", key_style),
            Span::styled(" clear  ", text_style),
            Span::styled("Esc", key_style),
            Span::styled(" close", text_style),
        ]),
    ];
    f.render_widget(Paragraph::new(help).wrap(Wrap { trim: false }), *help_area);
}
