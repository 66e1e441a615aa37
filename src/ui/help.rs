use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::components;

const SHORTCUTS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Form",
        &[
            ("Tab / ↓", "Next field"),
            ("Shift+Tab / ↑", "Previous field"),
            ("◀ ▶", "Change mode, genre or duration"),
            ("Enter", "New line, or submit on the button"),
            ("Ctrl+S", "Submit"),
        ],
    ),
    (
        "Result",
        &[
            ("Ctrl+R", "Jump to the result"),
            ("↑ ↓", "Previous / next section"),
            ("Enter / c", "Copy section"),
            ("Ctrl+Y", "Copy everything"),
            ("PgUp / PgDn", "Scroll section"),
        ],
    ),
    (
        "Global",
        &[
            ("Ctrl+K", "API key settings"),
            ("F1", "This help"),
            ("Esc", "Back/close"),
            ("Ctrl+C", "Quit"),
        ],
    ),
];

pub fn render_help_view(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    if let [header, body, footer] = &chunks[..] {
        render_help_header(f, *header);
        render_help_body(f, *body);
        components::render_navigation_footer(f, *footer, "HELP", &[("Esc", "back")], &[], None);
    }
}

fn render_help_header(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                "ScriptDesk",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ", Style::default()),
            Span::styled("Help", Style::default().fg(Color::Cyan)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        area,
    );
}

fn render_help_body(f: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    for (section, shortcuts) in SHORTCUTS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", section),
            Style::default().fg(Color::Cyan),
        )));
        for (key, description) in shortcuts {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", key), Style::default().fg(Color::Yellow)),
                Span::styled(*description, Style::default().fg(Color::White)),
            ]));
        }
    }

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Shortcuts ")
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        area,
    );
}
