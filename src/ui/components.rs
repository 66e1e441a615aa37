use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::utils::{slice_by_chars, wrap_text};

const SEPARATOR: &str = "  ";
const CURSOR: &str = "█";

/// Configuration for text input rendering
pub struct TextInputConfig<'a> {
    pub content: &'a str,
    pub title: &'a str,
    pub placeholder: Option<&'a str>,
    pub focused: bool,
    pub invalid: bool,
    pub multiline: bool,
    pub cursor_position: Option<usize>,
}

impl<'a> TextInputConfig<'a> {
    pub fn new(content: &'a str, title: &'a str) -> Self {
        Self {
            content,
            title,
            placeholder: None,
            focused: false,
            invalid: false,
            multiline: false,
            cursor_position: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: Option<&'a str>) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn with_invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    /// Sets cursor position (character index)
    pub fn with_cursor_position(mut self, cursor_position: usize) -> Self {
        self.cursor_position = Some(cursor_position);
        self
    }
}

/// Border color for a boxed control: red when invalid, cyan when focused
pub fn field_border_style(focused: bool, invalid: bool) -> Style {
    if invalid {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn field_block(title: &str, focused: bool, invalid: bool) -> Block<'static> {
    let title_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![Span::styled(format!(" {} ", title), title_style)]))
        .border_style(field_border_style(focused, invalid))
}

/// Renders a text input field, single or multi-line, with cursor indicator
pub fn render_text_input(frame: &mut Frame, area: Rect, config: TextInputConfig) {
    let block = field_block(config.title, config.focused, config.invalid);
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let cursor_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::SLOW_BLINK);

    if config.content.is_empty() {
        let mut spans = Vec::new();
        if config.focused {
            spans.push(Span::styled(CURSOR, cursor_style));
        }
        if let Some(placeholder) = config.placeholder {
            spans.push(Span::styled(
                placeholder.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
        return;
    }

    let length = config.content.chars().count();
    let cursor_index = config.cursor_position.unwrap_or(length).min(length);

    if config.multiline {
        let lines = multiline_lines(config.content, cursor_index, config.focused, inner_width);
        let cursor_line = if config.focused {
            let before = slice_by_chars(config.content, 0, cursor_index);
            wrap_text(&format!("{}{}", before, CURSOR), inner_width.max(1))
                .len()
                .saturating_sub(1)
        } else {
            0
        };
        let offset = cursor_line.saturating_sub(inner_height.saturating_sub(1));
        let visible: Vec<Line> = lines
            .into_iter()
            .skip(offset)
            .take(inner_height.max(1))
            .map(|line| render_line_with_cursor(line, cursor_style))
            .collect();
        frame.render_widget(Paragraph::new(visible).block(block), area);
        return;
    }

    let cursor_width = usize::from(config.focused);
    let available_width = inner_width.saturating_sub(cursor_width).max(1);
    let (start, end) = visible_window(config.content, cursor_index, available_width);
    let visible_content = slice_by_chars(config.content, start, end);
    let relative_cursor = cursor_index
        .saturating_sub(start)
        .min(visible_content.chars().count());
    let before = slice_by_chars(&visible_content, 0, relative_cursor);
    let after = slice_by_chars(
        &visible_content,
        relative_cursor,
        visible_content.chars().count(),
    );

    let text_style = Style::default().fg(Color::White);
    let mut spans = vec![Span::styled(before, text_style)];
    if config.focused {
        spans.push(Span::styled(CURSOR, cursor_style));
    }
    spans.push(Span::styled(after, text_style));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn multiline_lines(content: &str, cursor: usize, focused: bool, width: usize) -> Vec<String> {
    let text = if focused {
        let length = content.chars().count();
        format!(
            "{}{}{}",
            slice_by_chars(content, 0, cursor),
            CURSOR,
            slice_by_chars(content, cursor, length)
        )
    } else {
        content.to_string()
    };
    wrap_text(&text, width.max(1))
}

fn render_line_with_cursor(line: String, cursor_style: Style) -> Line<'static> {
    let text_style = Style::default().fg(Color::White);
    match line.split_once(CURSOR) {
        Some((before, after)) => Line::from(vec![
            Span::styled(before.to_string(), text_style),
            Span::styled(CURSOR, cursor_style),
            Span::styled(after.to_string(), text_style),
        ]),
        None => Line::from(Span::styled(line, text_style)),
    }
}

fn visible_window(content: &str, cursor: usize, width: usize) -> (usize, usize) {
    let length = content.chars().count();
    let cursor = cursor.min(length);
    if length <= width {
        return (0, length);
    }
    let mut start = cursor.saturating_sub(width.saturating_sub(1));
    if start + width > length {
        start = length.saturating_sub(width);
    }
    (start, start + width)
}

/// Renders a select control as `◀ value ▶` with an optional hint underneath
pub fn render_select(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    hint: Option<&str>,
    focused: bool,
    invalid: bool,
) {
    let arrow_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut lines = vec![Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(
            value.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", arrow_style),
    ])];
    if let Some(hint) = hint {
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(field_block(title, focused, invalid)),
        area,
    );
}

/// Renders a footer with mode indicator, keybindings, status flags and the current toast
pub fn render_navigation_footer(
    f: &mut Frame,
    area: Rect,
    mode: &str,
    keybindings: &[(&str, &str)],
    status: &[(&str, bool)],
    toast: Option<&str>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    for &(key, desc) in keybindings {
        spans.push(Span::raw(SEPARATOR));
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    for &(label, active) in status {
        spans.push(Span::raw(SEPARATOR));
        if active {
            spans.push(Span::styled(
                format!(" {} ", label),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", label),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let toast_width = toast.map_or(0, |message| message.chars().count() as u16 + 4);
    let left_area = Rect {
        width: inner.width.saturating_sub(toast_width.saturating_add(1)),
        ..inner
    };
    f.render_widget(Paragraph::new(Line::from(spans)), left_area);

    if let Some(message) = toast {
        let toast_area = Rect {
            x: inner.x + inner.width.saturating_sub(toast_width),
            width: toast_width.min(inner.width),
            ..inner
        };
        render_status_toast(f, toast_area, message);
    }
}

pub fn render_status_toast(frame: &mut Frame, area: Rect, message: &str) {
    let toast = Paragraph::new(Line::from(vec![Span::styled(
        format!(" {} ", message),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )]))
    .alignment(Alignment::Right);

    frame.render_widget(toast, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_window_follows_cursor() {
        assert_eq!(visible_window("short", 5, 10), (0, 5));
        assert_eq!(visible_window("abcdefghij", 10, 4), (6, 10));
        assert_eq!(visible_window("abcdefghij", 0, 4), (0, 4));
    }

    #[test]
    fn test_multiline_lines_places_cursor() {
        let lines = multiline_lines("ab\ncd", 4, true, 10);
        assert_eq!(lines, vec!["ab".to_string(), format!("c{}d", CURSOR)]);
    }
}
