use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Creates a centered rectangle taking the given percentages of `r`,
/// never smaller than 30x10 when the container allows it
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let min_width = 30u16;
    let min_height = 10u16;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let middle = vertical.get(1).copied().unwrap_or(r);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(middle);
    let mut result = horizontal.get(1).copied().unwrap_or(middle);

    if result.width < min_width && r.width >= min_width {
        result.width = min_width;
        result.x = r.x + (r.width - min_width) / 2;
    }
    if result.height < min_height && r.height >= min_height {
        result.height = min_height;
        result.y = r.y + (r.height - min_height) / 2;
    }
    result
}

pub fn slice_by_chars(value: &str, start: usize, end: usize) -> String {
    value
        .chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

/// Hard-wraps on display width, one output line per row. Explicit newlines
/// always start a new row, so the row of any prefix is stable.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for character in line.chars() {
            let char_width = character.width().unwrap_or(0);
            if current_width + char_width > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(character);
            current_width += char_width;
        }
        rows.push(current);
    }
    rows
}

/// Wraps at word boundaries where possible, for read-only text
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut current = String::new();
        for word in line.split(' ') {
            let candidate_width = if current.is_empty() {
                word.width()
            } else {
                current.width() + 1 + word.width()
            };
            if candidate_width <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            if word.width() <= width {
                current.push_str(word);
            } else {
                let mut pieces = wrap_text(word, width);
                current = pieces.pop().unwrap_or_default();
                rows.extend(pieces);
            }
        }
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_counts_display_width() {
        assert_eq!(wrap_text("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_text("a\n\nb", 4), vec!["a", "", "b"]);
        assert_eq!(wrap_text("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn test_wrap_words_keeps_words_whole() {
        assert_eq!(
            wrap_words("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
        assert_eq!(wrap_words("abcdefghijk", 4), vec!["abcd", "efgh", "ijk"]);
    }

    #[test]
    fn test_centered_rect_respects_minimum() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(10, 10, area);
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 10);
        assert_eq!(rect.x, 35);
    }
}
