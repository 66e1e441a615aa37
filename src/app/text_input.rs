/// Editable text buffer with a character-based cursor.
/// Backs every free-text form field and the API key dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    content: String,
    cursor_index: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a character at the cursor
    pub fn add_char(&mut self, character: char) {
        let insert_index = char_to_byte_index(&self.content, self.cursor_index);
        self.content.insert(insert_index, character);
        self.cursor_index = self.cursor_index.saturating_add(1);
    }

    pub fn add_str(&mut self, text: &str) {
        for character in text.chars() {
            self.add_char(character);
        }
    }

    /// Removes the character before the cursor (backspace)
    pub fn remove_char(&mut self) {
        if self.cursor_index == 0 {
            return;
        }
        let end_index = char_to_byte_index(&self.content, self.cursor_index);
        let start_index = char_to_byte_index(&self.content, self.cursor_index.saturating_sub(1));
        if start_index < end_index {
            self.content.replace_range(start_index..end_index, "");
            self.cursor_index = self.cursor_index.saturating_sub(1);
        }
    }

    /// Removes the character at the cursor (delete)
    pub fn delete_char(&mut self) {
        if self.cursor_index >= self.content.chars().count() {
            return;
        }
        let start_index = char_to_byte_index(&self.content, self.cursor_index);
        let end_index = char_to_byte_index(&self.content, self.cursor_index.saturating_add(1));
        if start_index < end_index {
            self.content.replace_range(start_index..end_index, "");
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_index = self.cursor_index.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_index < self.content.chars().count() {
            self.cursor_index += 1;
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor_index = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor_index = self.content.chars().count();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position in characters
    pub fn cursor_position(&self) -> usize {
        self.cursor_index
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_index = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Replaces the content and parks the cursor at the end
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.cursor_index = self.content.chars().count();
    }
}

fn char_to_byte_index(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map_or_else(|| value.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_follow_cursor_on_multibyte_text() {
        let mut input = TextInput::new();
        input.add_str("कहनी");
        input.move_left();
        input.move_left();
        input.add_char('ा');
        assert_eq!(input.content(), "कहानी");
        assert_eq!(input.cursor_position(), 3);

        input.remove_char();
        assert_eq!(input.content(), "कहनी");
        input.move_to_start();
        input.delete_char();
        assert_eq!(input.content(), "हनी");
    }

    #[test]
    fn test_boundaries_are_safe() {
        let mut input = TextInput::new();
        input.remove_char();
        input.delete_char();
        input.move_left();
        input.move_right();
        assert!(input.is_empty());
        assert_eq!(input.cursor_position(), 0);

        input.set_content("abc".to_string());
        assert_eq!(input.cursor_position(), 3);
        input.clear();
        assert_eq!(input.cursor_position(), 0);
    }
}
