use crate::app::{App, AppMode};

impl App {
    pub fn open_api_settings(&mut self) {
        self.mode = AppMode::ApiSettings;
        self.api_key_visible = false;
        self.api_key_input
            .set_content(self.credentials.get().unwrap_or_default());
    }

    pub fn close_api_settings(&mut self) {
        self.mode = AppMode::Form;
        self.api_key_input.clear();
        self.api_key_visible = false;
    }

    pub fn add_api_key_char(&mut self, character: char) {
        self.api_key_input.add_char(character);
    }

    pub fn remove_api_key_char(&mut self) {
        self.api_key_input.remove_char();
    }

    pub fn paste_api_key(&mut self, text: &str) {
        let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        self.api_key_input.add_str(&cleaned);
    }

    pub fn toggle_api_key_visibility(&mut self) {
        self.api_key_visible = !self.api_key_visible;
    }

    /// Stores the typed key. A rejected key leaves the dialog open with a warning.
    pub fn save_api_key(&mut self) {
        let candidate = self.api_key_input.content().to_string();
        match self.credentials.save(&candidate) {
            Ok(()) => {
                self.show_status_toast("KEY SAVED");
                self.close_api_settings();
            }
            Err(error) => {
                tracing::warn!(%error, "API key rejected");
                self.show_status_toast(error.to_string());
            }
        }
    }

    pub fn clear_api_key(&mut self) {
        match self.credentials.clear() {
            Ok(()) => {
                self.api_key_input.clear();
                self.show_status_toast("KEY CLEARED");
            }
            Err(error) => {
                tracing::warn!(%error, "failed to clear API key");
                self.show_status_toast(error.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::AppMode;
    use crate::app::test_support::app_with;
    use crate::config::Config;
    use crate::script::ResultPayload;

    const VALID_KEY: &str = "AIzaSyD4mPleKeyForTestingOnly0123";

    #[test]
    fn test_save_valid_key_closes_dialog() {
        let (mut app, _) = app_with(&Config::default(), Ok(ResultPayload::default()));
        app.open_api_settings();
        assert_eq!(app.mode, AppMode::ApiSettings);
        app.paste_api_key(&format!(" {}\n", VALID_KEY));
        app.save_api_key();

        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(app.credentials.get().as_deref(), Some(VALID_KEY));
        assert_eq!(app.status_toast_message(), Some("KEY SAVED"));
    }

    #[test]
    fn test_malformed_key_keeps_dialog_open() {
        let (mut app, _) = app_with(&Config::default(), Ok(ResultPayload::default()));
        app.open_api_settings();
        for character in "sk-not-a-gemini-key".chars() {
            app.add_api_key_char(character);
        }
        app.save_api_key();

        assert_eq!(app.mode, AppMode::ApiSettings);
        assert!(!app.has_credential());
        assert!(app.status_toast_message().is_some_and(|m| m.contains("AIza")));
    }

    #[test]
    fn test_reopen_shows_stored_key_and_clear_removes_it() {
        let (mut app, _) = app_with(&Config::default(), Ok(ResultPayload::default()));
        app.open_api_settings();
        app.paste_api_key(VALID_KEY);
        app.save_api_key();

        app.open_api_settings();
        assert_eq!(app.api_key_input.content(), VALID_KEY);
        assert!(!app.api_key_visible);
        app.toggle_api_key_visibility();
        assert!(app.api_key_visible);

        app.clear_api_key();
        assert!(!app.has_credential());
        assert!(app.api_key_input.is_empty());
    }
}
