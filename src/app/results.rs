use crate::app::{App, Focus, Navigable};
use crate::script::ResultField;
use crate::services::clipboard::CopyMethod;

impl App {
    /// Moves keyboard focus into the result panel, on its first section
    pub fn focus_results(&mut self) {
        if let Some(field) = self
            .lifecycle
            .result()
            .and_then(|result| result.available_fields().first().copied())
        {
            self.focus = Focus::Result(field);
            self.result_scroll = 0;
        }
    }

    pub fn next_result_field(&mut self) {
        ResultFieldNavigable::new(self).next_item();
    }

    pub fn previous_result_field(&mut self) {
        ResultFieldNavigable::new(self).previous_item();
    }

    pub fn scroll_result_down(&mut self, lines: u16) {
        self.result_scroll = self.result_scroll.saturating_add(lines);
    }

    pub fn scroll_result_up(&mut self, lines: u16) {
        self.result_scroll = self.result_scroll.saturating_sub(lines);
    }

    /// Copies the focused result section
    pub fn copy_focused_result(&mut self) {
        let Some(field) = self.focused_result_field() else {
            return;
        };
        let Some(text) = self.lifecycle.result().map(|result| result.copy_text(field)) else {
            return;
        };
        self.copy_to_clipboard(&text, field.label());
    }

    /// Copies every section as one labeled block
    pub fn copy_all_results(&mut self) {
        let Some(text) = self.lifecycle.result().map(|result| result.aggregate_text()) else {
            return;
        };
        self.copy_to_clipboard(&text, "all fields");
    }

    fn copy_to_clipboard(&mut self, text: &str, what: &str) {
        match self.clipboard_service.copy_text(text) {
            Ok(method) => {
                tracing::debug!(what, ?method, "copied result");
                let message = match method {
                    CopyMethod::System => "COPIED",
                    CopyMethod::Terminal => "COPIED (TERMINAL)",
                };
                self.show_status_toast(message);
            }
            Err(error) => {
                tracing::warn!(what, %error, "copy failed");
                self.show_status_toast("COPY FAILED");
            }
        }
    }
}

// Navigation among the sections of the current result
pub struct ResultFieldNavigable<'a> {
    app: &'a mut App,
    fields: Vec<ResultField>,
}

impl<'a> ResultFieldNavigable<'a> {
    pub fn new(app: &'a mut App) -> Self {
        let fields = app
            .lifecycle
            .result()
            .map(|result| result.available_fields())
            .unwrap_or_default();
        Self { app, fields }
    }
}

impl Navigable for ResultFieldNavigable<'_> {
    fn get_item_count(&self) -> usize {
        self.fields.len()
    }

    fn get_selected_index(&self) -> usize {
        self.app
            .focused_result_field()
            .and_then(|current| self.fields.iter().position(|field| *field == current))
            .unwrap_or(0)
    }

    fn set_selected_index(&mut self, index: usize) {
        if let Some(field) = self.fields.get(index) {
            self.app.focus = Focus::Result(*field);
            self.app.result_scroll = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::{app_with, wait_for_settle};
    use crate::app::Focus;
    use crate::config::Config;
    use crate::script::{FormField, ResultField, ResultPayload};

    fn settled_app(result: ResultPayload) -> crate::app::App {
        let (mut app, _) = app_with(&Config::default(), Ok(result));
        app.focus = Focus::Form(FormField::RawScript);
        app.paste_into_form("some script");
        app.submit().unwrap();
        wait_for_settle(&mut app);
        app
    }

    #[test]
    fn test_result_navigation_skips_missing_sections() {
        let result: ResultPayload = serde_json::from_str(
            r##"{"title":"T","vo_script":"V","description":"D","hashtags":["#a"]}"##,
        )
        .unwrap();
        let mut app = settled_app(result);

        app.focus_results();
        assert_eq!(app.focus, Focus::Result(ResultField::Title));
        app.next_result_field();
        app.next_result_field();
        assert_eq!(app.focus, Focus::Result(ResultField::Description));
        app.next_result_field();
        assert_eq!(app.focus, Focus::Result(ResultField::Hashtags));
        app.next_result_field();
        assert_eq!(app.focus, Focus::Result(ResultField::Title));
        app.previous_result_field();
        assert_eq!(app.focus, Focus::Result(ResultField::Hashtags));
    }

    #[test]
    fn test_focus_results_without_result_keeps_focus() {
        let (mut app, _) = app_with(&Config::default(), Ok(ResultPayload::default()));
        app.focus_results();
        assert_eq!(app.focus, Focus::Form(FormField::Mode));
    }

    #[test]
    fn test_scroll_saturates_at_top() {
        let mut app = settled_app(ResultPayload::default());
        app.scroll_result_down(3);
        app.scroll_result_up(5);
        assert_eq!(app.result_scroll, 0);
    }
}
