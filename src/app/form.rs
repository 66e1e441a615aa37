use crate::app::{App, Focus, Navigable, TextInput};
use crate::script::{FormField, ResultField, ScriptMode};

impl App {
    /// Switches the active mode. Calling it with the active mode does nothing;
    /// a real switch clears the visible result/error and abandons any request in flight.
    pub fn set_mode(&mut self, mode: ScriptMode) {
        if !self.form.set_mode(mode) {
            return;
        }
        tracing::debug!(%mode, "mode switched");
        self.after_mode_change();
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.form.mode().other());
    }

    fn after_mode_change(&mut self) {
        self.lifecycle.reset();
        self.validation_error = None;
        self.result_scroll = 0;
        if !self.focus_order().contains(&self.focus) {
            self.focus = Focus::Form(FormField::Mode);
        }
    }

    /// Focusable items in display order: visible inputs, then result sections
    #[must_use]
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order: Vec<Focus> = self
            .form
            .visible_fields()
            .into_iter()
            .map(Focus::Form)
            .collect();
        if let Some(result) = self.lifecycle.result() {
            order.extend(result.available_fields().into_iter().map(Focus::Result));
        }
        order
    }

    pub fn focus_next(&mut self) {
        FocusNavigable::new(self).next_item();
    }

    pub fn focus_previous(&mut self) {
        FocusNavigable::new(self).previous_item();
    }

    #[must_use]
    pub fn focused_field(&self) -> Option<FormField> {
        match self.focus {
            Focus::Form(field) => Some(field),
            Focus::Result(_) => None,
        }
    }

    #[must_use]
    pub fn focused_result_field(&self) -> Option<ResultField> {
        match self.focus {
            Focus::Result(field) => Some(field),
            Focus::Form(_) => None,
        }
    }

    #[must_use]
    pub fn text_input(&self, field: FormField) -> Option<&TextInput> {
        self.text_inputs.get(&field)
    }

    /// Runs `edit` against the focused text input and copies the result into the form
    fn edit_focused_text(&mut self, edit: impl FnOnce(&mut TextInput)) -> bool {
        let Some(field) = self.focused_field().filter(|field| field.is_text()) else {
            return false;
        };
        let Some(input) = self.text_inputs.get_mut(&field) else {
            return false;
        };
        edit(input);
        let content = input.content().to_string();
        if let Some(target) = self.form.text_mut(field) {
            *target = content;
        }
        if self
            .validation_error
            .as_ref()
            .is_some_and(|error| error.field == field)
        {
            self.validation_error = None;
        }
        true
    }

    pub fn add_form_char(&mut self, character: char) {
        self.edit_focused_text(|input| input.add_char(character));
    }

    pub fn remove_form_char(&mut self) {
        self.edit_focused_text(TextInput::remove_char);
    }

    pub fn delete_form_char(&mut self) {
        self.edit_focused_text(TextInput::delete_char);
    }

    pub fn paste_into_form(&mut self, text: &str) {
        let multiline = self.focused_field().is_some_and(FormField::is_multiline);
        let text = if multiline {
            text.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            text.replace(['\n', '\r'], " ")
        };
        self.edit_focused_text(|input| input.add_str(&text));
    }

    /// Enter: newline in multi-line fields, submit on the button, otherwise advance
    pub fn form_enter(&mut self) -> color_eyre::Result<()> {
        match self.focused_field() {
            Some(FormField::Submit) => self.submit()?,
            Some(field) if field.is_multiline() => {
                self.edit_focused_text(|input| input.add_char('\n'));
            }
            Some(_) => self.focus_next(),
            None => self.copy_focused_result(),
        }
        Ok(())
    }

    /// Left/Right: cycle select fields, move the cursor in text fields
    pub fn form_horizontal(&mut self, forward: bool) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if field.is_select() {
            if field == FormField::Mode {
                self.toggle_mode();
            } else {
                self.form.cycle_select(field, forward);
                if self
                    .validation_error
                    .as_ref()
                    .is_some_and(|error| error.field == field)
                {
                    self.validation_error = None;
                }
            }
            return;
        }
        self.edit_focused_text(|input| {
            if forward {
                input.move_right();
            } else {
                input.move_left();
            }
        });
    }

    pub fn form_home(&mut self) {
        self.edit_focused_text(TextInput::move_to_start);
    }

    pub fn form_end(&mut self) {
        self.edit_focused_text(TextInput::move_to_end);
    }

    #[must_use]
    pub fn is_invalid(&self, field: FormField) -> bool {
        self.validation_error
            .as_ref()
            .is_some_and(|error| error.field == field)
    }
}

// Navigation over the focus order
pub struct FocusNavigable<'a> {
    app: &'a mut App,
    order: Vec<Focus>,
}

impl<'a> FocusNavigable<'a> {
    pub fn new(app: &'a mut App) -> Self {
        let order = app.focus_order();
        Self { app, order }
    }
}

impl Navigable for FocusNavigable<'_> {
    fn get_item_count(&self) -> usize {
        self.order.len()
    }

    fn get_selected_index(&self) -> usize {
        self.order
            .iter()
            .position(|focus| *focus == self.app.focus)
            .unwrap_or(0)
    }

    fn set_selected_index(&mut self, index: usize) {
        if let Some(focus) = self.order.get(index) {
            self.app.focus = *focus;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::{app_with, wait_for_settle};
    use crate::app::{Focus, RequestState};
    use crate::config::Config;
    use crate::script::{Duration, FormField, Genre, ResultPayload, ScriptMode};

    fn type_text(app: &mut crate::app::App, field: FormField, text: &str) {
        app.focus = Focus::Form(field);
        for character in text.chars() {
            app.add_form_char(character);
        }
    }

    #[test]
    fn test_default_mode_comes_from_config() {
        let (app, _) = app_with(&Config::default(), Ok(ResultPayload::default()));
        assert_eq!(app.form.mode(), ScriptMode::Humanize);

        let mut config = Config::default();
        config.form.default_mode = ScriptMode::Generate;
        config.form.default_duration = Duration::Seconds120;
        config.form.default_genre = Genre::Dramatic;
        let (app, _) = app_with(&config, Ok(ResultPayload::default()));
        assert_eq!(app.form.mode(), ScriptMode::Generate);
        assert_eq!(app.form.duration, Duration::Seconds120);
        assert_eq!(app.form.genre, Genre::Dramatic);
    }

    #[test]
    fn test_focus_order_tracks_mode() {
        let (mut app, _) = app_with(&Config::default(), Ok(ResultPayload::default()));
        assert_eq!(app.focus, Focus::Form(FormField::Mode));
        app.focus_next();
        assert_eq!(app.focus, Focus::Form(FormField::RawScript));
        app.focus_previous();
        app.focus_previous();
        assert_eq!(app.focus, Focus::Form(FormField::Submit));

        app.focus = Focus::Form(FormField::Mode);
        app.form_horizontal(true);
        assert_eq!(app.form.mode(), ScriptMode::Generate);
        app.focus_next();
        assert_eq!(app.focus, Focus::Form(FormField::Topic));
    }

    #[test]
    fn test_typing_updates_form_state() {
        let (mut app, _) = app_with(&Config::default(), Ok(ResultPayload::default()));
        type_text(&mut app, FormField::RawScript, "line one");
        app.form_enter().unwrap();
        type_text(&mut app, FormField::RawScript, "two");
        assert_eq!(app.form.raw_script, "line one\ntwo");

        app.remove_form_char();
        assert_eq!(app.form.raw_script, "line one\ntw");
    }

    #[test]
    fn test_paste_flattens_single_line_fields() {
        let mut config = Config::default();
        config.form.default_mode = ScriptMode::Generate;
        let (mut app, _) = app_with(&config, Ok(ResultPayload::default()));
        app.focus = Focus::Form(FormField::Topic);
        app.paste_into_form("Flight\nMH370");
        assert_eq!(app.form.topic, "Flight MH370");
    }

    #[test]
    fn test_mode_switch_clears_result_and_is_idempotent() {
        let result = ResultPayload {
            title: Some("T".to_string()),
            ..ResultPayload::default()
        };
        let (mut app, _) = app_with(&Config::default(), Ok(result));
        type_text(&mut app, FormField::RawScript, "script");
        app.submit().unwrap();
        wait_for_settle(&mut app);
        assert!(app.lifecycle.result().is_some());

        app.set_mode(ScriptMode::Humanize);
        assert!(app.lifecycle.result().is_some());

        app.set_mode(ScriptMode::Generate);
        assert_eq!(app.lifecycle.state(), &RequestState::Idle);
        assert_eq!(app.form.raw_script, "script");
    }

    #[test]
    fn test_editing_invalid_field_clears_inline_error() {
        let (mut app, _) = app_with(&Config::default(), Ok(ResultPayload::default()));
        app.submit().unwrap();
        assert!(app.is_invalid(FormField::RawScript));
        assert_eq!(app.focus, Focus::Form(FormField::RawScript));

        app.add_form_char('x');
        assert!(!app.is_invalid(FormField::RawScript));
    }
}
