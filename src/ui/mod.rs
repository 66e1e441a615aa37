mod components;
mod form;
mod help;
mod results;
mod settings;
mod utils;

use crate::app::{App, AppMode};
use ratatui::Frame;

pub fn render(f: &mut Frame, app: &App) {
    match app.mode {
        AppMode::Form => form::render_form_view(f, app),
        AppMode::ApiSettings => {
            // Form stays visible behind the dialog
            form::render_form_view(f, app);
            settings::render_api_settings(f, app);
        }
        AppMode::Help => help::render_help_view(f),
    }
}
