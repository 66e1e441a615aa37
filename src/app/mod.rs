mod form;
mod help;
pub mod lifecycle;
mod navigation;
mod results;
mod settings;
mod text_input;
mod types;

pub use lifecycle::{RequestLifecycle, RequestState};
pub use navigation::Navigable;
pub use text_input::TextInput;
pub use types::*;

use crate::config::Config;
use crate::script::{FormField, FormState, ValidationError};
use crate::services::clipboard::ClipboardService;
use crate::services::{CredentialStore, FileStore, HttpBackend, KeyValueStore, MemoryStore, ScriptBackend};
use color_eyre::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;

/// Application mode state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Form,
    ApiSettings,
    Help,
}

/// Main application state
pub struct App {
    pub mode: AppMode,
    pub should_quit: bool,

    // Form fields
    pub form: FormState,
    pub text_inputs: HashMap<FormField, TextInput>,
    pub focus: Focus,
    pub validation_error: Option<ValidationError>,

    // Request lifecycle
    pub lifecycle: RequestLifecycle,
    pub backend: Arc<dyn ScriptBackend>,
    pub event_tx: Sender<GenerateEvent>,
    pub event_rx: Receiver<GenerateEvent>,
    pub result_scroll: u16,

    // API settings dialog
    pub credentials: CredentialStore<Box<dyn KeyValueStore>>,
    pub api_key_input: TextInput,
    pub api_key_visible: bool,

    pub status_toast: Option<StatusToast>,
    pub clipboard_service: ClipboardService,
    pub loading_frame: u8,
    pub last_loading_tick: Option<std::time::Instant>,
}

impl App {
    /// Creates the application with the HTTP backend and on-disk credential storage
    pub fn new(config: &Config) -> Result<Self> {
        let backend = HttpBackend::new(&config.server)?;
        tracing::info!(url = backend.url(), "generation endpoint configured");

        let store: Box<dyn KeyValueStore> = match FileStore::open_default() {
            Ok(store) => {
                tracing::debug!(path = %store.path().display(), "using file credential store");
                Box::new(store)
            }
            Err(error) => {
                tracing::warn!(%error, "no data directory, credential will not persist");
                Box::new(MemoryStore::default())
            }
        };
        Ok(Self::with_services(config, Arc::new(backend), store))
    }

    /// Creates the application around explicit collaborators
    pub fn with_services(
        config: &Config,
        backend: Arc<dyn ScriptBackend>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let mut form = FormState::new(config.form.default_mode);
        form.genre = config.form.default_genre;
        form.set_duration(config.form.default_duration);

        let text_inputs = [
            FormField::RawScript,
            FormField::Topic,
            FormField::Description,
            FormField::Keywords,
        ]
        .into_iter()
        .map(|field| (field, TextInput::new()))
        .collect();

        let (event_tx, event_rx) = channel();

        Self {
            mode: AppMode::Form,
            should_quit: false,
            form,
            text_inputs,
            focus: Focus::Form(FormField::Mode),
            validation_error: None,
            lifecycle: RequestLifecycle::new(),
            backend,
            event_tx,
            event_rx,
            result_scroll: 0,
            credentials: CredentialStore::new(store),
            api_key_input: TextInput::new(),
            api_key_visible: false,
            status_toast: None,
            clipboard_service: ClipboardService::new(),
            loading_frame: 0,
            last_loading_tick: None,
        }
    }

    pub fn show_status_toast(&mut self, message: impl Into<String>) {
        self.status_toast = Some(StatusToast::new(message));
    }

    pub fn clear_expired_status_toast(&mut self) {
        let should_clear = self
            .status_toast
            .as_ref()
            .is_some_and(|toast| toast.is_expired(Duration::from_secs(3)));
        if should_clear {
            self.status_toast = None;
        }
    }

    #[must_use]
    pub fn status_toast_message(&self) -> Option<&str> {
        self.status_toast.as_ref().map(|toast| toast.message.as_str())
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.credentials.has_credential()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::script::ResultPayload;
    use crate::services::SubmitError;
    use std::sync::Mutex;

    /// Backend that answers every request with a fixed outcome and records payloads
    pub struct FixedBackend {
        pub outcome: Result<ResultPayload, SubmitError>,
        pub payloads: Mutex<Vec<serde_json::Value>>,
    }

    impl ScriptBackend for FixedBackend {
        fn generate(
            &self,
            payload: &crate::script::RequestPayload,
        ) -> Result<ResultPayload, SubmitError> {
            if let (Ok(mut payloads), Ok(value)) =
                (self.payloads.lock(), serde_json::to_value(payload))
            {
                payloads.push(value);
            }
            self.outcome.clone()
        }
    }

    pub fn app_with(
        config: &Config,
        outcome: Result<ResultPayload, SubmitError>,
    ) -> (App, Arc<FixedBackend>) {
        let backend = Arc::new(FixedBackend {
            outcome,
            payloads: Mutex::new(Vec::new()),
        });
        let app = App::with_services(
            config,
            backend.clone(),
            Box::new(MemoryStore::default()),
        );
        (app, backend)
    }

    /// Polls until the in-flight request settles
    pub fn wait_for_settle(app: &mut App) {
        for _ in 0..200 {
            app.poll_generate_events();
            if !app.lifecycle.is_loading() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("request never settled");
    }
}
