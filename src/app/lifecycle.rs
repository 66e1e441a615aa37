use chrono::Local;
use color_eyre::Result;
use std::sync::Arc;
use std::thread;

use crate::app::{App, Focus, GenerateEvent};
use crate::script::{FormField, ResultPayload, ScriptMode, build_payload};
use crate::services::SubmitError;

pub type RequestId = u64;

/// Where the current submission stands
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Loading {
        request_id: RequestId,
        mode: ScriptMode,
    },
    Success {
        request_id: RequestId,
        result: ResultPayload,
        received_at: String,
    },
    Failure {
        request_id: RequestId,
        message: String,
    },
}

/// Tracks which request the UI is waiting on.
///
/// Every submission gets a fresh id; only the outcome of the most recently
/// issued id is ever applied, so a slow earlier response cannot overwrite a
/// later one.
#[derive(Debug)]
pub struct RequestLifecycle {
    state: RequestState,
    next_id: RequestId,
    current: Option<RequestId>,
}

impl Default for RequestLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLifecycle {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            next_id: 1,
            current: None,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading { .. })
    }

    pub fn is_submit_enabled(&self) -> bool {
        !self.is_loading()
    }

    /// Enters Loading and clears any previous result or error.
    /// Returns `None` while a request is already in flight.
    pub fn begin(&mut self, mode: ScriptMode) -> Option<RequestId> {
        if self.is_loading() {
            return None;
        }
        let request_id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.current = Some(request_id);
        self.state = RequestState::Loading { request_id, mode };
        Some(request_id)
    }

    /// Applies an outcome if it belongs to the latest request. Returns false for stale ones.
    pub fn settle(
        &mut self,
        request_id: RequestId,
        outcome: Result<ResultPayload, SubmitError>,
        credential_configured: bool,
    ) -> bool {
        if self.current != Some(request_id) {
            tracing::debug!(request_id, current = ?self.current, "dropping stale response");
            return false;
        }
        self.current = None;
        self.state = match outcome {
            Ok(result) => {
                tracing::info!(request_id, "generation succeeded");
                RequestState::Success {
                    request_id,
                    result,
                    received_at: Local::now().format("%H:%M:%S").to_string(),
                }
            }
            Err(error) => {
                tracing::warn!(request_id, %error, "generation failed");
                RequestState::Failure {
                    request_id,
                    message: error.user_message(credential_configured),
                }
            }
        };
        true
    }

    /// Back to Idle; whatever is in flight will be ignored when it lands
    pub fn reset(&mut self) {
        if let Some(request_id) = self.current.take() {
            tracing::debug!(request_id, "abandoning in-flight request");
        }
        self.state = RequestState::Idle;
    }

    pub fn result(&self) -> Option<&ResultPayload> {
        match &self.state {
            RequestState::Success { result, .. } => Some(result),
            RequestState::Idle | RequestState::Loading { .. } | RequestState::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failure { message, .. } => Some(message),
            RequestState::Idle | RequestState::Loading { .. } | RequestState::Success { .. } => None,
        }
    }
}

impl App {
    /// Validates the form and, if it passes, sends the request on a worker thread
    pub fn submit(&mut self) -> Result<()> {
        if !self.lifecycle.is_submit_enabled() {
            return Ok(());
        }

        let credential = self.credentials.get();
        let payload = match build_payload(&self.form, credential.as_deref()) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::debug!(%error, "submission blocked by validation");
                self.focus = Focus::Form(error.field);
                self.validation_error = Some(error);
                return Ok(());
            }
        };
        self.validation_error = None;

        let Some(request_id) = self.lifecycle.begin(payload.mode()) else {
            return Ok(());
        };
        self.result_scroll = 0;
        if matches!(self.focus, Focus::Result(_)) {
            self.focus = Focus::Form(FormField::Submit);
        }
        tracing::info!(
            request_id,
            mode = %payload.mode(),
            duration_seconds = payload.duration_seconds(),
            with_api_key = payload.has_api_key(),
            "submitting script request"
        );

        let backend = Arc::clone(&self.backend);
        let event_tx = self.event_tx.clone();
        let credential_configured = payload.has_api_key();
        let spawned = thread::Builder::new()
            .name(format!("generate-{}", request_id))
            .spawn(move || {
                let outcome = backend.generate(&payload);
                let _ = event_tx.send(GenerateEvent::Finished {
                    request_id,
                    outcome,
                    credential_configured,
                });
            });
        if let Err(error) = spawned {
            self.abandon_unstarted(request_id, &error, credential_configured);
        }
        Ok(())
    }

    /// Settles a request whose worker never started so the form stays usable
    fn abandon_unstarted(
        &mut self,
        request_id: RequestId,
        error: &std::io::Error,
        credential_configured: bool,
    ) {
        tracing::error!(request_id, %error, "failed to start request worker");
        self.lifecycle.settle(
            request_id,
            Err(SubmitError::Transport(error.to_string())),
            credential_configured,
        );
        self.show_status_toast("REQUEST FAILED");
    }

    /// Drains finished requests without blocking the UI
    pub fn poll_generate_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                GenerateEvent::Finished {
                    request_id,
                    outcome,
                    credential_configured,
                } => {
                    if self
                        .lifecycle
                        .settle(request_id, outcome, credential_configured)
                    {
                        match self.lifecycle.state() {
                            RequestState::Success { .. } => self.show_status_toast("SCRIPT READY"),
                            RequestState::Failure { .. } => self.show_status_toast("REQUEST FAILED"),
                            RequestState::Idle | RequestState::Loading { .. } => {}
                        }
                    }
                }
            }
        }
    }

    /// Label for the submit control in its current state
    pub fn submit_label(&self) -> &'static str {
        match self.lifecycle.state() {
            RequestState::Loading { mode, .. } => mode.busy_label(),
            RequestState::Idle | RequestState::Success { .. } | RequestState::Failure { .. } => {
                self.form.mode().submit_label()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{app_with, wait_for_settle};
    use crate::config::Config;
    use crate::services::generate::{MISSING_CREDENTIAL_HINT, NETWORK_FAILURE_MESSAGE};

    const VALID_KEY: &str = "AIzaSyD4mPleKeyForTestingOnly0123";

    fn sample_result(title: &str) -> ResultPayload {
        ResultPayload {
            title: Some(title.to_string()),
            ..ResultPayload::default()
        }
    }

    #[test]
    fn test_begin_enters_loading_and_blocks_resubmit() {
        let mut lifecycle = RequestLifecycle::new();
        assert!(lifecycle.is_submit_enabled());

        let first = lifecycle.begin(ScriptMode::Humanize).unwrap();
        assert!(lifecycle.is_loading());
        assert!(!lifecycle.is_submit_enabled());
        assert!(lifecycle.begin(ScriptMode::Humanize).is_none());

        assert!(lifecycle.settle(first, Ok(sample_result("T")), true));
        assert_eq!(lifecycle.result().map(ResultPayload::title), Some("T"));
        assert!(lifecycle.is_submit_enabled());
    }

    #[test]
    fn test_failure_message_and_reenable() {
        let mut lifecycle = RequestLifecycle::new();
        let id = lifecycle.begin(ScriptMode::Generate).unwrap();
        let error = SubmitError::Server {
            status: 404,
            message: Some("not found".to_string()),
        };
        assert!(lifecycle.settle(id, Err(error), true));
        assert_eq!(lifecycle.error_message(), Some("not found"));
        assert!(lifecycle.is_submit_enabled());
    }

    #[test]
    fn test_new_submission_clears_previous_outcome() {
        let mut lifecycle = RequestLifecycle::new();
        let id = lifecycle.begin(ScriptMode::Generate).unwrap();
        lifecycle.settle(id, Err(SubmitError::Transport("down".to_string())), false);
        assert!(lifecycle.error_message().is_some());

        lifecycle.begin(ScriptMode::Generate).unwrap();
        assert!(lifecycle.error_message().is_none());
        assert!(lifecycle.result().is_none());
    }

    #[test]
    fn test_stale_response_is_ignored_after_reset() {
        let mut lifecycle = RequestLifecycle::new();
        let stale = lifecycle.begin(ScriptMode::Humanize).unwrap();
        lifecycle.reset();
        let fresh = lifecycle.begin(ScriptMode::Generate).unwrap();
        assert!(fresh > stale);

        assert!(lifecycle.settle(fresh, Ok(sample_result("fresh")), true));
        assert!(!lifecycle.settle(stale, Ok(sample_result("stale")), true));
        assert_eq!(lifecycle.result().map(ResultPayload::title), Some("fresh"));
    }

    #[test]
    fn test_stale_response_cannot_clobber_later_one_in_flight() {
        let mut lifecycle = RequestLifecycle::new();
        let stale = lifecycle.begin(ScriptMode::Humanize).unwrap();
        lifecycle.reset();
        let fresh = lifecycle.begin(ScriptMode::Humanize).unwrap();

        assert!(!lifecycle.settle(stale, Ok(sample_result("stale")), true));
        assert_eq!(
            lifecycle.state(),
            &RequestState::Loading {
                request_id: fresh,
                mode: ScriptMode::Humanize
            }
        );
    }

    #[test]
    fn test_worker_start_failure_leaves_form_usable() {
        let (mut app, _) = app_with(&Config::default(), Ok(ResultPayload::default()));
        let id = app.lifecycle.begin(ScriptMode::Humanize).unwrap();
        let error = std::io::Error::other("thread limit reached");
        app.abandon_unstarted(id, &error, false);

        assert!(app.lifecycle.is_submit_enabled());
        assert_eq!(
            app.lifecycle.error_message(),
            Some(format!("{} {}", NETWORK_FAILURE_MESSAGE, MISSING_CREDENTIAL_HINT).as_str())
        );
        assert_eq!(app.status_toast_message(), Some("REQUEST FAILED"));
    }

    #[test]
    fn test_server_error_hint_depends_on_stored_key() {
        let not_found = SubmitError::Server {
            status: 404,
            message: Some("not found".to_string()),
        };
        let (mut app, backend) = app_with(&Config::default(), Err(not_found));
        app.form.raw_script = "some script".to_string();

        app.submit().unwrap();
        wait_for_settle(&mut app);
        assert_eq!(
            app.lifecycle.error_message(),
            Some(format!("not found {}", MISSING_CREDENTIAL_HINT).as_str())
        );
        assert!(app.lifecycle.is_submit_enabled());

        app.credentials.save(VALID_KEY).unwrap();
        app.submit().unwrap();
        wait_for_settle(&mut app);
        assert_eq!(app.lifecycle.error_message(), Some("not found"));
        assert!(app.lifecycle.is_submit_enabled());

        let payloads = backend.payloads.lock().unwrap();
        assert_eq!(payloads.len(), 2);
        assert!(payloads[0].get("api_key").is_none());
        assert_eq!(payloads[1]["api_key"], VALID_KEY);
        assert_eq!(payloads[1]["mode"], "humanize");
        assert_eq!(payloads[1]["raw_script"], "some script");
    }

    #[test]
    fn test_settle_twice_only_applies_once() {
        let mut lifecycle = RequestLifecycle::new();
        let id = lifecycle.begin(ScriptMode::Humanize).unwrap();
        assert!(lifecycle.settle(id, Ok(sample_result("one")), true));
        assert!(!lifecycle.settle(id, Ok(sample_result("two")), true));
        assert_eq!(lifecycle.result().map(ResultPayload::title), Some("one"));
    }
}
