use crate::app::lifecycle::RequestId;
use crate::script::{FormField, ResultPayload, ResultField};
use crate::services::SubmitError;

/// Which input or result section currently has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form(FormField),
    Result(ResultField),
}

/// Events from request worker threads
#[derive(Debug)]
pub enum GenerateEvent {
    Finished {
        request_id: RequestId,
        outcome: Result<ResultPayload, SubmitError>,
        credential_configured: bool,
    },
}

#[derive(Debug, Clone)]
pub struct StatusToast {
    pub message: String,
    pub created_at: std::time::Instant,
}

impl StatusToast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self, duration: std::time::Duration) -> bool {
        self.created_at.elapsed() >= duration
    }
}
