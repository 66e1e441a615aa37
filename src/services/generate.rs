use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::{EndpointVariant, ServerConfig};
use crate::script::{RequestPayload, ResultPayload, ValidationError};

pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while generating the script.";
pub const NETWORK_FAILURE_MESSAGE: &str = "Network error. Please check your connection and try again.";
pub const PARSE_FAILURE_MESSAGE: &str = "Received an unreadable response from the server.";
pub const MISSING_CREDENTIAL_HINT: &str = "Add your Gemini API key (Ctrl+K) for priority access.";

/// Why a submission did not produce a script
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server returned {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },
    #[error("unreadable response: {0}")]
    Parse(String),
}

impl SubmitError {
    /// Text shown in the form's error state
    #[must_use]
    pub fn user_message(&self, credential_configured: bool) -> String {
        let base = match self {
            SubmitError::Validation(error) => error.to_string(),
            SubmitError::Transport(_) => NETWORK_FAILURE_MESSAGE.to_string(),
            SubmitError::Server { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .unwrap_or(GENERIC_FAILURE_MESSAGE)
                .to_string(),
            SubmitError::Parse(_) => PARSE_FAILURE_MESSAGE.to_string(),
        };
        if credential_configured || matches!(self, SubmitError::Validation(_)) {
            base
        } else {
            format!("{} {}", base, MISSING_CREDENTIAL_HINT)
        }
    }
}

/// Anything that can turn a payload into a generated script
pub trait ScriptBackend: Send + Sync {
    fn generate(&self, payload: &RequestPayload) -> Result<ResultPayload, SubmitError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Classifies an HTTP response. Success needs a 2xx status and a JSON object body.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<ResultPayload, SubmitError> {
    if status.is_success() {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|error| SubmitError::Parse(error.to_string()))?;
        if !value.is_object() {
            return Err(SubmitError::Parse("response body is not a JSON object".to_string()));
        }
        return serde_json::from_value(value).map_err(|error| SubmitError::Parse(error.to_string()));
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error);
    Err(SubmitError::Server {
        status: status.as_u16(),
        message,
    })
}

/// Blocking HTTP client for the generation endpoint
pub struct HttpBackend {
    client: Client,
    url: String,
}

impl HttpBackend {
    pub fn new(config: &ServerConfig) -> color_eyre::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: endpoint_url(&config.base_url, config.endpoint),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[must_use]
pub fn endpoint_url(base_url: &str, endpoint: EndpointVariant) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), endpoint.path())
}

impl ScriptBackend for HttpBackend {
    fn generate(&self, payload: &RequestPayload) -> Result<ResultPayload, SubmitError> {
        tracing::debug!(url = %self.url, mode = %payload.mode(), "posting generation request");
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .map_err(|error| SubmitError::Transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|error| SubmitError::Transport(error.to_string()))?;
        interpret_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::FormField;

    #[test]
    fn test_success_body_parses_into_result() {
        let result = interpret_response(
            StatusCode::OK,
            r##"{"title":"T","vo_script":"S","hashtags":["#a","#b"]}"##,
        )
        .unwrap();
        assert_eq!(result.title(), "T");
        assert_eq!(result.hashtags(), "#a #b");
    }

    #[test]
    fn test_server_error_carries_body_message() {
        let error = interpret_response(StatusCode::NOT_FOUND, r#"{"error":"not found"}"#).unwrap_err();
        assert_eq!(
            error,
            SubmitError::Server {
                status: 404,
                message: Some("not found".to_string())
            }
        );
        assert_eq!(error.user_message(true), "not found");
        assert!(error.user_message(false).starts_with("not found"));
        assert!(error.user_message(false).contains("Ctrl+K"));
    }

    #[test]
    fn test_server_error_without_json_uses_fallback() {
        let error =
            interpret_response(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").unwrap_err();
        assert_eq!(error.user_message(true), GENERIC_FAILURE_MESSAGE);

        let error = interpret_response(StatusCode::BAD_GATEWAY, r#"{"error":"  "}"#).unwrap_err();
        assert_eq!(error.user_message(true), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_invalid_success_body_is_parse_error() {
        let error = interpret_response(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(error, SubmitError::Parse(_)));
        assert_eq!(error.user_message(true), PARSE_FAILURE_MESSAGE);

        let error = interpret_response(StatusCode::OK, "[1,2]").unwrap_err();
        assert!(matches!(error, SubmitError::Parse(_)));
    }

    #[test]
    fn test_transport_message_suggests_retry() {
        let error = SubmitError::Transport("connection refused".to_string());
        assert_eq!(error.user_message(true), NETWORK_FAILURE_MESSAGE);
    }

    #[test]
    fn test_validation_message_has_no_credential_hint() {
        let error = SubmitError::Validation(ValidationError {
            field: FormField::Topic,
            reason: "a topic is required for generate mode".to_string(),
        });
        assert!(!error.user_message(false).contains("Ctrl+K"));
    }

    #[test]
    fn test_endpoint_url_joins_variants() {
        assert_eq!(
            endpoint_url("http://localhost:5000/", EndpointVariant::Generate),
            "http://localhost:5000/generate"
        );
        assert_eq!(
            endpoint_url("https://example.com", EndpointVariant::ApiGenerate),
            "https://example.com/api/generate"
        );
    }
}
