use serde::Serialize;
use thiserror::Error;

use super::form::{FormField, FormState, Genre, ScriptMode};

/// Local validation failure; the request is never sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {reason}", .field.label())]
pub struct ValidationError {
    pub field: FormField,
    pub reason: String,
}

impl ValidationError {
    fn new(field: FormField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Body POSTed to the generation endpoint, tagged by `mode`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RequestPayload {
    Humanize {
        raw_script: String,
        duration_seconds: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
    },
    Generate {
        topic: String,
        genre: Genre,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        duration_seconds: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        keywords: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
    },
}

impl RequestPayload {
    #[must_use]
    pub fn mode(&self) -> ScriptMode {
        match self {
            RequestPayload::Humanize { .. } => ScriptMode::Humanize,
            RequestPayload::Generate { .. } => ScriptMode::Generate,
        }
    }

    #[must_use]
    pub fn duration_seconds(&self) -> u32 {
        match self {
            RequestPayload::Humanize {
                duration_seconds, ..
            }
            | RequestPayload::Generate {
                duration_seconds, ..
            } => *duration_seconds,
        }
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        match self {
            RequestPayload::Humanize { api_key, .. } | RequestPayload::Generate { api_key, .. } => {
                api_key.is_some()
            }
        }
    }
}

/// Maps the form into the payload for its active mode.
///
/// `credential` is the stored API key, if any. Blank keys are treated as absent
/// so `api_key` is never sent as an empty string.
pub fn build_payload(
    form: &FormState,
    credential: Option<&str>,
) -> Result<RequestPayload, ValidationError> {
    let duration_seconds = match form.duration_text() {
        Some(raw) => super::form::Duration::parse(raw)
            .ok_or_else(|| {
                ValidationError::new(FormField::Duration, format!("'{}' is not an allowed duration", raw))
            })?
            .seconds(),
        None => form.duration.seconds(),
    };

    let api_key = credential
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string);

    match form.mode() {
        ScriptMode::Humanize => {
            if form.raw_script.trim().is_empty() {
                return Err(ValidationError::new(
                    FormField::RawScript,
                    "a script is required for humanize mode",
                ));
            }
            Ok(RequestPayload::Humanize {
                raw_script: form.raw_script.clone(),
                duration_seconds,
                api_key,
            })
        }
        ScriptMode::Generate => {
            let topic = form.topic.trim();
            if topic.is_empty() {
                return Err(ValidationError::new(
                    FormField::Topic,
                    "a topic is required for generate mode",
                ));
            }
            let description = Some(form.description.trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string);
            let keywords = Some(split_keywords(&form.keywords)).filter(|list| !list.is_empty());

            Ok(RequestPayload::Generate {
                topic: topic.to_string(),
                genre: form.genre,
                description,
                duration_seconds,
                keywords,
                api_key,
            })
        }
    }
}

/// Splits on commas, trims, and drops empty entries
#[must_use]
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}
