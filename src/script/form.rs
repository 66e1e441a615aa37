use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of request the form is describing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptMode {
    /// Rewrite an existing script into natural narration
    #[default]
    Humanize,
    /// Write a new script from a topic and genre
    Generate,
}

impl ScriptMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScriptMode::Humanize => "humanize",
            ScriptMode::Generate => "generate",
        }
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            ScriptMode::Humanize => ScriptMode::Generate,
            ScriptMode::Generate => ScriptMode::Humanize,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ScriptMode::Humanize => "Humanize",
            ScriptMode::Generate => "Generate",
        }
    }

    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            ScriptMode::Humanize => "Transform an existing script into engaging, human-like narration",
            ScriptMode::Generate => "Create a new script from topic and genre with storytelling",
        }
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            ScriptMode::Humanize => "Humanize Script",
            ScriptMode::Generate => "Generate Script",
        }
    }

    #[must_use]
    pub fn busy_label(self) -> &'static str {
        match self {
            ScriptMode::Humanize => "Humanizing Script...",
            ScriptMode::Generate => "Generating Script...",
        }
    }
}

impl fmt::Display for ScriptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storytelling genre accepted by the generation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Mysterious,
    Thriller,
    Investigative,
    Motivational,
    Inspirational,
    Dramatic,
    Educational,
    Informative,
}

impl Genre {
    pub const ALL: [Genre; 8] = [
        Genre::Mysterious,
        Genre::Thriller,
        Genre::Investigative,
        Genre::Motivational,
        Genre::Inspirational,
        Genre::Dramatic,
        Genre::Educational,
        Genre::Informative,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Mysterious => "mysterious",
            Genre::Thriller => "thriller",
            Genre::Investigative => "investigative",
            Genre::Motivational => "motivational",
            Genre::Inspirational => "inspirational",
            Genre::Dramatic => "dramatic",
            Genre::Educational => "educational",
            Genre::Informative => "informative",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Genre::Mysterious => "Mysterious",
            Genre::Thriller => "Thriller",
            Genre::Investigative => "Investigative",
            Genre::Motivational => "Motivational",
            Genre::Inspirational => "Inspirational",
            Genre::Dramatic => "Dramatic",
            Genre::Educational => "Educational",
            Genre::Informative => "Informative",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    #[must_use]
    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// Target narration length. Only these values are ever sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Duration {
    Seconds30,
    #[default]
    Seconds45,
    Seconds60,
    Seconds120,
    Seconds180,
    Seconds300,
    Seconds600,
}

impl Duration {
    pub const ALL: [Duration; 7] = [
        Duration::Seconds30,
        Duration::Seconds45,
        Duration::Seconds60,
        Duration::Seconds120,
        Duration::Seconds180,
        Duration::Seconds300,
        Duration::Seconds600,
    ];

    #[must_use]
    pub fn seconds(self) -> u32 {
        match self {
            Duration::Seconds30 => 30,
            Duration::Seconds45 => 45,
            Duration::Seconds60 => 60,
            Duration::Seconds120 => 120,
            Duration::Seconds180 => 180,
            Duration::Seconds300 => 300,
            Duration::Seconds600 => 600,
        }
    }

    #[must_use]
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|duration| duration.seconds() == seconds)
    }

    /// Parses the raw select value; anything outside the allowed set is rejected
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        value
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::from_seconds)
    }

    #[must_use]
    pub fn format_group(self) -> &'static str {
        match self {
            Duration::Seconds30 | Duration::Seconds45 | Duration::Seconds60 => "Short Format",
            Duration::Seconds120 | Duration::Seconds180 => "Medium Format",
            Duration::Seconds300 | Duration::Seconds600 => "Long Format",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Duration::Seconds30 => "30 seconds (Quick Hook)",
            Duration::Seconds45 => "45 seconds (Standard Short)",
            Duration::Seconds60 => "60 seconds (Detailed Short)",
            Duration::Seconds120 => "2 minutes (Brief Story)",
            Duration::Seconds180 => "3 minutes (Standard Story)",
            Duration::Seconds300 => "5 minutes (Full Story)",
            Duration::Seconds600 => "10 minutes (Detailed Analysis)",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    #[must_use]
    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl TryFrom<u32> for Duration {
    type Error = String;

    fn try_from(seconds: u32) -> Result<Self, Self::Error> {
        Self::from_seconds(seconds).ok_or_else(|| format!("unsupported duration: {}s", seconds))
    }
}

impl From<Duration> for u32 {
    fn from(duration: Duration) -> Self {
        duration.seconds()
    }
}

fn cycle<T: Copy + PartialEq>(values: &[T], current: T, step: usize) -> T {
    let position = values.iter().position(|value| *value == current).unwrap_or(0);
    values
        .get((position + step) % values.len().max(1))
        .copied()
        .unwrap_or(current)
}

/// Every input on the form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Mode,
    RawScript,
    Topic,
    Genre,
    Description,
    Keywords,
    Duration,
    Submit,
}

impl FormField {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FormField::Mode => "Script Mode",
            FormField::RawScript => "Existing Script to Humanize",
            FormField::Topic => "Topic",
            FormField::Genre => "Genre",
            FormField::Description => "Additional Description (Optional)",
            FormField::Keywords => "Keywords (comma separated, optional)",
            FormField::Duration => "Target Duration",
            FormField::Submit => "Submit",
        }
    }

    #[must_use]
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            FormField::RawScript => Some("Paste your existing script here..."),
            FormField::Topic => Some("e.g., Mysterious disappearance of Flight MH370"),
            FormField::Description => {
                Some("Add any specific details, context, or requirements for your script...")
            }
            FormField::Keywords => Some("e.g., aviation, mystery, ocean"),
            FormField::Mode | FormField::Genre | FormField::Duration | FormField::Submit => None,
        }
    }

    #[must_use]
    pub fn is_multiline(self) -> bool {
        matches!(self, FormField::RawScript | FormField::Description)
    }

    /// Select fields are cycled rather than typed into
    #[must_use]
    pub fn is_select(self) -> bool {
        matches!(self, FormField::Mode | FormField::Genre | FormField::Duration)
    }

    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormField::RawScript | FormField::Topic | FormField::Description | FormField::Keywords
        )
    }
}

/// Raw contents of every form input plus the active mode.
///
/// Fields of the inactive mode keep their text so switching back does not lose
/// work, but they are never required and never reach the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    mode: ScriptMode,
    pub raw_script: String,
    pub topic: String,
    pub genre: Genre,
    pub description: String,
    pub keywords: String,
    pub duration: Duration,
    duration_text: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(ScriptMode::default())
    }
}

impl FormState {
    #[must_use]
    pub fn new(mode: ScriptMode) -> Self {
        Self {
            mode,
            raw_script: String::new(),
            topic: String::new(),
            genre: Genre::default(),
            description: String::new(),
            keywords: String::new(),
            duration: Duration::default(),
            duration_text: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ScriptMode {
        self.mode
    }

    /// Returns true when the mode actually changed
    pub fn set_mode(&mut self, mode: ScriptMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn toggle_mode(&mut self) -> ScriptMode {
        self.mode = self.mode.other();
        self.mode
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
        self.duration_text = None;
    }

    /// Stores an unparsed duration value; it is validated when the payload is built
    pub fn set_duration_text(&mut self, value: impl Into<String>) {
        let value = value.into();
        if let Some(duration) = Duration::parse(&value) {
            self.duration = duration;
        }
        self.duration_text = Some(value);
    }

    pub(crate) fn duration_text(&self) -> Option<&str> {
        self.duration_text.as_deref()
    }

    #[must_use]
    pub fn visible_fields(&self) -> Vec<FormField> {
        match self.mode {
            ScriptMode::Humanize => vec![
                FormField::Mode,
                FormField::RawScript,
                FormField::Duration,
                FormField::Submit,
            ],
            ScriptMode::Generate => vec![
                FormField::Mode,
                FormField::Topic,
                FormField::Genre,
                FormField::Description,
                FormField::Keywords,
                FormField::Duration,
                FormField::Submit,
            ],
        }
    }

    #[must_use]
    pub fn is_visible(&self, field: FormField) -> bool {
        self.visible_fields().contains(&field)
    }

    #[must_use]
    pub fn is_required(&self, field: FormField) -> bool {
        match field {
            FormField::RawScript => self.mode == ScriptMode::Humanize,
            FormField::Topic | FormField::Genre => self.mode == ScriptMode::Generate,
            FormField::Duration => true,
            FormField::Mode | FormField::Description | FormField::Keywords | FormField::Submit => {
                false
            }
        }
    }

    #[must_use]
    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::RawScript => Some(&self.raw_script),
            FormField::Topic => Some(&self.topic),
            FormField::Description => Some(&self.description),
            FormField::Keywords => Some(&self.keywords),
            FormField::Mode | FormField::Genre | FormField::Duration | FormField::Submit => None,
        }
    }

    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::RawScript => Some(&mut self.raw_script),
            FormField::Topic => Some(&mut self.topic),
            FormField::Description => Some(&mut self.description),
            FormField::Keywords => Some(&mut self.keywords),
            FormField::Mode | FormField::Genre | FormField::Duration | FormField::Submit => None,
        }
    }

    /// Steps a select field forwards or backwards. Returns false for non-select fields.
    pub fn cycle_select(&mut self, field: FormField, forward: bool) -> bool {
        match field {
            FormField::Mode => {
                self.toggle_mode();
                true
            }
            FormField::Genre => {
                self.genre = if forward {
                    self.genre.next()
                } else {
                    self.genre.previous()
                };
                true
            }
            FormField::Duration => {
                let next = if forward {
                    self.duration.next()
                } else {
                    self.duration.previous()
                };
                self.set_duration(next);
                true
            }
            FormField::RawScript
            | FormField::Topic
            | FormField::Description
            | FormField::Keywords
            | FormField::Submit => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_only_accepts_allowed_values() {
        assert_eq!(Duration::parse("45"), Some(Duration::Seconds45));
        assert_eq!(Duration::parse(" 600 "), Some(Duration::Seconds600));
        assert_eq!(Duration::parse("50"), None);
        assert_eq!(Duration::parse("short"), None);
        assert_eq!(Duration::parse(""), None);
    }

    #[test]
    fn test_duration_cycle_wraps() {
        assert_eq!(Duration::Seconds600.next(), Duration::Seconds30);
        assert_eq!(Duration::Seconds30.previous(), Duration::Seconds600);
        assert_eq!(Duration::Seconds45.format_group(), "Short Format");
        assert_eq!(Duration::Seconds180.format_group(), "Medium Format");
    }

    #[test]
    fn test_genre_has_eight_values_and_cycles() {
        assert_eq!(Genre::ALL.len(), 8);
        assert_eq!(Genre::Mysterious.previous(), Genre::Informative);
        assert_eq!(Genre::Informative.next(), Genre::Mysterious);
    }

    #[test]
    fn test_visible_and_required_fields_follow_mode() {
        let mut form = FormState::new(ScriptMode::Humanize);
        assert!(form.is_visible(FormField::RawScript));
        assert!(!form.is_visible(FormField::Topic));
        assert!(form.is_required(FormField::RawScript));
        assert!(!form.is_required(FormField::Topic));

        assert!(form.set_mode(ScriptMode::Generate));
        assert!(!form.is_visible(FormField::RawScript));
        assert!(form.is_visible(FormField::Keywords));
        assert!(!form.is_required(FormField::RawScript));
        assert!(form.is_required(FormField::Topic));
        assert!(form.is_required(FormField::Genre));
        assert!(!form.is_required(FormField::Description));
    }

    #[test]
    fn test_set_mode_is_idempotent() {
        let mut form = FormState::new(ScriptMode::Generate);
        form.topic = "Flight MH370".to_string();
        let before = form.clone();
        assert!(!form.set_mode(ScriptMode::Generate));
        assert_eq!(form, before);
    }

    #[test]
    fn test_inactive_mode_text_survives_toggle() {
        let mut form = FormState::new(ScriptMode::Humanize);
        form.raw_script = "draft".to_string();
        form.toggle_mode();
        form.toggle_mode();
        assert_eq!(form.raw_script, "draft");
    }

    #[test]
    fn test_cycle_select_only_for_select_fields() {
        let mut form = FormState::default();
        assert!(form.cycle_select(FormField::Genre, true));
        assert_eq!(form.genre, Genre::Thriller);
        assert!(form.cycle_select(FormField::Duration, false));
        assert_eq!(form.duration, Duration::Seconds30);
        assert!(!form.cycle_select(FormField::Topic, true));
    }
}
