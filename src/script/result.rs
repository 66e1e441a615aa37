use serde::Deserialize;

/// Titles longer than this get flagged in the result view
pub const TITLE_LENGTH_LIMIT: usize = 65;

const DEFAULT_PACE_WPM: u32 = 150;
const DEFAULT_LEGAL_FRAMING: &str = "Neutral";

/// A list-shaped response field that the service sometimes sends as a plain string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TextList {
    Many(Vec<String>),
    One(String),
}

impl Default for TextList {
    fn default() -> Self {
        TextList::Many(Vec::new())
    }
}

impl TextList {
    #[must_use]
    pub fn items(&self) -> Vec<&str> {
        match self {
            TextList::Many(items) => items.iter().map(String::as_str).collect(),
            TextList::One(item) if item.is_empty() => Vec::new(),
            TextList::One(item) => vec![item.as_str()],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Joins list items with `separator`; a scalar value is returned as-is
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        match self {
            TextList::Many(items) => items.join(separator),
            TextList::One(item) => item.clone(),
        }
    }

    /// One `N. item` line per entry
    #[must_use]
    pub fn enumerated(&self) -> Vec<String> {
        self.items()
            .into_iter()
            .enumerate()
            .map(|(index, item)| format!("{}. {}", index + 1, item))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResultNotes {
    #[serde(default)]
    pub pace_wpm: Option<u32>,
    #[serde(default)]
    pub tts_tags_used: Option<bool>,
    #[serde(default)]
    pub legal_framing: Option<String>,
}

impl ResultNotes {
    #[must_use]
    pub fn display_lines(&self) -> Vec<String> {
        let tts = if self.tts_tags_used.unwrap_or(false) {
            "Used"
        } else {
            "Not used"
        };
        vec![
            format!("Pace: {} WPM", self.pace_wpm.unwrap_or(DEFAULT_PACE_WPM)),
            format!("TTS Tags: {}", tts),
            format!(
                "Legal Framing: {}",
                self.legal_framing
                    .as_deref()
                    .filter(|framing| !framing.trim().is_empty())
                    .unwrap_or(DEFAULT_LEGAL_FRAMING)
            ),
        ]
    }
}

/// Structured script returned by the generation service.
/// Every field is optional; missing values render as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResultPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub vo_script: Option<String>,
    #[serde(default)]
    pub on_screen_text: Option<TextList>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hashtags: Option<TextList>,
    #[serde(default)]
    pub youtube_tags: Option<TextList>,
    #[serde(default, deserialize_with = "lenient_notes")]
    pub notes: Option<ResultNotes>,
}

// `notes` carries service-specific extras; anything that isn't an object is ignored.
fn lenient_notes<'de, D>(deserializer: D) -> Result<Option<ResultNotes>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Fields of a result that can be viewed and copied individually
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultField {
    Title,
    Script,
    OnScreenText,
    Description,
    Hashtags,
    YoutubeTags,
}

impl ResultField {
    pub const ALL: [ResultField; 6] = [
        ResultField::Title,
        ResultField::Script,
        ResultField::OnScreenText,
        ResultField::Description,
        ResultField::Hashtags,
        ResultField::YoutubeTags,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ResultField::Title => "Title",
            ResultField::Script => "Voice Over Script",
            ResultField::OnScreenText => "On-Screen Text",
            ResultField::Description => "Description",
            ResultField::Hashtags => "Hashtags",
            ResultField::YoutubeTags => "YouTube Tags",
        }
    }
}

impl ResultPayload {
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn vo_script(&self) -> &str {
        self.vo_script.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn on_screen_text(&self) -> String {
        self.on_screen_text
            .as_ref()
            .map(|list| list.joined("\n"))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn hashtags(&self) -> String {
        self.hashtags
            .as_ref()
            .map(|list| list.joined(" "))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn youtube_tags(&self) -> String {
        self.youtube_tags
            .as_ref()
            .map(|list| list.joined(", "))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn hashtag_count(&self) -> usize {
        match &self.hashtags {
            Some(TextList::One(tags)) => tags.split_whitespace().count(),
            Some(list @ TextList::Many(_)) => list.len(),
            None => 0,
        }
    }

    /// Title length in characters, matching what a reader counts
    #[must_use]
    pub fn title_length(&self) -> usize {
        self.title().chars().count()
    }

    #[must_use]
    pub fn title_too_long(&self) -> bool {
        self.title_length() > TITLE_LENGTH_LIMIT
    }

    /// Fields worth showing for this result
    #[must_use]
    pub fn available_fields(&self) -> Vec<ResultField> {
        ResultField::ALL
            .into_iter()
            .filter(|field| match field {
                ResultField::OnScreenText => {
                    self.on_screen_text.as_ref().is_some_and(|list| !list.is_empty())
                }
                ResultField::Hashtags => self.hashtags.as_ref().is_some_and(|list| !list.is_empty()),
                ResultField::YoutubeTags => {
                    self.youtube_tags.as_ref().is_some_and(|list| !list.is_empty())
                }
                ResultField::Title | ResultField::Script | ResultField::Description => true,
            })
            .collect()
    }

    /// Text placed on the clipboard when a single field is copied
    #[must_use]
    pub fn copy_text(&self, field: ResultField) -> String {
        match field {
            ResultField::Title => self.title().to_string(),
            ResultField::Script => self.vo_script().to_string(),
            ResultField::OnScreenText => self.on_screen_text(),
            ResultField::Description => self.description().to_string(),
            ResultField::Hashtags => self.hashtags(),
            ResultField::YoutubeTags => self.youtube_tags(),
        }
    }

    /// Lines shown in the result panel for a field
    #[must_use]
    pub fn display_lines(&self, field: ResultField) -> Vec<String> {
        match field {
            ResultField::OnScreenText => self
                .on_screen_text
                .as_ref()
                .map(TextList::enumerated)
                .unwrap_or_default(),
            ResultField::Title
            | ResultField::Script
            | ResultField::Description
            | ResultField::Hashtags
            | ResultField::YoutubeTags => self
                .copy_text(field)
                .lines()
                .map(str::to_string)
                .collect(),
        }
    }

    #[must_use]
    pub fn notes_lines(&self) -> Vec<String> {
        self.notes
            .as_ref()
            .map(ResultNotes::display_lines)
            .unwrap_or_default()
    }

    /// Every field concatenated into one labeled block
    #[must_use]
    pub fn aggregate_text(&self) -> String {
        let mut text = format!(
            "TITLE:\n{}\n\nVOICE OVER SCRIPT:\n{}\n\nON-SCREEN TEXT:\n{}\n\nDESCRIPTION:\n{}\n\nHASHTAGS:\n{}",
            self.title(),
            self.vo_script(),
            self.on_screen_text(),
            self.description(),
            self.hashtags(),
        );
        let tags = self.youtube_tags();
        if !tags.is_empty() {
            text.push_str(&format!("\n\nYOUTUBE TAGS:\n{}", tags));
        }
        text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ResultPayload {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_aggregate_contains_labeled_sections() {
        let result = parse(r##"{"title":"T","vo_script":"S","hashtags":["#a","#b"]}"##);
        let text = result.aggregate_text();
        assert!(text.contains("TITLE:\nT"));
        assert!(text.contains("HASHTAGS:\n#a #b"));
        assert!(text.contains("VOICE OVER SCRIPT:\nS"));
        assert!(!text.contains("YOUTUBE TAGS"));
        assert!(text.starts_with("TITLE:"));
    }

    #[test]
    fn test_list_fields_accept_scalar_strings() {
        let result = parse(
            r##"{"on_screen_text":"one line","hashtags":"#x #y","youtube_tags":["a","b"]}"##,
        );
        assert_eq!(result.on_screen_text(), "one line");
        assert_eq!(result.hashtags(), "#x #y");
        assert_eq!(result.youtube_tags(), "a, b");
        assert_eq!(result.hashtag_count(), 2);

        let single = parse(r##"{"hashtags":"  #solo  "}"##);
        assert_eq!(single.hashtag_count(), 1);
        assert_eq!(parse(r#"{"hashtags":""}"#).hashtag_count(), 0);
    }

    #[test]
    fn test_on_screen_text_display_forms() {
        let result = parse(r#"{"on_screen_text":["first","second"]}"#);
        assert_eq!(result.copy_text(ResultField::OnScreenText), "first\nsecond");
        assert_eq!(
            result.display_lines(ResultField::OnScreenText),
            vec!["1. first".to_string(), "2. second".to_string()]
        );
    }

    #[test]
    fn test_empty_body_renders_defaults() {
        let result = parse("{}");
        assert_eq!(result.title(), "");
        assert_eq!(result.title_length(), 0);
        assert!(result.notes_lines().is_empty());
        assert_eq!(
            result.available_fields(),
            vec![ResultField::Title, ResultField::Script, ResultField::Description]
        );
    }

    #[test]
    fn test_title_length_flag() {
        let short = ResultPayload {
            title: Some("a".repeat(TITLE_LENGTH_LIMIT)),
            ..ResultPayload::default()
        };
        assert!(!short.title_too_long());

        let long = ResultPayload {
            title: Some("क".repeat(TITLE_LENGTH_LIMIT + 1)),
            ..ResultPayload::default()
        };
        assert_eq!(long.title_length(), 66);
        assert!(long.title_too_long());
    }

    #[test]
    fn test_notes_defaults_and_unknown_keys() {
        let result = parse(r#"{"notes":{"humanized":true,"tts_tags_used":true}}"#);
        assert_eq!(
            result.notes_lines(),
            vec![
                "Pace: 150 WPM".to_string(),
                "TTS Tags: Used".to_string(),
                "Legal Framing: Neutral".to_string(),
            ]
        );

        let result = parse(r#"{"notes":"free text"}"#);
        assert!(result.notes.is_none());
    }
}
