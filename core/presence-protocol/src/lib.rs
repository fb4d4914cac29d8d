//! Payload types and validation for the editor presence service.
//!
//! This crate is shared by the synthesizer and whatever transport delivers the
//! payload, so both sides agree on one JSON shape. The presence service is the
//! authority on what it accepts; `validate` mirrors its documented limits so a
//! bad payload is caught before it leaves the process.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Two zero-width spaces. Some presence clients collapse text fields shorter
/// than two characters, so short text is padded with this instead of spaces.
pub const FILLER: &str = "\u{200b}\u{200b}";

/// Character used to pad short text up to `MIN_TEXT_CHARS`.
pub const FILLER_CHAR: char = '\u{200b}';

pub const MIN_TEXT_CHARS: usize = 2;
pub const MAX_TEXT_CHARS: usize = 128;
pub const MAX_BUTTON_LABEL_CHARS: usize = 32;
pub const MAX_BUTTON_URL_CHARS: usize = 512;
pub const MAX_BUTTONS: usize = 2;

/// Activity type tag, serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ActivityType {
    #[default]
    Playing,
    Streaming,
    Listening,
    Watching,
    Competing,
}

impl From<ActivityType> for u8 {
    fn from(value: ActivityType) -> Self {
        match value {
            ActivityType::Playing => 0,
            ActivityType::Streaming => 1,
            ActivityType::Listening => 2,
            ActivityType::Watching => 3,
            ActivityType::Competing => 5,
        }
    }
}

impl TryFrom<u8> for ActivityType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Playing),
            1 => Ok(Self::Streaming),
            2 => Ok(Self::Listening),
            3 => Ok(Self::Watching),
            5 => Ok(Self::Competing),
            other => Err(format!("unknown activity type {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceButton {
    pub label: String,
    pub url: String,
}

/// The status record handed to the transport on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresencePayload {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<i64>,
    pub large_image_key: String,
    pub large_image_text: String,
    pub small_image_key: String,
    pub small_image_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<PresenceButton>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorInfo {}

impl PresencePayload {
    pub fn validate(&self) -> Result<(), ErrorInfo> {
        if let Some(details) = &self.details {
            require_text(details, "details")?;
        }
        if let Some(state) = &self.state {
            require_text(state, "state")?;
        }
        if let Some(start) = self.start_timestamp {
            if start < 0 {
                return Err(ErrorInfo::new(
                    "invalid_timestamp",
                    "startTimestamp must not be negative",
                ));
            }
        }

        require_key(&self.large_image_key, "largeImageKey")?;
        require_text(&self.large_image_text, "largeImageText")?;
        require_key(&self.small_image_key, "smallImageKey")?;
        require_text(&self.small_image_text, "smallImageText")?;

        if self.buttons.len() > MAX_BUTTONS {
            return Err(ErrorInfo::new(
                "too_many_buttons",
                format!("at most {} buttons are allowed", MAX_BUTTONS),
            ));
        }
        for button in &self.buttons {
            require_bounded(&button.label, "buttons.label", 1, MAX_BUTTON_LABEL_CHARS)?;
            require_bounded(&button.url, "buttons.url", 1, MAX_BUTTON_URL_CHARS)?;
        }

        Ok(())
    }

    /// Returns a copy that passes `validate`: long text is cut on a character
    /// boundary, short text is padded with the filler, and unusable buttons are
    /// dropped.
    pub fn sanitized(&self) -> Self {
        let buttons = self
            .buttons
            .iter()
            .filter(|b| !b.label.trim().is_empty() && !b.url.is_empty())
            .filter(|b| b.url.chars().count() <= MAX_BUTTON_URL_CHARS)
            .take(MAX_BUTTONS)
            .map(|b| PresenceButton {
                label: truncate_chars(&b.label, MAX_BUTTON_LABEL_CHARS),
                url: b.url.clone(),
            })
            .collect();

        Self {
            activity_type: self.activity_type,
            details: self.details.as_deref().map(fit_text),
            state: self.state.as_deref().map(fit_text),
            start_timestamp: self.start_timestamp.filter(|t| *t >= 0),
            large_image_key: truncate_chars(&self.large_image_key, MAX_TEXT_CHARS),
            large_image_text: fit_text(&self.large_image_text),
            small_image_key: truncate_chars(&self.small_image_key, MAX_TEXT_CHARS),
            small_image_text: fit_text(&self.small_image_text),
            buttons,
        }
    }
}

pub fn parse_payload(value: Value) -> Result<PresencePayload, ErrorInfo> {
    let payload: PresencePayload = serde_json::from_value(value).map_err(|err| {
        ErrorInfo::new(
            "invalid_payload",
            format!("payload is invalid JSON: {}", err),
        )
    })?;
    payload.validate()?;
    Ok(payload)
}

/// Pads `text` on the right with zero-width spaces until it is at least
/// `min_chars` characters long.
pub fn pad_to_min_width(text: &str, min_chars: usize) -> String {
    let mut padded = text.to_string();
    let mut count = padded.chars().count();
    while count < min_chars {
        padded.push(FILLER_CHAR);
        count += 1;
    }
    padded
}

fn fit_text(text: &str) -> String {
    pad_to_min_width(&truncate_chars(text, MAX_TEXT_CHARS), MIN_TEXT_CHARS)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn require_text(value: &str, field: &str) -> Result<(), ErrorInfo> {
    require_bounded(value, field, MIN_TEXT_CHARS, MAX_TEXT_CHARS)
}

fn require_key(value: &str, field: &str) -> Result<(), ErrorInfo> {
    require_bounded(value, field, 1, MAX_TEXT_CHARS)
}

fn require_bounded(value: &str, field: &str, min: usize, max: usize) -> Result<(), ErrorInfo> {
    let count = value.chars().count();
    if count < min {
        return Err(ErrorInfo::new(
            "field_too_short",
            format!("{} must be at least {} characters", field, min),
        ));
    }
    if count > max {
        return Err(ErrorInfo::new(
            "field_too_long",
            format!("{} must be {} characters or fewer", field, max),
        ));
    }
    Ok(())
}
