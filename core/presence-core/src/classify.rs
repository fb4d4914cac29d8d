//! Idle / editing / debugging classification and detail-line selection.
//!
//! ```text
//! document?  debugging?  →  class
//! no         any            Idle
//! yes        yes            Debugging
//! yes        no             Editing
//! ```
//!
//! The class picks one template per detail slot; the slot text is that
//! template rendered through the caller's `TokenSource`.

use crate::config::PresenceConfig;
use crate::template::{render_template, TokenSource};
use crate::types::PresenceSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityClass {
    Idle,
    Editing,
    Debugging,
}

impl ActivityClass {
    pub fn classify(has_document: bool, debugging: bool) -> Self {
        match (has_document, debugging) {
            (false, _) => Self::Idle,
            (true, true) => Self::Debugging,
            (true, false) => Self::Editing,
        }
    }

    pub fn of(snapshot: &PresenceSnapshot) -> Self {
        Self::classify(snapshot.editor.document.is_some(), snapshot.debugging)
    }
}

impl std::fmt::Display for ActivityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityClass::Idle => write!(f, "idle"),
            ActivityClass::Editing => write!(f, "editing"),
            ActivityClass::Debugging => write!(f, "debugging"),
        }
    }
}

/// Text lines of the payload that follow the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailSlot {
    /// Top line (`details`).
    Details,
    /// Secondary line (`state`).
    State,
}

impl DetailSlot {
    /// Whether the user has removed this slot from the payload.
    pub fn is_suppressed(self, config: &PresenceConfig) -> bool {
        match self {
            DetailSlot::Details => config.remove_details,
            DetailSlot::State => config.remove_lower_details,
        }
    }
}

pub fn detail_template(config: &PresenceConfig, slot: DetailSlot, class: ActivityClass) -> &str {
    match (slot, class) {
        (DetailSlot::Details, ActivityClass::Idle) => &config.details_idling,
        (DetailSlot::Details, ActivityClass::Editing) => &config.details_editing,
        (DetailSlot::Details, ActivityClass::Debugging) => &config.details_debugging,
        (DetailSlot::State, ActivityClass::Idle) => &config.lower_details_idling,
        (DetailSlot::State, ActivityClass::Editing) => &config.lower_details_editing,
        (DetailSlot::State, ActivityClass::Debugging) => &config.lower_details_debugging,
    }
}

/// Renders the slot's text, or `None` when the slot is suppressed.
pub fn resolve_detail(
    config: &PresenceConfig,
    slot: DetailSlot,
    class: ActivityClass,
    source: &mut dyn TokenSource,
) -> Option<String> {
    if slot.is_suppressed(config) {
        return None;
    }
    Some(render_template(detail_template(config, slot, class), source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ReplacementToken;

    struct NoTokens;

    impl TokenSource for NoTokens {
        fn resolve(&mut self, _token: ReplacementToken) -> Option<String> {
            None
        }
    }

    #[test]
    fn no_document_is_idle_regardless_of_debugging() {
        assert_eq!(ActivityClass::classify(false, false), ActivityClass::Idle);
        assert_eq!(ActivityClass::classify(false, true), ActivityClass::Idle);
    }

    #[test]
    fn document_while_debugging_is_debugging() {
        assert_eq!(ActivityClass::classify(true, true), ActivityClass::Debugging);
        assert_ne!(ActivityClass::classify(true, true), ActivityClass::Editing);
    }

    #[test]
    fn document_without_debugging_is_editing() {
        assert_eq!(ActivityClass::classify(true, false), ActivityClass::Editing);
    }

    #[test]
    fn each_slot_and_class_selects_its_own_template() {
        let config = PresenceConfig {
            details_idling: "d-idle".to_string(),
            details_editing: "d-edit".to_string(),
            details_debugging: "d-debug".to_string(),
            lower_details_idling: "s-idle".to_string(),
            lower_details_editing: "s-edit".to_string(),
            lower_details_debugging: "s-debug".to_string(),
            ..PresenceConfig::default()
        };

        let cases = [
            (DetailSlot::Details, ActivityClass::Idle, "d-idle"),
            (DetailSlot::Details, ActivityClass::Editing, "d-edit"),
            (DetailSlot::Details, ActivityClass::Debugging, "d-debug"),
            (DetailSlot::State, ActivityClass::Idle, "s-idle"),
            (DetailSlot::State, ActivityClass::Editing, "s-edit"),
            (DetailSlot::State, ActivityClass::Debugging, "s-debug"),
        ];
        for (slot, class, expected) in cases {
            assert_eq!(detail_template(&config, slot, class), expected);
        }
    }

    #[test]
    fn suppressed_slot_is_omitted() {
        let config = PresenceConfig {
            remove_details: true,
            ..PresenceConfig::default()
        };

        assert_eq!(
            resolve_detail(&config, DetailSlot::Details, ActivityClass::Editing, &mut NoTokens),
            None
        );
        assert_eq!(
            resolve_detail(&config, DetailSlot::State, ActivityClass::Idle, &mut NoTokens),
            Some("Idling".to_string())
        );
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(ActivityClass::Debugging.to_string(), "debugging");
    }
}
