//! The start-timestamp anchor carried across refreshes.
//!
//! The anchor is the only value that survives from one payload to the next.
//! In-process hosts pass the previous payload's `start_timestamp` back in;
//! one-shot hosts (the hook CLI) persist it with `AnchorStore`.
//!
//! - **Graceful degradation**: missing/corrupt/future-version files → no anchor
//! - **Atomic writes**: temp file + rename

use crate::error::{PresenceError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ANCHOR_STORE_VERSION: u32 = 1;

/// Source of "now" in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Next payload's start timestamp: the previous one when present, else now.
/// Disabled timestamps drop the anchor entirely.
pub fn carry_start_timestamp(previous: Option<i64>, enabled: bool, clock: &dyn Clock) -> Option<i64> {
    if !enabled {
        return None;
    }
    Some(previous.unwrap_or_else(|| clock.now_millis()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnchorState {
    version: u32,
    #[serde(default)]
    start_timestamp: Option<i64>,
    /// RFC 3339, for humans reading the file.
    #[serde(default)]
    updated_at: Option<String>,
}

/// File-backed anchor for hosts that do not stay resident between refreshes.
#[derive(Debug, Clone)]
pub struct AnchorStore {
    path: PathBuf,
}

impl AnchorStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored anchor. Any read or parse problem yields `None`.
    pub fn load(&self) -> Option<i64> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let state: AnchorState = serde_json::from_str(&content).ok()?;
        if state.version > ANCHOR_STORE_VERSION {
            return None;
        }
        state.start_timestamp
    }

    /// Persists the anchor atomically, creating the parent directory if needed.
    pub fn save(&self, start_timestamp: Option<i64>) -> Result<()> {
        use std::io::Write;

        let state = AnchorState {
            version: ANCHOR_STORE_VERSION,
            start_timestamp,
            updated_at: Some(Utc::now().to_rfc3339()),
        };
        let content = serde_json::to_string_pretty(&state).map_err(|e| PresenceError::Json {
            context: "Failed to serialize anchor state".to_string(),
            source: e,
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs_err::create_dir_all(dir).map_err(|e| PresenceError::Io {
            context: "Failed to create state directory".to_string(),
            source: e,
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| PresenceError::Io {
            context: "Failed to create temp file".to_string(),
            source: e,
        })?;

        tmp.write_all(content.as_bytes())
            .map_err(|e| PresenceError::Io {
                context: "Failed to write temp file".to_string(),
                source: e,
            })?;

        tmp.persist(&self.path).map_err(|e| PresenceError::Io {
            context: "Failed to persist anchor state".to_string(),
            source: e.error,
        })?;

        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.save(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_millis(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn previous_anchor_is_reused() {
        let clock = FixedClock(2_000);
        assert_eq!(carry_start_timestamp(Some(1_000), true, &clock), Some(1_000));
    }

    #[test]
    fn missing_anchor_starts_now() {
        let clock = FixedClock(2_000);
        assert_eq!(carry_start_timestamp(None, true, &clock), Some(2_000));
    }

    #[test]
    fn disabled_timestamps_drop_anchor() {
        let clock = FixedClock(2_000);
        assert_eq!(carry_start_timestamp(Some(1_000), false, &clock), None);
    }

    #[test]
    fn system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn load_missing_file_is_none() {
        let temp = tempdir().unwrap();
        let store = AnchorStore::new(temp.path().join("state.json"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_then_load() {
        let temp = tempdir().unwrap();
        let store = AnchorStore::new(temp.path().join("nested").join("state.json"));

        store.save(Some(1_700_000_000_000)).unwrap();
        assert_eq!(store.load(), Some(1_700_000_000_000));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn corrupt_file_is_none() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(AnchorStore::new(path).load(), None);
    }

    #[test]
    fn future_version_is_ignored() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("state.json");
        std::fs::write(&path, r#"{"version": 99, "start_timestamp": 5}"#).unwrap();
        assert_eq!(AnchorStore::new(path).load(), None);
    }
}
