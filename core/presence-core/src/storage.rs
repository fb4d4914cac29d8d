//! Storage configuration and path management.
//!
//! Every file the presence tooling reads or writes lives under one root
//! (default `~/.editor-presence/`). Tests inject a temp directory with
//! `StorageConfig::with_root()`.

use std::path::{Path, PathBuf};

const ROOT_DIR_NAME: &str = ".editor-presence";

/// Central configuration for all presence storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        // Without a home directory the files land in the temp dir; nothing
        // stored here is precious.
        let base = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            root: base.join(ROOT_DIR_NAME),
        }
    }
}

impl StorageConfig {
    /// Creates a StorageConfig with a custom root directory.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to config.toml (user options and templates).
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Path to state.json (carried start timestamp).
    pub fn state_file(&self) -> PathBuf {
        self.root.join("state.json")
    }

    /// Path to logs/ directory (rolling hook logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}
