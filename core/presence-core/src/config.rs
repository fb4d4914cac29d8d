//! User configuration: display toggles and template strings.
//!
//! Loaded from TOML once per refresh. Every field has a default, so a partial
//! file (or no file at all) yields a usable configuration.

use crate::error::{PresenceError, Result};
use crate::storage::StorageConfig;
use presence_protocol::ActivityType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    pub swap_big_and_small_image: bool,
    pub remove_details: bool,
    pub remove_lower_details: bool,
    pub remove_remote_repository: bool,
    pub remove_timestamp: bool,

    pub details_idling: String,
    pub details_editing: String,
    pub details_debugging: String,
    pub lower_details_idling: String,
    pub lower_details_editing: String,
    pub lower_details_debugging: String,
    /// Shown in place of workspace tokens when the document is outside any
    /// workspace folder.
    pub lower_details_no_workspace_found: String,

    /// Large image text while a document is open.
    pub large_image: String,
    pub large_image_idling: String,
    pub small_image: String,

    pub activity_type: ActivityType,
    pub repository_button_label: String,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            swap_big_and_small_image: false,
            remove_details: false,
            remove_lower_details: false,
            remove_remote_repository: false,
            remove_timestamp: false,
            details_idling: "Idling".to_string(),
            details_editing: "Editing {file_name}".to_string(),
            details_debugging: "Debugging {file_name}".to_string(),
            lower_details_idling: "Idling".to_string(),
            lower_details_editing: "Workspace: {workspace}".to_string(),
            lower_details_debugging: "Debugging: {workspace}".to_string(),
            lower_details_no_workspace_found: "No workspace".to_string(),
            large_image: "Editing a {LANG} file".to_string(),
            large_image_idling: "Idling".to_string(),
            small_image: "{app_name}".to_string(),
            activity_type: ActivityType::Playing,
            repository_button_label: "View Repository".to_string(),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    StorageConfig::default().config_file()
}

/// Loads the configuration, returning defaults if the file doesn't exist.
pub fn load_config(path: Option<PathBuf>) -> Result<PresenceConfig> {
    let config_path = path.unwrap_or_else(default_config_path);

    if !config_path.exists() {
        return Ok(PresenceConfig::default());
    }

    let content = fs_err::read_to_string(&config_path).map_err(|err| PresenceError::Io {
        context: format!("Failed to read config {}", config_path.display()),
        source: err,
    })?;
    parse_config(&content, &config_path)
}

fn parse_config(content: &str, path: &Path) -> Result<PresenceConfig> {
    toml::from_str::<PresenceConfig>(content).map_err(|err| PresenceError::ConfigMalformed {
        path: path.to_path_buf(),
        details: err.to_string(),
    })
}

/// Renders the configuration as TOML.
pub fn config_to_toml(config: &PresenceConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|err| PresenceError::ConfigSerialize(err.to_string()))
}

/// Saves the configuration, creating the parent directory if needed.
pub fn save_config(config: &PresenceConfig, path: &Path) -> Result<()> {
    let content = config_to_toml(config)?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent).map_err(|err| PresenceError::Io {
            context: "Failed to create config directory".to_string(),
            source: err,
        })?;
    }
    fs_err::write(path, content).map_err(|err| PresenceError::Io {
        context: "Failed to write config".to_string(),
        source: err,
    })
}
