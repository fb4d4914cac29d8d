//! Snapshot types supplied by the host on every refresh.
//!
//! The host editor owns the live state (active editor, debug session,
//! source-control extension). It copies what the synthesizer needs into these
//! read-only values, so synthesis can run without a running host.
//!
//! All fields tolerate absence via `#[serde(default)]`; an empty snapshot is
//! an idle editor with no repositories.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_app_name() -> String {
    "Visual Studio Code".to_string()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Editor State
// ═══════════════════════════════════════════════════════════════════════════════

/// Cursor position as reported by the editor (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CursorPosition {
    pub line: u32,
    pub character: u32,
}

/// The document in the focused editor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveDocument {
    pub path: PathBuf,
    /// Editor language identifier (e.g. "rust", "typescriptreact").
    pub language_id: String,
    pub line_count: u64,
    /// Size on disk when the host already knows it. When absent the size is
    /// queried through a `FileSizeProbe`.
    pub size_bytes: Option<u64>,
    /// Length of the in-memory buffer, used when the size query fails.
    pub text_len: u64,
}

impl ActiveDocument {
    /// Base name of the document path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Name of the directory that directly contains the document.
    pub fn dir_name(&self) -> String {
        self.path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// The workspace folder that contains the active document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: PathBuf,
}

/// What the focused editor shows. `document: None` means idle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSnapshot {
    pub document: Option<ActiveDocument>,
    pub cursor: Option<CursorPosition>,
    /// Name of the opened workspace, if any. Multi-root workspaces carry a
    /// " (Workspace)" suffix which is stripped before display.
    pub workspace_name: Option<String>,
    pub workspace_folder: Option<WorkspaceFolder>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Source Control State
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSnapshot {
    pub name: String,
    pub fetch_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositorySnapshot {
    /// Whether the source-control view currently has this repository focused.
    pub selected: bool,
    /// Checked-out branch; `None` for a detached HEAD.
    pub branch: Option<String>,
    pub remotes: Vec<RemoteSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceControlSnapshot {
    pub repositories: Vec<RepositorySnapshot>,
}

impl SourceControlSnapshot {
    /// The selected repository. There is no fallback to the first repository.
    pub fn selected(&self) -> Option<&RepositorySnapshot> {
        self.repositories.iter().find(|repo| repo.selected)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Refresh Input
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything the assembler reads from the host for one refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceSnapshot {
    /// Host application name (e.g. "Visual Studio Code - Insiders").
    pub app_name: String,
    pub editor: EditorSnapshot,
    /// Whether a debug session is active.
    pub debugging: bool,
    pub source_control: SourceControlSnapshot,
}

impl Default for PresenceSnapshot {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            editor: EditorSnapshot::default(),
            debugging: false,
            source_control: SourceControlSnapshot::default(),
        }
    }
}

/// A refresh as sent by the host: the snapshot plus refresh-level flags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    #[serde(flatten)]
    pub snapshot: PresenceSnapshot,
    /// Drop the carried start timestamp (e.g. the editor window was reopened).
    #[serde(default)]
    pub reset: bool,
}
