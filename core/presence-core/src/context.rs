//! Token values backed by the refresh snapshot.
//!
//! `TemplateContext` is the `TokenSource` used for every template in a
//! refresh. Values are computed only when the renderer asks for them; the file
//! size is the only one that may touch the filesystem. Source-control metadata
//! is resolved once up front and shared with the assembler's button.

use crate::config::PresenceConfig;
use crate::probe::FileSizeProbe;
use crate::scm::{self, RepositoryMetadata};
use crate::size::format_file_size;
use crate::template::{render_template, title_case, ReplacementToken, TokenSource};
use crate::types::{ActiveDocument, EditorSnapshot, PresenceSnapshot};
use once_cell::unsync::OnceCell;
use presence_protocol::FILLER;
use std::path::PathBuf;
use tracing::debug;

/// Suffix the editor appends to multi-root workspace names.
const WORKSPACE_NAME_SUFFIX: &str = "(Workspace)";

pub struct TemplateContext<'a> {
    snapshot: &'a PresenceSnapshot,
    config: &'a PresenceConfig,
    language: Option<&'a str>,
    probe: &'a dyn FileSizeProbe,
    repository: RepositoryMetadata,
    /// Queried at most once per context, however many templates use it.
    document_size: OnceCell<u64>,
}

impl<'a> TemplateContext<'a> {
    pub fn new(
        snapshot: &'a PresenceSnapshot,
        config: &'a PresenceConfig,
        probe: &'a dyn FileSizeProbe,
    ) -> Self {
        Self {
            snapshot,
            config,
            language: None,
            probe,
            repository: scm::resolve_repository(&snapshot.source_control),
            document_size: OnceCell::new(),
        }
    }

    /// Sets the language display name (the resolved icon key). Without it the
    /// editor's language identifier is used.
    pub fn with_language(mut self, language: &'a str) -> Self {
        self.language = Some(language);
        self
    }

    /// Branch, display name and browsable URL of the selected repository.
    pub fn repository(&self) -> &RepositoryMetadata {
        &self.repository
    }

    fn editor(&self) -> &'a EditorSnapshot {
        &self.snapshot.editor
    }

    fn language(&self, document: &ActiveDocument) -> String {
        self.language
            .map(str::to_string)
            .unwrap_or_else(|| document.language_id.clone())
    }

    fn no_workspace_text(&self) -> String {
        render_template(
            &self.config.lower_details_no_workspace_found,
            &mut EmptyOnly,
        )
    }

    fn workspace_folder_name(&self) -> String {
        self.editor()
            .workspace_folder
            .as_ref()
            .map(|folder| folder.name.clone())
            .unwrap_or_else(|| self.no_workspace_text())
    }

    fn workspace_name(&self) -> String {
        self.editor()
            .workspace_name
            .as_deref()
            .map(|name| name.replace(WORKSPACE_NAME_SUFFIX, "").trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.workspace_folder_name())
    }

    fn workspace_and_folder(&self) -> String {
        let workspace = self.workspace_name();
        let folder = self.workspace_folder_name();
        if folder == FILLER || folder == workspace {
            workspace
        } else {
            format!("{} - {}", workspace, folder)
        }
    }

    /// Workspace folder name followed by the document's directory relative to it.
    fn full_dir_name(&self, document: &ActiveDocument) -> String {
        let Some(folder) = self.editor().workspace_folder.as_ref() else {
            return self.no_workspace_text();
        };

        let relative = document
            .path
            .parent()
            .and_then(|dir| dir.strip_prefix(&folder.path).ok())
            .map(|rel| rel.to_path_buf())
            .unwrap_or_default();

        if relative.as_os_str().is_empty() {
            folder.name.clone()
        } else {
            PathBuf::from(&folder.name)
                .join(relative)
                .to_string_lossy()
                .into_owned()
        }
    }

    fn document_size(&self, document: &ActiveDocument) -> u64 {
        if let Some(size) = document.size_bytes {
            return size;
        }
        *self
            .document_size
            .get_or_init(|| match self.probe.file_size(&document.path) {
                Ok(size) => size,
                Err(err) => {
                    debug!(
                        error = %err,
                        path = %document.path.display(),
                        "File size query failed; using in-memory length"
                    );
                    document.text_len
                }
            })
    }

    fn resolve_document_token(
        &self,
        token: ReplacementToken,
        document: &ActiveDocument,
    ) -> Option<String> {
        let cursor = self.editor().cursor.unwrap_or_default();
        let value = match token {
            ReplacementToken::FileName => document.file_name(),
            ReplacementToken::DirName => document.dir_name(),
            ReplacementToken::FullDirName => self.full_dir_name(document),
            ReplacementToken::Workspace => self.workspace_name(),
            ReplacementToken::WorkspaceFolder => self.workspace_folder_name(),
            ReplacementToken::WorkspaceAndFolder => self.workspace_and_folder(),
            ReplacementToken::LanguageLowerCase => self.language(document).to_lowercase(),
            ReplacementToken::LanguageTitleCase => title_case(&self.language(document)),
            ReplacementToken::LanguageUpperCase => self.language(document).to_uppercase(),
            ReplacementToken::TotalLines => document.line_count.to_string(),
            ReplacementToken::CurrentLine => (u64::from(cursor.line) + 1).to_string(),
            ReplacementToken::CurrentColumn => (u64::from(cursor.character) + 1).to_string(),
            ReplacementToken::FileSize => format_file_size(self.document_size(document)),
            ReplacementToken::GitRepoName => self.repository.name.clone(),
            ReplacementToken::GitBranch => self.repository.branch.clone(),
            ReplacementToken::Empty | ReplacementToken::AppName => return None,
        };
        Some(value)
    }
}

impl TokenSource for TemplateContext<'_> {
    fn resolve(&mut self, token: ReplacementToken) -> Option<String> {
        if token.requires_document() {
            let document = self.editor().document.as_ref()?;
            return self.resolve_document_token(token, document);
        }
        match token {
            ReplacementToken::Empty => Some(FILLER.to_string()),
            ReplacementToken::AppName => Some(self.snapshot.app_name.clone()),
            _ => None,
        }
    }
}

/// Resolves `{empty}` only.
struct EmptyOnly;

impl TokenSource for EmptyOnly {
    fn resolve(&mut self, token: ReplacementToken) -> Option<String> {
        match token {
            ReplacementToken::Empty => Some(FILLER.to_string()),
            _ => None,
        }
    }
}
