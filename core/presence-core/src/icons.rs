//! File-icon resolution: document → image key.
//!
//! The key names an asset uploaded to the presence application and doubles
//! as the language display name for `{lang}`, `{Lang}` and `{LANG}`.

use crate::types::ActiveDocument;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Key used when nothing better is known.
pub const FALLBACK_ICON_KEY: &str = "text";

/// Maps a document to an image key.
pub trait FileIconResolver: Send + Sync {
    fn resolve(&self, document: &ActiveDocument) -> String;
}

static FILE_NAME_ICONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("dockerfile", "docker"),
        ("docker-compose.yml", "docker"),
        ("docker-compose.yaml", "docker"),
        ("cargo.toml", "cargo"),
        ("cargo.lock", "cargo"),
        ("package.json", "npm"),
        ("package-lock.json", "npm"),
        ("makefile", "makefile"),
        ("cmakelists.txt", "cmake"),
        (".gitignore", "git"),
        (".gitattributes", "git"),
        (".gitmodules", "git"),
        ("license", "license"),
        ("readme.md", "markdown"),
    ])
});

static EXTENSION_ICONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("rs", "rust"),
        ("ts", "typescript"),
        ("tsx", "react"),
        ("js", "javascript"),
        ("mjs", "javascript"),
        ("cjs", "javascript"),
        ("jsx", "react"),
        ("py", "python"),
        ("go", "go"),
        ("c", "c"),
        ("h", "c"),
        ("cc", "cpp"),
        ("cpp", "cpp"),
        ("hpp", "cpp"),
        ("cs", "csharp"),
        ("java", "java"),
        ("kt", "kotlin"),
        ("swift", "swift"),
        ("rb", "ruby"),
        ("php", "php"),
        ("lua", "lua"),
        ("zig", "zig"),
        ("sh", "shell"),
        ("bash", "shell"),
        ("zsh", "shell"),
        ("md", "markdown"),
        ("json", "json"),
        ("toml", "toml"),
        ("yml", "yaml"),
        ("yaml", "yaml"),
        ("html", "html"),
        ("css", "css"),
        ("scss", "scss"),
        ("vue", "vue"),
        ("svelte", "svelte"),
        ("sql", "sql"),
        ("txt", "text"),
    ])
});

/// Default resolver: exact file name, then extension, then the editor's
/// language identifier, then `FALLBACK_ICON_KEY`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionIconResolver;

impl FileIconResolver for ExtensionIconResolver {
    fn resolve(&self, document: &ActiveDocument) -> String {
        let file_name = document.file_name().to_lowercase();

        if let Some(icon) = FILE_NAME_ICONS.get(file_name.as_str()) {
            return (*icon).to_string();
        }

        let extension = document
            .path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());
        if let Some(icon) = extension
            .as_deref()
            .and_then(|ext| EXTENSION_ICONS.get(ext))
        {
            return (*icon).to_string();
        }

        let language_id = document.language_id.trim();
        if !language_id.is_empty() {
            return language_id.to_lowercase();
        }

        FALLBACK_ICON_KEY.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn document(path: &str, language_id: &str) -> ActiveDocument {
        ActiveDocument {
            path: PathBuf::from(path),
            language_id: language_id.to_string(),
            ..ActiveDocument::default()
        }
    }

    #[test]
    fn file_name_wins_over_extension() {
        let resolver = ExtensionIconResolver;
        assert_eq!(resolver.resolve(&document("/repo/Cargo.toml", "toml")), "cargo");
        assert_eq!(resolver.resolve(&document("/repo/Dockerfile", "dockerfile")), "docker");
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        let resolver = ExtensionIconResolver;
        assert_eq!(resolver.resolve(&document("/repo/src/LIB.RS", "rust")), "rust");
    }

    #[test]
    fn unknown_extension_uses_language_id() {
        let resolver = ExtensionIconResolver;
        assert_eq!(resolver.resolve(&document("/repo/x.weird", "Elixir")), "elixir");
    }

    #[test]
    fn nothing_known_falls_back() {
        let resolver = ExtensionIconResolver;
        assert_eq!(resolver.resolve(&document("/repo/blob", "")), FALLBACK_ICON_KEY);
    }
}
