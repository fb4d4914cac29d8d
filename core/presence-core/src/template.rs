//! Template tokenizer and renderer.
//!
//! A template is user text with literal markers such as `{file_name}` or
//! `{LANG}`. Parsing splits it into literal and token segments; rendering asks
//! a `TokenSource` for the value of each token that actually appears, once per
//! distinct token. A token that is absent from the template is never resolved,
//! so expensive values (file size) are only computed on demand.
//!
//! ```text
//! "Editing {file_name} ({file_size})"
//!   → [Literal("Editing "), Token(FileName), Literal(" ("), Token(FileSize), Literal(")")]
//! ```
//!
//! Unknown brace sequences stay literal text. Markers are case-sensitive, so
//! `{lang}`, `{Lang}` and `{LANG}` are three different tokens.

use std::collections::HashMap;

/// The closed set of placeholder markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplacementToken {
    Empty,
    FileName,
    DirName,
    FullDirName,
    Workspace,
    WorkspaceFolder,
    WorkspaceAndFolder,
    LanguageLowerCase,
    LanguageTitleCase,
    LanguageUpperCase,
    TotalLines,
    CurrentLine,
    CurrentColumn,
    FileSize,
    AppName,
    GitRepoName,
    GitBranch,
}

impl ReplacementToken {
    pub const ALL: [ReplacementToken; 17] = [
        Self::Empty,
        Self::FileName,
        Self::DirName,
        Self::FullDirName,
        Self::Workspace,
        Self::WorkspaceFolder,
        Self::WorkspaceAndFolder,
        Self::LanguageLowerCase,
        Self::LanguageTitleCase,
        Self::LanguageUpperCase,
        Self::TotalLines,
        Self::CurrentLine,
        Self::CurrentColumn,
        Self::FileSize,
        Self::AppName,
        Self::GitRepoName,
        Self::GitBranch,
    ];

    /// The literal marker as written in templates.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Empty => "{empty}",
            Self::FileName => "{file_name}",
            Self::DirName => "{dir_name}",
            Self::FullDirName => "{full_dir_name}",
            Self::Workspace => "{workspace}",
            Self::WorkspaceFolder => "{workspace_folder}",
            Self::WorkspaceAndFolder => "{workspace_and_folder}",
            Self::LanguageLowerCase => "{lang}",
            Self::LanguageTitleCase => "{Lang}",
            Self::LanguageUpperCase => "{LANG}",
            Self::TotalLines => "{total_lines}",
            Self::CurrentLine => "{current_line}",
            Self::CurrentColumn => "{current_column}",
            Self::FileSize => "{file_size}",
            Self::AppName => "{app_name}",
            Self::GitRepoName => "{git_repo_name}",
            Self::GitBranch => "{git_branch}",
        }
    }

    pub fn from_marker(marker: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.marker() == marker)
    }

    /// Whether the value only exists while a document is open.
    pub fn requires_document(self) -> bool {
        !matches!(self, Self::Empty | Self::AppName)
    }
}

impl std::fmt::Display for ReplacementToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.marker())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Token(ReplacementToken),
}

/// Supplies token values during rendering.
pub trait TokenSource {
    /// Returns the value for `token`, or `None` to leave the marker in place.
    fn resolve(&mut self, token: ReplacementToken) -> Option<String>;
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = raw;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let candidate = &rest[open..];

            let matched = candidate.find('}').and_then(|close| {
                ReplacementToken::from_marker(&candidate[..=close]).map(|token| (token, close))
            });

            match matched {
                Some((token, close)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Token(token));
                    rest = &candidate[close + 1..];
                }
                None => {
                    // Not a marker; keep the brace and rescan after it so
                    // "{{lang}" still finds "{lang}".
                    literal.push('{');
                    rest = &candidate[1..];
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Tokens referenced by the template, in order of appearance (repeats included).
    pub fn tokens(&self) -> impl Iterator<Item = ReplacementToken> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Token(token) => Some(*token),
            Segment::Literal(_) => None,
        })
    }

    pub fn render(&self, source: &mut dyn TokenSource) -> String {
        let mut resolved: HashMap<ReplacementToken, Option<String>> = HashMap::new();
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token(token) => {
                    let value = resolved
                        .entry(*token)
                        .or_insert_with(|| source.resolve(*token));
                    match value {
                        Some(value) => out.push_str(value),
                        None => out.push_str(token.marker()),
                    }
                }
            }
        }

        out
    }
}

/// Parses and renders in one step.
pub fn render_template(raw: &str, source: &mut dyn TokenSource) -> String {
    Template::parse(raw).render(source)
}

/// Lower-cases, then upper-cases the first character ("typescript" → "Typescript").
pub fn title_case(value: &str) -> String {
    let lower = value.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canned values for a few tokens; records every resolve call.
    #[derive(Default)]
    struct CountingSource {
        calls: Vec<ReplacementToken>,
    }

    impl TokenSource for CountingSource {
        fn resolve(&mut self, token: ReplacementToken) -> Option<String> {
            self.calls.push(token);
            match token {
                ReplacementToken::FileName => Some("main.rs".to_string()),
                ReplacementToken::LanguageUpperCase => Some("RUST".to_string()),
                ReplacementToken::TotalLines => Some("42".to_string()),
                ReplacementToken::GitBranch => None,
                other => Some(format!("<{:?}>", other)),
            }
        }
    }

    #[test]
    fn template_without_tokens_is_unchanged() {
        let raw = "Just {some} text with {braces} and }{ odd ones {";
        let mut source = CountingSource::default();
        assert_eq!(render_template(raw, &mut source), raw);
        assert!(source.calls.is_empty());
    }

    #[test]
    fn parses_literals_and_tokens() {
        let template = Template::parse("Editing {file_name} ({total_lines} lines)");
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("Editing ".to_string()),
                Segment::Token(ReplacementToken::FileName),
                Segment::Literal(" (".to_string()),
                Segment::Token(ReplacementToken::TotalLines),
                Segment::Literal(" lines)".to_string()),
            ]
        );
    }

    #[test]
    fn renders_multiple_distinct_tokens() {
        let mut source = CountingSource::default();
        let rendered = render_template("{file_name}: {LANG}, {total_lines}", &mut source);
        assert_eq!(rendered, "main.rs: RUST, 42");
    }

    #[test]
    fn only_referenced_tokens_are_resolved() {
        let mut source = CountingSource::default();
        render_template("{file_name} {file_name}", &mut source);
        assert_eq!(source.calls, vec![ReplacementToken::FileName]);
    }

    #[test]
    fn unresolved_token_keeps_marker() {
        let mut source = CountingSource::default();
        assert_eq!(
            render_template("on {git_branch}", &mut source),
            "on {git_branch}"
        );
    }

    #[test]
    fn markers_are_case_sensitive() {
        let template = Template::parse("{lang} {Lang} {LANG} {LaNg}");
        let tokens: Vec<_> = template.tokens().collect();
        assert_eq!(
            tokens,
            vec![
                ReplacementToken::LanguageLowerCase,
                ReplacementToken::LanguageTitleCase,
                ReplacementToken::LanguageUpperCase,
            ]
        );
    }

    #[test]
    fn only_empty_and_app_name_are_document_free() {
        let document_free: Vec<_> = ReplacementToken::ALL
            .into_iter()
            .filter(|token| !token.requires_document())
            .collect();
        assert_eq!(
            document_free,
            vec![ReplacementToken::Empty, ReplacementToken::AppName]
        );
    }

    #[test]
    fn doubled_brace_still_finds_marker() {
        let template = Template::parse("{{file_name}}");
        assert_eq!(
            template.tokens().collect::<Vec<_>>(),
            vec![ReplacementToken::FileName]
        );
        let mut source = CountingSource::default();
        assert_eq!(template.render(&mut source), "{main.rs}");
    }

    #[test]
    fn adjacent_tokens_do_not_collide() {
        let mut source = CountingSource::default();
        assert_eq!(
            render_template("{file_name}{total_lines}", &mut source),
            "main.rs42"
        );
    }

    #[test]
    fn every_marker_round_trips() {
        for token in ReplacementToken::ALL {
            assert_eq!(ReplacementToken::from_marker(token.marker()), Some(token));
        }
        assert_eq!(ReplacementToken::from_marker("{unknown}"), None);
    }

    #[test]
    fn title_case_lowers_tail() {
        assert_eq!(title_case("typescript"), "Typescript");
        assert_eq!(title_case("RUST"), "Rust");
        assert_eq!(title_case(""), "");
    }
}
