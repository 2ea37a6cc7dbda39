//! Workspace catalog: notebook and document name, path, and icon lookup.
//!
//! Lookups go through an injected [`DirectoryApi`] and are cached per
//! catalog instance; [`WorkspaceCatalog::invalidate`] drops the caches when
//! the host data may be stale. There is no process-wide cache, so tests and
//! multi-workspace embedders can run catalogs side by side.
//!
//! Icon fields arrive from the host in several spellings: unicode codepoint
//! sequences (`"1f970"`, `"U+1F970"`, `"2600-fe0f"`), custom icon file
//! names (`"smile.png"`), or a literal emoji. [`decode_icon`] normalizes
//! them all into an [`IconRender`].

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, error};

use crate::error::WorkspaceResult;

/// Fallback icon for notebooks without one.
pub const DEFAULT_NOTEBOOK_ICON: &str = "🗃";

/// Fallback icon for documents without one.
pub const DEFAULT_DOCUMENT_ICON: &str = "📄";

/// Name shown when a notebook cannot be resolved.
const UNKNOWN_NOTEBOOK: &str = "Unknown Notebook";

/// Path shown when a document cannot be resolved.
const UNKNOWN_DOCUMENT: &str = "Unknown Document";

/// One notebook as reported by the host directory API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookInfo {
    /// Host identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Raw icon field, if set.
    pub icon: Option<String>,
}

/// A decoded icon, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconRender {
    /// An emoji string.
    Emoji(String),
    /// A reference to an icon image served by the host.
    Image(String),
}

/// The host's directory lookup boundary.
pub trait DirectoryApi {
    /// All notebooks in the workspace.
    fn list_notebooks(&self) -> WorkspaceResult<Vec<NotebookInfo>>;

    /// Human-readable path of a document, if it exists.
    fn document_path(&self, doc_id: &str) -> WorkspaceResult<Option<String>>;

    /// Raw icon field of a document, if set.
    fn document_icon(&self, doc_id: &str) -> WorkspaceResult<Option<String>>;
}

/// Cached name/path/icon lookup over a [`DirectoryApi`].
pub struct WorkspaceCatalog {
    api: Box<dyn DirectoryApi>,
    notebooks: Option<Vec<NotebookInfo>>,
    doc_icons: HashMap<String, IconRender>,
}

impl WorkspaceCatalog {
    /// Create a catalog over the given directory API.
    pub fn new(api: Box<dyn DirectoryApi>) -> Self {
        Self {
            api,
            notebooks: None,
            doc_icons: HashMap::new(),
        }
    }

    /// Drop all cached lookups.
    pub fn invalidate(&mut self) {
        self.notebooks = None;
        self.doc_icons.clear();
    }

    /// The cached notebook list, loading it on first use.
    pub fn notebooks(&mut self) -> &[NotebookInfo] {
        if self.notebooks.is_none() {
            match self.api.list_notebooks() {
                Ok(notebooks) => self.notebooks = Some(notebooks),
                Err(err) => {
                    error!("failed to list notebooks: {err}");
                    self.notebooks = Some(Vec::new());
                }
            }
        }
        self.notebooks.as_deref().unwrap_or_default()
    }

    /// Display name of a notebook, or a fallback when unknown.
    pub fn notebook_name(&mut self, notebook_id: &str) -> String {
        self.notebooks()
            .iter()
            .find(|nb| nb.id == notebook_id)
            .map(|nb| nb.name.clone())
            .unwrap_or_else(|| UNKNOWN_NOTEBOOK.to_string())
    }

    /// Decoded icon of a notebook, falling back to the default.
    pub fn notebook_icon(&mut self, notebook_id: &str) -> IconRender {
        let raw = self
            .notebooks()
            .iter()
            .find(|nb| nb.id == notebook_id)
            .and_then(|nb| nb.icon.clone());
        match raw {
            Some(icon) if !icon.is_empty() => {
                decode_icon(&icon).unwrap_or_else(|| IconRender::Emoji(icon))
            }
            _ => IconRender::Emoji(DEFAULT_NOTEBOOK_ICON.to_string()),
        }
    }

    /// Human-readable path of a document, without a leading slash, or a
    /// fallback when the lookup fails.
    pub fn document_path(&mut self, doc_id: &str) -> String {
        if doc_id.is_empty() {
            return UNKNOWN_DOCUMENT.to_string();
        }
        match self.api.document_path(doc_id) {
            Ok(Some(path)) => path.strip_prefix('/').unwrap_or(&path).to_string(),
            Ok(None) => UNKNOWN_DOCUMENT.to_string(),
            Err(err) => {
                error!(doc_id, "failed to fetch document path: {err}");
                UNKNOWN_DOCUMENT.to_string()
            }
        }
    }

    /// Decoded icon of a document, cached per document id, falling back to
    /// the default.
    pub fn document_icon(&mut self, doc_id: &str) -> IconRender {
        let fallback = || IconRender::Emoji(DEFAULT_DOCUMENT_ICON.to_string());
        if doc_id.is_empty() {
            return fallback();
        }
        if let Some(icon) = self.doc_icons.get(doc_id) {
            return icon.clone();
        }
        let icon = match self.api.document_icon(doc_id) {
            Ok(Some(raw)) if !raw.is_empty() => {
                decode_icon(&raw).unwrap_or_else(|| IconRender::Emoji(raw))
            }
            Ok(_) => fallback(),
            Err(err) => {
                error!(doc_id, "failed to fetch document icon: {err}");
                return fallback();
            }
        };
        self.doc_icons.insert(doc_id.to_string(), icon.clone());
        icon
    }
}

fn file_icon_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[\w-]+\.(?:svg|png|jpe?g|gif|webp)$").unwrap())
}

fn hex_sequence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:u\+|\\u)?[0-9a-f]+(?:[-\s](?:u\+|\\u)?[0-9a-f]+)*$").unwrap()
    })
}

/// Decode a raw host icon field into an [`IconRender`].
///
/// File names become image references under the host's `/emojis/` route.
/// Hex codepoint sequences become emoji strings; `-` and whitespace
/// separate sequence parts, `u+`/`\u` prefixes are stripped. Anything else
/// (typically a literal emoji) passes through unchanged. Returns `None`
/// when a hex sequence yields no valid codepoints.
pub fn decode_icon(raw: &str) -> Option<IconRender> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if file_icon_regex().is_match(trimmed) {
        debug!(icon = trimmed, "decoded file icon");
        return Some(IconRender::Image(format!("/emojis/{trimmed}")));
    }

    let normalized = trimmed.to_lowercase();
    if !hex_sequence_regex().is_match(&normalized) {
        // already a literal emoji or other display text
        return Some(IconRender::Emoji(trimmed.to_string()));
    }

    let mut decoded = String::new();
    for part in normalized
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|p| !p.is_empty())
    {
        let cleaned = part
            .strip_prefix("u+")
            .or_else(|| part.strip_prefix("\\u"))
            .unwrap_or(part);
        if let Some(ch) = u32::from_str_radix(cleaned, 16).ok().and_then(char::from_u32) {
            decoded.push(ch);
        }
    }
    if decoded.is_empty() {
        None
    } else {
        Some(IconRender::Emoji(decoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefkit_core::{shared, Shared};

    #[derive(Default)]
    struct FakeApi {
        notebooks: Vec<NotebookInfo>,
        paths: HashMap<String, String>,
        icons: HashMap<String, String>,
        list_calls: Shared<u32>,
        icon_calls: Shared<u32>,
    }

    impl DirectoryApi for FakeApi {
        fn list_notebooks(&self) -> WorkspaceResult<Vec<NotebookInfo>> {
            *self.list_calls.borrow_mut() += 1;
            Ok(self.notebooks.clone())
        }

        fn document_path(&self, doc_id: &str) -> WorkspaceResult<Option<String>> {
            Ok(self.paths.get(doc_id).cloned())
        }

        fn document_icon(&self, doc_id: &str) -> WorkspaceResult<Option<String>> {
            *self.icon_calls.borrow_mut() += 1;
            Ok(self.icons.get(doc_id).cloned())
        }
    }

    fn catalog_with(notebooks: Vec<NotebookInfo>) -> (WorkspaceCatalog, Shared<u32>) {
        let list_calls = shared(0);
        let api = FakeApi {
            notebooks,
            list_calls: list_calls.clone(),
            ..FakeApi::default()
        };
        (WorkspaceCatalog::new(Box::new(api)), list_calls)
    }

    #[test]
    fn test_decode_icon_hex_sequences() {
        assert_eq!(
            decode_icon("1f970"),
            Some(IconRender::Emoji("🥰".to_string()))
        );
        assert_eq!(
            decode_icon("U+1F970"),
            Some(IconRender::Emoji("🥰".to_string()))
        );
        assert_eq!(
            decode_icon("2600-fe0f"),
            Some(IconRender::Emoji("☀\u{fe0f}".to_string()))
        );
        assert_eq!(
            decode_icon("1f469-1f3fd"),
            Some(IconRender::Emoji("👩🏽".to_string()))
        );
    }

    #[test]
    fn test_decode_icon_file_names() {
        assert_eq!(
            decode_icon("smile.png"),
            Some(IconRender::Image("/emojis/smile.png".to_string()))
        );
        assert_eq!(
            decode_icon("apple.SVG"),
            Some(IconRender::Image("/emojis/apple.SVG".to_string()))
        );
        // path traversal shapes do not match the file pattern
        assert_eq!(
            decode_icon("../evil.png"),
            Some(IconRender::Emoji("../evil.png".to_string()))
        );
    }

    #[test]
    fn test_decode_icon_literal_emoji_passthrough() {
        assert_eq!(
            decode_icon("📚"),
            Some(IconRender::Emoji("📚".to_string()))
        );
        assert_eq!(decode_icon("   "), None);
    }

    #[test]
    fn test_notebook_name_with_fallback() {
        let (mut catalog, _) = catalog_with(vec![NotebookInfo {
            id: "nb1".to_string(),
            name: "Journal".to_string(),
            icon: None,
        }]);

        assert_eq!(catalog.notebook_name("nb1"), "Journal");
        assert_eq!(catalog.notebook_name("nb2"), "Unknown Notebook");
    }

    #[test]
    fn test_notebook_icon_decodes_and_falls_back() {
        let (mut catalog, _) = catalog_with(vec![
            NotebookInfo {
                id: "nb1".to_string(),
                name: "Journal".to_string(),
                icon: Some("1f4d3".to_string()),
            },
            NotebookInfo {
                id: "nb2".to_string(),
                name: "Inbox".to_string(),
                icon: None,
            },
        ]);

        assert_eq!(
            catalog.notebook_icon("nb1"),
            IconRender::Emoji("📓".to_string())
        );
        assert_eq!(
            catalog.notebook_icon("nb2"),
            IconRender::Emoji(DEFAULT_NOTEBOOK_ICON.to_string())
        );
    }

    #[test]
    fn test_notebook_list_loaded_once_until_invalidated() {
        let (mut catalog, list_calls) = catalog_with(vec![]);

        catalog.notebook_name("a");
        catalog.notebook_name("b");
        assert_eq!(*list_calls.borrow(), 1);

        catalog.invalidate();
        catalog.notebook_name("c");
        assert_eq!(*list_calls.borrow(), 2);
    }

    #[test]
    fn test_document_path_strips_leading_slash() {
        let icon_calls = shared(0);
        let api = FakeApi {
            paths: HashMap::from([("doc1".to_string(), "/Daily/Today".to_string())]),
            icon_calls: icon_calls.clone(),
            ..FakeApi::default()
        };
        let mut catalog = WorkspaceCatalog::new(Box::new(api));

        assert_eq!(catalog.document_path("doc1"), "Daily/Today");
        assert_eq!(catalog.document_path("missing"), "Unknown Document");
        assert_eq!(catalog.document_path(""), "Unknown Document");
    }

    #[test]
    fn test_document_icon_cached_per_id() {
        let icon_calls = shared(0);
        let api = FakeApi {
            icons: HashMap::from([("doc1".to_string(), "1f600".to_string())]),
            icon_calls: icon_calls.clone(),
            ..FakeApi::default()
        };
        let mut catalog = WorkspaceCatalog::new(Box::new(api));

        assert_eq!(
            catalog.document_icon("doc1"),
            IconRender::Emoji("😀".to_string())
        );
        catalog.document_icon("doc1");
        assert_eq!(*icon_calls.borrow(), 1);

        assert_eq!(
            catalog.document_icon("doc2"),
            IconRender::Emoji(DEFAULT_DOCUMENT_ICON.to_string())
        );
    }
}
