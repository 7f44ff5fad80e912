//! Domain models for bubble notes.
//!
//! A document is anything the host vault stores; a bubble is a markdown
//! document that lives under the configured bubble folder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Extension of documents that can be bubbles.
pub const BUBBLE_EXTENSION: &str = "md";

/// A document known to the host vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Vault-relative path with `/` separators.
    pub path: String,
    /// Extension without the leading dot.
    pub extension: String,
    /// Creation instant, the bubble ordering key.
    pub created: DateTime<Utc>,
}

impl Document {
    /// Create a document, deriving the extension from the path.
    #[must_use]
    pub fn new(path: impl Into<String>, created: DateTime<Utc>) -> Self {
        let path = path.into();
        let extension = extension_of(&path).to_string();
        Self {
            path,
            extension,
            created,
        }
    }

    /// File name including extension.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Classification of a document against the folder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleState {
    /// In the bubble folder and not archived.
    Active,
    /// In the archive folder.
    Archived,
    /// Not a bubble at all.
    Unmanaged,
}

impl std::fmt::Display for BubbleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Archived => write!(f, "archived"),
            Self::Unmanaged => write!(f, "unmanaged"),
        }
    }
}

/// A classified bubble document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bubble {
    pub path: String,
    pub name: String,
    pub created: DateTime<Utc>,
    pub state: BubbleState,
}

impl Bubble {
    /// Wrap a document with its classification.
    #[must_use]
    pub fn from_document(doc: &Document, state: BubbleState) -> Self {
        Self {
            path: doc.path.clone(),
            name: doc.name().to_string(),
            created: doc.created,
            state,
        }
    }
}

/// Navigation direction within the bubble set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Which end of the bubble set to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    Oldest,
    Newest,
}

/// Where the host should show an opened document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabTarget {
    /// Replace the document in the focused tab.
    #[default]
    Current,
    /// Open a new focused tab.
    New,
}

impl TabTarget {
    #[must_use]
    pub const fn from_new_tab(new_tab: bool) -> Self {
        if new_tab {
            Self::New
        } else {
            Self::Current
        }
    }
}

/// Host tab identifier.
pub type TabId = i64;

/// Kind of view a tab shows, derived from its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Markdown,
    Other,
}

/// An open tab in the host workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub path: String,
    pub kind: ViewKind,
}

impl Tab {
    #[must_use]
    pub fn new(id: TabId, path: impl Into<String>) -> Self {
        let path = path.into();
        let kind = if extension_of(&path) == BUBBLE_EXTENSION {
            ViewKind::Markdown
        } else {
            ViewKind::Other
        };
        Self { id, path, kind }
    }
}

/// Extension of a path's final segment, empty when there is none.
#[must_use]
pub fn extension_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx + 1..],
        _ => "",
    }
}

/// Normalize a vault path: forward slashes, no empty segments,
/// no leading or trailing slash. The vault root normalizes to `/`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let joined = path
        .trim()
        .replace('\\', "/")
        .replace('\u{00A0}', " ")
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

/// Whether `path` is `folder` itself or lies beneath it.
///
/// Matches whole segments, so `bubbles2/a.md` is not inside `bubbles`.
#[must_use]
pub fn is_within_folder(path: &str, folder: &str) -> bool {
    if folder == "/" {
        return true;
    }
    path.strip_prefix(folder)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Join a normalized folder and a file name.
#[must_use]
pub fn join_path(folder: &str, name: &str) -> String {
    if folder == "/" {
        name.to_string()
    } else {
        format!("{folder}/{name}")
    }
}
