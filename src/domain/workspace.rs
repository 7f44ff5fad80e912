//! Host ports.
//!
//! The bubble manager never touches storage or tabs directly; it goes
//! through these traits so it can run against a real vault or a fake.

use super::error::Result;
use super::models::{Document, Tab, TabId, TabTarget};

/// Document store and tab workspace provided by the host.
///
/// Every call completes before the next one starts. A failed call is
/// terminal for the operation that made it.
pub trait Workspace {
    /// List every document in the vault.
    fn documents(&self) -> Result<Vec<Document>>;

    /// Whether a file or folder already occupies `path`.
    fn exists(&self, path: &str) -> bool;

    /// Create a folder, succeeding if it already exists.
    fn create_folder(&mut self, path: &str) -> Result<()>;

    /// Create a document; fails if `path` is occupied.
    fn create_document(&mut self, path: &str, content: &str) -> Result<Document>;

    /// Move a document. Tabs showing `from` follow it to `to`.
    fn rename_document(&mut self, from: &str, to: &str) -> Result<()>;

    /// Document shown in the focused tab, if any.
    fn active_document(&self) -> Result<Option<Document>>;

    /// All open tabs.
    fn open_tabs(&self) -> Result<Vec<Tab>>;

    /// Show a document in the focused tab or a new one.
    fn open(&mut self, path: &str, target: TabTarget) -> Result<()>;

    /// Focus an existing tab.
    fn activate_tab(&mut self, id: TabId) -> Result<()>;

    /// Close the focused tab.
    fn close_active_tab(&mut self) -> Result<()>;
}

/// User-facing message surface.
pub trait Notifier {
    /// Show a short transient message.
    fn notify(&self, message: &str);

    /// Replace the persistent status indicator text.
    fn show_status(&self, text: &str);
}
