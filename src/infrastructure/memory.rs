//! In-memory host for testing bubble logic without filesystem I/O.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::{AppError, Document, Notifier, Result, Tab, TabId, TabTarget, Workspace};

/// Vault and tab state held in memory.
///
/// Documents get creation times one second apart in insertion order
/// unless given explicitly.
#[derive(Debug, Default)]
pub struct InMemoryWorkspace {
    documents: Vec<Document>,
    folders: BTreeSet<String>,
    tabs: BTreeMap<TabId, String>,
    active: Option<TabId>,
    next_tab: TabId,
    ticks: i64,
    fail_writes: bool,
    fail_tabs: bool,
    renames: usize,
}

impl InMemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    fn instant(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0)
            .single()
            .unwrap_or_default()
            + Duration::seconds(seconds)
    }

    fn tick(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        Self::instant(self.ticks)
    }

    /// Add a document created after every earlier one.
    pub fn add_document(&mut self, path: &str) {
        let created = self.tick();
        self.documents.push(Document::new(path, created));
    }

    /// Add a document with an explicit creation offset in seconds.
    pub fn add_document_at(&mut self, path: &str, seconds: i64) {
        self.documents.push(Document::new(path, Self::instant(seconds)));
    }

    /// Make every mutating storage call fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make opening, focusing and closing tabs fail.
    pub fn fail_tabs(&mut self, fail: bool) {
        self.fail_tabs = fail;
    }

    /// Number of successful moves.
    pub const fn rename_count(&self) -> usize {
        self.renames
    }

    fn check_writable(&self, path: &str) -> Result<()> {
        if self.fail_writes {
            return Err(AppError::storage_msg(format!("Write rejected: {path}")));
        }
        Ok(())
    }

    fn check_tabs(&self, path: &str) -> Result<()> {
        if self.fail_tabs {
            return Err(AppError::storage_msg(format!("Tab change rejected: {path}")));
        }
        Ok(())
    }
}

impl Workspace for InMemoryWorkspace {
    fn documents(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }

    fn exists(&self, path: &str) -> bool {
        self.folders.contains(path) || self.documents.iter().any(|d| d.path == path)
    }

    fn create_folder(&mut self, path: &str) -> Result<()> {
        self.check_writable(path)?;
        self.folders.insert(path.to_string());
        Ok(())
    }

    fn create_document(&mut self, path: &str, _content: &str) -> Result<Document> {
        self.check_writable(path)?;
        if self.exists(path) {
            return Err(AppError::storage_msg(format!("Already exists: {path}")));
        }
        let created = self.tick();
        let doc = Document::new(path, created);
        self.documents.push(doc.clone());
        Ok(doc)
    }

    fn rename_document(&mut self, from: &str, to: &str) -> Result<()> {
        self.check_writable(to)?;
        if self.exists(to) {
            return Err(AppError::storage_msg(format!("Destination exists: {to}")));
        }
        let doc = self
            .documents
            .iter_mut()
            .find(|d| d.path == from)
            .ok_or_else(|| AppError::storage_msg(format!("No such document: {from}")))?;
        *doc = Document::new(to, doc.created);

        for path in self.tabs.values_mut().filter(|p| p.as_str() == from) {
            *path = to.to_string();
        }
        self.renames += 1;
        Ok(())
    }

    fn active_document(&self) -> Result<Option<Document>> {
        let path = self.active.and_then(|id| self.tabs.get(&id));
        Ok(path.and_then(|p| self.documents.iter().find(|d| &d.path == p).cloned()))
    }

    fn open_tabs(&self) -> Result<Vec<Tab>> {
        Ok(self
            .tabs
            .iter()
            .map(|(id, path)| Tab::new(*id, path.clone()))
            .collect())
    }

    fn open(&mut self, path: &str, target: TabTarget) -> Result<()> {
        self.check_tabs(path)?;
        match (target, self.active) {
            (TabTarget::Current, Some(id)) => {
                self.tabs.insert(id, path.to_string());
            }
            _ => {
                self.next_tab += 1;
                self.tabs.insert(self.next_tab, path.to_string());
                self.active = Some(self.next_tab);
            }
        }
        Ok(())
    }

    fn activate_tab(&mut self, id: TabId) -> Result<()> {
        self.check_tabs(&id.to_string())?;
        if !self.tabs.contains_key(&id) {
            return Err(AppError::storage_msg(format!("No such tab: {id}")));
        }
        self.active = Some(id);
        Ok(())
    }

    fn close_active_tab(&mut self) -> Result<()> {
        self.check_tabs("active tab")?;
        if let Some(id) = self.active.take() {
            self.tabs.remove(&id);
        }
        self.active = self.tabs.keys().next_back().copied();
        Ok(())
    }
}

/// Notifier that records everything it is asked to show.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
    statuses: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last_message(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }

    pub fn last_status(&self) -> Option<String> {
        self.statuses.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn show_status(&self, text: &str) {
        self.statuses.borrow_mut().push(text.to_string());
    }
}
