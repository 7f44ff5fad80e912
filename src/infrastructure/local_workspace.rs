//! Local host: a filesystem vault plus a persisted tab session.

use crate::domain::{AppConfig, Document, Result, Tab, TabId, TabTarget, Workspace};

use super::session_store::SessionStore;
use super::vault::FsVault;

/// Workspace over a directory on disk.
pub struct LocalWorkspace {
    vault: FsVault,
    session: SessionStore,
}

impl LocalWorkspace {
    #[must_use]
    pub const fn new(vault: FsVault, session: SessionStore) -> Self {
        Self { vault, session }
    }

    /// Open the vault and session named by the configuration.
    ///
    /// # Errors
    /// Returns error if the vault root is missing or the session
    /// database cannot be opened.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let vault = FsVault::open(config.vault_root())?;
        let session = SessionStore::open(&config.session_db_path())?;
        Ok(Self::new(vault, session))
    }

    /// Id of the focused tab.
    pub fn active_tab_id(&self) -> Result<Option<TabId>> {
        Ok(self.session.active_tab()?.map(|t| t.id))
    }
}

impl Workspace for LocalWorkspace {
    fn documents(&self) -> Result<Vec<Document>> {
        self.vault.list()
    }

    fn exists(&self, path: &str) -> bool {
        self.vault.exists(path)
    }

    fn create_folder(&mut self, path: &str) -> Result<()> {
        self.vault.create_folder(path)
    }

    fn create_document(&mut self, path: &str, content: &str) -> Result<Document> {
        self.vault.create_document(path, content)
    }

    fn rename_document(&mut self, from: &str, to: &str) -> Result<()> {
        self.vault.rename_document(from, to)?;
        self.session.rename_path(from, to)?;
        Ok(())
    }

    fn active_document(&self) -> Result<Option<Document>> {
        let Some(tab) = self.session.active_tab()? else {
            return Ok(None);
        };

        match self.vault.document(&tab.path) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                tracing::debug!(path = %tab.path, error = %e, "Focused tab has no document");
                Ok(None)
            }
        }
    }

    fn open_tabs(&self) -> Result<Vec<Tab>> {
        self.session.tabs()
    }

    fn open(&mut self, path: &str, target: TabTarget) -> Result<()> {
        match target {
            TabTarget::Current => self.session.open_in_current(path)?,
            TabTarget::New => self.session.open_new(path)?,
        };
        Ok(())
    }

    fn activate_tab(&mut self, id: TabId) -> Result<()> {
        self.session.activate(id)
    }

    fn close_active_tab(&mut self) -> Result<()> {
        self.session.close_active()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::BubbleManager;
    use crate::domain::config::VaultConfig;
    use crate::domain::{BubblesConfig, Direction};
    use crate::infrastructure::memory::RecordingNotifier;
    use tempfile::tempdir;

    fn config_for(root: &std::path::Path) -> AppConfig {
        AppConfig {
            bubbles: BubblesConfig::new("bubbles", "bubbles/archive"),
            vault: VaultConfig {
                root: Some(root.to_path_buf()),
            },
        }
    }

    #[test]
    fn test_rename_keeps_tab_on_document() {
        let dir = tempdir().unwrap();
        let mut workspace = LocalWorkspace::open(&config_for(dir.path())).unwrap();

        workspace.create_folder("bubbles").unwrap();
        workspace.create_document("bubbles/a.md", "").unwrap();
        workspace.open("bubbles/a.md", TabTarget::Current).unwrap();
        workspace
            .rename_document("bubbles/a.md", "bubbles/a2.md")
            .unwrap();

        let active = workspace.active_document().unwrap().unwrap();
        assert_eq!(active.path, "bubbles/a2.md");
    }

    #[test]
    fn test_stale_tab_has_no_active_document() {
        let dir = tempdir().unwrap();
        let mut workspace = LocalWorkspace::open(&config_for(dir.path())).unwrap();
        workspace.open("gone.md", TabTarget::Current).unwrap();
        assert!(workspace.active_document().unwrap().is_none());
        assert_eq!(workspace.open_tabs().unwrap().len(), 1);
    }

    #[test]
    fn test_manager_over_real_vault() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path());
        let workspace = LocalWorkspace::open(&config).unwrap();
        let mut manager =
            BubbleManager::new(config.bubbles.clone(), workspace, RecordingNotifier::default());

        let created = manager.create_bubble(TabTarget::Current).unwrap();
        assert!(dir.path().join(&created.path).is_file());
        assert!(manager.is_current_document_active_bubble().unwrap());

        let advance = manager.archive_and_open_next().unwrap().unwrap();
        assert!(advance.opened.is_none());
        assert!(dir
            .path()
            .join("bubbles/archive")
            .join(&created.name)
            .is_file());
        assert_eq!(manager.bubble_count().unwrap(), 0);
        assert!(manager.workspace().active_tab_id().unwrap().is_none());
        assert!(manager.adjacent_bubble(Direction::Next).unwrap().is_none());
    }
}
