//! Workspace session persistence.
//!
//! Records which documents are open in tabs and which tab has focus,
//! so that "the current bubble" survives between invocations.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{AppError, Result, Tab, TabId};

/// Tab session stored in SQLite.
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    /// Opens or creates the session database.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or schema creation fails.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create session directory", e))?;
        }

        let conn = Connection::open(path).map_err(AppError::session)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(AppError::session)?;

        let store = Self { conn };
        store.init_schema()?;

        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            CREATE TABLE IF NOT EXISTS tabs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                path TEXT NOT NULL,
                opened_at TEXT NOT NULL
            );

            -- Single row holding the focused tab
            CREATE TABLE IF NOT EXISTS session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                active_tab INTEGER
            );

            INSERT OR IGNORE INTO session (id) VALUES (1);
            ",
            )
            .map_err(AppError::session)?;

        Ok(())
    }

    /// All open tabs in opening order.
    pub fn tabs(&self) -> Result<Vec<Tab>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, path FROM tabs ORDER BY id")
            .map_err(AppError::session)?;

        let tabs = stmt
            .query_map([], |row| Ok(Tab::new(row.get(0)?, row.get::<_, String>(1)?)))
            .map_err(AppError::session)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(AppError::session)?;

        Ok(tabs)
    }

    /// The focused tab, if it still exists.
    pub fn active_tab(&self) -> Result<Option<Tab>> {
        self.conn
            .query_row(
                "SELECT t.id, t.path FROM session s JOIN tabs t ON t.id = s.active_tab
                 WHERE s.id = 1",
                [],
                |row| Ok(Tab::new(row.get(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(AppError::session)
    }

    fn set_active(&self, id: Option<TabId>) -> Result<()> {
        self.conn
            .execute("UPDATE session SET active_tab = ?1 WHERE id = 1", params![id])
            .map_err(AppError::session)?;
        Ok(())
    }

    /// Open `path` in a new focused tab.
    pub fn open_new(&self, path: &str) -> Result<TabId> {
        self.conn
            .execute(
                "INSERT INTO tabs (path, opened_at) VALUES (?1, ?2)",
                params![path, Utc::now().to_rfc3339()],
            )
            .map_err(AppError::session)?;

        let id = self.conn.last_insert_rowid();
        self.set_active(Some(id))?;
        tracing::debug!(tab = id, path, "Opened new tab");
        Ok(id)
    }

    /// Show `path` in the focused tab, opening one if none has focus.
    pub fn open_in_current(&self, path: &str) -> Result<TabId> {
        let Some(tab) = self.active_tab()? else {
            return self.open_new(path);
        };

        self.conn
            .execute(
                "UPDATE tabs SET path = ?1, opened_at = ?2 WHERE id = ?3",
                params![path, Utc::now().to_rfc3339(), tab.id],
            )
            .map_err(AppError::session)?;

        tracing::debug!(tab = tab.id, path, "Replaced tab content");
        Ok(tab.id)
    }

    /// Focus an existing tab.
    ///
    /// # Errors
    /// Returns error if no tab has this id.
    pub fn activate(&self, id: TabId) -> Result<()> {
        let exists = self
            .conn
            .query_row("SELECT 1 FROM tabs WHERE id = ?1", [id], |_| Ok(()))
            .optional()
            .map_err(AppError::session)?
            .is_some();

        if !exists {
            return Err(AppError::storage_msg(format!("No such tab: {id}")));
        }

        self.set_active(Some(id))
    }

    /// Close the focused tab; focus moves to the most recently opened
    /// remaining tab.
    pub fn close_active(&self) -> Result<Option<Tab>> {
        let Some(tab) = self.active_tab()? else {
            return Ok(None);
        };

        self.conn
            .execute("DELETE FROM tabs WHERE id = ?1", [tab.id])
            .map_err(AppError::session)?;

        let next: Option<TabId> = self
            .conn
            .query_row("SELECT MAX(id) FROM tabs", [], |row| row.get(0))
            .map_err(AppError::session)?;
        self.set_active(next)?;

        tracing::debug!(tab = tab.id, "Closed tab");
        Ok(Some(tab))
    }

    /// Point tabs showing `from` at `to`.
    pub fn rename_path(&self, from: &str, to: &str) -> Result<usize> {
        self.conn
            .execute("UPDATE tabs SET path = ?1 WHERE path = ?2", params![to, from])
            .map_err(AppError::session)
    }
}
