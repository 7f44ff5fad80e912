//! Configuration models and folder classification rules.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::models::{is_within_folder, normalize_path, BubbleState, Document, BUBBLE_EXTENSION};

/// Folder settings for bubbles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubblesConfig {
    /// Folder holding active bubbles.
    #[serde(default = "default_folder")]
    pub folder: String,

    /// Folder archived bubbles are moved into.
    #[serde(default = "default_archive_folder")]
    pub archive_folder: String,
}

impl Default for BubblesConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            archive_folder: default_archive_folder(),
        }
    }
}

fn default_folder() -> String {
    "plugins/bubbles".to_string()
}

fn default_archive_folder() -> String {
    "plugins/bubbles/archive".to_string()
}

impl BubblesConfig {
    /// Create a configuration from the two folder paths.
    #[cfg(test)]
    #[must_use]
    pub fn new(folder: impl Into<String>, archive_folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            archive_folder: archive_folder.into(),
        }
    }

    /// Normalized active folder.
    #[must_use]
    pub fn folder_path(&self) -> String {
        normalize_path(&self.folder)
    }

    /// Normalized archive folder.
    #[must_use]
    pub fn archive_folder_path(&self) -> String {
        normalize_path(&self.archive_folder)
    }

    /// Whether a document is an active bubble: markdown, inside the
    /// bubble folder and outside the archive folder.
    #[must_use]
    pub fn is_active_bubble(&self, doc: &Document) -> bool {
        self.classify(doc) == BubbleState::Active
    }

    /// Classify a document against the folders.
    #[must_use]
    pub fn classify(&self, doc: &Document) -> BubbleState {
        if doc.extension != BUBBLE_EXTENSION {
            return BubbleState::Unmanaged;
        }

        if is_within_folder(&doc.path, &self.archive_folder_path()) {
            BubbleState::Archived
        } else if is_within_folder(&doc.path, &self.folder_path()) {
            BubbleState::Active
        } else {
            BubbleState::Unmanaged
        }
    }
}

/// Vault location.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VaultConfig {
    /// Root directory of the vault (defaults to the working directory).
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Bubble folder settings.
    #[serde(default)]
    pub bubbles: BubblesConfig,

    /// Vault configuration.
    #[serde(default)]
    pub vault: VaultConfig,
}

impl AppConfig {
    /// Get the vault root, using the working directory if not configured.
    #[must_use]
    pub fn vault_root(&self) -> PathBuf {
        self.vault
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bubbles")
    }

    /// Get the default config file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        Self::default_data_dir().join("config.toml")
    }

    /// Directory inside the vault holding host state.
    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        self.vault_root().join(".bubbles")
    }

    /// Get the session database path.
    #[must_use]
    pub fn session_db_path(&self) -> PathBuf {
        self.state_dir().join("session.db")
    }
}
