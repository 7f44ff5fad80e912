//! Filesystem-backed document store.
//!
//! A vault is a directory tree; documents are its files, addressed by
//! `/`-separated paths relative to the root. Hidden entries (leading
//! `.`) are not part of the vault.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{AppError, Document, Result};

/// Document store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    /// Create a vault over an existing directory.
    ///
    /// # Errors
    /// Returns error if `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AppError::Config {
                message: format!("Vault directory not found: {}", root.display()),
            });
        }
        tracing::debug!(root = %root.display(), "Opened vault");
        Ok(Self { root })
    }

    /// Resolve a vault path to a filesystem path, rejecting escapes.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut resolved = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if segment == ".." || segment == "." {
                return Err(AppError::storage_msg(format!("Invalid vault path: {path}")));
            }
            resolved.push(segment);
        }
        Ok(resolved)
    }

    /// List every document under the root.
    ///
    /// # Errors
    /// Returns error if the root cannot be read.
    pub fn list(&self) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        collect_documents(&self.root, "", &mut documents)?;
        Ok(documents)
    }

    /// Load a single document's metadata.
    ///
    /// # Errors
    /// Returns error if the file does not exist or is not a file.
    pub fn document(&self, path: &str) -> Result<Document> {
        let full = self.resolve(path)?;
        let metadata = fs::metadata(&full)
            .map_err(|e| AppError::storage(format!("Failed to stat {path}"), e))?;
        if !metadata.is_file() {
            return Err(AppError::storage_msg(format!("Not a document: {path}")));
        }
        Ok(Document::new(path, creation_time(&metadata)))
    }

    /// Whether any entry occupies `path`.
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.exists())
    }

    /// Create a folder and its parents; an existing folder is fine.
    ///
    /// # Errors
    /// Returns error if the folder cannot be created.
    pub fn create_folder(&self, path: &str) -> Result<()> {
        let full = self.resolve(path)?;
        fs::create_dir_all(&full)
            .map_err(|e| AppError::storage(format!("Failed to create folder {path}"), e))
    }

    /// Create a new document, refusing to overwrite.
    ///
    /// # Errors
    /// Returns error if the path is occupied or the file cannot be written.
    pub fn create_document(&self, path: &str, content: &str) -> Result<Document> {
        use std::io::Write;

        let full = self.resolve(path)?;
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .map_err(|e| AppError::storage(format!("Failed to create {path}"), e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| AppError::storage(format!("Failed to write {path}"), e))?;

        let metadata = file
            .metadata()
            .map_err(|e| AppError::storage(format!("Failed to stat {path}"), e))?;
        Ok(Document::new(path, creation_time(&metadata)))
    }

    /// Move a document; the destination must be free.
    ///
    /// # Errors
    /// Returns error if the source is missing, the destination is taken,
    /// or the rename fails.
    pub fn rename_document(&self, from: &str, to: &str) -> Result<()> {
        let source = self.resolve(from)?;
        let dest = self.resolve(to)?;

        if !source.is_file() {
            return Err(AppError::storage_msg(format!("No such document: {from}")));
        }
        if dest.exists() {
            return Err(AppError::storage(
                format!("Cannot move {from}: {to} already exists"),
                std::io::Error::from(ErrorKind::AlreadyExists),
            ));
        }

        fs::rename(&source, &dest)
            .map_err(|e| AppError::storage(format!("Failed to move {from} to {to}"), e))
    }
}

/// Creation time, falling back to modification time where the
/// filesystem does not record birth times.
fn creation_time(metadata: &fs::Metadata) -> DateTime<Utc> {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_default()
}

fn collect_documents(dir: &Path, prefix: &str, out: &mut Vec<Document>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::io(format!("Failed to read {}", dir.display()), e))?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        let rel = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };

        let Ok(metadata) = entry.metadata() else {
            tracing::warn!(path = %rel, "Skipping unreadable entry");
            continue;
        };

        if metadata.is_dir() {
            collect_documents(&entry.path(), &rel, out)?;
        } else if metadata.is_file() {
            out.push(Document::new(rel, creation_time(&metadata)));
        }
    }

    Ok(())
}
