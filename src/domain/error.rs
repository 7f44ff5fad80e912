//! Domain-level error types for bubbles.
//!
//! Two families of failure exist: user preconditions (nothing to act on,
//! wrong document focused) and host storage failures. Preconditions are
//! reported to the user and never abort the process.

use thiserror::Error;

/// A user-facing precondition that stopped an operation before any effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// The bubble set is empty.
    NoBubbles,
    /// The focused document is not an active bubble (navigation).
    NotInActiveBubble,
    /// Navigating to the previous bubble from the oldest one.
    NoBubbleBefore,
    /// Navigating to the next bubble from the newest one.
    NoBubbleAfter,
    /// Nothing is focused.
    NoActiveDocument,
    /// The focused document is archived or outside the bubble folder.
    NotAnActiveBubble,
}

impl Precondition {
    /// Message shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoBubbles => "Could not find any bubbles.",
            Self::NotInActiveBubble => "Currently not in an active bubble.",
            Self::NoBubbleBefore => "There's no bubble before this one.",
            Self::NoBubbleAfter => "There's no bubble after this one.",
            Self::NoActiveDocument => "No active bubble to archive.",
            Self::NotAnActiveBubble => "Current note is not a bubble or is already archived.",
        }
    }
}

impl std::fmt::Display for Precondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// What the manager was doing when the host rejected a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Create,
    Open,
    Archive,
}

impl Stage {
    /// Generic message shown to the user when this stage fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Error creating bubble. Check the log for more details.",
            Self::Open => "Error opening bubble. Check the log for more details.",
            Self::Archive => "Error archiving bubble. Check the log for more details.",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Create => "creating",
            Self::Open => "opening",
            Self::Archive => "archiving",
        })
    }
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Operation refused before touching storage.
    #[error("{0}")]
    Precondition(Precondition),

    /// The document store rejected a create, move or folder operation.
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Failed to open or query the session database.
    #[error("Session error: {message}")]
    Session {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON serialization failed.
    #[error("JSON error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A host failure tagged with the step it interrupted.
    #[error("Failed while {stage} bubble: {source}")]
    During {
        stage: Stage,
        #[source]
        source: Box<AppError>,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create a storage error with context.
    pub fn storage(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create a storage error without an underlying IO cause.
    pub fn storage_msg(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a session error from rusqlite error.
    pub fn session(err: rusqlite::Error) -> Self {
        Self::Session {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Create a JSON error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Tag this error with the step it interrupted.
    #[must_use]
    pub fn during(self, stage: Stage) -> Self {
        match self {
            Self::During { .. } | Self::Precondition(_) => self,
            other => Self::During {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The step this error interrupted, if known.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::During { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }
}

impl From<Precondition> for AppError {
    fn from(p: Precondition) -> Self {
        Self::Precondition(p)
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
