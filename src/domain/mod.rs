//! Domain layer - core types and host ports.
//!
//! This layer contains pure domain models, configuration, error types
//! and the traits the host must implement, without any I/O.

pub mod config;
pub mod error;
pub mod models;
pub mod workspace;

pub use config::{AppConfig, BubblesConfig};
pub use error::{AppError, Precondition, Result, Stage};
pub use models::{
    join_path, normalize_path, Age, Bubble, BubbleState, Direction, Document, Tab, TabId,
    TabTarget, ViewKind,
};
pub use workspace::{Notifier, Workspace};
