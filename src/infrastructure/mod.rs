//! Infrastructure layer - host adapters (filesystem vault, session, terminal).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod config;
pub mod local_workspace;
#[cfg(test)]
pub mod memory;
pub mod notifier;
pub mod session_store;
pub mod vault;

pub use config::{ensure_config_exists, load_config, save_config};
pub use local_workspace::LocalWorkspace;
pub use notifier::ConsoleNotifier;
