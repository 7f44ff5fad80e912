//! Application layer - use cases and orchestration.
//!
//! This layer contains the bubble set logic, the command registry
//! and output formatting.

pub mod bubble_manager;
pub mod commands;
pub mod formatter;

pub use bubble_manager::BubbleManager;
pub use commands::{command_rows, BubbleCommand, CommandStatus};
pub use formatter::{
    format_bubble_count, format_bubbles_json, format_bubbles_markdown, format_bubbles_table,
    format_commands, format_tabs, OutputFormat,
};
