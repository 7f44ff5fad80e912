//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::OutputFormat;

/// Bubbles - a rotating set of timestamped notes.
///
/// Quick loop: bubbles newest | next | archive-next
#[derive(Parser, Debug)]
#[command(name = "bubbles")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format for listings: markdown, json, or table.
    #[arg(short, long, default_value = "markdown", global = true)]
    pub format: String,

    /// Vault directory (overrides the configured root).
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Configuration file (defaults to ~/.bubbles/config.toml).
    #[arg(long = "config", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new bubble and open it.
    Create {
        /// Open in a new tab instead of the focused one.
        #[arg(short, long)]
        new_tab: bool,
    },

    /// Open the oldest bubble (creates one if there are none).
    Oldest,

    /// Open the most recent bubble (creates one if there are none).
    Newest,

    /// Go to the next bubble.
    Next {
        /// Open in a new tab instead of the focused one.
        #[arg(short, long)]
        new_tab: bool,
    },

    /// Go to the previous bubble.
    Previous {
        /// Open in a new tab instead of the focused one.
        #[arg(short, long)]
        new_tab: bool,
    },

    /// Archive the current bubble.
    Archive,

    /// Archive the current bubble and go to the next one.
    ArchiveNext,

    /// Run a command by id (see `bubbles commands`).
    Run {
        /// Command id, e.g. archive-current-bubble-go-next.
        id: String,
    },

    /// List bubbles, oldest first.
    List {
        /// List archived bubbles instead of active ones.
        #[arg(short, long)]
        archived: bool,
    },

    /// Show the bubble count indicator.
    Status,

    /// Show all commands and whether they apply right now.
    Commands,

    /// Open a vault document (makes it the current document).
    Open {
        /// Vault-relative path of the document.
        path: String,

        /// Open in a new tab instead of the focused one.
        #[arg(short, long)]
        new_tab: bool,
    },

    /// List open tabs.
    Tabs,

    /// Close the focused tab.
    Close,

    /// Show or change folder settings.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show the paths being used.
    Paths,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the saved configuration (defaults if there is no file).
    Show,

    /// Write a commented default configuration file if none exists.
    Init,

    /// Set the folder holding active bubbles.
    SetFolder { path: String },

    /// Set the folder archived bubbles are moved into.
    SetArchive { path: String },
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }
}
