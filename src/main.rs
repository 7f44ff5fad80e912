//! Bubbles - a rotating set of timestamped notes.
//!
//! Bubbles are markdown notes created in a configured folder of a vault,
//! walked through oldest to newest, and archived once dealt with.
//!
//! QUICK START:
//!   bubbles create                # New bubble, opened in the focused tab
//!   bubbles oldest                # Start with the oldest one
//!   bubbles next / previous       # Walk the set
//!   bubbles archive-next          # Archive this one, move on
//!   bubbles list -f table         # Everything still active

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    command_rows, format_bubble_count, format_bubbles_json, format_bubbles_markdown,
    format_bubbles_table, format_commands, format_tabs, BubbleCommand, BubbleManager,
    CommandStatus, OutputFormat,
};
use cli::{Cli, Commands, ConfigAction};
use domain::{AppConfig, TabTarget, Workspace};
use infrastructure::{ensure_config_exists, load_config, save_config, ConsoleNotifier, LocalWorkspace};

type Manager = BubbleManager<LocalWorkspace, ConsoleNotifier>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic. Returns whether the command succeeded.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let format = cli
        .output_format()
        .map_err(|message| domain::AppError::Config { message })?;

    let config_path = cli
        .config_file
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let vault = cli.vault;

    let (command, target) = match cli.command {
        // Config edits work on the file as saved, never on --vault.
        Commands::Config { action } => return cmd_config(action, config, &config_path),
        Commands::Paths => {
            cmd_paths(&with_vault(config, vault), &config_path);
            return Ok(true);
        }
        Commands::List { archived } => {
            return cmd_list(&open_manager(config, vault, format)?, archived, format)
        }
        Commands::Status => return cmd_status(&open_manager(config, vault, format)?),
        Commands::Commands => return cmd_commands(&open_manager(config, vault, format)?, format),
        Commands::Open { path, new_tab } => {
            return cmd_open(&mut open_manager(config, vault, format)?, &path, new_tab)
        }
        Commands::Tabs => return cmd_tabs(&open_manager(config, vault, format)?),
        Commands::Close => return cmd_close(&mut open_manager(config, vault, format)?),
        Commands::Create { new_tab } => {
            (BubbleCommand::CreateBubble, TabTarget::from_new_tab(new_tab))
        }
        Commands::Oldest => (BubbleCommand::OpenOldest, TabTarget::Current),
        Commands::Newest => (BubbleCommand::OpenMostRecent, TabTarget::Current),
        Commands::Next { new_tab } => (BubbleCommand::NextBubble, TabTarget::from_new_tab(new_tab)),
        Commands::Previous { new_tab } => {
            (BubbleCommand::PreviousBubble, TabTarget::from_new_tab(new_tab))
        }
        Commands::Archive => (BubbleCommand::ArchiveCurrent, TabTarget::Current),
        Commands::ArchiveNext => (BubbleCommand::ArchiveAndGoNext, TabTarget::Current),
        Commands::Run { id } => {
            let command = BubbleCommand::from_id(&id)
                .with_context(|| format!("unknown command id: {id}"))?;
            (command, TabTarget::Current)
        }
    };

    let mut manager = open_manager(config, vault, format)?;
    let status = command.run_in(&mut manager, target);
    report_status(&manager, status)
}

/// Apply the `--vault` override for this run only.
fn with_vault(mut config: AppConfig, vault: Option<PathBuf>) -> AppConfig {
    if let Some(vault) = vault {
        config.vault.root = Some(vault);
    }
    config
}

/// Open the vault and build the bubble manager over it.
fn open_manager(
    config: AppConfig,
    vault: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<Manager> {
    let config = with_vault(config, vault);
    let workspace = LocalWorkspace::open(&config).context("opening vault")?;
    let notifier = match format {
        OutputFormat::Json => ConsoleNotifier::new().without_status(),
        OutputFormat::Markdown | OutputFormat::Table => ConsoleNotifier::new(),
    };
    Ok(BubbleManager::new(config.bubbles, workspace, notifier))
}

/// Print where the session ended up after a bubble command.
fn report_status(manager: &Manager, status: CommandStatus) -> anyhow::Result<bool> {
    match status {
        CommandStatus::Completed => {
            if let Some(doc) = manager.workspace().active_document()? {
                println!("{} {}", "→".green().bold(), doc.path.cyan());
            }
        }
        CommandStatus::NotAvailable => {
            println!(
                "{} Not available: the current document is not an active bubble.",
                "!".yellow().bold()
            );
        }
        CommandStatus::Declined | CommandStatus::Failed => {}
    }

    Ok(status.is_success())
}

/// List bubbles command.
fn cmd_list(manager: &Manager, archived: bool, format: OutputFormat) -> anyhow::Result<bool> {
    let (title, bubbles) = if archived {
        ("Archived bubbles", manager.archived_bubbles_sorted()?)
    } else {
        ("Bubbles", manager.active_bubbles_sorted()?)
    };

    let output = match format {
        OutputFormat::Markdown => format_bubbles_markdown(title, &bubbles),
        OutputFormat::Json => format_bubbles_json(&bubbles).map_err(domain::AppError::json_parse)?,
        OutputFormat::Table => format_bubbles_table(&bubbles),
    };

    println!("{output}");
    Ok(true)
}

/// Show the bubble count indicator.
fn cmd_status(manager: &Manager) -> anyhow::Result<bool> {
    let count = manager.bubble_count()?;
    let text = format_bubble_count(count);
    if text.is_empty() {
        println!("{}", "No bubbles.".dimmed());
    } else {
        println!("{text}");
    }
    Ok(true)
}

/// Show the command registry.
fn cmd_commands(manager: &Manager, format: OutputFormat) -> anyhow::Result<bool> {
    let rows = command_rows(manager)?;
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).map_err(domain::AppError::json_parse)?
            );
        }
        OutputFormat::Markdown | OutputFormat::Table => println!("{}", format_commands(&rows)),
    }
    Ok(true)
}

/// Open a document in a tab.
fn cmd_open(manager: &mut Manager, path: &str, new_tab: bool) -> anyhow::Result<bool> {
    let path = domain::normalize_path(path);
    if !manager.workspace().exists(&path) {
        anyhow::bail!("No such document: {path}");
    }

    manager
        .workspace_mut()
        .open(&path, TabTarget::from_new_tab(new_tab))?;

    let state = manager.workspace().active_document()?.map(|doc| manager.classify(&doc));
    let state = state.map_or_else(String::new, |s| format!(" ({s})"));
    println!("{} {}{}", "→".green().bold(), path.cyan(), state.dimmed());
    Ok(true)
}

/// List open tabs.
fn cmd_tabs(manager: &Manager) -> anyhow::Result<bool> {
    let tabs = manager.workspace().open_tabs()?;
    let active = manager.workspace().active_tab_id()?;
    println!("{}", format_tabs(&tabs, active));
    Ok(true)
}

/// Close the focused tab.
fn cmd_close(manager: &mut Manager) -> anyhow::Result<bool> {
    manager.workspace_mut().close_active_tab()?;
    match manager.workspace().active_document()? {
        Some(doc) => println!("{} {}", "→".green().bold(), doc.path.cyan()),
        None => println!("{}", "No open tabs.".dimmed()),
    }
    Ok(true)
}

/// Show or update folder settings.
fn cmd_config(
    action: ConfigAction,
    mut config: AppConfig,
    config_path: &std::path::Path,
) -> anyhow::Result<bool> {
    match action {
        ConfigAction::Show => {
            if config_path.exists() {
                println!("{} {}", "Config:".bold(), config_path.display());
            } else {
                println!(
                    "{} {} {}",
                    "Config:".bold(),
                    config_path.display(),
                    "(not created, defaults in effect)".dimmed()
                );
            }
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Init => {
            ensure_config_exists(config_path)?;
            println!("{} {}", "✓".green().bold(), config_path.display());
        }
        ConfigAction::SetFolder { path } => {
            config.bubbles.folder = path;
            save_config(&config, config_path)?;
            println!("{} folder = {}", "✓".green().bold(), config.bubbles.folder_path());
        }
        ConfigAction::SetArchive { path } => {
            config.bubbles.archive_folder = path;
            save_config(&config, config_path)?;
            println!(
                "{} archive_folder = {}",
                "✓".green().bold(),
                config.bubbles.archive_folder_path()
            );
        }
    }
    Ok(true)
}

/// Show paths command.
fn cmd_paths(config: &AppConfig, config_path: &std::path::Path) {
    let vault: PathBuf = config.vault_root();

    println!("{}", "📂 Bubbles Paths".bold());
    println!();
    println!("  {}   {}", "config".green(), config_path.display());
    println!("  {}    {}", "vault".green(), vault.display());
    println!("  {}  {}", "session".green(), config.session_db_path().display());
    println!("  {}  {}", "bubbles".blue(), config.bubbles.folder_path());
    println!("  {}  {}", "archive".blue(), config.bubbles.archive_folder_path());
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
