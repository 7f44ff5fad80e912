//! Output formatting for bubbles, tabs and commands.
//!
//! Supports multiple output formats: Markdown, JSON, and table view.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;

use crate::domain::{Bubble, Tab, TabId};

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable Markdown format.
    #[default]
    Markdown,
    /// JSON format for programmatic use.
    Json,
    /// Compact table listing.
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            _ => Err(format!("Unknown format: {s}. Use: markdown, json, table")),
        }
    }
}

/// Status indicator text: blank for none, then `1 bubble`, `N bubbles`.
#[must_use]
pub fn format_bubble_count(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => "1 bubble".to_string(),
        n => format!("{n} bubbles"),
    }
}

/// Formats bubbles as a Markdown list, oldest first.
pub fn format_bubbles_markdown(title: &str, bubbles: &[Bubble]) -> String {
    let mut out = format!("# {title}\n\n");

    if bubbles.is_empty() {
        out.push_str("_No bubbles._\n");
        return out;
    }

    for (i, bubble) in bubbles.iter().enumerate() {
        out.push_str(&format!(
            "{}. [{}]({}) - {}\n",
            i + 1,
            bubble.name.trim_end_matches(".md"),
            bubble.path.replace(' ', "%20"),
            bubble.created.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    out
}

/// Formats bubbles as JSON.
pub fn format_bubbles_json(bubbles: &[Bubble]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(bubbles)
}

/// Formats bubbles as a table.
pub fn format_bubbles_table(bubbles: &[Bubble]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Name", "Created", "State", "Path"]);

    for (i, bubble) in bubbles.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            bubble.name.clone(),
            bubble.created.format("%Y-%m-%d %H:%M:%S").to_string(),
            bubble.state.to_string(),
            bubble.path.clone(),
        ]);
    }

    table.to_string()
}

/// Formats open tabs, marking the focused one.
pub fn format_tabs(tabs: &[Tab], active: Option<TabId>) -> String {
    if tabs.is_empty() {
        return "No open tabs.".dimmed().to_string();
    }

    tabs.iter()
        .map(|tab| {
            if Some(tab.id) == active {
                format!("{} {:>3}  {}", "*".green().bold(), tab.id, tab.path.bold())
            } else {
                format!("  {:>3}  {}", tab.id, tab.path)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One row of the command listing.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRow {
    pub id: &'static str,
    pub name: &'static str,
    pub available: bool,
}

/// Formats the command registry with current availability.
pub fn format_commands(rows: &[CommandRow]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Command", "Name", "Available"]);

    for row in rows {
        table.add_row(vec![
            row.id.to_string(),
            row.name.to_string(),
            if row.available { "yes" } else { "no" }.to_string(),
        ]);
    }

    table.to_string()
}
