//! Terminal notification surface.

use colored::Colorize;

use crate::domain::Notifier;

/// Prints notifications and the status indicator to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier {
    quiet_status: bool,
}

impl ConsoleNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            quiet_status: false,
        }
    }

    /// Suppress status indicator output (used for machine-readable output).
    #[must_use]
    pub const fn without_status(mut self) -> Self {
        self.quiet_status = true;
        self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{} {}", "•".cyan().bold(), message);
    }

    fn show_status(&self, text: &str) {
        if self.quiet_status || text.is_empty() {
            return;
        }
        println!("{}", format!("[{text}]").dimmed());
    }
}
