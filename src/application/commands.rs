//! Command registry.
//!
//! Each user-facing command has a stable id, a display name and an
//! optional gate. Storage failures are caught here, logged, and shown
//! to the user as a generic message.

use crate::domain::{Age, AppError, Direction, Notifier, Result, Stage, TabTarget, Workspace};

use super::bubble_manager::{AgeOutcome, BubbleManager};
use super::formatter::CommandRow;

/// How a command invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The command did what it was asked.
    Completed,
    /// A precondition stopped it; the user has been told why.
    Declined,
    /// The gate was closed, nothing ran.
    NotAvailable,
    /// The host rejected a storage call.
    Failed,
}

impl CommandStatus {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Commands exposed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleCommand {
    CreateBubble,
    OpenOldest,
    OpenMostRecent,
    NextBubble,
    PreviousBubble,
    ArchiveCurrent,
    ArchiveAndGoNext,
}

impl BubbleCommand {
    pub const ALL: [Self; 7] = [
        Self::CreateBubble,
        Self::OpenOldest,
        Self::OpenMostRecent,
        Self::NextBubble,
        Self::PreviousBubble,
        Self::ArchiveCurrent,
        Self::ArchiveAndGoNext,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::CreateBubble => "create-bubble",
            Self::OpenOldest => "open-oldest-bubble",
            Self::OpenMostRecent => "open-most-recent-bubble",
            Self::NextBubble => "next-bubble",
            Self::PreviousBubble => "previous-bubble",
            Self::ArchiveCurrent => "archive-current-bubble",
            Self::ArchiveAndGoNext => "archive-current-bubble-go-next",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateBubble => "Create bubble",
            Self::OpenOldest => "Open oldest bubble",
            Self::OpenMostRecent => "Open most recent bubble",
            Self::NextBubble => "Go to next bubble",
            Self::PreviousBubble => "Go to previous bubble",
            Self::ArchiveCurrent => "Archive current bubble",
            Self::ArchiveAndGoNext => "Archive current bubble and go to next",
        }
    }

    /// Look up a command by id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Whether the command only applies while an active bubble is focused.
    #[must_use]
    pub const fn requires_active_bubble(self) -> bool {
        matches!(
            self,
            Self::NextBubble | Self::PreviousBubble | Self::ArchiveCurrent | Self::ArchiveAndGoNext
        )
    }

    /// Step assumed for failures that carry no stage of their own.
    const fn default_stage(self) -> Stage {
        match self {
            Self::CreateBubble => Stage::Create,
            Self::OpenOldest | Self::OpenMostRecent | Self::NextBubble | Self::PreviousBubble => {
                Stage::Open
            }
            Self::ArchiveCurrent | Self::ArchiveAndGoNext => Stage::Archive,
        }
    }

    /// Message for a failed run, picked from the step that failed.
    fn failure_message(self, error: &AppError) -> &'static str {
        error
            .stage()
            .unwrap_or_else(|| self.default_stage())
            .failure_message()
    }

    /// Evaluate the command's gate.
    ///
    /// # Errors
    /// Returns an error if the focused document cannot be queried.
    pub fn is_available<W: Workspace, N: Notifier>(
        self,
        manager: &BubbleManager<W, N>,
    ) -> Result<bool> {
        if self.requires_active_bubble() {
            manager.is_current_document_active_bubble()
        } else {
            Ok(true)
        }
    }

    /// Run the command, opening results in the focused tab.
    #[cfg(test)]
    pub fn run<W: Workspace, N: Notifier>(self, manager: &mut BubbleManager<W, N>) -> CommandStatus {
        self.run_in(manager, TabTarget::Current)
    }

    /// Run the command; `target` applies to creation and navigation.
    pub fn run_in<W: Workspace, N: Notifier>(
        self,
        manager: &mut BubbleManager<W, N>,
        target: TabTarget,
    ) -> CommandStatus {
        match self.is_available(manager) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(command = self.id(), "Command not available");
                return CommandStatus::NotAvailable;
            }
            Err(e) => return self.failed(manager, &e),
        }

        let result = match self {
            Self::CreateBubble => manager.create_bubble(target).map(|_| true),
            Self::OpenOldest => manager.open_bubble_by_age(Age::Oldest).map(log_age_outcome),
            Self::OpenMostRecent => manager.open_bubble_by_age(Age::Newest).map(log_age_outcome),
            Self::NextBubble => manager
                .open_adjacent_bubble(Direction::Next, target)
                .map(|b| b.is_some()),
            Self::PreviousBubble => manager
                .open_adjacent_bubble(Direction::Previous, target)
                .map(|b| b.is_some()),
            Self::ArchiveCurrent => manager.archive_current_bubble().map(|b| b.is_some()),
            Self::ArchiveAndGoNext => manager.archive_and_open_next().map(|advance| {
                advance.is_some_and(|a| {
                    tracing::info!(
                        archived = %a.archived.path,
                        opened = a.opened.as_ref().map_or("(tab closed)", |b| b.path.as_str()),
                        "Archived and advanced"
                    );
                    true
                })
            }),
        };

        match result {
            Ok(true) => CommandStatus::Completed,
            Ok(false) => CommandStatus::Declined,
            Err(e) => self.failed(manager, &e),
        }
    }

    fn failed<W: Workspace, N: Notifier>(
        self,
        manager: &BubbleManager<W, N>,
        error: &AppError,
    ) -> CommandStatus {
        tracing::error!(command = self.id(), error = %error, "Command failed");
        manager.notifier().notify(self.failure_message(error));
        CommandStatus::Failed
    }
}

fn log_age_outcome(outcome: AgeOutcome) -> bool {
    match outcome {
        AgeOutcome::Created(b) => tracing::info!(path = %b.path, "Bubble set was empty, created one"),
        AgeOutcome::Activated(b) => tracing::debug!(path = %b.path, "Focused existing tab"),
        AgeOutcome::Opened(b) => tracing::debug!(path = %b.path, "Opened bubble"),
    }
    true
}

/// Every command with its current availability.
///
/// # Errors
/// Returns an error if the focused document cannot be queried.
pub fn command_rows<W: Workspace, N: Notifier>(
    manager: &BubbleManager<W, N>,
) -> Result<Vec<CommandRow>> {
    let active = manager.is_current_document_active_bubble()?;

    Ok(BubbleCommand::ALL
        .into_iter()
        .map(|command| CommandRow {
            id: command.id(),
            name: command.name(),
            available: !command.requires_active_bubble() || active,
        })
        .collect())
}
