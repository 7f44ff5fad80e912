//! Bubble set management.
//!
//! Classifies vault documents into the active bubble set, orders it by
//! creation time and implements create, navigate and archive on top of
//! the host [`Workspace`]. Nothing is cached: every call re-reads the
//! vault and sorts, which is fine for note collections in the hundreds.

use chrono::{Local, NaiveDateTime, Timelike};

use crate::domain::{
    join_path, Age, AppError, Bubble, BubbleState, BubblesConfig, Direction, Document, Notifier,
    Precondition, Result, Stage, TabTarget, ViewKind, Workspace,
};

use super::formatter::format_bubble_count;

/// Prefix of every generated bubble file name.
const BUBBLE_PREFIX: &str = "[Bubble]";

/// Result of opening the oldest or newest bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeOutcome {
    /// The set was empty, so a fresh bubble was created.
    Created(Bubble),
    /// The bubble was already open; its tab was focused.
    Activated(Bubble),
    /// The bubble was opened in the focused tab.
    Opened(Bubble),
}

/// Result of archiving the current bubble and moving on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// The bubble that was archived, at its new path.
    pub archived: Bubble,
    /// The bubble now shown, or `None` when the tab was closed.
    pub opened: Option<Bubble>,
}

/// File stem for a bubble created at `now`: `[Bubble] YYYY-MM-DD HMS`.
///
/// Time components are not zero-padded.
#[must_use]
pub fn bubble_file_stem(now: &NaiveDateTime) -> String {
    format!(
        "{BUBBLE_PREFIX} {} {}{}{}",
        now.format("%Y-%m-%d"),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Candidate file name for the `attempt`-th try (0 is the plain name).
fn candidate_name(stem: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{stem}.md")
    } else {
        format!("{stem} ({attempt}).md")
    }
}

/// Manages the bubble set of one vault.
pub struct BubbleManager<W, N> {
    config: BubblesConfig,
    workspace: W,
    notifier: N,
}

impl<W: Workspace, N: Notifier> BubbleManager<W, N> {
    /// Create a manager over a host workspace.
    #[must_use]
    pub const fn new(config: BubblesConfig, workspace: W, notifier: N) -> Self {
        Self {
            config,
            workspace,
            notifier,
        }
    }

    #[must_use]
    pub const fn workspace(&self) -> &W {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut W {
        &mut self.workspace
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Classify a document against the configured folders.
    #[must_use]
    pub fn classify(&self, doc: &Document) -> BubbleState {
        self.config.classify(doc)
    }

    /// Active bubbles in vault order.
    pub fn active_bubbles(&self) -> Result<Vec<Bubble>> {
        self.bubbles_in_state(BubbleState::Active)
    }

    /// Active bubbles, oldest first. Equal creation times keep vault order.
    pub fn active_bubbles_sorted(&self) -> Result<Vec<Bubble>> {
        let mut bubbles = self.active_bubbles()?;
        bubbles.sort_by_key(|b| b.created);
        Ok(bubbles)
    }

    /// Archived bubbles, oldest first.
    pub fn archived_bubbles_sorted(&self) -> Result<Vec<Bubble>> {
        let mut bubbles = self.bubbles_in_state(BubbleState::Archived)?;
        bubbles.sort_by_key(|b| b.created);
        Ok(bubbles)
    }

    fn bubbles_in_state(&self, state: BubbleState) -> Result<Vec<Bubble>> {
        let documents = self.workspace.documents()?;
        let total = documents.len();

        let bubbles: Vec<Bubble> = documents
            .iter()
            .filter(|doc| self.classify(doc) == state)
            .map(|doc| Bubble::from_document(doc, state))
            .collect();

        tracing::debug!(total, matched = bubbles.len(), %state, "Classified documents");
        Ok(bubbles)
    }

    /// Number of active bubbles.
    pub fn bubble_count(&self) -> Result<usize> {
        Ok(self.active_bubbles()?.len())
    }

    /// Whether the focused document is an active bubble.
    pub fn is_current_document_active_bubble(&self) -> Result<bool> {
        Ok(self
            .workspace
            .active_document()?
            .is_some_and(|doc| self.config.is_active_bubble(&doc)))
    }

    /// Recompute the bubble count indicator.
    pub fn refresh_status(&self) {
        match self.bubble_count() {
            Ok(count) => self.notifier.show_status(&format_bubble_count(count)),
            Err(e) => tracing::warn!(error = %e, "Failed to refresh bubble count"),
        }
    }

    /// Create a bubble named after the current local time.
    ///
    /// # Errors
    /// Returns a storage error if the folder or file cannot be created,
    /// or if the new bubble cannot be opened.
    pub fn create_bubble(&mut self, target: TabTarget) -> Result<Bubble> {
        self.create_bubble_at(Local::now().naive_local(), target)
    }

    /// Create a bubble named after `now`.
    ///
    /// An occupied name gets ` (1)`, ` (2)`, ... appended until it is free.
    ///
    /// # Errors
    /// Returns a storage error if the folder or file cannot be created,
    /// or if the new bubble cannot be opened.
    pub fn create_bubble_at(&mut self, now: NaiveDateTime, target: TabTarget) -> Result<Bubble> {
        let folder = self.config.folder_path();
        let stem = bubble_file_stem(&now);

        let path = (0..u32::MAX)
            .map(|attempt| join_path(&folder, &candidate_name(&stem, attempt)))
            .find(|path| !self.workspace.exists(path))
            .ok_or_else(|| AppError::storage_msg(format!("No free file name for {stem}")))
            .map_err(|e| e.during(Stage::Create))?;

        if folder != "/" {
            self.workspace
                .create_folder(&folder)
                .map_err(|e| e.during(Stage::Create))?;
        }

        let doc = self
            .workspace
            .create_document(&path, "")
            .map_err(|e| e.during(Stage::Create))?;
        tracing::info!(path = %doc.path, "Created bubble");
        self.refresh_status();

        self.show(&doc.path, target)?;

        Ok(Bubble::from_document(&doc, BubbleState::Active))
    }

    fn find_adjacent(&self, direction: Direction) -> Result<Bubble> {
        let bubbles = self.active_bubbles_sorted()?;
        if bubbles.is_empty() {
            return Err(Precondition::NoBubbles.into());
        }

        let index = self
            .workspace
            .active_document()?
            .and_then(|doc| bubbles.iter().position(|b| b.path == doc.path))
            .ok_or(Precondition::NotInActiveBubble)?;

        let target = match direction {
            Direction::Previous => index.checked_sub(1),
            Direction::Next => Some(index + 1),
        };

        target
            .and_then(|i| bubbles.get(i).cloned())
            .ok_or_else(|| match direction {
                Direction::Previous => Precondition::NoBubbleBefore.into(),
                Direction::Next => Precondition::NoBubbleAfter.into(),
            })
    }

    /// Bubble before or after the focused one.
    ///
    /// Returns `None` after notifying when there is no such bubble.
    ///
    /// # Errors
    /// Returns an error only if the host cannot be queried.
    pub fn adjacent_bubble(&self, direction: Direction) -> Result<Option<Bubble>> {
        self.reported(self.find_adjacent(direction))
    }

    /// Open the bubble before or after the focused one.
    ///
    /// # Errors
    /// Returns an error if the host cannot be queried or the bubble
    /// cannot be opened.
    pub fn open_adjacent_bubble(
        &mut self,
        direction: Direction,
        target: TabTarget,
    ) -> Result<Option<Bubble>> {
        let Some(bubble) = self.adjacent_bubble(direction)? else {
            return Ok(None);
        };

        self.show(&bubble.path, target)?;
        Ok(Some(bubble))
    }

    /// Open the oldest or newest bubble, creating one if the set is empty.
    ///
    /// A bubble already open in a tab is focused rather than opened twice.
    ///
    /// # Errors
    /// Returns an error if the host cannot be queried or updated.
    pub fn open_bubble_by_age(&mut self, age: Age) -> Result<AgeOutcome> {
        let bubbles = self.active_bubbles_sorted()?;
        let target = match age {
            Age::Oldest => bubbles.first(),
            Age::Newest => bubbles.last(),
        }
        .cloned();

        let Some(target) = target else {
            let created = self.create_bubble(TabTarget::Current)?;
            self.notifier.notify("New bubble created.");
            return Ok(AgeOutcome::Created(created));
        };

        let open_tab = self
            .workspace
            .open_tabs()?
            .into_iter()
            .find(|tab| tab.kind == ViewKind::Markdown && tab.path == target.path);

        if let Some(tab) = open_tab {
            self.workspace
                .activate_tab(tab.id)
                .map_err(|e| e.during(Stage::Open))?;
            Ok(AgeOutcome::Activated(target))
        } else {
            self.show(&target.path, TabTarget::Current)?;
            Ok(AgeOutcome::Opened(target))
        }
    }

    fn archive_active_document(&mut self) -> Result<Bubble> {
        let doc = self
            .workspace
            .active_document()?
            .ok_or(Precondition::NoActiveDocument)?;

        if !self.config.is_active_bubble(&doc) {
            return Err(Precondition::NotAnActiveBubble.into());
        }

        let archive_folder = self.config.archive_folder_path();
        let new_path = join_path(&archive_folder, doc.name());

        if archive_folder != "/" {
            self.workspace
                .create_folder(&archive_folder)
                .map_err(|e| e.during(Stage::Archive))?;
        }
        self.workspace
            .rename_document(&doc.path, &new_path)
            .map_err(|e| e.during(Stage::Archive))?;

        tracing::info!(from = %doc.path, to = %new_path, "Archived bubble");
        self.notifier
            .notify(&format!("Archived {} to {}", doc.name(), archive_folder));
        self.refresh_status();

        Ok(Bubble {
            path: new_path,
            name: doc.name().to_string(),
            created: doc.created,
            state: BubbleState::Archived,
        })
    }

    /// Move the focused bubble into the archive folder.
    ///
    /// Returns `None` after notifying when nothing archivable is focused.
    ///
    /// # Errors
    /// Returns a storage error if the folder cannot be created or the
    /// move is rejected.
    pub fn archive_current_bubble(&mut self) -> Result<Option<Bubble>> {
        let result = self.archive_active_document();
        self.reported(result)
    }

    /// Archive the focused bubble, then show the next one, else the
    /// previous one, else close the tab.
    ///
    /// Neighbours are resolved before archiving because the archived
    /// bubble drops out of the set.
    ///
    /// # Errors
    /// Returns an error if archiving fails or the host cannot be updated.
    pub fn archive_and_open_next(&mut self) -> Result<Option<Advance>> {
        if self.workspace.active_document()?.is_none() {
            self.notifier.notify(Precondition::NoActiveDocument.message());
            return Ok(None);
        }

        let next = self.adjacent_bubble(Direction::Next)?;
        let previous = self.adjacent_bubble(Direction::Previous)?;

        let Some(archived) = self.archive_current_bubble()? else {
            return Ok(None);
        };

        let opened = next.or(previous);
        match &opened {
            Some(bubble) => self.show(&bubble.path, TabTarget::Current)?,
            None => self
                .workspace
                .close_active_tab()
                .map_err(|e| e.during(Stage::Open))?,
        }

        Ok(Some(Advance { archived, opened }))
    }

    fn show(&mut self, path: &str, target: TabTarget) -> Result<()> {
        self.workspace
            .open(path, target)
            .map_err(|e| e.during(Stage::Open))
    }

    /// Turn a precondition into a notification and `None`.
    fn reported<T>(&self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Err(AppError::Precondition(p)) => {
                tracing::debug!(reason = ?p, "Precondition not met");
                self.notifier.notify(p.message());
                Ok(None)
            }
            other => other.map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::{InMemoryWorkspace, RecordingNotifier};
    use chrono::NaiveDate;

    type TestManager = BubbleManager<InMemoryWorkspace, RecordingNotifier>;

    fn manager_with(paths: &[&str]) -> TestManager {
        let mut workspace = InMemoryWorkspace::new();
        for path in paths {
            workspace.add_document(path);
        }
        BubbleManager::new(
            BubblesConfig::new("bubbles", "bubbles/archive"),
            workspace,
            RecordingNotifier::default(),
        )
    }

    fn focus(manager: &mut TestManager, path: &str) {
        manager
            .workspace_mut()
            .open(path, TabTarget::Current)
            .unwrap();
    }

    fn active_path(manager: &TestManager) -> Option<String> {
        manager
            .workspace()
            .active_document()
            .unwrap()
            .map(|d| d.path)
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_file_stem_is_unpadded() {
        assert_eq!(bubble_file_stem(&at(9, 5, 3)), "[Bubble] 2024-03-05 953");
        assert_eq!(bubble_file_stem(&at(14, 30, 59)), "[Bubble] 2024-03-05 143059");
    }

    #[test]
    fn test_sorted_by_creation_time() {
        let mut workspace = InMemoryWorkspace::new();
        workspace.add_document_at("bubbles/c.md", 3);
        workspace.add_document_at("bubbles/a.md", 1);
        workspace.add_document_at("bubbles/b.md", 2);
        workspace.add_document_at("bubbles/archive/z.md", 0);
        workspace.add_document_at("notes/n.md", 0);
        let manager = BubbleManager::new(
            BubblesConfig::new("bubbles", "bubbles/archive"),
            workspace,
            RecordingNotifier::default(),
        );

        let paths: Vec<_> = manager
            .active_bubbles_sorted()
            .unwrap()
            .into_iter()
            .map(|b| b.path)
            .collect();
        assert_eq!(paths, ["bubbles/a.md", "bubbles/b.md", "bubbles/c.md"]);
        assert_eq!(manager.archived_bubbles_sorted().unwrap().len(), 1);
    }

    #[test]
    fn test_scenario_navigate_and_archive() {
        let mut manager = manager_with(&["bubbles/a.md", "bubbles/b.md", "bubbles/c.md"]);
        focus(&mut manager, "bubbles/b.md");

        let prev = manager
            .open_adjacent_bubble(Direction::Previous, TabTarget::Current)
            .unwrap();
        assert_eq!(prev.map(|b| b.path).as_deref(), Some("bubbles/a.md"));
        assert_eq!(active_path(&manager).as_deref(), Some("bubbles/a.md"));

        focus(&mut manager, "bubbles/b.md");
        let next = manager
            .open_adjacent_bubble(Direction::Next, TabTarget::Current)
            .unwrap();
        assert_eq!(next.map(|b| b.path).as_deref(), Some("bubbles/c.md"));

        focus(&mut manager, "bubbles/b.md");
        let archived = manager.archive_current_bubble().unwrap().unwrap();
        assert_eq!(archived.path, "bubbles/archive/b.md");
        assert_eq!(archived.state, BubbleState::Archived);
        assert!(manager.workspace().exists("bubbles/archive/b.md"));
        assert!(!manager.workspace().exists("bubbles/b.md"));
        assert_eq!(manager.bubble_count().unwrap(), 2);
        assert_eq!(manager.notifier().last_status().as_deref(), Some("2 bubbles"));
        assert_eq!(
            manager.notifier().last_message().as_deref(),
            Some("Archived b.md to bubbles/archive")
        );
    }

    #[test]
    fn test_adjacent_follows_sorted_index() {
        let paths = ["bubbles/1.md", "bubbles/2.md", "bubbles/3.md", "bubbles/4.md"];
        let mut manager = manager_with(&paths);

        for (i, path) in paths.iter().enumerate() {
            focus(&mut manager, path);
            let next = manager.adjacent_bubble(Direction::Next).unwrap();
            assert_eq!(next.map(|b| b.path), paths.get(i + 1).map(ToString::to_string));
        }
        assert_eq!(
            manager.notifier().last_message().as_deref(),
            Some("There's no bubble after this one.")
        );

        focus(&mut manager, "bubbles/1.md");
        assert!(manager.adjacent_bubble(Direction::Previous).unwrap().is_none());
        assert_eq!(
            manager.notifier().last_message().as_deref(),
            Some("There's no bubble before this one.")
        );
    }

    #[test]
    fn test_adjacent_without_bubbles_or_focus() {
        let mut manager = manager_with(&["notes/a.md"]);
        focus(&mut manager, "notes/a.md");
        assert!(manager.adjacent_bubble(Direction::Next).unwrap().is_none());
        assert_eq!(
            manager.notifier().last_message().as_deref(),
            Some("Could not find any bubbles.")
        );

        let mut manager = manager_with(&["bubbles/a.md", "notes/n.md"]);
        focus(&mut manager, "notes/n.md");
        assert!(manager
            .open_adjacent_bubble(Direction::Next, TabTarget::Current)
            .unwrap()
            .is_none());
        assert_eq!(
            manager.notifier().last_message().as_deref(),
            Some("Currently not in an active bubble.")
        );
        assert_eq!(active_path(&manager).as_deref(), Some("notes/n.md"));
    }

    #[test]
    fn test_create_resolves_name_collisions() {
        let stem = bubble_file_stem(&at(9, 5, 15));
        let taken = [
            format!("bubbles/{stem}.md"),
            format!("bubbles/{stem} (1).md"),
        ];
        let mut manager = manager_with(&[taken[0].as_str(), taken[1].as_str()]);

        let created = manager
            .create_bubble_at(at(9, 5, 15), TabTarget::Current)
            .unwrap();
        assert_eq!(created.path, format!("bubbles/{stem} (2).md"));
        assert_eq!(created.state, BubbleState::Active);
        assert_eq!(active_path(&manager), Some(created.path.clone()));
        assert_eq!(manager.notifier().last_status().as_deref(), Some("3 bubbles"));

        let again = manager
            .create_bubble_at(at(9, 5, 15), TabTarget::New)
            .unwrap();
        assert_eq!(again.path, format!("bubbles/{stem} (3).md"));
        assert_eq!(manager.workspace().open_tabs().unwrap().len(), 2);
    }

    #[test]
    fn test_create_in_empty_vault_makes_folder() {
        let mut manager = manager_with(&[]);
        let created = manager
            .create_bubble_at(at(23, 0, 0), TabTarget::Current)
            .unwrap();
        assert_eq!(created.path, "bubbles/[Bubble] 2024-03-05 2300.md");
        assert!(manager.workspace().exists("bubbles"));
        assert_eq!(manager.notifier().last_status().as_deref(), Some("1 bubble"));
    }

    #[test]
    fn test_create_failure_is_storage_error() {
        let mut manager = manager_with(&[]);
        manager.workspace_mut().fail_writes(true);

        let err = manager
            .create_bubble_at(at(1, 2, 3), TabTarget::Current)
            .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Create));
        assert_eq!(manager.bubble_count().unwrap(), 0);
    }

    #[test]
    fn test_open_by_age() {
        let mut manager = manager_with(&["bubbles/a.md", "bubbles/b.md", "bubbles/c.md"]);

        let outcome = manager.open_bubble_by_age(Age::Oldest).unwrap();
        assert!(matches!(outcome, AgeOutcome::Opened(ref b) if b.path == "bubbles/a.md"));

        let outcome = manager.open_bubble_by_age(Age::Newest).unwrap();
        assert!(matches!(outcome, AgeOutcome::Opened(ref b) if b.path == "bubbles/c.md"));
        assert_eq!(manager.workspace().open_tabs().unwrap().len(), 1);
    }

    #[test]
    fn test_open_by_age_activates_existing_tab() {
        let mut manager = manager_with(&["bubbles/a.md", "bubbles/b.md"]);
        manager
            .workspace_mut()
            .open("bubbles/a.md", TabTarget::New)
            .unwrap();
        manager
            .workspace_mut()
            .open("bubbles/b.md", TabTarget::New)
            .unwrap();

        let outcome = manager.open_bubble_by_age(Age::Oldest).unwrap();
        assert!(matches!(outcome, AgeOutcome::Activated(ref b) if b.path == "bubbles/a.md"));
        assert_eq!(active_path(&manager).as_deref(), Some("bubbles/a.md"));
        assert_eq!(manager.workspace().open_tabs().unwrap().len(), 2);
    }

    #[test]
    fn test_open_by_age_creates_when_empty() {
        let mut manager = manager_with(&["bubbles/archive/old.md"]);

        let outcome = manager.open_bubble_by_age(Age::Newest).unwrap();
        let AgeOutcome::Created(bubble) = outcome else {
            panic!("expected a new bubble");
        };
        assert!(bubble.name.starts_with("[Bubble] "));
        assert_eq!(manager.bubble_count().unwrap(), 1);
        assert!(manager
            .notifier()
            .messages()
            .contains(&"New bubble created.".to_string()));
    }

    #[test]
    fn test_archive_twice_is_refused() {
        let mut manager = manager_with(&["bubbles/a.md", "bubbles/b.md"]);
        focus(&mut manager, "bubbles/a.md");

        assert!(manager.archive_current_bubble().unwrap().is_some());
        assert_eq!(active_path(&manager).as_deref(), Some("bubbles/archive/a.md"));

        assert!(manager.archive_current_bubble().unwrap().is_none());
        assert_eq!(
            manager.notifier().last_message().as_deref(),
            Some("Current note is not a bubble or is already archived.")
        );
        assert_eq!(manager.workspace().rename_count(), 1);
    }

    #[test]
    fn test_archive_without_focus() {
        let mut manager = manager_with(&["bubbles/a.md"]);
        assert!(manager.archive_current_bubble().unwrap().is_none());
        assert_eq!(
            manager.notifier().last_message().as_deref(),
            Some("No active bubble to archive.")
        );
    }

    #[test]
    fn test_archive_storage_failure_propagates() {
        let mut manager = manager_with(&["bubbles/a.md"]);
        focus(&mut manager, "bubbles/a.md");
        manager.workspace_mut().fail_writes(true);

        let err = manager.archive_current_bubble().unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Archive));
        manager.workspace_mut().fail_writes(false);
        assert_eq!(manager.bubble_count().unwrap(), 1);
    }

    #[test]
    fn test_archive_and_advance_prefers_next() {
        let mut manager = manager_with(&["bubbles/a.md", "bubbles/b.md", "bubbles/c.md"]);
        focus(&mut manager, "bubbles/b.md");

        let advance = manager.archive_and_open_next().unwrap().unwrap();
        assert_eq!(advance.archived.path, "bubbles/archive/b.md");
        assert_eq!(advance.opened.map(|b| b.path).as_deref(), Some("bubbles/c.md"));
        assert_eq!(active_path(&manager).as_deref(), Some("bubbles/c.md"));
        assert_eq!(manager.workspace().open_tabs().unwrap().len(), 1);
        assert_eq!(
            manager.notifier().messages(),
            vec!["Archived b.md to bubbles/archive".to_string()]
        );
    }

    #[test]
    fn test_archive_and_advance_falls_back_to_previous() {
        let mut manager = manager_with(&["bubbles/a.md", "bubbles/b.md"]);
        focus(&mut manager, "bubbles/b.md");

        let advance = manager.archive_and_open_next().unwrap().unwrap();
        assert_eq!(advance.opened.map(|b| b.path).as_deref(), Some("bubbles/a.md"));
        assert_eq!(active_path(&manager).as_deref(), Some("bubbles/a.md"));
        assert_eq!(
            manager.notifier().messages(),
            vec![
                "There's no bubble after this one.".to_string(),
                "Archived b.md to bubbles/archive".to_string(),
            ]
        );
    }

    #[test]
    fn test_archive_and_advance_last_bubble_closes_tab() {
        let mut manager = manager_with(&["bubbles/only.md"]);
        focus(&mut manager, "bubbles/only.md");

        let advance = manager.archive_and_open_next().unwrap().unwrap();
        assert!(advance.opened.is_none());
        assert!(manager.workspace().open_tabs().unwrap().is_empty());
        assert!(active_path(&manager).is_none());
        assert_eq!(manager.notifier().last_status().as_deref(), Some(""));
        assert_eq!(
            manager.notifier().messages(),
            vec![
                "There's no bubble after this one.".to_string(),
                "There's no bubble before this one.".to_string(),
                "Archived only.md to bubbles/archive".to_string(),
            ]
        );
    }

    #[test]
    fn test_archive_and_advance_outside_bubble_does_nothing() {
        let mut manager = manager_with(&["bubbles/a.md", "notes/n.md"]);
        focus(&mut manager, "notes/n.md");

        assert!(manager.archive_and_open_next().unwrap().is_none());
        assert_eq!(active_path(&manager).as_deref(), Some("notes/n.md"));
        assert_eq!(manager.workspace().rename_count(), 0);
        assert_eq!(
            manager.notifier().messages(),
            vec![
                "Currently not in an active bubble.".to_string(),
                "Currently not in an active bubble.".to_string(),
                "Current note is not a bubble or is already archived.".to_string(),
            ]
        );
    }

    #[test]
    fn test_gating_predicate() {
        let mut manager = manager_with(&["bubbles/a.md", "bubbles/archive/b.md"]);
        assert!(!manager.is_current_document_active_bubble().unwrap());

        focus(&mut manager, "bubbles/a.md");
        assert!(manager.is_current_document_active_bubble().unwrap());

        focus(&mut manager, "bubbles/archive/b.md");
        assert!(!manager.is_current_document_active_bubble().unwrap());
    }
}
