//! The labeling session state machine.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::LabelerConfig;
use crate::error::{AletheiaError, Result};
use crate::item::{ItemPatch, ItemStatus, LabelingItem, Pillar};
use crate::validation::{ValidationEngine, ValidationOutcome, ValidationResult, ValidationSummary};

use super::events::{DiscardEvents, EventKind, EventSink, SessionEvent};
use super::stats::SessionStats;

/// Cursor value when the current item is outside the work queue.
pub const DETACHED: isize = -1;

/// One in-memory pass over an item collection.
///
/// The session owns the items and is their only writer. Per item, status
/// moves `pending → in-progress → completed | skipped`. A completed or
/// skipped item is never reopened by navigation and never decided again.
///
/// Navigation runs over the *work queue*: the items that were pending or in
/// progress when the collection was loaded, in original order. The queue is
/// rebuilt only by [`LabelingSession::new`] and
/// [`LabelingSession::replace_items`]. All other views are recomputed on read.
pub struct LabelingSession {
    items: Vec<LabelingItem>,
    /// Indices into `items`.
    queue: Vec<usize>,
    /// Index into `items`.
    current: Option<usize>,
    /// Position in `queue`, or [`DETACHED`].
    current_index: isize,
    loading: bool,
    config: LabelerConfig,
    events: Box<dyn EventSink>,
}

impl LabelingSession {
    /// Start a session and select the first queued item.
    pub fn new(items: Vec<LabelingItem>, config: LabelerConfig) -> Self {
        let queue = build_queue(&items);
        let mut session = Self {
            items,
            queue,
            current: None,
            current_index: 0,
            loading: false,
            config,
            events: Box::new(DiscardEvents),
        };
        session.initialize();
        session
    }

    /// Deliver events to `sink` instead of discarding them.
    pub fn with_events(mut self, sink: impl EventSink + 'static) -> Self {
        self.events = Box::new(sink);
        self
    }

    /// Select the first queued item if nothing is selected yet.
    ///
    /// Idempotent: does nothing once an item is current.
    pub fn initialize(&mut self) {
        if self.items.is_empty() || self.current.is_some() {
            return;
        }
        let Some(&first) = self.queue.first() else {
            debug!("No pending items to select");
            return;
        };

        self.current = Some(first);
        self.current_index = 0;
        self.open(first);
        debug!(item_id = %self.items[first].id, "Selected first pending item");
    }

    /// Replace the whole collection, keeping the current item if it survives.
    pub fn replace_items(&mut self, items: Vec<LabelingItem>) {
        let current_id = self.current_item().map(|item| item.id.clone());

        self.items = items;
        self.queue = build_queue(&self.items);
        self.current = current_id
            .as_deref()
            .and_then(|id| self.position_of(id));

        match self.current {
            Some(pos) => {
                self.current_index = self.queue_position(pos);
                self.open(pos);
            }
            None => {
                if let Some(id) = current_id {
                    debug!(item_id = %id, "Current item dropped by replacement");
                }
                self.current_index = 0;
            }
        }

        self.initialize();
    }

    /// Move to the next queued item. No-op at the end of the queue.
    pub fn load_next(&mut self) {
        if !self.has_next() {
            return;
        }
        self.current_index += 1;
        self.move_to_cursor();
    }

    /// Move to the previous queued item. No-op at the start of the queue.
    pub fn load_previous(&mut self) {
        if !self.has_previous() {
            return;
        }
        self.current_index -= 1;
        self.move_to_cursor();
    }

    /// Make the item with `id` current.
    ///
    /// Completed and skipped items keep their status. An item outside the
    /// work queue leaves the cursor [`DETACHED`].
    pub fn select_item(&mut self, id: &str) -> Result<&LabelingItem> {
        let Some(pos) = self.position_of(id) else {
            warn!(item_id = %id, "Cannot select unknown item");
            return Err(AletheiaError::ItemNotFound(id.to_string()));
        };

        self.current = Some(pos);
        self.current_index = self.queue_position(pos);
        self.open(pos);
        self.emit(EventKind::Select, pos);

        Ok(&self.items[pos])
    }

    /// Complete the current item, apply `patch`, and advance.
    ///
    /// Returns the saved item. Fails with `AlreadyDecided` when the current
    /// item is completed or skipped.
    pub fn mark_completed(&mut self, patch: Option<ItemPatch>) -> Result<LabelingItem> {
        let pos = self.require_undecided()?;

        let item = &mut self.items[pos];
        item.status = Some(ItemStatus::Completed);
        if let Some(patch) = patch {
            patch.apply_to(item);
        }
        debug!(item_id = %item.id, "Item completed");

        let saved = self.items[pos].clone();
        self.emit(EventKind::Save, pos);
        self.load_next();
        Ok(saved)
    }

    /// Skip the current item and advance.
    pub fn mark_skipped(&mut self) -> Result<LabelingItem> {
        let pos = self.require_undecided()?;

        self.items[pos].status = Some(ItemStatus::Skipped);
        debug!(item_id = %self.items[pos].id, "Item skipped");

        let skipped = self.items[pos].clone();
        self.emit(EventKind::Skip, pos);
        self.load_next();
        Ok(skipped)
    }

    /// Replace the current item's output. Returns whether it was applied.
    pub fn update_output(&mut self, output: impl Into<Value>) -> bool {
        let Some(pos) = self.current else {
            return false;
        };
        if !self.config.allow_edit {
            debug!(item_id = %self.items[pos].id, "Output edits are disabled");
            return false;
        }

        let output = output.into();
        self.items[pos].output = output.clone();
        self.emit(EventKind::Edit { output }, pos);
        true
    }

    /// Set the current item's pillar. Pillars not allowed by the
    /// configuration are ignored.
    pub fn update_pillar(&mut self, pillar: Pillar) -> bool {
        let Some(pos) = self.current else {
            return false;
        };
        if !self.config.is_pillar_allowed(pillar) {
            warn!(item_id = %self.items[pos].id, pillar = %pillar, "Pillar not allowed by configuration");
            return false;
        }

        self.items[pos].pillar = Some(pillar);
        true
    }

    /// Set the current item's quality score. Non-finite scores are ignored.
    pub fn update_quality_score(&mut self, score: f64) -> bool {
        let Some(pos) = self.current else {
            return false;
        };
        if !score.is_finite() {
            warn!(item_id = %self.items[pos].id, score, "Ignoring non-finite quality score");
            return false;
        }
        self.items[pos].quality_score = Some(score);
        true
    }

    /// Check the current item against its configured category validation.
    ///
    /// Items without configured validation are valid.
    pub fn validate(&mut self) -> ValidationOutcome {
        let Some(pos) = self.current else {
            return ValidationOutcome::invalid(AletheiaError::NoActiveItem.to_string());
        };

        let item = &self.items[pos];
        let outcome = match self.config.validation_for(item) {
            Some(validation) => validation.check(item),
            None => {
                debug!(item_id = %item.id, "No validation configured, treating item as valid");
                ValidationOutcome::valid()
            }
        };

        self.emit(
            EventKind::Validate {
                is_valid: outcome.is_valid,
                message: outcome.message.clone(),
            },
            pos,
        );
        outcome
    }

    /// Run the built-in pillar rules for the current item.
    pub fn validate_rules(&self) -> Option<(Vec<ValidationResult>, ValidationSummary)> {
        let item = self.current_item()?;
        let results = ValidationEngine::new().validate_item(item);
        let summary = ValidationEngine::summarize(&results);
        Some((results, summary))
    }

    // Read surface

    pub fn items(&self) -> &[LabelingItem] {
        &self.items
    }

    /// Consume the session and return the collection.
    pub fn into_items(self) -> Vec<LabelingItem> {
        self.items
    }

    pub fn item(&self, id: &str) -> Option<&LabelingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn current_item(&self) -> Option<&LabelingItem> {
        self.current.map(|pos| &self.items[pos])
    }

    /// Cursor into the work queue, or [`DETACHED`].
    pub fn current_index(&self) -> isize {
        self.current_index
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn config(&self) -> &LabelerConfig {
        &self.config
    }

    /// Items in the work queue, in order.
    pub fn queue(&self) -> Vec<&LabelingItem> {
        self.queue.iter().map(|&pos| &self.items[pos]).collect()
    }

    /// Items still awaiting a decision: pending or no status, plus the
    /// current item while it is open and uncommitted. Original order.
    pub fn pending_items(&self) -> Vec<&LabelingItem> {
        self.items
            .iter()
            .enumerate()
            .filter(|&(pos, item)| match item.effective_status() {
                ItemStatus::Pending => true,
                ItemStatus::InProgress => self.current == Some(pos),
                _ => false,
            })
            .map(|(_, item)| item)
            .collect()
    }

    pub fn in_progress_items(&self) -> Vec<&LabelingItem> {
        self.filter_status(ItemStatus::InProgress)
    }

    pub fn completed_items(&self) -> Vec<&LabelingItem> {
        self.filter_status(ItemStatus::Completed)
    }

    pub fn skipped_items(&self) -> Vec<&LabelingItem> {
        self.filter_status(ItemStatus::Skipped)
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats::from_items(&self.items)
    }

    /// Percentage of decided items.
    pub fn progress(&self) -> u32 {
        self.stats().progress()
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.queue.len() as isize
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    /// Check if every item has been decided.
    pub fn is_complete(&self) -> bool {
        self.stats().is_complete()
    }

    // Helper methods

    fn require_current(&self) -> Result<usize> {
        self.current.ok_or(AletheiaError::NoActiveItem)
    }

    /// Current item position, if that item is still in progress.
    fn require_undecided(&self) -> Result<usize> {
        let pos = self.require_current()?;
        let item = &self.items[pos];
        if item.is_terminal() {
            warn!(item_id = %item.id, status = %item.effective_status(), "Item is already decided");
            return Err(AletheiaError::AlreadyDecided(item.id.clone()));
        }
        Ok(pos)
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn queue_position(&self, pos: usize) -> isize {
        self.queue
            .iter()
            .position(|&p| p == pos)
            .map(|i| i as isize)
            .unwrap_or(DETACHED)
    }

    fn move_to_cursor(&mut self) {
        let Some(&pos) = usize::try_from(self.current_index)
            .ok()
            .and_then(|i| self.queue.get(i))
        else {
            return;
        };
        self.current = Some(pos);
        self.open(pos);
        debug!(item_id = %self.items[pos].id, index = self.current_index, "Moved to item");
    }

    /// Mark an item in progress unless it is already decided.
    fn open(&mut self, pos: usize) {
        let item = &mut self.items[pos];
        if !item.is_terminal() {
            item.status = Some(ItemStatus::InProgress);
        }
    }

    fn filter_status(&self, status: ItemStatus) -> Vec<&LabelingItem> {
        self.items
            .iter()
            .filter(|item| item.effective_status() == status)
            .collect()
    }

    fn emit(&mut self, kind: EventKind, pos: usize) {
        let event = SessionEvent::new(kind, self.items[pos].clone());
        self.events.emit(event);
    }
}

impl std::fmt::Debug for LabelingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelingSession")
            .field("items", &self.items.len())
            .field("current", &self.current_item().map(|item| item.id.as_str()))
            .field("current_index", &self.current_index)
            .field("loading", &self.loading)
            .finish()
    }
}

fn build_queue(items: &[LabelingItem]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_terminal())
        .map(|(pos, _)| pos)
        .collect()
}
