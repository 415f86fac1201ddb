//! Events emitted to the host when session operations succeed.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::item::LabelingItem;

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventKind {
    /// The item was completed.
    Save,
    /// The item was validated against its category settings.
    #[serde(rename_all = "camelCase")]
    Validate {
        is_valid: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// The item was skipped.
    Skip,
    /// The item was opened by id.
    Select,
    /// The item's output was replaced.
    Edit { output: Value },
}

impl EventKind {
    /// Short name for display.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Save => "save",
            EventKind::Validate { .. } => "validate",
            EventKind::Skip => "skip",
            EventKind::Select => "select",
            EventKind::Edit { .. } => "edit",
        }
    }
}

/// A session event with a snapshot of the affected item.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    #[serde(flatten)]
    pub kind: EventKind,
    /// The item as it was right after the operation.
    pub item: LabelingItem,
    pub at: DateTime<Utc>,
}

impl SessionEvent {
    pub fn new(kind: EventKind, item: LabelingItem) -> Self {
        Self {
            kind,
            item,
            at: Utc::now(),
        }
    }
}

/// Receiver for session events.
pub trait EventSink {
    fn emit(&mut self, event: SessionEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardEvents;

impl EventSink for DiscardEvents {
    fn emit(&mut self, _event: SessionEvent) {}
}

/// Recording sink. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SessionEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded events, oldest first.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.borrow().clone()
    }

    /// Event names, oldest first.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(|e| e.kind.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Remove and return all recorded events.
    pub fn drain(&self) -> Vec<SessionEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: SessionEvent) {
        self.events.borrow_mut().push(event);
    }
}
