//! Labeling session: queue navigation, status mutation, and statistics.
//!
//! # Usage
//!
//! ```
//! use aletheia::{LabelerConfig, LabelingItem, LabelingSession, ItemStatus};
//!
//! let items = vec![
//!     LabelingItem::new("a", "prompt a", "answer a"),
//!     LabelingItem::new("b", "prompt b", "answer b"),
//! ];
//! let mut session = LabelingSession::new(items, LabelerConfig::default());
//!
//! // The first pending item is opened automatically
//! assert_eq!(session.current_item().unwrap().id, "a");
//!
//! session.mark_skipped().unwrap();
//! assert_eq!(session.current_item().unwrap().id, "b");
//! assert_eq!(session.items()[0].status, Some(ItemStatus::Skipped));
//! assert_eq!(session.progress(), 50);
//! ```

mod events;
mod state;
mod stats;

pub use events::{DiscardEvents, EventKind, EventLog, EventSink, SessionEvent};
pub use state::{DETACHED, LabelingSession};
pub use stats::SessionStats;
