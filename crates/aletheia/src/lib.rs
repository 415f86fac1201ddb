//! Aletheia: labeling session core for training data review.
//!
//! Aletheia tracks a queue of labeling items (model input/output pairs
//! awaiting human review) through a single review session and checks each
//! item against pillar-specific rules before it is accepted.
//!
//! # Core Principles
//!
//! - **In-memory**: a session owns its items for its lifetime; nothing is persisted
//! - **Monotonic status**: decided items are never reopened by navigation
//! - **Structured failures**: every failure is a value, nothing panics
//!
//! # Example
//!
//! ```
//! use aletheia::{LabelerConfig, LabelingItem, LabelingSession, Pillar};
//! use aletheia::validation::CategoryValidation;
//!
//! let config = LabelerConfig::new()
//!     .with_validation("scientific", CategoryValidation::new().with_required_citation());
//!
//! let items = vec![
//!     LabelingItem::new("paper-1", "Summarize the study", "The study shows...")
//!         .with_pillar(Pillar::Scientific),
//! ];
//!
//! let mut session = LabelingSession::new(items, config);
//! let outcome = session.validate();
//! assert!(!outcome.is_valid);
//! assert_eq!(outcome.message.as_deref(), Some("Scientific data requires source citation"));
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod item;
pub mod session;
pub mod validation;

pub use config::{LabelerConfig, Labels};
pub use error::{AletheiaError, Result};
pub use input::load_items;
pub use item::{ItemPatch, ItemStatus, LabelingItem, Metadata, Pillar};
pub use session::{EventKind, EventLog, EventSink, LabelingSession, SessionEvent, SessionStats};
pub use validation::{
    RuleRegistry, Severity, ValidationEngine, ValidationOutcome, ValidationResult, ValidationRule,
    ValidationSummary,
};
