//! Validation for labeling items.
//!
//! Two independent mechanisms live here:
//!
//! - **Pillar rules**: fixed, per-pillar rule sets held in a [`RuleRegistry`]
//!   and evaluated exhaustively by the [`ValidationEngine`]. Only failed
//!   [`Severity::Error`] rules make an item invalid.
//! - **Category validation**: caller-configured [`CategoryValidation`] checks
//!   that stop at the first failure and return its message.

mod custom;
mod engine;
mod registry;
mod rule;

pub use custom::{
    CategoryValidation, CustomCheck, CustomValidator, ValidationOutcome, CITATION_KEY,
    NEUTRALITY_KEY,
};
pub use engine::{ValidationEngine, ValidationSummary};
pub use registry::RuleRegistry;
pub use rule::{RuleInput, Severity, ValidationResult, ValidationRule};
