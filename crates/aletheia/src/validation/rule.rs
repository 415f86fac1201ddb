//! Validation rules, severities, and per-rule results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::item::{LabelingItem, Metadata};

/// Severity level of a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only, may not require action.
    Info,
    /// Advisory issue that should be reviewed.
    Warning,
    /// Blocking issue. A failed error rule makes the item invalid.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }

    /// Whether a failure at this severity blocks acceptance.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

/// Read-only view of the signals a rule may inspect.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    metadata: Option<&'a Metadata>,
}

impl<'a> RuleInput<'a> {
    /// View over an item's metadata.
    pub fn from_item(item: &'a LabelingItem) -> Self {
        Self {
            metadata: item.metadata.as_ref(),
        }
    }

    /// View over a bare metadata map.
    pub fn from_metadata(metadata: &'a Metadata) -> Self {
        Self {
            metadata: Some(metadata),
        }
    }

    /// Raw value for a key.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.metadata.and_then(|m| m.get(key))
    }

    /// True only when the key holds JSON `true`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Bool(true)))
    }

    /// Numeric value for a key.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// True when the key holds a non-zero number of at least `min`.
    pub fn score_at_least(&self, key: &str, min: f64) -> bool {
        match self.number(key) {
            Some(score) if score != 0.0 => score >= min,
            _ => false,
        }
    }
}

/// A named, pillar-scoped predicate.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    /// Stable rule identifier.
    pub id: String,
    /// Short display label.
    pub label: String,
    /// What the rule checks.
    pub description: String,
    /// How a failure is treated.
    pub severity: Severity,
    /// Pure predicate over the item's signals.
    pub check: fn(&RuleInput<'_>) -> bool,
}

impl ValidationRule {
    /// Create a new rule.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        check: fn(&RuleInput<'_>) -> bool,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            severity,
            check,
        }
    }

    /// Evaluate the rule against an input view.
    pub fn evaluate(&self, input: &RuleInput<'_>) -> ValidationResult {
        ValidationResult {
            id: self.id.clone(),
            label: self.label.clone(),
            description: self.description.clone(),
            severity: self.severity,
            passed: (self.check)(input),
        }
    }
}

/// Outcome of evaluating one rule against one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Rule identifier.
    pub id: String,
    /// Rule display label.
    pub label: String,
    /// Rule description.
    pub description: String,
    /// Rule severity.
    pub severity: Severity,
    /// Whether the rule passed.
    pub passed: bool,
}

impl ValidationResult {
    /// Whether this result blocks acceptance.
    pub fn is_blocking_failure(&self) -> bool {
        !self.passed && self.severity.is_blocking()
    }
}
