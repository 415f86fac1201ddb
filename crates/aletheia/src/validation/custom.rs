//! Caller-supplied, per-category validation used to gate saves.
//!
//! Unlike the built-in engine, checks here short-circuit: the first failing
//! check decides the outcome and its message is returned.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::item::LabelingItem;

/// Metadata key that must hold `true` when a neutrality check is required.
pub const NEUTRALITY_KEY: &str = "isNeutral";

/// Metadata key that must be present when a citation is required.
pub const CITATION_KEY: &str = "sourceCitation";

/// Result of a custom validator function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomCheck {
    Pass,
    /// Failure with the generic message.
    Fail,
    /// Failure with a caller-provided reason.
    FailWith(String),
}

impl From<bool> for CustomCheck {
    fn from(ok: bool) -> Self {
        if ok { CustomCheck::Pass } else { CustomCheck::Fail }
    }
}

impl From<String> for CustomCheck {
    fn from(message: String) -> Self {
        CustomCheck::FailWith(message)
    }
}

impl From<&str> for CustomCheck {
    fn from(message: &str) -> Self {
        CustomCheck::FailWith(message.to_string())
    }
}

/// Shared custom predicate.
#[derive(Clone)]
pub struct CustomValidator(Arc<dyn Fn(&LabelingItem) -> CustomCheck + Send + Sync>);

impl CustomValidator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&LabelingItem) -> CustomCheck + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, item: &LabelingItem) -> CustomCheck {
        (self.0)(item)
    }
}

impl fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomValidator(..)")
    }
}

/// Validation settings for one pillar or category key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryValidation {
    /// Require `metadata.isNeutral == true`.
    #[serde(default)]
    pub neutrality_check: bool,

    /// Require a truthy `metadata.sourceCitation`.
    #[serde(default)]
    pub require_citation: bool,

    /// Minimum quality score. Zero or absent disables the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_quality_score: Option<f64>,

    /// Custom predicate, run before the built-in checks.
    #[serde(skip)]
    pub validator: Option<CustomValidator>,
}

impl CategoryValidation {
    /// Create settings with every check disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the neutrality flag.
    pub fn with_neutrality_check(mut self) -> Self {
        self.neutrality_check = true;
        self
    }

    /// Require a source citation.
    pub fn with_required_citation(mut self) -> Self {
        self.require_citation = true;
        self
    }

    /// Set the minimum quality score.
    pub fn with_min_quality_score(mut self, min: f64) -> Self {
        self.min_quality_score = Some(min);
        self
    }

    /// Attach a custom predicate.
    pub fn with_validator<F>(mut self, f: F) -> Self
    where
        F: Fn(&LabelingItem) -> CustomCheck + Send + Sync + 'static,
    {
        self.validator = Some(CustomValidator::new(f));
        self
    }

    /// Run the checks in order: custom, neutrality, citation, quality.
    pub fn check(&self, item: &LabelingItem) -> ValidationOutcome {
        if let Some(validator) = &self.validator {
            match validator.call(item) {
                CustomCheck::Pass => {}
                CustomCheck::Fail => return ValidationOutcome::invalid("Validation failed"),
                CustomCheck::FailWith(message) => return ValidationOutcome::invalid(message),
            }
        }

        if self.neutrality_check && !matches!(item.meta(NEUTRALITY_KEY), Some(Value::Bool(true))) {
            return ValidationOutcome::invalid("Psychological data must be marked as neutral");
        }

        if self.require_citation && !item.meta(CITATION_KEY).is_some_and(is_truthy) {
            return ValidationOutcome::invalid("Scientific data requires source citation");
        }

        if let Some(min) = self.min_quality_score.filter(|m| *m != 0.0) {
            let meets = matches!(item.quality_score, Some(score) if score != 0.0 && score >= min);
            if !meets {
                return ValidationOutcome::invalid(format!("Quality score must be at least {}", min));
            }
        }

        ValidationOutcome::valid()
    }
}

/// Structured valid/invalid answer with an optional reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

/// Loose truthiness: null, false, zero, NaN, and "" are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
