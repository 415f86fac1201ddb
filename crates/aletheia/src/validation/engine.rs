//! Exhaustive evaluation of a pillar rule set against one item.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::item::{LabelingItem, Pillar};

use super::registry::RuleRegistry;
use super::rule::{RuleInput, Severity, ValidationResult};

/// Pass/fail counts for one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Failed rules with error severity.
    pub errors: usize,
    /// Failed rules with warning severity.
    pub warnings: usize,
    /// True when no error-severity rule failed.
    pub is_valid: bool,
}

impl ValidationSummary {
    /// Failed rules with info severity.
    pub fn infos(&self) -> usize {
        self.failed
            .saturating_sub(self.errors)
            .saturating_sub(self.warnings)
    }
}

/// Evaluates built-in (or supplied) rule sets. Stateless.
#[derive(Debug, Clone, Copy)]
pub struct ValidationEngine<'r> {
    registry: &'r RuleRegistry,
}

impl Default for ValidationEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine<'static> {
    /// Engine over the built-in pillar rule sets.
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::builtin(),
        }
    }
}

impl<'r> ValidationEngine<'r> {
    /// Engine over a caller-supplied registry.
    pub fn with_registry(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    /// The registry this engine reads.
    pub fn registry(&self) -> &'r RuleRegistry {
        self.registry
    }

    /// Evaluate every rule of the pillar's set, in declaration order.
    ///
    /// A pillar without rules yields an empty list, which summarizes as valid.
    pub fn validate(&self, pillar: Pillar, item: &LabelingItem) -> Vec<ValidationResult> {
        let rules = self.registry.rules_for(pillar);
        if rules.is_empty() {
            debug!(item_id = %item.id, pillar = %pillar, "No rules registered, treating item as valid");
            return Vec::new();
        }

        let input = RuleInput::from_item(item);
        rules.iter().map(|rule| rule.evaluate(&input)).collect()
    }

    /// Evaluate against the item's own pillar. No pillar means no rules.
    pub fn validate_item(&self, item: &LabelingItem) -> Vec<ValidationResult> {
        match item.pillar {
            Some(pillar) => self.validate(pillar, item),
            None => {
                debug!(item_id = %item.id, "Item has no pillar, skipping built-in rules");
                Vec::new()
            }
        }
    }

    /// Validate and summarize in one step.
    pub fn summary(&self, pillar: Pillar, item: &LabelingItem) -> ValidationSummary {
        Self::summarize(&self.validate(pillar, item))
    }

    /// Count results. Only failed error-severity rules affect validity.
    pub fn summarize(results: &[ValidationResult]) -> ValidationSummary {
        let mut summary = ValidationSummary {
            total: results.len(),
            ..Default::default()
        };

        for result in results {
            if result.passed {
                summary.passed += 1;
                continue;
            }
            summary.failed += 1;
            match result.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => {}
            }
        }

        summary.is_valid = summary.errors == 0;
        summary
    }

    /// Failed results, most severe first. Ties keep declaration order.
    pub fn failures(results: &[ValidationResult]) -> Vec<&ValidationResult> {
        let mut failed: Vec<_> = results.iter().filter(|r| !r.passed).collect();
        failed.sort_by(|a, b| b.severity.cmp(&a.severity));
        failed
    }
}
