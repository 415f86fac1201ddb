//! Read-only mapping from pillar to its ordered rule set.
//!
//! The built-in tables encode review policy for each pillar and are not
//! user-configurable. They are built once, on first use, and shared by
//! reference afterwards.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::item::Pillar;

use super::rule::{RuleInput, Severity, ValidationRule};

static BUILTIN: Lazy<RuleRegistry> = Lazy::new(|| {
    RuleRegistry::new()
        .with_rules(Pillar::Technical, technical_rules())
        .with_rules(Pillar::Psychological, psychological_rules())
        .with_rules(Pillar::Scientific, scientific_rules())
});

/// Pillar → rules, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    sets: IndexMap<Pillar, Vec<ValidationRule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in pillar rule sets.
    pub fn builtin() -> &'static RuleRegistry {
        &BUILTIN
    }

    /// Set the rule set for a pillar, replacing any previous one.
    pub fn with_rules(mut self, pillar: Pillar, rules: Vec<ValidationRule>) -> Self {
        self.sets.insert(pillar, rules);
        self
    }

    /// Append one rule to a pillar's set.
    pub fn with_rule(mut self, pillar: Pillar, rule: ValidationRule) -> Self {
        self.sets.entry(pillar).or_default().push(rule);
        self
    }

    /// Rules for a pillar. Empty when none are registered.
    pub fn rules_for(&self, pillar: Pillar) -> &[ValidationRule] {
        self.sets.get(&pillar).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a rule set exists for the pillar.
    pub fn has_rules(&self, pillar: Pillar) -> bool {
        self.sets.contains_key(&pillar)
    }

    /// Pillars with a registered rule set.
    pub fn pillars(&self) -> impl Iterator<Item = Pillar> + '_ {
        self.sets.keys().copied()
    }

    /// Find a rule by id within a pillar.
    pub fn rule(&self, pillar: Pillar, rule_id: &str) -> Option<&ValidationRule> {
        self.rules_for(pillar).iter().find(|r| r.id == rule_id)
    }
}

/// Real platform interactions: accuracy, user fit.
fn technical_rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::new(
            "accuracy",
            "Response Accuracy",
            "Response is accurate, helpful, and relevant to user query",
            Severity::Error,
            |d: &RuleInput<'_>| d.score_at_least("quality_score", 3.0),
        ),
        ValidationRule::new(
            "tonality",
            "Tonality Match",
            "Response tonality matches user archetype (Macher, Chaot, Perfektionist, Beobachter)",
            Severity::Warning,
            |d: &RuleInput<'_>| d.flag("tonality_match"),
        ),
        ValidationRule::new(
            "task_fit",
            "Task Type Fit",
            "Response fits assigned task type (A=Profile, B=Matching, C=Monitoring, D=Schaufenster)",
            Severity::Error,
            |d: &RuleInput<'_>| d.flag("task_type_valid"),
        ),
        ValidationRule::new(
            "luna_orion_balance",
            "Avatar Balance",
            "Luna (empathetic) vs Orion (structured) balance appropriate for user",
            Severity::Info,
            |d: &RuleInput<'_>| d.flag("avatar_balance_ok"),
        ),
    ]
}

/// Behavioral analysis: professional validation, GDPR compliance.
fn psychological_rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::new(
            "neutrality",
            "Neutrality Check",
            "Response is neutral, non-judgmental, and unbiased",
            Severity::Error,
            |d: &RuleInput<'_>| d.score_at_least("neutrality_score", 4.0),
        ),
        ValidationRule::new(
            "ethics",
            "Ethical Soundness",
            "No harmful content, manipulation, or psychological harm",
            Severity::Error,
            |d: &RuleInput<'_>| d.flag("ethical_check"),
        ),
        ValidationRule::new(
            "gdpr_compliance",
            "GDPR Art. 9 Compliance",
            "Complies with GDPR Article 9 (sensitive psychological data)",
            Severity::Error,
            |d: &RuleInput<'_>| d.flag("gdpr_compliant"),
        ),
        ValidationRule::new(
            "psychologist_review",
            "Psychologist Validation",
            "Professional psychologist has reviewed and approved",
            Severity::Warning,
            |d: &RuleInput<'_>| d.flag("psychologist_approved"),
        ),
        ValidationRule::new(
            "archetyp_validity",
            "Archetyp Classification",
            "Archetyp classification is evidence-based and valid",
            Severity::Info,
            |d: &RuleInput<'_>| d.flag("archetyp_valid"),
        ),
    ]
}

/// Academic material: attribution, methodology.
fn scientific_rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::new(
            "citations",
            "Valid Citations",
            "Proper academic citations (APA, IEEE) are present and correct",
            Severity::Error,
            |d: &RuleInput<'_>| d.flag("has_valid_citations"),
        ),
        ValidationRule::new(
            "methodology",
            "Sound Methodology",
            "Based on sound PM/coaching/team theories and methodologies",
            Severity::Warning,
            |d: &RuleInput<'_>| d.flag("methodology_valid"),
        ),
        ValidationRule::new(
            "open_access",
            "Open Access Source",
            "Source material is Open Access or properly licensed",
            Severity::Error,
            |d: &RuleInput<'_>| d.flag("open_access"),
        ),
        ValidationRule::new(
            "peer_reviewed",
            "Peer Review Status",
            "Source is from peer-reviewed academic publication",
            Severity::Info,
            |d: &RuleInput<'_>| d.flag("peer_reviewed"),
        ),
        ValidationRule::new(
            "factual_accuracy",
            "Factual Accuracy",
            "Claims are factually accurate and verifiable",
            Severity::Error,
            |d: &RuleInput<'_>| d.flag("factually_accurate"),
        ),
    ]
}
