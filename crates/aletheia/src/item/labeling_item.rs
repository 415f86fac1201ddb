//! The labeling item entity and partial updates.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::status::{ItemStatus, Pillar};

/// Auxiliary signals attached to an item (e.g. neutrality flag, citations).
pub type Metadata = IndexMap<String, Value>;

/// One unit of review: a model input/output pair awaiting a human decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelingItem {
    /// Unique, stable identifier.
    pub id: String,

    /// Input text/prompt shown to the reviewer.
    pub input: String,

    /// Model output (JSON or free text). The field reviewers edit.
    #[serde(default)]
    pub output: Value,

    /// Free-form category used for custom validation lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Pillar classification selecting the built-in rule set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar: Option<Pillar>,

    /// Additional metadata read by validators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Workflow status. Absent means pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,

    /// Quality score on a caller-defined scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,

    /// Creation/update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl LabelingItem {
    /// Create a pending item with no classification.
    pub fn new(id: impl Into<String>, input: impl Into<String>, output: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            input: input.into(),
            output: output.into(),
            category: None,
            pillar: None,
            metadata: None,
            status: None,
            quality_score: None,
            timestamp: None,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the pillar.
    pub fn with_pillar(mut self, pillar: Pillar) -> Self {
        self.pillar = Some(pillar);
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the quality score.
    pub fn with_quality_score(mut self, score: f64) -> Self {
        self.quality_score = Some(score);
        self
    }

    /// Set the timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Add a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value.into());
        self
    }

    /// Status with the absent case resolved to pending.
    pub fn effective_status(&self) -> ItemStatus {
        self.status.unwrap_or(ItemStatus::Pending)
    }

    /// Whether the item has reached completed or skipped.
    pub fn is_terminal(&self) -> bool {
        self.effective_status().is_terminal()
    }

    /// Look up a metadata value.
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }
}

/// Partial update applied when an item is saved.
///
/// `id` and `status` are owned by the session and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar: Option<Pillar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ItemPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output.
    pub fn with_output(mut self, output: impl Into<Value>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Set the pillar.
    pub fn with_pillar(mut self, pillar: Pillar) -> Self {
        self.pillar = Some(pillar);
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the quality score.
    pub fn with_quality_score(mut self, score: f64) -> Self {
        self.quality_score = Some(score);
        self
    }

    /// Replace the metadata map.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Shallow-merge the present fields into `item`.
    pub fn apply_to(self, item: &mut LabelingItem) {
        if let Some(input) = self.input {
            item.input = input;
        }
        if let Some(output) = self.output {
            item.output = output;
        }
        if let Some(category) = self.category {
            item.category = Some(category);
        }
        if let Some(pillar) = self.pillar {
            item.pillar = Some(pillar);
        }
        if let Some(metadata) = self.metadata {
            item.metadata = Some(metadata);
        }
        if let Some(score) = self.quality_score {
            item.quality_score = Some(score);
        }
        if let Some(timestamp) = self.timestamp {
            item.timestamp = Some(timestamp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_status_is_pending() {
        let item = LabelingItem::new("a", "prompt", "answer");
        assert_eq!(item.status, None);
        assert_eq!(item.effective_status(), ItemStatus::Pending);
        assert!(!item.is_terminal());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let item: LabelingItem = serde_json::from_value(json!({
            "id": "task-a-001",
            "pillar": "technical",
            "input": "User Input",
            "output": {"skills": ["Figma"]},
            "category": "task_a_profiles",
            "metadata": {"task_type": "profile_creation", "quality_score": 1.0},
            "qualityScore": 1.0,
            "status": "in-progress",
            "timestamp": "2025-03-12T10:23:00Z"
        }))
        .unwrap();

        assert_eq!(item.pillar, Some(Pillar::Technical));
        assert_eq!(item.status, Some(ItemStatus::InProgress));
        assert_eq!(item.quality_score, Some(1.0));
        assert_eq!(item.meta("task_type"), Some(&json!("profile_creation")));
        assert!(item.timestamp.is_some());
    }

    #[test]
    fn test_metadata_keeps_insertion_order() {
        let item = LabelingItem::new("a", "in", "out")
            .with_meta("zeta", 1)
            .with_meta("alpha", 2);

        let keys: Vec<_> = item.metadata.unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_patch_merges_present_fields_only() {
        let mut item = LabelingItem::new("a", "in", "out")
            .with_category("task_b_matching")
            .with_quality_score(0.5);

        ItemPatch::new()
            .with_output(json!({"edited": true}))
            .with_quality_score(0.9)
            .apply_to(&mut item);

        assert_eq!(item.id, "a");
        assert_eq!(item.input, "in");
        assert_eq!(item.output, json!({"edited": true}));
        assert_eq!(item.category.as_deref(), Some("task_b_matching"));
        assert_eq!(item.quality_score, Some(0.9));
    }

    #[test]
    fn test_patch_ignores_unknown_fields() {
        let patch: ItemPatch =
            serde_json::from_value(json!({"id": "other", "status": "pending", "qualityScore": 4}))
                .unwrap();
        assert_eq!(patch.quality_score, Some(4.0));

        let mut item = LabelingItem::new("a", "in", "out").with_status(ItemStatus::Completed);
        patch.apply_to(&mut item);
        assert_eq!(item.id, "a");
        assert_eq!(item.status, Some(ItemStatus::Completed));
    }
}
