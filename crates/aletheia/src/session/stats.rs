//! Aggregate statistics for a labeling session.

use serde::{Deserialize, Serialize};

use crate::item::{ItemStatus, LabelingItem};

/// Counts of items by status, recomputed on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total: usize,
    /// Pending or no status.
    pub pending: usize,
    pub completed: usize,
    pub skipped: usize,
    pub in_progress: usize,
    /// Mean quality score over completed items that have one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_quality: Option<f64>,
}

impl SessionStats {
    /// Compute statistics for a collection.
    pub fn from_items(items: &[LabelingItem]) -> Self {
        let mut stats = Self {
            total: items.len(),
            ..Default::default()
        };

        let mut score_sum = 0.0;
        let mut scored = 0usize;

        for item in items {
            match item.effective_status() {
                ItemStatus::Pending => stats.pending += 1,
                ItemStatus::InProgress => stats.in_progress += 1,
                ItemStatus::Skipped => stats.skipped += 1,
                ItemStatus::Completed => {
                    stats.completed += 1;
                    if let Some(score) = item.quality_score {
                        score_sum += score;
                        scored += 1;
                    }
                }
            }
        }

        if scored > 0 {
            stats.average_quality = Some(score_sum / scored as f64);
        }
        stats
    }

    /// Items that reached a terminal status.
    pub fn decided(&self) -> usize {
        self.completed + self.skipped
    }

    /// Items still to be decided (pending or in progress).
    pub fn remaining(&self) -> usize {
        self.pending + self.in_progress
    }

    /// Percentage of decided items, rounded. Zero for an empty session.
    pub fn progress(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (100.0 * self.decided() as f64 / self.total as f64).round() as u32
    }

    /// Check if every item has been decided.
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }
}
