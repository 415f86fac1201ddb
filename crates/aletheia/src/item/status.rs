//! Workflow status and pillar classification for labeling items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of a labeling item in the review workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    /// Not yet reviewed.
    Pending,
    /// Currently open in the session.
    InProgress,
    /// Reviewed and accepted.
    Completed,
    /// Passed over without a decision.
    Skipped,
}

impl ItemStatus {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "Pending",
            ItemStatus::InProgress => "In Progress",
            ItemStatus::Completed => "Completed",
            ItemStatus::Skipped => "Skipped",
        }
    }

    /// Wire name, as used in item files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::InProgress => "in-progress",
            ItemStatus::Completed => "completed",
            ItemStatus::Skipped => "skipped",
        }
    }

    /// Check if this is a terminal status (completed or skipped).
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemStatus::Completed | ItemStatus::Skipped)
    }

    /// Check if the item still waits for review.
    pub fn is_pending(&self) -> bool {
        matches!(self, ItemStatus::Pending)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level domain classification that selects a built-in rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    /// Real platform interactions: accuracy, tonality, task fit.
    Technical,
    /// Behavioral analysis: neutrality, ethics, GDPR compliance.
    Psychological,
    /// Academic material: citations, methodology, factual accuracy.
    Scientific,
}

impl Pillar {
    /// All pillars, in catalogue order.
    pub fn all() -> &'static [Pillar] {
        &[Pillar::Technical, Pillar::Psychological, Pillar::Scientific]
    }

    /// Configuration key for this pillar.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Technical => "technical",
            Pillar::Psychological => "psychological",
            Pillar::Scientific => "scientific",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Pillar::Technical => "Technical",
            Pillar::Psychological => "Psychological",
            Pillar::Scientific => "Scientific",
        }
    }

    /// One-line description of what reviewers check for this pillar.
    pub fn description(&self) -> &'static str {
        match self {
            Pillar::Technical => {
                "Technical: Real user interactions from platform. Focus on accuracy, tonality, and task fit."
            }
            Pillar::Psychological => {
                "Psychological: Behavioral analysis with professional validation. Focus on neutrality, ethics, and GDPR compliance."
            }
            Pillar::Scientific => {
                "Scientific: Open-source academic materials. Focus on citations, methodology, and factual accuracy."
            }
        }
    }

    /// Display icon.
    pub fn icon(&self) -> &'static str {
        match self {
            Pillar::Technical => "🔧",
            Pillar::Psychological => "🧠",
            Pillar::Scientific => "📚",
        }
    }

    /// Display color name.
    pub fn color(&self) -> &'static str {
        match self {
            Pillar::Technical => "blue",
            Pillar::Psychological => "purple",
            Pillar::Scientific => "green",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pillar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technical" | "tech" => Ok(Pillar::Technical),
            "psychological" | "psych" => Ok(Pillar::Psychological),
            "scientific" | "science" => Ok(Pillar::Scientific),
            _ => Err(format!(
                "Unknown pillar: {}. Use technical, psychological, or scientific.",
                s
            )),
        }
    }
}
