//! Labeler configuration supplied by the host.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AletheiaError, Result};
use crate::item::{LabelingItem, Pillar};
use crate::validation::CategoryValidation;

/// Display strings for the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub save: String,
    pub skip: String,
    pub validate: String,
    pub pillar: String,
    pub quality: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            save: "Save".to_string(),
            skip: "Skip".to_string(),
            validate: "Validate".to_string(),
            pillar: "Pillar".to_string(),
            quality: "Quality".to_string(),
        }
    }
}

/// Configuration for a labeling session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelerConfig {
    /// Pillar keys reviewers may assign.
    pub pillars: Vec<String>,

    /// Validation settings keyed by pillar or category.
    pub validations: IndexMap<String, CategoryValidation>,

    /// `light`, `dark`, or a host-defined theme name.
    pub theme: String,

    /// Allow editing of the output.
    pub allow_edit: bool,

    /// Show the quality score control.
    pub show_quality_score: bool,

    /// Enable keyboard shortcuts in the host.
    pub enable_keyboard_shortcuts: bool,

    /// Display string overrides.
    pub labels: Labels,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            pillars: Pillar::all().iter().map(|p| p.as_str().to_string()).collect(),
            validations: IndexMap::new(),
            theme: "light".to_string(),
            allow_edit: true,
            show_quality_score: true,
            enable_keyboard_shortcuts: true,
            labels: Labels::default(),
        }
    }
}

impl LabelerConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            AletheiaError::Config(format!("Failed to open config '{}': {}", path.display(), e))
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            AletheiaError::Config(format!("Failed to parse config '{}': {}", path.display(), e))
        })
    }

    /// Restrict the assignable pillars.
    pub fn with_pillars(mut self, pillars: &[Pillar]) -> Self {
        self.pillars = pillars.iter().map(|p| p.as_str().to_string()).collect();
        self
    }

    /// Add validation settings for a pillar or category key.
    pub fn with_validation(mut self, key: impl Into<String>, validation: CategoryValidation) -> Self {
        self.validations.insert(key.into(), validation);
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Allow or forbid output edits.
    pub fn with_allow_edit(mut self, allow: bool) -> Self {
        self.allow_edit = allow;
        self
    }

    /// Show or hide the quality score control.
    pub fn with_show_quality_score(mut self, show: bool) -> Self {
        self.show_quality_score = show;
        self
    }

    /// Enable or disable keyboard shortcuts.
    pub fn with_keyboard_shortcuts(mut self, enabled: bool) -> Self {
        self.enable_keyboard_shortcuts = enabled;
        self
    }

    /// Override display strings.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Whether reviewers may assign this pillar.
    pub fn is_pillar_allowed(&self, pillar: Pillar) -> bool {
        self.pillars.iter().any(|p| p == pillar.as_str())
    }

    /// Validation settings for an item: its pillar key first, then its category.
    pub fn validation_for(&self, item: &LabelingItem) -> Option<&CategoryValidation> {
        item.pillar
            .and_then(|p| self.validations.get(p.as_str()))
            .or_else(|| {
                item.category
                    .as_deref()
                    .and_then(|c| self.validations.get(c))
            })
    }
}
