//! Loading item collections from JSON and JSONL files.
//!
//! A `.jsonl` file holds one item per line; anything else is read as a JSON
//! array of items. Ids must be unique within a collection.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{AletheiaError, Result};
use crate::item::LabelingItem;

/// Load items from a file, choosing the format by extension.
pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<LabelingItem>> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|source| AletheiaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_jsonl = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("jsonl") || e.eq_ignore_ascii_case("ndjson"))
        .unwrap_or(false);

    if is_jsonl {
        parse_jsonl(&content)
    } else {
        parse_items(&content)
    }
}

/// Parse a JSON array of items.
pub fn parse_items(content: &str) -> Result<Vec<LabelingItem>> {
    let items: Vec<LabelingItem> = serde_json::from_str(content)?;
    check_unique_ids(&items)?;
    Ok(items)
}

/// Parse one item per non-empty line.
pub fn parse_jsonl(content: &str) -> Result<Vec<LabelingItem>> {
    let mut items = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let item = serde_json::from_str(line).map_err(|e| AletheiaError::Parse {
            line: idx + 1,
            message: e.to_string(),
        })?;
        items.push(item);
    }

    check_unique_ids(&items)?;
    Ok(items)
}

/// Write items as a pretty JSON array.
pub fn to_json(items: &[LabelingItem]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

fn check_unique_ids(items: &[LabelingItem]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(AletheiaError::DuplicateId(item.id.clone()));
        }
    }
    Ok(())
}
