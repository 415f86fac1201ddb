//! Labeling items and their workflow status.

mod labeling_item;
mod status;

pub use labeling_item::{ItemPatch, LabelingItem, Metadata};
pub use status::{ItemStatus, Pillar};
