//! Tag reconciliation
//!
//! Computes the minimal change that leaves a device carrying the tag that
//! matches its classification, optionally dropping the opposite tag. Tags
//! other than the two configured ones are never touched.

use crate::tagging::classify::Classification;
use std::collections::BTreeSet;

/// Which tags mark each classification, and whether wrong tags are removed
#[derive(Debug, Clone)]
pub struct TagConfig {
    pub cellular_tag: String,
    pub wifi_tag: String,
    pub remove_wrong: bool,
}

impl TagConfig {
    pub fn desired_tag(&self, classification: Classification) -> &str {
        match classification {
            Classification::Cellular => &self.cellular_tag,
            Classification::WifiOnly => &self.wifi_tag,
        }
    }

    pub fn opposite_tag(&self, classification: Classification) -> &str {
        match classification {
            Classification::Cellular => &self.wifi_tag,
            Classification::WifiOnly => &self.cellular_tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDecision {
    pub device_id: String,
    pub classification: Classification,
    pub tags_to_add: BTreeSet<String>,
    pub tags_to_remove: BTreeSet<String>,
}

impl TagDecision {
    pub fn is_unchanged(&self) -> bool {
        self.tags_to_add.is_empty() && self.tags_to_remove.is_empty()
    }

    /// `(current - remove) ∪ add`, the full set to send to the API
    pub fn resulting_tags(&self, current: &BTreeSet<String>) -> BTreeSet<String> {
        current
            .difference(&self.tags_to_remove)
            .chain(self.tags_to_add.iter())
            .cloned()
            .collect()
    }
}

pub fn reconcile(
    device_id: &str,
    current_tags: &BTreeSet<String>,
    classification: Classification,
    config: &TagConfig,
) -> TagDecision {
    let desired = config.desired_tag(classification);
    let opposite = config.opposite_tag(classification);

    let mut tags_to_add = BTreeSet::new();
    if !current_tags.contains(desired) {
        tags_to_add.insert(desired.to_string());
    }

    // Identical tags would otherwise remove what was just added
    let mut tags_to_remove = BTreeSet::new();
    if config.remove_wrong && opposite != desired && current_tags.contains(opposite) {
        tags_to_remove.insert(opposite.to_string());
    }

    TagDecision {
        device_id: device_id.to_string(),
        classification,
        tags_to_add,
        tags_to_remove,
    }
}
