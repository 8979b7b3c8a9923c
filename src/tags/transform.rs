//! Tag transform engine
//!
//! Applies [`TAG_MAPPING`](super::mapping::TAG_MAPPING) to a canonical tag map
//! and produces one assignment per destination field.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::mapping::{rule_for, Destination, TagGroup};
use super::value::{CanonicalTagMap, TagValue};

/// Destination field -> final value, deduplicated by destination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAssignmentPlan {
    assignments: BTreeMap<Destination, TagValue>,
}

impl TagAssignmentPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, destination: Destination) -> Option<&TagValue> {
        self.assignments.get(&destination)
    }

    /// Assignments belonging to one group, in destination order
    pub fn group(&self, group: TagGroup) -> impl Iterator<Item = (Destination, &TagValue)> {
        self.assignments
            .iter()
            .filter(move |(dest, _)| dest.group() == group)
            .map(|(dest, value)| (*dest, value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Destination, &TagValue)> {
        self.assignments.iter().map(|(dest, value)| (*dest, value))
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Add an assignment unless the destination is already taken.
    ///
    /// Returns false if an earlier assignment was kept.
    pub fn assign(&mut self, destination: Destination, value: TagValue) -> bool {
        match self.assignments.entry(destination) {
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }
}

/// Build the assignment plan for a canonical tag map.
///
/// Keys without a mapping row are skipped. Templated rows are rendered from the
/// whole map, so every source key that targets the same frame yields the same
/// value and the frame is assigned once.
pub fn build_plan(tags: &CanonicalTagMap) -> TagAssignmentPlan {
    let mut plan = TagAssignmentPlan::new();

    for (key, value) in tags {
        let Some(rule) = rule_for(key) else {
            log::debug!("Ignoring unmapped tag: {}", key);
            continue;
        };

        let assigned = match rule.template {
            None => value.clone(),
            Some(template) => match template.render(tags) {
                Some(text) => TagValue::Text(text),
                None => {
                    log::debug!(
                        "Skipping {}: template {} has no leading value",
                        rule.destination.identifier(),
                        template.as_str()
                    );
                    continue;
                }
            },
        };

        if !plan.assign(rule.destination, assigned) {
            log::trace!("{} already assigned, ignoring {}", rule.destination.identifier(), key);
        }
    }

    plan
}
