//! Ownership roster

use serde::{Deserialize, Serialize};

use crate::record::PackageRecord;

/// Namespace fragments identifying "own" packages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct OwnershipRoster {
    entries: Vec<String>,
}

impl OwnershipRoster {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|e| e.into().to_lowercase()).collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the record's namespace contains any roster entry.
    ///
    /// Containment, not equality: `ac` owns `acme/widgets`.
    pub fn owns(&self, record: &PackageRecord) -> bool {
        let namespace = record.namespace();
        self.entries
            .iter()
            .any(|entry| namespace.contains(entry.as_str()))
    }
}

impl From<Vec<String>> for OwnershipRoster {
    fn from(entries: Vec<String>) -> Self {
        Self::new(entries)
    }
}

impl From<OwnershipRoster> for Vec<String> {
    fn from(roster: OwnershipRoster) -> Self {
        roster.entries
    }
}
