//! Match evaluation
//!
//! A record is visible when its haystack for the active scope contains the
//! case-folded query AND, with "own packages only" on, the roster owns it.

use crate::error::Result;
use crate::record::PackageRecord;
use crate::roster::OwnershipRoster;
use crate::state::FilterState;

/// Decide whether a single record is visible under `state`
pub fn matches(record: &PackageRecord, state: &FilterState, roster: &OwnershipRoster) -> Result<bool> {
    Matcher::new(state, roster).matches(record)
}

/// Compute visibility for every record.
///
/// Fails on the first malformed scoped-field lookup, before anything has
/// been rendered.
pub fn evaluate(
    records: &[PackageRecord],
    state: &FilterState,
    roster: &OwnershipRoster,
) -> Result<VisibilitySet> {
    if state.is_unfiltered() {
        return Ok(VisibilitySet::all(records.len()));
    }

    let matcher = Matcher::new(state, roster);
    let flags = records
        .iter()
        .map(|record| matcher.matches(record))
        .collect::<Result<Vec<_>>>()?;
    Ok(VisibilitySet::from_flags(flags))
}

/// A filter state prepared for repeated evaluation
#[derive(Debug)]
pub struct Matcher<'a> {
    needle: String,
    scope: Option<&'a str>,
    own_only: bool,
    roster: &'a OwnershipRoster,
}

impl<'a> Matcher<'a> {
    pub fn new(state: &'a FilterState, roster: &'a OwnershipRoster) -> Self {
        Self {
            needle: state.query.to_lowercase(),
            scope: state.scope(),
            own_only: state.own_only,
            roster,
        }
    }

    pub fn matches(&self, record: &PackageRecord) -> Result<bool> {
        if self.needle.is_empty() && !self.own_only {
            return Ok(true);
        }

        let text_match = record.folded_haystack(self.scope)?.contains(&self.needle);
        let eligible = !self.own_only || self.roster.owns(record);

        Ok(text_match && eligible)
    }
}

/// Per-record visibility for one filter pass, indexed like the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilitySet {
    flags: Vec<bool>,
}

impl VisibilitySet {
    /// Everything visible
    pub fn all(len: usize) -> Self {
        Self {
            flags: vec![true; len],
        }
    }

    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self { flags }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.flags.iter().filter(|v| **v).count()
    }

    pub fn is_everything(&self) -> bool {
        self.flags.iter().all(|v| *v)
    }

    /// Indices of visible records
    pub fn visible(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.then_some(i))
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }
}
