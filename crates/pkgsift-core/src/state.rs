//! Filter state

use serde::{Deserialize, Serialize};

/// Select value meaning "search the full text"
pub const ALL_FIELDS: &str = "all";

/// Current filter inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text query, as typed
    pub query: String,

    /// Field to search instead of the full text
    #[serde(default)]
    pub field_scope: Option<String>,

    /// Restrict to packages in the ownership roster
    #[serde(default)]
    pub own_only: bool,
}

impl FilterState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, field: impl Into<String>) -> Self {
        self.field_scope = Some(field.into());
        self
    }

    pub fn own_only(mut self, own_only: bool) -> Self {
        self.own_only = own_only;
        self
    }

    /// Nothing to filter by: every record is visible
    pub fn is_unfiltered(&self) -> bool {
        self.query.is_empty() && !self.own_only
    }

    /// Scope as a borrowed field name
    pub fn scope(&self) -> Option<&str> {
        self.field_scope.as_deref()
    }
}

/// Parse a field-scope control value: empty or `all` means no scope
pub fn parse_scope(value: &str) -> Option<String> {
    if value.is_empty() || value == ALL_FIELDS {
        None
    } else {
        Some(value.to_string())
    }
}
