//! Package records
//!
//! A record is one rendered catalog entry together with the text the filter
//! searches. Records are built once when the catalog loads and never change.

use indexmap::IndexMap;

use crate::error::{CoreError, Result};
use crate::suggestions::suggest_field;

/// Field every record carries
pub const NAME_FIELD: &str = "name";

/// Separator between a package's namespace and its short name
pub const NAMESPACE_SEPARATOR: char = '/';

/// One catalog entry with its searchable text
#[derive(Debug, Clone)]
pub struct PackageRecord {
    name: String,
    fields: IndexMap<String, String>,
    full_text: String,

    // Case-folded copies, computed once
    folded_text: String,
    folded_fields: IndexMap<String, String>,
    folded_namespace: String,
}

impl PackageRecord {
    /// Build a record whose full text is every field value joined by newlines
    pub fn new(name: impl Into<String>, fields: IndexMap<String, String>) -> Self {
        let name = name.into();
        let fields = with_name_field(&name, fields);
        let full_text = fields.values().map(String::as_str).collect::<Vec<_>>().join("\n");
        Self::assemble(name, fields, full_text)
    }

    /// Build a record with an explicit full text
    pub fn with_text(
        name: impl Into<String>,
        fields: IndexMap<String, String>,
        full_text: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let fields = with_name_field(&name, fields);
        Self::assemble(name, fields, full_text.into())
    }

    fn assemble(name: String, fields: IndexMap<String, String>, full_text: String) -> Self {
        let folded_fields = fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_lowercase()))
            .collect();
        let folded_namespace = namespace_of(&name).to_lowercase();

        Self {
            folded_text: full_text.to_lowercase(),
            folded_fields,
            folded_namespace,
            name,
            fields,
            full_text,
        }
    }

    /// Package name, e.g. `acme/widgets`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full searchable text
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Field-name to field-text mapping, in catalog order
    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    /// Text of a single field
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Lower-cased namespace segment of the package name
    pub fn namespace(&self) -> &str {
        &self.folded_namespace
    }

    /// Case-folded haystack for an optional field scope
    ///
    /// A scope naming a field this record lacks is a catalog contract
    /// violation and is reported, not treated as a miss.
    pub fn folded_haystack(&self, scope: Option<&str>) -> Result<&str> {
        match scope {
            None => Ok(&self.folded_text),
            Some(field) => self
                .folded_fields
                .get(field)
                .map(String::as_str)
                .ok_or_else(|| CoreError::MissingField {
                    package: self.name.clone(),
                    field: field.to_string(),
                    suggestion: suggest_field(field, self.fields.keys().map(String::as_str)),
                }),
        }
    }
}

/// Namespace segment of a package name: the text before the first `/`,
/// or the whole (trimmed) name when there is no separator
pub fn namespace_of(name: &str) -> &str {
    let name = name.trim();
    name.split(NAMESPACE_SEPARATOR).next().unwrap_or(name)
}

/// Put the package name in the `name` field, first unless the caller
/// already placed one
fn with_name_field(name: &str, mut fields: IndexMap<String, String>) -> IndexMap<String, String> {
    if let Some(value) = fields.get_mut(NAME_FIELD) {
        *value = name.to_string();
        return fields;
    }
    let mut ordered = IndexMap::with_capacity(fields.len() + 1);
    ordered.insert(NAME_FIELD.to_string(), name.to_string());
    ordered.extend(fields);
    ordered
}
