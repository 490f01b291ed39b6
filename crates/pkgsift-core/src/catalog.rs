//! Catalog files
//!
//! The catalog is the already-rendered package list the filter works on:
//!
//! ```yaml
//! packages:
//!   - name: acme/widgets
//!     fields:
//!       description: Widgets for every occasion
//!       version: 1.2.0
//!     text: "optional full text, defaults to the joined fields"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::record::{NAME_FIELD, PackageRecord};

/// Catalog file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub packages: Vec<CatalogEntry>,
}

/// One package as written in a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Package name (`vendor/package`)
    pub name: String,

    /// Labeled fields available as search scopes
    #[serde(default)]
    pub fields: IndexMap<String, String>,

    /// Full searchable text
    #[serde(default)]
    pub text: Option<String>,
}

impl From<CatalogEntry> for PackageRecord {
    fn from(entry: CatalogEntry) -> Self {
        match entry.text {
            Some(text) => PackageRecord::with_text(entry.name, entry.fields, text),
            None => PackageRecord::new(entry.name, entry.fields),
        }
    }
}

/// Loaded package records, in rendering order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<PackageRecord>,
}

impl Catalog {
    pub fn new(records: Vec<PackageRecord>) -> Self {
        Self { records }
    }

    /// Parse a catalog from YAML (JSON is accepted too, being valid YAML)
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::from_file(file)
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Load a catalog from disk, picking the parser from the extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::CatalogNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content)?,
            _ => Self::from_yaml(&content)?,
        };

        tracing::debug!(
            path = %path.display(),
            packages = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    fn from_file(file: CatalogFile) -> Result<Self> {
        if let Some(entry) = file.packages.iter().find(|e| e.name.trim().is_empty()) {
            return Err(CoreError::InvalidCatalog {
                message: format!(
                    "package with fields [{}] has an empty name",
                    entry.fields.keys().cloned().collect::<Vec<_>>().join(", ")
                ),
            });
        }

        if let Some(entry) = file.packages.iter().find(|e| {
            e.fields
                .get(NAME_FIELD)
                .is_some_and(|field| field != &e.name)
        }) {
            return Err(CoreError::InvalidCatalog {
                message: format!(
                    "package '{}' has a `{}` field that differs from its name",
                    entry.name, NAME_FIELD
                ),
            });
        }

        Ok(Self::new(
            file.packages.into_iter().map(PackageRecord::from).collect(),
        ))
    }

    pub fn records(&self) -> &[PackageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fields present on every record, in the first record's order.
    /// These are the valid field scopes.
    pub fn field_names(&self) -> Vec<&str> {
        let Some(first) = self.records.first() else {
            return Vec::new();
        };

        first
            .fields()
            .keys()
            .map(String::as_str)
            .filter(|field| self.records.iter().all(|r| r.field(field).is_some()))
            .collect()
    }

    /// Whether a field can be used as a scope
    pub fn has_field(&self, field: &str) -> bool {
        !self.records.is_empty() && self.records.iter().all(|r| r.field(field).is_some())
    }
}
