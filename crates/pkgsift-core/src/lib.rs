//! pkgsift Core - Types and pure logic for filtering a rendered package catalog
//!
//! This crate provides the foundational types used throughout pkgsift:
//! - `PackageRecord` / `Catalog`: the already-rendered package list
//! - `FilterState`: query, field scope and "own packages only" toggle
//! - `OwnershipRoster`: namespace fragments identifying own packages
//! - `matcher`: case-insensitive substring matching into a `VisibilitySet`
//! - `fragment`: the query <-> URL fragment codec
//! - `FilterConfig`: roster and debounce configuration

pub mod catalog;
pub mod config;
pub mod error;
pub mod fragment;
pub mod matcher;
pub mod record;
pub mod roster;
pub mod state;
pub mod suggestions;

pub use catalog::{Catalog, CatalogEntry, CatalogFile};
pub use config::{DEFAULT_DEBOUNCE, FilterConfig, MAX_DEBOUNCE};
pub use error::{CoreError, Result};
pub use fragment::Location;
pub use matcher::{Matcher, VisibilitySet, evaluate, matches};
pub use record::{NAME_FIELD, PackageRecord};
pub use roster::OwnershipRoster;
pub use state::{ALL_FIELDS, FilterState, parse_scope};
