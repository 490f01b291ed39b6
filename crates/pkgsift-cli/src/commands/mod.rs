//! CLI commands

pub mod fields;
pub mod filter;
pub mod replay;
pub mod watch;

use pkgsift_core::{Catalog, FilterConfig, parse_scope, suggestions::suggest_field};
use pkgsift_engine::{MemoryView, PackageFilter, PageHooks};
use std::path::Path;
use url::Url;

use crate::error::{CliError, Result};

/// A filter mounted over an in-memory rendering of a catalog file
pub type CatalogFilter = PackageFilter<MemoryView, Url>;

/// Load the config from `path`, or from the user config directory
pub fn load_config(path: Option<&Path>) -> Result<FilterConfig> {
    let config = match path {
        Some(path) => FilterConfig::load_from(path),
        None => FilterConfig::load(),
    }
    .map_err(CliError::config)?;

    tracing::debug!(
        path = ?path,
        own_packages = config.roster().entries().len(),
        debounce = ?config.debounce,
        "loaded config"
    );
    Ok(config)
}

/// The page URL a catalog is filtered under: `--url` when given, otherwise
/// the catalog's own file URL
pub fn page_location(catalog_path: &Path, url: Option<&str>) -> Result<Url> {
    if let Some(url) = url {
        return Url::parse(url).map_err(|e| CliError::Usage {
            message: format!("Invalid URL '{}': {}", url, e),
            help: Some("Pass an absolute URL such as https://packages.example.com/#acme".to_string()),
        });
    }

    let absolute = catalog_path.canonicalize()?;
    Url::from_file_path(&absolute)
        .map_err(|()| CliError::usage(format!("Cannot express {} as a URL", absolute.display())))
}

/// Reject a field scope no package carries
pub fn check_field(catalog: &Catalog, field: &str) -> Result<()> {
    let Some(field) = parse_scope(field) else {
        return Ok(());
    };
    if catalog.has_field(&field) {
        return Ok(());
    }

    Err(CliError::filter_with_help(
        format!("Unknown field '{}'", field),
        suggest_field(&field, catalog.field_names()),
    ))
}

/// Mount a filter over every package in `catalog`
pub fn mount(
    catalog: Catalog,
    config: &FilterConfig,
    location: Url,
    hooks: impl FnOnce(PageHooks<MemoryView>) -> PageHooks<MemoryView>,
) -> Result<CatalogFilter> {
    let view = MemoryView::new(catalog.len());
    PackageFilter::mount(
        hooks(PageHooks::new(view)),
        catalog,
        config.roster().clone(),
        location,
        config.debounce,
    )
    .ok_or_else(|| CliError::Catalog {
        message: "catalog has no packages".to_string(),
        help: Some("Add at least one entry under `packages`".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_yaml(
            r#"
packages:
  - name: acme/widgets
    fields:
      description: Widgets
  - name: other/tools
    fields:
      description: Tools
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_check_field_accepts_known_and_all() {
        let catalog = catalog();
        assert!(check_field(&catalog, "description").is_ok());
        assert!(check_field(&catalog, "name").is_ok());
        assert!(check_field(&catalog, "all").is_ok());
        assert!(check_field(&catalog, "").is_ok());
    }

    #[test]
    fn test_check_field_suggests() {
        let err = check_field(&catalog(), "descripton").unwrap_err();
        match err {
            CliError::Filter { message, help } => {
                assert!(message.contains("descripton"));
                assert_eq!(help.as_deref(), Some("Did you mean `description`?"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_page_location_prefers_url() {
        let location = page_location(Path::new("missing.yaml"), Some("https://x.test/#acme")).unwrap();
        assert_eq!(location.fragment(), Some("acme"));

        let err = page_location(Path::new("missing.yaml"), Some("not a url")).unwrap_err();
        assert!(matches!(err, CliError::Usage { .. }));
    }

    #[test]
    fn test_page_location_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, "packages: []\n").unwrap();

        let location = page_location(&path, None).unwrap();
        assert_eq!(location.scheme(), "file");
        assert!(location.path().ends_with("/catalog.yaml"));
    }

    #[test]
    fn test_mount_empty_catalog_fails() {
        let err = mount(
            Catalog::default(),
            &FilterConfig::default(),
            Url::parse("https://x.test/").unwrap(),
            |hooks| hooks,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Catalog { .. }));
    }
}
