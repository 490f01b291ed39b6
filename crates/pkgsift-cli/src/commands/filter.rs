//! Filter command

use console::style;
use pkgsift_core::Catalog;
use pkgsift_engine::InputEvent;
use serde_json::json;
use std::path::Path;
use std::time::Instant;

use super::{CatalogFilter, check_field, load_config, mount, page_location};
use crate::display;
use crate::error::{CliError, Result};

/// Filter a catalog once and print what stays visible
pub fn run(
    catalog_path: &Path,
    query: Option<&str>,
    field: Option<&str>,
    own: bool,
    url: Option<&str>,
    config_path: Option<&Path>,
    json_output: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let catalog = Catalog::load(catalog_path)?;
    if let Some(field) = field {
        check_field(&catalog, field)?;
    }
    let location = page_location(catalog_path, url)?;

    let mut filter = mount(catalog, &config, location, |hooks| {
        hooks.scope(field.unwrap_or_default())
    })?;

    let now = Instant::now();
    if let Some(query) = query {
        filter.handle(
            InputEvent::Keystroke {
                value: query.to_string(),
            },
            now,
        )?;
        if let Some(deadline) = filter.pending_deadline() {
            filter.tick(deadline)?;
        }
    }
    if own {
        filter.handle(InputEvent::OwnToggle { checked: true }, now)?;
    }

    if json_output {
        print_json(&filter)
    } else {
        print_table(&filter);
        Ok(())
    }
}

fn print_table(filter: &CatalogFilter) {
    display::print_packages(filter.visible_records(), filter.catalog().len());

    let state = filter.state();
    if !state.query.is_empty() {
        println!(
            "{} {}",
            style("Shareable URL:").dim(),
            filter.location().as_str()
        );
    }
}

fn print_json(filter: &CatalogFilter) -> Result<()> {
    let state = filter.state();
    let output = json!({
        "query": state.query,
        "scope": state.scope(),
        "ownOnly": state.own_only,
        "url": filter.location().as_str(),
        "total": filter.catalog().len(),
        "visible": display::packages_json(filter.visible_records()),
    });

    let text = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::internal(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
