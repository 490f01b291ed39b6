//! Fields command

use console::style;
use pkgsift_core::{ALL_FIELDS, Catalog};
use std::path::Path;

use crate::error::Result;

/// List the field scopes a catalog supports
pub fn run(catalog_path: &Path) -> Result<()> {
    let catalog = Catalog::load(catalog_path)?;
    let fields = catalog.field_names();

    println!(
        "{} {}",
        style(ALL_FIELDS).bold(),
        style("(full package text)").dim()
    );
    for field in &fields {
        println!("{}", field);
    }

    println!();
    println!(
        "{}",
        style(format!(
            "{} fields shared by {} packages",
            fields.len(),
            catalog.len()
        ))
        .dim()
    );

    Ok(())
}
