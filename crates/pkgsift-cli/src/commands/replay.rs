//! Replay command

use console::style;
use pkgsift_core::Catalog;
use pkgsift_engine::{parse_script, replay};
use std::path::Path;

use super::{load_config, mount, page_location};
use crate::display;
use crate::error::{CliError, Result};

/// Replay a timed input script and print every pass it triggers
pub fn run(
    catalog_path: &Path,
    script_path: &Path,
    config_path: Option<&Path>,
    json_output: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let catalog = Catalog::load(catalog_path)?;
    let location = page_location(catalog_path, None)?;

    let script = std::fs::read_to_string(script_path)?;
    let steps = parse_script(&script)?;

    let mut filter = mount(catalog, &config, location, |hooks| hooks)?;
    let passes = replay(&mut filter, &steps)?;

    if json_output {
        let text = serde_json::to_string_pretty(&passes)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    if passes.is_empty() {
        println!("Script ran {} steps without triggering a pass", steps.len());
        return Ok(());
    }

    for pass in &passes {
        display::print_pass(pass);
    }

    let failed = passes.iter().filter(|p| p.error.is_some()).count();
    println!();
    println!(
        "{}",
        style(format!(
            "{} steps, {} passes ({} failed)",
            steps.len(),
            passes.len(),
            failed
        ))
        .dim()
    );

    Ok(())
}
