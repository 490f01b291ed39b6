//! Display formatting for CLI output

use console::style;
use pkgsift_core::PackageRecord;
use pkgsift_engine::{ReplayPass, Trigger};
use serde_json::{Value, json};

const NAME_WIDTH: usize = 32;
const VERSION_WIDTH: usize = 12;
const DESCRIPTION_WIDTH: usize = 50;

/// Print visible packages as a table
pub fn print_packages<'a>(records: impl IntoIterator<Item = &'a PackageRecord>, total: usize) {
    let records: Vec<&PackageRecord> = records.into_iter().collect();

    if records.is_empty() {
        println!("No packages match ({} hidden)", total);
        return;
    }

    println!(
        "{:<NAME_WIDTH$} {:<VERSION_WIDTH$} {}",
        style("NAME").bold(),
        style("VERSION").bold(),
        style("DESCRIPTION").bold(),
    );

    for record in &records {
        println!(
            "{:<NAME_WIDTH$} {:<VERSION_WIDTH$} {}",
            record.name(),
            record.field("version").unwrap_or("-"),
            truncate(record.field("description").unwrap_or(""), DESCRIPTION_WIDTH),
        );
    }

    println!();
    println!(
        "{}",
        style(format!("{} of {} packages shown", records.len(), total)).dim()
    );
}

/// JSON form of a package list
pub fn packages_json<'a>(records: impl IntoIterator<Item = &'a PackageRecord>) -> Value {
    Value::Array(
        records
            .into_iter()
            .map(|r| {
                json!({
                    "name": r.name(),
                    "fields": r.fields(),
                })
            })
            .collect(),
    )
}

/// Print one replayed pass
pub fn print_pass(pass: &ReplayPass) {
    let trigger = match pass.trigger {
        Trigger::Event(kind) => kind.to_string(),
        Trigger::Debounce => "debounce".to_string(),
    };
    let at = format!("{:>7}ms", pass.at.as_millis());

    match (&pass.report, &pass.error) {
        (Some(report), _) => {
            println!(
                "{} {:<12} query={:?} {}/{} visible",
                style(at).dim(),
                style(trigger).cyan(),
                pass.query,
                report.visible,
                report.total,
            );
            for name in &pass.visible {
                println!("  {}", name);
            }
        }
        (None, Some(error)) => {
            println!(
                "{} {:<12} query={:?} {}",
                style(at).dim(),
                style(trigger).cyan(),
                pass.query,
                style(format!("failed: {}", error)).red(),
            );
        }
        (None, None) => {}
    }
}

/// Truncate to `max` characters, marking the cut with an ellipsis
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
