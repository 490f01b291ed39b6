//! Watch command
//!
//! Reads page interactions from stdin, one per line:
//!
//! ```text
//! type <text>      set the query input to <text>
//! clear            empty the query input with its clear button
//! field [<name>]   change the field scope (no name for full text)
//! own on|off       flip the "own packages only" checkbox
//! esc              press Escape
//! ```
//!
//! Passes are printed as they run; typing is debounced like on a live page.

use console::style;
use pkgsift_core::Catalog;
use pkgsift_engine::{InputEvent, PassReport, drive};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::{CatalogFilter, load_config, mount, page_location};
use crate::error::{CliError, Result};

const EVENT_BUFFER: usize = 64;

/// Filter interactively until stdin closes
pub fn run(catalog_path: &Path, url: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let catalog = Catalog::load(catalog_path)?;
    let location = page_location(catalog_path, url)?;
    let mut filter = mount(catalog, &config, location, |hooks| hooks)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::internal(format!("Failed to start runtime: {}", e)))?;

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let (read, ()) = runtime.block_on(async {
        tokio::join!(read_commands(tx), drive(&mut filter, rx, print_pass))
    });
    read?;

    println!("{}", filter.location().as_str());
    Ok(())
}

async fn read_commands(tx: mpsc::Sender<InputEvent>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let events = match parse_command(&line) {
            Ok(events) => events,
            Err(e) => {
                eprintln!("{} {}", style("error:").red(), e);
                continue;
            }
        };
        for event in events {
            if tx.send(event).await.is_err() {
                return Ok(());
            }
        }
    }

    Ok(())
}

fn print_pass(filter: &CatalogFilter, report: &PassReport) {
    println!(
        "{} query={:?} {}/{} visible",
        style("pass").cyan(),
        filter.state().query,
        report.visible,
        report.total,
    );
    for record in filter.visible_records() {
        println!("  {}", record.name());
    }
}

/// Turn one line of input into the events a page would emit for it
pub fn parse_command(line: &str) -> Result<Vec<InputEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let events = match command {
        "type" => vec![InputEvent::Keystroke {
            value: rest.to_string(),
        }],
        // Clearing the input empties it and then fires the clear affordance
        "clear" => vec![
            InputEvent::Keystroke {
                value: String::new(),
            },
            InputEvent::Clear {
                value: String::new(),
            },
        ],
        "field" => vec![InputEvent::FieldScope {
            value: rest.to_string(),
        }],
        "own" => {
            let checked = match rest {
                "on" => true,
                "off" => false,
                other => {
                    return Err(CliError::usage(format!(
                        "expected `own on` or `own off`, got `own {}`",
                        other
                    )));
                }
            };
            vec![InputEvent::OwnToggle { checked }]
        }
        "esc" | "escape" => vec![InputEvent::Escape],
        other => {
            return Err(CliError::Usage {
                message: format!("unknown command `{}`", other),
                help: Some("Commands: type <text>, clear, field [<name>], own on|off, esc".to_string()),
            });
        }
    };

    Ok(events)
}
