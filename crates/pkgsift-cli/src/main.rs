//! pkgsift CLI - Incremental filtering of a package catalog

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;

use error::CliError;

#[derive(Parser)]
#[command(name = "pkgsift")]
#[command(author = "pkgsift Contributors")]
#[command(version)]
#[command(about = "Filter a package catalog by query, field and ownership", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a catalog once and print the visible packages
    Filter {
        /// Catalog file (YAML or JSON)
        catalog: PathBuf,

        /// Query text (overrides the URL fragment)
        #[arg(short, long)]
        query: Option<String>,

        /// Restrict matching to one field ("all" for the full text)
        #[arg(short, long)]
        field: Option<String>,

        /// Only show packages in namespaces you own
        #[arg(long)]
        own: bool,

        /// Page URL whose fragment seeds the query
        #[arg(long)]
        url: Option<String>,

        /// Config file (defaults to the user config directory)
        #[arg(long, env = "PKGSIFT_CONFIG")]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the fields every package in a catalog carries
    Fields {
        /// Catalog file (YAML or JSON)
        catalog: PathBuf,
    },

    /// Replay a timed input script against a catalog
    Replay {
        /// Catalog file (YAML or JSON)
        catalog: PathBuf,

        /// Script file (YAML list of timed input events)
        script: PathBuf,

        /// Config file (defaults to the user config directory)
        #[arg(long, env = "PKGSIFT_CONFIG")]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Filter interactively from commands read on stdin
    Watch {
        /// Catalog file (YAML or JSON)
        catalog: PathBuf,

        /// Page URL whose fragment seeds the query
        #[arg(long)]
        url: Option<String>,

        /// Config file (defaults to the user config directory)
        #[arg(long, env = "PKGSIFT_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Filter {
            catalog,
            query,
            field,
            own,
            url,
            config,
            json,
        } => commands::filter::run(
            &catalog,
            query.as_deref(),
            field.as_deref(),
            own,
            url.as_deref(),
            config.as_deref(),
            json,
        ),

        Commands::Fields { catalog } => commands::fields::run(&catalog),

        Commands::Replay {
            catalog,
            script,
            config,
            json,
        } => commands::replay::run(&catalog, &script, config.as_deref(), json),

        Commands::Watch {
            catalog,
            url,
            config,
        } => commands::watch::run(&catalog, url.as_deref(), config.as_deref()),
    };

    if let Err(err) = result {
        exit_with(err);
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_with(err: CliError) -> ! {
    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    std::process::exit(code);
}
