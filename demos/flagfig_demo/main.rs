//! # flagfig demo application
//!
//! A sample CLI whose flags are derived from the [`Options`] config struct.
//! It resolves the configuration from the command line and prints it as TOML.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example flagfig_demo
//! cargo run --example flagfig_demo -- --train-batch-size 16 --no-bool-value
//! cargo run --example flagfig_demo -- --list-flags
//! RUST_LOG=flagfig=debug cargo run --example flagfig_demo -- --val-limit 3
//! ```

mod config;

use clap::{CommandFactory, FromArgMatches, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use flagfig::{FlagKind, Flagfig};

use config::Options;

/// flagfig demo: flags derived from a nested config struct.
#[derive(Parser, Debug)]
#[command(name = "flagfig-demo")]
struct Cli {
    /// Print the derived flags instead of the resolved configuration.
    #[arg(long)]
    list_flags: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let surface = Flagfig::builder::<Options>()
        .build()
        .unwrap_or_else(|e| e.exit());

    // Hand-written flags and derived flags share one command.
    let matches = surface.augment(Cli::command()).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if cli.list_flags {
        for spec in surface.specs() {
            let kind = match spec.kind {
                FlagKind::Boolean => format!("bool (also --{})", spec.negated_long()),
                FlagKind::Typed(kind) => kind.value_name().to_lowercase(),
                FlagKind::Choice(variants) => variants.join("|"),
            };
            println!("{:<24} {:<20} {kind}", spec.name, spec.dest);
        }
        return;
    }

    let options = surface.from_matches(&matches).unwrap_or_else(|e| e.exit());
    debug!(?options, "resolved options");

    match toml::to_string_pretty(&options) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => {
            eprintln!("Failed to render options: {e}");
            std::process::exit(1);
        }
    }
}
