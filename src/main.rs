mod actions;
mod cli;
mod db;
mod error;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use db::PackageDatabase;
use lazy_static::lazy_static;
use types::config::{Config, Opts};

// Initialize writer
lazy_static! {
    static ref WRITER: cli::Writer = cli::Writer::new();
}

// Relative to root
const DEFAULT_ADMINDIR: &str = "var/lib/dpkg";
const STATUS_FILE: &str = "status";

/// Exit codes:
/// 1 => program screwed up
fn main() {
    if let Err(err) = try_main() {
        error!("{}", err.to_string());
        err.chain().skip(1).for_each(|cause| {
            due_to!("{}", cause);
        });
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let opts: Opts = Opts::parse();
    WRITER.set_verbose(opts.verbose);

    let config = match &opts.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let status_path = opts.status_path(&config);
    debug!("Using status database at {}", status_path.display());

    let db = PackageDatabase::parse(&status_path).context("Failed to load installed packages")?;
    if db.is_empty() {
        warn!("No installed package found in {}", status_path.display());
    }

    actions::fullfill_command(&opts, &db)
}
