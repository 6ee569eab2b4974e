//! netdissect CLI entry point.

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use netdissect::cli::{Args, FramePrinter};
use netdissect_core::Session;

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    let config = args.session_config();
    info!(?config, "starting session");
    let mut printer = FramePrinter::new(Session::new(config), args.fail_fast);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stats = match &args.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            printer.run(BufReader::new(file), &mut out)
        }
        None => printer.run(io::stdin().lock(), &mut out),
    }
    .context("Failed to process frames")?;

    info!(
        printed = stats.printed,
        skipped = stats.skipped,
        "done"
    );
    Ok(())
}
