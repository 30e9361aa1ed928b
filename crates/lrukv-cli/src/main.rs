//! lrukv - replay ADD/GET/DEL scripts against an in-memory LRU cache

mod command;
mod error;
mod replay;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lrukv::Cache;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;

use crate::replay::replay;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items, 0 = unbounded)
    #[arg(short, long, default_value_t = 0)]
    capacity: usize,

    /// Command script to replay (reads stdin when omitted)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries command replies
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    info!("Starting lrukv v{}", env!("CARGO_PKG_VERSION"));
    if args.capacity == 0 {
        info!("Cache capacity: unbounded");
    } else {
        info!("Cache capacity: {}", args.capacity);
    }

    let cache = Cache::new(args.capacity);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            info!("Replaying {}", path.display());
            replay(&cache, BufReader::new(file), &mut out, args.quiet)?
        }
        None => replay(&cache, io::stdin().lock(), &mut out, args.quiet)?,
    };

    info!(
        executed = summary.executed,
        failed = summary.failed,
        entries = cache.len(),
        "Replay finished"
    );

    if summary.failed > 0 {
        bail!("{} malformed command(s)", summary.failed);
    }

    Ok(())
}
