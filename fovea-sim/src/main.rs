//! FOVEA simulator entry point.
//!
//! ```text
//! fovea-sim -i frames/ -r regions/ -o out/              Encode + decode a sequence
//! fovea-sim -r regions/ -o out/ --nooutput 1080 1920    Statistics only
//! ```
//!
//! Reconstructed frames land in the output directory, encoded-buffer
//! diagnostic images under `encoded/`, per-frame and cumulative cost
//! statistics under `stats/`.

mod config;
mod runner;
mod stats;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::SimConfig;
use crate::runner::{RunMode, RunnerOptions, SequenceRunner};

// ── CLI ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "fovea-sim", about = "Region-adaptive temporal frame codec simulator")]
struct Cli {
    /// Directory of input frames, processed in sorted order.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory, created if missing.
    #[arg(short, long)]
    output: PathBuf,

    /// Directory of per-frame region CSV files.
    #[arg(short, long)]
    region: PathBuf,

    /// Statistics-only mode: skip image I/O and reconstruction, driving
    /// classification and encoding from the region files alone at the
    /// given frame dimensions.
    #[arg(long, num_args = 2, value_names = ["HEIGHT", "WIDTH"])]
    nooutput: Option<Vec<u32>>,

    /// Path to configuration TOML file.
    #[arg(short, long, default_value = "fovea-sim.toml")]
    config: PathBuf,
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = SimConfig::load(&cli.config);

    // Init tracing.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("fovea-sim v{}", env!("CARGO_PKG_VERSION"));

    let opts = match build_options(&cli) {
        Ok(opts) => opts,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("Use -h or --help to print usage.");
            std::process::exit(1);
        }
    };

    // Ctrl-C handler: request a stop at the next frame boundary.
    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = Arc::clone(&stop);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Ctrl-C received; stopping after the current frame");
        stop_clone.store(true, Ordering::SeqCst);
    });

    let runner = SequenceRunner::new(opts, config, stop);
    match tokio::task::spawn_blocking(move || runner.run()).await {
        Ok(Ok(summary)) => {
            let totals = summary.totals.combined();
            info!(
                "{:.2} MB estimated in total ({} pixel, {} code, {} offset touches)",
                totals.megabytes(),
                totals.pixels,
                totals.codes,
                totals.offsets
            );
            info!(
                "{} {} frames in {:.2?}",
                if summary.interrupted {
                    "interrupted after"
                } else {
                    "completed"
                },
                summary.frames,
                summary.elapsed
            );
        }
        Ok(Err(e)) => {
            error!("processing failed: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            error!("runner task failed: {e}");
            std::process::exit(1);
        }
    }
}

// ── Argument validation ──────────────────────────────────────────

/// Turn raw CLI flags into validated runner options. Path problems are
/// reported as plain messages so `main` can print them usage-style.
fn build_options(cli: &Cli) -> Result<RunnerOptions, String> {
    require_dir(&cli.region, "region")?;

    let mode = match &cli.nooutput {
        Some(dims) => {
            // clap guarantees exactly two values.
            let (height, width) = (dims[0], dims[1]);
            if height == 0 || width == 0 {
                return Err("Frame dimensions must be nonzero.".into());
            }
            if width % 2 != 0 {
                return Err(format!("Frame width must be even, got {width}."));
            }
            RunMode::StatsOnly { height, width }
        }
        None => {
            let input = cli
                .input
                .as_ref()
                .ok_or("Missing --input (required unless --nooutput is given).")?;
            require_dir(input, "input")?;
            RunMode::Simulate {
                input: input.clone(),
            }
        }
    };

    Ok(RunnerOptions {
        mode,
        output: cli.output.clone(),
        region: cli.region.clone(),
    })
}

fn require_dir(path: &Path, what: &str) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("{} folder does not exist: {}", what, path.display()));
    }
    if !path.is_dir() {
        return Err(format!("{} is not a folder: {}", what, path.display()));
    }
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────
