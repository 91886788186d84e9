//! Sequence runner: the per-frame processing loop.
//!
//! Walks the input and region directories in sorted order and pushes each
//! frame through the pipeline: load (or synthesize), parse regions,
//! encode, insert into the history ring, reconstruct, save artifacts,
//! record costs. Frames are strictly sequential; temporal skip resolution
//! depends on the preceding frames' finished ring entries. A stop flag is
//! checked between frames, so interruption never leaves a half-processed
//! frame in the ring.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use fovea_core::{
    CostEstimator, EncodedFrame, FoveaError, FrameBuffer, FrameCost, FrameHistory, RegionSet,
    reconstruct,
};

use crate::config::SimConfig;
use crate::stats;

// ── Options ──────────────────────────────────────────────────────

/// How frames are sourced.
#[derive(Debug, Clone)]
pub enum RunMode {
    /// Load frames from an input directory, reconstruct and save output
    /// images.
    Simulate { input: PathBuf },
    /// Statistics only: synthesize zero frames at the given dimensions
    /// from the region files alone and skip reconstruction and image I/O.
    StatsOnly { height: u32, width: u32 },
}

/// Validated runner inputs, assembled by `main` from the CLI.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub mode: RunMode,
    pub output: PathBuf,
    pub region: PathBuf,
}

/// What a finished (or interrupted) run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub frames: u64,
    pub totals: FrameCost,
    pub interrupted: bool,
    pub elapsed: Duration,
}

// ── SequenceRunner ───────────────────────────────────────────────

/// Owns the mutable per-sequence state: the history ring and the cost
/// estimator. Both are touched only between `process_frame` calls.
pub struct SequenceRunner {
    opts: RunnerOptions,
    config: SimConfig,
    stop: Arc<AtomicBool>,
    history: FrameHistory,
    estimator: CostEstimator,
    expected_dims: Option<(u32, u32)>,
}

impl SequenceRunner {
    pub fn new(opts: RunnerOptions, config: SimConfig, stop: Arc<AtomicBool>) -> Self {
        Self {
            opts,
            config,
            stop,
            history: FrameHistory::new(),
            estimator: CostEstimator::new(),
            expected_dims: None,
        }
    }

    /// Process the whole sequence and write the cumulative artifacts.
    pub fn run(mut self) -> Result<RunSummary, FoveaError> {
        std::fs::create_dir_all(&self.opts.output)?;
        let encoded_dir = self.opts.output.join(&self.config.output.encoded_subdir);
        let stats_dir = self.opts.output.join(&self.config.output.stats_subdir);
        std::fs::create_dir_all(&encoded_dir)?;
        std::fs::create_dir_all(&stats_dir)?;

        let region_files = sorted_files(&self.opts.region)?;
        let frame_files = match &self.opts.mode {
            RunMode::Simulate { input } => sorted_files(input)?,
            RunMode::StatsOnly { .. } => region_files.clone(),
        };
        let total = frame_files.len();

        info!("starting processing on {total} frames");
        let started = Instant::now();
        let mut interrupted = false;

        for (index, frame_path) in frame_files.iter().enumerate() {
            if self.stop.load(Ordering::SeqCst) {
                warn!("interrupted after {index} frames");
                interrupted = true;
                break;
            }

            let region_path = match &self.opts.mode {
                RunMode::Simulate { .. } => region_files.get(index).map(PathBuf::as_path),
                RunMode::StatsOnly { .. } => Some(frame_path.as_path()),
            };
            let cost = self.process_frame(frame_path, region_path, &encoded_dir, &stats_dir)?;

            info!(
                "{}% done ({}/{total})",
                (index + 1) * 100 / total.max(1),
                index + 1
            );
            info!(
                "{:.2} MB estimated written ({} pixel, {} code, {} offset touches)",
                cost.write.megabytes(),
                cost.write.pixels,
                cost.write.codes,
                cost.write.offsets
            );
            info!(
                "{:.2} MB estimated read ({} pixel, {} code, {} offset touches)",
                cost.read.megabytes(),
                cost.read.pixels,
                cost.read.codes,
                cost.read.offsets
            );
        }

        let totals = self.estimator.totals();
        stats::write_cost_csv(&stats_dir.join(&self.config.output.total_file), &totals)?;
        stats::write_summary(
            &stats_dir.join(&self.config.output.summary_file),
            &stats::RunReport {
                frames: self.estimator.frames(),
                totals,
                estimated_megabytes: totals.combined().megabytes(),
            },
        )?;

        Ok(RunSummary {
            frames: self.estimator.frames(),
            totals,
            interrupted,
            elapsed: started.elapsed(),
        })
    }

    // ── Per-frame pipeline ───────────────────────────────────────

    fn process_frame(
        &mut self,
        frame_path: &Path,
        region_path: Option<&Path>,
        encoded_dir: &Path,
        stats_dir: &Path,
    ) -> Result<FrameCost, FoveaError> {
        let frame = match self.opts.mode {
            RunMode::Simulate { .. } => {
                let frame = load_frame(frame_path)?;
                self.check_dims(&frame)?;
                frame
            }
            RunMode::StatsOnly { height, width } => FrameBuffer::zeroed(width, height, 3),
        };

        let regions = match region_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                RegionSet::parse(&text, frame.width, frame.height)?
            }
            None => {
                debug!("no region file for {}; full-frame capture", frame_path.display());
                RegionSet::full_frame(frame.width, frame.height)
            }
        };

        let encoded = EncodedFrame::encode(&frame, &regions)?;
        let write = encoded.write_touches();

        let file_name = frame_path
            .file_name()
            .ok_or_else(|| FoveaError::Config(format!("bad file name: {}", frame_path.display())))?;

        let read = if let RunMode::Simulate { .. } = self.opts.mode {
            // The encoded buffer image is a diagnostic; an all-reuse frame
            // captures nothing and has nothing to save.
            if encoded.pixels.height > 0 {
                save_frame(&encoded_dir.join(file_name), &encoded.pixels)?;
            }
            self.history.push(encoded);

            let decoded = reconstruct(&self.history)?;
            save_frame(&self.opts.output.join(file_name), &decoded.image)?;
            decoded.touches
        } else {
            self.history.push(encoded);
            Default::default()
        };

        let cost = self.estimator.record(write, read);
        let stem = frame_path
            .file_stem()
            .unwrap_or(file_name)
            .to_string_lossy();
        stats::write_cost_csv(&stats_dir.join(format!("{stem}.csv")), &cost)?;
        Ok(cost)
    }

    fn check_dims(&mut self, frame: &FrameBuffer) -> Result<(), FoveaError> {
        match self.expected_dims {
            None => {
                self.expected_dims = Some((frame.width, frame.height));
                Ok(())
            }
            Some((w, h)) if (w, h) == (frame.width, frame.height) => Ok(()),
            Some((w, h)) => Err(FoveaError::SizeMismatch {
                want_width: w,
                want_height: h,
                got_width: frame.width,
                got_height: frame.height,
            }),
        }
    }
}

// ── File helpers ─────────────────────────────────────────────────

/// Regular files in `dir`, sorted by name.
fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>, FoveaError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load an image file as a 3-channel frame.
fn load_frame(path: &Path) -> Result<FrameBuffer, FoveaError> {
    let img = image::open(path)
        .map_err(|e| FoveaError::Image(format!("{}: {e}", path.display())))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    FrameBuffer::from_raw(width, height, 3, img.into_raw())
}

/// Save a 3-channel frame as an image file (format from the extension).
fn save_frame(path: &Path, frame: &FrameBuffer) -> Result<(), FoveaError> {
    let img = image::RgbImage::from_raw(frame.width, frame.height, frame.data.clone())
        .ok_or_else(|| {
            FoveaError::Image(format!(
                "buffer does not fit {}x{} rgb image",
                frame.width, frame.height
            ))
        })?;
    img.save(path)
        .map_err(|e| FoveaError::Image(format!("{}: {e}", path.display())))
}

// ── Tests ────────────────────────────────────────────────────────
