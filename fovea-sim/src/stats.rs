//! Statistics artifacts: per-frame CSVs, the cumulative totals CSV and
//! the JSON run summary.

use std::io;
use std::path::Path;

use serde::Serialize;

use fovea_core::{FrameCost, Touches};

/// JSON summary of a whole run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Frames fully processed (an interrupted run reports fewer than the
    /// sequence length).
    pub frames: u64,
    /// Cumulative write/read touch totals.
    pub totals: FrameCost,
    /// Estimated size of the combined totals, in megabytes.
    pub estimated_megabytes: f64,
}

/// Write one cost record (per-frame or totals) as a small CSV: a header
/// plus one row each for the write side, the read side and both combined.
pub fn write_cost_csv(path: &Path, cost: &FrameCost) -> io::Result<()> {
    let mut text = String::from("side,megabytes,pixel_touches,code_touches,offset_touches\n");
    push_row(&mut text, "write", cost.write);
    push_row(&mut text, "read", cost.read);
    push_row(&mut text, "combined", cost.combined());
    std::fs::write(path, text)
}

fn push_row(text: &mut String, side: &str, touches: Touches) {
    text.push_str(&format!(
        "{side},{:.6},{},{},{}\n",
        touches.megabytes(),
        touches.pixels,
        touches.codes,
        touches.offsets,
    ));
}

/// Write the JSON run summary.
pub fn write_summary(path: &Path, report: &RunReport) -> io::Result<()> {
    let text = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    std::fs::write(path, text)
}

// ── Tests ────────────────────────────────────────────────────────
