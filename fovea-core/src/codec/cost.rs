//! Bitstream cost estimation.
//!
//! Nothing in this simulator packs real bits, so size is modeled from
//! "touches": every pixel written to or read from an encoded buffer,
//! every classification code produced or consulted, every row offset
//! recorded or cached. Write and read sides are tracked separately, per
//! frame and cumulatively across the sequence. Diagnostic only; the
//! numbers never influence encoding or decoding.

use std::ops::{Add, AddAssign};

use serde::Serialize;

/// Bits per pixel touch: three channel bytes.
const BITS_PER_PIXEL: u64 = 24;
/// Bits per classification code: the 2-bit pair code.
const BITS_PER_CODE: u64 = 2;
/// Bits per row-offset touch: offsets are cached as three bytes.
const BITS_PER_OFFSET: u64 = 24;
/// One megabyte, in bits.
const MEGABYTE_BITS: f64 = 8_000_000.0;

// ── Touches ──────────────────────────────────────────────────────

/// Touch counts for one side (write or read) of one or more frames.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Touches {
    /// Pixels moved into or out of encoded buffers.
    pub pixels: u64,
    /// Classification codes produced or consulted.
    pub codes: u64,
    /// Row-offset entries recorded or cached.
    pub offsets: u64,
}

impl Touches {
    /// Estimated bitstream contribution of these touches.
    pub fn bits(&self) -> u64 {
        self.pixels * BITS_PER_PIXEL + self.codes * BITS_PER_CODE + self.offsets * BITS_PER_OFFSET
    }

    /// [`bits`](Self::bits) expressed in megabytes.
    pub fn megabytes(&self) -> f64 {
        self.bits() as f64 / MEGABYTE_BITS
    }
}

impl Add for Touches {
    type Output = Touches;

    fn add(self, rhs: Touches) -> Touches {
        Touches {
            pixels: self.pixels + rhs.pixels,
            codes: self.codes + rhs.codes,
            offsets: self.offsets + rhs.offsets,
        }
    }
}

impl AddAssign for Touches {
    fn add_assign(&mut self, rhs: Touches) {
        *self = *self + rhs;
    }
}

// ── FrameCost ────────────────────────────────────────────────────

/// Write and read touches for one frame, or totals for a whole run.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct FrameCost {
    pub write: Touches,
    pub read: Touches,
}

impl FrameCost {
    /// Both sides together.
    pub fn combined(&self) -> Touches {
        self.write + self.read
    }
}

// ── CostEstimator ────────────────────────────────────────────────

/// Accumulates per-frame costs into running totals for the sequence.
#[derive(Debug, Default)]
pub struct CostEstimator {
    totals: FrameCost,
    frames: u64,
}

impl CostEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame's touches into the totals and return that frame's
    /// cost record.
    pub fn record(&mut self, write: Touches, read: Touches) -> FrameCost {
        self.totals.write += write;
        self.totals.read += read;
        self.frames += 1;
        FrameCost { write, read }
    }

    /// Cumulative totals over every recorded frame.
    pub fn totals(&self) -> FrameCost {
        self.totals
    }

    /// Number of frames recorded.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

// ── Tests ────────────────────────────────────────────────────────
