//! Frame encoder: single-pass classification and capture.
//!
//! Walks the frame pair by pair in scan order, classifying each pair and
//! appending the full-capture pairs to a linear accumulator as they are
//! found. The accumulator is padded with zero pairs to a whole number of
//! `width`-pixel rows and reshaped into the rectangular encoded buffer.
//! Together with the classification table and the per-row offset table
//! this forms the frame's complete history entry: everything the decoder
//! needs to resolve any pair, now or up to three frames later.

use crate::codec::classify::{ClassMap, classify_pair};
use crate::codec::cost::Touches;
use crate::codec::region::RegionSet;
use crate::codec::types::FrameBuffer;
use crate::error::FoveaError;

// ── EncodedFrame ─────────────────────────────────────────────────

/// One frame's encoded form: the compact capture buffer plus the tables
/// needed to locate any pair inside it. Immutable once built; the history
/// ring stores these as-is.
#[derive(Debug, Clone)]
pub struct EncodedFrame {
    /// Source frame width in pixels.
    pub width: u32,
    /// Source frame height in pixels.
    pub height: u32,
    /// Bytes per pixel.
    pub channels: usize,
    /// Per-pair classification, `height x width/2`.
    pub classes: ClassMap,
    /// Entry `r` is the captured-pixel count accumulated before row `r`.
    pub row_offsets: Vec<u32>,
    /// Captured pairs packed row-major into `width` columns, zero-padded
    /// at the tail to complete the last row.
    pub pixels: FrameBuffer,
    /// Padded captured pixel count, equal to the buffer's pixel area.
    pub captured: u32,
}

impl EncodedFrame {
    /// Classify and capture `frame` under the policy in `regions`.
    pub fn encode(frame: &FrameBuffer, regions: &RegionSet) -> Result<Self, FoveaError> {
        if frame.width % 2 != 0 {
            return Err(FoveaError::OddWidth(frame.width));
        }

        let width = frame.width as usize;
        let height = frame.height as usize;
        let pairs_per_row = width / 2;

        let mut classes = ClassMap::with_capacity(height, pairs_per_row);
        let mut row_offsets = Vec::with_capacity(height);
        let mut data = Vec::new();
        let mut captured: u32 = 0;

        for row in 0..height {
            row_offsets.push(captured);
            for pair in 0..pairs_per_row {
                let x = (pair * 2) as u32;
                let code = classify_pair(regions.regions(), x, row as u32);
                if code.is_full() {
                    data.extend_from_slice(frame.pixel(x, row as u32));
                    data.extend_from_slice(frame.pixel(x + 1, row as u32));
                    captured += 2;
                }
                classes.push(code);
            }
        }

        // Zero pairs complete the final buffer row.
        while width > 0 && captured as usize % width != 0 {
            data.resize(data.len() + 2 * frame.channels, 0);
            captured += 2;
        }

        let buffer_rows = if width == 0 {
            0
        } else {
            captured as usize / width
        };
        let pixels = FrameBuffer::from_raw(frame.width, buffer_rows as u32, frame.channels, data)?;

        Ok(Self {
            width: frame.width,
            height: frame.height,
            channels: frame.channels,
            classes,
            row_offsets,
            pixels,
            captured,
        })
    }

    /// Write-side work done producing this frame: every captured pixel
    /// (padding included), every classification code, every offset entry.
    pub fn write_touches(&self) -> Touches {
        Touches {
            pixels: self.captured as u64,
            codes: (self.classes.height() * self.classes.pairs_per_row()) as u64,
            offsets: self.row_offsets.len() as u64,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
