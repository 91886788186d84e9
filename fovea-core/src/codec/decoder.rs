//! Frame decoder: position resolution and full reconstruction.
//!
//! Rebuilds a full-resolution frame from the history ring. Full captures
//! and stride duplicates resolve inside the current frame's encoded
//! buffer; skip pairs scan backwards through the ring for the most recent
//! frame that captured the position; uncovered pairs stay black.
//!
//! A skip pair with no resolvable match anywhere in the retained window
//! (stream start included) decodes to black rather than being left
//! undefined. Likewise a stride pair with nothing captured before it.

use crate::codec::classify::PairCode;
use crate::codec::cost::Touches;
use crate::codec::encoder::EncodedFrame;
use crate::codec::history::FrameHistory;
use crate::codec::types::FrameBuffer;
use crate::error::FoveaError;

// ── Position resolution ──────────────────────────────────────────

/// Linear pixel index of pair `pair` in row `row` of `entry`'s encoded
/// buffer: the row's starting offset plus two pixels for every
/// full-capture pair to its left.
///
/// Pure in the tables stored per frame; derivable at any time, for the
/// current frame or a historical one. For a non-captured pair this yields
/// the slot the pair *would* occupy, one past the last captured pair
/// before it in scan order.
pub fn resolve_position(entry: &EncodedFrame, row: usize, pair: usize) -> usize {
    let full_before = entry.classes.row(row)[..pair]
        .iter()
        .filter(|code| code.is_full())
        .count();
    entry.row_offsets[row] as usize + full_before * 2
}

// ── DecodedFrame ─────────────────────────────────────────────────

/// A reconstructed frame plus the read-side work it took to build.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Full-resolution output image.
    pub image: FrameBuffer,
    /// Read-side touch counts for the cost estimator.
    pub touches: Touches,
}

// ── Reconstruction ───────────────────────────────────────────────

/// Reconstruct the frame at the front of `history`.
///
/// The ring must already contain the current frame (push before decode).
/// Skip pairs consult entries 1.. in order, newest prior frame first, and
/// take the first frame that captured or strided the position; with the
/// ring capped at four entries this never reaches more than three frames
/// back.
pub fn reconstruct(history: &FrameHistory) -> Result<DecodedFrame, FoveaError> {
    let current = history.current().ok_or(FoveaError::EmptyHistory)?;
    let mut image = FrameBuffer::zeroed(current.width, current.height, current.channels);
    let mut touches = Touches::default();

    let pairs_per_row = current.classes.pairs_per_row();
    for row in 0..current.height as usize {
        // Modeled cache fills: each retained frame's offset entry and
        // classification row are read once per output row.
        touches.offsets += history.len() as u64;
        touches.codes += (history.len() * pairs_per_row) as u64;

        for pair in 0..pairs_per_row {
            let code = current.classes.code(row, pair);
            if code.is_black() {
                continue;
            }
            if code.is_skip() {
                for entry in history.prior() {
                    let hist_code = entry.classes.code(row, pair);
                    if hist_code.in_frame() {
                        copy_pair(entry, hist_code, row, pair, &mut image)?;
                        touches.pixels += 2;
                        break;
                    }
                }
                // No retained frame captured this position: stays black.
            } else {
                copy_pair(current, code, row, pair, &mut image)?;
                touches.pixels += 2;
            }
        }
    }

    Ok(DecodedFrame { image, touches })
}

/// Copy one pair out of `entry`'s encoded buffer into the output at
/// `(pair*2, row)`. Stride pairs read the captured pair immediately
/// before their resolved slot; a stride with nothing captured before it
/// leaves the output black.
fn copy_pair(
    entry: &EncodedFrame,
    code: PairCode,
    row: usize,
    pair: usize,
    out: &mut FrameBuffer,
) -> Result<(), FoveaError> {
    let mut index = resolve_position(entry, row, pair);
    if code == PairCode::STRIDE {
        if index < 2 {
            return Ok(());
        }
        index -= 2;
    }

    let len = entry.captured as usize;
    if index + 1 >= len {
        return Err(FoveaError::BufferIndexInconsistency { index, len });
    }

    for offset in 0..2 {
        let src = entry.pixels.pixel_at(index + offset);
        out.pixel_mut((pair * 2 + offset) as u32, row as u32)
            .copy_from_slice(src);
    }
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────
