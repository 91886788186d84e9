//! Domain-specific error types for the FOVEA codec.
//!
//! All fallible operations return `Result<T, FoveaError>`.
//! No panics on invalid input; every error is typed and recoverable.

use thiserror::Error;

/// The canonical error type for the FOVEA codec.
#[derive(Debug, Error)]
pub enum FoveaError {
    // ── Configuration Errors ─────────────────────────────────────
    /// Invalid command-line arguments or input/region paths.
    #[error("invalid configuration: {0}")]
    Config(String),

    // ── Region Record Errors ─────────────────────────────────────
    /// A region descriptor row could not be parsed or fails validation.
    #[error("malformed region record at line {line}: {reason}")]
    MalformedRegion { line: usize, reason: String },

    // ── Frame Geometry Errors ────────────────────────────────────
    /// Pair coding and tail padding both require an even column count.
    #[error("frame width must be even for pair coding, got {0}")]
    OddWidth(u32),

    /// A pixel buffer's length does not match its stated dimensions.
    #[error("pixel buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// A frame's dimensions drifted mid-sequence; the history ring
    /// cannot mix geometries without corrupting temporal lookups.
    #[error("frame is {got_width}x{got_height} but the sequence started at {want_width}x{want_height}")]
    SizeMismatch {
        want_width: u32,
        want_height: u32,
        got_width: u32,
        got_height: u32,
    },

    // ── Decoding Errors ──────────────────────────────────────────
    /// Reconstruction was requested before any frame was encoded.
    #[error("no frames in history; encode and push a frame before reconstructing")]
    EmptyHistory,

    /// A resolved position fell outside the encoded buffer. This is an
    /// internal invariant violation: classification, offsets and buffer
    /// contents disagree about where a captured pair lives.
    #[error("resolved pixel index {index} outside encoded buffer of {len} pixels")]
    BufferIndexInconsistency { index: usize, len: usize },

    // ── External Collaborator Errors ─────────────────────────────
    /// Image load/save failed in the driver.
    #[error("image error: {0}")]
    Image(String),

    /// The filesystem layer reported an error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = FoveaError::OddWidth(7);
        assert!(e.to_string().contains('7'));

        let e = FoveaError::MalformedRegion {
            line: 3,
            reason: "expected 6 fields, got 5".into(),
        };
        assert!(e.to_string().contains("line 3"));
        assert!(e.to_string().contains("6 fields"));

        let e = FoveaError::BufferIndexInconsistency { index: 80, len: 64 };
        assert!(e.to_string().contains("80"));
        assert!(e.to_string().contains("64"));
    }

    #[test]
    fn from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: FoveaError = io_err.into();
        assert!(matches!(e, FoveaError::Io(_)));
    }
}
