//! # fovea codec: region-adaptive temporal frame coding
//!
//! Simulates a foveated compression scheme: every horizontal pixel pair of
//! a frame is classified into one of four encode strategies, only the
//! full-capture pairs are packed into a compact linear buffer, and the
//! decoder rebuilds the frame by resolving each pair's strategy, reaching
//! back through a short ring of prior frames for temporally reused pairs.
//!
//! ## Pipeline
//!
//! ```text
//! region CSV ──► RegionSet ──► classify_pair ──► EncodedFrame
//!                                                    │
//!                                              FrameHistory (depth 4)
//!                                                    │
//!                                  reconstruct ◄─────┘
//!                                       │
//!                              DecodedFrame + Touches ──► CostEstimator
//! ```
//!
//! ## Sub-modules
//!
//! | Module     | Purpose                                             |
//! |------------|-----------------------------------------------------|
//! | `types`    | Raw interleaved pixel buffers                       |
//! | `region`   | Region rectangles, record parsing, sort + fallback  |
//! | `classify` | 2-bit pair codes and the strategy resolver          |
//! | `encoder`  | Single-pass classification + capture into a buffer  |
//! | `history`  | Fixed-depth ring of encoded frames                  |
//! | `decoder`  | Position resolution and full-frame reconstruction   |
//! | `cost`     | Touch counting and bitstream size estimation        |

pub mod classify;
pub mod cost;
pub mod decoder;
pub mod encoder;
pub mod history;
pub mod region;
pub mod types;

// ── Re-exports ───────────────────────────────────────────────────

pub use classify::{ClassMap, PairCode, classify_pair};
pub use cost::{CostEstimator, FrameCost, Touches};
pub use decoder::{DecodedFrame, reconstruct, resolve_position};
pub use encoder::EncodedFrame;
pub use history::{FrameHistory, HISTORY_DEPTH};
pub use region::{Region, RegionSet};
pub use types::FrameBuffer;
