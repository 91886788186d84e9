//! # fovea-core
//!
//! Core library for FOVEA, a region-adaptive, temporally-aware frame codec
//! simulator.
//!
//! This crate contains:
//! - **Frame types**: `FrameBuffer`, the raw interleaved pixel container
//! - **Region model**: `Region` / `RegionSet`, parsed per-frame encode policy
//! - **Classification**: `PairCode` and the per-pixel-pair strategy resolver
//! - **Encoder**: `EncodedFrame`, single-pass classification plus capture
//! - **History**: `FrameHistory`, the depth-4 ring enabling temporal reuse
//! - **Decoder**: `reconstruct` / `resolve_position`, full-frame rebuild
//! - **Cost model**: `Touches` / `CostEstimator`, the bitstream size estimate
//! - **Error**: `FoveaError`, a typed `thiserror`-based error hierarchy
//!
//! The crate is synchronous and does no I/O of its own: frames come in and
//! go out as pixel buffers, region descriptors come in as text. Loading,
//! saving and directory walking belong to the driver binary.

pub mod codec;
pub mod error;

// ── Re-exports for ergonomic usage ───────────────────────────────

pub use codec::classify::{ClassMap, PairCode, classify_pair};
pub use codec::cost::{CostEstimator, FrameCost, Touches};
pub use codec::decoder::{DecodedFrame, reconstruct, resolve_position};
pub use codec::encoder::EncodedFrame;
pub use codec::history::{FrameHistory, HISTORY_DEPTH};
pub use codec::region::{Region, RegionSet};
pub use codec::types::FrameBuffer;
pub use error::FoveaError;
