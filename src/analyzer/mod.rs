//! Analyzer orchestrating the scale-recovery pipeline end-to-end.
//!
//! Overview
//! - Collapses the RGBA image into two 1-D edge-energy signals (one per
//!   axis) through a replaceable projection backend.
//! - Fits the dominant period of each signal independently; the two axes
//!   share no state and can disagree (non-square upscales are legal).
//! - Derives the grid model covering the image and, on request, reconstructs
//!   a low-resolution output and a full-size preview.
//!
//! Key ideas
//! - Every operation is a pure function of its inputs; the analyzer holds
//!   only parameters and the projection backend, never image state.
//! - The offset of each axis is an equivalence class modulo the scale; no
//!   attempt is made to disambiguate shifted-by-one-period grids.
//!
//! Modules
//! - `options` – analyzer parameters and JSON loading.
//! - `pipeline` – the main [`PixelScaleAnalyzer`] implementation.

pub mod options;
mod pipeline;

pub use options::{load_params, AnalyzerParams};
pub use pipeline::PixelScaleAnalyzer;
