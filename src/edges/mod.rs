//! Edge-energy projection: the 2-D image collapsed to two 1-D signals.
//!
//! A true integer upsampling replicates whole pixels, so a column boundary of
//! the original produces an entire column of high-resolution edges and the
//! row-projected edge signal is independent of column content. Summing the
//! absolute RGB differences along each axis therefore yields an approximate
//! comb train with the upscaling period, which the periodicity fitter
//! consumes directly.
//!
//! Design goals
//! - Favor clarity and cache-friendly row access over micro-optimizations.
//! - Handle the left/top border by clamping the predecessor index, so
//!   `col[0]` and `row[0]` are always zero.
//! - Keep the projection replaceable: hosts with a GPU reduction can supply
//!   their own [`ProjectionBackend`] producing the same values.

pub mod project;

pub use project::{project, CpuProjector, EdgeProjection, ProjectionBackend};
