#![doc = include_str!("../README.md")]

// End-to-end surface: the analyzer, its reports, the grid model, and image
// handling.
pub mod analyzer;
pub mod diagnostics;
pub mod grid;
pub mod image;

// Building blocks behind the analyzer. Public so a host can assemble its own
// pipeline (say, a GPU projection feeding the stock fitter), but more likely
// to change shape than the surface above.
pub mod edges;
pub mod periodicity;
pub mod reconstruct;
pub mod spectrum;

// The names most callers need, lifted to the crate root.
pub use crate::analyzer::{AnalyzerParams, PixelScaleAnalyzer};
pub use crate::diagnostics::{AnalysisReport, GridEstimate, PipelineTrace};
pub use crate::grid::{GridBounds, GridModel};
pub use crate::periodicity::AxisEstimate;

/// Small prelude for quick experiments.
///
/// ```
/// use descale::prelude::*;
///
/// # fn main() {
/// let (w, h) = (64usize, 64usize);
/// let img = ImageRgbaF32::new(w, h);
///
/// let analyzer = PixelScaleAnalyzer::new(AnalyzerParams::default());
/// let estimate = analyzer.process(&img);
/// println!(
///     "scale=({:.2}, {:.2}) latency_ms={:.3}",
///     estimate.x.scale, estimate.y.scale, estimate.latency_ms
/// );
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageRgbaF32;
    pub use crate::{AnalyzerParams, AxisEstimate, GridEstimate, GridModel, PixelScaleAnalyzer};
}
