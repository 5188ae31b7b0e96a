//! Analyzer pipeline driving scale recovery end-to-end.
//!
//! Typical usage:
//! ```
//! use descale::image::ImageRgbaF32;
//! use descale::{AnalyzerParams, PixelScaleAnalyzer};
//!
//! # fn main() {
//! let image = ImageRgbaF32::new(64, 64);
//! let analyzer = PixelScaleAnalyzer::new(AnalyzerParams::default());
//! let report = analyzer.process_with_diagnostics(&image);
//! println!("x scale: {:.3}", report.estimate.x.scale);
//! # }
//! ```
use super::options::AnalyzerParams;
use crate::diagnostics::{
    AnalysisReport, Axis, FitStage, GridEstimate, GridStage, InputDescriptor, PipelineTrace,
    ProjectionStage, StageClock, TimingBreakdown,
};
use crate::edges::{CpuProjector, EdgeProjection, ProjectionBackend};
use crate::grid::GridModel;
use crate::image::ImageRgbaF32;
use crate::periodicity::{fit_with_trace, AxisEstimate, FitTrace};
use crate::reconstruct::Reconstructor;
use log::debug;

/// Analyzer orchestrating edge projection, per-axis periodicity fits and
/// grid-model derivation.
pub struct PixelScaleAnalyzer {
    params: AnalyzerParams,
    backend: Box<dyn ProjectionBackend + Send + Sync>,
}

struct ProjectionComputation {
    projection: EdgeProjection,
    stage: ProjectionStage,
    elapsed_ms: f64,
}

struct FitComputation {
    estimate: AxisEstimate,
    stage: FitStage,
    elapsed_ms: f64,
}

impl PixelScaleAnalyzer {
    /// Create an analyzer using the reference CPU projection.
    pub fn new(params: AnalyzerParams) -> Self {
        Self::with_backend(params, Box::new(CpuProjector))
    }

    /// Create an analyzer with a custom projection backend (e.g. a GPU
    /// reduction producing the same signals).
    pub fn with_backend(
        params: AnalyzerParams,
        backend: Box<dyn ProjectionBackend + Send + Sync>,
    ) -> Self {
        Self { params, backend }
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    /// Run the analyzer, returning the compact estimate.
    pub fn process(&self, image: &ImageRgbaF32) -> GridEstimate {
        self.process_with_diagnostics(image).estimate
    }

    /// Run the analyzer and capture detailed per-stage diagnostics.
    pub fn process_with_diagnostics(&self, image: &ImageRgbaF32) -> AnalysisReport {
        let (width, height) = (image.w, image.h);
        debug!(
            "PixelScaleAnalyzer::process start w={} h={} max_scale={}",
            width, height, self.params.max_scale
        );
        let total_clock = StageClock::start();

        let ProjectionComputation {
            projection,
            stage: projection_stage,
            elapsed_ms: projection_ms,
        } = self.run_projection(image);

        // Images thinner than two pixels on either axis carry no usable
        // periodicity on both axes, not just the thin one.
        let empty = width < 2 || height < 2;
        let fit_x = self.run_axis_fit(Axis::X, &projection.col, empty);
        let fit_y = self.run_axis_fit(Axis::Y, &projection.row, empty);

        let grid = GridModel::from_estimates(&fit_x.estimate, &fit_y.estimate, width, height);
        let bounds = grid.bounds();
        let (low_res_width, low_res_height) = grid.low_res_size();
        let grid_stage = GridStage {
            bounds,
            low_res_width,
            low_res_height,
        };

        let latency = total_clock.elapsed_ms();
        debug!(
            "PixelScaleAnalyzer::process done scale=({:.3}, {:.3}) offset=({:.3}, {:.3}) latency_ms={:.3}",
            fit_x.estimate.scale,
            fit_y.estimate.scale,
            fit_x.estimate.offset,
            fit_y.estimate.offset,
            latency
        );

        let estimate = GridEstimate {
            x: fit_x.estimate,
            y: fit_y.estimate,
            bounds,
            low_res_width,
            low_res_height,
            latency_ms: latency,
        };

        let timings = TimingBreakdown {
            total_ms: latency,
            projection_ms,
            fit_x_ms: fit_x.elapsed_ms,
            fit_y_ms: fit_y.elapsed_ms,
            reconstruction_ms: None,
        };

        let trace = PipelineTrace {
            input: InputDescriptor { width, height },
            timings,
            projection: Some(projection_stage),
            fit_x: Some(fit_x.stage),
            fit_y: Some(fit_y.stage),
            grid: Some(grid_stage),
            reconstruction: None,
        };

        AnalysisReport { estimate, trace }
    }

    /// Rebuild the low-resolution image implied by `estimate`.
    pub fn reconstruct_low_res(
        &self,
        image: &ImageRgbaF32,
        estimate: &GridEstimate,
    ) -> ImageRgbaF32 {
        let grid = GridModel::from_estimates(&estimate.x, &estimate.y, image.w, image.h);
        Reconstructor::new(image, grid, self.params.sample_center_only).low_res()
    }

    /// Rebuild the full-size preview implied by `estimate`.
    pub fn reconstruct_preview(
        &self,
        image: &ImageRgbaF32,
        estimate: &GridEstimate,
    ) -> ImageRgbaF32 {
        let grid = GridModel::from_estimates(&estimate.x, &estimate.y, image.w, image.h);
        Reconstructor::new(image, grid, self.params.sample_center_only).preview()
    }

    fn run_projection(&self, image: &ImageRgbaF32) -> ProjectionComputation {
        let clock = StageClock::start();
        let projection = self.backend.project(image);
        let elapsed_ms = clock.elapsed_ms();
        let stage = ProjectionStage {
            elapsed_ms,
            col_energy: EdgeProjection::energy(&projection.col),
            row_energy: EdgeProjection::energy(&projection.row),
        };
        ProjectionComputation {
            projection,
            stage,
            elapsed_ms,
        }
    }

    fn run_axis_fit(&self, axis: Axis, signal: &[f64], empty: bool) -> FitComputation {
        let clock = StageClock::start();
        let (estimate, trace) = if empty {
            (
                AxisEstimate::degenerate(),
                FitTrace {
                    n: signal.len(),
                    degenerate: true,
                    ..FitTrace::default()
                },
            )
        } else {
            fit_with_trace(signal, self.params.max_scale)
        };
        let elapsed_ms = clock.elapsed_ms();
        FitComputation {
            estimate,
            stage: FitStage {
                axis,
                elapsed_ms,
                trace,
            },
            elapsed_ms,
        }
    }
}
