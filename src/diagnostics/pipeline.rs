use crate::diagnostics::{FitStage, GridStage, ProjectionStage, ReconstructionStage, TimingBreakdown};
use crate::grid::GridBounds;
use crate::periodicity::AxisEstimate;
use serde::Serialize;

/// Compact result of one analysis run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridEstimate {
    pub x: AxisEstimate,
    pub y: AxisEstimate,
    pub bounds: GridBounds,
    pub low_res_width: usize,
    pub low_res_height: usize,
    pub latency_ms: f64,
}

/// Result produced by [`PixelScaleAnalyzer::process_with_diagnostics`](crate::PixelScaleAnalyzer).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub estimate: GridEstimate,
    pub trace: PipelineTrace,
}

/// End-to-end trace describing the internal execution of the analyzer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<ProjectionStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_x: Option<FitStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_y: Option<FitStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconstruction: Option<ReconstructionStage>,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}
