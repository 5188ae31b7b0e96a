use crate::grid::GridBounds;
use crate::periodicity::FitTrace;
use serde::Serialize;

/// Axis label attached to per-axis stage reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Edge-projection details captured by the analyzer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionStage {
    pub elapsed_ms: f64,
    /// Total edge energy of the column signal (length = width).
    pub col_energy: f64,
    /// Total edge energy of the row signal (length = height).
    pub row_energy: f64,
}

/// One axis fit: the sweep internals plus its wall-clock cost.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitStage {
    pub axis: Axis,
    pub elapsed_ms: f64,
    pub trace: FitTrace,
}

/// Grid-model derivation summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStage {
    pub bounds: GridBounds,
    pub low_res_width: usize,
    pub low_res_height: usize,
}

/// Reconstruction pass summary (preview and/or low-res outputs).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructionStage {
    pub elapsed_ms: f64,
    pub sample_center_only: bool,
    /// Distinct grid cells whose color was computed.
    pub cells_sampled: usize,
}
