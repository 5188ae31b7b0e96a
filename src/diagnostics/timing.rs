use serde::Serialize;
use std::time::Instant;

/// Stopwatch for a single pipeline stage, read out in fractional
/// milliseconds.
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

/// Wall-clock cost of each analyzer stage in milliseconds.
///
/// The analyzer always runs projection and the two axis fits;
/// `reconstruction_ms` is filled in only when the host asks for an output
/// image after the analysis.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub projection_ms: f64,
    pub fit_x_ms: f64,
    pub fit_y_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconstruction_ms: Option<f64>,
}
