//! Parameter types configuring the analyzer.
//!
//! Defaults suit screenshots of pixel art upscaled by common factors. For
//! larger sources raise `max_scale`; the scan cost grows with it only through
//! the widened DFT band.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Analyzer-wide parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AnalyzerParams {
    /// Largest scale (high-resolution pixels per logical pixel) considered
    /// on each axis. Must be at least 2.
    pub max_scale: usize,
    /// Sample each grid cell at its center pixel instead of box-averaging a
    /// window around the center.
    pub sample_center_only: bool,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            max_scale: 16,
            sample_center_only: false,
        }
    }
}

/// Load analyzer parameters from a JSON file.
pub fn load_params(path: &Path) -> Result<AnalyzerParams, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read params {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse params {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let params = AnalyzerParams::default();
        assert_eq!(params.max_scale, 16);
        assert!(!params.sample_center_only);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: AnalyzerParams = serde_json::from_str(r#"{"max_scale": 32}"#).unwrap();
        assert_eq!(params.max_scale, 32);
        assert!(!params.sample_center_only);
    }
}
