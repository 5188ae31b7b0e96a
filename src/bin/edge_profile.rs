use descale::edges::project;
use descale::image::io::{load_rgba_image, write_json_file};
use descale::periodicity::{fit_with_trace, AxisEstimate, FitTrace};
use serde::Deserialize;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let image = load_rgba_image(&config.input_image)?;
    let projection = project(&image);

    let (estimate_x, trace_x) = fit_with_trace(&projection.col, config.fit.max_scale);
    let (estimate_y, trace_y) = fit_with_trace(&projection.row, config.fit.max_scale);

    let summary = EdgeProfileSummary {
        width: image.w,
        height: image.h,
        max_scale: config.fit.max_scale,
        col_signal: projection.col,
        row_signal: projection.row,
        fit_x: AxisFitSummary {
            estimate: estimate_x,
            trace: trace_x,
        },
        fit_y: AxisFitSummary {
            estimate: estimate_y,
            trace: trace_y,
        },
    };

    write_json_file(&config.output.signals_json, &summary)?;
    println!(
        "Saved edge profile for {} ({} x {}) to {}",
        config.input_image.display(),
        summary.width,
        summary.height,
        config.output.signals_json.display()
    );

    Ok(())
}

fn load_config(path: &Path) -> Result<ProfileConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn usage() -> String {
    "Usage: edge_profile <config.json>".to_string()
}

#[derive(Debug, Deserialize)]
struct ProfileConfig {
    #[serde(rename = "input")]
    input_image: PathBuf,
    #[serde(default)]
    fit: FitConfig,
    output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FitConfig {
    max_scale: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self { max_scale: 16 }
    }
}

#[derive(Debug, Deserialize)]
struct OutputConfig {
    signals_json: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EdgeProfileSummary {
    width: usize,
    height: usize,
    max_scale: usize,
    col_signal: Vec<f64>,
    row_signal: Vec<f64>,
    fit_x: AxisFitSummary,
    fit_y: AxisFitSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AxisFitSummary {
    estimate: AxisEstimate,
    trace: FitTrace,
}
