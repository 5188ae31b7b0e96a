use descale::analyzer::load_params;
use descale::diagnostics::{AnalysisReport, ReconstructionStage, StageClock};
use descale::image::io::{load_rgba_image, save_rgba_image, write_json_file};
use descale::reconstruct::Reconstructor;
use descale::{AnalyzerParams, GridModel, PixelScaleAnalyzer};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args().next().unwrap_or_else(|| "descale".to_string());
    let config = parse_args(&program)?;

    let image = load_rgba_image(&config.input_path)?;
    println!(
        "Input: {} ({} x {})",
        config.input_path.display(),
        image.w,
        image.h
    );

    let mut params = match &config.params_path {
        Some(path) => load_params(path)?,
        None => AnalyzerParams::default(),
    };
    if let Some(max_scale) = config.max_scale {
        params.max_scale = max_scale;
    }
    if config.sample_center {
        params.sample_center_only = true;
    }
    if params.max_scale < 2 {
        return Err(format!(
            "--max-scale must be at least 2 (got {})",
            params.max_scale
        ));
    }

    let analyzer = PixelScaleAnalyzer::new(params);
    let mut report = analyzer.process_with_diagnostics(&image);

    if config.low_res_out.is_some() || config.preview_out.is_some() {
        run_reconstruction(&analyzer, &image, &mut report, &config)?;
    }

    if config.format.includes_text() {
        print_text_summary(&report);
    }

    if config.format.includes_json() {
        if let Some(path) = &config.json_out {
            write_json_file(path, &report)?;
            println!("JSON report written to {}", path.display());
        } else {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            if config.format == OutputFormat::Both {
                println!("\nJSON report:\n{json}");
            } else {
                println!("{json}");
            }
        }
    }

    Ok(())
}

fn run_reconstruction(
    analyzer: &PixelScaleAnalyzer,
    image: &descale::image::ImageRgbaF32,
    report: &mut AnalysisReport,
    config: &CliConfig,
) -> Result<(), String> {
    let estimate = &report.estimate;
    let grid = GridModel::from_estimates(&estimate.x, &estimate.y, image.w, image.h);
    let sample_center_only = analyzer.params().sample_center_only;
    let mut reconstructor = Reconstructor::new(image, grid, sample_center_only);

    let clock = StageClock::start();
    if let Some(path) = &config.low_res_out {
        let low_res = reconstructor.low_res();
        save_rgba_image(&low_res, path)?;
        println!("Low-res: {} ({} x {})", path.display(), low_res.w, low_res.h);
    }
    if let Some(path) = &config.preview_out {
        let preview = reconstructor.preview();
        save_rgba_image(&preview, path)?;
        println!("Preview: {} ({} x {})", path.display(), preview.w, preview.h);
    }
    let elapsed_ms = clock.elapsed_ms();

    report.trace.reconstruction = Some(ReconstructionStage {
        elapsed_ms,
        sample_center_only,
        cells_sampled: reconstructor.cells_sampled(),
    });
    report.trace.timings.reconstruction_ms = Some(elapsed_ms);
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Both,
}

impl OutputFormat {
    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "both" => Ok(Self::Both),
            other => Err(format!("Unknown format '{other}'. Use text|json|both.")),
        }
    }

    fn includes_text(&self) -> bool {
        matches!(self, Self::Text | Self::Both)
    }

    fn includes_json(&self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

struct CliConfig {
    input_path: PathBuf,
    format: OutputFormat,
    json_out: Option<PathBuf>,
    params_path: Option<PathBuf>,
    max_scale: Option<usize>,
    sample_center: bool,
    low_res_out: Option<PathBuf>,
    preview_out: Option<PathBuf>,
}

fn parse_args(program: &str) -> Result<CliConfig, String> {
    let mut args = env::args().skip(1);
    let mut input_path: Option<PathBuf> = None;
    let mut format = OutputFormat::Text;
    let mut json_out: Option<PathBuf> = None;
    let mut params_path: Option<PathBuf> = None;
    let mut max_scale: Option<usize> = None;
    let mut sample_center = false;
    let mut low_res_out: Option<PathBuf> = None;
    let mut preview_out: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", usage(program));
                std::process::exit(0);
            }
            "--format" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--format expects a value\n{}", usage(program)))?;
                format = OutputFormat::from_str(&value)?;
            }
            "--json-out" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--json-out expects a path\n{}", usage(program)))?;
                json_out = Some(PathBuf::from(value));
            }
            "--params" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--params expects a path\n{}", usage(program)))?;
                params_path = Some(PathBuf::from(value));
            }
            "--max-scale" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--max-scale expects a value\n{}", usage(program)))?;
                let parsed: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid max scale '{value}'"))?;
                max_scale = Some(parsed);
            }
            "--sample-center" => {
                sample_center = true;
            }
            "--low-res" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--low-res expects a path\n{}", usage(program)))?;
                low_res_out = Some(PathBuf::from(value));
            }
            "--preview" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--preview expects a path\n{}", usage(program)))?;
                preview_out = Some(PathBuf::from(value));
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'\n{}", usage(program)));
            }
            _ => {
                if input_path.is_some() {
                    return Err(format!(
                        "Unexpected positional argument '{arg}'\n{}",
                        usage(program)
                    ));
                }
                input_path = Some(PathBuf::from(arg));
            }
        }
    }

    let input_path = input_path.ok_or_else(|| usage(program))?;
    Ok(CliConfig {
        input_path,
        format,
        json_out,
        params_path,
        max_scale,
        sample_center,
        low_res_out,
        preview_out,
    })
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <image.png> [--max-scale n] [--sample-center] [--params params.json] \\\n         [--low-res out.png] [--preview out.png] [--format text|json|both] [--json-out report.json]\n\n\
Recovers the native pixel grid of an upscaled pixel-art image and optionally\n\
reconstructs the low-resolution original.\n\
Examples:\n  {program} screenshot.png --low-res restored.png\n  {program} art.png --max-scale 32 --format both --json-out report.json\n"
    )
}

fn print_text_summary(report: &AnalysisReport) {
    let est = &report.estimate;
    println!("Analysis summary");
    println!(
        "  x: scale={:.3} offset={:.3} confidence={:.2}",
        est.x.scale, est.x.offset, est.x.confidence
    );
    println!(
        "  y: scale={:.3} offset={:.3} confidence={:.2}",
        est.y.scale, est.y.offset, est.y.confidence
    );
    println!(
        "  grid cells: x in {}..={}, y in {}..={}",
        est.bounds.min_gx, est.bounds.max_gx, est.bounds.min_gy, est.bounds.max_gy
    );
    println!(
        "  native size: {} x {}",
        est.low_res_width, est.low_res_height
    );
    println!("  latency_ms: {:.3}", est.latency_ms);

    let weak_x = fit_is_weak(&report.trace.fit_x);
    let weak_y = fit_is_weak(&report.trace.fit_y);
    if weak_x || weak_y {
        println!("Warning: weak periodicity signal — image may not be upscaled pixel art");
    }

    let timings = &report.trace.timings;
    println!("\nTimings");
    println!("  projection: {:.3} ms", timings.projection_ms);
    println!("  fit_x: {:.3} ms", timings.fit_x_ms);
    println!("  fit_y: {:.3} ms", timings.fit_y_ms);
    if let Some(ms) = timings.reconstruction_ms {
        println!("  reconstruction: {:.3} ms", ms);
    }
    println!("  total: {:.3} ms", timings.total_ms);
}

fn fit_is_weak(stage: &Option<descale::diagnostics::FitStage>) -> bool {
    stage
        .as_ref()
        .map(|s| s.trace.degenerate || s.trace.fallback)
        .unwrap_or(true)
}
