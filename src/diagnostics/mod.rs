//! Unified diagnostics data model exposed by the analyzer and the CLI.
//!
//! `AnalysisReport` is the main entry point returned by
//! [`PixelScaleAnalyzer::process_with_diagnostics`](crate::PixelScaleAnalyzer),
//! bundling the compact estimate (`GridEstimate`) with a `PipelineTrace`
//! describing every stage the pipeline executed.

pub mod pipeline;
pub mod stages;
pub mod timing;

pub use pipeline::{AnalysisReport, GridEstimate, InputDescriptor, PipelineTrace};
pub use stages::{Axis, FitStage, GridStage, ProjectionStage, ReconstructionStage};
pub use timing::{StageClock, TimingBreakdown};
