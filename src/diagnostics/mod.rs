//! Serializable diagnostics returned alongside the ranked lines.
//!
//! `LineReport` is the main entry point returned by the pipeline, bundling
//! the ranked lines with a `PipelineTrace` that records per-stage counts,
//! saddle bookkeeping and timings. Everything serializes as camelCase JSON.

pub mod pipeline;
pub mod stages;
pub mod timing;

pub use pipeline::{InputDescriptor, LineReport, PipelineTrace};
pub use stages::{ChainStage, CrossingStage, EdgelStage, LineStage};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
