#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod field;
pub mod pipeline;

// Stage modules – public for tools and tests, considered internals.
pub mod angle;
pub mod chains;
pub mod config;
pub mod crossings;
pub mod edgels;
pub mod lines;

// --- High-level re-exports -------------------------------------------------

// Main entry point: pipeline + parameters.
pub use crate::pipeline::{EdgelPipeline, GradientGate, PipelineParams, Thresholds};

// Results and diagnostics returned by the pipeline.
pub use crate::diagnostics::{LineReport, PipelineTrace};
pub use crate::lines::{LineCost, LineFit, RankedLine};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use edgel_lines::prelude::*;
///
/// # fn main() {
/// let field = ScalarGrid::from_fn(48, 64, |r, c| {
///     let (x, y) = (c as f32 - 32.0, r as f32 - 24.0);
///     x.hypot(y) - 15.0
/// });
/// let report = EdgelPipeline::default().run(&field, &Thresholds::default());
/// for line in report.lines.iter().take(3) {
///     println!("theta={:.3} cost={:.3}", line.fit.theta, line.cost.cost_final);
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::field::{GridRef, GridView, ScalarGrid};
    pub use crate::{EdgelPipeline, LineReport, PipelineParams, RankedLine, Thresholds};
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    // Stage builders.
    pub use crate::chains::{link_chains, split_chain, ChainLinker};
    pub use crate::crossings::ZeroCrossingIndex;
    pub use crate::edgels::EdgelGrid;
    pub use crate::lines::{fit_segments, merge_lines, rank};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        ChainStage, CrossingStage, EdgelStage, InputDescriptor, LineStage, StageTiming,
        TimingBreakdown,
    };
}
