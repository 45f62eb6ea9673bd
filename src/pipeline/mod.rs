//! End-to-end pipeline from a scalar field to ranked lines.
//!
//! Stages
//! - Crossings: interpolate zero crossings on every grid edge (optionally
//!   restricted to a [`Roi`](crate::crossings::Roi)).
//! - Edgels: one or two edgels per cell, saddle cells disambiguated from
//!   their neighbors.
//! - Chains: link edgels across shared crossed edges, keep the chains whose
//!   peak gradient passes the `grad` gate, and cut them at gradient
//!   reversals.
//! - Lines: PCA-fit every segment, merge near-collinear fits that pass the
//!   `line` gate, and rank the merged lines by cost.
//!
//! Typical usage:
//! ```no_run
//! use edgel_lines::field::ScalarGrid;
//! use edgel_lines::{EdgelPipeline, PipelineParams, Thresholds};
//!
//! # fn example(field: ScalarGrid) {
//! let pipeline = EdgelPipeline::new(PipelineParams::default());
//! let report = pipeline.run(&field, &Thresholds::default());
//! if let Some(best) = report.best() {
//!     println!("best line cost: {:.3}", best.cost.cost_final);
//! }
//! # }
//! ```

mod params;
#[cfg(test)]
mod tests;

pub use params::{GradientGate, PipelineParams, Thresholds};

use crate::chains::{link_chains, split_chain, Segment};
use crate::crossings::ZeroCrossingIndex;
use crate::diagnostics::{
    elapsed_ms, ChainStage, CrossingStage, EdgelStage, InputDescriptor, LineReport, LineStage,
    PipelineTrace, TimingBreakdown,
};
use crate::edgels::EdgelGrid;
use crate::field::GridView;
use crate::lines::{fit_segments, is_eligible, merge_lines, rank};
use log::debug;
use std::time::{Duration, Instant};

/// Stateless runner holding the stage parameters.
#[derive(Clone, Debug, Default)]
pub struct EdgelPipeline {
    params: PipelineParams,
}

impl EdgelPipeline {
    pub fn new(params: PipelineParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    pub fn set_params(&mut self, params: PipelineParams) {
        self.params = params;
    }

    /// Deadline for a run started at `start`. A budget that is not a
    /// representable duration means no deadline.
    fn deadline(&self, start: Instant) -> Option<Instant> {
        let ms = self.params.time_budget_ms?;
        let budget = Duration::try_from_secs_f64(ms / 1000.0).ok()?;
        start.checked_add(budget)
    }

    /// Run every stage over `field`.
    pub fn run<G: GridView>(&self, field: &G, thresholds: &Thresholds) -> LineReport {
        let total_start = Instant::now();
        let deadline = self.deadline(total_start);
        let mut timings = TimingBreakdown::default();

        let stage_start = Instant::now();
        let crossings = match self.params.roi {
            Some(roi) => ZeroCrossingIndex::build_roi(field, roi),
            None => ZeroCrossingIndex::build(field),
        };
        let crossing_stage = CrossingStage {
            elapsed_ms: timings.record_since("crossings", stage_start),
            horizontal: crossings.horizontal_count(),
            vertical: crossings.vertical_count(),
        };

        let stage_start = Instant::now();
        let edgels =
            EdgelGrid::build_with_deadline(field, &crossings, &self.params.edgels, deadline);
        let stats = edgels.saddle_stats();
        let edgel_stage = EdgelStage {
            elapsed_ms: timings.record_since("edgels", stage_start),
            edgels: edgels.len(),
            two_crossing_cells: stats.two_crossing_cells,
            saddle_cells: stats.saddle_cells,
            saddles_resolved_initial: stats.resolved_initial,
            saddles_resolved_retry: stats.resolved_retry,
            retry_passes: stats.retry_passes,
            dropped_saddles: stats.dropped.clone(),
            grad_mag_max: edgels.grad_mag_max(),
            timed_out: stats.timed_out,
        };

        let mut trace = PipelineTrace {
            input: InputDescriptor {
                rows: field.rows(),
                cols: field.cols(),
                roi: self.params.roi,
            },
            timings,
            crossings: crossing_stage,
            edgels: edgel_stage,
            chains: None,
            lines: None,
        };

        if edgels.is_empty() {
            debug!(
                "EdgelPipeline: no edgels in {}x{} field, skipping chains and lines",
                field.rows(),
                field.cols()
            );
            trace.timings.total_ms = elapsed_ms(total_start);
            return LineReport {
                lines: Vec::new(),
                trace,
            };
        }

        let peak = edgels.grad_mag_max();
        let threshold_grad = thresholds.grad.resolve(peak);
        let stage_start = Instant::now();
        let (chains, chains_timed_out) = link_chains(&edgels, &self.params.chains, deadline);
        let mut gated = 0;
        let mut segments: Vec<Segment> = Vec::new();
        for (idx, chain) in chains.iter().enumerate() {
            if chain.peak_grad_mag > threshold_grad {
                gated += 1;
                segments.extend(split_chain(idx, chain, &edgels));
            }
        }
        trace.chains = Some(ChainStage {
            elapsed_ms: trace.timings.record_since("chains", stage_start),
            chains: chains.len(),
            loops: chains.iter().filter(|c| c.is_loop).count(),
            gated,
            segments: segments.len(),
            threshold_grad,
            timed_out: chains_timed_out,
        });

        let threshold1 = thresholds.line.resolve(peak);
        let stage_start = Instant::now();
        let fits = fit_segments(&segments, &chains, &edgels);
        let fitted = fits.len();
        let eligible = fits
            .iter()
            .filter(|(fit, _)| is_eligible(fit, threshold1, &self.params.merge))
            .count();
        let clusters = merge_lines(fits, threshold1, &self.params.merge);
        let lines = rank(clusters, peak, &self.params.cost);
        trace.lines = Some(LineStage {
            elapsed_ms: trace.timings.record_since("lines", stage_start),
            fitted,
            eligible,
            clusters: lines.len(),
            threshold1,
        });

        trace.timings.total_ms = elapsed_ms(total_start);
        debug!(
            "EdgelPipeline: edgels={} chains={} segments={} lines={} total_ms={:.3}",
            edgels.len(),
            chains.len(),
            segments.len(),
            lines.len(),
            trace.timings.total_ms
        );
        LineReport { lines, trace }
    }
}
