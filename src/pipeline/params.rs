//! Parameter types configuring the pipeline stages.
//!
//! Every knob defaults to the reference constants, so
//! `PipelineParams::default()` reproduces the stock behaviour. Everything
//! deserializes from JSON with missing fields taking their defaults.

use crate::chains::ChainOptions;
use crate::crossings::Roi;
use crate::edgels::EdgelOptions;
use crate::lines::{CostOptions, MergeOptions};
use serde::{Deserialize, Serialize};

/// Pipeline-wide parameters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Restrict crossing detection to this region; `None` scans the whole
    /// grid.
    pub roi: Option<Roi>,
    pub edgels: EdgelOptions,
    pub chains: ChainOptions,
    pub merge: MergeOptions,
    pub cost: CostOptions,
    /// Soft wall-clock budget for saddle retries and chain seeding.
    pub time_budget_ms: Option<f64>,
}

/// Gradient threshold, either fixed or a fraction of the strongest edgel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientGate {
    Absolute(f32),
    RelativeToPeak(f32),
}

impl GradientGate {
    /// Threshold value for a grid whose strongest edgel is `peak`.
    pub fn resolve(&self, peak: f32) -> f32 {
        match *self {
            GradientGate::Absolute(t) => t,
            GradientGate::RelativeToPeak(f) => f * peak,
        }
    }
}

/// Caller thresholds of one run.
///
/// - `grad`: a chain reaches the line fitter only when its peak gradient is
///   strictly above this gate.
/// - `line`: a fit takes part in merging only when its peak gradient is at
///   least this gate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub grad: GradientGate,
    pub line: GradientGate,
}

impl Thresholds {
    pub fn absolute(threshold_grad: f32, threshold1: f32) -> Self {
        Self {
            grad: GradientGate::Absolute(threshold_grad),
            line: GradientGate::Absolute(threshold1),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            grad: GradientGate::RelativeToPeak(0.1),
            line: GradientGate::RelativeToPeak(0.1),
        }
    }
}
