use crate::edgels::CellIndex;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossingStage {
    pub elapsed_ms: f64,
    pub horizontal: usize,
    pub vertical: usize,
}

/// Edgel construction and saddle resolution.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgelStage {
    pub elapsed_ms: f64,
    pub edgels: usize,
    pub two_crossing_cells: usize,
    pub saddle_cells: usize,
    pub saddles_resolved_initial: usize,
    pub saddles_resolved_retry: usize,
    pub retry_passes: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped_saddles: Vec<CellIndex>,
    pub grad_mag_max: f32,
    pub timed_out: bool,
}

impl EdgelStage {
    /// Fraction of saddle cells that could not be resolved.
    pub fn saddle_drop_rate(&self) -> f32 {
        if self.saddle_cells == 0 {
            0.0
        } else {
            self.dropped_saddles.len() as f32 / self.saddle_cells as f32
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStage {
    pub elapsed_ms: f64,
    pub chains: usize,
    pub loops: usize,
    /// Chains whose peak gradient passed the chain gate.
    pub gated: usize,
    pub segments: usize,
    pub threshold_grad: f32,
    pub timed_out: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStage {
    pub elapsed_ms: f64,
    pub fitted: usize,
    pub eligible: usize,
    pub clusters: usize,
    pub threshold1: f32,
}
