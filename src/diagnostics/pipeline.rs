use super::stages::{ChainStage, CrossingStage, EdgelStage, LineStage};
use super::timing::TimingBreakdown;
use crate::crossings::Roi;
use crate::lines::RankedLine;
use serde::Serialize;

/// Result of [`EdgelPipeline::run`](crate::EdgelPipeline::run): ranked lines
/// plus the trace of how they were produced.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineReport {
    pub lines: Vec<RankedLine>,
    pub trace: PipelineTrace,
}

impl LineReport {
    /// Best line, if any (lowest `cost_final`).
    pub fn best(&self) -> Option<&RankedLine> {
        self.lines.first()
    }
}

/// End-to-end trace of one pipeline run.
///
/// Stages that did not run (for instance chain linking on a field without
/// edgels) are omitted.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub crossings: CrossingStage,
    pub edgels: EdgelStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chains: Option<ChainStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<LineStage>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub rows: usize,
    pub cols: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<Roi>,
}
