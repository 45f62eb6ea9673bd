use crate::pipeline::{PipelineParams, Thresholds};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config of the `rank_lines` tool.
#[derive(Debug, Deserialize)]
pub struct RankLinesConfig {
    /// Grid JSON: `{"rows": .., "cols": .., "data": [..]}`.
    pub input: PathBuf,
    #[serde(default)]
    pub params: PipelineParams,
    #[serde(default)]
    pub thresholds: Thresholds,
    pub output: RankLinesOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct RankLinesOutputConfig {
    pub report_json: PathBuf,
    /// Keep only the best `top_k` lines in the written report.
    #[serde(default)]
    pub top_k: Option<usize>,
}

pub fn load_config(path: &Path) -> Result<RankLinesConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<RankLinesConfig, String> {
    serde_json::from_str(data).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::GradientGate;

    #[test]
    fn minimal_config_takes_defaults() {
        let config = parse_config(
            r#"{ "input": "field.json", "output": { "report_json": "out/lines.json" } }"#,
        )
        .unwrap();
        assert_eq!(config.input, PathBuf::from("field.json"));
        assert_eq!(config.output.top_k, None);
        assert_eq!(config.params.merge.max_angle_deg, 10.0);
        assert_eq!(config.thresholds, Thresholds::default());
    }

    #[test]
    fn nested_overrides_are_applied() {
        let config = parse_config(
            r#"{
                "input": "field.json",
                "params": { "roi": { "row0": 4, "col0": 0, "rows": 8, "cols": 24 },
                            "cost": { "theta_scale": 0.0 } },
                "thresholds": { "grad": { "absolute": 0.02 }, "line": { "relativeToPeak": 0.2 } },
                "output": { "report_json": "lines.json", "top_k": 3 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.params.roi.map(|r| r.rows), Some(8));
        assert_eq!(config.params.cost.theta_scale, 0.0);
        assert_eq!(config.params.cost.perp_high, 1.0);
        assert_eq!(config.thresholds.grad, GradientGate::Absolute(0.02));
        assert_eq!(config.thresholds.line, GradientGate::RelativeToPeak(0.2));
        assert_eq!(config.output.top_k, Some(3));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/rank_lines.json")).unwrap_err();
        assert!(err.contains("Failed to read config /nonexistent/rank_lines.json"));
    }
}
