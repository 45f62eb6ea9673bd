use super::*;
use crate::chains::SegmentRef;
use crate::crossings::Roi;
use crate::field::ScalarGrid;
use std::f32::consts::FRAC_PI_2;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn straight_edge() -> ScalarGrid {
    ScalarGrid::from_fn(16, 24, |_, c| c as f32 - 10.3)
}

#[test]
fn straight_edge_yields_one_vertical_line() {
    init_logger();
    let report = EdgelPipeline::default().run(&straight_edge(), &Thresholds::default());
    assert_eq!(report.lines.len(), 1);
    let line = report.best().unwrap();
    assert!((line.fit.theta - FRAC_PI_2).abs() < 1e-4);
    assert!((line.fit.dist_p + 10.3).abs() < 1e-3);
    assert_eq!(line.fit.num_edgels, 15);
    assert_eq!(line.provenance, vec![SegmentRef { chain: 0, segment: 0 }]);
    assert!((line.cost.cost_final - 1.5).abs() < 1e-3, "{:?}", line.cost);

    let trace = &report.trace;
    assert_eq!(trace.crossings.horizontal, 16);
    assert_eq!(trace.crossings.vertical, 0);
    assert_eq!(trace.edgels.edgels, 15);
    let chains = trace.chains.as_ref().unwrap();
    assert_eq!((chains.chains, chains.gated, chains.segments), (1, 1, 1));
    assert!((chains.threshold_grad - 0.1).abs() < 1e-5);
    let lines = trace.lines.as_ref().unwrap();
    assert_eq!((lines.fitted, lines.eligible, lines.clusters), (1, 1, 1));
    assert!(trace.timings.stage_ms("edgels").is_some());
    assert!(trace.timings.total_ms >= 0.0);
}

#[test]
fn field_without_crossings_skips_later_stages() {
    init_logger();
    let field = ScalarGrid::from_fn(8, 8, |r, c| 1.0 + (r + c) as f32);
    let report = EdgelPipeline::default().run(&field, &Thresholds::default());
    assert!(report.lines.is_empty());
    assert!(report.trace.chains.is_none());
    assert!(report.trace.lines.is_none());
    assert_eq!(report.trace.edgels.grad_mag_max, 0.0);
}

#[test]
fn gates_filter_weak_chains_and_fits() {
    init_logger();
    let pipeline = EdgelPipeline::default();
    let report = pipeline.run(&straight_edge(), &Thresholds::absolute(2.0, 0.0));
    let chains = report.trace.chains.as_ref().unwrap();
    assert_eq!(chains.chains, 1);
    assert_eq!(chains.gated, 0);
    assert!(report.lines.is_empty());

    let report = pipeline.run(&straight_edge(), &Thresholds::absolute(0.5, 1.5));
    let lines = report.trace.lines.as_ref().unwrap();
    assert_eq!(lines.fitted, 1);
    assert_eq!(lines.eligible, 0);
    assert!(report.lines.is_empty());
}

#[test]
fn roi_limits_the_scanned_band() {
    init_logger();
    let params = PipelineParams {
        roi: Some(Roi::row_band(16, 24, 0.25, 0.75)),
        ..PipelineParams::default()
    };
    let report = EdgelPipeline::new(params).run(&straight_edge(), &Thresholds::default());
    assert_eq!(report.trace.crossings.horizontal, 8);
    assert_eq!(report.trace.edgels.edgels, 7);
    assert_eq!(report.lines.len(), 1);
    assert_eq!(report.lines[0].fit.num_edgels, 7);
    assert!(report.trace.input.roi.is_some());
}

#[test]
fn exhausted_budget_is_flagged() {
    init_logger();
    let params = PipelineParams {
        time_budget_ms: Some(0.0),
        ..PipelineParams::default()
    };
    let report = EdgelPipeline::new(params).run(&straight_edge(), &Thresholds::default());
    let chains = report.trace.chains.as_ref().unwrap();
    assert!(chains.timed_out);
    assert_eq!(chains.chains, 0);
    assert!(report.lines.is_empty());
}

#[test]
fn unrepresentable_budget_means_no_deadline() {
    init_logger();
    for budget in [1e300, f64::INFINITY, f64::NAN, -5.0] {
        let params = PipelineParams {
            time_budget_ms: Some(budget),
            ..PipelineParams::default()
        };
        let report = EdgelPipeline::new(params).run(&straight_edge(), &Thresholds::default());
        let chains = report.trace.chains.as_ref().unwrap();
        assert!(!chains.timed_out, "budget {budget}");
        assert!(!report.trace.edgels.timed_out, "budget {budget}");
        assert_eq!(report.lines.len(), 1, "budget {budget}");
    }
}

#[test]
fn relative_gate_scales_with_peak() {
    assert_eq!(GradientGate::Absolute(0.3).resolve(10.0), 0.3);
    assert_eq!(GradientGate::RelativeToPeak(0.1).resolve(10.0), 1.0);
}

#[test]
fn params_deserialize_with_defaults() {
    let params: PipelineParams = serde_json::from_str(
        r#"{ "merge": { "max_gap": 5.0 }, "time_budget_ms": 12.5 }"#,
    )
    .unwrap();
    assert_eq!(params.merge.max_gap, 5.0);
    assert_eq!(params.merge.min_edgels, 5);
    assert_eq!(params.edgels.saddle_retry_passes, 10);
    assert_eq!(params.chains.min_loop_len, 9);
    assert_eq!(params.time_budget_ms, Some(12.5));
    assert!(params.roi.is_none());

    let thresholds: Thresholds =
        serde_json::from_str(r#"{ "grad": { "absolute": 0.25 } }"#).unwrap();
    assert_eq!(thresholds.grad, GradientGate::Absolute(0.25));
    assert_eq!(thresholds.line, GradientGate::RelativeToPeak(0.1));
}

#[test]
fn report_serializes_as_camel_case() {
    let report = EdgelPipeline::default().run(&straight_edge(), &Thresholds::default());
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["trace"]["edgels"]["twoCrossingCells"].is_number());
    assert!(json["lines"][0]["cost"]["costFinal"].is_number());
    assert!(json["lines"][0]["fit"]["numEdgels"].is_number());
}
