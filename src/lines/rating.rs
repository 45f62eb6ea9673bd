use super::fit::LineFit;
use super::merge::LineCluster;
use crate::angle::normalize_two_pi;
use crate::chains::SegmentRef;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

/// Weights and breakpoints of the line cost terms.
///
/// - `theta_scale`: peak of the orientation cost (reached halfway between
///   multiples of 45°).
/// - `num_pts_low` / `num_pts_high`: edgel counts at which the support
///   cost is `num_pts_scale` and 0 respectively.
/// - `perp_low` / `perp_high`: mean residuals at which the straightness
///   cost is 0 and 1 respectively.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CostOptions {
    pub theta_scale: f32,
    pub num_pts_low: f32,
    pub num_pts_high: f32,
    pub num_pts_scale: f32,
    pub perp_low: f32,
    pub perp_high: f32,
}

impl Default for CostOptions {
    fn default() -> Self {
        Self {
            theta_scale: 1.5,
            num_pts_low: 16.0,
            num_pts_high: 48.0,
            num_pts_scale: 1.5,
            perp_low: 0.2,
            perp_high: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCost {
    pub cost_theta: f32,
    pub cost_grad_mag: f32,
    pub cost_num_pts: f32,
    pub cost_perp_dist: f32,
    pub cost_final: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedLine {
    pub fit: LineFit,
    pub cost: LineCost,
    pub provenance: Vec<SegmentRef>,
}

/// Linear map of `x` from `x0 → y0` to `x1 → y1`, clamped to the end
/// values outside `[x0, x1]`.
pub fn clamp_scale(x: f32, x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    if x <= x0 {
        y0
    } else if x >= x1 {
        y1
    } else {
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

/// Eight unit tents over `[0, 2π)`: 0 at every multiple of 45°, 1 at
/// 22.5° + k·45°.
pub fn theta_tent(theta: f32) -> f32 {
    let phase = normalize_two_pi(theta) / FRAC_PI_4;
    let frac = phase - phase.floor();
    1.0 - (2.0 * frac - 1.0).abs()
}

/// Cost terms of `fit`; `global_max` is the strongest edgel in the grid.
pub fn line_cost(fit: &LineFit, global_max: f32, options: &CostOptions) -> LineCost {
    let cost_theta = options.theta_scale * theta_tent(fit.theta);
    let cost_grad_mag = if global_max > 0.0 {
        (global_max - fit.grad_mag_max) / global_max
    } else {
        0.0
    };
    let cost_num_pts = clamp_scale(
        fit.num_edgels as f32,
        options.num_pts_low,
        options.num_pts_scale,
        options.num_pts_high,
        0.0,
    );
    let cost_perp_dist = clamp_scale(
        fit.perp_dist_avg,
        options.perp_low,
        0.0,
        options.perp_high,
        1.0,
    );
    LineCost {
        cost_theta,
        cost_grad_mag,
        cost_num_pts,
        cost_perp_dist,
        cost_final: cost_theta + cost_grad_mag + cost_num_pts + cost_perp_dist,
    }
}

/// Score every cluster and sort ascending by `cost_final` (stable).
pub fn rank(clusters: Vec<LineCluster>, global_max: f32, options: &CostOptions) -> Vec<RankedLine> {
    let mut ranked: Vec<RankedLine> = clusters
        .into_iter()
        .map(|cluster| RankedLine {
            cost: line_cost(&cluster.fit, global_max, options),
            fit: cluster.fit,
            provenance: cluster.provenance,
        })
        .collect();
    ranked.sort_by(|a, b| a.cost.cost_final.total_cmp(&b.cost.cost_final));
    ranked
}
