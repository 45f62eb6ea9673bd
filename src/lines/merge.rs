use super::fit::LineFit;
use crate::angle::{angular_difference, normalize_half_pi, signed_half_pi_delta};
use crate::chains::SegmentRef;
use crate::edgels::dot;
use log::debug;
use serde::{Deserialize, Serialize};

/// Eligibility and matching thresholds for line merging.
///
/// - `min_edgels`: fits with fewer edgels never enter a cluster.
/// - `max_angle_deg`: largest orientation difference for a match.
/// - `max_offset`: largest `dist_p` difference for a match.
/// - `max_gap`: largest along-line gap between the two extents.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    pub min_edgels: usize,
    pub max_angle_deg: f32,
    pub max_offset: f32,
    pub max_gap: f32,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            min_edgels: 5,
            max_angle_deg: 10.0,
            max_offset: 8.0,
            max_gap: 20.0,
        }
    }
}

/// Merged line plus the segments folded into it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineCluster {
    pub fit: LineFit,
    pub provenance: Vec<SegmentRef>,
}

/// Along-line gap between `a` and `b`.
///
/// Each segment's endpoints are projected onto the other's axis. Any
/// projection landing inside the other's extent means overlap (0).
/// Otherwise the result is the smallest distance from a projection to the
/// nearer end of the extent it missed.
pub fn calc_lines_dist(a: &LineFit, b: &LineFit) -> f32 {
    let mut best = f32::INFINITY;
    for (axis, other) in [(a, b), (b, a)] {
        let e0 = axis.project(axis.end_pts[0]);
        let e1 = axis.project(axis.end_pts[1]);
        let (lo, hi) = (e0.min(e1), e0.max(e1));
        for p in other.end_pts {
            let s = axis.project(p);
            let gap = if s < lo {
                lo - s
            } else if s > hi {
                s - hi
            } else {
                return 0.0;
            };
            best = best.min(gap);
        }
    }
    best
}

/// `b.dist_p` expressed against `a`'s normal.
#[inline]
fn aligned_dist(a: &LineFit, b: &LineFit) -> f32 {
    if dot(a.dir, b.dir) < 0.0 {
        -b.dist_p
    } else {
        b.dist_p
    }
}

/// Whether `candidate` may be folded into `cluster`.
pub fn lines_match(cluster: &LineFit, candidate: &LineFit, options: &MergeOptions) -> bool {
    angular_difference(cluster.theta, candidate.theta) < options.max_angle_deg.to_radians()
        && (cluster.dist_p - aligned_dist(cluster, candidate)).abs() < options.max_offset
        && calc_lines_dist(cluster, candidate) < options.max_gap
}

/// Combine two fits into one line.
///
/// Orientation and offset are blended with the `grad_mag_max` of each side
/// as weight; the extent covers all four input endpoints.
pub fn merge(a: &LineFit, b: &LineFit) -> LineFit {
    let (w0, w1) = (a.grad_mag_max, b.grad_mag_max);
    let total = w0 + w1;
    let (wa, wb) = if total > 0.0 {
        (w0 / total, w1 / total)
    } else {
        (0.5, 0.5)
    };

    let theta = normalize_half_pi(a.theta + wb * signed_half_pi_delta(a.theta, b.theta));
    let dir = [theta.cos(), theta.sin()];
    let n = [-dir[1], dir[0]];
    let mut dist_p = wa * a.dist_p + wb * aligned_dist(a, b);
    // The blend is relative to `a`'s normal; the wrapped angle may have
    // flipped it.
    if dot(dir, a.dir) < 0.0 {
        dist_p = -dist_p;
    }
    let point = [n[0] * dist_p, n[1] * dist_p];

    let corners = [a.end_pts[0], a.end_pts[1], b.end_pts[0], b.end_pts[1]];
    let mut smin = f32::INFINITY;
    let mut smax = f32::NEG_INFINITY;
    let mut perp_sum = 0.0f32;
    for p in corners {
        let (dx, dy) = (p[0] - point[0], p[1] - point[1]);
        let s = dx * dir[0] + dy * dir[1];
        smin = smin.min(s);
        smax = smax.max(s);
        perp_sum += (dx * n[0] + dy * n[1]).abs();
    }

    LineFit {
        dir,
        point,
        dist_p,
        theta,
        end_pts: [
            [point[0] + smin * dir[0], point[1] + smin * dir[1]],
            [point[0] + smax * dir[0], point[1] + smax * dir[1]],
        ],
        num_edgels: a.num_edgels + b.num_edgels,
        grad_mag_max: w0.max(w1),
        perp_dist_avg: perp_sum / corners.len() as f32,
    }
}

/// Whether `fit` is strong and long enough to take part in merging.
pub fn is_eligible(fit: &LineFit, threshold1: f32, options: &MergeOptions) -> bool {
    fit.grad_mag_max >= threshold1 && fit.num_edgels >= options.min_edgels
}

/// First-fit clustering of eligible `fits`, in arrival order.
///
/// Each candidate is folded into the first cluster it matches; otherwise it
/// starts a new cluster.
pub fn merge_lines<I>(fits: I, threshold1: f32, options: &MergeOptions) -> Vec<LineCluster>
where
    I: IntoIterator<Item = (LineFit, SegmentRef)>,
{
    let mut clusters: Vec<LineCluster> = Vec::new();
    let mut eligible = 0usize;
    for (fit, origin) in fits {
        if !is_eligible(&fit, threshold1, options) {
            continue;
        }
        eligible += 1;
        match clusters
            .iter_mut()
            .find(|cluster| lines_match(&cluster.fit, &fit, options))
        {
            Some(cluster) => {
                cluster.fit = merge(&cluster.fit, &fit);
                cluster.provenance.push(origin);
            }
            None => clusters.push(LineCluster {
                fit,
                provenance: vec![origin],
            }),
        }
    }
    debug!(
        "merge_lines: eligible={} clusters={} threshold1={:.4}",
        eligible,
        clusters.len(),
        threshold1
    );
    clusters
}
