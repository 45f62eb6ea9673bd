use crate::angle::normalize_half_pi;
use crate::chains::{Chain, Segment, SegmentRef};
use crate::edgels::EdgelGrid;
use nalgebra::{Matrix2, SymmetricEigen};
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const EIG_EPS: f32 = 1e-9;

/// Least-squares line through a set of edgel midpoints.
///
/// `dir` is the unit direction at angle `theta ∈ [0, π)`; `point` is the
/// centroid and `dist_p = n · point` its signed offset along the normal
/// `n = [-dir.y, dir.x]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineFit {
    pub dir: [f32; 2],
    pub point: [f32; 2],
    pub dist_p: f32,
    pub theta: f32,
    pub end_pts: [[f32; 2]; 2],
    pub num_edgels: usize,
    pub grad_mag_max: f32,
    pub perp_dist_avg: f32,
}

impl LineFit {
    #[inline]
    pub fn normal(&self) -> [f32; 2] {
        [-self.dir[1], self.dir[0]]
    }

    /// Signed position of `p` along the line, relative to `point`.
    #[inline]
    pub fn project(&self, p: [f32; 2]) -> f32 {
        (p[0] - self.point[0]) * self.dir[0] + (p[1] - self.point[1]) * self.dir[1]
    }

    /// Signed offset of `p` from the line.
    #[inline]
    pub fn residual(&self, p: [f32; 2]) -> f32 {
        let n = self.normal();
        (p[0] - self.point[0]) * n[0] + (p[1] - self.point[1]) * n[1]
    }

    pub fn length(&self) -> f32 {
        let [p0, p1] = self.end_pts;
        (p1[0] - p0[0]).hypot(p1[1] - p0[1])
    }
}

/// PCA fit of `points`.
///
/// # Panics
///
/// If `points` is empty.
pub fn fit_points(points: &[[f32; 2]], grad_mag_max: f32) -> LineFit {
    assert!(!points.is_empty(), "cannot fit a line to an empty segment");

    let count = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p[0], sy + p[1]));
    let (cx, cy) = (sx / count, sy / count);

    let (mut cxx, mut cyy, mut cxy) = (0.0f32, 0.0f32, 0.0f32);
    for p in points {
        let (dx, dy) = (p[0] - cx, p[1] - cy);
        cxx += dx * dx;
        cyy += dy * dy;
        cxy += dx * dy;
    }
    let cov = Matrix2::new(cxx / count, cxy / count, cxy / count, cyy / count);
    let eig = SymmetricEigen::new(cov);
    let (vmax, lambda_max) = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        (eig.eigenvectors.column(0), eig.eigenvalues[0])
    } else {
        (eig.eigenvectors.column(1), eig.eigenvalues[1])
    };

    let point = [cx, cy];
    if !lambda_max.is_finite() || lambda_max <= EIG_EPS {
        // Single point or coincident points: no direction to speak of.
        return LineFit {
            dir: [0.0, 0.0],
            point,
            dist_p: 0.0,
            theta: 0.0,
            end_pts: [point, point],
            num_edgels: points.len(),
            grad_mag_max,
            perp_dist_avg: 0.0,
        };
    }

    let theta = normalize_half_pi(vmax[1].atan2(vmax[0]));
    let dir = [theta.cos(), theta.sin()];
    let n = [-dir[1], dir[0]];

    let mut smin = f32::INFINITY;
    let mut smax = f32::NEG_INFINITY;
    let mut perp_sum = 0.0f32;
    for p in points {
        let (dx, dy) = (p[0] - cx, p[1] - cy);
        let s = dx * dir[0] + dy * dir[1];
        smin = smin.min(s);
        smax = smax.max(s);
        perp_sum += (dx * n[0] + dy * n[1]).abs();
    }

    LineFit {
        dir,
        point,
        dist_p: n[0] * cx + n[1] * cy,
        theta,
        end_pts: [
            [cx + smin * dir[0], cy + smin * dir[1]],
            [cx + smax * dir[0], cy + smax * dir[1]],
        ],
        num_edgels: points.len(),
        grad_mag_max,
        perp_dist_avg: perp_sum / count,
    }
}

/// Fit the midpoints of one chain segment.
pub fn fit_segment(segment: &Segment, chain: &Chain, grid: &EdgelGrid) -> LineFit {
    let ids = &chain.edgels[segment.range()];
    let points: Vec<[f32; 2]> = ids.iter().map(|&id| grid.edgel(id).mid_pt).collect();
    let grad_mag_max = ids
        .iter()
        .map(|&id| grid.edgel(id).grad_mag)
        .fold(0.0f32, f32::max);
    fit_points(&points, grad_mag_max)
}

/// Fit every segment, keeping input order.
pub fn fit_segments(
    segments: &[Segment],
    chains: &[Chain],
    grid: &EdgelGrid,
) -> Vec<(LineFit, SegmentRef)> {
    let fit_one =
        |seg: &Segment| (fit_segment(seg, &chains[seg.chain], grid), seg.reference());
    #[cfg(feature = "parallel")]
    {
        segments.par_iter().map(fit_one).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        segments.iter().map(fit_one).collect()
    }
}
