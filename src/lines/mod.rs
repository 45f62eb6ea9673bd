//! Line fitting, merging and ranking.
//!
//! Each chain segment is summarized by a PCA line through its edgel
//! midpoints ([`fit_segment`]). Fits that are strong and long enough are
//! folded first-fit into clusters of near-collinear lines ([`merge_lines`]),
//! and every cluster is scored by [`rank`]: lower `cost_final` is better.
//!
//! Cost terms:
//! - orientation: penalizes lines far from the nearest multiple of 45°;
//! - gradient: shortfall of the cluster's strongest edgel against the
//!   strongest edgel in the grid;
//! - support: few edgels cost more, saturating at 0 for long lines;
//! - straightness: mean perpendicular residual.

mod fit;
mod merge;
mod rating;

pub use fit::{fit_points, fit_segment, fit_segments, LineFit};
pub use merge::{
    calc_lines_dist, is_eligible, lines_match, merge, merge_lines, LineCluster, MergeOptions,
};
pub use rating::{clamp_scale, line_cost, rank, theta_tent, CostOptions, LineCost, RankedLine};
