//! Sub-pixel zero crossings along unit grid edges.
//!
//! Every pair of 4-adjacent grid points whose values straddle zero gets one
//! crossing, linearly interpolated between the two samples. The sign test is
//! `v > 0.0`: an exact zero counts as "not positive", so an edge between two
//! zeros never crosses.
//!
//! Crossings are stored in two dense per-axis tables, so lookups by
//! [`GridEdge`] are O(1) and the index never changes after construction.
use crate::field::GridView;
use serde::{Deserialize, Serialize};

/// Orientation of a unit grid edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeAxis {
    /// Joins `(row, col)` and `(row, col + 1)`.
    Horizontal,
    /// Joins `(row, col)` and `(row + 1, col)`.
    Vertical,
}

/// Canonical key of a unit grid edge: its axis plus the lower/left endpoint.
///
/// Because the key always names the lower-index endpoint, two edges compare
/// equal regardless of the order their endpoints were listed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridEdge {
    pub axis: EdgeAxis,
    pub row: usize,
    pub col: usize,
}

impl GridEdge {
    #[inline]
    pub const fn horizontal(row: usize, col: usize) -> Self {
        Self {
            axis: EdgeAxis::Horizontal,
            row,
            col,
        }
    }

    #[inline]
    pub const fn vertical(row: usize, col: usize) -> Self {
        Self {
            axis: EdgeAxis::Vertical,
            row,
            col,
        }
    }

    /// Build the key from two 4-adjacent `(row, col)` points in any order.
    pub fn between(a: (usize, usize), b: (usize, usize)) -> Option<Self> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if lo.0 == hi.0 && lo.1 + 1 == hi.1 {
            Some(Self::horizontal(lo.0, lo.1))
        } else if lo.1 == hi.1 && lo.0 + 1 == hi.0 {
            Some(Self::vertical(lo.0, lo.1))
        } else {
            None
        }
    }

    /// The two grid points joined by this edge, lower/left first.
    pub fn endpoints(&self) -> [(usize, usize); 2] {
        match self.axis {
            EdgeAxis::Horizontal => [(self.row, self.col), (self.row, self.col + 1)],
            EdgeAxis::Vertical => [(self.row, self.col), (self.row + 1, self.col)],
        }
    }
}

/// Rectangular region of interest in grid points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roi {
    pub row0: usize,
    pub col0: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Roi {
    pub fn full(rows: usize, cols: usize) -> Self {
        Self {
            row0: 0,
            col0: 0,
            rows,
            cols,
        }
    }

    /// Horizontal band covering `[start, end)` as fractions of the grid height.
    pub fn row_band(rows: usize, cols: usize, start: f32, end: f32) -> Self {
        let r0 = ((rows as f32) * start.clamp(0.0, 1.0)) as usize;
        let r1 = ((rows as f32) * end.clamp(0.0, 1.0)) as usize;
        Self {
            row0: r0,
            col0: 0,
            rows: r1.saturating_sub(r0),
            cols,
        }
    }

    /// Intersect with a `rows × cols` grid, returning half-open bounds.
    fn clamp_to(&self, rows: usize, cols: usize) -> (usize, usize, usize, usize) {
        let r0 = self.row0.min(rows);
        let c0 = self.col0.min(cols);
        let r1 = self.row0.saturating_add(self.rows).min(rows);
        let c1 = self.col0.saturating_add(self.cols).min(cols);
        (r0, r1, c0, c1)
    }
}

/// Interpolated zero position between `coord0` (value `val0`) and `coord1`
/// (value `val1`).
#[inline]
pub fn interpolate_crossing(coord0: f32, coord1: f32, val0: f32, val1: f32) -> f32 {
    (coord0 * val1 - coord1 * val0) / (val1 - val0)
}

#[inline]
fn is_positive(v: f32) -> bool {
    v > 0.0
}

/// Immutable per-edge table of zero crossings.
#[derive(Clone, Debug)]
pub struct ZeroCrossingIndex {
    rows: usize,
    cols: usize,
    /// `rows × (cols - 1)`, column coordinate of the crossing.
    horizontal: Vec<Option<f32>>,
    /// `(rows - 1) × cols`, row coordinate of the crossing.
    vertical: Vec<Option<f32>>,
    horizontal_count: usize,
    vertical_count: usize,
}

impl ZeroCrossingIndex {
    /// Scan every edge of the grid.
    pub fn build<G: GridView>(grid: &G) -> Self {
        Self::build_roi(grid, Roi::full(grid.rows(), grid.cols()))
    }

    /// Scan only edges whose both endpoints lie inside `roi`.
    pub fn build_roi<G: GridView>(grid: &G, roi: Roi) -> Self {
        let rows = grid.rows();
        let cols = grid.cols();
        let h_cols = cols.saturating_sub(1);
        let v_rows = rows.saturating_sub(1);
        let mut horizontal = vec![None; rows * h_cols];
        let mut vertical = vec![None; v_rows * cols];
        let mut horizontal_count = 0;
        let mut vertical_count = 0;

        let (r0, r1, c0, c1) = roi.clamp_to(rows, cols);
        for r in r0..r1 {
            let row = grid.row(r);
            for c in c0..c1.saturating_sub(1) {
                let (v0, v1) = (row[c], row[c + 1]);
                if is_positive(v0) != is_positive(v1) {
                    horizontal[r * h_cols + c] =
                        Some(interpolate_crossing(c as f32, (c + 1) as f32, v0, v1));
                    horizontal_count += 1;
                }
            }
        }
        for r in r0..r1.saturating_sub(1) {
            let upper = grid.row(r);
            let lower = grid.row(r + 1);
            for c in c0..c1 {
                let (v0, v1) = (upper[c], lower[c]);
                if is_positive(v0) != is_positive(v1) {
                    vertical[r * cols + c] =
                        Some(interpolate_crossing(r as f32, (r + 1) as f32, v0, v1));
                    vertical_count += 1;
                }
            }
        }

        Self {
            rows,
            cols,
            horizontal,
            vertical,
            horizontal_count,
            vertical_count,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn horizontal_count(&self) -> usize {
        self.horizontal_count
    }

    pub fn vertical_count(&self) -> usize {
        self.vertical_count
    }

    /// Interpolated coordinate along `edge` (column for horizontal edges,
    /// row for vertical ones), or `None` when the edge does not cross zero
    /// or lies outside the grid.
    #[inline]
    pub fn get(&self, edge: GridEdge) -> Option<f32> {
        match edge.axis {
            EdgeAxis::Horizontal => {
                let h_cols = self.cols.saturating_sub(1);
                if edge.row >= self.rows || edge.col >= h_cols {
                    return None;
                }
                self.horizontal[edge.row * h_cols + edge.col]
            }
            EdgeAxis::Vertical => {
                if edge.row + 1 >= self.rows || edge.col >= self.cols {
                    return None;
                }
                self.vertical[edge.row * self.cols + edge.col]
            }
        }
    }

    #[inline]
    pub fn contains(&self, edge: GridEdge) -> bool {
        self.get(edge).is_some()
    }

    /// Crossing position as an `[x, y]` point (`x` = column, `y` = row).
    #[inline]
    pub fn crossing_point(&self, edge: GridEdge) -> Option<[f32; 2]> {
        let t = self.get(edge)?;
        Some(match edge.axis {
            EdgeAxis::Horizontal => [t, edge.row as f32],
            EdgeAxis::Vertical => [edge.col as f32, t],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ScalarGrid;

    fn wavy_grid(rows: usize, cols: usize) -> ScalarGrid {
        ScalarGrid::from_fn(rows, cols, |r, c| {
            let (x, y) = (c as f32, r as f32);
            (0.7 * x).sin() + (0.45 * y + 0.3).cos() - 0.2
        })
    }

    fn all_edges(rows: usize, cols: usize) -> Vec<GridEdge> {
        let mut edges = Vec::new();
        for r in 0..rows {
            for c in 0..cols.saturating_sub(1) {
                edges.push(GridEdge::horizontal(r, c));
            }
        }
        for r in 0..rows.saturating_sub(1) {
            for c in 0..cols {
                edges.push(GridEdge::vertical(r, c));
            }
        }
        edges
    }

    #[test]
    fn crossing_exists_iff_signs_differ_and_stays_on_edge() {
        let grid = wavy_grid(12, 15);
        let index = ZeroCrossingIndex::build(&grid);
        let mut seen = 0;
        for edge in all_edges(12, 15) {
            let [p0, p1] = edge.endpoints();
            let (v0, v1) = (grid.get(p0.0, p0.1), grid.get(p1.0, p1.1));
            let differs = (v0 > 0.0) != (v1 > 0.0);
            assert_eq!(index.contains(edge), differs, "edge {edge:?}");
            if let Some(t) = index.get(edge) {
                seen += 1;
                let (lo, hi) = match edge.axis {
                    EdgeAxis::Horizontal => (p0.1 as f32, p1.1 as f32),
                    EdgeAxis::Vertical => (p0.0 as f32, p1.0 as f32),
                };
                assert!(t >= lo && t <= hi, "crossing {t} outside [{lo}, {hi}]");
            }
        }
        assert!(seen > 0);
        assert_eq!(seen, index.horizontal_count() + index.vertical_count());
    }

    #[test]
    fn zero_counts_as_not_positive() {
        let grid = ScalarGrid::from_vec(2, 3, vec![0.0, 0.0, 1.0, -1.0, 0.0, 0.0]).unwrap();
        let index = ZeroCrossingIndex::build(&grid);
        assert!(!index.contains(GridEdge::horizontal(0, 0)));
        assert_eq!(index.get(GridEdge::horizontal(0, 1)), Some(1.0));
        assert!(!index.contains(GridEdge::vertical(0, 0)));
        assert!(index.contains(GridEdge::vertical(0, 2)));
    }

    #[test]
    fn interpolation_is_linear() {
        let grid = ScalarGrid::from_vec(1, 2, vec![-1.0, 3.0]).unwrap();
        let index = ZeroCrossingIndex::build(&grid);
        let t = index.get(GridEdge::horizontal(0, 0)).unwrap();
        assert!((t - 0.25).abs() < 1e-6);
        assert_eq!(
            index.crossing_point(GridEdge::horizontal(0, 0)),
            Some([t, 0.0])
        );
    }

    #[test]
    fn roi_limits_scanned_edges() {
        let grid = ScalarGrid::from_fn(10, 10, |_, c| c as f32 - 4.5);
        let full = ZeroCrossingIndex::build(&grid);
        assert_eq!(full.horizontal_count(), 10);
        let band = ZeroCrossingIndex::build_roi(&grid, Roi::row_band(10, 10, 0.4, 0.7));
        assert_eq!(band.horizontal_count(), 3);
        assert!(band.contains(GridEdge::horizontal(4, 4)));
        assert!(!band.contains(GridEdge::horizontal(0, 4)));
    }

    #[test]
    fn edge_key_is_order_insensitive() {
        assert_eq!(
            GridEdge::between((3, 4), (3, 5)),
            GridEdge::between((3, 5), (3, 4))
        );
        assert_eq!(GridEdge::between((2, 1), (1, 1)), Some(GridEdge::vertical(1, 1)));
        assert_eq!(GridEdge::between((0, 0), (1, 1)), None);
    }

    #[test]
    fn out_of_range_edges_are_absent() {
        let grid = wavy_grid(4, 4);
        let index = ZeroCrossingIndex::build(&grid);
        assert_eq!(index.get(GridEdge::horizontal(0, 3)), None);
        assert_eq!(index.get(GridEdge::vertical(3, 0)), None);
    }
}
