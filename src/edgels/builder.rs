use super::options::EdgelOptions;
use super::saddle::{choose_pairing, Pairing};
use super::types::{normalize, CellIndex, CellState, Edgel, EdgelId, EdgelTangent, Side};
use super::{EdgelGrid, SaddleStats};
use crate::crossings::ZeroCrossingIndex;
use crate::field::GridView;
use log::debug;
use std::time::Instant;

/// Crossing points of a saddle cell, indexed by [`Side::index`].
struct SaddleCell {
    cell: CellIndex,
    points: [[f32; 2]; 4],
}

pub(super) struct EdgelBuilder<'a, G: GridView> {
    field: &'a G,
    crossings: &'a ZeroCrossingIndex,
    options: EdgelOptions,
    deadline: Option<Instant>,
    cell_rows: usize,
    cell_cols: usize,
    cells: Vec<CellState>,
    edgels: Vec<Edgel>,
    grad_mag_max: f32,
    stats: SaddleStats,
}

impl<'a, G: GridView> EdgelBuilder<'a, G> {
    pub(super) fn new(
        field: &'a G,
        crossings: &'a ZeroCrossingIndex,
        options: EdgelOptions,
        deadline: Option<Instant>,
    ) -> Self {
        debug_assert_eq!(field.rows(), crossings.rows());
        debug_assert_eq!(field.cols(), crossings.cols());
        let cell_rows = field.rows().saturating_sub(1);
        let cell_cols = field.cols().saturating_sub(1);
        Self {
            field,
            crossings,
            options,
            deadline,
            cell_rows,
            cell_cols,
            cells: vec![CellState::Empty; cell_rows * cell_cols],
            edgels: Vec::new(),
            grad_mag_max: 0.0,
            stats: SaddleStats::default(),
        }
    }

    pub(super) fn build(mut self) -> EdgelGrid {
        let saddles = self.scan_cells();
        self.resolve_saddles(saddles);
        EdgelGrid {
            cell_rows: self.cell_rows,
            cell_cols: self.cell_cols,
            cells: self.cells,
            edgels: self.edgels,
            grad_mag_max: self.grad_mag_max,
            stats: self.stats,
        }
    }

    /// Emit edgels for every two-crossing cell and collect the saddles.
    fn scan_cells(&mut self) -> Vec<SaddleCell> {
        let mut saddles = Vec::new();
        for row in 0..self.cell_rows {
            for col in 0..self.cell_cols {
                let cell = CellIndex::new(row, col);
                let mut crossed: [(Side, [f32; 2]); 4] = [(Side::Top, [0.0; 2]); 4];
                let mut count = 0;
                for side in Side::CLOCKWISE {
                    if let Some(pt) = self.crossings.crossing_point(side.edge(cell)) {
                        crossed[count] = (side, pt);
                        count += 1;
                    }
                }
                match count {
                    2 => {
                        self.stats.two_crossing_cells += 1;
                        let edgel = self.make_edgel(cell, [crossed[0], crossed[1]]);
                        let id = self.push(edgel);
                        self.cells[row * self.cell_cols + col] = CellState::One(id);
                    }
                    4 => {
                        let mut points = [[0.0; 2]; 4];
                        for (side, pt) in crossed {
                            points[side.index()] = pt;
                        }
                        self.cells[row * self.cell_cols + col] = CellState::Unresolved;
                        saddles.push(SaddleCell { cell, points });
                    }
                    _ => {}
                }
            }
        }
        self.stats.saddle_cells = saddles.len();
        saddles
    }

    /// Work-list resolution: first cells with four resolved neighbors, then
    /// bounded retry passes accepting three and extrapolating the missing one.
    fn resolve_saddles(&mut self, saddles: Vec<SaddleCell>) {
        if saddles.is_empty() {
            return;
        }

        let mut pending = Vec::with_capacity(saddles.len());
        for saddle in saddles {
            if !self.try_resolve(&saddle, 4) {
                pending.push(saddle);
            }
        }
        self.stats.resolved_initial = self.stats.saddle_cells - pending.len();

        for _ in 0..self.options.saddle_retry_passes {
            if pending.is_empty() {
                break;
            }
            if self.deadline.is_some_and(|d| Instant::now() >= d) {
                self.stats.timed_out = true;
                break;
            }
            self.stats.retry_passes += 1;
            let before = pending.len();
            let mut still_pending = Vec::with_capacity(before);
            for saddle in pending {
                if !self.try_resolve(&saddle, 3) {
                    still_pending.push(saddle);
                }
            }
            self.stats.resolved_retry += before - still_pending.len();
            pending = still_pending;
            if pending.len() == before {
                break;
            }
        }

        self.stats.dropped = pending.iter().map(|s| s.cell).collect();
        if !self.stats.dropped.is_empty() {
            debug!(
                "EdgelBuilder: dropped {} of {} saddle cells after {} retry passes",
                self.stats.dropped.len(),
                self.stats.saddle_cells,
                self.stats.retry_passes
            );
        }
    }

    fn try_resolve(&mut self, saddle: &SaddleCell, min_neighbors: usize) -> bool {
        let mut dirs = [[0.0f32; 2]; 4];
        let mut known = 0;
        for side in Side::CLOCKWISE {
            match self.neighbor_dir(saddle.cell, side) {
                Some(dir) => {
                    dirs[side.index()] = dir;
                    known += 1;
                }
                // Extrapolate the zero line straight out of this side.
                None => dirs[side.index()] = side.outward(),
            }
        }
        if known < min_neighbors {
            return false;
        }

        let pairing = choose_pairing(&saddle.points, &dirs);
        let [first, second] = pairing.sides();
        let ids = [
            self.push_pair(saddle, first),
            self.push_pair(saddle, second),
        ];
        self.cells[saddle.cell.row * self.cell_cols + saddle.cell.col] = CellState::Two(ids);
        if pairing == Pairing::A {
            self.stats.pairing_a += 1;
        }
        true
    }

    fn push_pair(&mut self, saddle: &SaddleCell, sides: [Side; 2]) -> EdgelId {
        let crossed = sides.map(|side| (side, saddle.points[side.index()]));
        let edgel = self.make_edgel(saddle.cell, crossed);
        self.push(edgel)
    }

    /// Direction of the already-built edgel across `side`, if any.
    fn neighbor_dir(&self, cell: CellIndex, side: Side) -> Option<[f32; 2]> {
        let neighbor = side.neighbor(cell, self.cell_rows, self.cell_cols)?;
        let state = &self.cells[neighbor.row * self.cell_cols + neighbor.col];
        let id = super::edgel_across(state, side.edge(cell), &self.edgels)?;
        Some(self.edgels[id.index()].line_dir())
    }

    fn push(&mut self, edgel: Edgel) -> EdgelId {
        let id = EdgelId(self.edgels.len() as u32);
        if edgel.grad_mag > self.grad_mag_max {
            self.grad_mag_max = edgel.grad_mag;
        }
        self.edgels.push(edgel);
        id
    }

    fn make_edgel(&self, cell: CellIndex, crossed: [(Side, [f32; 2]); 2]) -> Edgel {
        let [(side0, p0), (side1, p1)] = crossed;
        let mid_pt = [(p0[0] + p1[0]) * 0.5, (p0[1] + p1[1]) * 0.5];
        let grad = self.cell_gradient(cell, [side0, side1]);
        let grad_mag = (grad[0] * grad[0] + grad[1] * grad[1]).sqrt();
        let tangent_dir = normalize([-grad[1], grad[0]]);
        Edgel {
            cell,
            sides: [side0, side1],
            edges: [side0.edge(cell), side1.edge(cell)],
            end_pts: [p0, p1],
            mid_pt,
            grad,
            grad_mag,
            theta: grad[1].atan2(grad[0]),
            tangent: EdgelTangent::new(tangent_dir, mid_pt, self.options.origin),
        }
    }

    /// Finite-difference gradient `[gx, gy]` restricted to the crossed sides.
    ///
    /// Parallel sides (top+bottom or left+right) use the corner differences
    /// averaged over both rows and both columns. Adjacent sides take each
    /// side's own forward difference along its axis.
    fn cell_gradient(&self, cell: CellIndex, sides: [Side; 2]) -> [f32; 2] {
        let f = |r: usize, c: usize| self.field.get(r, c);
        let CellIndex { row: r, col: c } = cell;
        if sides[0].is_horizontal() == sides[1].is_horizontal() {
            let gx = 0.5 * ((f(r, c + 1) - f(r, c)) + (f(r + 1, c + 1) - f(r + 1, c)));
            let gy = 0.5 * ((f(r + 1, c) - f(r, c)) + (f(r + 1, c + 1) - f(r, c + 1)));
            return [gx, gy];
        }
        let mut grad = [0.0f32; 2];
        for side in sides {
            let [a, b] = side.edge(cell).endpoints();
            let diff = f(b.0, b.1) - f(a.0, a.1);
            if side.is_horizontal() {
                grad[0] += diff;
            } else {
                grad[1] += diff;
            }
        }
        grad
    }
}
