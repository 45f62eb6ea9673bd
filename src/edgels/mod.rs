//! Per-cell edgels and saddle disambiguation.
//!
//! Each cell of the grid is classified by how many of its four sides cross
//! zero:
//!
//! - two crossings produce one edgel joining them;
//! - four crossings (a saddle) produce two edgels, the pairing being chosen
//!   from the directions of already-built neighboring edgels;
//! - any other count leaves the cell empty.
//!
//! Saddles are resolved on a work list. A first pass resolves every saddle
//! whose four neighbors already carry an edgel on the shared side. Up to
//! [`EdgelOptions::saddle_retry_passes`] further passes then accept three
//! neighbors, extrapolating the missing one straight out of the cell.
//! Resolutions become visible to later cells of the same pass. Saddles still
//! pending afterwards are dropped and reported in [`SaddleStats::dropped`].
//!
//! Every edgel carries its gradient over the crossed sides, the gradient's
//! angle and magnitude, and a unit tangent (the gradient rotated by +90°)
//! with its projections onto a configurable reference origin.

mod builder;
mod options;
mod saddle;
mod types;

pub use options::EdgelOptions;
pub use types::{CellIndex, CellState, Edgel, EdgelId, EdgelTangent, Side};

pub(crate) use types::dot;

use crate::crossings::{GridEdge, ZeroCrossingIndex};
use crate::field::GridView;
use builder::EdgelBuilder;
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// Saddle bookkeeping from one build.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaddleStats {
    pub two_crossing_cells: usize,
    pub saddle_cells: usize,
    pub resolved_initial: usize,
    pub resolved_retry: usize,
    /// Saddles that took the top–right / bottom–left pairing.
    pub pairing_a: usize,
    pub retry_passes: usize,
    pub dropped: Vec<CellIndex>,
    pub timed_out: bool,
}

/// Arena of edgels plus the per-cell lookup into it.
#[derive(Clone, Debug)]
pub struct EdgelGrid {
    cell_rows: usize,
    cell_cols: usize,
    cells: Vec<CellState>,
    edgels: Vec<Edgel>,
    grad_mag_max: f32,
    stats: SaddleStats,
}

impl EdgelGrid {
    /// Build edgels for every cell of `field`.
    ///
    /// `crossings` must have been built from the same field.
    pub fn build<G: GridView>(
        field: &G,
        crossings: &ZeroCrossingIndex,
        options: &EdgelOptions,
    ) -> Self {
        Self::build_with_deadline(field, crossings, options, None)
    }

    /// Like [`EdgelGrid::build`], but stops saddle retry passes once
    /// `deadline` has passed and flags [`SaddleStats::timed_out`].
    pub fn build_with_deadline<G: GridView>(
        field: &G,
        crossings: &ZeroCrossingIndex,
        options: &EdgelOptions,
        deadline: Option<Instant>,
    ) -> Self {
        let grid = EdgelBuilder::new(field, crossings, *options, deadline).build();
        debug!(
            "EdgelGrid: cells={}x{} edgels={} saddles={} (initial={} retry={} dropped={}) peak_mag={:.4}",
            grid.cell_rows,
            grid.cell_cols,
            grid.edgels.len(),
            grid.stats.saddle_cells,
            grid.stats.resolved_initial,
            grid.stats.resolved_retry,
            grid.stats.dropped.len(),
            grid.grad_mag_max
        );
        grid
    }

    pub fn cell_rows(&self) -> usize {
        self.cell_rows
    }

    pub fn cell_cols(&self) -> usize {
        self.cell_cols
    }

    /// State of `cell`, or `None` when it lies outside the grid.
    pub fn cell(&self, cell: CellIndex) -> Option<&CellState> {
        if cell.row >= self.cell_rows || cell.col >= self.cell_cols {
            return None;
        }
        self.cells.get(cell.row * self.cell_cols + cell.col)
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&CellState> {
        self.cell(CellIndex::new(row, col))
    }

    #[inline]
    pub fn edgel(&self, id: EdgelId) -> &Edgel {
        &self.edgels[id.index()]
    }

    pub fn edgels(&self) -> &[Edgel] {
        &self.edgels
    }

    pub fn len(&self) -> usize {
        self.edgels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edgels.is_empty()
    }

    /// Largest edgel gradient magnitude (0 for an empty grid).
    pub fn grad_mag_max(&self) -> f32 {
        self.grad_mag_max
    }

    pub fn saddle_stats(&self) -> &SaddleStats {
        &self.stats
    }

    pub fn dropped_saddles(&self) -> &[CellIndex] {
        &self.stats.dropped
    }

    /// Edgel in the cell across `side` of `cell` that touches the shared
    /// grid edge.
    ///
    /// Returns `None` when the neighbor is outside the grid, empty, or an
    /// unresolved saddle.
    ///
    /// # Panics
    ///
    /// If the neighbor holds two edgels and not exactly one of them touches
    /// the shared edge.
    pub fn neighbor_edgel(&self, cell: CellIndex, side: Side) -> Option<EdgelId> {
        let neighbor = side.neighbor(cell, self.cell_rows, self.cell_cols)?;
        let state = &self.cells[neighbor.row * self.cell_cols + neighbor.col];
        edgel_across(state, side.edge(cell), &self.edgels)
    }

    /// Edgel ids in row-major cell order, both edgels of a saddle cell in
    /// their stored order.
    pub fn seed_order(&self) -> impl Iterator<Item = EdgelId> + '_ {
        self.cells.iter().flat_map(|state| state.ids().iter().copied())
    }
}

/// Resolve the edgel of `state` lying on `edge`.
fn edgel_across(state: &CellState, edge: GridEdge, edgels: &[Edgel]) -> Option<EdgelId> {
    match *state {
        CellState::One(id) => Some(id),
        CellState::Two(ids) => {
            let hits = ids
                .iter()
                .filter(|id| edgels[id.index()].shares_edge(edge))
                .count();
            assert_eq!(
                hits, 1,
                "saddle cell must have exactly one edgel on edge {edge:?}"
            );
            ids.into_iter().find(|id| edgels[id.index()].shares_edge(edge))
        }
        CellState::Empty | CellState::Unresolved => None,
    }
}
