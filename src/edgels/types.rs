use crate::crossings::GridEdge;
use serde::{Deserialize, Serialize};

const EPS: f32 = 1e-12;

/// Index of an edgel in the [`EdgelGrid`](super::EdgelGrid) arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgelId(pub u32);

impl EdgelId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Grid cell (quad) whose top-left corner is grid point `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Boundary side of a cell, listed clockwise from the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const CLOCKWISE: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// Top and bottom sides lie on horizontal grid edges.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// Grid edge this side occupies for `cell`.
    #[inline]
    pub fn edge(self, cell: CellIndex) -> GridEdge {
        let CellIndex { row, col } = cell;
        match self {
            Side::Top => GridEdge::horizontal(row, col),
            Side::Right => GridEdge::vertical(row, col + 1),
            Side::Bottom => GridEdge::horizontal(row + 1, col),
            Side::Left => GridEdge::vertical(row, col),
        }
    }

    /// Cell across this side, if it is inside a `cell_rows × cell_cols` grid.
    #[inline]
    pub fn neighbor(self, cell: CellIndex, cell_rows: usize, cell_cols: usize) -> Option<CellIndex> {
        let CellIndex { row, col } = cell;
        let (r, c) = match self {
            Side::Top => (row.checked_sub(1)?, col),
            Side::Right => (row, col + 1),
            Side::Bottom => (row + 1, col),
            Side::Left => (row, col.checked_sub(1)?),
        };
        (r < cell_rows && c < cell_cols).then_some(CellIndex::new(r, c))
    }

    /// Unit step leaving the cell through this side, as `[x, y]`.
    #[inline]
    pub fn outward(self) -> [f32; 2] {
        match self {
            Side::Top => [0.0, -1.0],
            Side::Right => [1.0, 0.0],
            Side::Bottom => [0.0, 1.0],
            Side::Left => [-1.0, 0.0],
        }
    }
}

/// Resolution state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// Zero set does not separate the cell (0 or 1 crossed sides).
    Empty,
    /// Saddle cell awaiting, or denied, a pairing decision.
    Unresolved,
    One(EdgelId),
    Two([EdgelId; 2]),
}

impl CellState {
    pub fn ids(&self) -> &[EdgelId] {
        match self {
            CellState::Empty | CellState::Unresolved => &[],
            CellState::One(id) => std::slice::from_ref(id),
            CellState::Two(ids) => &ids[..],
        }
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }
}

/// Tangent direction with the midpoint's cached offsets to the reference
/// origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EdgelTangent {
    pub dir: [f32; 2],
    /// Signed length of `origin - mid` along `dir`.
    pub dist_proj: f32,
    /// Distance from the origin to the tangent line through the midpoint.
    pub dist_perp: f32,
}

impl EdgelTangent {
    pub(crate) fn new(dir: [f32; 2], mid: [f32; 2], origin: [f32; 2]) -> Self {
        let to_origin = [origin[0] - mid[0], origin[1] - mid[1]];
        let dist_proj = dir[0] * to_origin[0] + dir[1] * to_origin[1];
        let perp = [
            to_origin[0] - dir[0] * dist_proj,
            to_origin[1] - dir[1] * dist_proj,
        ];
        Self {
            dir,
            dist_proj,
            dist_perp: (perp[0] * perp[0] + perp[1] * perp[1]).sqrt(),
        }
    }

    /// Same line traversed the other way.
    pub fn reversed(&self) -> Self {
        Self {
            dir: [-self.dir[0], -self.dir[1]],
            dist_proj: -self.dist_proj,
            dist_perp: self.dist_perp,
        }
    }
}

/// Sub-pixel edge element inside a single cell.
///
/// Points are `[x, y]` with `x` = column and `y` = row; `grad` is
/// `[d/dx, d/dy]` of the field over the cell.
#[derive(Clone, Debug, Serialize)]
pub struct Edgel {
    pub cell: CellIndex,
    pub sides: [Side; 2],
    pub edges: [GridEdge; 2],
    pub end_pts: [[f32; 2]; 2],
    pub mid_pt: [f32; 2],
    pub grad: [f32; 2],
    pub grad_mag: f32,
    /// `atan2(gy, gx)`.
    pub theta: f32,
    pub tangent: EdgelTangent,
}

impl Edgel {
    #[inline]
    pub fn shares_edge(&self, edge: GridEdge) -> bool {
        self.edges[0] == edge || self.edges[1] == edge
    }

    pub fn shares_any_edge(&self, other: &Edgel) -> bool {
        other.shares_edge(self.edges[0]) || other.shares_edge(self.edges[1])
    }

    /// Unit direction from the first endpoint to the second (zero when the
    /// endpoints coincide).
    pub fn line_dir(&self) -> [f32; 2] {
        normalize([
            self.end_pts[1][0] - self.end_pts[0][0],
            self.end_pts[1][1] - self.end_pts[0][1],
        ])
    }
}

#[inline]
pub(crate) fn normalize(v: [f32; 2]) -> [f32; 2] {
    let norm = (v[0] * v[0] + v[1] * v[1]).sqrt();
    if norm <= EPS {
        [0.0, 0.0]
    } else {
        [v[0] / norm, v[1] / norm]
    }
}

#[inline]
pub(crate) fn dot(a: [f32; 2], b: [f32; 2]) -> f32 {
    a[0] * b[0] + a[1] * b[1]
}
