//! Owned and borrowed row-major `f32` grids (stride == cols).
use super::traits::GridView;
use serde::Serialize;

/// Owned Laplacian response, `rows × cols`, row-major.
#[derive(Clone, Debug, Serialize)]
pub struct ScalarGrid {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl ScalarGrid {
    /// Zero-initialized grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, String> {
        let len = checked_len(rows, cols)?;
        if data.len() != len {
            return Err(format!(
                "grid buffer holds {} values, expected {rows}x{cols} = {len}",
                data.len()
            ));
        }
        Ok(Self { rows, cols, data })
    }

    /// Sample `f(row, col)` over the full grid.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    #[inline]
    pub fn idx(&self, r: usize, c: usize) -> usize {
        r * self.cols + c
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: f32) {
        let i = self.idx(r, c);
        self.data[i] = v;
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_view(&self) -> GridRef<'_> {
        GridRef {
            rows: self.rows,
            cols: self.cols,
            data: &self.data,
        }
    }
}

impl GridView for ScalarGrid {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }
    #[inline]
    fn row(&self, r: usize) -> &[f32] {
        let start = r * self.cols;
        &self.data[start..start + self.cols]
    }
}

/// Borrowed view over caller-owned row-major data.
#[derive(Clone, Copy, Debug)]
pub struct GridRef<'a> {
    pub rows: usize,
    pub cols: usize,
    pub data: &'a [f32],
}

impl<'a> GridRef<'a> {
    pub fn new(rows: usize, cols: usize, data: &'a [f32]) -> Result<Self, String> {
        if data.len() < checked_len(rows, cols)? {
            return Err(format!(
                "grid view over {} values is too short for {rows}x{cols}",
                data.len()
            ));
        }
        Ok(Self { rows, cols, data })
    }
}

impl<'a> GridView for GridRef<'a> {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }
    #[inline]
    fn row(&self, r: usize) -> &[f32] {
        let start = r * self.cols;
        &self.data[start..start + self.cols]
    }
}

fn checked_len(rows: usize, cols: usize) -> Result<usize, String> {
    rows.checked_mul(cols)
        .ok_or_else(|| format!("grid dimensions {rows}x{cols} overflow"))
}
