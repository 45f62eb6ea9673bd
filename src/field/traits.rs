/// Read-only row-major access to a 2D scalar field.
///
/// Coordinates follow the grid convention used throughout the crate: `row`
/// grows downward (image `y`), `col` grows rightward (image `x`).
pub trait GridView {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    fn row(&self, r: usize) -> &[f32];

    #[inline]
    fn get(&self, r: usize, c: usize) -> f32 {
        self.row(r)[c]
    }

    fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    fn row_iter(&self) -> RowIter<'_, Self>
    where
        Self: Sized,
    {
        RowIter { grid: self, r: 0 }
    }
}

pub struct RowIter<'a, G: ?Sized + GridView> {
    grid: &'a G,
    r: usize,
}

impl<'a, G: GridView> Iterator for RowIter<'a, G> {
    type Item = &'a [f32];

    fn next(&mut self) -> Option<Self::Item> {
        if self.r >= self.grid.rows() {
            return None;
        }
        let r = self.r;
        self.r += 1;
        Some(self.grid.row(r))
    }
}
