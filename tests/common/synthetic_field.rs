use edgel_lines::field::ScalarGrid;

/// Field `x - x0`: a single vertical zero line at `x = x0`.
pub fn vertical_edge(rows: usize, cols: usize, x0: f32) -> ScalarGrid {
    assert!(rows > 1 && cols > 1, "field needs at least one cell");
    ScalarGrid::from_fn(rows, cols, |_, c| c as f32 - x0)
}

/// Signed distance to a circle: negative inside, zero set at `radius`.
pub fn ring(rows: usize, cols: usize, center: [f32; 2], radius: f32) -> ScalarGrid {
    ScalarGrid::from_fn(rows, cols, |r, c| {
        (c as f32 - center[0]).hypot(r as f32 - center[1]) - radius
    })
}

/// `-1` inside the given `(row0..=row1, col0..=col1)` boxes, `+1` elsewhere.
pub fn boxes(rows: usize, cols: usize, boxes: &[[usize; 4]]) -> ScalarGrid {
    ScalarGrid::from_fn(rows, cols, |r, c| {
        let inside = boxes
            .iter()
            .any(|&[r0, r1, c0, c1]| (r0..=r1).contains(&r) && (c0..=c1).contains(&c));
        if inside {
            -1.0
        } else {
            1.0
        }
    })
}

/// Smooth field with many curved zero lines.
pub fn waves(rows: usize, cols: usize) -> ScalarGrid {
    ScalarGrid::from_fn(rows, cols, |r, c| {
        let (x, y) = (c as f32, r as f32);
        (0.31 * x + 0.07 * y).sin() + 0.6 * (0.23 * y - 0.11 * x).cos() - 0.1
    })
}
