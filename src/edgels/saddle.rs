//! Pairing choice for saddle cells (all four sides cross zero).
//!
//! The two admissible pairings connect opposite corners of the cell:
//! A joins top–right and bottom–left, B joins right–bottom and left–top.
//! Each candidate edgel is compared against the directions of the
//! neighboring edgels on the two sides it touches; the pairing with the
//! larger sum of `|dot|` wins, ties going to B.
use super::types::{dot, normalize, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pairing {
    A,
    B,
}

impl Pairing {
    pub(crate) fn sides(self) -> [[Side; 2]; 2] {
        match self {
            Pairing::A => [[Side::Top, Side::Right], [Side::Bottom, Side::Left]],
            Pairing::B => [[Side::Right, Side::Bottom], [Side::Left, Side::Top]],
        }
    }
}

/// Scores `(a, b)` of both pairings.
///
/// `points` and `neighbor_dirs` are indexed by [`Side::index`].
pub(crate) fn pairing_scores(points: &[[f32; 2]; 4], neighbor_dirs: &[[f32; 2]; 4]) -> (f32, f32) {
    let score = |pairing: Pairing| -> f32 {
        pairing
            .sides()
            .iter()
            .map(|&[s0, s1]| {
                let p0 = points[s0.index()];
                let p1 = points[s1.index()];
                let dir = normalize([p1[0] - p0[0], p1[1] - p0[1]]);
                dot(dir, neighbor_dirs[s0.index()]).abs() + dot(dir, neighbor_dirs[s1.index()]).abs()
            })
            .sum()
    };
    (score(Pairing::A), score(Pairing::B))
}

pub(crate) fn choose_pairing(points: &[[f32; 2]; 4], neighbor_dirs: &[[f32; 2]; 4]) -> Pairing {
    let (score_a, score_b) = pairing_scores(points, neighbor_dirs);
    if score_a > score_b {
        Pairing::A
    } else {
        Pairing::B
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Crossing points of a unit cell at (0, 0), in side order top, right,
    // bottom, left.
    fn midside_points() -> [[f32; 2]; 4] {
        [[0.5, 0.0], [1.0, 0.5], [0.5, 1.0], [0.0, 0.5]]
    }

    #[test]
    fn equal_evidence_falls_back_to_b() {
        let dirs = [[0.0, 1.0], [1.0, 0.0], [0.0, 1.0], [1.0, 0.0]];
        let (score_a, score_b) = pairing_scores(&midside_points(), &dirs);
        assert!((score_a - score_b).abs() < 1e-6);
        assert_eq!(choose_pairing(&midside_points(), &dirs), Pairing::B);
    }

    #[test]
    fn diagonal_neighbors_pick_matching_pairing() {
        // Neighbors running along the top-right / bottom-left diagonals.
        let d = std::f32::consts::FRAC_1_SQRT_2;
        let dirs = [[d, d], [d, d], [d, d], [d, d]];
        assert_eq!(choose_pairing(&midside_points(), &dirs), Pairing::A);
        let (score_a, score_b) = pairing_scores(&midside_points(), &dirs);
        assert!(score_a > score_b);

        let dirs = [[d, -d], [d, -d], [d, -d], [d, -d]];
        assert_eq!(choose_pairing(&midside_points(), &dirs), Pairing::B);
    }
}
