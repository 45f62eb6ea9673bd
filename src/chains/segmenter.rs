use super::linker::Chain;
use crate::edgels::{dot, EdgelGrid};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Provenance of a segment: chain index plus segment index within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentRef {
    pub chain: usize,
    pub segment: usize,
}

/// Contiguous run `[start, end)` of a chain without gradient reversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub chain: usize,
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn reference(&self) -> SegmentRef {
        SegmentRef {
            chain: self.chain,
            segment: self.index,
        }
    }
}

/// Split points of `chain`: `0`, every `i` whose gradient opposes its
/// predecessor's (`dot < 0`), and `chain.len()`.
pub fn segment_boundaries(chain: &Chain, grid: &EdgelGrid) -> Vec<usize> {
    let mut bounds = vec![0];
    for (i, pair) in chain.edgels.windows(2).enumerate() {
        let prev = grid.edgel(pair[0]).grad;
        let cur = grid.edgel(pair[1]).grad;
        if dot(prev, cur) < 0.0 {
            bounds.push(i + 1);
        }
    }
    if !chain.is_empty() {
        bounds.push(chain.len());
    }
    bounds
}

/// Segments of chain number `chain_idx`.
pub fn split_chain(chain_idx: usize, chain: &Chain, grid: &EdgelGrid) -> Vec<Segment> {
    segment_boundaries(chain, grid)
        .windows(2)
        .enumerate()
        .map(|(index, w)| Segment {
            chain: chain_idx,
            index,
            start: w[0],
            end: w[1],
        })
        .collect()
}
