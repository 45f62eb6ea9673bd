//! Chain linking and gradient-reversal segmentation.
//!
//! [`ChainLinker`] follows shared crossed edges from cell to cell, turning
//! the edgel arena into ordered chains. [`split_chain`] then cuts each chain
//! wherever the gradient flips sign between consecutive edgels, so every
//! [`Segment`] sees a single edge polarity.

mod linker;
mod options;
mod segmenter;

pub use linker::{Chain, ChainLinker};
pub use options::ChainOptions;
pub use segmenter::{segment_boundaries, split_chain, Segment, SegmentRef};

use crate::edgels::EdgelGrid;
use log::debug;
use std::time::Instant;

/// Chains of `grid`, plus whether seeding stopped on `deadline`.
pub fn link_chains(
    grid: &EdgelGrid,
    options: &ChainOptions,
    deadline: Option<Instant>,
) -> (Vec<Chain>, bool) {
    let mut linker = ChainLinker::new(grid, *options).with_deadline(deadline);
    let chains = linker.link_all();
    let loops = chains.iter().filter(|c| c.is_loop).count();
    debug!(
        "ChainLinker: chains={} loops={} edgels={} timed_out={}",
        chains.len(),
        loops,
        grid.len(),
        linker.timed_out()
    );
    (chains, linker.timed_out())
}
