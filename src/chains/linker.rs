use super::options::ChainOptions;
use crate::edgels::{EdgelGrid, EdgelId};
use serde::Serialize;
use std::time::Instant;

/// Ordered run of adjacent edgels.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub edgels: Vec<EdgelId>,
    pub peak_grad_mag: f32,
    pub is_loop: bool,
}

impl Chain {
    pub fn len(&self) -> usize {
        self.edgels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edgels.is_empty()
    }
}

/// Links edgels into chains by following shared crossed edges.
///
/// The linker owns the visited table, so every edgel ends up in at most one
/// chain no matter how many seeds are tried.
pub struct ChainLinker<'a> {
    grid: &'a EdgelGrid,
    options: ChainOptions,
    visited: Vec<bool>,
    deadline: Option<Instant>,
    timed_out: bool,
}

impl<'a> ChainLinker<'a> {
    pub fn new(grid: &'a EdgelGrid, options: ChainOptions) -> Self {
        Self {
            grid,
            options,
            visited: vec![false; grid.len()],
            deadline: None,
            timed_out: false,
        }
    }

    /// Stop seeding new chains in [`ChainLinker::link_all`] once `deadline`
    /// has passed.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn is_visited(&self, id: EdgelId) -> bool {
        self.visited[id.index()]
    }

    /// Whether the last [`ChainLinker::link_all`] stopped on the deadline.
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Chain through `seed`, or `None` if the seed already belongs to one.
    ///
    /// The walk runs twice from the seed: forward leaving through its first
    /// crossed edge, backward through its second. Both walks expand their
    /// whole frontier each step and explore both edges of every edgel after
    /// the first step. The result reads the backward walk reversed, then the
    /// forward walk without the seed.
    pub fn link(&mut self, seed: EdgelId) -> Option<Chain> {
        if self.visited[seed.index()] {
            return None;
        }
        self.visited[seed.index()] = true;
        let mut peak = self.grid.edgel(seed).grad_mag;

        let forward = self.walk(seed, 0, &mut peak);
        let backward = self.walk(seed, 1, &mut peak);

        let mut edgels = Vec::with_capacity(forward.len() + backward.len() - 1);
        edgels.extend(backward.iter().rev());
        edgels.extend(&forward[1..]);

        let is_loop = edgels.len() >= self.options.min_loop_len
            && match (edgels.first(), edgels.last()) {
                (Some(&first), Some(&last)) => self
                    .grid
                    .edgel(first)
                    .shares_any_edge(self.grid.edgel(last)),
                _ => false,
            };

        Some(Chain {
            edgels,
            peak_grad_mag: peak,
            is_loop,
        })
    }

    /// Breadth-first walk from `seed`; the first step only leaves through
    /// `edges[first_edge]`. Returns the visited run, seed first.
    fn walk(&mut self, seed: EdgelId, first_edge: usize, peak: &mut f32) -> Vec<EdgelId> {
        let mut run = vec![seed];
        let mut frontier = vec![seed];
        let mut first_step = true;
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for &id in &frontier {
                let edgel = self.grid.edgel(id);
                for k in 0..2 {
                    if first_step && k != first_edge {
                        continue;
                    }
                    let Some(neighbor) = self.grid.neighbor_edgel(edgel.cell, edgel.sides[k])
                    else {
                        continue;
                    };
                    if self.visited[neighbor.index()] {
                        continue;
                    }
                    self.visited[neighbor.index()] = true;
                    let mag = self.grid.edgel(neighbor).grad_mag;
                    if mag > *peak {
                        *peak = mag;
                    }
                    run.push(neighbor);
                    next.push(neighbor);
                }
            }
            frontier = next;
            first_step = false;
        }
        run
    }

    /// Link every edgel, seeding in row-major cell order.
    pub fn link_all(&mut self) -> Vec<Chain> {
        let grid = self.grid;
        let mut chains = Vec::new();
        self.timed_out = false;
        for seed in grid.seed_order() {
            if self.visited[seed.index()] {
                continue;
            }
            if self.deadline.is_some_and(|d| Instant::now() >= d) {
                self.timed_out = true;
                break;
            }
            if let Some(chain) = self.link(seed) {
                chains.push(chain);
            }
        }
        chains
    }
}
