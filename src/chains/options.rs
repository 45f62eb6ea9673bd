use serde::{Deserialize, Serialize};

/// Options for chain linking.
///
/// - `min_loop_len`: a chain is reported closed only when it has at least
///   this many edgels and its first and last edgels share a crossed edge.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainOptions {
    pub min_loop_len: usize,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self { min_loop_len: 9 }
    }
}
