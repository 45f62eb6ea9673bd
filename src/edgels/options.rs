use serde::{Deserialize, Serialize};

/// Options for edgel construction and saddle-cell disambiguation.
///
/// - `saddle_retry_passes`: how many passes may revisit saddle cells that
///   had fewer than four resolved neighbors; cells still pending afterwards
///   are dropped.
/// - `origin`: reference point for the cached tangent projections.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgelOptions {
    pub saddle_retry_passes: usize,
    pub origin: [f32; 2],
}

impl Default for EdgelOptions {
    fn default() -> Self {
        Self {
            saddle_retry_passes: 10,
            origin: [0.0, 0.0],
        }
    }
}
