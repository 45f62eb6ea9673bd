//! JSON configs for the command-line tools.

pub mod rank_lines;

pub use rank_lines::{load_config, RankLinesConfig, RankLinesOutputConfig};
