//! JSON I/O helpers for scalar grids and reports.
//!
//! - `load_grid_json`: read `{"rows": R, "cols": C, "data": [...]}` into a
//!   [`ScalarGrid`], validating the buffer length.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ScalarGrid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct GridFile {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

/// Parse a grid from its JSON text.
pub fn parse_grid_json(text: &str) -> Result<ScalarGrid, String> {
    let file: GridFile =
        serde_json::from_str(text).map_err(|e| format!("Failed to parse grid JSON: {e}"))?;
    ScalarGrid::from_vec(file.rows, file.cols, file.data)
}

/// Load a grid JSON file from disk.
pub fn load_grid_json(path: &Path) -> Result<ScalarGrid, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read grid {}: {e}", path.display()))?;
    parse_grid_json(&text).map_err(|e| format!("{}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::GridView;

    #[test]
    fn parses_row_major_grid() {
        let grid = parse_grid_json(r#"{"rows": 2, "cols": 2, "data": [1.0, -1.0, 0.5, 2.0]}"#)
            .expect("valid grid json");
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.get(1, 0), 0.5);
    }

    #[test]
    fn rejects_short_buffer() {
        let err = parse_grid_json(r#"{"rows": 2, "cols": 2, "data": [1.0]}"#).unwrap_err();
        assert!(err.contains("expected 2x2"), "unexpected error: {err}");
    }

    #[test]
    fn huge_dimensions_are_rejected() {
        let text = r#"{"rows": 4294967296, "cols": 4294967296, "data": [0.0]}"#;
        assert!(parse_grid_json(text).is_err());
    }
}
