//! File I/O operations for grids

use super::Grid;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a grid from a text file
///
/// Format: each line is a row. A row is either a run of single digits
/// (`0` dead, `1`-`9` alive) or whitespace-separated numbers when vitality
/// values need more than one digit.
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

fn parse_row(line: &str, row_idx: usize) -> Result<Vec<u32>> {
    if line.contains(char::is_whitespace) {
        return line
            .split_whitespace()
            .enumerate()
            .map(|(col_idx, token)| {
                token.parse::<u32>().with_context(|| {
                    format!("Invalid value '{}' at position ({}, {})", token, row_idx, col_idx)
                })
            })
            .collect();
    }

    line.chars()
        .enumerate()
        .map(|(col_idx, ch)| match ch.to_digit(10) {
            Some(value) => Ok(value),
            None => anyhow::bail!(
                "Invalid character '{}' at position ({}, {}). Only digits are allowed",
                ch,
                row_idx,
                col_idx
            ),
        })
        .collect()
}

/// Parse a grid from a string representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid file is empty or contains no valid rows");
    }

    let cells = lines
        .iter()
        .enumerate()
        .map(|(row_idx, line)| parse_row(line, row_idx))
        .collect::<Result<Vec<_>>>()?;

    Ok(Grid::from_cells(cells)?)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_string(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to string representation
///
/// Uses one digit per cell when every value fits, space-separated values otherwise.
pub fn grid_to_string(grid: &Grid) -> String {
    let compact = grid.max_vitality() <= 9;
    let mut result = String::with_capacity(grid.height * (grid.width + 1));

    for row in grid.rows() {
        if compact {
            for &value in row {
                result.push(char::from_digit(value, 10).unwrap_or('0'));
            }
        } else {
            let tokens: Vec<String> = row.iter().map(u32::to_string).collect();
            result.push_str(&tokens.join(" "));
        }
        result.push('\n');
    }

    result
}

/// Create example grid files for testing
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        ("glider.txt", "00100\n10100\n01100\n00000\n00000\n"),
        ("blinker.txt", "000\n111\n000\n"),
        ("block.txt", "0000\n0110\n0110\n0000\n"),
        ("beacon.txt", "110000\n110000\n001100\n001100\n"),
        // Mixed vitality, meant for ageing rules such as B3/S23/A5
        ("ember.txt", "000000\n003500\n025320\n003500\n000000\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid_from_string() {
        let content = "010\n102\n030\n";
        let grid = parse_grid_from_string(content).unwrap();

        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 3);
        assert_eq!(grid.living_count(), 4);
        assert_eq!(grid.get(0, 1).unwrap(), 1);
        assert_eq!(grid.get(1, 2).unwrap(), 2);
        assert_eq!(grid.get(2, 1).unwrap(), 3);
    }

    #[test]
    fn test_parse_wide_values() {
        let content = "0 12 0\n3 0 10\n";
        let grid = parse_grid_from_string(content).unwrap();

        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.get(0, 1).unwrap(), 12);
        assert_eq!(grid.get(1, 2).unwrap(), 10);
    }

    #[test]
    fn test_grid_to_string() {
        let grid = Grid::from_cells(vec![vec![0, 1, 0], vec![4, 0, 1]]).unwrap();
        assert_eq!(grid_to_string(&grid), "010\n401\n");

        let wide = Grid::from_cells(vec![vec![0, 11], vec![2, 0]]).unwrap();
        assert_eq!(grid_to_string(&wide), "0 11\n2 0\n");
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/test_grid.txt");

        let original_grid = Grid::from_cells(vec![vec![5, 0, 1], vec![0, 3, 0]]).unwrap();

        save_grid_to_file(&original_grid, &file_path).unwrap();
        let loaded_grid = load_grid_from_file(&file_path).unwrap();

        assert_eq!(original_grid, loaded_grid);
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_grid_from_string("010\n1X1\n010\n").is_err());
        assert!(parse_grid_from_string("010\n11\n010\n").is_err());
        assert!(parse_grid_from_string("").is_err());
        assert!(parse_grid_from_string("0 -1\n0 0\n").is_err());
    }

    #[test]
    fn test_create_example_grids() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();

        for name in ["glider.txt", "blinker.txt", "block.txt", "beacon.txt", "ember.txt"] {
            assert!(temp_dir.path().join(name).exists(), "{} missing", name);
        }

        let glider = load_grid_from_file(temp_dir.path().join("glider.txt")).unwrap();
        assert_eq!(glider.width, 5);
        assert_eq!(glider.height, 5);
        assert_eq!(glider.living_count(), 5);

        let ember = load_grid_from_file(temp_dir.path().join("ember.txt")).unwrap();
        assert_eq!(ember.max_vitality(), 5);
    }
}
