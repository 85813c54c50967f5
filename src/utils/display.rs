//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::{io::grid_to_string, Grid};
use crate::simulation::GenerationSummary;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Format grids for terminal output
pub struct GridFormatter;

/// JSON document written when saving a grid
#[derive(Serialize)]
struct GridSnapshot<'a> {
    rule: &'a str,
    summary: &'a GenerationSummary,
    grid: &'a Grid,
}

impl GridFormatter {
    fn cell_symbol(value: u32, max_vitality: u32) -> char {
        if value == 0 {
            return '·';
        }
        if max_vitality <= 1 {
            return '█';
        }
        // Shade living cells by how much of their vitality remains
        match u64::from(value) * 4 / (u64::from(max_vitality) + 1) {
            0 => '░',
            1 => '▒',
            2 => '▓',
            _ => '█',
        }
    }

    /// Format a grid in compact form, shading cells by vitality
    pub fn format_grid_compact(grid: &Grid) -> String {
        let max_vitality = grid.max_vitality();
        let mut output = String::with_capacity(grid.height * (grid.width + 1));
        for row in grid.rows() {
            for &value in row {
                output.push(Self::cell_symbol(value, max_vitality));
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let max_vitality = grid.max_vitality();
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..grid.width {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.rows().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &value in row {
                let symbol = Self::cell_symbol(value, max_vitality);
                output.push(symbol);
                output.push(symbol);
            }
            output.push('\n');
        }

        output
    }

    /// Format one generation: a heading with its statistics, then the grid
    pub fn format_generation(summary: &GenerationSummary, grid: &Grid) -> String {
        format!("{}\n{}", summary, Self::format_grid_compact(grid))
    }

    /// Save the final grid to the output directory and return the written path
    pub fn save_grid<P: AsRef<Path>>(
        grid: &Grid,
        rule: &str,
        summary: &GenerationSummary,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let (path, content) = match format {
            OutputFormat::Text => (
                output_dir.join(format!("generation_{:05}.txt", summary.generation)),
                grid_to_string(grid),
            ),
            OutputFormat::Json => {
                let snapshot = GridSnapshot { rule, summary, grid };
                (
                    output_dir.join(format!("generation_{:05}.json", summary.generation)),
                    serde_json::to_string_pretty(&snapshot).context("Failed to serialize grid")?,
                )
            }
        };

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write grid to file: {}", path.display()))?;

        Ok(path)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
