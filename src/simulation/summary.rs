//! Population statistics for a single generation

use crate::game_of_life::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: u64,
    pub living: usize,
    pub dead: usize,
    pub max_vitality: u32,
}

impl GenerationSummary {
    pub fn from_grid(generation: u64, grid: &Grid) -> Self {
        let living = grid.living_count();
        Self {
            generation,
            living,
            dead: grid.width * grid.height - living,
            max_vitality: grid.max_vitality(),
        }
    }

    /// Share of living cells, in percent
    pub fn density(&self) -> f64 {
        let total = self.living + self.dead;
        if total == 0 {
            0.0
        } else {
            self.living as f64 / total as f64 * 100.0
        }
    }
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generation {}: {} living, {} dead ({:.1}% density), max vitality {}",
            self.generation,
            self.living,
            self.dead,
            self.density(),
            self.max_vitality
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_grid() {
        let grid = Grid::from_cells(vec![vec![0, 3], vec![1, 0]]).unwrap();
        let summary = GenerationSummary::from_grid(7, &grid);

        assert_eq!(summary.generation, 7);
        assert_eq!(summary.living, 2);
        assert_eq!(summary.dead, 2);
        assert_eq!(summary.max_vitality, 3);
        assert!((summary.density() - 50.0).abs() < f64::EPSILON);
        assert_eq!(
            summary.to_string(),
            "Generation 7: 2 living, 2 dead (50.0% density), max vitality 3"
        );
    }

    #[test]
    fn test_summary_serializes() {
        let summary = GenerationSummary::from_grid(0, &Grid::square(2));
        let json = serde_json::to_string(&summary).unwrap();
        let restored: GenerationSummary = serde_json::from_str(&json).unwrap();

        assert_eq!(summary, restored);
        assert_eq!(summary.density(), 0.0);
    }
}
