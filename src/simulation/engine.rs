//! Generation engine: applies a rule to every cell and swaps in the new grid

use super::GenerationSummary;
use crate::game_of_life::{Grid, GridError, RuleError, RuleModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Extent of the square grid used when no initial grid is supplied
pub const DEFAULT_GRID_SIZE: usize = 20;

/// Construction-time options for [`GenerationEngine`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub default_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_GRID_SIZE,
        }
    }
}

/// Drives a grid through successive generations under one rule.
///
/// The rule string is parsed once on construction (and again only through
/// [`GenerationEngine::set_rule`]). Each call to [`GenerationEngine::advance`]
/// builds a complete new grid before replacing the current one, so a failed
/// tick never leaves a partially updated grid behind.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    rule: String,
    model: RuleModel,
    generation: u64,
    current_grid: Grid,
}

impl GenerationEngine {
    /// Create an engine, falling back to a dead square grid of `config.default_size`
    pub fn new(rule: &str, grid: Option<Grid>, config: &EngineConfig) -> Result<Self, RuleError> {
        let model = RuleModel::parse(rule)?;
        let current_grid = grid.unwrap_or_else(|| Grid::square(config.default_size));

        info!(
            rule,
            width = current_grid.width,
            height = current_grid.height,
            "Created generation engine"
        );

        Ok(Self {
            rule: rule.to_string(),
            model,
            generation: 0,
            current_grid,
        })
    }

    /// Evolve the current grid one generation forward and return the new grid
    pub fn advance(&mut self) -> Result<&Grid, GridError> {
        let current = &self.current_grid;
        let mut next = Grid::new(current.width, current.height);

        for row in 0..current.height {
            for col in 0..current.width {
                let value = current.get(row, col)?;
                let neighbours = current.neighbours(row, col)?;
                next.set(row, col, self.model.next_value(value, &neighbours))?;
            }
        }

        self.current_grid = next;
        self.generation += 1;

        debug!(
            generation = self.generation,
            living = self.current_grid.living_count(),
            "Advanced generation"
        );

        Ok(&self.current_grid)
    }

    /// Advance `generations` times, stopping at the first failure
    pub fn advance_by(&mut self, generations: usize) -> Result<&Grid, GridError> {
        for _ in 0..generations {
            self.advance()?;
        }
        Ok(&self.current_grid)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_grid(&self) -> &Grid {
        &self.current_grid
    }

    /// Replace the current grid. The generation counter is left untouched.
    pub fn set_grid(&mut self, grid: Grid) {
        self.current_grid = grid;
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn rule_model(&self) -> &RuleModel {
        &self.model
    }

    /// Switch to a different rule. On a parse failure the engine is unchanged.
    pub fn set_rule(&mut self, rule: &str) -> Result<(), RuleError> {
        self.model = RuleModel::parse(rule)?;
        self.rule = rule.to_string();
        debug!(rule, "Rule changed");
        Ok(())
    }

    /// Statistics for the current grid
    pub fn summary(&self) -> GenerationSummary {
        GenerationSummary::from_grid(self.generation, &self.current_grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(rule: &str, cells: Vec<Vec<u32>>) -> GenerationEngine {
        let grid = Grid::from_cells(cells).unwrap();
        GenerationEngine::new(rule, Some(grid), &EngineConfig::default()).unwrap()
    }

    fn with_default_grid(rule: &str) -> Result<GenerationEngine, RuleError> {
        GenerationEngine::new(rule, None, &EngineConfig::default())
    }

    fn living_cells(grid: &Grid) -> Vec<(usize, usize)> {
        (0..grid.height)
            .flat_map(|row| (0..grid.width).map(move |col| (row, col)))
            .filter(|&(row, col)| grid.get(row, col).unwrap() > 0)
            .collect()
    }

    #[test]
    fn test_default_grid() {
        let engine = with_default_grid("B3/S23").unwrap();
        assert_eq!(engine.current_grid().width, 20);
        assert_eq!(engine.current_grid().height, 20);
        assert_eq!(engine.generation(), 0);

        let config = EngineConfig { default_size: 7 };
        let engine = GenerationEngine::new("B3/S23", None, &config).unwrap();
        assert_eq!(engine.current_grid(), &Grid::square(7));
    }

    #[test]
    fn test_malformed_rule_rejected() {
        let result = with_default_grid("B3-S23");
        assert!(matches!(result, Err(RuleError::Malformed { .. })));
    }

    #[test]
    fn test_generation_counter() {
        let mut engine = with_default_grid("B3/S23").unwrap();
        assert_eq!(engine.generation(), 0);

        engine.advance().unwrap();
        engine.advance().unwrap();
        assert_eq!(engine.generation(), 2);

        engine.advance_by(5).unwrap();
        assert_eq!(engine.generation(), 7);
        assert_eq!(engine.summary().generation, 7);
    }

    #[test]
    fn test_dead_grid_stays_dead() {
        for rule in ["B3/S23", "B358/S237", "B3/S23/A5", "B2/S3/A9"] {
            let mut engine = with_default_grid(rule).unwrap();
            let next = engine.advance().unwrap();
            assert!(next.is_empty(), "{} produced life from nothing", rule);
        }
    }

    #[test]
    fn test_classical_triggers_apply_to_births() {
        // B3/S23 collapses to the trigger set {2, 3}, so dead cells with two
        // live neighbours are born as well
        let mut engine = engine("B3/S23", vec![
            vec![0, 0, 0],
            vec![1, 1, 0],
            vec![0, 0, 0],
        ]);
        let expected = Grid::from_cells(vec![
            vec![1, 1, 0],
            vec![0, 0, 0],
            vec![1, 1, 0],
        ])
        .unwrap();

        assert_eq!(engine.advance().unwrap(), &expected);
    }

    #[test]
    fn test_full_block_under_wide_triggers() {
        let full = vec![vec![1; 3]; 3];
        let original = Grid::from_cells(full.clone()).unwrap();

        // Corners see 3, edges 5, centre 8: all in {2, 3, 5, 7, 8}
        let mut wide = engine("B358/S237", full.clone());
        assert_eq!(wide.advance().unwrap(), &original);

        // Under {2, 3} only the corners remain
        let mut narrow = engine("B3/S23", full);
        let next = narrow.advance().unwrap();
        assert_eq!(living_cells(next), vec![(0, 0), (0, 2), (2, 0), (2, 2)]);
    }

    #[test]
    fn test_non_square_grid_keeps_dimensions() {
        let mut engine = engine("B3/S23", vec![vec![0, 1, 1, 1, 0]]);
        let next = engine.advance().unwrap();

        assert_eq!(next.width, 5);
        assert_eq!(next.height, 1);
        // Only the centre has two live neighbours
        assert_eq!(living_cells(next), vec![(0, 2)]);
    }

    #[test]
    fn test_isolated_cell_ages_to_death() {
        let mut engine = engine("B3/S23/A5", vec![
            vec![0, 0, 0],
            vec![0, 3, 0],
            vec![0, 0, 0],
        ]);

        for expected in [2, 1, 0, 0] {
            let grid = engine.advance().unwrap();
            assert_eq!(grid.get(1, 1).unwrap(), expected);
        }
    }

    #[test]
    fn test_ageing_rebirth() {
        // Three fertile neighbours (vitality 2 or 3) around the dead centre
        let mut engine = engine("B3/S23/A5", vec![
            vec![2, 3, 0],
            vec![0, 0, 0],
            vec![0, 2, 0],
        ]);

        let grid = engine.advance().unwrap();
        assert_eq!(grid.get(1, 1).unwrap(), 5);
        // Corner cells had no living neighbours and age by one
        assert_eq!(grid.get(0, 0).unwrap(), 1);
    }

    #[test]
    fn test_huge_maximum_age_advances() {
        let mut engine = engine("B3/S23/A400000000", vec![
            vec![2, 3, 0],
            vec![0, 0, 0],
            vec![0, 399_999_998, 0],
        ]);

        let grid = engine.advance().unwrap();
        assert_eq!(grid.get(1, 1).unwrap(), 400_000_000);
        assert_eq!(grid.get(2, 1).unwrap(), 399_999_997);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_set_grid_keeps_generation() {
        let mut engine = with_default_grid("B3/S23").unwrap();
        engine.advance().unwrap();

        let replacement = Grid::square(10);
        engine.set_grid(replacement.clone());

        assert_eq!(engine.current_grid(), &replacement);
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.advance().unwrap().width, 10);
    }

    #[test]
    fn test_set_rule() {
        let mut engine = with_default_grid("B3/S23").unwrap();
        assert!(engine.rule_model().is_classical());

        engine.set_rule("B3/S23/A6").unwrap();
        assert_eq!(engine.rule(), "B3/S23/A6");
        assert!(!engine.rule_model().is_classical());

        assert!(engine.set_rule("nonsense").is_err());
        assert_eq!(engine.rule(), "B3/S23/A6");
        assert_eq!(engine.rule_model(), &RuleModel::parse("B3/S23/A6").unwrap());
    }
}
