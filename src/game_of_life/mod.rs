//! Cellular automaton core: grid, rules, and grid files

pub mod error;
pub mod grid;
pub mod io;
pub mod rules;

pub use error::{GridError, RuleError};
pub use grid::Grid;
pub use io::{create_example_grids, load_grid_from_file, save_grid_to_file};
pub use rules::{fertile_cells_amount, fertility_set, is_normal_game, FertilitySet, RuleModel};
