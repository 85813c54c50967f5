//! Configuration settings for the simulator

use crate::game_of_life::RuleModel;
use crate::simulation::{EngineConfig, DEFAULT_GRID_SIZE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub rule: String,
    pub default_size: usize,
    pub generations: usize,
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub initial_state_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_final: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                rule: "B3/S23/A5".to_string(),
                default_size: DEFAULT_GRID_SIZE,
                generations: 10,
                tick_interval_ms: 500,
            },
            input: InputConfig {
                initial_state_file: None,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_final: false,
                output_directory: PathBuf::from("output"),
            },
        }
    }
}

impl SimulationConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            default_size: self.default_size,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        RuleModel::parse(&self.simulation.rule).context("Invalid simulation rule")?;

        if self.simulation.default_size == 0 {
            anyhow::bail!("Default grid size must be positive");
        }

        if self.simulation.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        if let Some(ref initial) = self.input.initial_state_file {
            if !initial.exists() {
                anyhow::bail!("Initial state file does not exist: {}", initial.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref rule) = cli_overrides.rule {
            self.simulation.rule = rule.clone();
        }
        if let Some(size) = cli_overrides.size {
            self.simulation.default_size = size;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(interval) = cli_overrides.tick_interval_ms {
            self.simulation.tick_interval_ms = interval;
        }
        if let Some(ref initial) = cli_overrides.initial_file {
            self.input.initial_state_file = Some(initial.clone());
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
            self.output.save_final = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rule: Option<String>,
    pub size: Option<usize>,
    pub generations: Option<usize>,
    pub tick_interval_ms: Option<u64>,
    pub initial_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.simulation.engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.simulation.rule = "B3/S23/A".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.default_size = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.generations = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.input.initial_state_file = Some(PathBuf::from("does/not/exist.txt"));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.simulation.rule = "B36/S23".to_string();
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.simulation.rule, "B36/S23");
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(loaded.input.initial_state_file, None);
    }

    #[test]
    fn test_from_file_rejects_bad_rule() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bad.yaml");

        let mut settings = Settings::default();
        settings.simulation.rule = "S23/B3".to_string();
        settings.to_file(&path).unwrap();

        assert!(Settings::from_file(&path).is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            rule: Some("B3/S23".to_string()),
            size: Some(8),
            generations: Some(3),
            tick_interval_ms: Some(0),
            initial_file: None,
            output_dir: Some(PathBuf::from("out")),
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.simulation.rule, "B3/S23");
        assert_eq!(settings.simulation.default_size, 8);
        assert_eq!(settings.simulation.generations, 3);
        assert_eq!(settings.simulation.tick_interval_ms, 0);
        assert!(settings.output.save_final);
        assert_eq!(settings.output.output_directory, PathBuf::from("out"));
    }
}
