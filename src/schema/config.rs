//! Run configuration for simulations and farm searches.

use serde::{Deserialize, Serialize};

use super::{Cell, Pattern, Preset, sample_population, soup};

/// Default grid width/height for a plain run.
fn default_dimension() -> i32 {
    16
}

/// Default number of cycles for a plain run.
fn default_steps() -> u64 {
    100
}

/// Default farm universe width/height.
fn default_farm_dimension() -> i32 {
    3
}

/// Default farm cell budget.
fn default_max_cells() -> usize {
    3
}

/// Configuration for one plain simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Grid width in cells. Values below 1 are clamped to 1.
    #[serde(default = "default_dimension")]
    pub width: i32,
    /// Grid height in cells. Values below 1 are clamped to 1.
    #[serde(default = "default_dimension")]
    pub height: i32,
    /// Number of cycles to run.
    #[serde(default = "default_steps")]
    pub steps: u64,
    /// Starting pattern.
    #[serde(default)]
    pub pattern: PatternSource,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
            steps: default_steps(),
            pattern: PatternSource::default(),
        }
    }
}

impl RunConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.pattern {
            PatternSource::Soup { density, .. } => {
                if !density.is_finite() || !(0.0..=1.0).contains(density) {
                    return Err(ConfigError::InvalidDensity { density: *density });
                }
            }
            PatternSource::Cells { cells } => {
                if cells.is_empty() {
                    return Err(ConfigError::EmptyCells);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Where a run's starting pattern comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternSource {
    /// The built-in sample population.
    #[default]
    Sample,
    /// A named preset pattern.
    Preset {
        /// Which preset to use.
        name: Preset,
    },
    /// Deterministic random soup filling the whole grid.
    Soup {
        /// Probability that each cell starts alive (0.0 to 1.0).
        density: f64,
        /// RNG seed; identical seeds produce identical soups.
        rng_seed: u64,
    },
    /// An explicit list of live cells.
    Cells {
        /// The live cells.
        cells: Vec<Cell>,
    },
}

impl PatternSource {
    /// Materialize the starting pattern for a `width x height` grid.
    pub fn build(&self, width: i32, height: i32) -> Pattern {
        match self {
            PatternSource::Sample => sample_population(),
            PatternSource::Preset { name } => name.cells(),
            PatternSource::Soup { density, rng_seed } => soup(width, height, *density, *rng_seed),
            PatternSource::Cells { cells } => cells.iter().copied().collect(),
        }
    }
}

/// Configuration for one farm search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmConfig {
    /// Universe width in cells. Values below 1 are clamped to 1.
    #[serde(default = "default_farm_dimension")]
    pub width: i32,
    /// Universe height in cells. Values below 1 are clamped to 1.
    #[serde(default = "default_farm_dimension")]
    pub height: i32,
    /// Largest seed size to plant, in live cells.
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            width: default_farm_dimension(),
            height: default_farm_dimension(),
            max_cells: default_max_cells(),
        }
    }
}

impl FarmConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cells == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Soup density {density} is not within 0.0..=1.0")]
    InvalidDensity { density: f64 },
    #[error("Explicit cell list is empty")]
    EmptyCells,
    #[error("Farm cell budget must be non-zero")]
    ZeroBudget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let run: RunConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(run.width, 16);
        assert_eq!(run.steps, 100);
        assert!(matches!(run.pattern, PatternSource::Sample));

        let farm: FarmConfig = serde_json::from_str("{}").unwrap();
        assert_eq!((farm.width, farm.height, farm.max_cells), (3, 3, 3));
    }

    #[test]
    fn test_tagged_pattern_source_parses() {
        let run: RunConfig =
            serde_json::from_str(r#"{"pattern": {"type": "preset", "name": "acorn"}}"#).unwrap();
        assert!(matches!(
            run.pattern,
            PatternSource::Preset {
                name: Preset::Acorn
            }
        ));
    }

    #[test]
    fn test_validate_rejects_bad_density() {
        let run = RunConfig {
            pattern: PatternSource::Soup {
                density: 1.5,
                rng_seed: 0,
            },
            ..Default::default()
        };
        assert!(run.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        let farm = FarmConfig {
            max_cells: 0,
            ..Default::default()
        };
        assert!(farm.validate().is_err());
    }

    #[test]
    fn test_pattern_source_build() {
        let explicit = PatternSource::Cells {
            cells: vec![(0, 0), (4, 2)],
        };
        assert_eq!(explicit.build(8, 8).len(), 2);

        let full = PatternSource::Soup {
            density: 1.0,
            rng_seed: 9,
        };
        assert_eq!(full.build(4, 4).len(), 16);
    }
}
