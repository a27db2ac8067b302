//! Harvest summaries and JSON export.

use std::fs;
use std::io;
use std::path::Path;

use super::{Farm, Seed};
use crate::schema::FarmConfig;

/// Aggregate counts over a farm's harvest.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FarmStats {
    /// Seeds planted.
    pub seeds: usize,
    /// Seeds whose trajectory stayed on fresh states.
    pub canonical: usize,
    /// Seeds that collided with an earlier seed's state.
    pub variants: usize,
    /// Distinct living-set states observed across all trajectories.
    pub distinct_states: usize,
    /// Most cycles any single seed ran.
    pub longest_run: u64,
    /// Largest population any trajectory reached.
    pub peak_population: usize,
}

impl FarmStats {
    /// Summarize a farm.
    pub fn from_farm(farm: &Farm) -> Self {
        let canonical = farm
            .harvest()
            .iter()
            .filter(|seed| seed.is_canonical())
            .count();
        Self {
            seeds: farm.seed_count(),
            canonical,
            variants: farm.seed_count() - canonical,
            distinct_states: farm.distinct_states(),
            longest_run: farm
                .harvest()
                .iter()
                .map(|seed| seed.generations)
                .max()
                .unwrap_or(0),
            peak_population: farm
                .harvest()
                .iter()
                .map(|seed| seed.max_living)
                .max()
                .unwrap_or(0),
        }
    }
}

/// Complete harvest in an export-friendly form.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HarvestExport {
    /// The farm parameters that produced this harvest.
    pub config: FarmConfig,
    /// Aggregate counts.
    pub stats: FarmStats,
    /// Every seed in planting order.
    pub seeds: Vec<Seed>,
}

impl HarvestExport {
    /// Snapshot a farm for export.
    pub fn from_farm(farm: &Farm) -> Self {
        Self {
            config: FarmConfig {
                width: farm.width(),
                height: farm.height(),
                max_cells: farm.cell_budget(),
            },
            stats: FarmStats::from_farm(farm),
            seeds: farm.harvest().to_vec(),
        }
    }

    /// Top seeds ranked by how long they ran, planting order breaking ties.
    pub fn top_runs(&self, n: usize) -> Vec<&Seed> {
        let mut seeds: Vec<&Seed> = self.seeds.iter().collect();
        seeds.sort_by(|a, b| b.generations.cmp(&a.generations));
        seeds.into_iter().take(n).collect()
    }

    /// Write the harvest as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Read a harvest back from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn farmed(width: i32, height: i32, max_cells: usize) -> Farm {
        let mut farm = Farm::new(width, height);
        farm.plant(max_cells).unwrap();
        farm
    }

    #[test]
    fn test_stats_census() {
        let stats = FarmStats::from_farm(&farmed(3, 3, 2));
        assert_eq!(
            stats,
            FarmStats {
                seeds: 13,
                canonical: 1,
                variants: 12,
                distinct_states: 14,
                longest_run: 2,
                peak_population: 2,
            }
        );
    }

    #[test]
    fn test_stats_of_untouched_farm_are_zero() {
        let stats = FarmStats::from_farm(&Farm::new(4, 4));
        assert_eq!(stats, FarmStats::default());
    }

    #[test]
    fn test_top_runs_rank_by_generations() {
        let export = HarvestExport::from_farm(&farmed(4, 4, 2));
        let top = export.top_runs(3);
        assert_eq!(top.len(), 3);
        assert!(top[0].generations >= top[1].generations);
        assert!(top[1].generations >= top[2].generations);
    }

    #[test]
    fn test_export_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("harvest.json");

        let export = HarvestExport::from_farm(&farmed(3, 3, 2));
        export.save(&path).unwrap();
        let loaded = HarvestExport::load(&path).unwrap();

        assert_eq!(loaded.config.width, 3);
        assert_eq!(loaded.config.height, 3);
        assert_eq!(loaded.config.max_cells, 2);
        assert_eq!(loaded.stats, export.stats);
        assert_eq!(loaded.seeds, export.seeds);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("harvest.json");
        fs::write(&path, "not json").unwrap();

        let err = HarvestExport::load(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
