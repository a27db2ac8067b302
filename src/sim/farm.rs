//! Exhaustive seed search over a bounded Life universe.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::Grid;
use crate::schema::{Cell, FarmConfig, Pattern, PatternError};

/// Identity of a seed within one farm, in planting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedId(usize);

impl SeedId {
    /// Position of this seed in the harvest, counting from zero.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Record of one planted pattern and what farming it revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    /// Identity in planting order.
    pub number: SeedId,
    /// The normalized pattern this seed was planted with.
    pub cells: Pattern,
    /// Cycles the trajectory ran before reaching a state already on record.
    pub generations: u64,
    /// Peak population across the trajectory, repeated state included.
    pub max_living: usize,
    /// Seed whose trajectory first produced the state this one repeated,
    /// when that seed is not this one.
    pub variant_of: Option<SeedId>,
    /// Seeds that later collided with a state this seed produced first.
    pub variations: Vec<SeedId>,
}

impl Seed {
    /// A seed is canonical when its trajectory never reached a state some
    /// earlier seed had already produced.
    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.variant_of.is_none()
    }
}

/// Why a `plant` call stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantOutcome {
    /// Every shape within the budget was explored.
    Exhausted,
    /// The cancel flag was raised between seeds.
    Cancelled,
}

/// Lexicographic k-combinations of a fixed coordinate list.
struct Combinations {
    items: Vec<Cell>,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    fn new(items: Vec<Cell>, k: usize) -> Self {
        let done = k > items.len();
        Self {
            items,
            indices: (0..k).collect(),
            done,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<Cell>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let combination: Vec<Cell> = self.indices.iter().map(|&i| self.items[i]).collect();

        // Advance the index tuple, rightmost position first.
        let n = self.items.len();
        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] != i + n - k {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }
        Some(combination)
    }
}

/// Exhaustive explorer of small starting patterns on a shared toroidal
/// universe.
///
/// Every distinct (up to translation) pattern within the cell budget is
/// planted once and simulated until its trajectory reaches a state some seed
/// has already produced, its own included. States are compared by exact
/// coordinates, so two seeds only link up when their trajectories truly
/// collide; shapes that merely look alike at different positions stay
/// independent.
pub struct Farm {
    width: i32,
    height: i32,
    /// Universe coordinates in enumeration order.
    land: Vec<Cell>,
    /// Normalized shapes already planted.
    planted: HashSet<Pattern>,
    /// Every exact living-set state observed, mapped to its first producer.
    history: HashMap<Pattern, SeedId>,
    /// All seeds in planting order.
    seeds: Vec<Seed>,
    /// Largest cell budget fully explored so far.
    budget: usize,
    /// Raised by callers to stop `plant` at the next seed boundary.
    cancelled: Arc<AtomicBool>,
}

impl Farm {
    /// Create a farm over a `width x height` universe, flooring each
    /// dimension to 1.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut land = Vec::with_capacity((width * height) as usize);
        for x in 0..width {
            for y in 0..height {
                land.push((x, y));
            }
        }
        Self {
            width,
            height,
            land,
            planted: HashSet::new(),
            history: HashMap::new(),
            seeds: Vec::new(),
            budget: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a farm from a config.
    pub fn from_config(config: &FarmConfig) -> Self {
        Self::new(config.width, config.height)
    }

    /// Universe width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Universe height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Universe coordinates in enumeration order.
    #[inline]
    pub fn land(&self) -> &[Cell] {
        &self.land
    }

    /// Number of seeds planted so far.
    #[inline]
    pub fn seed_count(&self) -> usize {
        self.seeds.len()
    }

    /// Number of distinct living-set states ever observed.
    #[inline]
    pub fn distinct_states(&self) -> usize {
        self.history.len()
    }

    /// Largest cell budget fully explored so far.
    #[inline]
    pub fn cell_budget(&self) -> usize {
        self.budget
    }

    /// Get cancellation handle.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// All seeds in planting order.
    #[inline]
    pub fn harvest(&self) -> &[Seed] {
        &self.seeds
    }

    /// Look up a seed by id.
    pub fn get(&self, id: SeedId) -> Option<&Seed> {
        self.seeds.get(id.index())
    }

    /// Exhaustively plant every distinct shape of 1 to `max_cells` cells.
    ///
    /// Shapes are enumerated by cell count, then lexicographically over the
    /// land, so seed numbering is reproducible run to run. Shapes planted by
    /// an earlier call are skipped, which makes repeated calls cumulative.
    pub fn plant(&mut self, max_cells: usize) -> Result<PlantOutcome, PatternError> {
        for size in 1..=max_cells {
            debug!(
                "planting seeds of {size} cells on {}x{} land",
                self.width, self.height
            );
            for combination in Combinations::new(self.land.clone(), size) {
                if self.cancelled.load(Ordering::Relaxed) {
                    return Ok(PlantOutcome::Cancelled);
                }
                let shape = combination.into_iter().collect::<Pattern>().normalize()?;
                if !self.planted.insert(shape.clone()) {
                    continue;
                }
                self.grow(shape)?;
            }
            self.budget = self.budget.max(size);
        }
        Ok(PlantOutcome::Exhausted)
    }

    /// Run one seed until its trajectory repeats a recorded state.
    ///
    /// Each state the seed reaches first is recorded as owned by it; hitting
    /// any recorded state stops the run, and hitting another seed's state
    /// additionally links the two. The universe is finite, so the loop
    /// always terminates.
    fn grow(&mut self, shape: Pattern) -> Result<(), PatternError> {
        let id = SeedId(self.seeds.len());
        let mut grid = Grid::new(self.width, self.height);
        grid.populate(&shape)?;

        let mut generations = 0u64;
        let mut max_living = 0usize;
        let variant_of = loop {
            max_living = max_living.max(grid.population());
            match self.history.entry(grid.living().clone()) {
                Entry::Occupied(entry) => {
                    let owner = *entry.get();
                    break (owner != id).then_some(owner);
                }
                Entry::Vacant(entry) => {
                    entry.insert(id);
                }
            }
            grid.cycle();
            generations += 1;
        };

        if let Some(owner) = variant_of {
            self.seeds[owner.index()].variations.push(id);
        }
        trace!(
            "seed {id}: {} cells, {generations} generations, peak {max_living}",
            shape.len()
        );
        self.seeds.push(Seed {
            number: id,
            cells: shape,
            generations,
            max_living,
            variant_of,
            variations: Vec::new(),
        });
        Ok(())
    }
}
