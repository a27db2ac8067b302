//! Cell and pattern primitives for the Life universe.

use std::collections::BTreeSet;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Grid coordinates of a single cell, `(x, y)`.
pub type Cell = (i32, i32);

/// Pattern operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Pattern contains no cells")]
    Empty,
}

/// A set of live cells, compared and hashed as a value.
///
/// Backed by an ordered set so iteration, equality, hashing and
/// serialization are deterministic no matter how the pattern was built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern {
    cells: BTreeSet<Cell>,
}

impl Pattern {
    /// Create an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check whether the pattern has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check whether `cell` is present.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Add a cell, returning false if it was already present.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Iterate over cells in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Minimum and maximum corners of the bounding box, if any cells exist.
    pub fn bounds(&self) -> Option<(Cell, Cell)> {
        self.cells
            .iter()
            .copied()
            .fold(None, |acc, (x, y)| match acc {
                None => Some(((x, y), (x, y))),
                Some(((min_x, min_y), (max_x, max_y))) => Some((
                    (min_x.min(x), min_y.min(y)),
                    (max_x.max(x), max_y.max(y)),
                )),
            })
    }

    /// Return this pattern with `(dx, dy)` added to every cell.
    pub fn offset(&self, dx: i32, dy: i32) -> Pattern {
        self.cells.iter().map(|&(x, y)| (x + dx, y + dy)).collect()
    }

    /// Translate the pattern so its minimum x and minimum y are both zero.
    ///
    /// Fails on an empty pattern, whose minimum is undefined.
    pub fn normalize(&self) -> Result<Pattern, PatternError> {
        let ((min_x, min_y), _) = self.bounds().ok_or(PatternError::Empty)?;
        Ok(self.offset(-min_x, -min_y))
    }

    /// Cells present in either pattern.
    pub fn union(&self, other: &Pattern) -> Pattern {
        self.cells.union(&other.cells).copied().collect()
    }

    /// Cells present in `self` but not in `other`.
    pub fn difference(&self, other: &Pattern) -> Pattern {
        self.cells.difference(&other.cells).copied().collect()
    }
}

impl FromIterator<Cell> for Pattern {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Cell> for Pattern {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

/// Return `pattern` translated by `(dx, dy)`.
///
/// Free-function form of [`Pattern::offset`] for external tooling.
pub fn offset(pattern: &Pattern, dx: i32, dy: i32) -> Pattern {
    pattern.offset(dx, dy)
}

/// Return `pattern` translated so its minimum x and y are both zero.
///
/// Free-function form of [`Pattern::normalize`].
pub fn normalize(pattern: &Pattern) -> Result<Pattern, PatternError> {
    pattern.normalize()
}

/// Built-in starting patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Seven-cell methuselah with a long unstable lifetime.
    Acorn,
    /// Period-2 oscillator of two diagonal blocks.
    Beacon,
    /// Period-2 oscillator of three cells in a row.
    Blinker,
    /// Diagonal spaceship.
    Glider,
}

impl Preset {
    /// Live cells of this preset at its canonical origin.
    pub fn cells(self) -> Pattern {
        let cells: &[Cell] = match self {
            Preset::Acorn => &[(0, 2), (1, 0), (1, 2), (3, 1), (4, 2), (5, 2), (6, 2)],
            Preset::Beacon => &[(0, 0), (0, 1), (1, 0), (2, 3), (3, 2), (3, 3)],
            Preset::Blinker => &[(0, 0), (1, 0), (2, 0)],
            Preset::Glider => &[(0, 0), (0, 1), (1, 0), (1, 2), (2, 0)],
        };
        cells.iter().copied().collect()
    }
}

/// Mixed starter population: a glider, a beacon and a blinker at fixed offsets.
pub fn sample_population() -> Pattern {
    Preset::Glider
        .cells()
        .union(&Preset::Beacon.cells().offset(2, 10))
        .union(&Preset::Blinker.cells().offset(10, 2))
}

/// Deterministic random soup.
///
/// Every cell of the `width x height` box (dimensions floored to 1) is alive
/// with probability `density`, drawn from an RNG seeded with `rng_seed`.
/// Identical arguments always produce identical patterns.
pub fn soup(width: i32, height: i32, density: f64, rng_seed: u64) -> Pattern {
    let density = if density.is_finite() {
        density.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut rng = StdRng::seed_from_u64(rng_seed);
    let mut cells = Pattern::new();
    for x in 0..width.max(1) {
        for y in 0..height.max(1) {
            if rng.gen_bool(density) {
                cells.insert((x, y));
            }
        }
    }
    cells
}
