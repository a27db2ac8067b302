//! Life Farm - Conway's Game of Life on a torus, with an exhaustive seed
//! farm built on top.
//!
//! The grid is a bounded universe whose edges wrap, so patterns that walk
//! off one side re-enter on the other. On top of the single-run engine, the
//! farm plants every distinct small pattern a universe admits, runs each
//! until its trajectory repeats a recorded state, and links seeds whose
//! trajectories collide.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration and pattern types for runs and farms
//! - `sim`: The toroidal grid engine and the exhaustive seed farm
//!
//! # Example
//!
//! ```rust
//! use life_farm::{
//!     schema::Preset,
//!     sim::{Farm, Grid},
//! };
//!
//! // Run a single pattern on a bounded torus
//! let mut grid = Grid::new(16, 16);
//! grid.populate(&Preset::Glider.cells()).unwrap();
//! for _ in 0..4 {
//!     grid.cycle();
//! }
//! assert_eq!(grid.population(), 5);
//!
//! // Exhaustively farm every small seed on a tiny universe
//! let mut farm = Farm::new(3, 3);
//! farm.plant(2).unwrap();
//! assert_eq!(farm.seed_count(), 13);
//! ```

pub mod schema;
pub mod sim;

// Re-export commonly used types
pub use schema::{FarmConfig, Pattern, Preset, RunConfig};
pub use sim::{Farm, Grid, HarvestExport, Seed};
