//! Sim module - Toroidal Life universe and the seed farm built on it.

mod farm;
mod grid;
mod report;

pub use farm::*;
pub use grid::*;
pub use report::*;
