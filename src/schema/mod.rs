//! Schema module - Configuration and pattern types for Life runs.

mod config;
mod pattern;

pub use config::*;
pub use pattern::*;
