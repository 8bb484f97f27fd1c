//! Spatial data structures
//!
//! This module contains:
//! - Adjacency directions and grid positions
//! - Exemplar patterns
//! - Tile types and their registry
//! - Cell state and the output grid

/// Directions and positions
pub mod direction;
/// Cell state and the output grid
pub mod grid;
/// Exemplar patterns
pub mod pattern;
/// Tile types and the rule registry
pub mod tiles;

pub use direction::{Direction, Position};
pub use grid::{Cell, Grid, GridStatus};
pub use pattern::ExemplarPattern;
pub use tiles::{TileRegistry, TileType};
