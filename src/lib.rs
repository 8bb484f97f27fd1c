//! Wave function collapse over adjacency rules learned from an exemplar
//!
//! An exemplar pattern is scanned once to learn, for every tile, which tiles
//! may sit next to it in each direction. A fixed-size grid is then filled by
//! repeatedly committing the most constrained cell to a random permitted
//! tile and filtering its neighbours, until every cell is resolved or has
//! run out of options.

#![forbid(unsafe_code)]

/// Tile sets, cell selection, propagation and the collapse loop
pub mod algorithm;
/// Rule extraction and exemplar decoding
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Directions, patterns, tile registries and the output grid
pub mod spatial;

pub use algorithm::executor::{CollapseEngine, generate, generate_with_rng};
pub use analysis::rules::extract;
pub use io::error::{AlgorithmError, Result};
pub use spatial::{
    Cell, Direction, ExemplarPattern, Grid, GridStatus, Position, TileRegistry, TileType,
};
