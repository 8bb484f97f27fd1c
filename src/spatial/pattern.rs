//! Exemplar patterns that adjacency rules are learned from

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Position;
use ndarray::Array2;

/// Dense grid of tile ids produced by a decoder
///
/// Stored with shape `(height, width)` and indexed `[y, x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExemplarPattern {
    tiles: Array2<usize>,
}

impl ExemplarPattern {
    /// Build a pattern from row-major tile ids (`y` outer, `x` inner)
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if `tiles.len() != width * height` or the
    /// extent overflows
    pub fn new(width: usize, height: usize, tiles: Vec<usize>) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            AlgorithmError::InvalidSourceData {
                reason: format!("pattern extent {width}x{height} overflows"),
            }
        })?;
        let found = tiles.len();
        let tiles = Array2::from_shape_vec((height, width), tiles).map_err(|_shape_error| {
            AlgorithmError::InvalidSourceData {
                reason: format!(
                    "pattern of extent {width}x{height} needs {expected} tiles, got {found}"
                ),
            }
        })?;
        Ok(Self { tiles })
    }

    /// Build a pattern from rows, where `rows[y][x]` is the tile at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the rows have differing lengths
    pub fn from_rows(rows: &[Vec<usize>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!(
                    "row {y} has {} tiles, expected {width} like row 0",
                    row.len()
                ),
            });
        }
        Self::new(width, rows.len(), rows.concat())
    }

    /// A pattern with no positions
    pub fn empty() -> Self {
        Self {
            tiles: Array2::zeros((0, 0)),
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.tiles.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.tiles.nrows()
    }

    /// True when the pattern holds no positions
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile id at `position`, if inside the pattern
    pub fn get(&self, position: Position) -> Option<usize> {
        self.tiles.get([position.y, position.x]).copied()
    }

    /// Iterate every `(position, tile id)` pair in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, usize)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((y, x), &tile)| (Position::new(x, y), tile))
    }
}
