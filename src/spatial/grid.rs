//! Cell state and the fixed-size grid the collapse engine fills in
//!
//! Every cell moves through `Uncollapsed -> Collapsed` or
//! `Uncollapsed -> Contradiction`; both end states are terminal. The grid
//! also tracks the pending set: positions not yet taken by a commit step.
//! Pending positions are bucketed by remaining tile count so the most
//! constrained ones are found without scanning the grid.

use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Position;

/// Per-position algorithm state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Not yet committed; the set is never empty while in this state
    Uncollapsed {
        /// Tiles this cell could still become
        possibilities: TileBitset,
    },
    /// Committed to a single tile
    Collapsed {
        /// The committed tile id
        tile: usize,
    },
    /// Ran out of possibilities before it could be committed
    Contradiction,
}

impl Cell {
    /// Number of tiles still open (1 once collapsed, 0 for a contradiction)
    pub fn remaining(&self) -> usize {
        match self {
            Self::Uncollapsed { possibilities } => possibilities.count(),
            Self::Collapsed { .. } => 1,
            Self::Contradiction => 0,
        }
    }

    /// Committed tile, if any
    pub const fn tile(&self) -> Option<usize> {
        match self {
            Self::Collapsed { tile } => Some(*tile),
            _ => None,
        }
    }

    /// True for `Collapsed` and `Contradiction`
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Uncollapsed { .. })
    }
}

/// Outcome of a narrowing applied to one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrowing {
    /// Cell was terminal or outside the grid; nothing changed
    Skipped,
    /// Possibility set shrank or stayed equal and is still non-empty
    Narrowed,
    /// Possibility set became empty; the cell is now a contradiction
    Contradicted,
}

/// Whole-grid generation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStatus {
    /// Positions are still pending
    Generating,
    /// Every cell is collapsed
    Resolved,
    /// Nothing pending, but at least one cell is a contradiction
    PartiallyContradicted,
}

/// Pending positions grouped by remaining tile count
///
/// Each bucket is unordered; `slots` records where a position sits so it can
/// be moved between buckets with a swap-remove.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RemainingIndex {
    buckets: BTreeMap<usize, Vec<Position>>,
    slots: Array2<Option<(usize, usize)>>,
}

impl RemainingIndex {
    fn new(width: usize, height: usize, remaining: usize) -> Self {
        let mut index = Self {
            buckets: BTreeMap::new(),
            slots: Array2::from_elem((height, width), None),
        };
        for x in 0..width {
            for y in 0..height {
                index.insert(Position::new(x, y), remaining);
            }
        }
        index
    }

    fn insert(&mut self, position: Position, remaining: usize) {
        let bucket = self.buckets.entry(remaining).or_default();
        if let Some(slot) = self.slots.get_mut([position.y, position.x]) {
            *slot = Some((remaining, bucket.len()));
            bucket.push(position);
        }
    }

    fn remove(&mut self, position: Position) {
        let Some((remaining, slot)) = self
            .slots
            .get_mut([position.y, position.x])
            .and_then(Option::take)
        else {
            return;
        };
        let Some(bucket) = self.buckets.get_mut(&remaining) else {
            return;
        };
        if slot >= bucket.len() {
            return;
        }

        bucket.swap_remove(slot);
        let moved = bucket.get(slot).copied();
        if let Some(entry) = moved.and_then(|other| self.slots.get_mut([other.y, other.x])) {
            *entry = Some((remaining, slot));
        }
        if bucket.is_empty() {
            self.buckets.remove(&remaining);
        }
    }

    fn fewest(&self) -> &[Position] {
        self.buckets
            .first_key_value()
            .map(|(_, bucket)| bucket.as_slice())
            .unwrap_or_default()
    }
}

/// Fixed-size grid of cells plus the pending position set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
    pending: BTreeSet<Position>,
    by_remaining: RemainingIndex,
}

impl Grid {
    /// Create a grid with every cell open to all of `tile_ids`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either side is 0 or above
    /// `MAX_GRID_DIMENSION`, and `InvalidRule` if `tile_ids` is empty
    pub fn new(width: usize, height: usize, tile_ids: TileBitset) -> Result<Self> {
        if width < 1 || height < 1 || width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(AlgorithmError::InvalidDimensions { width, height });
        }
        if tile_ids.is_empty() {
            return Err(AlgorithmError::InvalidRule {
                reason: "grid needs at least one tile id".to_string(),
            });
        }

        let by_remaining = RemainingIndex::new(width, height, tile_ids.count());
        let cells = Array2::from_elem(
            (height, width),
            Cell::Uncollapsed {
                possibilities: tile_ids,
            },
        );
        let pending = (0..width)
            .flat_map(|x| (0..height).map(move |y| Position::new(x, y)))
            .collect();

        Ok(Self {
            cells,
            pending,
            by_remaining,
        })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Cell at `position`, if inside the grid
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get([position.y, position.x])
    }

    /// Committed tile at `position`
    pub fn tile_at(&self, position: Position) -> Option<usize> {
        self.cell(position).and_then(Cell::tile)
    }

    /// Positions not yet taken by a commit step, in `(x, y)` order
    pub fn pending(&self) -> impl Iterator<Item = Position> + '_ {
        self.pending.iter().copied()
    }

    /// Number of positions still pending
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pending positions sharing the lowest remaining tile count
    ///
    /// Contradicted cells count as zero. The order within the slice is
    /// deterministic for a given history of steps but otherwise unspecified.
    pub fn most_constrained(&self) -> &[Position] {
        self.by_remaining.fewest()
    }

    /// Whether `position` is still pending
    pub fn is_pending(&self, position: Position) -> bool {
        self.pending.contains(&position)
    }

    /// Current whole-grid state
    pub fn status(&self) -> GridStatus {
        if !self.pending.is_empty() {
            GridStatus::Generating
        } else if self.cells.iter().any(|cell| matches!(cell, Cell::Contradiction)) {
            GridStatus::PartiallyContradicted
        } else {
            GridStatus::Resolved
        }
    }

    /// Positions of every contradicted cell in `(x, y)` order
    pub fn contradictions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self
            .cells
            .indexed_iter()
            .filter(|(_, cell)| matches!(cell, Cell::Contradiction))
            .map(|((y, x), _)| Position::new(x, y))
            .collect();
        positions.sort_unstable();
        positions
    }

    /// Committed tiles per row, `rows()[y][x]`; contradictions and open cells are `None`
    pub fn rows(&self) -> Vec<Vec<Option<usize>>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(Cell::tile).collect())
            .collect()
    }

    /// Fail unless every cell resolved to a tile
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` listing the failed positions when the grid
    /// ended `PartiallyContradicted`, or `InvalidParameter` while the grid
    /// is still generating
    pub fn ensure_resolved(&self) -> Result<()> {
        match self.status() {
            GridStatus::Resolved => Ok(()),
            GridStatus::PartiallyContradicted => Err(AlgorithmError::Contradiction {
                positions: self.contradictions(),
            }),
            GridStatus::Generating => Err(crate::io::error::invalid_parameter(
                "grid",
                &format!("{} pending", self.pending.len()),
                &"generation has not finished",
            )),
        }
    }

    /// Commit `position` to `tile`
    pub(crate) fn collapse(&mut self, position: Position, tile: usize) {
        if let Some(cell) = self.cells.get_mut([position.y, position.x]) {
            *cell = Cell::Collapsed { tile };
        }
    }

    /// Intersect an uncollapsed cell's possibilities with `allowed`
    ///
    /// An empty result moves the cell to `Contradiction` straight away.
    pub(crate) fn narrow(&mut self, position: Position, allowed: &TileBitset) -> Narrowing {
        let Some(cell) = self.cells.get_mut([position.y, position.x]) else {
            return Narrowing::Skipped;
        };
        let Cell::Uncollapsed { possibilities } = &mut *cell else {
            return Narrowing::Skipped;
        };

        let before = possibilities.count();
        possibilities.intersect_with(allowed);
        let after = possibilities.count();
        if after == 0 {
            *cell = Cell::Contradiction;
        }

        if after != before && self.pending.contains(&position) {
            self.by_remaining.remove(position);
            self.by_remaining.insert(position, after);
        }
        if after == 0 {
            Narrowing::Contradicted
        } else {
            Narrowing::Narrowed
        }
    }

    /// Take `position` out of the pending set
    pub(crate) fn settle(&mut self, position: Position) -> bool {
        self.by_remaining.remove(position);
        self.pending.remove(&position)
    }
}
