//! Tile types and the registry owning their directional adjacency rules
//!
//! Each tile type records, per direction, which tile ids it permits as a
//! neighbour on that side. Rules are read from the tile's own perspective:
//! `tile.rules(Right)` containing `j` means "j may sit to my right" and says
//! nothing about what `j` permits on its left.

use crate::algorithm::bitset::TileBitset;
use crate::io::configuration::MAX_TILE_ID;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Direction;
use std::collections::BTreeMap;
use std::fmt;

/// A distinct tile symbol and its adjacency rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileType {
    id: usize,
    rules: [TileBitset; 4],
}

impl TileType {
    /// Create a tile type permitting no neighbours
    pub fn new(id: usize, capacity: usize) -> Self {
        Self {
            id,
            rules: std::array::from_fn(|_| TileBitset::new(capacity)),
        }
    }

    /// Identifier unique within the owning registry
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Tiles permitted as neighbour towards `direction`
    pub const fn rules(&self, direction: Direction) -> &TileBitset {
        match direction {
            Direction::Up => &self.rules[0],
            Direction::Right => &self.rules[1],
            Direction::Down => &self.rules[2],
            Direction::Left => &self.rules[3],
        }
    }

    /// Whether `neighbour` may sit towards `direction`
    pub fn permits(&self, direction: Direction, neighbour: usize) -> bool {
        self.rules(direction).contains(neighbour)
    }

    pub(crate) fn add_rule(&mut self, direction: Direction, neighbour: usize) {
        if let Some(rule) = self.rules.get_mut(direction.index()) {
            rule.insert(neighbour);
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type: {}, rules :", self.id)?;
        for direction in Direction::ALL {
            write!(f, " {direction}: {}", self.rules(direction))?;
        }
        Ok(())
    }
}

/// Every tile type learned from an exemplar
///
/// Immutable once built, so a single registry can be shared across
/// concurrent generations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRegistry {
    tiles: BTreeMap<usize, TileType>,
    capacity: usize,
}

impl TileRegistry {
    pub(crate) fn from_tiles(tiles: BTreeMap<usize, TileType>, capacity: usize) -> Result<Self> {
        if tiles.is_empty() {
            return Err(AlgorithmError::InvalidRule {
                reason: "registry has no tile types".to_string(),
            });
        }
        Ok(Self { tiles, capacity })
    }

    /// Build a registry from hand-authored rules
    ///
    /// Each entry is a tile id and its permitted neighbours in
    /// `Direction::ALL` order (up, right, down, left).
    ///
    /// # Errors
    ///
    /// Returns `InvalidRule` if no entries are given, an id repeats or
    /// exceeds `MAX_TILE_ID`, or a rule names an id that has no entry of its own
    pub fn from_rules(entries: &[(usize, [Vec<usize>; 4])]) -> Result<Self> {
        let capacity = capacity_for(entries.iter().map(|(id, _)| *id))?;

        let mut tiles = BTreeMap::new();
        for (id, _) in entries {
            if tiles.insert(*id, TileType::new(*id, capacity)).is_some() {
                return Err(AlgorithmError::InvalidRule {
                    reason: format!("tile id {id} is declared twice"),
                });
            }
        }

        for (id, rules) in entries {
            for (direction, neighbours) in Direction::ALL.into_iter().zip(rules) {
                for &neighbour in neighbours {
                    if !tiles.contains_key(&neighbour) {
                        return Err(AlgorithmError::InvalidRule {
                            reason: format!(
                                "tile {id} permits unknown tile {neighbour} towards {direction}"
                            ),
                        });
                    }
                    if let Some(tile) = tiles.get_mut(id) {
                        tile.add_rule(direction, neighbour);
                    }
                }
            }
        }

        Self::from_tiles(tiles, capacity)
    }

    /// Copy of this registry where every rule also holds from the neighbour's side
    ///
    /// For each `j` in `i.rules(d)`, `i` is added to `j.rules(d.opposite())`.
    #[must_use]
    pub fn symmetrized(&self) -> Self {
        let mut tiles = self.tiles.clone();
        for tile in self.tiles.values() {
            for direction in Direction::ALL {
                for neighbour in tile.rules(direction).iter() {
                    if let Some(other) = tiles.get_mut(&neighbour) {
                        other.add_rule(direction.opposite(), tile.id());
                    }
                }
            }
        }
        Self {
            tiles,
            capacity: self.capacity,
        }
    }

    /// Number of tile types
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a constructed registry
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Bitset capacity needed to hold every id (`max id + 1`)
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up a tile type by id
    pub fn get(&self, id: usize) -> Option<&TileType> {
        self.tiles.get(&id)
    }

    /// The full id set, used as every cell's starting possibilities
    pub fn ids(&self) -> TileBitset {
        TileBitset::from_ids(self.tiles.keys().copied(), self.capacity)
    }

    /// Iterate tile types in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &TileType> {
        self.tiles.values()
    }
}

/// Bitset capacity for the given ids (`max id + 1`, 0 when there are none)
///
/// # Errors
///
/// Returns `InvalidRule` if an id exceeds `MAX_TILE_ID`
pub(crate) fn capacity_for(ids: impl Iterator<Item = usize>) -> Result<usize> {
    let Some(max_id) = ids.max() else {
        return Ok(0);
    };
    if max_id > MAX_TILE_ID {
        return Err(AlgorithmError::InvalidRule {
            reason: format!("tile id {max_id} exceeds the limit of {MAX_TILE_ID}"),
        });
    }
    Ok(max_id + 1)
}

impl fmt::Display for TileRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tile in self.tiles.values() {
            writeln!(f, "{tile}")?;
        }
        Ok(())
    }
}
