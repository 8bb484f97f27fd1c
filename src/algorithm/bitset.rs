use bitvec::prelude::*;
use std::fmt;

/// Fixed-capacity set of tile ids used for possibility and rule sets
///
/// Ids are 0-based and must be below the capacity given at construction;
/// larger ids are ignored on insert and never reported as members.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a set holding no tiles
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set holding every id below `capacity`
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Build a set from an iterator of ids
    pub fn from_ids<I>(ids: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::new(capacity);
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Number of representable ids
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile id
    pub fn insert(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Intersect this set with another in place
    ///
    /// Ids beyond the shorter capacity are dropped.
    pub fn intersect_with(&mut self, other: &Self) {
        let shared = self.bits.len().min(other.bits.len());
        if let (Some(mine), Some(theirs)) = (self.bits.get_mut(..shared), other.bits.get(..shared))
        {
            *mine &= theirs;
        }
        if let Some(rest) = self.bits.get_mut(shared..) {
            rest.fill(false);
        }
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate member ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all member ids in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_vec())
    }
}
