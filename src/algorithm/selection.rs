use crate::algorithm::bitset::TileBitset;
use crate::spatial::direction::Position;
use crate::spatial::grid::Grid;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Random source for every stochastic choice the engine makes
///
/// Seeded explicitly so identical inputs reproduce identical grids.
pub struct RandomSelector<R = StdRng> {
    rng: R,
}

impl RandomSelector<StdRng> {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSelector<R> {
    /// Wrap a caller-supplied random source
    pub const fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform index in `0..len`
    ///
    /// Returns `None` for `len == 0`; a single option is returned without
    /// drawing from the source.
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        match len {
            0 => None,
            1 => Some(0),
            _ => Some(self.rng.random_range(0..len)),
        }
    }

    /// Uniformly pick one element
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        self.choose_index(items.len())
            .and_then(|index| items.get(index).copied())
    }
}

/// Pick the next pending position to commit
///
/// While every position is pending the geometric center
/// `(width / 2, height / 2)` is taken. Afterwards one of the pending
/// positions with the fewest remaining tiles is drawn at random; contradicted
/// cells count as zero and so come first.
pub fn select_position<R: Rng>(grid: &Grid, selector: &mut RandomSelector<R>) -> Option<Position> {
    if grid.pending_count() == 0 {
        return None;
    }
    if grid.pending_count() == grid.area() {
        return Some(Position::new(grid.width() / 2, grid.height() / 2));
    }

    selector.choose(grid.most_constrained())
}

/// Draw one tile uniformly from a possibility set
pub fn choose_tile<R: Rng>(
    possibilities: &TileBitset,
    selector: &mut RandomSelector<R>,
) -> Option<usize> {
    selector
        .choose_index(possibilities.count())
        .and_then(|index| possibilities.iter().nth(index))
}
