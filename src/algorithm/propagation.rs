use crate::spatial::direction::{Direction, Position};
use crate::spatial::grid::{Grid, Narrowing};
use crate::spatial::tiles::TileType;

/// Effect of one commit on the neighbouring cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Neighbours whose possibilities were filtered and remain open
    pub narrowed: usize,
    /// Neighbours left with no possibilities
    pub contradicted: Vec<Position>,
}

/// Filter the four neighbours of a freshly committed cell
///
/// Each in-grid neighbour that is still uncollapsed keeps only the tiles
/// `tile` permits towards it. Only the committed tile's rules are
/// consulted; the neighbour's own rules for the opposite direction are not.
/// Neighbours emptied by the filter become contradictions at once and stay
/// pending until their own commit step.
pub fn propagate(grid: &mut Grid, position: Position, tile: &TileType) -> PropagationReport {
    let mut report = PropagationReport::default();
    let (width, height) = (grid.width(), grid.height());

    for direction in Direction::ALL {
        let Some(neighbour) = position.step(direction, width, height) else {
            continue;
        };

        match grid.narrow(neighbour, tile.rules(direction)) {
            Narrowing::Narrowed => report.narrowed += 1,
            Narrowing::Contradicted => {
                tracing::debug!(
                    %position,
                    %neighbour,
                    %direction,
                    tile = tile.id(),
                    "neighbour ran out of possibilities"
                );
                report.contradicted.push(neighbour);
            }
            Narrowing::Skipped => {}
        }
    }

    report
}
