//! Learning directional adjacency rules from an exemplar pattern

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Direction;
use crate::spatial::pattern::ExemplarPattern;
use crate::spatial::tiles::{TileRegistry, TileType, capacity_for};
use std::collections::BTreeMap;

/// Scan `pattern` once and record every observed neighbour pair
///
/// For a tile `i` at `p` and an in-pattern neighbour `j` at `p + offset(d)`,
/// `j` is added to `i`'s rule set for `d`. The result does not depend on
/// scan order.
///
/// # Errors
///
/// Returns `InvalidRule` if the pattern holds no positions or a tile id
/// exceeds `MAX_TILE_ID`
pub fn extract(pattern: &ExemplarPattern) -> Result<TileRegistry> {
    if pattern.is_empty() {
        return Err(AlgorithmError::InvalidRule {
            reason: format!(
                "exemplar pattern of extent {}x{} holds no tiles",
                pattern.width(),
                pattern.height()
            ),
        });
    }

    let capacity = capacity_for(pattern.iter().map(|(_, id)| id))?;
    let mut tiles: BTreeMap<usize, TileType> = BTreeMap::new();

    for (position, id) in pattern.iter() {
        let tile = tiles
            .entry(id)
            .or_insert_with(|| TileType::new(id, capacity));

        for direction in Direction::ALL {
            let neighbour = position
                .step(direction, pattern.width(), pattern.height())
                .and_then(|next| pattern.get(next));
            if let Some(neighbour) = neighbour {
                tile.add_rule(direction, neighbour);
            }
        }
    }

    let registry = TileRegistry::from_tiles(tiles, capacity)?;
    tracing::debug!(
        tile_types = registry.len(),
        width = pattern.width(),
        height = pattern.height(),
        "extracted adjacency rules"
    );
    Ok(registry)
}
