//! PNG export of finished grids

use crate::io::configuration::CONTRADICTION_COLOR;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Grid;
use image::{ImageBuffer, Rgba};

/// Evenly spaced opaque grays, one per tile id
///
/// Used to visualize exemplars that carry no colors of their own.
pub fn grayscale_palette(tile_count: usize) -> Vec<[u8; 4]> {
    let steps = tile_count.saturating_sub(1).max(1);
    (0..tile_count)
        .map(|index| {
            let level = (index * 255 / steps) as u8;
            [level, level, level, 255]
        })
        .collect()
}

/// Export the grid as a PNG image, row `y` drawn as pixel row `y`
///
/// Contradicted cells are painted `CONTRADICTION_COLOR`.
///
/// # Errors
///
/// Returns an error if:
/// - A tile value is out of bounds for the color mapping
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, color_mapping: &[[u8; 4]], output_path: &str) -> Result<()> {
    let mut img = ImageBuffer::new(grid.width() as u32, grid.height() as u32);

    for (y, row) in grid.rows().into_iter().enumerate() {
        for (x, tile) in row.into_iter().enumerate() {
            let rgba = match tile {
                Some(tile) => color_mapping.get(tile).copied().ok_or(
                    AlgorithmError::InvalidTileIndex {
                        index: tile,
                        max_tiles: color_mapping.len(),
                    },
                )?,
                None => CONTRADICTION_COLOR,
            };
            img.put_pixel(x as u32, y as u32, Rgba(rgba));
        }
    }

    if let Some(parent) = std::path::Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}
