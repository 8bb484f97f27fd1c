//! Decoding PNG exemplars into tile patterns

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::pattern::ExemplarPattern;
use image::RgbaImage;
use std::collections::HashMap;
use std::path::Path;

/// Converts images to tile-id patterns and remembers each id's color
pub struct ImageProcessor {
    pattern: ExemplarPattern,
    color_mapping: Vec<[u8; 4]>,
}

impl ImageProcessor {
    /// Load and process an image from a PNG file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a valid image format
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        Self::from_rgba(&img.to_rgba8())
    }

    /// Label every pixel with a tile id
    ///
    /// Pixels are compared by RGB alone; alpha is dropped and every mapped
    /// color is opaque. Colors are numbered in the order first met, scanning
    /// rows from `y = 0`. Pixel `(col, row)` becomes position
    /// `(x = col, y = row)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the pixel buffer does not match the
    /// image extent
    pub fn from_rgba(image: &RgbaImage) -> Result<Self> {
        let mut color_mapping: Vec<[u8; 4]> = Vec::new();
        let mut color_to_tile: HashMap<[u8; 4], usize> = HashMap::new();

        let tiles = image
            .pixels()
            .map(|pixel| {
                let [red, green, blue, _] = pixel.0;
                let color = [red, green, blue, u8::MAX];
                *color_to_tile.entry(color).or_insert_with(|| {
                    color_mapping.push(color);
                    color_mapping.len() - 1
                })
            })
            .collect();

        let pattern = ExemplarPattern::new(image.width() as usize, image.height() as usize, tiles)?;

        Ok(Self {
            pattern,
            color_mapping,
        })
    }

    /// Get the decoded exemplar
    pub const fn pattern(&self) -> &ExemplarPattern {
        &self.pattern
    }

    /// Get the opaque RGBA color of each tile id (indexed by id)
    pub fn color_mapping(&self) -> &[[u8; 4]] {
        &self.color_mapping
    }

    /// Consume the processor and return its components
    pub fn into_parts(self) -> (ExemplarPattern, Vec<[u8; 4]>) {
        (self.pattern, self.color_mapping)
    }
}
