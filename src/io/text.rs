//! Text-grid exemplars and text output
//!
//! Each non-blank line of the file is one row, the last line being `y = 0`,
//! so the file reads the same way the generated grid is printed. Every
//! distinct character is a tile, numbered in the order first met. Spaces are
//! tiles wherever they appear, including at either end of a line.

use crate::io::configuration::NULL_CHAR;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Grid;
use crate::spatial::pattern::ExemplarPattern;
use std::path::Path;

/// Converts text grids to tile-id patterns and remembers each id's character
#[derive(Debug)]
pub struct TextProcessor {
    pattern: ExemplarPattern,
    char_mapping: Vec<char>,
}

impl TextProcessor {
    /// Load and process a text grid file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its rows differ in length
    pub fn from_text_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read text exemplar",
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse a text grid
    ///
    /// Whitespace other than the space character is trimmed from both ends
    /// of each line, and lines left empty are skipped. Spaces are kept, so
    /// `" a "` is a row of three tiles.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the rows differ in length
    pub fn parse(content: &str) -> Result<Self> {
        let mut char_mapping: Vec<char> = Vec::new();
        let mut rows: Vec<Vec<usize>> = Vec::new();

        for line in content.lines().rev() {
            let row = line.trim_matches(|c: char| c.is_whitespace() && c != ' ');
            if row.is_empty() {
                continue;
            }

            let ids = row
                .chars()
                .map(|symbol| {
                    let known = char_mapping.iter().position(|&seen| seen == symbol);
                    known.unwrap_or_else(|| {
                        char_mapping.push(symbol);
                        char_mapping.len() - 1
                    })
                })
                .collect();
            rows.push(ids);
        }

        let pattern = ExemplarPattern::from_rows(&rows)?;
        Ok(Self {
            pattern,
            char_mapping,
        })
    }

    /// Get the decoded exemplar
    pub const fn pattern(&self) -> &ExemplarPattern {
        &self.pattern
    }

    /// Get the character of each tile id (indexed by id)
    pub fn char_mapping(&self) -> &[char] {
        &self.char_mapping
    }

    /// Consume the processor and return its components
    pub fn into_parts(self) -> (ExemplarPattern, Vec<char>) {
        (self.pattern, self.char_mapping)
    }
}

/// Render a grid as text, top line `y = height - 1`
///
/// Cells without a tile are written as `NULL_CHAR`.
///
/// # Errors
///
/// Returns `InvalidTileIndex` if a tile has no character assigned
pub fn render_grid(grid: &Grid, char_mapping: &[char]) -> Result<String> {
    let mut output = String::with_capacity((grid.width() + 1) * grid.height());

    for row in grid.rows().iter().rev() {
        for tile in row {
            let symbol = match tile {
                Some(tile) => {
                    char_mapping
                        .get(*tile)
                        .copied()
                        .ok_or(AlgorithmError::InvalidTileIndex {
                            index: *tile,
                            max_tiles: char_mapping.len(),
                        })?
                }
                None => NULL_CHAR,
            };
            output.push(symbol);
        }
        output.push('\n');
    }

    Ok(output)
}

/// Write a grid as a text file
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written
pub fn export_grid_as_text(grid: &Grid, char_mapping: &[char], output_path: &Path) -> Result<()> {
    let rendered = render_grid(grid, char_mapping)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(output_path, rendered).map_err(|e| AlgorithmError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write text output",
        source: e,
    })
}
