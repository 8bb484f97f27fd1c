//! Frame capture and GIF generation for the commit order of a run

use crate::io::configuration::{CONTRADICTION_COLOR, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Position;
use image::{Frame, Rgba, RgbaImage};

/// A single commit step
#[derive(Debug, Clone)]
pub struct CommitRecord {
    /// Committed position
    pub position: Position,
    /// Tile id (None for a contradiction)
    pub tile: Option<usize>,
    /// Commit step that produced this record
    pub iteration: usize,
}

/// Captures commit steps for visualization
///
/// Rows are drawn with `y = 0` at the top, matching the PNG exporter.
pub struct VisualizationCapture {
    pub(crate) commits: Vec<CommitRecord>,
    dimensions: (usize, usize),
    color_mapping: Vec<[u8; 4]>,
    empty_color: [u8; 4],
}

impl VisualizationCapture {
    /// The average of all tile colors is used for cells not yet committed
    pub fn new(width: usize, height: usize, color_mapping: Vec<[u8; 4]>) -> Self {
        let empty_color = if color_mapping.is_empty() {
            [128, 128, 128, 255]
        } else {
            let mut sums = [0u32; 4];
            for color in &color_mapping {
                for (sum, &channel) in sums.iter_mut().zip(color) {
                    *sum += u32::from(channel);
                }
            }
            let count = color_mapping.len() as u32;
            sums.map(|sum| (sum / count) as u8)
        };

        Self {
            commits: Vec::with_capacity(width * height),
            dimensions: (width, height),
            color_mapping,
            empty_color,
        }
    }

    /// Records a commit step
    pub fn record_commit(&mut self, position: Position, tile: Option<usize>, iteration: usize) {
        self.commits.push(CommitRecord {
            position,
            tile,
            iteration,
        });
    }

    /// Returns all recorded commit steps
    pub fn get_commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    /// Returns the total number of recorded commit steps
    pub const fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// Frame delays below `VIEWER_MIN_FRAME_DELAY_MS` are raised to it and
    /// intermediate frames dropped so the apparent speed is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No commit steps were captured
    /// - A committed tile has no color
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &str, frame_delay_ms: u32) -> Result<()> {
        if self.commits.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No commit steps captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms).max(1) as usize;

        let frames = self.generate_frames(effective_delay_ms, skip_factor)?;

        if let Some(parent) = std::path::Path::new(output_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.into(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.into(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Result<Vec<Frame>> {
        let (width, height) = self.dimensions;
        let mut img = RgbaImage::from_pixel(width as u32, height as u32, Rgba(self.empty_color));
        let mut frames = vec![Self::frame(img.clone(), delay_ms)];

        for (index, commit) in self.commits.iter().enumerate() {
            let color = match commit.tile {
                Some(tile) => self.color_mapping.get(tile).copied().ok_or(
                    AlgorithmError::InvalidTileIndex {
                        index: tile,
                        max_tiles: self.color_mapping.len(),
                    },
                )?,
                None => CONTRADICTION_COLOR,
            };

            if let Some(pixel) =
                img.get_pixel_mut_checked(commit.position.x as u32, commit.position.y as u32)
            {
                *pixel = Rgba(color);
            }

            if (index + 1) % skip_factor == 0 {
                frames.push(Self::frame(img.clone(), delay_ms));
            }
        }

        // Final frame displays longer for better visibility
        frames.push(Self::frame(img, delay_ms * 25));

        Ok(frames)
    }

    fn frame(img: RgbaImage, delay_ms: u32) -> Frame {
        Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
    }
}
