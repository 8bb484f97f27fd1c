//! Command-line interface for batch processing exemplar files

use crate::algorithm::executor::{CollapseEngine, GenerationConfig};
use crate::analysis::patterns::ImageProcessor;
use crate::analysis::rules::extract;
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_HEIGHT, DEFAULT_LOG_FILTER, DEFAULT_SEED, DEFAULT_WIDTH,
    OUTPUT_SUFFIX, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, invalid_target};
use crate::io::image::{export_grid_as_png, grayscale_palette};
use crate::io::progress::ProgressManager;
use crate::io::text::{TextProcessor, export_grid_as_text};
use crate::spatial::grid::{Grid, GridStatus};
use crate::spatial::pattern::ExemplarPattern;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate tile grids whose neighbours follow rules learned from an exemplar"
)]
/// Command-line arguments for the tile generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input exemplar (.png or .txt) or directory of exemplars
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output width in tiles (implies square if height not specified)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output height in tiles
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Seeds to try before keeping a grid with contradictions
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Mirror every learned rule onto the neighbouring tile's side
    #[arg(long)]
    pub symmetric: bool,

    /// Record the commit order as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Per-run parameters derived from the arguments
    pub fn generation_config(&self) -> GenerationConfig {
        let (width, height) = match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, w),
            (None, Some(h)) => (h, h),
            (None, None) => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
        };

        GenerationConfig {
            width,
            height,
            seed: self.seed,
            attempts: self.attempts,
            symmetric: self.symmetric,
        }
    }
}

/// A decoded exemplar together with the mapping used to write tiles back out
pub enum Exemplar {
    /// Decoded from a PNG; each tile id has a color
    Image {
        /// Tile ids per position
        pattern: ExemplarPattern,
        /// RGBA color per tile id
        color_mapping: Vec<[u8; 4]>,
    },
    /// Decoded from a text grid; each tile id has a character
    Text {
        /// Tile ids per position
        pattern: ExemplarPattern,
        /// Character per tile id
        char_mapping: Vec<char>,
    },
}

impl Exemplar {
    /// Decode a `.png` or `.txt` file
    ///
    /// # Errors
    ///
    /// Returns an error for other extensions or when decoding fails
    pub fn load(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("png") => {
                let (pattern, color_mapping) = ImageProcessor::from_png_file(path)?.into_parts();
                Ok(Self::Image {
                    pattern,
                    color_mapping,
                })
            }
            Some("txt") => {
                let (pattern, char_mapping) = TextProcessor::from_text_file(path)?.into_parts();
                Ok(Self::Text {
                    pattern,
                    char_mapping,
                })
            }
            _ => Err(invalid_target(path, "exemplar must be a .png or .txt file")),
        }
    }

    /// The decoded tile pattern
    pub const fn pattern(&self) -> &ExemplarPattern {
        match self {
            Self::Image { pattern, .. } | Self::Text { pattern, .. } => pattern,
        }
    }

    /// Colors for visualization: the image's own, or grays for text
    pub fn palette(&self) -> Vec<[u8; 4]> {
        match self {
            Self::Image { color_mapping, .. } => color_mapping.clone(),
            Self::Text { char_mapping, .. } => grayscale_palette(char_mapping.len()),
        }
    }

    /// Write `grid` in the same format the exemplar was read from
    ///
    /// # Errors
    ///
    /// Returns an error if a tile has no mapping or the file cannot be written
    pub fn export(&self, grid: &Grid, output_path: &Path) -> Result<()> {
        match self {
            Self::Image { color_mapping, .. } => export_grid_as_png(
                grid,
                color_mapping,
                output_path
                    .to_str()
                    .ok_or_else(|| invalid_target(output_path, "Invalid output path"))?,
            ),
            Self::Text { char_mapping, .. } => export_grid_as_text(grid, char_mapping, output_path),
        }
    }
}

/// Orchestrates batch processing of exemplar files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, decoding, rule extraction,
    /// grid construction or export fails. Contradicted grids are written
    /// and logged, not reported as errors.
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_exemplar(target) {
                return Err(invalid_target(
                    target,
                    "Target file must be a PNG image or text grid",
                ));
            }
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_exemplar(&path) && !is_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_target(
                target,
                "Target must be an exemplar file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            tracing::warn!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let output_path = Self::get_output_path(input_path);
        let config = self.cli.generation_config();

        let exemplar = Exemplar::load(input_path)?;
        let mut registry = extract(exemplar.pattern())?;
        if config.symmetric {
            registry = registry.symmetrized();
        }
        tracing::debug!(input = %input_path.display(), "learned rules:\n{registry}");

        let mut finished = None;

        for (attempt, seed) in config.attempt_seeds().enumerate() {
            let mut engine = CollapseEngine::new(&registry, config.width, config.height, seed)?;
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_file(index, input_path, engine.grid().area(), attempt + 1);
            }
            if self.cli.visualize {
                engine.enable_visualization(exemplar.palette());
            }

            while engine.run_iteration()? {
                if let Some(ref mut pm) = self.progress_manager {
                    pm.update_step(index, engine.iteration());
                }
            }

            let resolved = engine.grid().status() == GridStatus::Resolved;
            if !resolved {
                tracing::info!(
                    input = %input_path.display(),
                    seed,
                    contradictions = engine.contradictions(),
                    "attempt ended with contradictions"
                );
            }
            finished = Some(engine);
            if resolved {
                break;
            }
        }

        let Some(engine) = finished else {
            return Ok(());
        };

        exemplar.export(engine.grid(), &output_path)?;

        if self.cli.visualize {
            let viz_path = Self::get_visualization_path(input_path);
            engine.export_visualization(
                viz_path
                    .to_str()
                    .ok_or_else(|| invalid_target(&viz_path, "Invalid visualization path"))?,
            )?;
        }

        if let Err(error) = engine.grid().ensure_resolved() {
            tracing::warn!(input = %input_path.display(), "{error}");
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, engine.contradictions());
        }

        Ok(())
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    fn get_visualization_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let viz_name = format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}

fn is_exemplar(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("png" | "txt")
    )
}

// Outputs sit next to their inputs; a directory run must not feed them back in
fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
