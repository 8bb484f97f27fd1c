use crate::{
    algorithm::propagation::propagate,
    algorithm::selection::{RandomSelector, choose_tile, select_position},
    io::error::{AlgorithmError, Result},
    io::visualization::VisualizationCapture,
    spatial::direction::Position,
    spatial::grid::{Cell, Grid, GridStatus},
    spatial::tiles::TileRegistry,
};
use rand::{Rng, rngs::StdRng};

/// Immutable per-run parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Output width in tiles
    pub width: usize,
    /// Output height in tiles
    pub height: usize,
    /// Seed of the first attempt
    pub seed: u64,
    /// Number of seeds to try before keeping a contradicted grid
    pub attempts: usize,
    /// Mirror every learned rule onto the neighbour's side before generating
    pub symmetric: bool,
}

impl GenerationConfig {
    /// Seeds tried in order: `seed`, `seed + 1`, ... (at least one)
    pub fn attempt_seeds(&self) -> impl Iterator<Item = u64> + use<> {
        let seed = self.seed;
        (0..self.attempts.max(1) as u64).map(move |offset| seed.wrapping_add(offset))
    }
}

/// What a single commit step did
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The cell was committed to a tile and its neighbours filtered
    Collapsed {
        /// Committed position
        position: Position,
        /// Drawn tile id
        tile: usize,
    },
    /// The cell had no possibilities left; nothing was propagated
    Contradicted {
        /// Contradicted position
        position: Position,
    },
}

impl StepOutcome {
    /// Position the step operated on
    pub const fn position(&self) -> Position {
        match self {
            Self::Collapsed { position, .. } | Self::Contradicted { position } => *position,
        }
    }
}

/// Select / commit / propagate loop over a fixed grid
///
/// Borrows the registry for the whole run and owns the grid until
/// `into_grid` or `run` hands it back. Every step takes exactly one position
/// out of the pending set, so a run always ends after `width * height` steps.
pub struct CollapseEngine<'a, R = StdRng> {
    registry: &'a TileRegistry,
    grid: Grid,
    random_selector: RandomSelector<R>,
    iteration: usize,
    contradictions: usize,
    emptied: usize,
    /// Optional visualization capture
    pub visualization: Option<VisualizationCapture>,
}

impl<'a> CollapseEngine<'a, StdRng> {
    /// Create an engine seeded for reproducible output
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` or `InvalidRule` from grid construction
    pub fn new(registry: &'a TileRegistry, width: usize, height: usize, seed: u64) -> Result<Self> {
        Self::from_rng(registry, width, height, RandomSelector::new(seed))
    }
}

impl<'a, R: Rng> CollapseEngine<'a, R> {
    /// Create an engine drawing from a caller-supplied random source
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either side is out of range and
    /// `InvalidRule` if the registry has no tile types
    pub fn from_rng(
        registry: &'a TileRegistry,
        width: usize,
        height: usize,
        random_selector: RandomSelector<R>,
    ) -> Result<Self> {
        if registry.is_empty() {
            return Err(AlgorithmError::InvalidRule {
                reason: "registry has no tile types".to_string(),
            });
        }
        let grid = Grid::new(width, height, registry.ids())?;

        Ok(Self {
            registry,
            grid,
            random_selector,
            iteration: 0,
            contradictions: 0,
            emptied: 0,
            visualization: None,
        })
    }

    /// Access the grid being generated
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Hand the grid back, in whatever state it is
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Commit steps performed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Contradicted cells committed so far
    pub const fn contradictions(&self) -> usize {
        self.contradictions
    }

    /// Cells emptied by propagation so far, committed or still pending
    ///
    /// Runs ahead of `contradictions` and matches it once the run ends.
    pub const fn emptied(&self) -> usize {
        self.emptied
    }

    /// Enable GIF recording of the commit order
    pub fn enable_visualization(&mut self, color_mapping: Vec<[u8; 4]>) {
        self.visualization = Some(VisualizationCapture::new(
            self.grid.width(),
            self.grid.height(),
            color_mapping,
        ));
    }

    /// Export visualization as GIF if enabled
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Visualization was not enabled
    /// - GIF export fails
    pub fn export_visualization(&self, output_path: &str) -> Result<()> {
        self.visualization.as_ref().map_or_else(
            || {
                Err(crate::io::error::invalid_parameter(
                    "visualization",
                    &"disabled",
                    &"Visualization was not enabled for this run",
                ))
            },
            |viz| viz.export_gif(output_path, crate::io::configuration::GIF_FRAME_DELAY_MS),
        )
    }

    /// Run a single commit step
    ///
    /// Returns `Ok(false)` once nothing is pending.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if a drawn tile is missing from the registry
    pub fn run_iteration(&mut self) -> Result<bool> {
        let Some(position) = select_position(&self.grid, &mut self.random_selector) else {
            return Ok(false);
        };
        self.iteration += 1;

        // Phase 1: commit the selected cell
        let outcome = self.commit(position);

        // Phase 2: filter the neighbours of a committed tile
        if let StepOutcome::Collapsed { tile, .. } = outcome {
            let tile_type = self
                .registry
                .get(tile)
                .ok_or(AlgorithmError::InvalidTileIndex {
                    index: tile,
                    max_tiles: self.registry.capacity(),
                })?;
            let report = propagate(&mut self.grid, position, tile_type);
            self.emptied += report.contradicted.len();
            tracing::trace!(
                %position,
                tile,
                narrowed = report.narrowed,
                emptied = report.contradicted.len(),
                "neighbours filtered"
            );
        }

        // Phase 3: bookkeeping
        self.grid.settle(position);
        if let Some(ref mut viz) = self.visualization {
            let tile = match outcome {
                StepOutcome::Collapsed { tile, .. } => Some(tile),
                StepOutcome::Contradicted { .. } => None,
            };
            viz.record_commit(position, tile, self.iteration);
        }

        if self.grid.pending_count() == 0 {
            self.log_completion();
        }

        Ok(true)
    }

    /// Run until nothing is pending and hand the grid back
    ///
    /// # Errors
    ///
    /// Propagates errors from `run_iteration`
    pub fn run(mut self) -> Result<Grid> {
        while self.run_iteration()? {}
        Ok(self.grid)
    }

    /// Like `run`, checking `should_cancel` before every step
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` with the completed step count as soon as
    /// `should_cancel` answers true, or errors from `run_iteration`
    pub fn run_with_cancel<F>(mut self, mut should_cancel: F) -> Result<Grid>
    where
        F: FnMut() -> bool,
    {
        while self.grid.pending_count() > 0 {
            if should_cancel() {
                return Err(AlgorithmError::Cancelled {
                    iteration: self.iteration,
                });
            }
            self.run_iteration()?;
        }
        Ok(self.grid)
    }

    fn commit(&mut self, position: Position) -> StepOutcome {
        let drawn = match self.grid.cell(position) {
            Some(Cell::Uncollapsed { possibilities }) => {
                choose_tile(possibilities, &mut self.random_selector)
            }
            _ => None,
        };

        if let Some(tile) = drawn {
            self.grid.collapse(position, tile);
            StepOutcome::Collapsed { position, tile }
        } else {
            self.contradictions += 1;
            tracing::debug!(%position, iteration = self.iteration, "cell committed as contradiction");
            StepOutcome::Contradicted { position }
        }
    }

    fn log_completion(&self) {
        match self.grid.status() {
            GridStatus::PartiallyContradicted => tracing::info!(
                width = self.grid.width(),
                height = self.grid.height(),
                steps = self.iteration,
                contradictions = self.contradictions,
                "generation finished with contradictions"
            ),
            _ => tracing::info!(
                width = self.grid.width(),
                height = self.grid.height(),
                steps = self.iteration,
                "generation resolved"
            ),
        }
    }
}

/// Generate a grid from `registry` with a seeded random source
///
/// The returned grid is `Resolved` or `PartiallyContradicted`; use
/// `Grid::status` or `Grid::ensure_resolved` to tell them apart.
///
/// # Errors
///
/// Returns `InvalidDimensions` or `InvalidRule` before any step is taken
pub fn generate(registry: &TileRegistry, width: usize, height: usize, seed: u64) -> Result<Grid> {
    CollapseEngine::new(registry, width, height, seed)?.run()
}

/// Generate a grid drawing from a caller-supplied random source
///
/// # Errors
///
/// Returns `InvalidDimensions` or `InvalidRule` before any step is taken
pub fn generate_with_rng<R: Rng>(
    registry: &TileRegistry,
    width: usize,
    height: usize,
    rng: R,
) -> Result<Grid> {
    CollapseEngine::from_rng(registry, width, height, RandomSelector::from_rng(rng))?.run()
}
