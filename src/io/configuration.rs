//! Algorithm constants and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Largest tile id a registry accepts; every possibility set holds `id + 1` bits
pub const MAX_TILE_ID: usize = 65_535;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default output width in tiles
pub const DEFAULT_WIDTH: usize = 10;

/// Default output height in tiles
pub const DEFAULT_HEIGHT: usize = 10;

/// Default number of generation attempts per input
pub const DEFAULT_ATTEMPTS: usize = 1;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Color written for contradicted cells
pub const CONTRADICTION_COLOR: [u8; 4] = [255, 0, 255, 255];
/// Character written for contradicted cells in text output
pub const NULL_CHAR: char = '.';
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
