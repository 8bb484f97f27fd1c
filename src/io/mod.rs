/// Command-line driver
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG export
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Progress bars
pub mod progress;
/// Text-grid input and output
pub mod text;
/// GIF capture of the commit order
pub mod visualization;
