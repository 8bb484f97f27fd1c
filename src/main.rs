//! CLI entry point for exemplar-driven tile generation

use clap::Parser;
use tilecollapse::io::cli::{Cli, FileProcessor};
use tilecollapse::io::logging::init_logging;

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
