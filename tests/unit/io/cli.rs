//! Tests for command-line interface parsing and file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tilecollapse::io::cli::{Cli, Exemplar, FileProcessor};
    use tilecollapse::io::configuration::{
        DEFAULT_ATTEMPTS, DEFAULT_HEIGHT, DEFAULT_LOG_FILTER, DEFAULT_SEED, DEFAULT_WIDTH,
    };
    use tilecollapse::io::error::AlgorithmError;

    const STRIPES: &str = "xoxo\nxoxo\n";

    fn run_quiet(target: &Path, extra: &[&str]) -> tilecollapse::Result<()> {
        let mut args = vec!["program", target.to_str().unwrap(), "--quiet"];
        args.extend_from_slice(extra);
        FileProcessor::new(Cli::parse_from(args)).process()
    }

    // Tests CLI parsing with only required target file argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "test.png"]);

        assert_eq!(cli.target, PathBuf::from("test.png"));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.attempts, DEFAULT_ATTEMPTS);
        assert_eq!(cli.log_level, DEFAULT_LOG_FILTER);
        assert!(!cli.quiet);
        assert!(!cli.symmetric);
        assert!(!cli.visualize);

        let config = cli.generation_config();
        assert_eq!((config.width, config.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    // Tests CLI parsing with all available arguments
    // Verified by swapping the short flags for width and height
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "input.txt",
            "-s",
            "123",
            "-w",
            "12",
            "-H",
            "7",
            "-a",
            "4",
            "--symmetric",
            "-v",
            "-q",
            "-n",
            "--log-level",
            "debug",
        ]);

        assert_eq!(cli.target, PathBuf::from("input.txt"));
        assert!(cli.quiet);
        assert!(cli.visualize);
        assert_eq!(cli.log_level, "debug");

        let config = cli.generation_config();
        assert_eq!(config.seed, 123);
        assert_eq!((config.width, config.height), (12, 7));
        assert_eq!(config.attempts, 4);
        assert!(config.symmetric);
    }

    // Tests a single given side makes a square grid
    // Verified by falling back to the default for the missing side
    #[test]
    fn test_square_from_one_side() {
        let from_width = Cli::parse_from(["program", "a.txt", "-w", "6"]).generation_config();
        assert_eq!((from_width.width, from_width.height), (6, 6));

        let from_height = Cli::parse_from(["program", "a.txt", "-H", "3"]).generation_config();
        assert_eq!((from_height.width, from_height.height), (3, 3));
    }

    // Tests file skip and progress flags
    // Verified by inverting boolean logic in skip_existing method
    #[test]
    fn test_flag_accessors() {
        let defaults = Cli::parse_from(["program", "test.png"]);
        assert!(defaults.skip_existing());
        assert!(defaults.should_show_progress());

        let flagged = Cli::parse_from(["program", "test.png", "--no-skip", "--quiet"]);
        assert!(!flagged.skip_existing());
        assert!(!flagged.should_show_progress());
    }

    // Tests unsupported or missing targets are rejected
    // Verified by accepting any file extension
    #[test]
    fn test_invalid_targets() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.md");
        fs::write(&notes, "xo").unwrap();

        assert!(run_quiet(&notes, &[]).is_err());
        assert!(run_quiet(&dir.path().join("missing.txt"), &[]).is_err());
        assert!(Exemplar::load(&notes).is_err());
    }

    // Tests a text exemplar produces a text grid of the requested size
    // Verified by writing the output next to the binary instead of the input
    #[test]
    fn test_process_text_exemplar() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stripes.txt");
        fs::write(&input, STRIPES).unwrap();

        run_quiet(&input, &["-w", "6", "-H", "4"]).unwrap();

        let output = fs::read_to_string(dir.path().join("stripes_result.txt")).unwrap();
        assert_eq!(output.lines().count(), 4);
        for line in output.lines() {
            assert_eq!(line.len(), 6);
            assert!(line == "xoxoxo" || line == "oxoxox", "unexpected row {line}");
        }
    }

    // Tests a PNG exemplar produces a PNG of the requested size using its colors
    // Verified by exporting with a grayscale palette
    #[test]
    fn test_process_png_exemplar() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plain.png");
        RgbaImage::from_pixel(2, 2, Rgba([9, 8, 7, 255]))
            .save(&input)
            .unwrap();

        run_quiet(&input, &["-w", "5", "-H", "3"]).unwrap();

        let output = image::open(dir.path().join("plain_result.png"))
            .unwrap()
            .to_rgba8();
        assert_eq!(output.dimensions(), (5, 3));
        assert!(output.pixels().all(|pixel| pixel.0 == [9, 8, 7, 255]));
    }

    // Tests existing outputs are skipped unless --no-skip is given
    // Verified by always regenerating
    #[test]
    fn test_skip_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stripes.txt");
        let output = dir.path().join("stripes_result.txt");
        fs::write(&input, STRIPES).unwrap();
        fs::write(&output, "keep").unwrap();

        run_quiet(&input, &[]).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep");

        run_quiet(&input, &["--no-skip", "-w", "2", "-H", "1"]).unwrap();
        assert_ne!(fs::read_to_string(&output).unwrap(), "keep");
    }

    // Tests directory runs process every exemplar but not earlier outputs
    // Verified by removing the output-suffix filter
    #[test]
    fn test_process_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), STRIPES).unwrap();
        fs::write(dir.path().join("b.txt"), "##\n##\n").unwrap();
        fs::write(dir.path().join("readme.md"), "ignored").unwrap();

        run_quiet(dir.path(), &["-w", "3"]).unwrap();
        run_quiet(dir.path(), &["-w", "3", "--no-skip"]).unwrap();

        assert!(dir.path().join("a_result.txt").exists());
        assert!(dir.path().join("b_result.txt").exists());
        assert!(!dir.path().join("a_result_result.txt").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("b_result.txt")).unwrap(),
            "###\n###\n###\n"
        );
    }

    // Tests --visualize writes the commit-order GIF next to the input
    // Verified by skipping the visualization export
    #[test]
    fn test_visualize_writes_gif() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stripes.txt");
        fs::write(&input, STRIPES).unwrap();

        run_quiet(&input, &["-w", "3", "--visualize"]).unwrap();

        assert!(dir.path().join("stripes_visualization.gif").exists());
    }

    // Tests contradicted grids are still written
    // Verified by returning the contradiction as an error
    #[test]
    fn test_contradicted_grid_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pair.txt");
        // One row "ab": a permits only b to its right, b only a to its left
        fs::write(&input, "ab\n").unwrap();

        run_quiet(&input, &["-w", "4", "-H", "1", "-a", "3"]).unwrap();

        let output = fs::read_to_string(dir.path().join("pair_result.txt")).unwrap();
        assert_eq!(output.trim_end().chars().count(), 4);
        assert!(output.contains('.'));
    }

    // Tests oversized output dimensions fail cleanly with progress bars enabled
    // Verified by sizing the progress bar from the requested sides before validation
    #[test]
    fn test_oversized_dimensions_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stripes.txt");
        fs::write(&input, STRIPES).unwrap();

        let huge = usize::MAX.to_string();
        let cli = Cli::parse_from([
            "program",
            input.to_str().unwrap(),
            "-w",
            huge.as_str(),
            "-H",
            huge.as_str(),
        ]);
        let result = FileProcessor::new(cli).process();
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidDimensions { .. })
        ));
        assert!(!dir.path().join("stripes_result.txt").exists());
    }

    // Tests the exemplar palette falls back to grays for text
    // Verified by returning an empty palette for text exemplars
    #[test]
    fn test_exemplar_palette() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stripes.txt");
        fs::write(&input, STRIPES).unwrap();

        let exemplar = Exemplar::load(&input).unwrap();
        assert_eq!(exemplar.palette().len(), 2);
        assert_eq!(exemplar.pattern().width(), 4);
    }
}
