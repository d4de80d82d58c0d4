//! Tests for command-line interface parsing and file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use sirds::depth::Polarity;
    use sirds::io::cli::{Cli, StereogramRenderer};
    use sirds::io::configuration::{
        DEFAULT_HEIGHT, DEFAULT_NUM_COLORS, DEFAULT_SEED, DEFAULT_WIDTH, DPI,
    };
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // Tests CLI parsing with only the required output argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "-o", "out.png"]);

        assert_eq!(cli.output, PathBuf::from("out.png"));
        assert_eq!(cli.width, DEFAULT_WIDTH);
        assert_eq!(cli.height, DEFAULT_HEIGHT);
        assert_eq!(cli.colors, DEFAULT_NUM_COLORS);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.dpi, DPI);
        assert!(cli.template.is_none());
        assert!(cli.should_show_progress());
        assert_eq!(cli.polarity(), Polarity::NearIsHigh);
    }

    // Tests CLI parsing with all available arguments
    // Verified by swapping the short flags for width and height
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "--output",
            "dir/out.bmp",
            "-t",
            "0110",
            "-W",
            "320",
            "-H",
            "200",
            "-c",
            "6",
            "-s",
            "123",
            "--dpi",
            "96",
            "--depth-of-field",
            "0.5",
            "--invert",
            "--quiet",
        ]);

        assert_eq!(cli.output, PathBuf::from("dir/out.bmp"));
        assert_eq!(cli.template.as_deref(), Some("0110"));
        assert_eq!((cli.width, cli.height), (320, 200));
        assert_eq!(cli.colors, 6);
        assert_eq!(cli.seed, 123);
        assert_eq!(cli.dpi, 96);
        assert!((cli.depth_of_field - 0.5).abs() < f64::EPSILON);
        assert_eq!(cli.polarity(), Polarity::NearIsLow);
        assert!(!cli.should_show_progress());
    }

    // Tests only one depth source may be given
    // Verified by allowing multiple members in the depth group
    #[test]
    fn test_cli_depth_sources_conflict() {
        let result = Cli::try_parse_from(["program", "-o", "a.png", "-t", "1", "-d", "d.png"]);
        assert!(result.is_err());

        let missing_output = Cli::try_parse_from(["program", "-t", "1"]);
        assert!(missing_output.is_err());
    }

    // Tests render configuration validates geometry arguments
    // Verified by skipping geometry validation
    #[test]
    fn test_render_config_validation() {
        let valid = StereogramRenderer::new(Cli::parse_from([
            "program", "-o", "a.png", "-W", "50", "-s", "9",
        ]));
        let config = valid.render_config().unwrap();
        assert_eq!(config.width, 50);
        assert_eq!(config.seed, 9);

        let invalid = StereogramRenderer::new(Cli::parse_from([
            "program",
            "-o",
            "a.png",
            "--depth-of-field",
            "2",
        ]));
        assert!(invalid.render_config().is_err());
    }

    // Tests explicit palettes override the random color count
    // Verified by generating colors when a palette is given
    #[test]
    fn test_palette_selection() {
        let explicit = StereogramRenderer::new(Cli::parse_from([
            "program", "-o", "a.png", "-p", "#000,#fff", "-c", "9",
        ]));
        let palette = explicit.palette().unwrap();
        assert_eq!(palette.colors(), &[[0, 0, 0, 255], [255, 255, 255, 255]]);

        let random = StereogramRenderer::new(Cli::parse_from(["program", "-o", "a.png", "-c", "4"]));
        assert_eq!(random.palette().unwrap().len(), 4);
        assert_eq!(random.palette().unwrap(), random.palette().unwrap());

        let empty = StereogramRenderer::new(Cli::parse_from(["program", "-o", "a.png", "-c", "0"]));
        assert!(empty.palette().is_err());
    }

    // Tests template files are read and missing ones are reported
    // Verified by ignoring the template file argument
    #[test]
    fn test_depth_source_from_template_file() {
        let temp_dir = TempDir::new().unwrap();
        let template_path = temp_dir.path().join("shape.txt");
        fs::write(&template_path, "01\n10\n").unwrap();

        let renderer = StereogramRenderer::new(Cli::parse_from([
            "program".into(),
            "-o".into(),
            "a.png".into(),
            "-f".into(),
            template_path.into_os_string(),
        ]));
        let depth = renderer.depth_source().unwrap().produce(2, 2).unwrap();
        assert_eq!(depth.row(0), Some(&[0.0, 1.0][..]));
        assert_eq!(depth.row(1), Some(&[1.0, 0.0][..]));

        let missing = StereogramRenderer::new(Cli::parse_from([
            "program",
            "-o",
            "a.png",
            "-f",
            "no/such/template.txt",
        ]));
        assert!(missing.depth_source().is_err());
    }

    // Tests a newline at the end of a template file adds no flat row
    // Verified by reading the file contents untrimmed
    #[test]
    fn test_template_file_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let template_path = temp_dir.path().join("bar.txt");
        fs::write(&template_path, "1\n1\n").unwrap();

        let renderer = StereogramRenderer::new(Cli::parse_from([
            "program".into(),
            "-o".into(),
            "a.png".into(),
            "-f".into(),
            template_path.into_os_string(),
        ]));
        let depth = renderer.depth_source().unwrap().produce(1, 3).unwrap();

        assert!(depth.rows().flatten().all(|&z| z == 1.0));
    }

    // Tests a full run writes an image of the requested size
    // Verified by disabling the export step
    #[test]
    fn test_process_writes_output() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("nested").join("out.png");

        let renderer = StereogramRenderer::new(Cli::parse_from([
            "program".into(),
            "-o".into(),
            output.clone().into_os_string(),
            "-t".into(),
            "000\n010\n000".into(),
            "-W".into(),
            "120".into(),
            "-H".into(),
            "16".into(),
            "--quiet".into(),
        ]));
        renderer.process().unwrap();

        let written = image::open(&output).unwrap();
        assert_eq!((written.width(), written.height()), (120, 16));
    }

    // Tests an existing output is replaced by a render with a new seed
    // Verified by returning early when the output exists
    #[test]
    fn test_process_overwrites_existing_output() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.png");
        fs::write(&output, b"not an image").unwrap();

        let cli_with_seed = |seed: &str| {
            Cli::parse_from([
                "program".into(),
                "-o".into(),
                output.clone().into_os_string(),
                "-t".into(),
                "010".into(),
                "-W".into(),
                "40".into(),
                "-H".into(),
                "4".into(),
                "-s".into(),
                seed.into(),
                "-q".into(),
            ])
        };

        StereogramRenderer::new(cli_with_seed("1")).process().unwrap();
        let first = image::open(&output).unwrap().to_rgba8();

        StereogramRenderer::new(cli_with_seed("2")).process().unwrap();
        let second = image::open(&output).unwrap().to_rgba8();

        assert_ne!(first, second);
    }
}
