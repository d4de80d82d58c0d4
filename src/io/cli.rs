//! Command-line interface for rendering a stereogram to an image file

use crate::algorithm::engine::{RenderConfig, StereogramEngine};
use crate::color::Palette;
use crate::depth::{DepthSource, DepthTemplate, ImageSource, Polarity, TemplateSource};
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_NUM_COLORS, DEFAULT_SEED, DEFAULT_TEMPLATE, DEFAULT_WIDTH,
    DEPTH_OF_FIELD, DPI, PALETTE_SEED_SALT,
};
use crate::io::error::{Result, StereogramError};
use crate::io::image::export_stereogram;
use crate::io::progress::ProgressManager;
use crate::math::StereoGeometry;
use clap::{ArgGroup, Parser};
use rand::{SeedableRng, rngs::StdRng};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "sirds")]
#[command(
    author,
    version,
    about = "Render single-image random-dot stereograms from depth maps"
)]
#[command(group(ArgGroup::new("depth").multiple(false)))]
/// Command-line arguments for the stereogram renderer
pub struct Cli {
    /// Output image (.png or .bmp)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Depth template text, rows separated by newlines ('#' raised, digits for levels)
    #[arg(short, long, group = "depth")]
    pub template: Option<String>,

    /// File containing a depth template
    #[arg(short = 'f', long, group = "depth")]
    pub template_file: Option<PathBuf>,

    /// Grayscale depth image, brighter is nearer
    #[arg(short, long, group = "depth")]
    pub depth_image: Option<PathBuf>,

    /// Output width in pixels
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Output height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Number of random palette colors
    #[arg(short, long, default_value_t = DEFAULT_NUM_COLORS)]
    pub colors: usize,

    /// Explicit palette as comma separated hex colors (overrides --colors)
    #[arg(short, long)]
    pub palette: Option<String>,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Assumed output resolution in dots per inch
    #[arg(long, default_value_t = DPI)]
    pub dpi: u32,

    /// Depth of field as a fraction of the viewing distance
    #[arg(long, default_value_t = DEPTH_OF_FIELD)]
    pub depth_of_field: f64,

    /// Treat low depth values as nearest instead of high ones
    #[arg(short, long)]
    pub invert: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Depth polarity selected by `--invert`
    pub const fn polarity(&self) -> Polarity {
        if self.invert {
            Polarity::NearIsLow
        } else {
            Polarity::NearIsHigh
        }
    }
}

/// Builds the depth source, palette and engine from CLI arguments and renders
pub struct StereogramRenderer {
    cli: Cli,
}

impl StereogramRenderer {
    /// Create a renderer for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Render the stereogram and write it to the output path
    ///
    /// # Errors
    ///
    /// Returns an error if the depth source, palette or render parameters
    /// are invalid, or the output cannot be written
    // Allow print for link diagnostics
    #[allow(clippy::print_stderr)]
    pub fn process(&self) -> Result<()> {
        let start_time = Instant::now();
        let engine = StereogramEngine::new(self.render_config()?)?;
        let source = self.depth_source()?;
        let palette = self.palette()?;

        let progress = if self.cli.should_show_progress() {
            let name = self
                .cli
                .output
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            ProgressManager::new(self.cli.height, &name)
        } else {
            ProgressManager::hidden(self.cli.height)
        };

        let output =
            engine.render_with_progress(source.as_ref(), &palette, |y| progress.row_finished(y))?;

        if output.stats.unresolved_links > 0 && !self.cli.quiet {
            eprintln!(
                "Warning: {} pixels had an uncolored representative and were redrawn",
                output.stats.unresolved_links
            );
        }

        export_stereogram(&output.pixels, &palette, &self.cli.output)?;

        if self.cli.should_show_progress() {
            progress.finish("Rendered", start_time.elapsed());
        }

        Ok(())
    }

    /// Render parameters from the CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the DPI or depth of field is out of range
    pub fn render_config(&self) -> Result<RenderConfig> {
        Ok(RenderConfig {
            width: self.cli.width,
            height: self.cli.height,
            geometry: StereoGeometry::new(self.cli.dpi, self.cli.depth_of_field)?,
            seed: self.cli.seed,
            polarity: self.cli.polarity(),
        })
    }

    /// Depth source selected by the CLI arguments, a flat plane by default
    ///
    /// # Errors
    ///
    /// Returns an error if a template file or depth image cannot be read
    pub fn depth_source(&self) -> Result<Box<dyn DepthSource>> {
        if let Some(path) = &self.cli.depth_image {
            return Ok(Box::new(ImageSource::open(path)?));
        }

        let template = if let Some(path) = &self.cli.template_file {
            let text = std::fs::read_to_string(path).map_err(|e| StereogramError::FileSystem {
                path: path.clone(),
                operation: "read template",
                source: e,
            })?;
            // A trailing newline does not start another row
            text.trim_end_matches(['\r', '\n']).to_string()
        } else {
            self.cli
                .template
                .clone()
                .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string())
        };

        Ok(Box::new(TemplateSource::new(DepthTemplate::MultilineString(
            template,
        ))))
    }

    /// Explicit palette, or one generated from the seed
    ///
    /// # Errors
    ///
    /// Returns an error if the palette list is invalid or `--colors` is zero
    pub fn palette(&self) -> Result<Palette> {
        if let Some(list) = &self.cli.palette {
            return Palette::from_hex_list(list);
        }
        let mut rng = StdRng::seed_from_u64(self.cli.seed ^ PALETTE_SEED_SALT);
        Palette::generate(self.cli.colors, &mut rng)
    }
}
