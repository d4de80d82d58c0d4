use crate::{
    algorithm::coloring::{ColorAssigner, RowStats},
    algorithm::constraints::ConstraintSolver,
    color::{Palette, Rgba},
    depth::{DepthMap, DepthSource, Polarity},
    io::configuration::{DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH, MAX_IMAGE_DIMENSION},
    io::error::{Result, check_dimensions, invalid_parameter},
    math::StereoGeometry,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// Parameters of a single render
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: usize,
    /// Output height in pixels
    pub height: usize,
    /// Viewing geometry used for every row
    pub geometry: StereoGeometry,
    /// Seed for the random dot fill
    pub seed: u64,
    /// Which end of the source's depth range is nearest
    pub polarity: Polarity,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            geometry: StereoGeometry::default(),
            seed: DEFAULT_SEED,
            polarity: Polarity::default(),
        }
    }
}

/// Rendered stereogram as palette indices in row-major order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    indices: Vec<usize>,
}

impl PixelBuffer {
    /// Output width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Output height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// All palette indices, row-major
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Palette index at column `x` of row `y`, if in bounds
    pub fn get(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width {
            return None;
        }
        self.indices.get(y * self.width + x).copied()
    }

    /// Palette indices of row `y`, if in bounds
    pub fn row(&self, y: usize) -> Option<&[usize]> {
        self.rows().nth(y)
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> std::slice::ChunksExact<'_, usize> {
        self.indices.chunks_exact(self.width)
    }

    /// Resolve every pixel to its palette color
    ///
    /// Indices outside the palette resolve to transparent black.
    pub fn to_colors(&self, palette: &Palette) -> Vec<Rgba> {
        self.indices
            .iter()
            .map(|&index| palette.get(index).unwrap_or([0, 0, 0, 0]))
            .collect()
    }

    /// Resolve every pixel to `width * height * 4` RGBA bytes
    pub fn to_rgba_bytes(&self, palette: &Palette) -> Vec<u8> {
        self.to_colors(palette).into_iter().flatten().collect()
    }
}

/// Pixels of a render together with its fill statistics
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOutput {
    /// Rendered palette indices
    pub pixels: PixelBuffer,
    /// Totals over every row
    pub stats: RowStats,
}

/// Turns depth sources into random dot stereograms
///
/// A render is a linear pipeline: produce the depth map, then for every row
/// solve the column constraints and assign colors. Rows share nothing but
/// read-only inputs. Each row draws from its own generator, seeded from a
/// sequence derived from the render seed, so the output for a given seed
/// does not depend on how rows are scheduled.
#[derive(Clone, Debug)]
pub struct StereogramEngine {
    config: RenderConfig,
    solver: ConstraintSolver,
}

impl StereogramEngine {
    /// Create an engine for the given render parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the width or height is zero or larger than
    /// `MAX_IMAGE_DIMENSION`
    pub fn new(config: RenderConfig) -> Result<Self> {
        check_dimensions(config.width, config.height)?;
        for (parameter, value) in [("width", config.width), ("height", config.height)] {
            if value > MAX_IMAGE_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_IMAGE_DIMENSION}"),
                ));
            }
        }

        Ok(Self {
            config,
            solver: ConstraintSolver::new(config.geometry),
        })
    }

    /// Render parameters in use
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Produce the depth map from `source` and render it
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to produce a depth map
    pub fn render(&self, source: &dyn DepthSource, palette: &Palette) -> Result<PixelBuffer> {
        Ok(self.render_with_progress(source, palette, |_| {})?.pixels)
    }

    /// Like [`Self::render`], calling `on_row` with each finished row index
    ///
    /// Rows may finish out of order when rendered in parallel.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to produce a depth map
    pub fn render_with_progress<F>(
        &self,
        source: &dyn DepthSource,
        palette: &Palette,
        on_row: F,
    ) -> Result<RenderOutput>
    where
        F: Fn(usize) + Sync,
    {
        let depth = self.depth_map(source)?;
        Ok(self.render_rows(&depth, palette, on_row))
    }

    /// Render a depth map that already uses the engine's polarity
    ///
    /// A map whose size differs from the configured output is rendered at
    /// its own size.
    pub fn render_depth_map(&self, depth: &DepthMap, palette: &Palette) -> PixelBuffer {
        self.render_rows(depth, palette, |_| {}).pixels
    }

    /// Produce the depth map for this engine's size and polarity
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to produce a depth map
    pub fn depth_map(&self, source: &dyn DepthSource) -> Result<DepthMap> {
        let RenderConfig { width, height, .. } = self.config;
        let mut depth = source.produce(width, height)?;
        if depth.width() != width || depth.height() != height {
            depth = depth.produce(width, height)?;
        }
        Ok(depth.with_polarity(self.config.polarity))
    }

    fn render_rows<F>(&self, depth: &DepthMap, palette: &Palette, on_row: F) -> RenderOutput
    where
        F: Fn(usize) + Sync,
    {
        let (width, height) = (depth.width(), depth.height());
        let assigner = ColorAssigner::new(palette.len());
        let row_seeds = self.row_seeds(height);
        let mut indices = vec![0; width * height];

        let render_row = |(y, out): (usize, &mut [usize])| {
            let stats = self.render_row(depth, y, row_seeds.get(y).copied(), &assigner, out);
            on_row(y);
            stats
        };

        #[cfg(feature = "threads")]
        let stats = indices
            .par_chunks_mut(width)
            .enumerate()
            .map(render_row)
            .reduce(RowStats::default, RowStats::merge);

        #[cfg(not(feature = "threads"))]
        let stats = indices
            .chunks_mut(width)
            .enumerate()
            .map(render_row)
            .fold(RowStats::default(), RowStats::merge);

        RenderOutput {
            pixels: PixelBuffer {
                width,
                height,
                indices,
            },
            stats,
        }
    }

    fn render_row(
        &self,
        depth: &DepthMap,
        y: usize,
        seed: Option<u64>,
        assigner: &ColorAssigner,
        out: &mut [usize],
    ) -> RowStats {
        let (Some(samples), Some(seed)) = (depth.row(y), seed) else {
            return RowStats::default();
        };

        let same = self.solver.solve_row(samples, y);
        let mut rng = StdRng::seed_from_u64(seed);
        assigner.assign_row(&same, &mut rng, out)
    }

    // One seed per row drawn in row order, independent of scheduling
    fn row_seeds(&self, height: usize) -> Vec<u64> {
        let mut master = StdRng::seed_from_u64(self.config.seed);
        (0..height).map(|_| master.random()).collect()
    }
}
