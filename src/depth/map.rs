//! Normalized depth grid consumed by the stereogram engine

use ndarray::Array2;

use crate::io::error::{Result, check_dimensions, invalid_parameter};

/// Which end of the depth range is closest to the viewer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Polarity {
    /// 1 is nearest, 0 is the far plane
    #[default]
    NearIsHigh,
    /// 0 is nearest, 1 is the far plane
    NearIsLow,
}

/// Immutable `height x width` grid of depth samples in `[0, 1]`
///
/// Values outside the unit range are clamped on construction and NaN
/// becomes 0, so every row handed to the solver is well formed.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthMap {
    depth: Array2<f64>,
}

impl DepthMap {
    /// Wrap an existing `(height, width)` array
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn from_array(mut depth: Array2<f64>) -> Result<Self> {
        let (height, width) = depth.dim();
        check_dimensions(width, height)?;
        if !depth.is_standard_layout() {
            depth = depth.as_standard_layout().into_owned();
        }
        depth.mapv_inplace(clamp_depth);
        Ok(Self { depth })
    }

    /// Build from row-major samples
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the sample count
    /// does not equal `width * height`
    pub fn from_vec(width: usize, height: usize, samples: Vec<f64>) -> Result<Self> {
        check_dimensions(width, height)?;
        let count = samples.len();
        let depth = Array2::from_shape_vec((height, width), samples).map_err(|e| {
            invalid_parameter(
                "samples",
                &count,
                &format!("expected {} samples for {width}x{height}: {e}", width * height),
            )
        })?;
        Self::from_array(depth)
    }

    /// Constant depth everywhere
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn flat(width: usize, height: usize, depth: f64) -> Result<Self> {
        check_dimensions(width, height)?;
        Self::from_array(Array2::from_elem((height, width), depth))
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.depth.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.depth.nrows()
    }

    /// Depth at column `x` of row `y`, if in bounds
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.depth.get((y, x)).copied()
    }

    /// Samples of row `y`, if in bounds
    pub fn row(&self, y: usize) -> Option<&[f64]> {
        self.rows().nth(y)
    }

    /// Rows from top to bottom as contiguous slices
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        // Constructors keep the array in standard layout
        self.depth
            .as_slice()
            .unwrap_or_default()
            .chunks_exact(self.width())
    }

    /// Underlying `(height, width)` array
    pub const fn as_array(&self) -> &Array2<f64> {
        &self.depth
    }

    /// Reinterpret the samples for the given polarity
    ///
    /// The engine always treats 1 as nearest, so `NearIsLow` inverts values.
    #[must_use]
    pub fn with_polarity(self, polarity: Polarity) -> Self {
        match polarity {
            Polarity::NearIsHigh => self,
            Polarity::NearIsLow => Self {
                depth: self.depth.mapv(|z| 1.0 - z),
            },
        }
    }
}

fn clamp_depth(z: f64) -> f64 {
    if z.is_nan() { 0.0 } else { z.clamp(0.0, 1.0) }
}
