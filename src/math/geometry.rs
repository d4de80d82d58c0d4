//! Stereo separation geometry for a viewer looking through the image plane
//!
//! Distances are expressed in output pixels. The eye separation is derived
//! from the assumed print resolution, and the depth of field `mu` is the
//! fraction of the viewing distance that the depth range spans.

use crate::io::configuration::{DEPTH_OF_FIELD, DPI, EYE_SEPARATION_INCHES};
use crate::io::error::{Result, invalid_parameter};
use crate::math::round_half_up;

/// Viewing parameters shared by every row of a render
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StereoGeometry {
    dpi: u32,
    eye_separation: f64,
    depth_of_field: f64,
}

impl Default for StereoGeometry {
    fn default() -> Self {
        Self {
            dpi: DPI,
            eye_separation: round_half_up(EYE_SEPARATION_INCHES * f64::from(DPI)),
            depth_of_field: DEPTH_OF_FIELD,
        }
    }
}

impl StereoGeometry {
    /// Create a geometry for the given resolution and depth of field
    ///
    /// # Errors
    ///
    /// Returns an error if `dpi` is zero or `depth_of_field` is not in `(0, 1]`
    pub fn new(dpi: u32, depth_of_field: f64) -> Result<Self> {
        if dpi == 0 {
            return Err(invalid_parameter("dpi", &dpi, &"must be positive"));
        }
        if !(depth_of_field > 0.0 && depth_of_field <= 1.0) {
            return Err(invalid_parameter(
                "depth_of_field",
                &depth_of_field,
                &"must be in the range (0, 1]",
            ));
        }

        Ok(Self {
            dpi,
            eye_separation: round_half_up(EYE_SEPARATION_INCHES * f64::from(dpi)),
            depth_of_field,
        })
    }

    /// Assumed output resolution
    pub const fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Eye separation in pixels
    pub const fn eye_separation(&self) -> f64 {
        self.eye_separation
    }

    /// Depth of field fraction `mu`
    pub const fn depth_of_field(&self) -> f64 {
        self.depth_of_field
    }

    /// Horizontal separation in pixels of the two image points of depth `z`
    pub fn separation(&self, z: f64) -> i64 {
        let mu_z = self.depth_of_field * z;
        round_half_up((1.0 - mu_z) * self.eye_separation / (2.0 - mu_z)) as i64
    }

    /// Left image column for the point seen at column `x` of row `y`
    ///
    /// Odd separations alternate their half pixel between even and odd rows.
    pub fn left_column(x: usize, y: usize, separation: i64) -> i64 {
        let stagger = separation & (y as i64) & 1;
        round_half_up(x as f64 - (separation + stagger) as f64 / 2.0) as i64
    }

    /// Depth a neighbor `t` pixels away must reach to hide a point of depth `z`
    // Kept unfused and in this operation order
    #[allow(clippy::suboptimal_flops)]
    pub fn occlusion_threshold(&self, z: f64, t: usize) -> f64 {
        let mu = self.depth_of_field;
        z + 2.0 * (2.0 - mu * z) * t as f64 / (mu * self.eye_separation)
    }
}
