//! Mathematical utilities for the stereogram geometry

/// Viewing geometry and stereo separation calculations
pub mod geometry;

pub use geometry::StereoGeometry;

/// Round to the nearest integer, with halves rounded towards positive infinity
///
/// `f64::round` rounds halves away from zero, which would move `-0.5` to `-1`
/// and push a column that sits exactly on the left edge out of the image.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
