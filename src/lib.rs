//! Single-image random-dot stereogram (SIRDS) synthesis
//!
//! A depth map is turned into one flat image whose horizontally repeating
//! dot patterns fuse into a 3-D surface when viewed with parallel eyes.
//! Each row is solved independently: stereo constraints link pairs of
//! columns that must share a color, hidden-surface removal drops links a
//! nearer surface would block, and the remaining free columns get random
//! palette colors from a seeded generator.

#![forbid(unsafe_code)]

/// Row constraint solving, color assignment and render orchestration
pub mod algorithm;
/// Palettes for the random dot fill
pub mod color;
/// Depth maps, templates and depth sources
pub mod depth;
/// Input/output operations, configuration and error handling
pub mod io;
/// Stereo geometry and rounding helpers
pub mod math;

pub use algorithm::engine::{PixelBuffer, RenderConfig, RenderOutput, StereogramEngine};
pub use color::Palette;
pub use depth::{DepthMap, DepthSource, DepthTemplate};
pub use io::error::{Result, StereogramError};
