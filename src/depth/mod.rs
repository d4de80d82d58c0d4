//! Depth maps and the sources that produce them
//!
//! This module contains:
//! - The normalized depth grid read by the engine
//! - Template normalization and nearest-neighbor resampling
//! - The `DepthSource` capability and its concrete sources

/// Normalized depth grid
pub mod map;
/// Depth sources implementing `DepthSource`
pub mod source;
/// Template encodings, normalization and resampling
pub mod template;

pub use map::{DepthMap, Polarity};
pub use source::{DepthSource, FlatSource, ImageSource, TemplateSource};
pub use template::DepthTemplate;
