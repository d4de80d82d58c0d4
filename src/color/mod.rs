//! Colors used to fill the stereogram

/// Palette storage, generation and parsing
pub mod palette;

pub use palette::{Palette, Rgba};
