/// Palette index assignment from row constraints
pub mod coloring;
/// Per-row stereo constraints and hidden-surface removal
pub mod constraints;
/// Render orchestration and the output pixel buffer
pub mod engine;
