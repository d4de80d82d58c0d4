/// Command-line interface
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// Depth image loading and stereogram export
pub mod image;
/// Row progress display
pub mod progress;
