//! Stereogram geometry constants and runtime configuration defaults

// Viewing geometry from the Thimbleby, Inglis and Witten SIRDS model
/// Assumed output resolution in dots per inch
pub const DPI: u32 = 72;

/// Modeled eye separation in inches
pub const EYE_SEPARATION_INCHES: f64 = 2.5;

/// Depth of field as a fraction of the viewing distance
pub const DEPTH_OF_FIELD: f64 = 1.0 / 3.0;

// Default values for configurable parameters
/// Default output width in pixels
pub const DEFAULT_WIDTH: usize = 400;

/// Default output height in pixels
pub const DEFAULT_HEIGHT: usize = 300;

/// Default number of randomly generated palette colors
pub const DEFAULT_NUM_COLORS: usize = 10;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Mixed into the seed for palette generation so palette colors and row
/// seeds come from different streams
pub const PALETTE_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Template used when no depth source is given (a flat plane)
pub const DEFAULT_TEMPLATE: &str = "0";

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_IMAGE_DIMENSION: usize = 10_000;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Number of rows between progress bar refreshes
pub const PROGRESS_ROW_STRIDE: usize = 16;
