//! Error types for stereogram setup and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all stereogram operations
///
/// Every variant is raised during setup or export. Row computation itself
/// cannot fail once a valid depth map and palette exist.
#[derive(Debug)]
pub enum StereogramError {
    /// Depth template could not be interpreted
    TemplateFormat {
        /// Description of what's wrong with the template
        reason: String,
    },

    /// Output dimensions are zero or otherwise unusable
    Dimension {
        /// Requested width in pixels
        width: usize,
        /// Requested height in pixels
        height: usize,
    },

    /// Palette is empty or could not be parsed
    Palette {
        /// Description of the palette problem
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load a depth image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the rendered stereogram
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for StereogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateFormat { reason } => {
                write!(f, "Invalid depth map template format: {reason}")
            }
            Self::Dimension { width, height } => {
                write!(
                    f,
                    "Invalid output dimensions {width}x{height}: width and height must be positive"
                )
            }
            Self::Palette { reason } => {
                write!(f, "Invalid palette: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for StereogramError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for stereogram results
pub type Result<T> = std::result::Result<T, StereogramError>;

impl From<image::ImageError> for StereogramError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for StereogramError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> StereogramError {
    StereogramError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a template format error
pub fn template_format_error(reason: &impl ToString) -> StereogramError {
    StereogramError::TemplateFormat {
        reason: reason.to_string(),
    }
}

/// Create a palette error
pub fn palette_error(reason: &impl ToString) -> StereogramError {
    StereogramError::Palette {
        reason: reason.to_string(),
    }
}

/// Reject zero-sized output before any row is processed
///
/// # Errors
///
/// Returns [`StereogramError::Dimension`] if either dimension is zero
pub const fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(StereogramError::Dimension { width, height });
    }
    Ok(())
}
