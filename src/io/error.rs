//! Error types for maze loading, solving and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all navigation operations
#[derive(Debug)]
pub enum MazeError {
    /// Failed to load maze image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
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

    /// The maze border does not provide both an entrance and an exit
    ///
    /// Fatal to initialization: no degenerate defaults are picked.
    MazeTopology {
        /// Number of qualifying openings found across all four borders
        openings_found: usize,
        /// Number of openings needed to resolve entrance and exit
        required: usize,
    },

    /// The agent cannot be placed at the requested start position
    InvalidStart {
        /// Requested start position as `[x, y]`
        position: [i32; 2],
        /// Description of why the position is rejected
        reason: String,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Recorded path could not be encoded or decoded
    Serialization {
        /// Path of the recording file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Nothing was captured that could be rendered
    EmptyCapture {
        /// What was expected to be captured
        what: &'static str,
    },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load maze '{}': {source}", path.display())
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
            Self::MazeTopology {
                openings_found,
                required,
            } => {
                write!(
                    f,
                    "Maze topology error: found {openings_found} border opening(s), need at least {required}"
                )
            }
            Self::InvalidStart { position, reason } => {
                write!(
                    f,
                    "Invalid start position ({}, {}): {reason}",
                    position[0], position[1]
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Serialization { path, source } => {
                write!(
                    f,
                    "Failed to (de)serialize recording '{}': {source}",
                    path.display()
                )
            }
            Self::EmptyCapture { what } => {
                write!(f, "Nothing to render: no {what} captured")
            }
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for navigation results
pub type Result<T> = std::result::Result<T, MazeError>;

impl From<image::ImageError> for MazeError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MazeError {
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
) -> MazeError {
    MazeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an error for a target path that cannot be processed
pub fn invalid_target(path: &std::path::Path, reason: &str) -> MazeError {
    MazeError::InvalidParameter {
        parameter: "target",
        value: path.display().to_string(),
        reason: reason.to_string(),
    }
}
