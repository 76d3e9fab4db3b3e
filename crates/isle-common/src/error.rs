//! Error types for Project Isle.

use thiserror::Error;

/// Top-level error type for Isle operations.
#[derive(Debug, Error)]
pub enum IsleError {
    /// World construction or generation errors
    #[error("World error: {0}")]
    World(#[from] WorldError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// World construction and generation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// Width or height is zero or negative
    #[error("Invalid world dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: i32,
        /// Requested height
        height: i32,
    },

    /// Generation parameters failed validation
    #[error("Invalid generation config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// `generate` was called on a world that is already populated
    #[error("World has already been generated")]
    AlreadyGenerated,

    /// A cell operation targeted a position outside the grid
    #[error("Position ({x}, {y}) is outside the world")]
    OutOfBounds {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
    },
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Tile width or height is zero
    #[error("Invalid tile size {width}x{height}")]
    InvalidTileSize {
        /// Tile width
        width: u32,
        /// Tile height
        height: u32,
    },

    /// A tuning value lies outside its valid range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Result type alias for Isle operations.
pub type IsleResult<T> = Result<T, IsleError>;
