use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrailheadError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    // World-related errors
    #[error("Invalid world data: {reason}")]
    InvalidWorldData { reason: String },

    #[error("World file not found at path: {path}")]
    WorldFileNotFound { path: PathBuf },

    #[error("Corrupted world file: {reason}")]
    CorruptedWorldFile { reason: String },

    #[error("World validation failed: {reason}")]
    WorldValidationFailed { reason: String },

    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    CellOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

/// Result type alias for all operations
pub type TrailheadResult<T> = Result<T, TrailheadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailhead_error_display() {
        let err = TrailheadError::CellOutOfBounds {
            x: 250,
            y: 3,
            width: 200,
            height: 200,
        };
        assert_eq!(err.to_string(), "Cell (250, 3) is outside the 200x200 grid");

        let err = TrailheadError::ConfigDirNotFound;
        assert_eq!(err.to_string(), "Failed to get config directory");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TrailheadError = io.into();
        assert!(err.to_string().contains("gone"));
    }
}
