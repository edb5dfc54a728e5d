use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning the raster into a stored image
#[derive(Debug, Error)]
pub enum ExportError {
    /// The surface has not been sized yet, so there is nothing to export
    #[error("Cannot export a {width}x{height} raster")]
    InvalidState { width: u32, height: u32 },

    #[error("Failed to encode raster as PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export worker went away before reporting a result
    #[error("Export was cancelled before it completed")]
    Cancelled,
}

impl ExportError {
    /// True for the encode/write failures, as opposed to being called too early
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Self::Encode(_) | Self::Io { .. })
    }
}

/// Errors from loading a [`crate::SurfaceConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid color in config field `{field}`: {source}")]
    InvalidColor {
        field: &'static str,
        #[source]
        source: ColorParseError,
    },

    #[error("Invalid value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: f32 },
}

/// A color token that could not be resolved to a packed color
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color token")]
    Empty,

    #[error("unknown color name `{0}`")]
    UnknownName(String),

    #[error("malformed hex color `{0}`, expected #RRGGBB or #AARRGGBB")]
    MalformedHex(String),
}
