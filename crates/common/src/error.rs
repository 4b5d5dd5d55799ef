//! Error types shared across skinpack crates.
//!
//! Every variant renders as a single sentence that can be shown to the user
//! as-is. Expected malformed input (bad dimensions, bad geometry) is reported
//! through these values; nothing in the pipeline panics on user data.

/// Top-level error type for skin pack operations.
#[derive(Debug, thiserror::Error)]
pub enum SkinpackError {
    #[error(
        "Unsupported skin dimensions {width}x{height}. Use a 64x32, 64x64, or 128x128 skin."
    )]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Failed to decode image: {message}")]
    ImageDecode { message: String },

    #[error("No pixel surface available: {message}")]
    CanvasUnavailable { message: String },

    #[error("Invalid geometry file: {reason}")]
    InvalidGeometryFormat { reason: String },

    #[error("Geometry file is not valid JSON: {0}")]
    JsonParse(#[source] serde_json::Error),

    #[error("Add at least one skin to the pack before exporting")]
    EmptyPack,

    #[error("This pack type requires a custom geometry file")]
    MissingGeometry,

    #[error("Pack name must not be blank")]
    BlankPackName,

    #[error("Failed to write pack archive: {message}")]
    ArchiveWrite { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SkinpackError.
pub type SkinpackResult<T> = Result<T, SkinpackError>;

impl SkinpackError {
    pub fn unsupported_dimensions(width: u32, height: u32) -> Self {
        Self::UnsupportedDimensions { width, height }
    }

    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode {
            message: msg.into(),
        }
    }

    pub fn canvas_unavailable(msg: impl Into<String>) -> Self {
        Self::CanvasUnavailable {
            message: msg.into(),
        }
    }

    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometryFormat {
            reason: reason.into(),
        }
    }

    pub fn archive_write(msg: impl Into<String>) -> Self {
        Self::ArchiveWrite {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Environment failures are the only hard failures; everything else is
    /// a rejection of user input that can be corrected and retried.
    pub fn is_environment_failure(&self) -> bool {
        matches!(
            self,
            Self::CanvasUnavailable { .. } | Self::ArchiveWrite { .. } | Self::Io(_)
        )
    }
}
