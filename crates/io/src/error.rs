use ptio_core::StoreError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlyError>;

#[derive(Debug, Error)]
pub enum PlyError {
    #[error("PLY file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed PLY header: {0}")]
    MalformedHeader(String),

    #[error("unsupported PLY format: {0}")]
    UnsupportedFormat(String),

    #[error("missing required vertex property '{0}'")]
    MissingRequiredProperty(String),

    #[error("truncated PLY data: header declares {expected} vertices, found {found}")]
    TruncatedData { expected: usize, found: usize },

    #[error("invalid value for property '{property}' in record {record}: {message}")]
    InvalidValue {
        record: usize,
        property: String,
        message: String,
    },

    #[error("position scale must be finite and non-zero, got {0}")]
    InvalidScale(f64),

    #[error("invalid property name '{name}': {reason}")]
    InvalidPropertyName { name: String, reason: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub(crate) fn malformed(msg: impl Into<String>) -> PlyError {
    PlyError::MalformedHeader(msg.into())
}

pub(crate) fn check_scale(scale: f64) -> Result<()> {
    if scale.is_finite() && scale != 0.0 {
        Ok(())
    } else {
        Err(PlyError::InvalidScale(scale))
    }
}
