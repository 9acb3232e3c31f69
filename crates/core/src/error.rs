use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Optional per-point attribute a store may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Colors,
    Reflectances,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attribute::Colors => f.write_str("colors"),
            Attribute::Reflectances => f.write_str("reflectances"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store has no {attribute}")]
    AttributeNotPresent { attribute: Attribute },

    #[error("point index {index} out of bounds for store of {len} points")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("{what}: expected {expected} values, got {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}
