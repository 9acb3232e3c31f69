//! PLY reading and writing for [`PointCloudStore`](ptio_core::PointCloudStore).
//!
//! Only the `vertex` element is loaded. Positions map through a
//! [`PropertyNameMap`]; colors always use `red`/`green`/`blue` and
//! reflectance uses one of [`REFLECTANCE_NAMES`].

mod header;
mod read;
mod scalar;
mod write;

pub use read::{read, read_bytes, read_with};
pub use scalar::ScalarType;
pub use write::{write, write_to, write_with};

/// Color property names in file order.
pub const COLOR_NAMES: [&str; 3] = ["red", "green", "blue"];

/// Reflectance property names accepted on read. The first one is used
/// on write.
pub const REFLECTANCE_NAMES: [&str; 3] = ["refc", "reflectance", "intensity"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlyFormat {
    Ascii,
    #[default]
    BinaryLittleEndian,
}

impl PlyFormat {
    pub fn from_ascii_flag(as_ascii: bool) -> Self {
        if as_ascii {
            PlyFormat::Ascii
        } else {
            PlyFormat::BinaryLittleEndian
        }
    }

    pub(crate) fn header_token(self) -> &'static str {
        match self {
            PlyFormat::Ascii => "ascii",
            PlyFormat::BinaryLittleEndian => "binary_little_endian",
        }
    }
}

/// Property names carrying the x, y and z position components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNameMap {
    pub position: [String; 3],
}

impl PropertyNameMap {
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self {
            position: [x.into(), y.into(), z.into()],
        }
    }
}

impl Default for PropertyNameMap {
    fn default() -> Self {
        Self::new("x", "y", "z")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadOptions {
    pub names: PropertyNameMap,
    /// Multiplier applied to every decoded position component.
    pub position_scale: f64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            names: PropertyNameMap::default(),
            position_scale: 1.0,
        }
    }
}

impl ReadOptions {
    pub fn with_names(mut self, names: PropertyNameMap) -> Self {
        self.names = names;
        self
    }

    pub fn with_position_scale(mut self, scale: f64) -> Self {
        self.position_scale = scale;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WriteOptions {
    pub names: PropertyNameMap,
    /// Stored positions are divided by this before `offset` is subtracted.
    pub position_scale: f64,
    pub offset: [f64; 3],
    pub format: PlyFormat,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            names: PropertyNameMap::default(),
            position_scale: 1.0,
            offset: [0.0; 3],
            format: PlyFormat::default(),
        }
    }
}

impl WriteOptions {
    pub fn with_names(mut self, names: PropertyNameMap) -> Self {
        self.names = names;
        self
    }

    pub fn with_position_scale(mut self, scale: f64) -> Self {
        self.position_scale = scale;
        self
    }

    pub fn with_offset(mut self, offset: [f64; 3]) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_format(mut self, format: PlyFormat) -> Self {
        self.format = format;
        self
    }
}
