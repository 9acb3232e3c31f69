#![forbid(unsafe_code)]

pub mod convenience;
pub mod error;
pub mod ply;

pub use convenience::{pcread, pcwrite, PointData};
pub use error::{PlyError, Result};
pub use ply::{
    read, read_bytes, read_with, write, write_to, write_with, PlyFormat, PropertyNameMap,
    ReadOptions, WriteOptions,
};
