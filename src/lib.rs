//! Point-cloud storage with PLY read/write.
//!
//! [`PointCloudStore`] holds positions plus optional colors and
//! reflectances; the [`ply`] module moves stores to and from PLY files.

#![forbid(unsafe_code)]

pub use ptio_core::{Attribute, GbrColor, Point, PointCloudStore, StoreError};
pub use ptio_io::{
    pcread, pcwrite, ply, read, read_bytes, read_with, write, write_to, write_with, PlyError,
    PlyFormat, PointData, PropertyNameMap, ReadOptions, WriteOptions,
};
