#![forbid(unsafe_code)]

pub mod color;
pub mod error;
pub mod point;
pub mod store;

pub use color::GbrColor;
pub use error::{Attribute, Result, StoreError};
pub use point::Point;
pub use store::PointCloudStore;
