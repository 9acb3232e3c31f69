//! One-call helpers over flat arrays, for callers that never touch a
//! [`PointCloudStore`] directly.

use crate::error::Result;
use crate::ply::{self, PlyFormat, ReadOptions, WriteOptions};
use ptio_core::PointCloudStore;
use std::fs;
use std::path::Path;

/// Flat per-point arrays read back from a file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointData {
    /// `[x0, y0, z0, x1, ...]`
    pub points: Vec<f64>,
    /// `[r0, g0, b0, r1, ...]`
    pub colors: Option<Vec<u8>>,
    pub reflectance: Option<Vec<u16>>,
}

impl PointData {
    pub fn len(&self) -> usize {
        self.points.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copies positions, and present attributes when `with_attributes`
    /// is set, out of a store.
    pub fn from_store(store: &PointCloudStore, with_attributes: bool) -> Self {
        let attrs = with_attributes.then_some(store);
        Self {
            points: store.positions_to_array(),
            colors: attrs.and_then(|s| s.colors_to_array().ok()),
            reflectance: attrs.and_then(|s| s.reflectances_to_array().ok()),
        }
    }
}

/// Builds a store from flat arrays and writes it with unit scale.
///
/// `points` holds `3N` values, `colors` (if any) `3N` RGB bytes and
/// `reflectance` (if any) `N` values. The parent directory is created
/// when missing. Returns the store that was written.
pub fn pcwrite(
    path: impl AsRef<Path>,
    points: &[f64],
    colors: Option<&[u8]>,
    reflectance: Option<&[u16]>,
    format: PlyFormat,
) -> Result<PointCloudStore> {
    let path = path.as_ref();

    let mut store = PointCloudStore::new();
    store.set_positions(points)?;
    if let Some(colors) = colors {
        store.set_colors(colors)?;
    }
    if let Some(reflectance) = reflectance {
        store.set_reflectances(reflectance)?;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    ply::write_with(&store, path, &WriteOptions::default().with_format(format))?;
    Ok(store)
}

/// Reads a file with unit scale into flat arrays. Attributes are `None`
/// when not requested or not present in the file.
pub fn pcread(path: impl AsRef<Path>, with_attributes: bool) -> Result<PointData> {
    let store = ply::read_with(path, &ReadOptions::default())?;
    Ok(PointData::from_store(&store, with_attributes))
}
