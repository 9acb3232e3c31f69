use crate::error::{Attribute, Result, StoreError};
use crate::{GbrColor, Point};

/// Positions plus optional per-point colors and reflectances.
///
/// Every attribute that is present holds exactly [`len`](Self::len)
/// entries. Presence is store-wide: enabling colors gives every point a
/// color, and disabling them drops all color data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloudStore {
    positions: Vec<[f64; 3]>,
    colors: Option<Vec<GbrColor>>,
    reflectances: Option<Vec<u16>>,
}

impl PointCloudStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: Vec<[f64; 3]>) -> Self {
        Self {
            positions,
            colors: None,
            reflectances: None,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    pub fn has_reflectances(&self) -> bool {
        self.reflectances.is_some()
    }

    /// Sets the point count to `count`.
    ///
    /// Existing entries up to `min(old, count)` are kept; new slots are
    /// zeroed. Present attributes are resized alongside the positions.
    pub fn resize(&mut self, count: usize) {
        self.positions.resize(count, [0.0; 3]);
        if let Some(colors) = self.colors.as_mut() {
            colors.resize(count, GbrColor::default());
        }
        if let Some(reflectances) = self.reflectances.as_mut() {
            reflectances.resize(count, 0);
        }
    }

    /// Enables colors. A no-op when colors are already present.
    pub fn add_colors(&mut self) {
        if self.colors.is_none() {
            self.colors = Some(vec![GbrColor::default(); self.len()]);
        }
    }

    /// Enables reflectances. A no-op when they are already present.
    pub fn add_reflectances(&mut self) {
        if self.reflectances.is_none() {
            self.reflectances = Some(vec![0; self.len()]);
        }
    }

    pub fn remove_colors(&mut self) {
        self.colors = None;
    }

    pub fn remove_reflectances(&mut self) {
        self.reflectances = None;
    }

    /// Drops every point and attribute.
    pub fn clear(&mut self) {
        self.positions = Vec::new();
        self.colors = None;
        self.reflectances = None;
    }

    pub fn position(&self, i: usize) -> Result<[f64; 3]> {
        self.check_index(i)?;
        Ok(self.positions[i])
    }

    pub fn set_position(&mut self, i: usize, position: [f64; 3]) -> Result<()> {
        self.check_index(i)?;
        self.positions[i] = position;
        Ok(())
    }

    /// Color of point `i` in (R, G, B) order.
    pub fn color(&self, i: usize) -> Result<[u8; 3]> {
        self.check_index(i)?;
        Ok(self.color_slice()?[i].to_rgb())
    }

    pub fn set_color(&mut self, i: usize, rgb: [u8; 3]) -> Result<()> {
        self.check_index(i)?;
        let colors = self.colors.as_mut().ok_or(StoreError::AttributeNotPresent {
            attribute: Attribute::Colors,
        })?;
        colors[i] = GbrColor::from_rgb(rgb);
        Ok(())
    }

    pub fn reflectance(&self, i: usize) -> Result<u16> {
        self.check_index(i)?;
        Ok(self.reflectance_slice()?[i])
    }

    pub fn set_reflectance(&mut self, i: usize, reflectance: u16) -> Result<()> {
        self.check_index(i)?;
        let reflectances = self
            .reflectances
            .as_mut()
            .ok_or(StoreError::AttributeNotPresent {
                attribute: Attribute::Reflectances,
            })?;
        reflectances[i] = reflectance;
        Ok(())
    }

    pub fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }

    /// Colors in storage order.
    pub fn color_slice(&self) -> Result<&[GbrColor]> {
        self.colors
            .as_deref()
            .ok_or(StoreError::AttributeNotPresent {
                attribute: Attribute::Colors,
            })
    }

    pub fn reflectance_slice(&self) -> Result<&[u16]> {
        self.reflectances
            .as_deref()
            .ok_or(StoreError::AttributeNotPresent {
                attribute: Attribute::Reflectances,
            })
    }

    pub fn point(&self, i: usize) -> Result<Point> {
        self.check_index(i)?;
        Ok(self.point_unchecked(i))
    }

    pub fn iter_points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.len()).map(move |i| self.point_unchecked(i))
    }

    /// Flat `[x0, y0, z0, x1, ...]` copy of every position.
    pub fn positions_to_array(&self) -> Vec<f64> {
        self.positions.iter().flatten().copied().collect()
    }

    /// Flat `[r0, g0, b0, r1, ...]` copy of every color.
    pub fn colors_to_array(&self) -> Result<Vec<u8>> {
        Ok(self
            .color_slice()?
            .iter()
            .flat_map(|c| c.to_rgb())
            .collect())
    }

    pub fn reflectances_to_array(&self) -> Result<Vec<u16>> {
        Ok(self.reflectance_slice()?.to_vec())
    }

    /// Replaces every position from a flat xyz array and resizes the
    /// store to `data.len() / 3` points.
    pub fn set_positions(&mut self, data: &[f64]) -> Result<()> {
        if data.len() % 3 != 0 {
            return Err(StoreError::LengthMismatch {
                what: "positions",
                expected: data.len() / 3 * 3,
                found: data.len(),
            });
        }
        self.resize(data.len() / 3);
        for (dst, chunk) in self.positions.iter_mut().zip(data.chunks_exact(3)) {
            *dst = [chunk[0], chunk[1], chunk[2]];
        }
        Ok(())
    }

    /// Enables colors and fills them from a flat rgb array holding one
    /// triple per point.
    pub fn set_colors(&mut self, rgb: &[u8]) -> Result<()> {
        let expected = self.len() * 3;
        if rgb.len() != expected {
            return Err(StoreError::LengthMismatch {
                what: "colors",
                expected,
                found: rgb.len(),
            });
        }
        self.colors = Some(
            rgb.chunks_exact(3)
                .map(|c| GbrColor::from_rgb([c[0], c[1], c[2]]))
                .collect(),
        );
        Ok(())
    }

    /// Enables reflectances and fills them with one value per point.
    pub fn set_reflectances(&mut self, values: &[u16]) -> Result<()> {
        if values.len() != self.len() {
            return Err(StoreError::LengthMismatch {
                what: "reflectances",
                expected: self.len(),
                found: values.len(),
            });
        }
        self.reflectances = Some(values.to_vec());
        Ok(())
    }

    fn check_index(&self, i: usize) -> Result<()> {
        if i < self.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfBounds {
                index: i,
                len: self.len(),
            })
        }
    }

    fn point_unchecked(&self, i: usize) -> Point {
        Point {
            position: self.positions[i],
            color: self.colors.as_ref().map(|c| c[i].to_rgb()),
            reflectance: self.reflectances.as_ref().map(|r| r[i]),
        }
    }
}
