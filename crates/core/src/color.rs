//! Internal color layout.
//!
//! Stores keep color channels in (G, B, R) order. Everything outside the
//! store (PLY files, accessors, bulk arrays) uses (R, G, B). The two
//! functions on [`GbrColor`] are the only place the permutation happens.

/// One color as held inside a store, channels ordered (G, B, R).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct GbrColor([u8; 3]);

impl GbrColor {
    pub const fn from_rgb(rgb: [u8; 3]) -> Self {
        Self([rgb[1], rgb[2], rgb[0]])
    }

    pub const fn to_rgb(self) -> [u8; 3] {
        [self.0[2], self.0[0], self.0[1]]
    }

    /// Raw channels in storage order.
    pub const fn as_gbr(self) -> [u8; 3] {
        self.0
    }

    pub const fn red(self) -> u8 {
        self.0[2]
    }

    pub const fn green(self) -> u8 {
        self.0[0]
    }

    pub const fn blue(self) -> u8 {
        self.0[1]
    }
}
