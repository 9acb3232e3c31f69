/// Snapshot of a single point, with color in (R, G, B) order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: [f64; 3],
    pub color: Option<[u8; 3]>,
    pub reflectance: Option<u16>,
}

impl Point {
    pub fn new(position: [f64; 3]) -> Self {
        Self {
            position,
            color: None,
            reflectance: None,
        }
    }

    pub fn with_color(mut self, rgb: [u8; 3]) -> Self {
        self.color = Some(rgb);
        self
    }

    pub fn with_reflectance(mut self, reflectance: u16) -> Self {
        self.reflectance = Some(reflectance);
        self
    }
}
