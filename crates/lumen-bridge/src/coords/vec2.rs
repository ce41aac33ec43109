/// 2D position. Whether it is in points or pixels depends on the producer;
/// everything the renderer receives is in surface pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Converts logical points to physical pixels.
    #[inline]
    pub fn to_pixels(self, scale_factor: f64) -> Self {
        Self::new(
            (self.x as f64 * scale_factor) as f32,
            (self.y as f64 * scale_factor) as f32,
        )
    }
}
