use serde::{Deserialize, Serialize};

/// Denominator substituted for `x2 - x1` on vertical segments.
pub const DEFAULT_VERTICAL_EPS: f32 = 1e-4;

/// Line segment in image pixel coordinates (y grows downwards).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl LineSegment {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn length(&self) -> f32 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    /// `dy / dx`, with `dx` replaced by `vertical_eps` when the segment is
    /// vertical. Never divides by zero.
    pub fn slope_with_eps(&self, vertical_eps: f32) -> f32 {
        let dx = self.x2 - self.x1;
        let dx = if dx == 0.0 { vertical_eps } else { dx };
        (self.y2 - self.y1) / dx
    }

    pub fn slope(&self) -> f32 {
        self.slope_with_eps(DEFAULT_VERTICAL_EPS)
    }

    /// Largest endpoint row, i.e. the endpoint lowest in the image.
    pub fn bottom_y(&self) -> f32 {
        self.y1.max(self.y2)
    }
}

impl From<[i32; 4]> for LineSegment {
    fn from(v: [i32; 4]) -> Self {
        Self::new(v[0] as f32, v[1] as f32, v[2] as f32, v[3] as f32)
    }
}
