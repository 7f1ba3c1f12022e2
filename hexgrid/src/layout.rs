//! Conversions between hex coordinates and pixel coordinates.
//!
//! A `Layout` fixes an orientation, a hexagon side length and a pixel
//! origin, and maps hexes to cell centres, pixels back to hexes (with cube
//! rounding), and corners for drawing.

use std::f64::consts::PI;

use crate::hex::Hex;

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Hexagon orientation on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Corner at the top, flat sides left and right.
    #[default]
    Pointy,
    /// Flat side at the top.
    Flat,
}

impl Orientation {
    /// Forward matrix, hex to pixel.
    fn forward(self) -> [f64; 4] {
        let sqrt3 = 3f64.sqrt();
        match self {
            Orientation::Pointy => [sqrt3, sqrt3 / 2.0, 0.0, 3.0 / 2.0],
            Orientation::Flat => [3.0 / 2.0, 0.0, sqrt3 / 2.0, sqrt3],
        }
    }

    /// Inverse matrix, pixel to fractional hex.
    fn inverse(self) -> [f64; 4] {
        let sqrt3 = 3f64.sqrt();
        match self {
            Orientation::Pointy => [sqrt3 / 3.0, -1.0 / 3.0, 0.0, 2.0 / 3.0],
            Orientation::Flat => [2.0 / 3.0, 0.0, -1.0 / 3.0, sqrt3 / 3.0],
        }
    }

    /// Angular offset of corner 0, in sixths of a full turn.
    fn start_angle(self) -> f64 {
        match self {
            Orientation::Pointy => 0.5,
            Orientation::Flat => 0.0,
        }
    }
}

/// Mapping between cube coordinates and pixels for one cell size and origin.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub orientation: Orientation,
    /// Hexagon side length in pixels.
    pub size: f64,
    /// Pixel position of the hex at the origin.
    pub origin: Point,
}

impl Layout {
    pub fn new(orientation: Orientation, size: f64, origin: Point) -> Self {
        Self {
            orientation,
            size,
            origin,
        }
    }

    /// Pixel centre of a hexagon.
    pub fn hex_to_pixel(&self, hex: Hex) -> Point {
        let f = self.orientation.forward();
        let x = (f[0] * hex.q as f64 + f[1] * hex.r as f64) * self.size;
        let y = (f[2] * hex.q as f64 + f[3] * hex.r as f64) * self.size;
        Point::new(x + self.origin.x, y + self.origin.y)
    }

    /// The hexagon under a pixel.
    pub fn pixel_to_hex(&self, point: Point) -> Hex {
        let inv = self.orientation.inverse();
        let x = (point.x - self.origin.x) / self.size;
        let y = (point.y - self.origin.y) / self.size;
        let q = inv[0] * x + inv[1] * y;
        let r = inv[2] * x + inv[3] * y;
        round(q, r, -q - r)
    }

    /// Offset of corner `corner` (`0..6`) from a hexagon centre.
    pub fn corner_offset(&self, corner: usize) -> Point {
        let angle = 2.0 * PI * (self.orientation.start_angle() - corner as f64) / 6.0;
        Point::new(self.size * angle.cos(), self.size * angle.sin())
    }

    /// Pixel corners of a hexagon, ready to trace.
    pub fn polygon_corners(&self, hex: Hex) -> [Point; 6] {
        let centre = self.hex_to_pixel(hex);
        std::array::from_fn(|corner| {
            let offset = self.corner_offset(corner);
            Point::new(centre.x + offset.x, centre.y + offset.y)
        })
    }
}

/// Round fractional cube coordinates to the nearest hex. The component with
/// the largest rounding error is recomputed from the other two so the cube
/// invariant holds. Coordinates too large for `i32` saturate into range,
/// with `s` re-derived from the clamped pair.
fn round(q: f64, r: f64, s: f64) -> Hex {
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();
    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    // Half the i32 range, so the derived `s` cannot overflow either.
    let limit = (i32::MAX / 2) as f64;
    Hex::axial(
        rq.clamp(-limit, limit) as i32,
        rr.clamp(-limit, limit) as i32,
    )
}
