//! Cube-coordinate hexagons.
//!
//! Cells are addressed with cube coordinates `(q, r, s)` constrained by
//! `q + r + s == 0`. Adding one of the six `DIRECTIONS` vectors to a hex
//! yields the neighbour on that side. See the grid and layout modules for
//! board shaping and pixel conversion.

use std::ops::{Add, Sub};

/// A hexagon position in cube coordinates.
///
/// The coordinates always satisfy `q + r + s == 0`; constructors enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hex {
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
    /// Derived third axis, always `-q - r`.
    pub s: i32,
}

/// Unit vectors for the six neighbour directions.
pub const DIRECTIONS: [Hex; 6] = [
    Hex { q: 1, r: 0, s: -1 },
    Hex { q: 1, r: -1, s: 0 },
    Hex { q: 0, r: -1, s: 1 },
    Hex { q: -1, r: 0, s: 1 },
    Hex { q: -1, r: 1, s: 0 },
    Hex { q: 0, r: 1, s: -1 },
];

impl Hex {
    /// Create a hex from full cube coordinates.
    ///
    /// # Panics
    /// Panics when `q + r + s != 0`.
    pub fn new(q: i32, r: i32, s: i32) -> Self {
        assert!(q + r + s == 0, "cube coordinates must sum to zero");
        Self { q, r, s }
    }

    /// Create a hex from axial coordinates, deriving `s`.
    pub fn axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Number of steps from the origin to this hex.
    pub fn length(self) -> i32 {
        (self.q.abs() + self.r.abs() + self.s.abs()) / 2
    }

    /// Number of steps between two hexes.
    pub fn distance(self, other: Hex) -> i32 {
        (self - other).length()
    }

    /// The neighbour on side `direction` (`0..6`).
    ///
    /// # Panics
    /// Panics when `direction >= 6`.
    pub fn neighbour(self, direction: usize) -> Hex {
        self + DIRECTIONS[direction]
    }

    /// All six neighbours, in `DIRECTIONS` order.
    pub fn neighbours(self) -> impl Iterator<Item = Hex> {
        DIRECTIONS.iter().map(move |&d| self + d)
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, rhs: Hex) -> Hex {
        Hex {
            q: self.q + rhs.q,
            r: self.r + rhs.r,
            s: self.s + rhs.s,
        }
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, rhs: Hex) -> Hex {
        Hex {
            q: self.q - rhs.q,
            r: self.r - rhs.r,
            s: self.s - rhs.s,
        }
    }
}
