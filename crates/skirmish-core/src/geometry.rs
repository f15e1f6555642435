//! Grid positions and map bounds.

use std::fmt;

/// A cell on the 2-D grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column, `0 <= x < width`.
    pub x: i32,
    /// Row, `0 <= y < height`.
    pub y: i32,
}

impl Position {
    /// Construct a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }

    /// True if `other` lies within Euclidean `radius` of `self`.
    ///
    /// Compares squared integer distances, so the boundary case
    /// `distance == radius` is exact.
    pub fn within(&self, other: &Position, radius: i32) -> bool {
        if radius < 0 {
            return false;
        }
        let r = i64::from(radius);
        self.distance_sq(other) <= r * r
    }

    fn distance_sq(&self, other: &Position) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

/// The playable area: `[0, width) x [0, height)`.
///
/// Both dimensions are strictly positive; [`MapBounds::new`] refuses
/// anything else, so every `MapBounds` has at least one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapBounds {
    width: i32,
    height: i32,
}

impl MapBounds {
    /// Create bounds, or `None` if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// Map width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Map height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// True if `pos` is on the map.
    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Clamp raw coordinates onto the map.
    pub fn clamp(&self, x: i64, y: i64) -> Position {
        // Both results fit in i32 because the upper bound is an i32.
        let cx = x.clamp(0, i64::from(self.width) - 1) as i32;
        let cy = y.clamp(0, i64::from(self.height) - 1) as i32;
        Position::new(cx, cy)
    }
}

impl fmt::Display for MapBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
