//! Axis-aligned rectangles and points in pixel coordinates.

use std::fmt;

/// Pixel position, `x` to the right and `y` downwards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
    serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Point {
    /// Create a point from a column and a row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Translate this point by the top-left corner of `origin`.
    ///
    /// Returns `None` if a coordinate overflows.
    #[must_use]
    pub fn checked_offset_by(self, origin: Rect) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(origin.x)?,
            self.y.checked_add(origin.y)?,
        ))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Half-open rectangle covering columns `[x, x + width)` and rows `[y, y + height)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
    serde::Serialize, serde::Deserialize,
)]
pub struct Rect {
    /// Left column.
    pub x: usize,
    /// Top row.
    pub y: usize,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the rightmost column, saturating at `usize::MAX`.
    #[must_use]
    pub fn right(&self) -> usize {
        self.x.saturating_add(self.width)
    }

    /// One past the bottom row, saturating at `usize::MAX`.
    #[must_use]
    pub fn bottom(&self) -> usize {
        self.y.saturating_add(self.height)
    }

    /// Number of pixels covered.
    #[must_use]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Return true if the rectangle covers no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Translate this rectangle by the top-left corner of `origin`.
    ///
    /// Used to turn test geometry, which is relative to a sample region,
    /// into channel coordinates. Returns `None` if a coordinate overflows.
    #[must_use]
    pub fn checked_offset_by(self, origin: Rect) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(origin.x)?,
            self.y.checked_add(origin.y)?,
            self.width,
            self.height,
        ))
    }

    /// Return true if the rectangle lies inside a `width x height` grid.
    ///
    /// Rectangles whose far edge overflows `usize` never fit.
    #[must_use]
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        right.is_some_and(|r| r <= width) && bottom.is_some_and(|b| b <= height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rect {}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn rect_edges_and_area() {
        let r = Rect::new(2, 3, 4, 5);
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 8);
        assert_eq!(r.area(), 20);
        assert!(!r.is_empty());
    }

    #[test]
    fn zero_width_is_empty() {
        assert!(Rect::new(1, 1, 0, 3).is_empty());
    }

    #[test]
    fn offset_translates_origin_only() {
        let region = Rect::new(10, 20, 30, 30);
        let r = Rect::new(1, 2, 3, 4).checked_offset_by(region);
        assert_eq!(r, Some(Rect::new(11, 22, 3, 4)));
        assert_eq!(Point::new(5, 6).checked_offset_by(region), Some(Point::new(15, 26)));
    }

    #[test]
    fn offset_overflow_is_none() {
        let region = Rect::new(2, 0, 4, 4);
        assert_eq!(Rect::new(usize::MAX, 0, 1, 1).checked_offset_by(region), None);
        assert_eq!(Point::new(0, usize::MAX).checked_offset_by(Rect::new(0, 1, 1, 1)), None);
    }

    #[test]
    fn far_edge_overflow_never_fits() {
        let r = Rect::new(usize::MAX, 0, 1, 1);
        assert_eq!(r.right(), usize::MAX);
        assert!(!r.fits_within(8, 8));
        assert!(!r.fits_within(usize::MAX, 8));
        assert!(!Rect::new(0, 2, 1, usize::MAX).fits_within(8, usize::MAX));
    }

    #[test]
    fn fits_within_is_inclusive_of_far_edge() {
        assert!(Rect::new(0, 0, 4, 4).fits_within(4, 4));
        assert!(!Rect::new(1, 0, 4, 4).fits_within(4, 4));
        assert!(!Rect::new(0, 1, 4, 4).fits_within(4, 4));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Rect::new(1, 2, 3, 4)), "rect 3x4 at (1, 2)");
        assert_eq!(format!("{}", Point::new(7, 8)), "(7, 8)");
    }
}
