//! Integer geometry in original-image pixel space.

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Creates a size from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle with integer edges.
///
/// Edges produced by the parsers are clamped to the origin image, so
/// `0 <= left <= right <= origin.width` and likewise vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl Rect {
    /// Creates a rectangle from left/top/right/bottom edges.
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns the width, or 0 when the rectangle is degenerate.
    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    /// Returns the height, or 0 when the rectangle is degenerate.
    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }

    /// Returns the area in pixels.
    pub fn area(&self) -> u32 {
        self.width() * self.height()
    }

    /// Computes intersection-over-union with another rectangle, in [0, 1].
    ///
    /// Returns 0 when the union is empty.
    pub fn iou(&self, other: &Rect) -> f32 {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);

        let intersection = ((right - left).max(0) * (bottom - top).max(0)) as f32;
        let union = self.area() as f32 + other.area() as f32 - intersection;

        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }
}
