//! Axis-aligned boxes in frame coordinates

use opencv::core::Rect;

/// Bounding box of a localized card, in pixels of the frame it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create from OpenCV Rect
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }

    /// Convert to OpenCV Rect
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// True when `other` lies entirely inside this box.
    pub fn contains(&self, other: &BBox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }

    /// Grow by `margin` pixels on every side.
    pub fn inflate(&self, margin: i32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversion() {
        let bbox = BBox::from_rect(Rect::new(3, 4, 20, 10));
        assert_eq!(bbox.to_rect(), Rect::new(3, 4, 20, 10));
    }

    #[test]
    fn test_contains_and_inflate() {
        let outer = BBox::new(10, 10, 100, 50);
        let inner = BBox::new(12, 11, 90, 40);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(inner.inflate(2).contains(&BBox::new(10, 9, 94, 44)));
        assert!(!BBox::new(0, 0, 0, 5).is_valid());
    }
}
