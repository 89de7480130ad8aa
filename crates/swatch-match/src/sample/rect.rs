//! Sample rectangles

/// Side length of the square sampled around a tracked pointer.
pub const DEFAULT_POINTER_SIZE: usize = 10;

/// Drag selections with an area at or below this are treated as clicks.
pub const MIN_SELECTION_AREA: usize = 25;

/// A rectangular region of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SampleRect {
    /// Column of the leftmost pixel
    pub left: usize,
    /// Row of the topmost pixel
    pub top: usize,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl SampleRect {
    #[inline]
    pub const fn new(left: usize, top: usize, width: usize, height: usize) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `(x, y)`, shifted so it stays
    /// inside a `width` x `height` buffer.
    ///
    /// If the buffer is smaller than `size` the square is cut down to the
    /// buffer.
    ///
    /// ```
    /// use swatch_match::SampleRect;
    ///
    /// // Near the bottom-right corner the box is pushed back inside
    /// let rect = SampleRect::around_point(198, 99, 10, 200, 100);
    /// assert_eq!(rect, SampleRect::new(190, 90, 10, 10));
    /// ```
    pub fn around_point(x: usize, y: usize, size: usize, width: usize, height: usize) -> Self {
        let half = size / 2;
        let left = x.saturating_sub(half).min(width.saturating_sub(size));
        let top = y.saturating_sub(half).min(height.saturating_sub(size));
        Self::new(left, top, size.min(width), size.min(height))
    }

    /// Rectangle spanned by a drag from `(x0, y0)` to `(x1, y1)`, in either
    /// direction, clipped to a `width` x `height` buffer.
    pub fn from_drag(
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
        width: usize,
        height: usize,
    ) -> Self {
        let left = x0.min(x1).min(width);
        let top = y0.min(y1).min(height);
        let right = x0.max(x1).min(width);
        let bottom = y0.max(y1).min(height);
        Self::new(left, top, right - left, bottom - top)
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether a drag selection is large enough to sample rather than
    /// being handled as a click.
    #[inline]
    pub fn is_selection(&self) -> bool {
        self.area() > MIN_SELECTION_AREA
    }

    /// One past the last column.
    #[inline]
    pub fn right(&self) -> usize {
        self.left.saturating_add(self.width)
    }

    /// One past the last row.
    #[inline]
    pub fn bottom(&self) -> usize {
        self.top.saturating_add(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_around_point_centered() {
        assert_eq!(
            SampleRect::around_point(50, 40, 10, 200, 100),
            SampleRect::new(45, 35, 10, 10)
        );
    }

    #[test]
    fn test_around_point_clamps_to_edges() {
        assert_eq!(
            SampleRect::around_point(2, 1, 10, 200, 100),
            SampleRect::new(0, 0, 10, 10)
        );
        assert_eq!(
            SampleRect::around_point(500, 500, 10, 200, 100),
            SampleRect::new(190, 90, 10, 10)
        );
    }

    #[test]
    fn test_around_point_in_tiny_buffer() {
        assert_eq!(
            SampleRect::around_point(3, 2, 10, 6, 4),
            SampleRect::new(0, 0, 6, 4)
        );
    }

    #[test]
    fn test_from_drag_any_direction() {
        let forward = SampleRect::from_drag(10, 20, 40, 30, 100, 100);
        let backward = SampleRect::from_drag(40, 30, 10, 20, 100, 100);
        assert_eq!(forward, SampleRect::new(10, 20, 30, 10));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_from_drag_clips_to_buffer() {
        assert_eq!(
            SampleRect::from_drag(90, 90, 150, 120, 100, 100),
            SampleRect::new(90, 90, 10, 10)
        );
        assert!(SampleRect::from_drag(150, 150, 200, 200, 100, 100).is_empty());
    }

    #[test]
    fn test_selection_threshold() {
        assert!(!SampleRect::new(0, 0, 5, 5).is_selection());
        assert!(SampleRect::new(0, 0, 2, 13).is_selection());
        assert!(!SampleRect::new(0, 0, 0, 100).is_selection());
        assert_eq!(SampleRect::new(0, 0, 4, 6).area(), 24);
    }
}
