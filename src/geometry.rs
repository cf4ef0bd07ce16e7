//! Pixel geometry shared by the planner, the exporter and the overlay.
//!
//! Pure arithmetic. Every float → pixel conversion goes through
//! [`trunc_px`], which truncates toward zero and refuses values that do not
//! fit a `u32` instead of saturating them.

use num_traits::ToPrimitive;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Swap width and height.
    pub const fn transpose(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Component-wise sum, used to grow a page by its border.
    pub fn grow(self, by: Size) -> Option<Self> {
        Some(Self {
            width: self.width.checked_add(by.width)?,
            height: self.height.checked_add(by.height)?,
        })
    }
}

/// Axis-aligned rectangle in pixel coordinates.
///
/// Unlike a crop request, a `Rect` here may legitimately have zero width or
/// height: the trailing overflow column of a grid is such a rect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels; may be zero.
    pub width: u32,
    /// Height in pixels; may be zero.
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from edges. `right`/`bottom` below `left`/`top` yield zero extent.
    pub fn from_edges(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the rect covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clip this rect to `(0, 0, bounds.width, bounds.height)`.
    ///
    /// The origin is kept (pinned to the bounds when it lies outside); the
    /// extent shrinks, possibly to zero.
    pub fn clip_to(self, bounds: Size) -> Self {
        let x = self.x.min(bounds.width);
        let y = self.y.min(bounds.height);
        let right = self.x.saturating_add(self.width).min(bounds.width);
        let bottom = self.y.saturating_add(self.height).min(bounds.height);
        Self::from_edges(x, y, right, bottom)
    }
}

/// Truncate a non-negative float to whole pixels.
///
/// Returns `None` for NaN, negative values and anything past `u32::MAX`.
pub fn trunc_px(value: f64) -> Option<u32> {
    if value.is_sign_negative() && value != 0.0 {
        return None;
    }
    value.trunc().to_u32()
}

/// `floor(extent / stride) + 1`: the number of strides needed to cover
/// `extent`, always over-provisioning one trailing (possibly empty) cell.
pub(crate) fn overflow_count(extent: u32, stride: u32) -> Option<u32> {
    (extent / stride).checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trunc_px_truncates_toward_zero() {
        assert_eq!(trunc_px(772.727), Some(772));
        assert_eq!(trunc_px(0.999), Some(0));
        assert_eq!(trunc_px(0.0), Some(0));
        assert_eq!(trunc_px(-0.0), Some(0));
    }

    #[test]
    fn trunc_px_rejects_out_of_range() {
        assert_eq!(trunc_px(-1.0), None);
        assert_eq!(trunc_px(f64::NAN), None);
        assert_eq!(trunc_px(f64::INFINITY), None);
        assert_eq!(trunc_px(u32::MAX as f64 * 2.0), None);
    }

    #[test]
    fn overflow_count_adds_trailing_cell() {
        assert_eq!(overflow_count(4000, 772), Some(6));
        // Exact division still over-provisions: the trailing cell is empty.
        assert_eq!(overflow_count(3860, 772), Some(6));
        assert_eq!(overflow_count(10, 20), Some(1));
    }

    #[test]
    fn rect_edges() {
        let r = Rect::from_edges(10, 20, 30, 25);
        assert_eq!(r, Rect::new(10, 20, 20, 5));
        assert_eq!(r.right(), 30);
        assert_eq!(r.bottom(), 25);
        assert!(!r.is_empty());
    }

    #[test]
    fn rect_from_inverted_edges_is_empty() {
        let r = Rect::from_edges(30, 0, 10, 10);
        assert_eq!(r.width, 0);
        assert!(r.is_empty());
    }

    #[test]
    fn rect_clip_trailing_tile() {
        // 6th column of a 4000px wide image at a 772px stride.
        let r = Rect::new(3860, 1000, 772, 1000).clip_to(Size::new(4000, 2000));
        assert_eq!(r, Rect::new(3860, 1000, 140, 1000));
    }

    #[test]
    fn rect_clip_outside_is_empty() {
        let r = Rect::new(500, 0, 100, 100).clip_to(Size::new(500, 500));
        assert_eq!(r.x, 500);
        assert!(r.is_empty());
    }

    #[test]
    fn size_grow_and_transpose() {
        assert_eq!(
            Size::new(772, 1000).grow(Size::new(34, 44)),
            Some(Size::new(806, 1044))
        );
        assert_eq!(Size::new(u32::MAX, 1).grow(Size::new(1, 0)), None);
        assert_eq!(Size::new(3, 7).transpose(), Size::new(7, 3));
    }
}
