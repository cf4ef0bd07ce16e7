//! Page orientation, split axis and paper proportions.
//!
//! A page is always the same physical sheet; orientation only decides which
//! of its sides runs along the image's height. The split axis decides which
//! image dimension is divided into an exact number of pages.
//!
//! ```text
//!     Portrait            Landscape
//!     ┌─────┐             ┌─────────┐
//!     │     │ long        │         │ short
//!     │     │             └─────────┘
//!     └─────┘                long
//!      short
//! ```

use crate::error::LayoutError;
use crate::geometry::{Size, trunc_px};

/// Border padding (width, height) around portrait page content.
///
/// Roughly a 1 cm margin once the page is printed; the resolution this
/// assumes has never been pinned to real units.
pub const PORTRAIT_BORDER: Size = Size::new(34, 44);

/// Border padding (width, height) around landscape page content.
pub const LANDSCAPE_BORDER: Size = PORTRAIT_BORDER.transpose();

/// Which way up each printed sheet is held.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageOrientation {
    /// Long side vertical.
    #[default]
    Portrait,
    /// Long side horizontal.
    Landscape,
}

impl PageOrientation {
    /// Build from the front end's "portrait" toggle.
    pub fn from_portrait(portrait: bool) -> Self {
        if portrait {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }

    pub fn is_portrait(self) -> bool {
        self == Self::Portrait
    }

    /// Physical page content size for a sheet whose long side is `long_side`
    /// pixels and whose short/long ratio is `ratio`.
    ///
    /// The short side is truncated, never rounded.
    pub fn page_size(self, long_side: u32, ratio: f64) -> Result<Size, LayoutError> {
        let short_side = trunc_px(long_side as f64 * ratio).ok_or(LayoutError::ScaleOutOfRange)?;
        let portrait = Size::new(short_side, long_side);
        if portrait.is_empty() {
            return Err(LayoutError::PageTooSmall {
                width: portrait.width,
                height: portrait.height,
            });
        }
        Ok(match self {
            Self::Portrait => portrait,
            Self::Landscape => portrait.transpose(),
        })
    }

    /// Border padding added around every page's content.
    pub fn border(self) -> Size {
        match self {
            Self::Portrait => PORTRAIT_BORDER,
            Self::Landscape => LANDSCAPE_BORDER,
        }
    }
}

/// Which image dimension is divided into exactly `divisions` pages.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SplitAxis {
    /// Divide the height: `divisions` rows, as many columns as needed.
    #[default]
    Vertical,
    /// Divide the width: `divisions` columns, as many rows as needed.
    Horizontal,
}

impl SplitAxis {
    pub fn is_vertical(self) -> bool {
        self == Self::Vertical
    }

    /// Pick the component of `size` along the divided dimension.
    pub fn along(self, size: Size) -> u32 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Pick the component of `size` across the divided dimension.
    pub fn across(self, size: Size) -> u32 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// Inverse of [`along`](Self::along)/[`across`](Self::across).
    pub fn compose(self, along: u32, across: u32) -> Size {
        match self {
            Self::Vertical => Size::new(across, along),
            Self::Horizontal => Size::new(along, across),
        }
    }
}

/// Paper proportions, expressed as short side / long side.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Paper {
    /// US Letter, 8.5 × 11 in.
    #[default]
    Letter,
    /// US Legal, 8.5 × 14 in.
    Legal,
    /// ISO A4, 210 × 297 mm. Every ISO A size shares this ratio.
    A4,
    /// Any other sheet. Must be in `(0, 1]`.
    Custom(f64),
}

impl Paper {
    /// Short/long ratio of this paper. Not validated for `Custom`.
    pub fn ratio(self) -> f64 {
        match self {
            Self::Letter => 8.5 / 11.0,
            Self::Legal => 8.5 / 14.0,
            Self::A4 => 210.0 / 297.0,
            Self::Custom(r) => r,
        }
    }

    /// The ratio, rejecting anything that is not a finite value in `(0, 1]`.
    pub fn checked_ratio(self) -> Result<f64, LayoutError> {
        let r = self.ratio();
        if r.is_finite() && r > 0.0 && r <= 1.0 {
            Ok(r)
        } else {
            Err(LayoutError::InvalidPaperRatio)
        }
    }
}

/// Short/long ratio as applied to page width / page height (Vertical split)
/// or page height / page width (Horizontal split).
///
/// Vertical splitting advances down the long side of a portrait page and
/// across the long side of a landscape page, so the paper ratio applies
/// unchanged exactly when `portrait == split is vertical`.
pub fn effective_ratio(paper_ratio: f64, orientation: PageOrientation, axis: SplitAxis) -> f64 {
    if orientation.is_portrait() == axis.is_vertical() {
        paper_ratio
    } else {
        1.0 / paper_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTER: f64 = 8.5 / 11.0;

    #[test]
    fn effective_ratio_table() {
        use PageOrientation::*;
        use SplitAxis::*;
        assert_eq!(effective_ratio(LETTER, Portrait, Vertical), LETTER);
        assert_eq!(effective_ratio(LETTER, Landscape, Horizontal), LETTER);
        assert_eq!(effective_ratio(LETTER, Portrait, Horizontal), 1.0 / LETTER);
        assert_eq!(effective_ratio(LETTER, Landscape, Vertical), 1.0 / LETTER);
    }

    #[test]
    fn effective_ratio_keeps_page_shape() {
        // Page width/height from the effective ratio must match the sheet's
        // orientation on every combination.
        use PageOrientation::*;
        use SplitAxis::*;
        for (o, axis) in [
            (Portrait, Vertical),
            (Portrait, Horizontal),
            (Landscape, Vertical),
            (Landscape, Horizontal),
        ] {
            let along = 1000.0;
            let across = along * effective_ratio(LETTER, o, axis);
            let (w, h) = match axis {
                Vertical => (across, along),
                Horizontal => (along, across),
            };
            assert_eq!(w < h, o.is_portrait(), "{o:?} {axis:?}: {w}x{h}");
        }
    }

    #[test]
    fn page_size_truncates_short_side() {
        assert_eq!(
            PageOrientation::Portrait.page_size(1000, LETTER),
            Ok(Size::new(772, 1000))
        );
        assert_eq!(
            PageOrientation::Landscape.page_size(1000, LETTER),
            Ok(Size::new(1000, 772))
        );
        assert_eq!(
            PageOrientation::Portrait.page_size(1000, Paper::A4.ratio()),
            Ok(Size::new(707, 1000))
        );
    }

    #[test]
    fn page_size_rejects_degenerate_sheet() {
        assert_eq!(
            PageOrientation::Portrait.page_size(1, LETTER),
            Err(LayoutError::PageTooSmall {
                width: 0,
                height: 1
            })
        );
    }

    #[test]
    fn borders_by_orientation() {
        assert_eq!(PageOrientation::Portrait.border(), Size::new(34, 44));
        assert_eq!(PageOrientation::Landscape.border(), Size::new(44, 34));
    }

    #[test]
    fn paper_ratios() {
        assert!((Paper::Letter.ratio() - 0.7727).abs() < 1e-4);
        assert!((Paper::A4.ratio() - 0.7071).abs() < 1e-4);
        assert_eq!(Paper::Custom(0.5).checked_ratio(), Ok(0.5));
        assert_eq!(Paper::Custom(1.0).checked_ratio(), Ok(1.0));
    }

    #[test]
    fn paper_ratio_out_of_range() {
        for bad in [0.0, -0.5, 1.3, f64::NAN, f64::INFINITY] {
            assert_eq!(
                Paper::Custom(bad).checked_ratio(),
                Err(LayoutError::InvalidPaperRatio),
                "{bad}"
            );
        }
    }

    #[test]
    fn axis_projection_round_trip() {
        let s = Size::new(4000, 2000);
        for axis in [SplitAxis::Vertical, SplitAxis::Horizontal] {
            assert_eq!(axis.compose(axis.along(s), axis.across(s)), s);
        }
        assert_eq!(SplitAxis::Vertical.along(s), 2000);
        assert_eq!(SplitAxis::Horizontal.along(s), 4000);
    }
}
