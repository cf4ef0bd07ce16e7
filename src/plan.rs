//! Page grid planning.
//!
//! Two views of the same grid:
//!
//! - [`plan`] works in whatever pixel space the caller hands it. A preview
//!   passes on-screen dimensions, the exporter passes native ones; the ratio
//!   math is identical.
//! - [`TileGrid`] is the exporter's view in physical-reference space, where one
//!   page is exactly `long_side` pixels on its long edge. It derives its rescale
//!   factor and validation from [`plan`].
//!
//! # Example
//!
//! ```
//! use posterize::{PageSpec, Paper, Size, TileGrid, plan};
//!
//! let spec = PageSpec::new(2).paper(Paper::Letter);
//! let layout = plan(2000, 1000, &spec).unwrap();
//! assert_eq!(layout.rescale_factor, 2.0);
//! assert_eq!((layout.rows, layout.cols), (2, 6));
//!
//! let grid = TileGrid::new(2000, 1000, &spec).unwrap();
//! assert_eq!(grid.rescaled, Size::new(4000, 2000));
//! assert_eq!(grid.page_size(), Size::new(806, 1044));
//! assert_eq!(grid.len(), 12);
//! ```

use crate::error::LayoutError;
use crate::geometry::{Rect, Size, overflow_count, trunc_px};
use crate::orientation::{PageOrientation, Paper, SplitAxis, effective_ratio};

/// Physical-reference length of a page's long side, in pixels.
pub const DEFAULT_LONG_SIDE: u32 = 1000;

/// Everything the front end collects, as one immutable value.
///
/// Rebuild it on every control change and pass it by value; nothing keeps
/// state between a preview and the export that follows it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PageSpec {
    /// Long side of one page before border padding.
    pub long_side: u32,
    /// Paper format giving the page aspect ratio.
    pub paper: Paper,
    pub orientation: PageOrientation,
    /// Image axis divided into exactly `divisions` pages.
    pub split_axis: SplitAxis,
    /// Pages along the split axis. Zero is rejected by [`plan`].
    pub divisions: u32,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::new(4)
    }
}

impl PageSpec {
    /// Portrait Letter pages, height split into `divisions` rows.
    pub fn new(divisions: u32) -> Self {
        Self {
            long_side: DEFAULT_LONG_SIDE,
            paper: Paper::Letter,
            orientation: PageOrientation::Portrait,
            split_axis: SplitAxis::Vertical,
            divisions,
        }
    }

    pub fn paper(mut self, paper: Paper) -> Self {
        self.paper = paper;
        self
    }

    pub fn orientation(mut self, orientation: PageOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Shorthand for the front end's portrait/landscape toggle.
    pub fn portrait(self, portrait: bool) -> Self {
        self.orientation(PageOrientation::from_portrait(portrait))
    }

    pub fn split_axis(mut self, axis: SplitAxis) -> Self {
        self.split_axis = axis;
        self
    }

    pub fn long_side(mut self, long_side: u32) -> Self {
        self.long_side = long_side;
        self
    }

    /// Check the page settings on their own and return the validated paper ratio.
    pub fn validate(&self) -> Result<f64, LayoutError> {
        if self.divisions == 0 {
            return Err(LayoutError::ZeroDivisions);
        }
        if self.long_side == 0 {
            return Err(LayoutError::ZeroLongSide);
        }
        self.paper.checked_ratio()
    }

    /// Page content size (`wLen × hLen`) in physical-reference space.
    pub fn physical_page(&self) -> Result<Size, LayoutError> {
        let ratio = self.validate()?;
        self.orientation.page_size(self.long_side, ratio)
    }

    /// Border padding for this orientation.
    pub fn border(&self) -> Size {
        self.orientation.border()
    }
}

/// Grid shape for one set of image dimensions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutPlan {
    /// Scale taking the planned image to physical-reference space.
    pub rescale_factor: f64,
    /// One page in the planned image's pixel space.
    pub page: Size,
    /// Page columns, including a trailing overflow column.
    pub cols: u32,
    /// Page rows, including a trailing overflow row.
    pub rows: u32,
}

impl LayoutPlan {
    /// Total pages, including the trailing overflow row or column.
    pub fn page_count(&self) -> u64 {
        self.cols as u64 * self.rows as u64
    }
}

/// Plan a page grid over an `image_width × image_height` image.
///
/// The divided dimension is split into `divisions` equal strides (integer
/// division); the other page side follows from the effective paper ratio,
/// truncated. The cross axis always gets `floor(extent / stride) + 1` pages,
/// so a partial trailing row or column is covered.
pub fn plan(image_width: u32, image_height: u32, spec: &PageSpec) -> Result<LayoutPlan, LayoutError> {
    let image = Size::new(image_width, image_height);
    if image.is_empty() {
        return Err(LayoutError::ZeroSourceDimension);
    }
    let ratio = spec.validate()?;
    let axis = spec.split_axis;

    let along = axis.along(image) / spec.divisions;
    let across = trunc_px(along as f64 * effective_ratio(ratio, spec.orientation, axis))
        .ok_or(LayoutError::ScaleOutOfRange)?;
    let page = axis.compose(along, across);
    if page.is_empty() {
        return Err(LayoutError::PageTooSmall {
            width: page.width,
            height: page.height,
        });
    }

    let cross_count =
        overflow_count(axis.across(image), across).ok_or(LayoutError::ScaleOutOfRange)?;
    let grid = axis.compose(spec.divisions, cross_count);

    let physical = spec.orientation.page_size(spec.long_side, ratio)?;
    let rescale_factor =
        axis.along(physical) as f64 * spec.divisions as f64 / axis.along(image) as f64;

    Ok(LayoutPlan {
        rescale_factor,
        page,
        cols: grid.width,
        rows: grid.height,
    })
}

/// One grid cell, in rescaled-image coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Row-major position; also the output file number.
    pub index: usize,
    /// Column, counted from the left.
    pub col: u32,
    /// Row, counted from the top.
    pub row: u32,
    /// Crop region, clipped to the rescaled image. May be empty for the
    /// overflow cell when the cross axis divides exactly.
    pub region: Rect,
}

impl Tile {
    pub fn left(&self) -> u32 {
        self.region.x
    }

    pub fn top(&self) -> u32 {
        self.region.y
    }

    pub fn right(&self) -> u32 {
        self.region.right()
    }

    pub fn bottom(&self) -> u32 {
        self.region.bottom()
    }

    /// Whether the tile carries no image content at all.
    pub fn is_blank(&self) -> bool {
        self.region.is_empty()
    }
}

/// The exporter's grid: rescale target, crop stride and page canvas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileGrid {
    /// Scale from native to rescaled pixels.
    pub rescale_factor: f64,
    /// Native source dimensions.
    pub source: Size,
    /// Source dimensions after rescaling.
    pub rescaled: Size,
    /// Page content size (`wLen × hLen`); also the crop stride.
    pub stride: Size,
    /// Border padding (`wPad × hPad`).
    pub border: Size,
    /// Page columns; `tile(col, _)` is valid for `col < cols`.
    pub cols: u32,
    /// Page rows; `tile(_, row)` is valid for `row < rows`.
    pub rows: u32,
    page: Size,
}

impl TileGrid {
    /// Derive the export grid for a `source_width × source_height` image.
    pub fn new(source_width: u32, source_height: u32, spec: &PageSpec) -> Result<Self, LayoutError> {
        let layout = plan(source_width, source_height, spec)?;
        let source = Size::new(source_width, source_height);
        let stride = spec.physical_page()?;
        let border = spec.border();
        let axis = spec.split_axis;

        // The factor is built so the divided dimension lands on an exact
        // multiple of the stride; use that multiple instead of a product
        // that may truncate one pixel short.
        let along = axis
            .along(stride)
            .checked_mul(spec.divisions)
            .ok_or(LayoutError::ScaleOutOfRange)?;
        let across = trunc_px(axis.across(source) as f64 * layout.rescale_factor)
            .ok_or(LayoutError::ScaleOutOfRange)?;
        let rescaled = axis.compose(along, across);
        if rescaled.is_empty() {
            return Err(LayoutError::ScaleOutOfRange);
        }

        let cross_count = overflow_count(across, axis.across(stride))
            .ok_or(LayoutError::ScaleOutOfRange)?;
        let grid = axis.compose(spec.divisions, cross_count);
        let page = stride.grow(border).ok_or(LayoutError::ScaleOutOfRange)?;

        Ok(Self {
            rescale_factor: layout.rescale_factor,
            source,
            rescaled,
            stride,
            border,
            cols: grid.width,
            rows: grid.height,
            page,
        })
    }

    /// Size of every emitted page: `(wLen + wPad) × (hLen + hPad)`.
    pub fn page_size(&self) -> Size {
        self.page
    }

    /// Top-left corner of the content area within a page.
    pub fn content_origin(&self) -> (u32, u32) {
        (self.border.width / 2, self.border.height / 2)
    }

    /// Number of tiles (and pages).
    pub fn len(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cell at (`col`, `row`), clipped to the rescaled image.
    pub fn tile(&self, col: u32, row: u32) -> Tile {
        let region = Rect::new(
            col.saturating_mul(self.stride.width),
            row.saturating_mul(self.stride.height),
            self.stride.width,
            self.stride.height,
        )
        .clip_to(self.rescaled);
        Tile {
            index: row as usize * self.cols as usize + col as usize,
            col,
            row,
            region,
        }
    }

    /// All tiles, top-to-bottom then left-to-right.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| self.tile(col, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(divisions: u32) -> PageSpec {
        PageSpec::new(divisions).paper(Paper::Letter)
    }

    // ── plan ────────────────────────────────────────────────────────────

    #[test]
    fn plan_vertical_portrait() {
        // 1000/2 = 500 tall pages, 500 * 8.5/11 = 386.36 → 386 wide.
        let p = plan(2000, 1000, &letter(2)).unwrap();
        assert_eq!(p.page, Size::new(386, 500));
        assert_eq!(p.rows, 2);
        assert_eq!(p.cols, 2000 / 386 + 1);
        assert_eq!(p.rescale_factor, 2.0);
    }

    #[test]
    fn plan_vertical_landscape() {
        let spec = letter(2).orientation(PageOrientation::Landscape);
        let p = plan(2000, 1000, &spec).unwrap();
        // 500 tall, 500 * 11/8.5 = 647.05 → 647 wide.
        assert_eq!(p.page, Size::new(647, 500));
        assert_eq!((p.rows, p.cols), (2, 4));
        // Landscape page height is the short side: 772 * 2 / 1000.
        assert!((p.rescale_factor - 1.544).abs() < 1e-12);
    }

    #[test]
    fn plan_horizontal_portrait() {
        let spec = letter(3).split_axis(SplitAxis::Horizontal);
        let p = plan(900, 2000, &spec).unwrap();
        // 900/3 = 300 wide, 300 * 11/8.5 = 388.2 → 388 tall.
        assert_eq!(p.page, Size::new(300, 388));
        assert_eq!((p.cols, p.rows), (3, 2000 / 388 + 1));
        assert!((p.rescale_factor - 772.0 * 3.0 / 900.0).abs() < 1e-12);
    }

    #[test]
    fn plan_integer_division_of_display_extent() {
        // 1001 / 3 = 333, remainder dropped.
        let p = plan(500, 1001, &letter(3)).unwrap();
        assert_eq!(p.page.height, 333);
    }

    #[test]
    fn plan_exact_cross_division_still_overflows() {
        // 386 * 5 = 1930 wide: five full columns plus an empty sixth.
        let p = plan(1930, 1000, &letter(2)).unwrap();
        assert_eq!(p.cols, 6);
    }

    #[test]
    fn plan_square_orientation_symmetry() {
        let a = plan(1200, 1200, &letter(3)).unwrap();
        let b = plan(
            1200,
            1200,
            &letter(3)
                .orientation(PageOrientation::Landscape)
                .split_axis(SplitAxis::Horizontal),
        )
        .unwrap();
        assert_eq!(a.page, b.page.transpose());
        assert_eq!((a.rows, a.cols), (b.cols, b.rows));
    }

    // ── validation ──────────────────────────────────────────────────────

    #[test]
    fn plan_rejects_zero_divisions() {
        assert_eq!(plan(100, 100, &letter(0)), Err(LayoutError::ZeroDivisions));
    }

    #[test]
    fn plan_rejects_zero_source() {
        assert_eq!(
            plan(0, 100, &letter(1)),
            Err(LayoutError::ZeroSourceDimension)
        );
        assert_eq!(
            plan(100, 0, &letter(1)),
            Err(LayoutError::ZeroSourceDimension)
        );
    }

    #[test]
    fn plan_rejects_too_many_divisions() {
        // 10 / 20 = 0 tall pages.
        assert_eq!(
            plan(100, 10, &letter(20)),
            Err(LayoutError::PageTooSmall {
                width: 0,
                height: 0
            })
        );
        // 10 / 10 = 1 tall, 1 * 0.77 = 0 wide.
        assert_eq!(
            plan(100, 10, &letter(10)),
            Err(LayoutError::PageTooSmall {
                width: 0,
                height: 1
            })
        );
    }

    #[test]
    fn plan_rejects_bad_paper_and_long_side() {
        assert_eq!(
            plan(100, 100, &letter(1).paper(Paper::Custom(1.5))),
            Err(LayoutError::InvalidPaperRatio)
        );
        assert_eq!(
            plan(100, 100, &letter(1).long_side(0)),
            Err(LayoutError::ZeroLongSide)
        );
    }

    // ── TileGrid ────────────────────────────────────────────────────────

    #[test]
    fn grid_letter_scenario() {
        let g = TileGrid::new(2000, 1000, &letter(2)).unwrap();
        assert_eq!(g.rescale_factor, 2.0);
        assert_eq!(g.rescaled, Size::new(4000, 2000));
        assert_eq!(g.stride, Size::new(772, 1000));
        assert_eq!((g.rows, g.cols), (2, 6));
        assert_eq!(g.len(), 12);
        assert_eq!(g.page_size(), Size::new(806, 1044));
        assert_eq!(g.content_origin(), (17, 22));
    }

    #[test]
    fn grid_landscape_uses_short_side_stride() {
        let spec = letter(2).orientation(PageOrientation::Landscape);
        let g = TileGrid::new(2000, 1000, &spec).unwrap();
        assert_eq!(g.stride, Size::new(1000, 772));
        assert_eq!(g.rescaled, Size::new(3088, 1544));
        assert_eq!((g.rows, g.cols), (2, 4));
        assert_eq!(g.page_size(), Size::new(1044, 806));
    }

    #[test]
    fn grid_horizontal_split() {
        let spec = letter(2).split_axis(SplitAxis::Horizontal);
        let g = TileGrid::new(1000, 3000, &spec).unwrap();
        // 772 * 2 / 1000 = 1.544 → 1544 × 4632.
        assert_eq!(g.rescaled, Size::new(1544, 4632));
        assert_eq!((g.cols, g.rows), (2, 5));
    }

    #[test]
    fn grid_divided_axis_is_exact_multiple() {
        // 1000/3 is not representable; the divided extent must still be
        // exactly divisions * stride.
        let g = TileGrid::new(5, 3, &letter(1)).unwrap();
        assert_eq!(g.rescaled.height, 1000);
        let g = TileGrid::new(7, 999, &letter(7)).unwrap();
        assert_eq!(g.rescaled.height, 7000);
    }

    #[test]
    fn grid_tiles_row_major_and_clipped() {
        let g = TileGrid::new(2000, 1000, &letter(2)).unwrap();
        let tiles: Vec<Tile> = g.tiles().collect();
        assert_eq!(tiles.len(), 12);
        for (i, t) in tiles.iter().enumerate() {
            assert_eq!(t.index, i);
            assert_eq!(t.row as usize, i / 6);
            assert_eq!(t.col as usize, i % 6);
        }
        let last_in_row = tiles[5];
        assert_eq!(last_in_row.left(), 3860);
        assert_eq!(last_in_row.right(), 4000);
        assert_eq!(last_in_row.region.width, 140);
        assert_eq!(last_in_row.region.height, 1000);
        assert_eq!(tiles[11].bottom(), 2000);
        assert!(tiles.iter().all(|t| !t.is_blank()));
    }

    #[test]
    fn grid_exact_division_yields_blank_overflow() {
        // 965 * 2 = 1930 native → 3860 rescaled = 5 * 772 exactly.
        let g = TileGrid::new(1930, 1000, &letter(2)).unwrap();
        assert_eq!(g.rescaled.width, 3860);
        assert_eq!(g.cols, 6);
        let blank: Vec<Tile> = g.tiles().filter(Tile::is_blank).collect();
        assert_eq!(blank.len(), 2);
        assert!(blank.iter().all(|t| t.col == 5));
    }

    #[test]
    fn grid_rejects_degenerate_cross_axis() {
        // 1 px tall strip scaled by 772/5000: the cross axis truncates to 0.
        let spec = letter(1).split_axis(SplitAxis::Horizontal);
        assert_eq!(
            TileGrid::new(5000, 1, &spec),
            Err(LayoutError::ScaleOutOfRange)
        );
    }
}
