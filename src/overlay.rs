//! Preview grid projection.
//!
//! Maps the planner's strides onto the coordinates of an image as shown on
//! screen, so a preview can draw dashed lines where pages will be cut.
//! Everything is recomputed per call; it is a handful of multiplications.

use crate::error::LayoutError;
use crate::geometry::{Size, trunc_px};
use crate::plan::{PageSpec, TileGrid, plan};

/// Height the interactive preview scales images to.
pub const PREVIEW_HEIGHT: u32 = 500;

/// Internal grid line offsets, in display pixels.
///
/// The outer image boundary is never a break; an image covered by a single
/// page has no lines at all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLines {
    /// Offsets of vertical lines, left to right.
    pub x: Vec<f64>,
    /// Offsets of horizontal lines, top to bottom.
    pub y: Vec<f64>,
    /// Page columns in the grid, including an overflow column that lies
    /// entirely past the image edge and so has no line.
    pub cols: u32,
    /// Page rows in the grid, counted the same way as `cols`.
    pub rows: u32,
}

/// One visible grid cell in display coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    /// Output page number: `row * cols + col`.
    pub index: usize,
    /// Column, counted from the left.
    pub col: u32,
    /// Row, counted from the top.
    pub row: u32,
    /// Horizontal extent `(left, right)`.
    pub x: (f64, f64),
    /// Vertical extent `(top, bottom)`.
    pub y: (f64, f64),
}

impl Cell {
    /// Center point `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        ((self.x.0 + self.x.1) / 2.0, (self.y.0 + self.y.1) / 2.0)
    }
}

impl GridLines {
    /// Cells covering a `width × height` display, row-major, numbered like
    /// the pages they become. Overflow cells past the image edge are not
    /// visible and are skipped; their numbers are not reused.
    pub fn cells(&self, width: f64, height: f64) -> Vec<Cell> {
        let columns = self.column_spans(width);
        let stride = (self.cols as usize).max(columns.len());
        let mut cells = Vec::with_capacity(columns.len() * (self.y.len() + 1));
        for (row, y) in self.row_spans(height).into_iter().enumerate() {
            for (col, &x) in columns.iter().enumerate() {
                cells.push(Cell {
                    index: row * stride + col,
                    col: col as u32,
                    row: row as u32,
                    x,
                    y,
                });
            }
        }
        cells
    }

    /// Cell spans along x, including both outer edges: `[0, x.., width]`.
    pub fn column_spans(&self, width: f64) -> Vec<(f64, f64)> {
        spans(&self.x, width)
    }

    /// Cell spans along y, including both outer edges: `[0, y.., height]`.
    pub fn row_spans(&self, height: f64) -> Vec<(f64, f64)> {
        spans(&self.y, height)
    }
}

/// Grid lines for a `display_width × display_height` preview, using the
/// planner's own formulas against display dimensions.
pub fn grid_lines(
    display_width: u32,
    display_height: u32,
    spec: &PageSpec,
) -> Result<GridLines, LayoutError> {
    let layout = plan(display_width, display_height, spec)?;
    Ok(GridLines {
        x: breaks(layout.page.width as f64, layout.cols, display_width as f64),
        y: breaks(layout.page.height as f64, layout.rows, display_height as f64),
        cols: layout.cols,
        rows: layout.rows,
    })
}

/// Grid lines at the exporter's actual crop boundaries, projected from
/// rescaled-image space onto a `display` sized preview of a `native` image.
///
/// Unlike [`grid_lines`] there is no integer truncation in display space,
/// so each line sits exactly where the corresponding crop edge falls.
pub fn export_grid_lines(
    display: Size,
    native: Size,
    spec: &PageSpec,
) -> Result<GridLines, LayoutError> {
    if display.is_empty() {
        return Err(LayoutError::ZeroSourceDimension);
    }
    let grid = TileGrid::new(native.width, native.height, spec)?;
    let sx = display.width as f64 / grid.rescaled.width as f64;
    let sy = display.height as f64 / grid.rescaled.height as f64;
    Ok(GridLines {
        x: breaks(grid.stride.width as f64, grid.cols, grid.rescaled.width as f64)
            .into_iter()
            .map(|v| v * sx)
            .collect(),
        y: breaks(grid.stride.height as f64, grid.rows, grid.rescaled.height as f64)
            .into_iter()
            .map(|v| v * sy)
            .collect(),
        cols: grid.cols,
        rows: grid.rows,
    })
}

/// Scale `native` to `height` display pixels, preserving aspect ratio.
/// The width is truncated.
pub fn preview_size(native: Size, height: u32) -> Result<Size, LayoutError> {
    if native.is_empty() || height == 0 {
        return Err(LayoutError::ZeroSourceDimension);
    }
    let width = trunc_px(native.width as f64 * height as f64 / native.height as f64)
        .filter(|&w| w > 0)
        .ok_or(LayoutError::ScaleOutOfRange)?;
    Ok(Size::new(width, height))
}

/// `k * stride` for `k` in `1..count`, stopping at the outer edge.
fn breaks(stride: f64, count: u32, extent: f64) -> Vec<f64> {
    (1..count)
        .map(|k| k as f64 * stride)
        .take_while(|&offset| offset < extent)
        .collect()
}

fn spans(breaks: &[f64], extent: f64) -> Vec<(f64, f64)> {
    let mut edges = Vec::with_capacity(breaks.len() + 2);
    edges.push(0.0);
    edges.extend_from_slice(breaks);
    edges.push(extent);
    edges.windows(2).map(|w| (w[0], w[1])).collect()
}
