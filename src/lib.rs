//! Split one image into a grid of printable pages for poster assembly.
//!
//! Pages are sized to a paper format, padded with a fixed white border, and
//! written as `0.png`, `1.png`, ... in row-major order. One axis of the image
//! is divided into an exact number of pages; the other gets as many as it
//! needs, the last one partially filled.
//!
//! # Modules
//!
//! - [`plan`]: Grid planning: rescale factor, page size, rows and columns
//! - [`orientation`]: Page orientation, split axis, paper ratios and borders
//! - [`export`]: Rescale, crop, flatten alpha, pad and write pages
//! - [`overlay`]: Grid lines in preview coordinates
//! - [`params`]: Query-string layout parameters
//! - [`svg`]: SVG rendering of the preview grid (feature `svg`)
//!
//! # Example
//!
//! ```no_run
//! use posterize::{PageSpec, Paper, PageOrientation, export};
//!
//! let spec = PageSpec::new(3)
//!     .paper(Paper::A4)
//!     .orientation(PageOrientation::Landscape);
//! let summary = export("mural.jpg", &spec, "pages/")?;
//! println!("{} pages of {:?}", summary.pages_written, summary.page_size);
//! # Ok::<(), posterize::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod geometry;
pub mod orientation;
pub mod overlay;
pub mod params;
pub mod plan;
#[cfg(feature = "svg")]
pub mod svg;

pub use error::{Error, LayoutError};
pub use export::{
    BlankPages, ExportOptions, ExportSummary, Page, PageRenderer, Resampling, SourceImage, export,
    export_with, render_pages,
};
pub use geometry::{Rect, Size};
pub use orientation::{PageOrientation, Paper, SplitAxis};
pub use overlay::{Cell, GridLines, PREVIEW_HEIGHT, export_grid_lines, grid_lines, preview_size};
pub use plan::{DEFAULT_LONG_SIDE, LayoutPlan, PageSpec, Tile, TileGrid, plan};
