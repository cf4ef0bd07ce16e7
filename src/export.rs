//! Page export: rescale, crop, flatten, pad, write.
//!
//! [`export`] is the whole pipeline for one image. [`PageRenderer`] exposes the
//! in-memory half of it for callers that want pages without touching disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use log::{debug, info};

use crate::error::{Error, LayoutError};
use crate::geometry::Size;
use crate::plan::{PageSpec, Tile, TileGrid};

/// Page background and border color.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Resampling filter for the rescale step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Resampling {
    /// Nearest neighbor. Fast, aliases badly on downscale.
    Nearest,
    /// Bilinear.
    Triangle,
    /// Bicubic (Catmull-Rom).
    CatmullRom,
    /// Lanczos with window 3.
    #[default]
    Lanczos3,
}

impl Resampling {
    fn filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for Resampling {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "linear" | "bilinear" => Ok(Self::Triangle),
            "catmull-rom" | "catmullrom" | "cubic" => Ok(Self::CatmullRom),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            _ => Err("expected nearest|triangle|catmull-rom|lanczos3"),
        }
    }
}

/// What to do with overflow tiles that hold no image content.
///
/// When the cross axis divides exactly, the `+1` overflow row or column lies
/// entirely past the image edge and would print as a white sheet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlankPages {
    /// Emit them like any other page.
    #[default]
    Keep,
    /// Skip them. Page numbers stay contiguous.
    Prune,
}

/// Knobs that change output pixels but not the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExportOptions {
    /// Filter used for the single rescale.
    pub resampling: Resampling,
    /// Whether blank overflow tiles are written.
    pub blank_pages: BlankPages,
}

impl ExportOptions {
    pub fn resampling(mut self, resampling: Resampling) -> Self {
        self.resampling = resampling;
        self
    }

    pub fn blank_pages(mut self, blank_pages: BlankPages) -> Self {
        self.blank_pages = blank_pages;
        self
    }
}

/// Outcome of a successful [`export`].
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSummary {
    /// Files written, `0.png` through `pages_written - 1`.
    pub pages_written: usize,
    /// Blank overflow tiles skipped under [`BlankPages::Prune`].
    pub pages_pruned: usize,
    /// Dimensions shared by every written page.
    pub page_size: Size,
    /// The grid the pages were cut from.
    pub grid: TileGrid,
}

/// A decoded source raster.
pub struct SourceImage {
    image: DynamicImage,
    has_alpha: bool,
}

impl SourceImage {
    /// Read and decode an image file, sniffing the format from its contents.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let decode_err = |source: ImageError| Error::Decode {
            path: path.to_path_buf(),
            source,
        };
        let image = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| decode_err(ImageError::IoError(e)))?
            .decode()
            .map_err(decode_err)?;
        Ok(Self::from_image(image))
    }

    /// Wrap an already decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        let has_alpha = image.color().has_alpha();
        Self { image, has_alpha }
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }
}

/// One finished page.
#[derive(Clone, Debug)]
pub struct Page {
    /// Output number (`<number>.png`).
    pub number: usize,
    /// Grid cell the page was cut from.
    pub tile: Tile,
    /// Bordered page raster.
    pub image: RgbImage,
}

/// Turns tiles of one rescaled source into bordered page rasters.
pub struct PageRenderer {
    grid: TileGrid,
    rescaled: RgbImage,
    options: ExportOptions,
}

impl PageRenderer {
    /// Plan the grid for `source` and rescale it once.
    pub fn new(
        source: &SourceImage,
        spec: &PageSpec,
        options: ExportOptions,
    ) -> Result<Self, LayoutError> {
        let size = source.size();
        let grid = TileGrid::new(size.width, size.height, spec)?;
        Ok(Self::with_grid(source, grid, options))
    }

    /// Alpha is flattened over white before resampling, so the hidden color
    /// of transparent pixels never bleeds into opaque edges.
    fn with_grid(source: &SourceImage, grid: TileGrid, options: ExportOptions) -> Self {
        let target = grid.rescaled;
        let opaque = if source.has_alpha {
            flatten(&source.image.to_rgba8(), BACKGROUND)
        } else {
            source.image.to_rgb8()
        };
        let rescaled = if opaque.dimensions() == (target.width, target.height) {
            opaque
        } else {
            imageops::resize(&opaque, target.width, target.height, options.resampling.filter())
        };
        Self {
            grid,
            rescaled,
            options,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Render one tile onto a white, bordered page canvas.
    ///
    /// The crop is placed at the top-left of the content area, so a clipped
    /// trailing tile leaves white to its right and below.
    pub fn render(&self, tile: &Tile) -> RgbImage {
        let size = self.grid.page_size();
        let mut page = RgbImage::from_pixel(size.width, size.height, BACKGROUND);
        if tile.is_blank() {
            return page;
        }
        let r = tile.region;
        let content = imageops::crop_imm(&self.rescaled, r.x, r.y, r.width, r.height).to_image();
        let (x, y) = self.grid.content_origin();
        imageops::replace(&mut page, &content, i64::from(x), i64::from(y));
        page
    }

    /// Every page in row-major order, honoring the blank page policy.
    pub fn pages(&self) -> impl Iterator<Item = Page> + '_ {
        self.grid
            .tiles()
            .filter(move |tile| {
                let skip = self.options.blank_pages == BlankPages::Prune && tile.is_blank();
                if skip {
                    info!("skipping blank page at row {}, column {}", tile.row, tile.col);
                }
                !skip
            })
            .enumerate()
            .map(move |(number, tile)| Page {
                number,
                image: self.render(&tile),
                tile,
            })
    }
}

/// Composite `rgba` over an opaque `background`, using alpha as the mask.
pub fn flatten(rgba: &RgbaImage, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        Rgb([
            blend(r, background[0], a),
            blend(g, background[1], a),
            blend(b, background[2], a),
        ])
    })
}

fn blend(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    ((u32::from(fg) * a + u32::from(bg) * (255 - a) + 127) / 255) as u8
}

/// Render every page of `source` in memory, without touching disk.
pub fn render_pages(
    source: &SourceImage,
    spec: &PageSpec,
    options: ExportOptions,
) -> Result<(TileGrid, Vec<Page>), LayoutError> {
    let renderer = PageRenderer::new(source, spec, options)?;
    let pages = renderer.pages().collect();
    Ok((renderer.grid, pages))
}

/// Split `source_path` into pages under `output_dir` with default options.
pub fn export(
    source_path: impl AsRef<Path>,
    spec: &PageSpec,
    output_dir: impl AsRef<Path>,
) -> Result<ExportSummary, Error> {
    export_with(source_path, spec, output_dir, ExportOptions::default())
}

/// Split `source_path` into pages under `output_dir`.
///
/// Decoding fails before planning, planning fails before any file I/O. A
/// failed write stops the export; pages already written stay on disk.
pub fn export_with(
    source_path: impl AsRef<Path>,
    spec: &PageSpec,
    output_dir: impl AsRef<Path>,
    options: ExportOptions,
) -> Result<ExportSummary, Error> {
    let source_path = source_path.as_ref();
    let output_dir = output_dir.as_ref();

    let source = SourceImage::open(source_path)?;
    let size = source.size();
    let grid = TileGrid::new(size.width, size.height, spec)?;
    check_output_dir(output_dir)?;

    info!(
        "splitting {} ({}x{}{}) into {}x{} pages of {}x{}, rescale {:.4}",
        source_path.display(),
        size.width,
        size.height,
        if source.has_alpha() { ", alpha" } else { "" },
        grid.cols,
        grid.rows,
        grid.page_size().width,
        grid.page_size().height,
        grid.rescale_factor,
    );

    let renderer = PageRenderer::with_grid(&source, grid, options);
    let mut pages_written = 0;
    for page in renderer.pages() {
        let path = page_path(output_dir, page.number);
        page.image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| Error::write(&path, e))?;
        debug!("wrote {} (tile {:?})", path.display(), page.tile.region);
        pages_written += 1;
    }

    let summary = ExportSummary {
        pages_written,
        pages_pruned: renderer.grid.len() - pages_written,
        page_size: renderer.grid.page_size(),
        grid: renderer.grid,
    };
    info!(
        "wrote {} pages to {}",
        summary.pages_written,
        output_dir.display()
    );
    Ok(summary)
}

/// `<dir>/<number>.png`
pub fn page_path(dir: &Path, number: usize) -> PathBuf {
    dir.join(format!("{number}.png"))
}

fn check_output_dir(dir: &Path) -> Result<(), Error> {
    let meta = fs::metadata(dir).map_err(|e| Error::io(dir, e))?;
    if !meta.is_dir() {
        return Err(Error::io(
            dir,
            io::Error::new(io::ErrorKind::NotADirectory, "output path is not a directory"),
        ));
    }
    if meta.permissions().readonly() {
        return Err(Error::io(
            dir,
            io::Error::new(io::ErrorKind::PermissionDenied, "output directory is read-only"),
        ));
    }
    Ok(())
}
