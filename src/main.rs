use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use env_logger::{Builder, Env};
use log::{error, info, warn};

use posterize::svg::{OverlayStyle, render_overlay_svg};
use posterize::{
    BlankPages, PREVIEW_HEIGHT, PageSpec, Resampling, Size, TileGrid, export_grid_lines,
    export_with, params, preview_size,
};

/// Split an image into printable poster pages.
#[derive(Parser, Debug)]
#[command(name = "posterize", version, about)]
struct Cli {
    /// Source image
    image: PathBuf,
    /// Existing directory to write 0.png, 1.png, ... into
    out_dir: PathBuf,
    /// Layout query string, e.g. "d=3&paper=a4&o=landscape&split=h&blank=prune"
    #[arg(default_value = "")]
    layout: String,
    /// Also write an SVG preview of the grid over the image
    #[arg(long)]
    preview: Option<PathBuf>,
    /// Height of the SVG preview in pixels
    #[arg(long, default_value_t = PREVIEW_HEIGHT)]
    preview_height: u32,
    /// Resampling filter: nearest, triangle, catmull-rom or lanczos3
    #[arg(long)]
    filter: Option<Resampling>,
    /// Log the page grid and write nothing
    #[arg(long)]
    dry_run: bool,
}

fn init_logger() {
    // RUST_LOG overrides, e.g. RUST_LOG=debug to log every page written.
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run(Cli::parse()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let parsed = params::parse(&cli.layout);
    for w in &parsed.warnings {
        warn!("layout: {w}");
    }
    if let Some(w) = parsed.invalid_values().next() {
        bail!("layout: {w}");
    }
    let spec = parsed.settings.page_spec().context("invalid layout")?;
    let mut options = parsed.settings.export_options();
    if let Some(filter) = cli.filter {
        options = options.resampling(filter);
    }

    if let Some(preview) = &cli.preview {
        let labels = options.blank_pages == BlankPages::Keep;
        write_preview(&cli.image, preview, cli.preview_height, &spec, labels)?;
    }

    if cli.dry_run {
        let native = dimensions(&cli.image)?;
        let grid = TileGrid::new(native.width, native.height, &spec)?;
        let blank = grid.tiles().filter(|t| t.is_blank()).count();
        info!(
            "{}x{} → rescale {:.4} → {}x{}; {} columns × {} rows of {}x{} pages ({} blank)",
            native.width,
            native.height,
            grid.rescale_factor,
            grid.rescaled.width,
            grid.rescaled.height,
            grid.cols,
            grid.rows,
            grid.page_size().width,
            grid.page_size().height,
            blank
        );
        return Ok(());
    }

    let summary = export_with(&cli.image, &spec, &cli.out_dir, options)?;
    if summary.pages_pruned > 0 {
        info!("pruned {} blank pages", summary.pages_pruned);
    }
    Ok(())
}

fn dimensions(path: &Path) -> Result<Size> {
    let (width, height) = image::image_dimensions(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    Ok(Size::new(width, height))
}

/// Write the grid as the exporter will cut it, over a linked copy of the image.
fn write_preview(
    image: &Path,
    out: &Path,
    height: u32,
    spec: &PageSpec,
    labels: bool,
) -> Result<()> {
    let native = dimensions(image)?;
    let display = preview_size(native, height)?;
    let lines = export_grid_lines(display, native, spec)?;
    let href = fs::canonicalize(image).unwrap_or_else(|_| image.to_path_buf());
    let style = OverlayStyle::new()
        .image(href.display().to_string())
        .labels(labels);
    fs::write(out, render_overlay_svg(display, &lines, &style))
        .with_context(|| format!("cannot write {}", out.display()))?;
    info!("wrote preview {}", out.display());
    Ok(())
}
