//! SVG rendering of the page grid over a preview.
//!
//! Draws the dashed cut lines a preview shows on top of the image, optionally
//! with the image itself linked underneath and each page's output number at
//! the center of its cell.
//!
//! # Example
//!
//! ```
//! use posterize::{PageSpec, Size, grid_lines};
//! use posterize::svg::{OverlayStyle, render_overlay_svg};
//!
//! let display = Size::new(1000, 500);
//! let lines = grid_lines(display.width, display.height, &PageSpec::new(2)).unwrap();
//! let svg = render_overlay_svg(display, &lines, &OverlayStyle::new().labels(true));
//! assert!(svg.contains(r#"stroke-dasharray="5,2.5""#));
//! ```

use crate::geometry::Size;
use crate::overlay::GridLines;

/// Font size of page number labels, in display pixels.
const LABEL_SIZE: f64 = 14.0;

/// What to draw besides the cut lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayStyle {
    /// Link to the previewed image, drawn stretched to the display size.
    pub image_href: Option<String>,
    /// Draw each page's output number at the center of its cell. Cells are
    /// numbered `row * cols + col`, matching the exported file names.
    pub labels: bool,
}

impl OverlayStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(mut self, href: impl Into<String>) -> Self {
        self.image_href = Some(href.into());
        self
    }

    pub fn labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }
}

/// Render a complete SVG document of `lines` over a `display` sized preview.
pub fn render_overlay_svg(display: Size, lines: &GridLines, style: &OverlayStyle) -> String {
    let w = display.width as f64;
    let h = display.height as f64;
    let mut svg = String::with_capacity(1024 + 96 * (lines.x.len() + lines.y.len()));

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        display.width, display.height, display.width, display.height
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  .frame { fill: none; stroke: #333; stroke-width: 1; }
  .cut { stroke: #d22; stroke-width: 1; }
  .page { font-family: "DejaVu Sans", sans-serif; font-weight: bold; fill: #d22; fill-opacity: 0.8; }
  @media (prefers-color-scheme: dark) {
    .frame { stroke: #ccc; }
  }
</style>
"##,
    );

    if let Some(href) = &style.image_href {
        let href = escape_xml(href);
        svg.push_str(&format!(
            r#"<image href="{href}" xlink:href="{href}" x="0" y="0" width="{w}" height="{h}" preserveAspectRatio="none"/>"#
        ));
        svg.push('\n');
    }

    svg.push_str(&format!(
        r#"<rect x="0.5" y="0.5" width="{:.1}" height="{:.1}" class="frame"/>"#,
        (w - 1.0).max(0.0),
        (h - 1.0).max(0.0)
    ));
    svg.push('\n');

    for &x in &lines.x {
        push_cut(&mut svg, x, 0.0, x, h);
    }
    for &y in &lines.y {
        push_cut(&mut svg, 0.0, y, w, y);
    }

    if style.labels {
        for cell in lines.cells(w, h) {
            let (cx, cy) = cell.center();
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" class="page" font-size="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                cx, cy, LABEL_SIZE, cell.index
            ));
            svg.push('\n');
        }
    }

    svg.push_str("</svg>\n");
    svg
}

fn push_cut(svg: &mut String, x1: f64, y1: f64, x2: f64, y2: f64) {
    svg.push_str(&format!(
        r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" class="cut" stroke-dasharray="5,2.5"/>"#
    ));
    svg.push('\n');
}

/// Escape special characters for XML text and attribute content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
