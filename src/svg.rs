//! SVG preview of a sprite sheet plan.
//!
//! Draws the canvas, each row band, and every placement labeled with its id,
//! scaled to fit a fixed panel. Useful for checking a layout without
//! decoding or compositing any pixels.
//!
//! # Example
//!
//! ```
//! use zensprite::{Catalog, GridConfig, Source, svg::render_plan_svg};
//!
//! let catalog = Catalog::build(
//!     [Source::new("a.png", 64, 32), Source::new("b.png", 16, 16)],
//!     None,
//! )
//! .unwrap();
//! let plan = GridConfig::new().padding(4).plan(catalog.items()).unwrap();
//!
//! let svg = render_plan_svg(&plan);
//! assert!(svg.contains("84×32"));
//! ```

use crate::geometry::{Rect, Size};
use crate::grid::LayoutPlan;

/// Maximum pixel width of the drawn canvas.
const MAX_PANEL_W: f64 = 640.0;
/// Maximum pixel height of the drawn canvas.
const MAX_PANEL_H: f64 = 480.0;
/// Horizontal margin.
const MARGIN_X: f64 = 40.0;
/// Top margin.
const MARGIN_TOP: f64 = 30.0;
/// Height of the title text area above the canvas.
const LABEL_H: f64 = 22.0;
/// Placements drawn smaller than this (in either axis) get no id label.
const MIN_LABEL_PX: f64 = 18.0;

/// Render a complete SVG document for `plan`.
pub fn render_plan_svg(plan: &LayoutPlan) -> String {
    let canvas = plan.canvas();
    let (pw, ph, scale) = scale_to_fit(canvas);

    let total_w = pw.max(MAX_PANEL_W / 2.0) + 2.0 * MARGIN_X;
    let total_h = MARGIN_TOP + LABEL_H + ph + MARGIN_TOP;
    let origin_x = (total_w - pw) / 2.0;
    let origin_y = MARGIN_TOP + LABEL_H;

    let mut svg = String::with_capacity(2048 + plan.placements().len() * 256);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w.ceil() as u32,
        total_h.ceil() as u32,
        total_w,
        total_h
    ));
    svg.push('\n');

    // Light and dark palettes via prefers-color-scheme
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .id { font-size: 10px; fill: #fff; }
  .canvas { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .row { fill: none; stroke: #b07cc6; stroke-width: 1; stroke-dasharray: 4,2; }
  .sprite { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .canvas { fill: #2d2d2d; stroke: #555; }
    .row { stroke: #8a5aa0; }
    .sprite { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##,
    );

    let title = format!(
        "Canvas  {}×{}  ·  {} sprites in {} rows  ·  padding {}",
        canvas.width,
        canvas.height,
        plan.placements().len(),
        plan.rows().len(),
        plan.padding()
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        total_w / 2.0,
        MARGIN_TOP + 14.0,
        escape_xml(&title)
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="canvas"/>"#,
        origin_x, origin_y, pw, ph
    ));
    svg.push('\n');

    for row in plan.rows() {
        let band = Rect::new(0, row.y, row.width, row.height);
        push_rect(&mut svg, band, origin_x, origin_y, scale, "row");
    }

    for placement in plan.placements() {
        let r = placement.rect;
        push_rect(&mut svg, r, origin_x, origin_y, scale, "sprite");

        let w = r.width as f64 * scale;
        let h = r.height as f64 * scale;
        if w >= MIN_LABEL_PX && h >= MIN_LABEL_PX {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" class="id" text-anchor="middle">{}</text>"#,
                origin_x + r.x as f64 * scale + w / 2.0,
                origin_y + r.y as f64 * scale + h / 2.0 + 3.5,
                escape_xml(&placement.id)
            ));
            svg.push('\n');
        }
        // Geometry in a comment too, since small sprites get no label.
        svg.push_str(&format!(
            "<!-- {} ({}, {}) {}×{} -->\n",
            escape_xml(&placement.id).replace("--", "-\u{2010}"),
            r.x,
            r.y,
            r.width,
            r.height
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn push_rect(svg: &mut String, r: Rect, ox: f64, oy: f64, scale: f64, class: &str) {
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="{}"/>"#,
        ox + r.x as f64 * scale,
        oy + r.y as f64 * scale,
        r.width as f64 * scale,
        r.height as f64 * scale,
        class
    ));
    svg.push('\n');
}

/// Scale a Size to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
/// Never scales up.
fn scale_to_fit(size: Size) -> (f64, f64, f64) {
    let w = size.width as f64;
    let h = size.height as f64;
    if w == 0.0 || h == 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h).min(1.0);
    (w * scale, h * scale, scale)
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
