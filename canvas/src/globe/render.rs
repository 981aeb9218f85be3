//! Canvas 2D drawing for the globe.
//!
//! Geometry helpers (graticule, path splitting, dot culling) are pure so they
//! can be checked natively; [`draw`] only issues context calls.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geo::{FeatureCollection, Position};
use super::projection::Orthographic;
use super::state::GlobeCore;
use crate::consts::{
    ACCENT_RGB, GLOBE_DOT, GLOBE_DOT_RADIUS, GLOBE_GRATICULE, GLOBE_LAND_OUTLINE, GLOBE_OCEAN, GLOBE_RIM,
    GRATICULE_SAMPLE, GRATICULE_STEP, MARKER_COLOR, MARKER_CORE_RADIUS, MARKER_FONT_FAMILY, MARKER_FONT_SIZE,
    MARKER_GLOW_BLUR, MARKER_LABEL_BLUR, MARKER_LABEL_COLOR, MARKER_LABEL_OFFSET, MARKER_RINGS,
    MARKER_UNDERLINE_OFFSET,
};

/// A projected polyline in CSS pixels.
pub type ScreenPath = Vec<(f64, f64)>;

/// Evenly sampled points from `from` to `to` inclusive.
fn samples(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = ((to - from) / step).round() as usize;
    (0..=n).map(move |i| from + i as f64 * step)
}

/// Graticule lines: meridians every 10° and parallels every 10° up to ±80°.
/// Meridians on multiples of 90° run pole to pole; the rest stop at ±80°.
#[must_use]
pub fn graticule_lines() -> Vec<Vec<Position>> {
    let meridians = (-180..180).step_by(GRATICULE_STEP).map(|lng: i32| {
        let extent = if lng % 90 == 0 { 90.0 } else { 80.0 };
        samples(-extent, extent, GRATICULE_SAMPLE).map(|lat| Position::new(f64::from(lng), lat)).collect::<Vec<_>>()
    });
    let parallels = (-80..=80).step_by(GRATICULE_STEP).map(|lat: i32| {
        samples(-180.0, 180.0, GRATICULE_SAMPLE).map(|lng| Position::new(lng, f64::from(lat))).collect::<Vec<_>>()
    });
    meridians.chain(parallels).collect()
}

/// Project a polyline, breaking it wherever a vertex falls on the far side.
/// Runs shorter than two points are dropped.
#[must_use]
pub fn project_path(points: &[Position], projection: &Orthographic) -> Vec<ScreenPath> {
    let mut runs = Vec::new();
    let mut current: ScreenPath = Vec::new();
    for &point in points {
        match projection.project(point) {
            Some(xy) => current.push(xy),
            None => {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}

/// Projected outlines of every ring in the collection.
#[must_use]
pub fn land_paths(land: &FeatureCollection, projection: &Orthographic) -> Vec<ScreenPath> {
    land.features
        .iter()
        .filter_map(|f| f.geometry.as_ref())
        .flat_map(|g| g.rings())
        .flat_map(|ring| project_path(ring, projection))
        .collect()
}

/// Screen positions of the dots that face the viewer and land inside the surface.
#[must_use]
pub fn visible_dots(dots: &[Position], projection: &Orthographic, width: f64, height: f64) -> Vec<(f64, f64)> {
    dots.iter()
        .filter_map(|&dot| projection.project(dot))
        .filter(|&(x, y)| (0.0..=width).contains(&x) && (0.0..=height).contains(&y))
        .collect()
}

fn stroke_paths(ctx: &CanvasRenderingContext2d, paths: &[ScreenPath]) {
    ctx.begin_path();
    for path in paths {
        let mut points = path.iter();
        if let Some(&(x, y)) = points.next() {
            ctx.move_to(x, y);
        }
        for &(x, y) in points {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();
}

/// Draw one frame. The context transform is reset to `dpr` so all
/// coordinates are CSS pixels.
pub fn draw(ctx: &CanvasRenderingContext2d, core: &GlobeCore, dpr: f64, label: &str) -> Result<(), JsValue> {
    let (width, height) = core.size();
    let projection = core.projection();
    let zoom = core.zoom_factor();
    let (cx, cy) = projection.center;

    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, width, height);

    ctx.begin_path();
    ctx.arc(cx, cy, projection.scale, 0.0, TAU)?;
    ctx.set_fill_style_str(GLOBE_OCEAN);
    ctx.fill();
    ctx.set_stroke_style_str(GLOBE_RIM);
    ctx.set_line_width(1.5 * zoom);
    ctx.stroke();

    let Some(land) = core.land() else {
        return Ok(());
    };

    let graticule: Vec<ScreenPath> =
        graticule_lines().iter().flat_map(|line| project_path(line, &projection)).collect();
    ctx.set_stroke_style_str(GLOBE_GRATICULE);
    ctx.set_line_width(0.5 * zoom);
    ctx.set_global_alpha(0.4);
    stroke_paths(ctx, &graticule);
    ctx.set_global_alpha(1.0);

    ctx.set_stroke_style_str(GLOBE_LAND_OUTLINE);
    ctx.set_line_width(zoom);
    stroke_paths(ctx, &land_paths(land, &projection));

    let radius = GLOBE_DOT_RADIUS * zoom;
    ctx.begin_path();
    for (x, y) in visible_dots(core.dots(), &projection, width, height) {
        ctx.move_to(x + radius, y);
        ctx.arc(x, y, radius, 0.0, TAU)?;
    }
    ctx.set_fill_style_str(GLOBE_DOT);
    ctx.fill();

    if core.marker_visible() {
        if let Some(at) = projection.project(core.marker()) {
            draw_marker(ctx, at, zoom, label)?;
        }
    }
    Ok(())
}

fn draw_marker(ctx: &CanvasRenderingContext2d, (x, y): (f64, f64), zoom: f64, label: &str) -> Result<(), JsValue> {
    for (radius, alpha) in MARKER_RINGS {
        ctx.begin_path();
        ctx.arc(x, y, radius * zoom, 0.0, TAU)?;
        ctx.set_fill_style_str(&format!("rgba({ACCENT_RGB}, {alpha})"));
        ctx.fill();
    }

    ctx.begin_path();
    ctx.arc(x, y, MARKER_CORE_RADIUS * zoom, 0.0, TAU)?;
    ctx.set_fill_style_str(MARKER_COLOR);
    ctx.set_shadow_color(MARKER_COLOR);
    ctx.set_shadow_blur(MARKER_GLOW_BLUR);
    ctx.fill();
    ctx.set_shadow_blur(0.0);

    if label.is_empty() {
        return Ok(());
    }
    ctx.set_font(&format!("bold {}px {MARKER_FONT_FAMILY}", MARKER_FONT_SIZE * zoom));
    ctx.set_fill_style_str(MARKER_LABEL_COLOR);
    ctx.set_text_align("center");
    ctx.set_shadow_blur(MARKER_LABEL_BLUR);
    ctx.fill_text(label, x, y - MARKER_LABEL_OFFSET * zoom)?;
    ctx.set_shadow_blur(0.0);

    let half = ctx.measure_text(label)?.width() / 2.0;
    let underline = y - MARKER_UNDERLINE_OFFSET * zoom;
    ctx.begin_path();
    ctx.move_to(x - half, underline);
    ctx.line_to(x + half, underline);
    ctx.set_stroke_style_str(MARKER_COLOR);
    ctx.set_line_width(1.0);
    ctx.set_global_alpha(0.5);
    ctx.stroke();
    ctx.set_global_alpha(1.0);
    Ok(())
}
