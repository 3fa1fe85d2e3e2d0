//! Shared geometry calculations for annotations
//!
//! This module contains constants and math shared between
//! hit-testing and image rendering (tiny-skia).

use crate::domain::{Point, Shape};

/// Stroke width of committed shapes in bitmap pixels
pub const LINE_WIDTH: f32 = 3.0;

/// Pointer tolerance around a shape's outline for hit-testing
pub const HIT_PADDING: f32 = 5.0;

/// Shapes whose size is at or below this are treated as accidental clicks
pub const MIN_SHAPE_SIZE: f32 = LINE_WIDTH;

/// Arrow geometry constants
pub mod arrow {
    /// Arrowhead barb length in bitmap pixels
    pub const HEAD_LENGTH: f32 = 10.0;
    /// Arrowhead scale used for the in-progress preview
    pub const PREVIEW_HEAD_SCALE: f32 = 0.8;
    /// Barb angle from the shaft in radians (30 degrees)
    pub const HEAD_ANGLE: f32 = std::f32::consts::FRAC_PI_6;

    /// Calculate arrow head barb endpoints given tail, tip, and barb length
    /// Returns (barb1_x, barb1_y, barb2_x, barb2_y)
    pub fn head_points(
        start_x: f32,
        start_y: f32,
        end_x: f32,
        end_y: f32,
        head_length: f32,
    ) -> (f32, f32, f32, f32) {
        let angle = (end_y - start_y).atan2(end_x - start_x);
        let barb1_x = end_x - head_length * (angle - HEAD_ANGLE).cos();
        let barb1_y = end_y - head_length * (angle - HEAD_ANGLE).sin();
        let barb2_x = end_x - head_length * (angle + HEAD_ANGLE).cos();
        let barb2_y = end_y - head_length * (angle + HEAD_ANGLE).sin();
        (barb1_x, barb1_y, barb2_x, barb2_y)
    }
}

/// Text layout constants and measurement
pub mod text {
    /// Font size in bitmap pixels
    pub const FONT_SIZE: f32 = 16.0;
    /// Line box height as a multiple of the font size
    pub const LINE_HEIGHT: f32 = 1.2;
    /// Native glyph cell size of the bitmap font
    pub const GLYPH_CELL: u32 = 8;

    /// Integer upscale from the glyph cell to `FONT_SIZE`
    pub fn glyph_scale() -> u32 {
        ((FONT_SIZE / GLYPH_CELL as f32).round() as u32).max(1)
    }

    /// Advance width of one character
    pub fn advance() -> f32 {
        (GLYPH_CELL * glyph_scale()) as f32
    }

    /// Measured (width, height) of a single line of text
    pub fn measure(text: &str) -> (f32, f32) {
        let width = text.chars().count() as f32 * advance();
        (width, FONT_SIZE * LINE_HEIGHT)
    }
}

/// Overlay styling (crop marquee and selection outline)
pub mod overlay {
    /// Marquee stroke width
    pub const MARQUEE_WIDTH: f32 = 2.0;
    /// Dash pattern: on, off
    pub const DASH: [f32; 2] = [6.0, 6.0];
    /// Selection outline stroke width
    pub const SELECTION_WIDTH: f32 = 1.5;
    /// Primary color with 0.8 opacity
    pub const PRIMARY_RGBA: [u8; 4] = [59, 130, 246, 204];
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

/// Axis-aligned bounds of a shape's visible outline: (min_x, min_y, max_x, max_y)
pub fn shape_bounds(shape: &Shape) -> (f32, f32, f32, f32) {
    match shape {
        Shape::Rectangle {
            origin,
            width,
            height,
        } => normalize_rect(origin.x, origin.y, origin.x + width, origin.y + height),
        Shape::Circle { center, radius } => (
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        ),
        Shape::Arrow { tail, head } => normalize_rect(tail.x, tail.y, head.x, head.y),
        Shape::Text { anchor, text } => {
            let (w, h) = text::measure(text);
            (anchor.x, anchor.y, anchor.x + w, anchor.y + h)
        }
    }
}

/// Distance from `p` to the segment `a`-`b`
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = a.delta_to(b);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}
