//! Image rendering for annotations using tiny-skia
//!
//! These functions draw annotations and editor overlays onto an RgbaImage.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::RgbaImage;
use tiny_skia::{
    LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};

use super::geometry::{self, HIT_PADDING, LINE_WIDTH, arrow, overlay, text};
use crate::config::ShapeColor;
use crate::domain::{Annotation, CropRect, Shape};

/// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
const BEZIER_K: f32 = 0.552_284_8;

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let Some(size) = tiny_skia::IntSize::from_wh(img.width(), img.height()) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    img.copy_from_slice(pixmap.data());
}

fn solid(color: ShapeColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn round_stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

fn dashed_stroke(width: f32) -> Stroke {
    Stroke {
        width,
        dash: StrokeDash::new(overlay::DASH.to_vec(), 0.0),
        ..Default::default()
    }
}

fn build_rect_path(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(min_x, min_y);
    pb.line_to(max_x, min_y);
    pb.line_to(max_x, max_y);
    pb.line_to(min_x, max_y);
    pb.close();
    pb.finish()
}

/// Build a circle path using cubic bezier curves
fn build_circle_path(cx: f32, cy: f32, r: f32) -> Option<Path> {
    let k = r * BEZIER_K;

    let mut pb = PathBuilder::new();

    pb.move_to(cx, cy - r);
    pb.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    pb.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    pb.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    pb.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);

    pb.close();
    pb.finish()
}

/// Build an arrow path as stroked lines (shaft + two angled barbs)
fn build_arrow_path(
    start_x: f32,
    start_y: f32,
    end_x: f32,
    end_y: f32,
    head_length: f32,
) -> Option<Path> {
    let (barb1_x, barb1_y, barb2_x, barb2_y) =
        arrow::head_points(start_x, start_y, end_x, end_y, head_length);

    let mut pb = PathBuilder::new();

    pb.move_to(start_x, start_y);
    pb.line_to(end_x, end_y);
    pb.line_to(barb1_x, barb1_y);

    pb.move_to(end_x, end_y);
    pb.line_to(barb2_x, barb2_y);

    pb.finish()
}

/// Fill the bitmap glyphs of `s` with the top-left of the line box at (x, y)
fn fill_text(pixmap: &mut Pixmap, s: &str, x: f32, y: f32, paint: &Paint) {
    let scale = text::glyph_scale();
    let cell = scale as f32;
    // Center the glyph cell vertically in the line box
    let top = y + (text::FONT_SIZE * text::LINE_HEIGHT - text::FONT_SIZE) / 2.0;

    let mut pb = PathBuilder::new();
    for (i, ch) in s.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let glyph_x = x + i as f32 * text::advance();
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..text::GLYPH_CELL {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                if let Some(rect) = tiny_skia::Rect::from_xywh(
                    glyph_x + col as f32 * cell,
                    top + row as f32 * cell,
                    cell,
                    cell,
                ) {
                    pb.push_rect(rect);
                }
            }
        }
    }
    if let Some(path) = pb.finish() {
        pixmap.fill_path(
            &path,
            paint,
            tiny_skia::FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

/// Draw one shape. `head_scale` shrinks the arrowhead for previews.
fn draw_shape(pixmap: &mut Pixmap, shape: &Shape, color: ShapeColor, head_scale: f32) {
    let paint = solid(color);
    let stroke = round_stroke(LINE_WIDTH);

    match shape {
        Shape::Rectangle { .. } => {
            let (min_x, min_y, max_x, max_y) = geometry::shape_bounds(shape);
            if let Some(path) = build_rect_path(min_x, min_y, max_x, max_y) {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
        Shape::Circle { center, radius } => {
            if *radius <= 0.0 {
                return;
            }
            if let Some(path) = build_circle_path(center.x, center.y, *radius) {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
        Shape::Arrow { tail, head } => {
            if let Some(path) = build_arrow_path(
                tail.x,
                tail.y,
                head.x,
                head.y,
                arrow::HEAD_LENGTH * head_scale,
            ) {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
        Shape::Text { anchor, text: s } => {
            let mut paint = paint;
            paint.anti_alias = false;
            fill_text(pixmap, s, anchor.x, anchor.y, &paint);
        }
    }
}

/// Draw committed annotations in insertion order (later on top)
pub fn draw_annotations_in_order(img: &mut RgbaImage, annotations: &[Annotation]) {
    if annotations.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        for annotation in annotations {
            draw_shape(pixmap, &annotation.shape, annotation.color, 1.0);
        }
    });
}

/// Draw the in-progress shape
pub fn draw_preview(img: &mut RgbaImage, shape: &Shape, color: ShapeColor) {
    with_pixmap(img, |pixmap| {
        draw_shape(pixmap, shape, color, arrow::PREVIEW_HEAD_SCALE);
    });
}

/// Draw the dashed crop marquee
pub fn draw_marquee(img: &mut RgbaImage, rect: &CropRect) {
    if rect.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        let [r, g, b, a] = overlay::PRIMARY_RGBA;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        if let Some(path) =
            build_rect_path(rect.x, rect.y, rect.x + rect.width, rect.y + rect.height)
        {
            let stroke = dashed_stroke(overlay::MARQUEE_WIDTH);
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    });
}

/// Draw a dashed outline around the selected annotation
pub fn draw_selection(img: &mut RgbaImage, annotation: &Annotation) {
    with_pixmap(img, |pixmap| {
        let [r, g, b, a] = overlay::PRIMARY_RGBA;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let (min_x, min_y, max_x, max_y) = geometry::shape_bounds(&annotation.shape);
        let pad = HIT_PADDING;
        if let Some(path) = build_rect_path(min_x - pad, min_y - pad, max_x + pad, max_y + pad) {
            let stroke = dashed_stroke(overlay::SELECTION_WIDTH);
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    });
}

/// Base image with committed annotations, as exported
pub fn render_annotated(base: &RgbaImage, annotations: &[Annotation]) -> RgbaImage {
    let mut img = base.clone();
    draw_annotations_in_order(&mut img, annotations);
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnnotationId, Point};

    fn white(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]))
    }

    fn is_white(img: &RgbaImage, x: u32, y: u32) -> bool {
        img.get_pixel(x, y) == &image::Rgba([255, 255, 255, 255])
    }

    fn ann(shape: Shape) -> Annotation {
        Annotation {
            id: AnnotationId::from("1"),
            shape,
            color: ShapeColor::rgb(1.0, 0.0, 0.0),
        }
    }

    #[test]
    fn test_rectangle_strokes_outline_only() {
        let base = white(100, 100);
        let out = render_annotated(
            &base,
            &[ann(Shape::Rectangle {
                origin: Point::new(20.0, 20.0),
                width: 40.0,
                height: 40.0,
            })],
        );
        assert!(!is_white(&out, 20, 40));
        assert!(is_white(&out, 40, 40));
        assert!(is_white(&out, 5, 5));
    }

    #[test]
    fn test_circle_strokes_ring() {
        let out = render_annotated(
            &white(100, 100),
            &[ann(Shape::Circle {
                center: Point::new(50.0, 50.0),
                radius: 20.0,
            })],
        );
        assert!(!is_white(&out, 70, 50));
        assert!(is_white(&out, 50, 50));
    }

    #[test]
    fn test_text_fills_glyph_pixels() {
        let out = render_annotated(
            &white(100, 40),
            &[ann(Shape::Text {
                anchor: Point::new(0.0, 0.0),
                text: "#".to_string(),
            })],
        );
        let touched = (0..16)
            .flat_map(|x| (0..20).map(move |y| (x, y)))
            .filter(|&(x, y)| !is_white(&out, x, y))
            .count();
        assert!(touched > 0);
        assert!(is_white(&out, 60, 10));
    }

    #[test]
    fn test_marquee_is_dashed() {
        let mut img = white(100, 100);
        draw_marquee(
            &mut img,
            &CropRect {
                x: 10.0,
                y: 10.0,
                width: 80.0,
                height: 80.0,
            },
        );
        let on_edge: Vec<bool> = (10..90).map(|x| !is_white(&img, x, 10)).collect();
        assert!(on_edge.iter().any(|&p| p));
        assert!(on_edge.iter().any(|&p| !p));
    }

    #[test]
    fn test_render_does_not_touch_base() {
        let base = white(10, 10);
        let _ = render_annotated(
            &base,
            &[ann(Shape::Arrow {
                tail: Point::new(0.0, 0.0),
                head: Point::new(9.0, 9.0),
            })],
        );
        assert!(base.pixels().all(|p| p == &image::Rgba([255, 255, 255, 255])));
    }
}
