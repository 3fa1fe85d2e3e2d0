//! Point-in-shape tests used by the select tool

use crate::domain::{Annotation, AnnotationId, Point, Shape};
use crate::render::geometry::{self, HIT_PADDING, LINE_WIDTH, text};

/// Whether `point` lies within `HIT_PADDING` of the shape's visible outline
pub fn hit(shape: &Shape, point: Point) -> bool {
    match shape {
        Shape::Rectangle { .. } => {
            let (min_x, min_y, max_x, max_y) = geometry::shape_bounds(shape);
            in_box(point, min_x, min_y, max_x, max_y, HIT_PADDING)
        }
        Shape::Circle { center, radius } => point.distance(*center) <= radius + HIT_PADDING,
        Shape::Arrow { tail, head } => {
            geometry::distance_to_segment(point, *tail, *head) <= LINE_WIDTH / 2.0 + HIT_PADDING
        }
        Shape::Text { anchor, text: s } => {
            let (w, h) = text::measure(s);
            in_box(point, anchor.x, anchor.y, anchor.x + w, anchor.y + h, HIT_PADDING)
        }
    }
}

fn in_box(p: Point, min_x: f32, min_y: f32, max_x: f32, max_y: f32, pad: f32) -> bool {
    p.x >= min_x - pad && p.x <= max_x + pad && p.y >= min_y - pad && p.y <= max_y + pad
}

/// Topmost annotation under `point`.
///
/// Later annotations are drawn on top, so the search runs back to front.
pub fn topmost_at(annotations: &[Annotation], point: Point) -> Option<&AnnotationId> {
    annotations
        .iter()
        .rev()
        .find(|a| hit(&a.shape, point))
        .map(|a| &a.id)
}
