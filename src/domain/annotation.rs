//! Annotation types for drawing on screenshots
//!
//! All annotation types store coordinates in bitmap space of the current
//! source image.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use crate::config::ShapeColor;

/// Unique, creation-ordered annotation identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(String);

impl AnnotationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnotationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Hands out timestamp-derived ids that never repeat within a session,
/// even when two annotations land in the same millisecond.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn next_id(&mut self) -> AnnotationId {
        let now = chrono::Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        AnnotationId(self.last.to_string())
    }
}

/// Geometry of a committed annotation.
///
/// Each variant carries exactly the fields its kind needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Outline rectangle; `origin` is the top-left corner, size is non-negative
    Rectangle {
        origin: Point,
        width: f32,
        height: f32,
    },
    /// Outline circle around `center`
    Circle { center: Point, radius: f32 },
    /// Line from `tail` to `head` with an arrowhead at `head`
    Arrow { tail: Point, head: Point },
    /// Text whose top-left corner sits at `anchor`
    Text { anchor: Point, text: String },
}

/// Annotation kind, without geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationKind {
    Rectangle,
    Circle,
    Arrow,
    Text,
}

impl Shape {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Shape::Rectangle { .. } => AnnotationKind::Rectangle,
            Shape::Circle { .. } => AnnotationKind::Circle,
            Shape::Arrow { .. } => AnnotationKind::Arrow,
            Shape::Text { .. } => AnnotationKind::Text,
        }
    }

    /// The reference point of the shape (top-left, center, tail or text origin)
    pub fn anchor(&self) -> Point {
        match self {
            Shape::Rectangle { origin, .. } => *origin,
            Shape::Circle { center, .. } => *center,
            Shape::Arrow { tail, .. } => *tail,
            Shape::Text { anchor, .. } => *anchor,
        }
    }

    /// Arrow tip, for arrows only
    pub fn head(&self) -> Option<Point> {
        match self {
            Shape::Arrow { head, .. } => Some(*head),
            _ => None,
        }
    }

    /// Move the shape so its anchor sits at `anchor`.
    ///
    /// Arrows keep the vector between tail and head.
    pub fn set_anchor(&mut self, anchor: Point) {
        match self {
            Shape::Rectangle { origin, .. } => *origin = anchor,
            Shape::Circle { center, .. } => *center = anchor,
            Shape::Arrow { tail, head } => {
                let (dx, dy) = tail.delta_to(*head);
                *tail = anchor;
                *head = anchor.translate(dx, dy);
            }
            Shape::Text { anchor: a, .. } => *a = anchor,
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        let anchor = self.anchor().translate(dx, dy);
        self.set_anchor(anchor);
    }
}

/// One drawn object on the image
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub shape: Shape,
    pub color: ShapeColor,
}

impl Annotation {
    pub fn kind(&self) -> AnnotationKind {
        self.shape.kind()
    }

    pub fn anchor(&self) -> Point {
        self.shape.anchor()
    }
}
