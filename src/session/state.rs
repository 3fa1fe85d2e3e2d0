use crate::annotations::store::AnnotationStore;
use crate::capture::image::SourceImage;
use crate::config::{ShapeColor, SnapEditConfig};
use crate::domain::{
    Annotation, AnnotationId, AnnotationKind, CropRect, IdGenerator, Point, Shape, Tool,
};
use crate::render::geometry::{self, MIN_SHAPE_SIZE};
use crate::render::viewport::Viewport;

/// Shape being drawn, before it is committed.
///
/// Only the fields the kind needs exist; the start point lives in
/// [`Interaction::Drawing`].
#[derive(Clone, Debug, PartialEq)]
pub enum PendingShape {
    /// Raw deltas from the start point, may be negative
    Rectangle { width: f32, height: f32 },
    /// Defined by its diameter endpoints
    Circle { center: Point, radius: f32 },
    Arrow { head: Point },
}

impl PendingShape {
    pub fn seed(kind: AnnotationKind, start: Point) -> Option<Self> {
        match kind {
            AnnotationKind::Rectangle => Some(PendingShape::Rectangle {
                width: 0.0,
                height: 0.0,
            }),
            AnnotationKind::Circle => Some(PendingShape::Circle {
                center: start,
                radius: 0.0,
            }),
            AnnotationKind::Arrow => Some(PendingShape::Arrow { head: start }),
            AnnotationKind::Text => None,
        }
    }

    pub fn resize(&mut self, start: Point, current: Point) {
        match self {
            PendingShape::Rectangle { width, height } => {
                (*width, *height) = start.delta_to(current);
            }
            PendingShape::Circle { center, radius } => {
                *center = start.midpoint(current);
                *radius = start.distance(current) / 2.0;
            }
            PendingShape::Arrow { head } => *head = current,
        }
    }

    /// Shape as drawn so far, for the live preview
    pub fn preview(&self, start: Point) -> Shape {
        match self {
            PendingShape::Rectangle { width, height } => Shape::Rectangle {
                origin: start,
                width: *width,
                height: *height,
            },
            PendingShape::Circle { center, radius } => Shape::Circle {
                center: *center,
                radius: *radius,
            },
            PendingShape::Arrow { head } => Shape::Arrow {
                tail: start,
                head: *head,
            },
        }
    }

    /// Normalized final shape, or `None` when it is too small to keep
    pub fn finish(&self, start: Point) -> Option<Shape> {
        match self {
            PendingShape::Rectangle { width, height } => {
                let (min_x, min_y, max_x, max_y) = geometry::normalize_rect(
                    start.x,
                    start.y,
                    start.x + width,
                    start.y + height,
                );
                let (w, h) = (max_x - min_x, max_y - min_y);
                (w.min(h) > MIN_SHAPE_SIZE).then_some(Shape::Rectangle {
                    origin: Point::new(min_x, min_y),
                    width: w,
                    height: h,
                })
            }
            PendingShape::Circle { center, radius } => {
                (*radius * 2.0 > MIN_SHAPE_SIZE).then_some(Shape::Circle {
                    center: *center,
                    radius: *radius,
                })
            }
            PendingShape::Arrow { head } => {
                (start.distance(*head) > MIN_SHAPE_SIZE).then_some(Shape::Arrow {
                    tail: start,
                    head: *head,
                })
            }
        }
    }
}

/// What the pointer is currently doing
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    /// Building a new shape with a drawing tool
    Drawing { start: Point, pending: PendingShape },
    /// Dragging out the crop marquee
    Cropping { start: Point },
    /// Moving an existing annotation with the select tool
    Dragging {
        id: AnnotationId,
        start: Point,
        origin: Point,
        before: Vec<Annotation>,
    },
}

#[derive(Clone, Debug)]
pub struct SessionState {
    pub image: Option<SourceImage>,
    pub tool: Option<Tool>,
    pub color: ShapeColor,
    pub store: AnnotationStore,
    pub interaction: Interaction,
    /// Pending crop marquee; survives tool switches
    pub crop_rect: Option<CropRect>,
    /// A crop extraction is in flight
    pub crop_in_flight: bool,
    /// Anchor of an open text entry
    pub text_request: Option<Point>,
    pub viewport: Viewport,
    pub ids: IdGenerator,
    pub config: SnapEditConfig,
}

impl SessionState {
    pub fn new(config: SnapEditConfig) -> Self {
        Self {
            image: None,
            tool: None,
            color: config.color(),
            store: AnnotationStore::default(),
            interaction: Interaction::Idle,
            crop_rect: None,
            crop_in_flight: false,
            text_request: None,
            viewport: Viewport::default(),
            ids: IdGenerator::default(),
            config,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Swap in a new base image; annotations never carry over
    pub fn replace_image(&mut self, image: SourceImage) {
        log::info!("Loaded image {}x{}", image.width(), image.height());
        self.viewport.set_bitmap_size(image.width(), image.height());
        self.image = Some(image);
        self.store.reset();
        self.interaction = Interaction::Idle;
        self.crop_rect = None;
        self.crop_in_flight = false;
        self.text_request = None;
        self.tool = None;
    }

    /// Live preview of the shape being drawn
    pub fn preview(&self) -> Option<Shape> {
        match &self.interaction {
            Interaction::Drawing { start, pending } => Some(pending.preview(*start)),
            _ => None,
        }
    }

    /// Crop marquee to display, only while the crop tool is active
    pub fn visible_marquee(&self) -> Option<CropRect> {
        (self.tool == Some(Tool::Crop))
            .then_some(self.crop_rect)
            .flatten()
    }
}
