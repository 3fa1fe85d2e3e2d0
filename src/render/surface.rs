//! Drawing surface the session redraws after every change

use image::RgbaImage;

use super::image::{draw_annotations_in_order, draw_marquee, draw_preview, draw_selection};
use crate::config::ShapeColor;
use crate::domain::{Annotation, CropRect, Shape};

/// Everything visible on the canvas at one moment
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub base: Option<&'a RgbaImage>,
    pub annotations: &'a [Annotation],
    /// In-progress shape and the color it will be committed with
    pub preview: Option<(&'a Shape, ShapeColor)>,
    pub marquee: Option<CropRect>,
    pub selection: Option<&'a Annotation>,
}

impl Scene<'_> {
    /// Composite the scene, bottom to top: base, annotations, preview,
    /// marquee, selection outline
    pub fn rasterize(&self) -> Option<RgbaImage> {
        let mut frame = self.base?.clone();
        draw_annotations_in_order(&mut frame, self.annotations);
        if let Some((shape, color)) = self.preview {
            draw_preview(&mut frame, shape, color);
        }
        if let Some(rect) = &self.marquee {
            draw_marquee(&mut frame, rect);
        }
        if let Some(selected) = self.selection {
            draw_selection(&mut frame, selected);
        }
        Some(frame)
    }
}

/// Something a scene can be drawn onto
pub trait RenderSurface {
    fn render(&mut self, scene: &Scene<'_>);

    /// Last rendered frame, `None` until an image is loaded
    fn frame(&self) -> Option<&RgbaImage>;
}

/// Offscreen surface backed by an RGBA buffer
#[derive(Debug, Default)]
pub struct PixmapSurface {
    frame: Option<RgbaImage>,
}

impl RenderSurface for PixmapSurface {
    fn render(&mut self, scene: &Scene<'_>) {
        self.frame = scene.rasterize();
    }

    fn frame(&self) -> Option<&RgbaImage> {
        self.frame.as_ref()
    }
}
