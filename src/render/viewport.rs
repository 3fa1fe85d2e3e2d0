//! Mapping between screen coordinates and bitmap space
//!
//! The canvas is displayed aspect-fit ("contain") inside its on-screen box,
//! so the bitmap may be letterboxed horizontally or vertically.

use serde::{Deserialize, Serialize};

use crate::domain::Point;

/// On-screen box occupied by the canvas element
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    display: Option<DisplayBox>,
    bitmap_width: u32,
    bitmap_height: u32,
}

impl Viewport {
    pub fn new(display: DisplayBox, bitmap_width: u32, bitmap_height: u32) -> Self {
        Self {
            display: Some(display),
            bitmap_width,
            bitmap_height,
        }
    }

    pub fn set_display(&mut self, display: DisplayBox) {
        self.display = Some(display);
    }

    pub fn set_bitmap_size(&mut self, width: u32, height: u32) {
        self.bitmap_width = width;
        self.bitmap_height = height;
    }

    /// (scale, offset_x, offset_y) of the fitted bitmap inside the display box,
    /// or `None` when either side is degenerate and no mapping applies
    fn fit(&self) -> Option<(f32, f32, f32)> {
        let display = self.display?;
        if self.bitmap_width == 0
            || self.bitmap_height == 0
            || display.width <= 0.0
            || display.height <= 0.0
        {
            return None;
        }
        let bw = self.bitmap_width as f32;
        let bh = self.bitmap_height as f32;
        let scale = (display.width / bw).min(display.height / bh);
        let offset_x = display.left + (display.width - bw * scale) / 2.0;
        let offset_y = display.top + (display.height - bh * scale) / 2.0;
        Some((scale, offset_x, offset_y))
    }

    /// Screen point to bitmap space. Identity until a display box is known.
    pub fn to_bitmap(&self, screen: Point) -> Point {
        match self.fit() {
            Some((scale, ox, oy)) => Point::new((screen.x - ox) / scale, (screen.y - oy) / scale),
            None => screen,
        }
    }

    /// Bitmap point to screen coordinates
    pub fn to_screen(&self, bitmap: Point) -> Point {
        match self.fit() {
            Some((scale, ox, oy)) => Point::new(bitmap.x * scale + ox, bitmap.y * scale + oy),
            None => bitmap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_without_display() {
        let viewport = Viewport::default();
        assert_eq!(viewport.to_bitmap(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_pillarboxed_mapping() {
        // 200x100 bitmap in a 400x400 box at (10, 20): scale 2, letterbox 100px top
        let viewport = Viewport::new(
            DisplayBox {
                left: 10.0,
                top: 20.0,
                width: 400.0,
                height: 400.0,
            },
            200,
            100,
        );
        assert_eq!(viewport.to_bitmap(Point::new(10.0, 120.0)), Point::new(0.0, 0.0));
        assert_eq!(
            viewport.to_bitmap(Point::new(410.0, 320.0)),
            Point::new(200.0, 100.0)
        );
        let p = Point::new(37.0, 81.0);
        assert_eq!(viewport.to_bitmap(viewport.to_screen(p)), p);
    }

    #[test]
    fn test_downscaled_mapping() {
        // 1920x1080 shown at 960x540
        let viewport = Viewport::new(
            DisplayBox {
                left: 0.0,
                top: 0.0,
                width: 960.0,
                height: 540.0,
            },
            1920,
            1080,
        );
        assert_eq!(
            viewport.to_bitmap(Point::new(480.0, 270.0)),
            Point::new(960.0, 540.0)
        );
    }
}
