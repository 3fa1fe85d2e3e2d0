//! Rendering module for the annotation canvas
//!
//! This module consolidates:
//! - Shared geometry constants and helpers (geometry.rs)
//! - tiny-skia drawing of annotations and overlays (image.rs)
//! - The redraw surface abstraction (surface.rs)
//! - Screen to bitmap coordinate mapping (viewport.rs)

pub mod geometry;
pub mod image;
pub mod surface;
pub mod viewport;
