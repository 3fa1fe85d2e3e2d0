//! Image acquisition and extraction module
//!
//! This module consolidates:
//! - Source image type and decoding (image.rs)
//! - Crop extraction (crop.rs)
//! - PNG export (export.rs)

pub mod crop;
pub mod export;
pub mod image;
