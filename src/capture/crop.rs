//! Crop extraction: 1:1 copy of a sub-region of the source image

use std::fmt;

use image::RgbaImage;

use super::image::SourceImage;
use crate::domain::PixelRect;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CropError {
    /// The rectangle has no area
    EmptyRegion,
    /// The rectangle is not fully inside the source image
    OutOfBounds,
    /// The background task died
    Worker(String),
}

impl fmt::Display for CropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropError::EmptyRegion => f.write_str("crop region is empty"),
            CropError::OutOfBounds => f.write_str("crop region lies outside the image"),
            CropError::Worker(msg) => write!(f, "crop task failed: {msg}"),
        }
    }
}

impl std::error::Error for CropError {}

/// Copy the pixels inside `rect` into a new image
pub fn crop_pixels(source: &RgbaImage, rect: PixelRect) -> Result<RgbaImage, CropError> {
    if rect.width() <= 0 || rect.height() <= 0 {
        return Err(CropError::EmptyRegion);
    }
    let dims = rect.dimensions().ok_or(CropError::EmptyRegion)?;
    if rect.left < 0
        || rect.top < 0
        || rect.right as u32 > source.width()
        || rect.bottom as u32 > source.height()
    {
        return Err(CropError::OutOfBounds);
    }
    Ok(image::imageops::crop_imm(
        source,
        rect.left as u32,
        rect.top as u32,
        dims.width(),
        dims.height(),
    )
    .to_image())
}

/// Extract `rect` from `source` on a blocking worker
pub async fn extract(source: SourceImage, rect: PixelRect) -> Result<SourceImage, CropError> {
    let cropped = tokio::task::spawn_blocking(move || crop_pixels(source.rgba(), rect))
        .await
        .map_err(|err| CropError::Worker(err.to_string()))??;
    log::info!(
        "Cropped image to {}x{}",
        cropped.width(),
        cropped.height()
    );
    Ok(SourceImage::from_rgba(cropped))
}
