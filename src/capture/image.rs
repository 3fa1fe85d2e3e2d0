//! Source image type for captured or loaded screenshots

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;

/// Why an image could not be acquired
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureError {
    /// The user or the platform refused display capture
    PermissionDenied(String),
    /// Bytes were not a decodable image
    Decode(String),
    /// Any other capture failure
    Failed(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::PermissionDenied(msg) => write!(f, "capture permission denied: {msg}"),
            CaptureError::Decode(msg) => write!(f, "could not decode image: {msg}"),
            CaptureError::Failed(msg) => write!(f, "capture failed: {msg}"),
        }
    }
}

impl std::error::Error for CaptureError {}

/// A decoded raster the session annotates.
///
/// Pixel data is shared, so cloning is cheap.
#[derive(Clone)]
pub struct SourceImage {
    rgba: Arc<RgbaImage>,
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl SourceImage {
    pub fn from_rgba(rgba: RgbaImage) -> Self {
        Self {
            rgba: Arc::new(rgba),
        }
    }

    /// Decode an encoded image (PNG, JPEG, ...) into RGBA
    pub fn decode(bytes: &[u8]) -> Result<Self, CaptureError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|err| CaptureError::Decode(err.to_string()))?;
        let rgba = decoded.to_rgba8();
        log::debug!("Decoded image: {}x{} pixels", rgba.width(), rgba.height());
        Ok(Self::from_rgba(rgba))
    }

    /// Decode off the event loop
    pub async fn decode_async(bytes: Vec<u8>) -> Result<Self, CaptureError> {
        tokio::task::spawn_blocking(move || Self::decode(&bytes))
            .await
            .map_err(|err| CaptureError::Failed(err.to_string()))?
    }

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::decode(&bytes)?)
    }

    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }
}
