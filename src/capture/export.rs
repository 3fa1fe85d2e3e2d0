//! PNG export of the rendered image

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

/// File name used for downloads
pub const DOWNLOAD_FILE_NAME: &str = "snapedit-screenshot.png";

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, image).context("Failed to encode PNG")?;
    Ok(buffer)
}

/// Write already-encoded PNG bytes to `path`
pub fn save_png(png: &[u8], path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, png).with_context(|| format!("Failed to write {}", path.display()))
}

/// Where downloads land: the Pictures folder, else home, else the working dir
pub fn download_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
