//! Configuration persistence for snapedit settings

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGB, 0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ShapeColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            255,
        ]
    }
}

impl Default for ShapeColor {
    fn default() -> Self {
        PALETTE[0]
    }
}

/// Annotation color swatches offered by the toolbar
pub const PALETTE: [ShapeColor; 12] = [
    ShapeColor::rgb(0.231, 0.510, 0.965), // accent blue
    ShapeColor::rgb(0.880, 0.320, 0.320), // hsl(0, 70%, 60%)
    ShapeColor::rgb(0.960, 0.708, 0.240), // hsl(39, 90%, 60%)
    ShapeColor::rgb(0.910, 0.790, 0.190), // hsl(50, 80%, 55%)
    ShapeColor::rgb(0.250, 0.750, 0.250), // hsl(120, 50%, 50%)
    ShapeColor::rgb(0.200, 0.800, 0.700), // hsl(170, 60%, 50%)
    ShapeColor::rgb(0.520, 0.520, 0.880), // hsl(240, 60%, 70%)
    ShapeColor::rgb(0.860, 0.440, 0.860), // hsl(300, 60%, 65%)
    ShapeColor::rgb(0.060, 0.090, 0.160), // foreground
    ShapeColor::rgb(0.500, 0.500, 0.500), // hsl(0, 0%, 50%)
    ShapeColor::rgb(0.900, 0.900, 0.900), // hsl(0, 0%, 90%)
    ShapeColor::rgb(0.320, 0.693, 0.880), // hsl(200, 70%, 60%)
];

/// Look up a palette swatch by index
pub fn swatch(index: usize) -> Option<ShapeColor> {
    PALETTE.get(index).copied()
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapEditConfig {
    /// Whether the onboarding notice has been dismissed
    #[serde(rename = "snapEditIntroShown", default)]
    pub intro_shown: bool,
    /// Palette index used for new annotations
    #[serde(default)]
    pub color_index: usize,
}

impl Default for SnapEditConfig {
    fn default() -> Self {
        Self {
            intro_shown: false,
            color_index: 0,
        }
    }
}

impl SnapEditConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "snapedit";

    /// Default location of the config file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("No config directory available, settings not saved");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&raw).context("Malformed config file")?;
        if swatch(config.color_index).is_none() {
            log::warn!(
                "Config color index {} out of range, resetting",
                config.color_index
            );
            config.color_index = 0;
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Color for new annotations
    pub fn color(&self) -> ShapeColor {
        swatch(self.color_index).unwrap_or_default()
    }
}
