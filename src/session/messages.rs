//! Message types for an editing session
//!
//! This module contains:
//! - Msg enum with nested sub-enums for organized message handling
//! - Effect enum for work the host has to carry out
//! - Notice type for user-visible feedback

use crate::capture::crop::CropError;
use crate::capture::image::{CaptureError, SourceImage};
use crate::config::SnapEditConfig;
use crate::domain::{PixelRect, Point, Tool};
use crate::render::viewport::DisplayBox;

// ============================================================================
// Input Types
// ============================================================================

/// Pointer input in screen coordinates
#[derive(Debug, Clone)]
pub enum PointerMsg {
    Down(Point),
    Move(Point),
    Up(Point),
    /// Pointer left the canvas; ends the current gesture where it is
    Leave,
}

/// Tool selection and styling
#[derive(Debug, Clone)]
pub enum ToolMsg {
    /// Activate a tool, or deactivate it if already active
    Toggle(Tool),
    /// Deactivate whatever tool is active
    Clear,
    /// Use the palette swatch at this index for new annotations
    SetColor(usize),
}

/// Collection-level edits
#[derive(Debug, Clone)]
pub enum EditMsg {
    Undo,
    DeleteSelected,
    ClearAll,
}

/// Result of the text-entry side channel
#[derive(Debug, Clone)]
pub enum TextMsg {
    Confirm(String),
    Cancel,
}

/// Crop workflow
#[derive(Debug, Clone)]
pub enum CropMsg {
    /// Extract the pending marquee
    Confirm,
    /// Discard the pending marquee and leave crop mode
    Cancel,
    /// Extraction finished
    Extracted(Result<SourceImage, CropError>),
}

/// Image acquisition
#[derive(Debug, Clone)]
pub enum ImageMsg {
    /// Screen capture finished
    Captured(Result<SourceImage, CaptureError>),
    /// A file was dropped on the canvas
    FileDropped { mime: String, bytes: Vec<u8> },
    /// Dropped file finished decoding
    Decoded(Result<SourceImage, CaptureError>),
}

/// Export workflow
#[derive(Debug, Clone)]
pub enum ExportMsg {
    Download,
    CopyToClipboard,
}

/// Canvas layout changes
#[derive(Debug, Clone)]
pub enum ViewMsg {
    /// The canvas element now occupies this box on screen
    Resized(DisplayBox),
}

// ============================================================================
// Main Message Enum
// ============================================================================

/// Messages for editing session interactions
#[derive(Debug, Clone)]
pub enum Msg {
    Pointer(PointerMsg),
    Tool(ToolMsg),
    Edit(EditMsg),
    Text(TextMsg),
    Crop(CropMsg),
    Image(ImageMsg),
    Export(ExportMsg),
    View(ViewMsg),
    /// The onboarding notice was acknowledged
    DismissIntro,
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl Msg {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::Pointer(PointerMsg::Down(Point::new(x, y)))
    }
    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::Pointer(PointerMsg::Move(Point::new(x, y)))
    }
    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::Pointer(PointerMsg::Up(Point::new(x, y)))
    }
    pub fn tool(tool: Tool) -> Self {
        Self::Tool(ToolMsg::Toggle(tool))
    }
    pub fn undo() -> Self {
        Self::Edit(EditMsg::Undo)
    }
    pub fn delete_selected() -> Self {
        Self::Edit(EditMsg::DeleteSelected)
    }
    pub fn clear_all() -> Self {
        Self::Edit(EditMsg::ClearAll)
    }
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(TextMsg::Confirm(value.into()))
    }
    pub fn confirm_crop() -> Self {
        Self::Crop(CropMsg::Confirm)
    }
    pub fn cancel_crop() -> Self {
        Self::Crop(CropMsg::Cancel)
    }
    pub fn image_loaded(image: SourceImage) -> Self {
        Self::Image(ImageMsg::Decoded(Ok(image)))
    }
    pub fn download() -> Self {
        Self::Export(ExportMsg::Download)
    }
    pub fn copy_to_clipboard() -> Self {
        Self::Export(ExportMsg::CopyToClipboard)
    }
}

// ============================================================================
// Output Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Dismissible user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    fn new(kind: NoticeKind, title: &str, description: Option<&str>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    pub fn info(title: &str, description: &str) -> Self {
        Self::new(NoticeKind::Info, title, Some(description))
    }

    pub fn success(title: &str, description: Option<&str>) -> Self {
        Self::new(NoticeKind::Success, title, description)
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self::new(NoticeKind::Error, title, Some(description))
    }
}

/// Work the host performs after a message has been applied
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    Notify(Notice),
    /// Open a text entry at `screen`; answer with [`TextMsg`]
    RequestText { at: Point, screen: Point },
    /// Run `capture::crop::extract` and answer with [`CropMsg::Extracted`]
    ExtractCrop { source: SourceImage, rect: PixelRect },
    /// Decode dropped bytes and answer with [`ImageMsg::Decoded`]
    DecodeImage(Vec<u8>),
    /// Save the PNG under `file_name`
    Download {
        file_name: &'static str,
        png: Vec<u8>,
    },
    /// Write the PNG to the system clipboard
    CopyToClipboard { png: Vec<u8> },
    /// Persist the updated configuration
    PersistConfig(SnapEditConfig),
}

impl Effect {
    pub fn none() -> Self {
        Effect::None
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Effect::Notify(notice) => Some(notice),
            _ => None,
        }
    }
}
