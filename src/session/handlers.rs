//! Session message handlers
//!
//! Tool selection, crop workflow, image ingestion, export and layout.
//! Pointer, text and edit messages live in `crate::annotations::handlers`.

use crate::annotations::handlers::{cancel_interaction, finish_interaction};
use crate::capture::crop::CropError;
use crate::capture::export::{self, DOWNLOAD_FILE_NAME};
use crate::capture::image::{CaptureError, SourceImage};
use crate::config::swatch;
use crate::domain::Tool;
use crate::render::image::render_annotated;
use crate::session::messages::{CropMsg, Effect, ExportMsg, ImageMsg, Notice, ToolMsg, ViewMsg};
use crate::session::state::{Interaction, SessionState};

// ============================================================================
// Tools
// ============================================================================

pub fn handle_tool_msg(state: &mut SessionState, msg: ToolMsg) -> Effect {
    match msg {
        ToolMsg::Toggle(tool) => {
            let next = (state.tool != Some(tool)).then_some(tool);
            set_tool(state, next);
            Effect::none()
        }
        ToolMsg::Clear => {
            set_tool(state, None);
            Effect::none()
        }
        ToolMsg::SetColor(index) => {
            let Some(color) = swatch(index) else {
                log::warn!("Ignoring unknown palette index {}", index);
                return Effect::none();
            };
            state.color = color;
            state.config.color_index = index;
            Effect::PersistConfig(state.config.clone())
        }
    }
}

/// Switch tools. The pending crop rectangle is kept so crop mode can be
/// resumed; selection and open text entry are dropped.
fn set_tool(state: &mut SessionState, next: Option<Tool>) {
    if state.tool == next {
        return;
    }
    cancel_interaction(state);
    state.store.select(None);
    state.text_request = None;
    log::debug!(
        "Tool changed: {} -> {}",
        state.tool.map_or("none", Tool::label),
        next.map_or("none", Tool::label)
    );
    state.tool = next;
}

// ============================================================================
// Crop
// ============================================================================

pub fn handle_crop_msg(state: &mut SessionState, msg: CropMsg) -> Effect {
    match msg {
        CropMsg::Confirm => confirm_crop(state),
        CropMsg::Cancel => {
            if matches!(state.interaction, Interaction::Cropping { .. }) {
                state.interaction = Interaction::Idle;
            }
            state.crop_rect = None;
            set_tool(state, None);
            Effect::none()
        }
        CropMsg::Extracted(result) => {
            state.crop_in_flight = false;
            match result {
                Ok(image) => {
                    let description = format!("Image cropped to {}x{}", image.width(), image.height());
                    state.replace_image(image);
                    Effect::Notify(Notice::success("Crop Successful", Some(&description)))
                }
                Err(err) => crop_failed(&err),
            }
        }
    }
}

fn confirm_crop(state: &mut SessionState) -> Effect {
    if state.crop_in_flight {
        log::debug!("Crop already in progress, ignoring confirm");
        return Effect::none();
    }
    finish_interaction(state);

    let Some(image) = state.image.clone() else {
        return Effect::none();
    };
    let marquee = state.visible_marquee().filter(|rect| !rect.is_empty());
    let Some(crop_rect) = marquee else {
        return Effect::Notify(Notice::info(
            "Nothing to Crop",
            "Drag over the image to choose a region first.",
        ));
    };
    let snapped = crop_rect.snap();
    if snapped.width() <= 0 || snapped.height() <= 0 {
        return crop_failed(&CropError::EmptyRegion);
    }
    let Some(rect) = crop_rect.to_pixel_rect(image.width(), image.height()) else {
        return crop_failed(&CropError::OutOfBounds);
    };

    log::debug!("Requesting crop of {:?}", rect);
    state.crop_in_flight = true;
    Effect::ExtractCrop {
        source: image,
        rect,
    }
}

fn crop_failed(err: &CropError) -> Effect {
    log::warn!("Crop failed: {}", err);
    Effect::Notify(Notice::error("Crop Failed", &err.to_string()))
}

// ============================================================================
// Image ingestion
// ============================================================================

pub fn handle_image_msg(state: &mut SessionState, msg: ImageMsg) -> Effect {
    match msg {
        ImageMsg::Captured(Ok(image)) => {
            state.replace_image(image);
            Effect::Notify(Notice::success("Screenshot Captured!", None))
        }
        ImageMsg::Captured(Err(err)) => capture_failed(&err),
        ImageMsg::FileDropped { mime, bytes } => {
            if !mime.starts_with("image/") {
                log::warn!("Rejected dropped file of type {}", mime);
                return Effect::Notify(Notice::error(
                    "Invalid File",
                    "Please drop an image file.",
                ));
            }
            Effect::DecodeImage(bytes)
        }
        ImageMsg::Decoded(Ok(image)) => {
            state.replace_image(image);
            Effect::Notify(Notice::success("Image Loaded", None))
        }
        ImageMsg::Decoded(Err(err)) => capture_failed(&err),
    }
}

fn capture_failed(err: &CaptureError) -> Effect {
    log::warn!("Image acquisition failed: {}", err);
    let notice = match err {
        CaptureError::PermissionDenied(_) => Notice::error(
            "Permission Denied",
            "Screen capture was blocked. Allow screen sharing and try again.",
        ),
        CaptureError::Decode(_) => Notice::error("Failed to Load Image", &err.to_string()),
        CaptureError::Failed(_) => Notice::error("Capture Failed", &err.to_string()),
    };
    Effect::Notify(notice)
}

// ============================================================================
// Export
// ============================================================================

pub fn handle_export_msg(state: &mut SessionState, msg: ExportMsg) -> Effect {
    let Some(image) = &state.image else {
        return Effect::Notify(match msg {
            ExportMsg::Download => {
                Notice::info("Nothing to Download", "Capture or load an image first.")
            }
            ExportMsg::CopyToClipboard => {
                Notice::info("Nothing to Copy", "Capture or load an image first.")
            }
        });
    };

    let png = match encode_annotated(image, state) {
        Ok(png) => png,
        Err(err) => {
            log::warn!("Export failed: {:?}", err);
            return Effect::Notify(Notice::error("Export Failed", &err.to_string()));
        }
    };

    match msg {
        ExportMsg::Download => {
            log::info!("Exporting {} bytes as {}", png.len(), DOWNLOAD_FILE_NAME);
            Effect::Download {
                file_name: DOWNLOAD_FILE_NAME,
                png,
            }
        }
        ExportMsg::CopyToClipboard => {
            log::info!("Copying {} bytes to clipboard", png.len());
            Effect::CopyToClipboard { png }
        }
    }
}

/// Base image plus committed annotations, without editor overlays
fn encode_annotated(image: &SourceImage, state: &SessionState) -> anyhow::Result<Vec<u8>> {
    let rendered = render_annotated(image.rgba(), state.store.annotations());
    export::encode_png(&rendered)
}

// ============================================================================
// Layout and onboarding
// ============================================================================

pub fn handle_view_msg(state: &mut SessionState, msg: ViewMsg) -> Effect {
    match msg {
        ViewMsg::Resized(display) => state.viewport.set_display(display),
    }
    Effect::none()
}

pub fn handle_dismiss_intro(state: &mut SessionState) -> Effect {
    if state.config.intro_shown {
        return Effect::none();
    }
    state.config.intro_shown = true;
    Effect::PersistConfig(state.config.clone())
}
