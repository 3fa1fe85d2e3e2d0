//! Editing session management module
//!
//! This module contains:
//! - Session state (state.rs)
//! - Message, effect and notice types (messages.rs)
//! - Message handlers for tools, crop, images and export (handlers.rs)
//! - Keyboard shortcuts (shortcuts.rs)
//!
//! [`Session`] is the single controller: hosts feed it [`Msg`]s, carry out
//! the returned [`Effect`], and read the re-rendered frame.

pub mod handlers;
pub mod messages;
pub mod shortcuts;
pub mod state;

use image::RgbaImage;

use crate::annotations::handlers::{handle_edit_msg, handle_pointer_msg, handle_text_msg};
use crate::capture::image::SourceImage;
use crate::config::SnapEditConfig;
use crate::render::surface::{PixmapSurface, RenderSurface, Scene};
use messages::{Effect, Msg};
use shortcuts::{Key, Modifiers};
use state::SessionState;

pub struct Session<S: RenderSurface = PixmapSurface> {
    state: SessionState,
    surface: S,
}

impl Session {
    pub fn new(config: SnapEditConfig) -> Self {
        Self::with_surface(config, PixmapSurface::default())
    }
}

impl<S: RenderSurface> Session<S> {
    pub fn with_surface(config: SnapEditConfig, surface: S) -> Self {
        let mut session = Self {
            state: SessionState::new(config),
            surface,
        };
        session.redraw();
        session
    }

    /// Apply a message, redraw, and hand back the work left for the host
    pub fn update(&mut self, msg: Msg) -> Effect {
        let state = &mut self.state;
        let effect = match msg {
            Msg::Pointer(msg) => handle_pointer_msg(state, msg),
            Msg::Tool(msg) => handlers::handle_tool_msg(state, msg),
            Msg::Edit(msg) => handle_edit_msg(state, msg),
            Msg::Text(msg) => handle_text_msg(state, msg),
            Msg::Crop(msg) => handlers::handle_crop_msg(state, msg),
            Msg::Image(msg) => handlers::handle_image_msg(state, msg),
            Msg::Export(msg) => handlers::handle_export_msg(state, msg),
            Msg::View(msg) => handlers::handle_view_msg(state, msg),
            Msg::DismissIntro => handlers::handle_dismiss_intro(state),
        };
        self.redraw();
        effect
    }

    /// Translate a key press through the shortcut table and apply it
    pub fn key_event(&mut self, key: &Key, modifiers: Modifiers) -> Effect {
        match shortcuts::handle_key_event(&self.state, key, modifiers) {
            Some(msg) => self.update(msg),
            None => Effect::none(),
        }
    }

    fn redraw(&mut self) {
        let state = &self.state;
        let preview = state.preview();
        let scene = Scene {
            base: state.image.as_ref().map(SourceImage::rgba),
            annotations: state.store.annotations(),
            preview: preview.as_ref().map(|shape| (shape, state.color)),
            marquee: state.visible_marquee(),
            selection: state.store.selected_annotation(),
        };
        self.surface.render(&scene);
    }

    /// Read-only view of the session
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Most recent render, overlays included
    pub fn frame(&self) -> Option<&RgbaImage> {
        self.surface.frame()
    }

    /// Whether the onboarding notice should be shown
    pub fn needs_intro(&self) -> bool {
        !self.state.config.intro_shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::crop;
    use crate::capture::image::CaptureError;
    use crate::config::PALETTE;
    use crate::domain::{CropRect, Point, Shape, Tool};
    use crate::render::viewport::DisplayBox;
    use crate::session::messages::{
        CropMsg, ImageMsg, NoticeKind, PointerMsg, TextMsg, ToolMsg, ViewMsg,
    };

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([x as u8, y as u8, 128, 255])
        })
    }

    fn session_with(width: u32, height: u32) -> Session {
        let mut session = Session::new(SnapEditConfig::default());
        session.update(Msg::image_loaded(SourceImage::from_rgba(gradient(width, height))));
        session
    }

    fn drag(session: &mut Session, from: (f32, f32), to: (f32, f32)) {
        session.update(Msg::pointer_down(from.0, from.1));
        session.update(Msg::pointer_move(to.0, to.1));
        session.update(Msg::pointer_up(to.0, to.1));
    }

    #[test]
    fn test_frame_tracks_annotations_and_undo() {
        let mut session = session_with(100, 100);
        let base = session.frame().unwrap().clone();

        session.update(Msg::tool(Tool::Rectangle));
        drag(&mut session, (20.0, 20.0), (80.0, 80.0));
        assert_eq!(session.state().store.len(), 1);
        assert_ne!(session.frame().unwrap(), &base);

        let effect = session.update(Msg::undo());
        assert_eq!(effect.notice().unwrap().title, "Undo Successful");
        assert!(session.state().store.is_empty());
        assert_eq!(session.frame().unwrap(), &base);
    }

    #[test]
    fn test_clear_all_then_undo_restores() {
        let mut session = session_with(200, 200);
        session.update(Msg::tool(Tool::Arrow));
        drag(&mut session, (10.0, 10.0), (100.0, 100.0));
        session.update(Msg::tool(Tool::Circle));
        drag(&mut session, (50.0, 50.0), (90.0, 90.0));
        let before = session.state().store.snapshot();

        let effect = session.update(Msg::clear_all());
        assert_eq!(effect.notice().unwrap().title, "Canvas Cleared");
        assert!(session.state().store.is_empty());
        assert_eq!(session.state().tool, None);

        session.update(Msg::undo());
        assert_eq!(session.state().store.annotations(), before.as_slice());
    }

    #[tokio::test]
    async fn test_crop_round_trip() {
        let mut session = session_with(200, 200);
        let original = session.state().image.clone().unwrap();
        session.update(Msg::tool(Tool::Rectangle));
        drag(&mut session, (10.0, 10.0), (50.0, 50.0));

        session.update(Msg::tool(Tool::Crop));
        drag(&mut session, (20.0, 20.0), (70.0, 70.0));
        let Effect::ExtractCrop { source, rect } = session.update(Msg::confirm_crop()) else {
            panic!("expected crop request");
        };
        assert!(session.state().crop_in_flight);
        // second confirm while extracting is ignored
        assert!(matches!(session.update(Msg::confirm_crop()), Effect::None));

        let result = crop::extract(source, rect).await;
        let effect = session.update(Msg::Crop(CropMsg::Extracted(result)));
        assert_eq!(effect.notice().unwrap().title, "Crop Successful");

        let state = session.state();
        let cropped = state.image.as_ref().unwrap();
        assert_eq!((cropped.width(), cropped.height()), (50, 50));
        assert_eq!(
            cropped.rgba().get_pixel(0, 0),
            original.rgba().get_pixel(20, 20)
        );
        assert!(state.store.is_empty());
        assert_eq!(state.store.history_len(), 0);
        assert_eq!(state.crop_rect, None);
        assert_eq!(state.tool, None);
        assert!(!state.crop_in_flight);
    }

    #[test]
    fn test_failed_crop_keeps_state() {
        let mut session = session_with(100, 100);
        session.update(Msg::tool(Tool::Crop));
        drag(&mut session, (10.0, 10.0), (40.0, 40.0));
        assert!(matches!(
            session.update(Msg::confirm_crop()),
            Effect::ExtractCrop { .. }
        ));

        let effect = session.update(Msg::Crop(CropMsg::Extracted(Err(
            crop::CropError::Worker("boom".to_string()),
        ))));
        assert_eq!(effect.notice().unwrap().kind, NoticeKind::Error);
        let state = session.state();
        assert_eq!(state.image.as_ref().unwrap().width(), 100);
        assert!(state.crop_rect.is_some());
        assert!(!state.crop_in_flight);
    }

    #[test]
    fn test_crop_rect_survives_tool_switch() {
        let mut session = session_with(100, 100);
        session.update(Msg::tool(Tool::Crop));
        drag(&mut session, (10.0, 10.0), (60.0, 60.0));
        let rect = session.state().crop_rect;
        assert!(rect.is_some());
        assert_eq!(session.state().visible_marquee(), rect);

        session.update(Msg::tool(Tool::Rectangle));
        assert_eq!(session.state().crop_rect, rect);
        assert_eq!(session.state().visible_marquee(), None);

        session.update(Msg::tool(Tool::Crop));
        assert_eq!(session.state().visible_marquee(), rect);

        session.update(Msg::cancel_crop());
        assert_eq!(session.state().crop_rect, None);
        assert_eq!(session.state().tool, None);
    }

    #[test]
    fn test_confirm_without_marquee_notices() {
        let mut session = session_with(100, 100);
        session.update(Msg::tool(Tool::Crop));
        let effect = session.update(Msg::confirm_crop());
        assert_eq!(effect.notice().unwrap().title, "Nothing to Crop");
        assert!(!session.state().crop_in_flight);
    }

    #[test]
    fn test_tool_toggle_and_selection_reset() {
        let mut session = session_with(100, 100);
        session.update(Msg::tool(Tool::Rectangle));
        drag(&mut session, (10.0, 10.0), (60.0, 60.0));
        session.update(Msg::tool(Tool::Select));
        drag(&mut session, (10.0, 30.0), (10.0, 30.0));
        assert!(session.state().store.selected().is_some());

        session.update(Msg::tool(Tool::Select));
        assert_eq!(session.state().tool, None);
        assert_eq!(session.state().store.selected(), None);
    }

    #[test]
    fn test_set_color_applies_to_new_annotations() {
        let mut session = session_with(100, 100);
        let effect = session.update(Msg::Tool(ToolMsg::SetColor(3)));
        let Effect::PersistConfig(config) = effect else {
            panic!("expected config persistence");
        };
        assert_eq!(config.color_index, 3);

        session.update(Msg::tool(Tool::Arrow));
        drag(&mut session, (0.0, 0.0), (50.0, 50.0));
        assert_eq!(session.state().store.annotations()[0].color, PALETTE[3]);

        assert!(matches!(
            session.update(Msg::Tool(ToolMsg::SetColor(99))),
            Effect::None
        ));
        assert_eq!(session.state().color, PALETTE[3]);
    }

    #[test]
    fn test_export_requires_image() {
        let mut session = Session::new(SnapEditConfig::default());
        let effect = session.update(Msg::download());
        assert_eq!(effect.notice().unwrap().title, "Nothing to Download");
        let effect = session.update(Msg::copy_to_clipboard());
        assert_eq!(effect.notice().unwrap().title, "Nothing to Copy");
    }

    #[test]
    fn test_export_omits_overlays() {
        let mut session = session_with(60, 60);
        session.update(Msg::tool(Tool::Crop));
        drag(&mut session, (5.0, 5.0), (55.0, 55.0));

        let Effect::Download { file_name, png } = session.update(Msg::download()) else {
            panic!("expected download");
        };
        assert_eq!(file_name, "snapedit-screenshot.png");
        let exported = SourceImage::decode(&png).unwrap();
        assert_eq!(exported.rgba(), &gradient(60, 60));
        assert_ne!(session.frame().unwrap(), &gradient(60, 60));
    }

    #[test]
    fn test_dropped_files() {
        let mut session = Session::new(SnapEditConfig::default());
        let effect = session.update(Msg::Image(ImageMsg::FileDropped {
            mime: "text/plain".to_string(),
            bytes: b"hello".to_vec(),
        }));
        assert_eq!(effect.notice().unwrap().title, "Invalid File");
        assert!(session.state().image.is_none());

        let effect = session.update(Msg::Image(ImageMsg::FileDropped {
            mime: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }));
        assert!(matches!(effect, Effect::DecodeImage(bytes) if bytes == vec![1, 2, 3]));
    }

    #[test]
    fn test_capture_permission_denied_keeps_state() {
        let mut session = session_with(80, 80);
        session.update(Msg::tool(Tool::Rectangle));
        drag(&mut session, (10.0, 10.0), (60.0, 60.0));

        let effect = session.update(Msg::Image(ImageMsg::Captured(Err(
            CaptureError::PermissionDenied("NotAllowedError".to_string()),
        ))));
        let notice = effect.notice().unwrap();
        assert_eq!(notice.title, "Permission Denied");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(session.state().store.len(), 1);
        assert_eq!(session.state().image.as_ref().unwrap().width(), 80);
    }

    #[test]
    fn test_new_image_resets_session() {
        let mut session = session_with(80, 80);
        session.update(Msg::tool(Tool::Rectangle));
        drag(&mut session, (10.0, 10.0), (60.0, 60.0));

        let effect = session.update(Msg::Image(ImageMsg::Captured(Ok(
            SourceImage::from_rgba(gradient(30, 30)),
        ))));
        assert_eq!(effect.notice().unwrap().title, "Screenshot Captured!");
        assert!(session.state().store.is_empty());
        assert_eq!(session.state().store.history_len(), 0);
        assert_eq!(session.state().tool, None);
    }

    #[test]
    fn test_pointer_maps_through_viewport() {
        let mut session = session_with(200, 100);
        session.update(Msg::View(ViewMsg::Resized(DisplayBox {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 50.0,
        })));
        session.update(Msg::tool(Tool::Crop));
        drag(&mut session, (10.0, 10.0), (35.0, 35.0));
        assert_eq!(
            session.state().crop_rect,
            Some(CropRect {
                x: 20.0,
                y: 20.0,
                width: 50.0,
                height: 50.0,
            })
        );
    }

    #[test]
    fn test_text_without_image_is_requested() {
        let mut session = Session::new(SnapEditConfig::default());
        session.update(Msg::tool(Tool::Text));
        let effect = session.update(Msg::Pointer(PointerMsg::Down(Point::new(4.0, 4.0))));
        assert!(matches!(effect, Effect::RequestText { .. }));
        session.update(Msg::Text(TextMsg::Cancel));
        assert_eq!(session.state().tool, None);
    }

    #[test]
    fn test_text_annotation_renders() {
        let mut session = session_with(100, 40);
        session.update(Msg::tool(Tool::Text));
        session.update(Msg::pointer_down(2.0, 2.0));
        session.update(Msg::text("Hi"));
        assert!(matches!(
            session.state().store.annotations()[0].shape,
            Shape::Text { .. }
        ));
        assert_ne!(session.frame().unwrap(), &gradient(100, 40));
    }

    #[test]
    fn test_dismiss_intro_persists_once() {
        let mut session = Session::new(SnapEditConfig::default());
        assert!(session.needs_intro());
        let Effect::PersistConfig(config) = session.update(Msg::DismissIntro) else {
            panic!("expected config persistence");
        };
        assert!(config.intro_shown);
        assert!(!session.needs_intro());
        assert!(matches!(session.update(Msg::DismissIntro), Effect::None));
    }

    #[test]
    fn test_confirm_ignores_hidden_marquee() {
        let mut session = session_with(100, 100);
        session.update(Msg::tool(Tool::Crop));
        drag(&mut session, (10.0, 10.0), (60.0, 60.0));
        session.update(Msg::tool(Tool::Arrow));

        let effect = session.update(Msg::confirm_crop());
        assert_eq!(effect.notice().unwrap().title, "Nothing to Crop");
        assert!(!session.state().crop_in_flight);
        assert!(session.state().crop_rect.is_some());
    }

    #[test]
    fn test_sub_pixel_marquee_is_empty_region() {
        let mut session = session_with(100, 100);
        session.update(Msg::tool(Tool::Crop));
        drag(&mut session, (10.1, 10.0), (10.4, 60.0));
        assert!(!session.state().crop_rect.unwrap().is_empty());

        let effect = session.update(Msg::confirm_crop());
        let notice = effect.notice().unwrap();
        assert_eq!(notice.title, "Crop Failed");
        assert_eq!(
            notice.description.as_deref(),
            Some(crop::CropError::EmptyRegion.to_string().as_str())
        );
        assert!(!session.state().crop_in_flight);
    }
}
