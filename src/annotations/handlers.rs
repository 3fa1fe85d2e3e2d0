//! Annotation message handlers
//!
//! Pointer-driven tool state machine plus text entry and collection edits.
//! Handlers mutate the session state and return the effect for the host.

use crate::annotations::hit_testing;
use crate::domain::{Annotation, CropRect, Point, Shape, Tool};
use crate::session::messages::{EditMsg, Effect, Notice, PointerMsg, TextMsg};
use crate::session::state::{Interaction, PendingShape, SessionState};

/// Handle a PointerMsg (screen coordinates)
pub fn handle_pointer_msg(state: &mut SessionState, msg: PointerMsg) -> Effect {
    match msg {
        PointerMsg::Down(screen) => pointer_down(state, screen),
        PointerMsg::Move(screen) => {
            let point = state.viewport.to_bitmap(screen);
            pointer_move(state, point);
            Effect::none()
        }
        PointerMsg::Up(screen) => {
            let point = state.viewport.to_bitmap(screen);
            pointer_move(state, point);
            finish_interaction(state);
            Effect::none()
        }
        PointerMsg::Leave => {
            finish_interaction(state);
            Effect::none()
        }
    }
}

// ============================================================================
// Pointer handlers
// ============================================================================

fn pointer_down(state: &mut SessionState, screen: Point) -> Effect {
    let Some(tool) = state.tool else {
        return Effect::none();
    };
    let point = state.viewport.to_bitmap(screen);

    if tool == Tool::Text {
        state.text_request = Some(point);
        return Effect::RequestText { at: point, screen };
    }
    if !state.has_image() || state.interaction != Interaction::Idle {
        return Effect::none();
    }

    match tool {
        Tool::Select => match hit_testing::topmost_at(state.store.annotations(), point).cloned() {
            Some(id) => {
                let Some(origin) = state.store.get(&id).map(Annotation::anchor) else {
                    return Effect::none();
                };
                log::debug!("Selected annotation {}", id);
                state.store.select(Some(id.clone()));
                state.interaction = Interaction::Dragging {
                    id,
                    start: point,
                    origin,
                    before: state.store.snapshot(),
                };
            }
            None => state.store.select(None),
        },
        Tool::Crop => state.interaction = Interaction::Cropping { start: point },
        Tool::Rectangle | Tool::Circle | Tool::Arrow | Tool::Text => {
            let pending = tool
                .drawn_kind()
                .and_then(|kind| PendingShape::seed(kind, point));
            if let Some(pending) = pending {
                state.interaction = Interaction::Drawing {
                    start: point,
                    pending,
                };
            }
        }
    }
    Effect::none()
}

fn pointer_move(state: &mut SessionState, point: Point) {
    match &mut state.interaction {
        Interaction::Idle => {}
        Interaction::Drawing { start, pending } => pending.resize(*start, point),
        Interaction::Cropping { start } => {
            state.crop_rect = Some(CropRect::from_corners(*start, point));
        }
        Interaction::Dragging {
            id, start, origin, ..
        } => {
            let (dx, dy) = start.delta_to(point);
            state.store.update_position(id, origin.translate(dx, dy));
        }
    }
}

/// End the current gesture, committing whatever it built
pub fn finish_interaction(state: &mut SessionState) {
    match std::mem::take(&mut state.interaction) {
        Interaction::Idle => {}
        Interaction::Drawing { start, pending } => match pending.finish(start) {
            Some(shape) => commit(state, shape),
            None => log::debug!("Discarded {:?} below minimum size", pending),
        },
        Interaction::Cropping { .. } => {
            log::debug!("Crop marquee set to {:?}", state.crop_rect);
        }
        Interaction::Dragging { id, before, .. } => {
            if state.store.commit_snapshot(before) {
                log::debug!("Moved annotation {}", id);
            }
        }
    }
}

/// Abandon the current gesture; drags keep their result, drawings are dropped
pub fn cancel_interaction(state: &mut SessionState) {
    match &state.interaction {
        Interaction::Drawing { .. } => state.interaction = Interaction::Idle,
        _ => finish_interaction(state),
    }
}

fn commit(state: &mut SessionState, shape: Shape) {
    let annotation = Annotation {
        id: state.ids.next_id(),
        shape,
        color: state.color,
    };
    state.store.add(annotation);
}

// ============================================================================
// Text entry
// ============================================================================

pub fn handle_text_msg(state: &mut SessionState, msg: TextMsg) -> Effect {
    let Some(anchor) = state.text_request.take() else {
        return Effect::none();
    };
    match msg {
        TextMsg::Confirm(text) if !text.trim().is_empty() => {
            commit(state, Shape::Text { anchor, text });
        }
        TextMsg::Confirm(_) | TextMsg::Cancel => {
            log::debug!("Text entry cancelled");
            if state.tool == Some(Tool::Text) {
                state.tool = None;
            }
        }
    }
    Effect::none()
}

// ============================================================================
// Collection edits
// ============================================================================

pub fn handle_edit_msg(state: &mut SessionState, msg: EditMsg) -> Effect {
    // A half-drawn shape is never committed by an edit
    cancel_interaction(state);
    match msg {
        EditMsg::Undo => {
            if state.store.undo() {
                Effect::Notify(Notice::success("Undo Successful", None))
            } else {
                Effect::Notify(Notice::info("Nothing to Undo", "No previous actions found."))
            }
        }
        EditMsg::DeleteSelected => match state.store.selected().cloned() {
            Some(id) => {
                state.store.delete(&id);
                Effect::Notify(Notice::success("Annotation Deleted", None))
            }
            None => Effect::Notify(Notice::info(
                "Nothing Selected",
                "Select an annotation to delete it.",
            )),
        },
        EditMsg::ClearAll => {
            if state.has_image() {
                state.store.clear_all();
            }
            state.crop_rect = None;
            state.tool = None;
            Effect::Notify(Notice::success(
                "Canvas Cleared",
                Some("All annotations have been removed."),
            ))
        }
    }
}
