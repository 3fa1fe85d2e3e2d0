use crate::domain::Tool;
use crate::session::messages::{Msg, ToolMsg};
use crate::session::state::{Interaction, SessionState};

/// Keys the editor reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Character(String),
    Named(Named),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Named {
    Escape,
    Delete,
    Backspace,
    Enter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub control: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const CTRL: Self = Self {
        control: true,
        shift: false,
    };

    pub fn control(self) -> bool {
        self.control
    }

    pub fn shift(self) -> bool {
        self.shift
    }
}

pub fn handle_key_event(state: &SessionState, key: &Key, modifiers: Modifiers) -> Option<Msg> {
    // Keystrokes belong to the text entry while it is open
    if state.text_request.is_some() {
        return None;
    }

    let cropping = state.tool == Some(Tool::Crop);
    let has_marquee = cropping && state.crop_rect.is_some_and(|rect| !rect.is_empty());

    match key {
        Key::Character(c) if c.eq_ignore_ascii_case("z") && modifiers.control() && !modifiers.shift() => {
            Some(Msg::undo())
        }
        Key::Named(Named::Delete | Named::Backspace) => Some(Msg::delete_selected()),
        Key::Named(Named::Escape)
            if has_marquee || matches!(state.interaction, Interaction::Cropping { .. }) =>
        {
            Some(Msg::cancel_crop())
        }
        Key::Named(Named::Escape) => Some(Msg::Tool(ToolMsg::Clear)),
        Key::Named(Named::Enter) if has_marquee => Some(Msg::confirm_crop()),
        Key::Character(c) if !modifiers.control() => {
            let mut chars = c.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Tool::from_shortcut(ch.to_ascii_lowercase()).map(Msg::tool),
                _ => None,
            }
        }
        _ => None,
    }
}
