//! Tool modes for the editor canvas

use serde::{Deserialize, Serialize};

use super::annotation::AnnotationKind;

/// Active interaction tool.
///
/// "No tool" is `Option::<Tool>::None` at the session level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Select,
    Crop,
    Rectangle,
    Circle,
    Arrow,
    Text,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Select,
        Tool::Crop,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Arrow,
        Tool::Text,
    ];

    /// Annotation kind produced by this tool, if it draws one by dragging
    pub fn drawn_kind(self) -> Option<AnnotationKind> {
        match self {
            Tool::Rectangle => Some(AnnotationKind::Rectangle),
            Tool::Circle => Some(AnnotationKind::Circle),
            Tool::Arrow => Some(AnnotationKind::Arrow),
            Tool::Select | Tool::Crop | Tool::Text => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Crop => "Crop",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
            Tool::Arrow => "Arrow",
            Tool::Text => "Text",
        }
    }

    /// Single-key shortcut for this tool
    pub fn shortcut(self) -> char {
        match self {
            Tool::Select => 'v',
            Tool::Crop => 'x',
            Tool::Rectangle => 'r',
            Tool::Circle => 'c',
            Tool::Arrow => 'a',
            Tool::Text => 't',
        }
    }

    pub fn from_shortcut(c: char) -> Option<Tool> {
        let c = c.to_ascii_lowercase();
        Tool::ALL.into_iter().find(|tool| tool.shortcut() == c)
    }
}
