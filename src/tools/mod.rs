//! The drawing tool state machine.
//!
//! One global tool plus color and stroke width; edits apply only to the
//! layer that is simultaneously active, visible and unlocked, and that
//! triple is re-checked on every pointer event. A layer locked mid-gesture
//! aborts the rest of that gesture, but anything already committed stays.

use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use crate::draw::{DrawObject, DrawStore, LayerId};
use crate::input::PointerEvent;

/// The globally selected drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    Pen,
    Line,
    Rectangle,
    Ellipse,
    Arrow,
    Text,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Pen,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Arrow,
        ToolKind::Text,
        ToolKind::Eraser,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
            ToolKind::Arrow => "Arrow",
            ToolKind::Text => "Text",
            ToolKind::Eraser => "Eraser",
        }
    }
}

/// Tool, color and stroke width; persisted across sessions through eframe
/// storage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub color: Color32,
    pub width: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pen,
            color: Color32::from_rgb(0, 123, 255),
            width: 2.0,
        }
    }
}

/// What the tool machine is in the middle of.
#[derive(Debug, Clone, PartialEq)]
enum ToolState {
    Idle,
    /// A pen object is growing on `layer`; it is the layer's last object.
    PenStroke { layer: LayerId },
    /// A shape anchor is down; the object is only committed on release.
    ShapeDrag {
        layer: LayerId,
        anchor: Pos2,
        current: Pos2,
    },
    /// Waiting for the text-entry modal to resume us. Only this state
    /// machine is suspended, never the rest of the application.
    AwaitingText { layer: LayerId, anchor: Pos2 },
}

/// Interprets pointer events against the active draw layer.
#[derive(Debug)]
pub struct ToolController {
    pub settings: ToolSettings,
    state: ToolState,
}

impl Default for ToolController {
    fn default() -> Self {
        Self::new(ToolSettings::default())
    }
}

impl ToolController {
    pub fn new(settings: ToolSettings) -> Self {
        Self {
            settings,
            state: ToolState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == ToolState::Idle
    }

    /// The anchor of a pending text entry, if the modal should be open.
    pub fn awaiting_text(&self) -> Option<Pos2> {
        match self.state {
            ToolState::AwaitingText { anchor, .. } => Some(anchor),
            _ => None,
        }
    }

    /// The live shape preview from anchor to the current pointer. Never
    /// part of persisted state.
    pub fn preview(&self) -> Option<DrawObject> {
        match self.state {
            ToolState::ShapeDrag {
                anchor, current, ..
            } => self.make_shape(anchor, current),
            _ => None,
        }
    }

    /// Feed one pointer event through the state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent, store: &mut DrawStore) {
        match event {
            PointerEvent::Down { pos } => self.on_down(pos, store),
            PointerEvent::Moved { pos } => self.on_move(pos, store),
            PointerEvent::Up { pos } => self.on_up(pos, store),
        }
    }

    fn on_down(&mut self, pos: Pos2, store: &mut DrawStore) {
        // A pending text entry keeps its anchor until the modal resumes
        // us; pointer activity elsewhere must not restart the entry.
        if matches!(self.state, ToolState::AwaitingText { .. }) {
            return;
        }
        let Some(layer) = store.editable_layer_id() else {
            return;
        };
        match self.settings.tool {
            ToolKind::Pen => {
                store.push_object(
                    layer,
                    DrawObject::Pen {
                        points: vec![pos],
                        color: self.settings.color,
                        width: self.settings.width,
                    },
                );
                self.state = ToolState::PenStroke { layer };
            }
            ToolKind::Line | ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Arrow => {
                self.state = ToolState::ShapeDrag {
                    layer,
                    anchor: pos,
                    current: pos,
                };
            }
            ToolKind::Text => {
                self.state = ToolState::AwaitingText { layer, anchor: pos };
            }
            ToolKind::Eraser => {
                store.erase_at(layer, pos);
            }
        }
    }

    fn on_move(&mut self, pos: Pos2, store: &mut DrawStore) {
        match self.state {
            ToolState::PenStroke { layer } => {
                if store.editable_layer_id() == Some(layer) {
                    store.append_pen_point(layer, pos);
                } else {
                    // Locked or hidden mid-gesture: abort, keep what was
                    // already appended.
                    self.state = ToolState::Idle;
                }
            }
            ToolState::ShapeDrag { layer, anchor, .. } => {
                if store.editable_layer_id() == Some(layer) {
                    self.state = ToolState::ShapeDrag {
                        layer,
                        anchor,
                        current: pos,
                    };
                } else {
                    self.state = ToolState::Idle;
                }
            }
            ToolState::AwaitingText { .. } | ToolState::Idle => {}
        }
    }

    fn on_up(&mut self, pos: Pos2, store: &mut DrawStore) {
        match self.state.clone() {
            ToolState::PenStroke { .. } => {
                // The pen object was committed progressively; nothing to
                // finalize and no simplification pass.
                self.state = ToolState::Idle;
            }
            ToolState::ShapeDrag { layer, anchor, .. } => {
                if store.editable_layer_id() == Some(layer) {
                    if let Some(shape) = self.make_shape(anchor, pos) {
                        store.push_object(layer, shape);
                    }
                }
                self.state = ToolState::Idle;
            }
            // Text entry survives pointer-up; the modal resumes us.
            ToolState::AwaitingText { .. } | ToolState::Idle => {}
        }
    }

    /// Resume a pending text entry with the user's input. An empty string
    /// creates nothing, like a cancel.
    pub fn submit_text(&mut self, text: &str, store: &mut DrawStore) {
        if let ToolState::AwaitingText { layer, anchor } = self.state {
            if !text.is_empty() && store.editable_layer_id() == Some(layer) {
                store.push_object(
                    layer,
                    DrawObject::Text {
                        anchor,
                        color: self.settings.color,
                        width: self.settings.width,
                        text: text.to_owned(),
                    },
                );
            }
            self.state = ToolState::Idle;
        }
    }

    /// Dismiss a pending text entry without creating an object.
    pub fn cancel_text(&mut self) {
        if matches!(self.state, ToolState::AwaitingText { .. }) {
            self.state = ToolState::Idle;
        }
    }

    fn make_shape(&self, from: Pos2, to: Pos2) -> Option<DrawObject> {
        let color = self.settings.color;
        let width = self.settings.width;
        match self.settings.tool {
            ToolKind::Line => Some(DrawObject::Line {
                from,
                to,
                color,
                width,
            }),
            ToolKind::Rectangle => Some(DrawObject::Rectangle {
                from,
                to,
                color,
                width,
            }),
            ToolKind::Ellipse => Some(DrawObject::Ellipse {
                from,
                to,
                color,
                width,
            }),
            ToolKind::Arrow => Some(DrawObject::Arrow {
                from,
                to,
                color,
                width,
            }),
            _ => None,
        }
    }
}
