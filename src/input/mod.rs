use egui::{Context, LayerId, Pos2, Rect};

mod hit;
pub use hit::{HANDLE_HIT_RADIUS, HitTarget, ROTATE_HANDLE_OFFSET, classify_target};

/// A pointer event in canvas-local coordinates.
///
/// `Down` is only produced inside the canvas area; `Moved` and `Up` are
/// produced wherever the pointer is, so a gesture that leaves the canvas
/// mid-drag is still guaranteed to terminate on release.
#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
    Down { pos: Pos2 },
    Moved { pos: Pos2 },
    Up { pos: Pos2 },
}

impl PointerEvent {
    pub fn pos(&self) -> Pos2 {
        match self {
            Self::Down { pos } | Self::Moved { pos } | Self::Up { pos } => *pos,
        }
    }
}

/// Converts raw egui input into canvas-local pointer events.
pub struct InputHandler {
    canvas_rect: Option<Rect>,
    canvas_layer: Option<LayerId>,
    last_pointer_pos: Option<Pos2>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            canvas_rect: None,
            canvas_layer: None,
            last_pointer_pos: None,
        }
    }

    /// Update the canvas rectangle (screen coordinates) and the layer the
    /// board paints on for this frame.
    pub fn set_canvas(&mut self, rect: Rect, layer: LayerId) {
        self.canvas_rect = Some(rect);
        self.canvas_layer = Some(layer);
    }

    fn to_canvas(&self, pos: Pos2) -> Option<Pos2> {
        self.canvas_rect.map(|rect| (pos - rect.min).to_pos2())
    }

    /// Process raw egui input and produce this frame's pointer events.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let Some(canvas_rect) = self.canvas_rect else {
            return events;
        };

        let (pressed, down, released, hover_pos) = ctx.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_down(),
                input.pointer.primary_released(),
                input.pointer.hover_pos(),
            )
        });
        let hover = hover_pos.or(self.last_pointer_pos);

        if pressed {
            if let Some(pos) = hover.filter(|p| canvas_rect.contains(*p)) {
                // Floating windows and note areas stack above the board
                // layer; a press they own never reaches the canvas.
                if ctx.layer_id_at(pos) == self.canvas_layer {
                    if let Some(pos) = self.to_canvas(pos) {
                        events.push(PointerEvent::Down { pos });
                    }
                }
            }
        }

        if let Some(pos) = hover_pos {
            if Some(pos) != self.last_pointer_pos && down {
                if let Some(pos) = self.to_canvas(pos) {
                    events.push(PointerEvent::Moved { pos });
                }
            }
            self.last_pointer_pos = Some(pos);
        }

        // Release is observed globally, not just over the canvas, so a
        // gesture can never be left dangling.
        if released {
            if let Some(pos) = hover.and_then(|p| self.to_canvas(p)) {
                events.push(PointerEvent::Up { pos });
            }
        }

        events
    }
}
