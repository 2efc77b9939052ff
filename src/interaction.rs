//! Pointer-driven manipulation of the photo store.
//!
//! The controller interprets raw pointer events into drag, resize, rotate
//! and crop gestures. It mutates the store through its clamped transform
//! operations and never renders; the renderer reads the gesture state back
//! for cursor styling and the crop overlay.

use egui::{Pos2, Rect, Vec2};

use crate::geometry::{band_rect, clamp_drag, crop_rect, pointer_angle, uniform_resize};
use crate::input::{HitTarget, PointerEvent, classify_target};
use crate::photo_store::PhotoStore;

/// The gesture currently in flight on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasGesture {
    Idle,
    /// Moving a photo; `grab_offset` is pointer minus photo origin at
    /// pointer-down.
    DraggingPhoto { index: usize, grab_offset: Vec2 },
    /// Uniform resize from the bottom-right handle, measured against the
    /// size at pointer-down.
    ResizingPhoto {
        index: usize,
        start_pointer: Pos2,
        start_size: Vec2,
    },
    /// Rotating via the top-center handle. `start_angle` is the pointer's
    /// angle about the top-center at pointer-down, the session's zero
    /// reference; motion is applied as a delta on `start_rotation`.
    RotatingPhoto {
        index: usize,
        start_angle: f32,
        start_rotation: f32,
    },
    /// Dragging the crop rubber-band while crop mode is armed.
    DrawingCropBox { start: Pos2, current: Pos2 },
}

/// Interprets pointer events against the photo store.
#[derive(Debug)]
pub struct CanvasController {
    gesture: CanvasGesture,
    crop_mode: bool,
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasController {
    pub fn new() -> Self {
        Self {
            gesture: CanvasGesture::Idle,
            crop_mode: false,
        }
    }

    pub fn gesture(&self) -> CanvasGesture {
        self.gesture
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, CanvasGesture::Idle)
    }

    /// Whether the focus/crop overlay is currently armed.
    pub fn crop_mode(&self) -> bool {
        self.crop_mode
    }

    /// The rubber-band rectangle while one is being drawn.
    pub fn crop_band(&self) -> Option<Rect> {
        match self.gesture {
            CanvasGesture::DrawingCropBox { start, current } => Some(band_rect(start, current)),
            _ => None,
        }
    }

    /// Arm crop mode for the selected photo. No-op without a selection.
    pub fn begin_crop(&mut self, store: &PhotoStore) {
        if store.selected().is_some() {
            self.crop_mode = true;
        }
    }

    /// Disarm crop mode without committing anything.
    pub fn cancel_crop(&mut self) {
        self.crop_mode = false;
        if matches!(self.gesture, CanvasGesture::DrawingCropBox { .. }) {
            self.gesture = CanvasGesture::Idle;
        }
    }

    /// Feed one pointer event through the state machine. `viewport` is the
    /// canvas size used to clamp drags.
    pub fn handle_pointer(&mut self, event: PointerEvent, store: &mut PhotoStore, viewport: Vec2) {
        match event {
            PointerEvent::Down { pos } => self.on_down(pos, store),
            PointerEvent::Moved { pos } => self.on_move(pos, store, viewport),
            PointerEvent::Up { pos } => self.on_up(pos, store),
        }
    }

    fn on_down(&mut self, pos: Pos2, store: &mut PhotoStore) {
        // An armed crop captures the gesture before any photo target.
        if self.crop_mode && store.selected().is_some() {
            self.gesture = CanvasGesture::DrawingCropBox {
                start: pos,
                current: pos,
            };
            return;
        }

        match classify_target(pos, store) {
            HitTarget::RotateHandle(index) => {
                let Some(photo) = store.get(index) else { return };
                self.gesture = CanvasGesture::RotatingPhoto {
                    index,
                    start_angle: pointer_angle(pos, photo.top_center()),
                    start_rotation: photo.rotation,
                };
            }
            HitTarget::ResizeHandle(index) => {
                let Some(photo) = store.get(index) else { return };
                self.gesture = CanvasGesture::ResizingPhoto {
                    index,
                    start_pointer: pos,
                    start_size: photo.size,
                };
            }
            HitTarget::Photo(index) => {
                store.select(Some(index));
                let Some(photo) = store.get(index) else { return };
                self.gesture = CanvasGesture::DraggingPhoto {
                    index,
                    grab_offset: pos - photo.pos,
                };
            }
            HitTarget::Empty => {
                store.select(None);
            }
        }
    }

    fn on_move(&mut self, pos: Pos2, store: &mut PhotoStore, viewport: Vec2) {
        match self.gesture {
            CanvasGesture::DraggingPhoto { index, grab_offset } => {
                let Some(photo) = store.get(index) else { return };
                let target = pos - grab_offset;
                store.move_photo(index, clamp_drag(target, photo.size, viewport));
            }
            CanvasGesture::ResizingPhoto {
                index,
                start_pointer,
                start_size,
            } => {
                store.resize_photo(index, uniform_resize(start_size, pos - start_pointer));
            }
            CanvasGesture::RotatingPhoto {
                index,
                start_angle,
                start_rotation,
            } => {
                let Some(photo) = store.get(index) else { return };
                let angle = pointer_angle(pos, photo.top_center());
                store.rotate_photo(index, start_rotation + angle - start_angle);
            }
            CanvasGesture::DrawingCropBox { start, .. } => {
                self.gesture = CanvasGesture::DrawingCropBox {
                    start,
                    current: pos,
                };
            }
            CanvasGesture::Idle => {}
        }
    }

    fn on_up(&mut self, pos: Pos2, store: &mut PhotoStore) {
        if let CanvasGesture::DrawingCropBox { start, .. } = self.gesture {
            if let Some(index) = store.selected_index() {
                if let Some(photo) = store.get(index) {
                    let band = band_rect(start, pos);
                    let rect = crop_rect(band, photo.rect());
                    store.crop_photo(index, rect);
                }
            }
            self.crop_mode = false;
        }
        // No gesture data survives release; nothing is discarded either.
        self.gesture = CanvasGesture::Idle;
    }
}
