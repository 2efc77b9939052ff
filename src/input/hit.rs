use egui::Pos2;

use crate::geometry::{rotate_about, rotated_rect_contains};
use crate::photo_store::PhotoStore;

/// Hit radius around the rotate and resize handles.
pub const HANDLE_HIT_RADIUS: f32 = 10.0;

/// How far above the photo's top edge the rotate handle sits.
pub const ROTATE_HANDLE_OFFSET: f32 = 15.0;

/// What a pointer-down over the canvas lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The rotate handle of the selected photo.
    RotateHandle(usize),
    /// The resize handle of the selected photo.
    ResizeHandle(usize),
    /// A photo body (topmost wins).
    Photo(usize),
    /// Empty canvas.
    Empty,
}

/// Classify a canvas-local pointer position. Handles only exist on the
/// selected photo and sit above photo bodies; photo bodies are tested
/// topmost-first. Handle anchors and photo bodies are tested in rotated
/// space so hits match what is painted.
pub fn classify_target(pos: Pos2, store: &PhotoStore) -> HitTarget {
    if let Some(index) = store.selected_index() {
        if let Some(photo) = store.get(index) {
            let center = photo.center();
            let rotate_anchor = rotate_about(
                photo.top_center() - egui::vec2(0.0, ROTATE_HANDLE_OFFSET),
                center,
                photo.rotation,
            );
            if rotate_anchor.distance(pos) <= HANDLE_HIT_RADIUS {
                return HitTarget::RotateHandle(index);
            }
            let resize_anchor = rotate_about(photo.bottom_right(), center, photo.rotation);
            if resize_anchor.distance(pos) <= HANDLE_HIT_RADIUS {
                return HitTarget::ResizeHandle(index);
            }
        }
    }

    for (index, photo) in store.photos().iter().enumerate().rev() {
        if rotated_rect_contains(photo.rect(), photo.rotation, pos) {
            return HitTarget::Photo(index);
        }
    }

    HitTarget::Empty
}
