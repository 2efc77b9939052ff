use egui::{Pos2, Rect, Vec2};

use crate::event::{EventBus, PhotoEvent};
use crate::geometry::MIN_PHOTO_SIZE;
use crate::image_source::ImageRef;
use crate::photo::PhotoLayer;

/// Default edge length of a freshly placed photo, before the zoom
/// baseline is applied.
const DEFAULT_PHOTO_SIZE: f32 = 200.0;

/// Horizontal/vertical step of the cascading default placement.
const CASCADE_STEP: Vec2 = Vec2::new(30.0, 20.0);
const CASCADE_ORIGIN: Pos2 = Pos2::new(10.0, 10.0);

/// Ordered collection of placed photos. Index is z-order: lower index is
/// bottommost, the last photo is topmost. At most one photo is selected.
///
/// Operations referencing an absent index are silent no-ops; the sidebar
/// and canvas cannot produce stale references except through races this
/// design tolerates.
#[derive(Debug)]
pub struct PhotoStore {
    photos: Vec<PhotoLayer>,
    selected: Option<usize>,
    zoom_baseline: f32,
    events: EventBus,
}

impl Default for PhotoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoStore {
    pub fn new() -> Self {
        Self {
            photos: Vec::new(),
            selected: None,
            zoom_baseline: 1.0,
            events: EventBus::new(),
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn photos(&self) -> &[PhotoLayer] {
        &self.photos
    }

    pub fn get(&self, index: usize) -> Option<&PhotoLayer> {
        self.photos.get(index)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&PhotoLayer> {
        self.selected.and_then(|i| self.photos.get(i))
    }

    /// Append a photo at the cascading default position and select it.
    /// Returns the new photo's index (= its z-order slot).
    pub fn add_photo(&mut self, image: ImageRef, name: impl Into<String>) -> usize {
        let n = self.photos.len() as f32;
        let pos = CASCADE_ORIGIN + CASCADE_STEP * n;
        let size = Vec2::splat(DEFAULT_PHOTO_SIZE * self.zoom_baseline);
        self.photos.push(PhotoLayer::new(image, name, pos, size));
        let index = self.photos.len() - 1;
        self.selected = Some(index);
        self.events.emit(PhotoEvent::Added { index }.into());
        index
    }

    /// Remove the selected photo and clear the selection.
    pub fn delete_selected(&mut self) {
        if let Some(index) = self.selected.filter(|&i| i < self.photos.len()) {
            self.photos.remove(index);
            self.selected = None;
            self.events.emit(PhotoEvent::Deleted { index }.into());
        }
    }

    /// Move the selected photo to the top of the z-order and reselect it
    /// at its new index. Idempotent when it is already topmost.
    pub fn bring_selected_to_front(&mut self) {
        if let Some(index) = self.selected.filter(|&i| i < self.photos.len()) {
            let photo = self.photos.remove(index);
            self.photos.push(photo);
            let index = self.photos.len() - 1;
            self.selected = Some(index);
            self.events.emit(PhotoEvent::MovedToFront { index }.into());
        }
    }

    /// Scale the selected photo by `factor` on both axes, clamped to the
    /// minimum size. Used for the fixed +20%/-20% zoom steps.
    pub fn zoom_selected(&mut self, factor: f32) {
        if let Some(index) = self.selected.filter(|&i| i < self.photos.len()) {
            let photo = &mut self.photos[index];
            photo.size.x = MIN_PHOTO_SIZE.max(photo.size.x * factor);
            photo.size.y = MIN_PHOTO_SIZE.max(photo.size.y * factor);
            self.events.emit(PhotoEvent::Transformed { index }.into());
        }
    }

    pub fn select(&mut self, index: Option<usize>) {
        let index = index.filter(|&i| i < self.photos.len());
        if self.selected != index {
            self.selected = index;
            self.events.emit(PhotoEvent::Selected { index }.into());
        }
    }

    /// Re-sequence the board to match an externally reordered name list.
    /// Photos whose names are no longer present are dropped. The selection
    /// survives only if its index is still in range.
    pub fn sync_order(&mut self, names: &[String]) {
        let mut remaining: Vec<Option<PhotoLayer>> =
            self.photos.drain(..).map(Some).collect();
        for name in names {
            if let Some(photo) = remaining
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|p| &p.name == name))
                .and_then(Option::take)
            {
                self.photos.push(photo);
            }
        }
        if self.selected.is_some_and(|i| i >= self.photos.len()) {
            self.selected = None;
        }
        self.events.emit(PhotoEvent::OrderSynced.into());
    }

    pub fn clear(&mut self) {
        self.photos.clear();
        self.selected = None;
        self.events.emit(PhotoEvent::Cleared.into());
    }

    // Transform mutators used by the canvas interaction machine. Each
    // clamps its own invariant and notifies after mutating.

    pub fn move_photo(&mut self, index: usize, pos: Pos2) {
        if let Some(photo) = self.photos.get_mut(index) {
            photo.pos = pos;
            self.events.emit(PhotoEvent::Transformed { index }.into());
        }
    }

    pub fn resize_photo(&mut self, index: usize, size: Vec2) {
        if let Some(photo) = self.photos.get_mut(index) {
            photo.size = size.max(Vec2::splat(MIN_PHOTO_SIZE));
            self.events.emit(PhotoEvent::Transformed { index }.into());
        }
    }

    pub fn rotate_photo(&mut self, index: usize, degrees: f32) {
        if let Some(photo) = self.photos.get_mut(index) {
            photo.rotation = degrees;
            self.events.emit(PhotoEvent::Transformed { index }.into());
        }
    }

    /// Replace the photo's rectangle with an already-intersected crop
    /// rectangle. The minimum-size floor is re-applied here so the store
    /// invariant never depends on the caller.
    pub fn crop_photo(&mut self, index: usize, rect: Rect) {
        if let Some(photo) = self.photos.get_mut(index) {
            photo.pos = rect.min;
            photo.size = rect.size().max(Vec2::splat(MIN_PHOTO_SIZE));
            self.events.emit(PhotoEvent::Transformed { index }.into());
        }
    }
}
