use egui::{Pos2, Rect, Vec2};

use crate::image_source::ImageRef;

/// One placed image with its own transform and z-order slot.
///
/// Position is the top-left corner in canvas-local coordinates; rotation
/// is in degrees, unbounded (it wraps visually at 360). Both size
/// components stay at or above [`crate::geometry::MIN_PHOTO_SIZE`]; every
/// mutation path through the store enforces the clamp.
#[derive(Debug, Clone)]
pub struct PhotoLayer {
    pub image: ImageRef,
    pub name: String,
    pub pos: Pos2,
    pub size: Vec2,
    pub rotation: f32,
}

impl PhotoLayer {
    pub fn new(image: ImageRef, name: impl Into<String>, pos: Pos2, size: Vec2) -> Self {
        Self {
            image,
            name: name.into(),
            pos,
            size,
            rotation: 0.0,
        }
    }

    /// Unrotated bounding rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }

    pub fn center(&self) -> Pos2 {
        self.rect().center()
    }

    /// Anchor point of the rotate handle, at the top-center edge.
    pub fn top_center(&self) -> Pos2 {
        Pos2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }

    /// Anchor point of the resize handle, at the bottom-right corner.
    pub fn bottom_right(&self) -> Pos2 {
        self.rect().max
    }
}
