use egui::{Pos2, Rect, Vec2};

/// Smallest width/height a photo may reach through resize, zoom or crop.
pub const MIN_PHOTO_SIZE: f32 = 40.0;

/// Clamp a photo's top-left corner so its full bounding box stays inside
/// the viewport. When the photo is larger than the viewport on an axis,
/// the origin snaps to 0 on that axis.
pub fn clamp_drag(pos: Pos2, size: Vec2, viewport: Vec2) -> Pos2 {
    Pos2::new(
        pos.x.min(viewport.x - size.x).max(0.0),
        pos.y.min(viewport.y - size.y).max(0.0),
    )
}

/// Uniform resize from the bottom-right handle: one size, tracking the
/// larger of the two pointer deltas, floored at the minimum.
pub fn uniform_resize(start_size: Vec2, delta: Vec2) -> Vec2 {
    let size = MIN_PHOTO_SIZE
        .max(start_size.x + delta.x)
        .max(start_size.y + delta.y);
    Vec2::splat(size)
}

/// Pointer angle in degrees about a pivot, measured like `atan2` in screen
/// space (y down).
pub fn pointer_angle(pointer: Pos2, pivot: Pos2) -> f32 {
    (pointer.y - pivot.y).atan2(pointer.x - pivot.x).to_degrees()
}

/// Rotate a point about a pivot by an angle in degrees (screen space,
/// y down, positive = clockwise).
pub fn rotate_about(p: Pos2, pivot: Pos2, degrees: f32) -> Pos2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let v = p - pivot;
    pivot + Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Whether a pointer position falls inside a rectangle that is rotated
/// about its center. The pointer is mapped back into the rectangle's
/// unrotated frame.
pub fn rotated_rect_contains(rect: Rect, degrees: f32, pos: Pos2) -> bool {
    rect.contains(rotate_about(pos, rect.center(), -degrees))
}

/// Normalize a rubber-band drag into a rectangle with positive extent.
pub fn band_rect(start: Pos2, end: Pos2) -> Rect {
    Rect::from_min_max(
        Pos2::new(start.x.min(end.x), start.y.min(end.y)),
        Pos2::new(start.x.max(end.x), start.y.max(end.y)),
    )
}

/// Intersect a committed rubber-band with the photo's rectangle, keeping
/// the exact clamp order of the original editor: the band's origin is
/// clamped into the photo first, then the far edges. The result's extent
/// floors at the minimum size even when the band misses the photo
/// entirely; the minimum-size policy always wins over geometric precision.
pub fn crop_rect(band: Rect, photo: Rect) -> Rect {
    let left = band.min.x.max(photo.min.x);
    let top = band.min.y.max(photo.min.y);
    let right = (left + band.width()).min(photo.max.x);
    let bottom = (top + band.height()).min(photo.max.y);
    let width = MIN_PHOTO_SIZE.max(right - left);
    let height = MIN_PHOTO_SIZE.max(bottom - top);
    Rect::from_min_size(Pos2::new(left, top), Vec2::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn drag_clamps_to_viewport() {
        let viewport = vec2(800.0, 600.0);
        let size = vec2(200.0, 200.0);
        assert_eq!(clamp_drag(pos2(-50.0, 10.0), size, viewport), pos2(0.0, 10.0));
        assert_eq!(clamp_drag(pos2(700.0, 550.0), size, viewport), pos2(600.0, 400.0));
    }

    #[test]
    fn drag_clamp_prefers_origin_for_oversized_photo() {
        let viewport = vec2(300.0, 300.0);
        let size = vec2(500.0, 500.0);
        assert_eq!(clamp_drag(pos2(120.0, -40.0), size, viewport), pos2(0.0, 0.0));
    }

    #[test]
    fn uniform_resize_tracks_larger_delta() {
        let size = uniform_resize(vec2(100.0, 80.0), vec2(20.0, 60.0));
        assert_eq!(size, vec2(140.0, 140.0));
    }

    #[test]
    fn uniform_resize_floors_at_minimum() {
        let size = uniform_resize(vec2(100.0, 100.0), vec2(-300.0, -300.0));
        assert_eq!(size, Vec2::splat(MIN_PHOTO_SIZE));
    }

    #[test]
    fn rotation_maps_pointer_into_photo_frame() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        // A corner of the unrotated rect is outside once rotated 45 degrees.
        assert!(rotated_rect_contains(rect, 0.0, pos2(2.0, 2.0)));
        assert!(!rotated_rect_contains(rect, 45.0, pos2(2.0, 2.0)));
        // The center never moves.
        assert!(rotated_rect_contains(rect, 45.0, pos2(50.0, 50.0)));
    }

    #[test]
    fn crop_is_contained_and_floored() {
        let photo = Rect::from_min_size(pos2(0.0, 0.0), vec2(200.0, 200.0));
        let band = Rect::from_min_size(pos2(150.0, 150.0), vec2(200.0, 200.0));
        let cropped = crop_rect(band, photo);
        assert_eq!(cropped, Rect::from_min_size(pos2(150.0, 150.0), vec2(50.0, 50.0)));
    }

    #[test]
    fn crop_with_no_overlap_still_floors() {
        let photo = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let band = Rect::from_min_size(pos2(500.0, 500.0), vec2(30.0, 30.0));
        let cropped = crop_rect(band, photo);
        assert_eq!(cropped.size(), Vec2::splat(MIN_PHOTO_SIZE));
    }
}
