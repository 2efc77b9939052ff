//! Render/composition: a pure projection of the stores onto an egui
//! painter. Photos paint in sequence order, then each visible draw layer
//! replays its object list in order (full redraw every frame, no dirty
//! regions), then the live shape preview and the crop overlay. Nothing in
//! here mutates a store.

use std::collections::HashSet;

use egui::emath::Rot2;
use egui::{
    Align2, Color32, Context, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke, Vec2, pos2,
};

use crate::draw::{ARROW_HEAD_LENGTH, DrawObject, DrawStore};
use crate::geometry::{MIN_PHOTO_SIZE, rotate_about};
use crate::input::{HANDLE_HIT_RADIUS, ROTATE_HANDLE_OFFSET};
use crate::interaction::CanvasController;
use crate::photo_store::PhotoStore;
use crate::texture_cache::TextureCache;

const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(250, 250, 250);
const SELECTION_COLOR: Color32 = Color32::from_rgb(0, 123, 255);
const ROTATE_HANDLE_FILL: Color32 = Color32::from_rgb(255, 230, 0);
const CROP_MASK: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 64);

pub struct Renderer {
    textures: TextureCache,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            textures: TextureCache::new(),
        }
    }

    /// Drop cached textures for images no longer referenced anywhere.
    pub fn prune_textures(&mut self, live: &HashSet<u64>) {
        self.textures.prune(live);
    }

    /// The texture cache, shared with panels that need thumbnails.
    pub fn textures_mut(&mut self) -> &mut TextureCache {
        &mut self.textures
    }

    /// Paint the whole board into `canvas_rect`. `show_chrome` disables
    /// interactive-only decoration (selection border, handles, crop
    /// overlay) when false, e.g. for the frame a snapshot is captured on.
    #[allow(clippy::too_many_arguments)]
    pub fn render_board(
        &mut self,
        ctx: &Context,
        painter: &Painter,
        canvas_rect: Rect,
        photos: &PhotoStore,
        draw: &DrawStore,
        canvas: &CanvasController,
        preview: Option<&DrawObject>,
        show_chrome: bool,
    ) {
        painter.rect_filled(canvas_rect, 4.0, CANVAS_BACKGROUND);
        let origin = canvas_rect.min.to_vec2();

        for (index, photo) in photos.photos().iter().enumerate() {
            let rect = photo.rect().translate(origin);
            let center = rect.center();

            let texture = self.textures.get_or_upload(ctx, &photo.image);
            let mut mesh = Mesh::with_texture(texture);
            mesh.add_rect_with_uv(
                rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
            mesh.rotate(Rot2::from_angle(photo.rotation.to_radians()), center);
            painter.add(Shape::mesh(mesh));

            if show_chrome && photos.selected_index() == Some(index) {
                self.paint_selection_chrome(painter, index, rect, photo.rotation);
            }
        }

        for layer in draw.layers() {
            if !layer.visible {
                continue;
            }
            for object in &layer.objects {
                paint_object(painter, origin, object);
            }
        }

        if let Some(object) = preview {
            paint_object(painter, origin, object);
        }

        if show_chrome && canvas.crop_mode() {
            self.paint_crop_overlay(painter, canvas_rect, photos, canvas);
        }
    }

    fn paint_selection_chrome(&self, painter: &Painter, index: usize, rect: Rect, rotation: f32) {
        let center = rect.center();
        let corner = |p: Pos2| rotate_about(p, center, rotation);

        let outline = vec![
            corner(rect.left_top()),
            corner(rect.right_top()),
            corner(rect.right_bottom()),
            corner(rect.left_bottom()),
        ];
        painter.add(Shape::closed_line(outline, Stroke::new(2.0, SELECTION_COLOR)));

        // Layer badge: rank within the z-order, topmost = highest.
        painter.text(
            corner(rect.left_top()) + Vec2::new(4.0, 4.0),
            Align2::LEFT_TOP,
            format!("Layer {}", index + 1),
            FontId::proportional(12.0),
            SELECTION_COLOR,
        );

        // Rotate handle above the top-center edge.
        let rotate_anchor = corner(pos2(center.x, rect.min.y - ROTATE_HANDLE_OFFSET));
        painter.circle_filled(rotate_anchor, HANDLE_HIT_RADIUS - 2.0, ROTATE_HANDLE_FILL);
        painter.circle_stroke(rotate_anchor, HANDLE_HIT_RADIUS - 2.0, Stroke::new(2.0, SELECTION_COLOR));

        // Resize handle on the bottom-right corner.
        let resize_anchor = corner(rect.right_bottom());
        painter.circle_filled(resize_anchor, HANDLE_HIT_RADIUS - 2.0, SELECTION_COLOR);
        painter.circle_stroke(resize_anchor, HANDLE_HIT_RADIUS - 2.0, Stroke::new(2.0, Color32::WHITE));
    }

    fn paint_crop_overlay(
        &self,
        painter: &Painter,
        canvas_rect: Rect,
        photos: &PhotoStore,
        canvas: &CanvasController,
    ) {
        painter.rect_filled(canvas_rect, 0.0, CROP_MASK);

        // The dashbox is the live rubber-band once a drag starts,
        // otherwise the selected photo's bounds.
        let local = match canvas.crop_band() {
            Some(band) => {
                // Display floor matches the commit floor.
                Rect::from_min_size(band.min, band.size().max(Vec2::splat(MIN_PHOTO_SIZE)))
            }
            None => match photos.selected() {
                Some(photo) => photo.rect(),
                None => return,
            },
        };
        let dashbox = local.translate(canvas_rect.min.to_vec2());

        let stroke = Stroke::new(1.5, Color32::WHITE);
        let corners = [
            dashbox.left_top(),
            dashbox.right_top(),
            dashbox.right_bottom(),
            dashbox.left_bottom(),
            dashbox.left_top(),
        ];
        for edge in corners.windows(2) {
            painter.extend(Shape::dashed_line(edge, stroke, 6.0, 4.0));
        }
    }
}

/// Replay one drawing object onto the painter, translating canvas-local
/// coordinates by the canvas origin.
pub fn paint_object(painter: &Painter, origin: Vec2, object: &DrawObject) {
    let stroke = Stroke::new(object.width(), object.color());
    match object {
        DrawObject::Pen { points, .. } => {
            let points: Vec<Pos2> = points.iter().map(|p| *p + origin).collect();
            if points.len() == 1 {
                painter.circle_filled(points[0], stroke.width / 2.0, object.color());
            } else {
                painter.add(Shape::line(points, stroke));
            }
        }
        DrawObject::Line { from, to, .. } => {
            painter.line_segment([*from + origin, *to + origin], stroke);
        }
        DrawObject::Rectangle { from, to, .. } => {
            let rect = Rect::from_two_pos(*from + origin, *to + origin);
            painter.rect_stroke(rect, 0.0, stroke);
        }
        DrawObject::Ellipse { from, to, .. } => {
            let rect = Rect::from_two_pos(*from + origin, *to + origin);
            painter.add(Shape::ellipse_stroke(
                rect.center(),
                rect.size() / 2.0,
                stroke,
            ));
        }
        DrawObject::Arrow { from, to, .. } => {
            let from = *from + origin;
            let to = *to + origin;
            painter.line_segment([from, to], stroke);
            let angle = (to.y - from.y).atan2(to.x - from.x);
            for flank in [-std::f32::consts::FRAC_PI_6, std::f32::consts::FRAC_PI_6] {
                let tip = pos2(
                    to.x - ARROW_HEAD_LENGTH * (angle + flank).cos(),
                    to.y - ARROW_HEAD_LENGTH * (angle + flank).sin(),
                );
                painter.line_segment([to, tip], stroke);
            }
        }
        DrawObject::Text {
            anchor,
            color,
            width,
            text,
        } => {
            painter.text(
                *anchor + origin,
                Align2::LEFT_BOTTOM,
                text,
                FontId::proportional(16.0 + width * 2.0),
                *color,
            );
        }
    }
}
