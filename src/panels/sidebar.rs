use eframe::egui;

use crate::draw::DrawStore;
use crate::image_source::SourceList;
use crate::photo_store::PhotoStore;
use crate::texture_cache::TextureCache;

const THUMBNAIL_SIZE: f32 = 36.0;

/// The left sidebar: uploaded source images on top, draw layers below.
pub fn sidebar_panel(
    ctx: &egui::Context,
    sources: &mut SourceList,
    photos: &mut PhotoStore,
    draw: &mut DrawStore,
    textures: &mut TextureCache,
) {
    egui::SidePanel::left("sidebar")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            source_section(ui, ctx, sources, photos, textures);
            ui.separator();
            draw_layer_section(ui, draw);
        });
}

fn source_section(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    sources: &mut SourceList,
    photos: &mut PhotoStore,
    textures: &mut TextureCache,
) {
    ui.heading("Images");
    ui.horizontal(|ui| {
        if ui.button("Add all").clicked() {
            for source in sources.images().to_vec() {
                photos.add_photo(source.image.clone(), source.name.clone());
            }
        }
        // Clearing the source list also wipes the board.
        if ui.button("Clear").clicked() {
            sources.clear();
            photos.clear();
        }
    });
    if sources.is_empty() {
        ui.weak("Drop image files onto the window");
        return;
    }

    let mut reorder: Option<(usize, usize)> = None;
    let mut remove: Option<usize> = None;
    let mut add: Option<usize> = None;
    let count = sources.len();

    for (idx, source) in sources.images().iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!("{}", idx + 1));
            let id = textures.get_or_upload(ctx, &source.image);
            let aspect = source.image.width() as f32 / source.image.height().max(1) as f32;
            let size = if aspect >= 1.0 {
                egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE / aspect)
            } else {
                egui::vec2(THUMBNAIL_SIZE * aspect, THUMBNAIL_SIZE)
            };
            ui.image(egui::load::SizedTexture::new(id, size));
            ui.label(&source.name);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("x").on_hover_text("Remove").clicked() {
                    remove = Some(idx);
                }
                if ui
                    .add_enabled(idx + 1 < count, egui::Button::new("v").small())
                    .on_hover_text("Move down")
                    .clicked()
                {
                    reorder = Some((idx, idx + 1));
                }
                if ui
                    .add_enabled(idx > 0, egui::Button::new("^").small())
                    .on_hover_text("Move up")
                    .clicked()
                {
                    reorder = Some((idx, idx - 1));
                }
                if ui.small_button("+").on_hover_text("Add to board").clicked() {
                    add = Some(idx);
                }
            });
        });
    }

    if let Some(idx) = add {
        if let Some(source) = sources.get(idx) {
            let (image, name) = (source.image.clone(), source.name.clone());
            photos.add_photo(image, name);
        }
    }
    if let Some((from, to)) = reorder {
        sources.reorder(from, to);
        photos.sync_order(&sources.names());
    }
    if let Some(idx) = remove {
        sources.remove(idx);
        photos.sync_order(&sources.names());
    }
}

fn draw_layer_section(ui: &mut egui::Ui, draw: &mut DrawStore) {
    ui.heading("Draw layers");
    ui.horizontal(|ui| {
        if ui.button("Add layer").clicked() {
            let id = draw.create_layer();
            log::info!("created draw layer {id}");
        }
        if ui.button("Clear").clicked() {
            draw.clear_all();
        }
    });

    let active = draw.active_layer_id();
    let rows: Vec<_> = draw
        .layers()
        .iter()
        .map(|l| (l.id, l.name.clone(), l.visible, l.locked))
        .collect();
    let count = rows.len();

    for (idx, (id, name, visible, locked)) in rows.into_iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!("{}", idx + 1));
            let selected = active == Some(id);
            if ui.selectable_label(selected, &name).clicked() {
                draw.set_active(id);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .small_button("x")
                    .on_hover_text("Delete this draw layer")
                    .clicked()
                {
                    draw.delete_layer(id);
                }
                let lock_label = if locked { "locked" } else { "unlocked" };
                if ui
                    .selectable_label(locked, "L")
                    .on_hover_text(format!("Layer is {lock_label}"))
                    .clicked()
                {
                    draw.set_locked(id, !locked);
                }
                let eye_label = if visible { "visible" } else { "hidden" };
                if ui
                    .selectable_label(visible, "O")
                    .on_hover_text(format!("Layer is {eye_label}"))
                    .clicked()
                {
                    draw.set_visible(id, !visible);
                }
                if ui
                    .add_enabled(idx + 1 < count, egui::Button::new("v").small())
                    .clicked()
                {
                    draw.reorder(id, idx + 1);
                }
                if ui.add_enabled(idx > 0, egui::Button::new("^").small()).clicked() {
                    draw.reorder(id, idx - 1);
                }
            });
        });
    }
}
