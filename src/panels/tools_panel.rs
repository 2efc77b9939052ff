use eframe::egui;

use crate::draw::DrawStore;
use crate::export::AspectRatio;
use crate::photo_store::PhotoStore;
use crate::tools::{ToolController, ToolKind};

/// Board-wide commands the tools panel cannot apply itself; the app loop
/// picks them up after the panel returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    AddNote,
    Snapshot,
    ClearBoard,
    ToggleFocus,
}

/// The right panel: drawing tool settings plus the board control strip.
pub fn tools_panel(
    ctx: &egui::Context,
    tools: &mut ToolController,
    draw: &mut DrawStore,
    photos: &mut PhotoStore,
    snapshot_ratio: &mut AspectRatio,
) -> Option<BoardAction> {
    let mut action = None;
    egui::SidePanel::right("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            for tool in ToolKind::ALL {
                let selected = tools.settings.tool == tool;
                if ui.selectable_label(selected, tool.label()).clicked() {
                    log::info!("tool selected: {}", tool.label());
                    tools.settings.tool = tool;
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color");
                ui.color_edit_button_srgba(&mut tools.settings.color);
            });
            ui.horizontal(|ui| {
                ui.label("Width");
                ui.add(egui::Slider::new(&mut tools.settings.width, 1.0..=24.0));
            });
            if ui.button("Clear drawing").clicked() {
                if let Some(id) = draw.editable_layer_id() {
                    draw.clear_objects(id);
                }
            }
            ui.separator();

            ui.heading("Board");
            let has_selection = photos.selected_index().is_some();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(has_selection, egui::Button::new("Zoom +"))
                    .clicked()
                {
                    photos.zoom_selected(1.2);
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new("Zoom -"))
                    .clicked()
                {
                    photos.zoom_selected(0.8);
                }
            });
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(has_selection, egui::Button::new("Top"))
                    .clicked()
                {
                    photos.bring_selected_to_front();
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new("Focus"))
                    .on_hover_text("Drag a box to crop the selected photo")
                    .clicked()
                {
                    action = Some(BoardAction::ToggleFocus);
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new("Delete"))
                    .clicked()
                {
                    photos.delete_selected();
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Note").clicked() {
                    action = Some(BoardAction::AddNote);
                }
                if ui.button("Clear board").clicked() {
                    action = Some(BoardAction::ClearBoard);
                }
            });
            ui.separator();

            ui.heading("Snapshot");
            ui.horizontal(|ui| {
                for ratio in AspectRatio::ALL {
                    if ui
                        .selectable_label(*snapshot_ratio == ratio, ratio.label())
                        .clicked()
                    {
                        *snapshot_ratio = ratio;
                    }
                }
            });
            if ui.button("Save snapshot").clicked() {
                action = Some(BoardAction::Snapshot);
            }
        });
    action
}
