use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use eframe::egui;

use crate::draw::DrawStore;
use crate::export::{self, AspectRatio};
use crate::file_handler::FileHandler;
use crate::image_source::SourceList;
use crate::input::{InputHandler, PointerEvent};
use crate::interaction::CanvasController;
use crate::notes::{NoteId, NoteStore};
use crate::panels::{BoardAction, sidebar_panel, tools_panel};
use crate::photo_store::PhotoStore;
use crate::renderer::Renderer;
use crate::tools::{ToolController, ToolSettings};

const NOTE_FILL: egui::Color32 = egui::Color32::from_rgb(255, 249, 196);
const NOTE_SIZE: egui::Vec2 = egui::Vec2::new(140.0, 90.0);

/// The whole application: stores, controllers and panels wired together.
///
/// Only small preference state is persisted through eframe storage; board
/// content lives for the session.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct BoardApp {
    tool_settings: ToolSettings,
    snapshot_ratio: AspectRatio,
    welcome_seen: bool,

    #[serde(skip)]
    sources: SourceList,
    #[serde(skip)]
    photos: PhotoStore,
    #[serde(skip)]
    draw: DrawStore,
    #[serde(skip)]
    notes: NoteStore,
    #[serde(skip)]
    tools: ToolController,
    #[serde(skip)]
    canvas: CanvasController,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    files: FileHandler,
    #[serde(skip)]
    renderer: Renderer,

    #[serde(skip)]
    note_armed: bool,
    #[serde(skip)]
    text_buffer: String,
    #[serde(skip)]
    snapshot_pending: bool,
    #[serde(skip)]
    snapshot_sent: bool,
    #[serde(skip)]
    canvas_rect: Option<egui::Rect>,
}

impl Default for BoardApp {
    fn default() -> Self {
        Self {
            tool_settings: ToolSettings::default(),
            snapshot_ratio: AspectRatio::Free,
            welcome_seen: false,
            sources: SourceList::new(),
            photos: PhotoStore::new(),
            draw: DrawStore::new(),
            notes: NoteStore::new(),
            tools: ToolController::default(),
            canvas: CanvasController::new(),
            input: InputHandler::new(),
            files: FileHandler::new(),
            renderer: Renderer::new(),
            note_armed: false,
            text_buffer: String::new(),
            snapshot_pending: false,
            snapshot_sent: false,
            canvas_rect: None,
        }
    }
}

impl BoardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        app.tools = ToolController::new(app.tool_settings);
        app
    }

    fn route_pointer(&mut self, event: PointerEvent, viewport: egui::Vec2) {
        // While the text modal is open the tool machine is suspended at
        // its recorded anchor; canvas pointer activity must not disturb
        // it or start another gesture underneath the modal.
        if self.tools.awaiting_text().is_some() {
            return;
        }
        // An armed note placement consumes the next press outright.
        if self.note_armed {
            if let PointerEvent::Down { pos } = event {
                self.notes.add(pos);
                self.note_armed = false;
                return;
            }
        }
        // The crop overlay owns the pointer while armed; otherwise an
        // editable draw layer routes to the drawing tools, and the photo
        // gestures get everything else.
        if self.canvas.crop_mode() {
            self.canvas.handle_pointer(event, &mut self.photos, viewport);
        } else if !self.tools.is_idle() || self.draw.editable_layer_id().is_some() {
            self.tools.handle_pointer(event, &mut self.draw);
        } else {
            self.canvas.handle_pointer(event, &mut self.photos, viewport);
        }
    }

    fn apply_action(&mut self, action: BoardAction) {
        match action {
            BoardAction::AddNote => self.note_armed = true,
            BoardAction::ToggleFocus => {
                if self.canvas.crop_mode() {
                    self.canvas.cancel_crop();
                } else {
                    self.canvas.begin_crop(&self.photos);
                }
            }
            BoardAction::ClearBoard => {
                self.photos.clear();
                self.draw.clear_all();
                self.notes.clear();
                self.canvas.cancel_crop();
            }
            BoardAction::Snapshot => self.snapshot_pending = true,
        }
    }

    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        let screenshot: Option<Arc<egui::ColorImage>> = ctx.input(|i| {
            i.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = screenshot else { return };
        self.snapshot_pending = false;
        self.snapshot_sent = false;
        let Some(canvas_rect) = self.canvas_rect else {
            return;
        };
        let region = self.snapshot_ratio.apply(canvas_rect);
        match export::crop_screenshot(&image, ctx.pixels_per_point(), region) {
            Ok(cropped) => {
                let path = snapshot_path();
                if let Err(err) = export::save_png(&cropped, &path) {
                    log::error!("snapshot save failed: {err}");
                }
            }
            Err(err) => log::error!("snapshot crop failed: {err}"),
        }
    }

    fn show_text_modal(&mut self, ctx: &egui::Context) {
        if self.tools.awaiting_text().is_none() {
            return;
        }
        let mut submit = false;
        let mut cancel = false;
        egui::Window::new("Add text")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let response = ui.text_edit_singleline(&mut self.text_buffer);
                if self.text_buffer.is_empty() {
                    response.request_focus();
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });
        if submit {
            let text = std::mem::take(&mut self.text_buffer);
            self.tools.submit_text(text.trim(), &mut self.draw);
        } else if cancel {
            self.text_buffer.clear();
            self.tools.cancel_text();
        }
    }

    fn show_notes(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        let notes = self.notes.notes().to_vec();
        for note in notes {
            let screen_pos = canvas_rect.min + note.pos.to_vec2();
            egui::Area::new(egui::Id::new(("note", note.id.0)))
                .fixed_pos(screen_pos)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style())
                        .fill(NOTE_FILL)
                        .show(ui, |ui| {
                            ui.set_width(NOTE_SIZE.x);
                            self.note_header(ui, note.id, &note);
                            let mut text = note.text.clone();
                            let edit = egui::TextEdit::multiline(&mut text)
                                .desired_rows(3)
                                .desired_width(NOTE_SIZE.x);
                            if ui.add(edit).changed() {
                                self.notes.set_text(note.id, text);
                            }
                        });
                });
        }
    }

    fn note_header(&mut self, ui: &mut egui::Ui, id: NoteId, note: &crate::notes::Note) {
        ui.horizontal(|ui| {
            let (_, handle) = ui.allocate_exact_size(
                egui::vec2(NOTE_SIZE.x - 24.0, 14.0),
                egui::Sense::drag(),
            );
            if handle.dragged() {
                self.notes.move_note(id, note.pos + handle.drag_delta());
            }
            if ui.small_button("x").clicked() {
                self.notes.delete(id);
            }
        });
    }

    fn show_welcome(&mut self, ctx: &egui::Context) {
        if self.welcome_seen {
            return;
        }
        egui::Window::new("Welcome")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Drop image files onto the window to collect them in the sidebar.");
                ui.label("Add them to the board, then drag, resize, rotate and crop.");
                ui.label("Draw layers hold sketches on top; notes hold loose thoughts.");
                if ui.button("Get started").clicked() {
                    self.welcome_seen = true;
                }
            });
    }

    /// Image ids still referenced by the sidebar or the board.
    fn live_image_ids(&self) -> HashSet<u64> {
        self.sources
            .images()
            .iter()
            .map(|s| s.image.id())
            .chain(self.photos.photos().iter().map(|p| p.image.id()))
            .collect()
    }
}

impl eframe::App for BoardApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.tool_settings = self.tools.settings;
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_screenshot(ctx);
        self.files.poll_dropped_files(ctx, &mut self.sources);

        sidebar_panel(
            ctx,
            &mut self.sources,
            &mut self.photos,
            &mut self.draw,
            self.renderer.textures_mut(),
        );
        let action = tools_panel(
            ctx,
            &mut self.tools,
            &mut self.draw,
            &mut self.photos,
            &mut self.snapshot_ratio,
        );
        if let Some(action) = action {
            self.apply_action(action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;
            self.canvas_rect = Some(canvas_rect);

            self.input.set_canvas(canvas_rect, response.layer_id);
            for event in self.input.process_input(ctx) {
                self.route_pointer(event, canvas_rect.size());
            }

            let show_chrome = !self.snapshot_pending;
            let preview = self.tools.preview();
            self.renderer.render_board(
                ctx,
                &painter,
                canvas_rect,
                &self.photos,
                &self.draw,
                &self.canvas,
                preview.as_ref(),
                show_chrome,
            );
        });

        // Notes stay visible in snapshots; only the selection chrome and
        // overlays are dropped from the capture frame.
        if let Some(canvas_rect) = self.canvas_rect {
            self.show_notes(ctx, canvas_rect);
        }
        self.show_text_modal(ctx);
        self.show_welcome(ctx);

        self.renderer.prune_textures(&self.live_image_ids());

        // The capture command goes out at the end of the first chrome-less
        // frame; the screenshot event comes back through next frame's input.
        if self.snapshot_pending && !self.snapshot_sent {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.snapshot_sent = true;
        }
    }
}

fn snapshot_path() -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    PathBuf::from(format!("moodboard-{stamp}.png"))
}
