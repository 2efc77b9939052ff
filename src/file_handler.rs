use eframe::egui;

use crate::error::ImageLoadError;
use crate::image_source::{ImageRef, SourceList};

/// Accepts dropped image files and feeds them into the source list.
pub struct FileHandler {
    processed_files: Vec<String>,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        Self {
            processed_files: Vec::new(),
        }
    }

    /// Pull newly dropped files out of the frame's raw input and load
    /// them. A file that fails to decode is logged and skipped; the rest
    /// of the drop still loads.
    pub fn poll_dropped_files(&mut self, ctx: &egui::Context, sources: &mut SourceList) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in &dropped {
            let file_name = display_name(file);
            if self.processed_files.contains(&file_name) {
                continue;
            }
            if !is_image_file(file) {
                log::warn!("dropped file is not a supported image type: {file_name}");
                continue;
            }
            match load_dropped(file) {
                Ok(image) => {
                    log::info!("loaded source image {file_name}");
                    sources.add(image, file_name.clone());
                    self.processed_files.push(file_name);
                }
                Err(err) => {
                    log::warn!("failed to load {file_name}: {err}");
                }
            }
        }
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension.
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(path) = &file.path {
        path.extension().is_some_and(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
        })
    } else {
        false
    }
}

fn load_dropped(file: &egui::DroppedFile) -> Result<ImageRef, ImageLoadError> {
    if let Some(bytes) = &file.bytes {
        ImageRef::decode(bytes)
    } else if let Some(path) = &file.path {
        let bytes = std::fs::read(path)?;
        ImageRef::decode(&bytes)
    } else {
        Err(ImageLoadError::UnsupportedType(display_name(file)))
    }
}
