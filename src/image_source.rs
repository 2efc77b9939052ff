use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use egui::ColorImage;

use crate::error::ImageLoadError;

// Static counter for generating unique image ids
static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque, cheap-to-clone handle to decoded bitmap data. The id is stable
/// for the lifetime of the process and keys the texture cache.
#[derive(Clone)]
pub struct ImageRef {
    id: u64,
    pixels: Arc<ColorImage>,
}

impl ImageRef {
    pub fn new(pixels: ColorImage) -> Self {
        Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::SeqCst),
            pixels: Arc::new(pixels),
        }
    }

    /// Decode encoded image bytes (png/jpeg/gif/webp/bmp) into a handle.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageLoadError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        let size = [image.width() as usize, image.height() as usize];
        let pixels = ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        Ok(Self::new(pixels))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn pixels(&self) -> &ColorImage {
        &self.pixels
    }

    pub fn width(&self) -> usize {
        self.pixels.size[0]
    }

    pub fn height(&self) -> usize {
        self.pixels.size[1]
    }
}

impl std::fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRef")
            .field("id", &self.id)
            .field("size", &self.pixels.size)
            .finish()
    }
}

/// One uploaded image waiting in the sidebar, not yet placed on the board.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub image: ImageRef,
    pub name: String,
}

/// Ordered list of uploaded images. This is the collaborator the photo
/// store receives placement requests from; it only ever hands out
/// `(ImageRef, name)` by value.
#[derive(Debug, Default)]
pub struct SourceList {
    images: Vec<SourceImage>,
}

impl SourceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, image: ImageRef, name: impl Into<String>) {
        self.images.push(SourceImage {
            image,
            name: name.into(),
        });
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    /// Move the entry at `from` so it lands at `to`, keeping all other
    /// relative order. Out-of-range indices are ignored.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to || from >= self.images.len() || to >= self.images.len() {
            return;
        }
        let moved = self.images.remove(from);
        self.images.insert(to, moved);
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn images(&self) -> &[SourceImage] {
        &self.images
    }

    pub fn get(&self, index: usize) -> Option<&SourceImage> {
        self.images.get(index)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Current ordering by display name, used to re-sequence the board
    /// after a sidebar drag-reorder.
    pub fn names(&self) -> Vec<String> {
        self.images.iter().map(|s| s.name.clone()).collect()
    }
}
