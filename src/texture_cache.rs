use std::collections::{HashMap, HashSet};

use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::image_source::ImageRef;

/// Caches GPU textures for source images, keyed by the image's stable id.
/// Image pixel data is immutable, so entries never need version tracking;
/// they are dropped once no photo references the image any more.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<u64, TextureHandle>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the texture for an image, uploading it on first use.
    pub fn get_or_upload(&mut self, ctx: &Context, image: &ImageRef) -> TextureId {
        self.textures
            .entry(image.id())
            .or_insert_with(|| {
                let name = format!("image_{}", image.id());
                ctx.load_texture(&name, image.pixels().clone(), TextureOptions::LINEAR)
            })
            .id()
    }

    /// Drop textures whose image id is no longer referenced.
    pub fn prune(&mut self, live: &HashSet<u64>) {
        self.textures.retain(|id, _| live.contains(id));
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
