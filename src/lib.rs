#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod draw;
pub mod error;
pub mod event;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod image_source;
pub mod input;
pub mod interaction;
pub mod notes;
pub mod panels;
pub mod photo;
pub mod photo_store;
pub mod renderer;
pub mod texture_cache;
pub mod tools;

pub use app::BoardApp;
pub use draw::{DrawLayer, DrawObject, DrawStore, LayerId};
pub use event::{BoardEvent, EventBus, EventHandler};
pub use image_source::{ImageRef, SourceList};
pub use interaction::{CanvasController, CanvasGesture};
pub use notes::{Note, NoteId, NoteStore};
pub use photo::PhotoLayer;
pub use photo_store::PhotoStore;
pub use renderer::Renderer;
pub use tools::{ToolController, ToolKind, ToolSettings};
