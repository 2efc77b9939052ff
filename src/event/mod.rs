mod bus;
mod events;

pub use bus::EventBus;
pub use events::{BoardEvent, DrawLayerEvent, NoteEvent, PhotoEvent};

/// Receives board events emitted after each store mutation.
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &BoardEvent);
}
