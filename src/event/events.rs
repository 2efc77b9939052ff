use crate::draw::LayerId;
use crate::notes::NoteId;

/// Every notification crossing the store boundary. External collaborators
/// (sidebar chrome, composition resync) observe these instead of reaching
/// into the stores.
#[derive(Debug, Clone)]
pub enum BoardEvent {
    Photo(PhotoEvent),
    DrawLayer(DrawLayerEvent),
    Note(NoteEvent),
}

#[derive(Debug, Clone)]
pub enum PhotoEvent {
    Added { index: usize },
    Deleted { index: usize },
    Selected { index: Option<usize> },
    MovedToFront { index: usize },
    Transformed { index: usize },
    OrderSynced,
    Cleared,
}

#[derive(Debug, Clone)]
pub enum DrawLayerEvent {
    Added { id: LayerId },
    Deleted { id: LayerId },
    Activated { id: Option<LayerId> },
    Reordered,
    VisibilityChanged { id: LayerId, visible: bool },
    LockChanged { id: LayerId, locked: bool },
    ObjectsChanged { id: LayerId },
    Cleared,
}

#[derive(Debug, Clone)]
pub enum NoteEvent {
    Added { id: NoteId },
    Deleted { id: NoteId },
    Moved { id: NoteId },
    Edited { id: NoteId },
    Cleared,
}

impl From<PhotoEvent> for BoardEvent {
    fn from(event: PhotoEvent) -> Self {
        BoardEvent::Photo(event)
    }
}

impl From<DrawLayerEvent> for BoardEvent {
    fn from(event: DrawLayerEvent) -> Self {
        BoardEvent::DrawLayer(event)
    }
}

impl From<NoteEvent> for BoardEvent {
    fn from(event: NoteEvent) -> Self {
        BoardEvent::Note(event)
    }
}
