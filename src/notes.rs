use std::sync::atomic::{AtomicUsize, Ordering};

use egui::Pos2;

use crate::event::{EventBus, NoteEvent};

// Single static counter for all notes
static NEXT_NOTE_ID: AtomicUsize = AtomicUsize::new(1);

/// Stable identifier for a sticky note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId(pub usize);

/// A sticky note pinned to the board: free text at a canvas-local
/// position. Notes render above photos and below the draw layers.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    pub pos: Pos2,
}

/// Ordered collection of sticky notes. A "notes" control arms placement;
/// the next canvas click drops a note there.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    events: EventBus,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn add(&mut self, pos: Pos2) -> NoteId {
        let id = NoteId(NEXT_NOTE_ID.fetch_add(1, Ordering::SeqCst));
        self.notes.push(Note {
            id,
            text: "New note".to_owned(),
            pos,
        });
        self.events.emit(NoteEvent::Added { id }.into());
        id
    }

    pub fn delete(&mut self, id: NoteId) {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() != before {
            self.events.emit(NoteEvent::Deleted { id }.into());
        }
    }

    pub fn move_note(&mut self, id: NoteId, pos: Pos2) {
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            note.pos = pos;
            self.events.emit(NoteEvent::Moved { id }.into());
        }
    }

    pub fn set_text(&mut self, id: NoteId, text: String) {
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            if note.text != text {
                note.text = text;
                self.events.emit(NoteEvent::Edited { id }.into());
            }
        }
    }

    pub fn clear(&mut self) {
        self.notes.clear();
        self.events.emit(NoteEvent::Cleared.into());
    }
}
