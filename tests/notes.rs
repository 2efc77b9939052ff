use std::sync::{Arc, Mutex};

use egui::pos2;
use moodboard::event::NoteEvent;
use moodboard::{BoardEvent, EventHandler, NoteStore};

struct Recorder(Arc<Mutex<Vec<BoardEvent>>>);

impl EventHandler for Recorder {
    fn handle_event(&mut self, event: &BoardEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

fn store_with_recorder() -> (NoteStore, Arc<Mutex<Vec<BoardEvent>>>) {
    let store = NoteStore::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    store.events().subscribe(Box::new(Recorder(log.clone())));
    (store, log)
}

#[test]
fn test_new_notes_start_with_placeholder_text() {
    let mut store = NoteStore::new();
    let id = store.add(pos2(40.0, 60.0));
    let note = &store.notes()[0];
    assert_eq!(note.id, id);
    assert_eq!(note.text, "New note");
    assert_eq!(note.pos, pos2(40.0, 60.0));
}

#[test]
fn test_note_ids_are_unique() {
    let mut store = NoteStore::new();
    let a = store.add(pos2(0.0, 0.0));
    let b = store.add(pos2(10.0, 10.0));
    assert_ne!(a, b);

    store.delete(a);
    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].id, b);
}

#[test]
fn test_edit_emits_only_on_change() {
    let (mut store, log) = store_with_recorder();
    let id = store.add(pos2(0.0, 0.0));
    log.lock().unwrap().clear();

    store.set_text(id, "New note".to_owned());
    assert!(log.lock().unwrap().is_empty());

    store.set_text(id, "groceries".to_owned());
    let events = log.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        BoardEvent::Note(NoteEvent::Edited { id: edited }) if edited == id
    ));
}

#[test]
fn test_clear_empties_and_notifies() {
    let (mut store, log) = store_with_recorder();
    store.add(pos2(0.0, 0.0));
    store.add(pos2(10.0, 10.0));
    log.lock().unwrap().clear();

    store.clear();
    assert!(store.is_empty());
    let events = log.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], BoardEvent::Note(NoteEvent::Cleared)));
}
