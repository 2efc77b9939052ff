use std::fmt;

use egui::Pos2;
use uuid::Uuid;

use crate::draw::DrawObject;
use crate::event::{DrawLayerEvent, EventBus};

/// Stable identifier for a draw layer; survives reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An independently toggleable vector canvas holding an ordered list of
/// drawing objects. Z-order within the board is the layer's position in
/// the store; later layers paint on top.
#[derive(Debug, Clone)]
pub struct DrawLayer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    pub objects: Vec<DrawObject>,
}

impl DrawLayer {
    fn new(name: String) -> Self {
        Self {
            id: LayerId::new(),
            name,
            visible: true,
            locked: false,
            objects: Vec::new(),
        }
    }

    /// True when this layer may receive pointer edits, assuming it is
    /// also the active layer.
    pub fn is_editable(&self) -> bool {
        self.visible && !self.locked
    }
}

/// Ordered collection of draw layers with one globally active layer.
///
/// Only the layer that is simultaneously active, visible and unlocked
/// accepts new pointer-driven edits; the tool state machine re-checks that
/// triple on every event through [`DrawStore::editable_layer_id`]. Every
/// mutator notifies the bus after mutating so the composition can rebuild
/// its surface stack.
#[derive(Debug, Default)]
pub struct DrawStore {
    layers: Vec<DrawLayer>,
    active: Option<LayerId>,
    events: EventBus,
}

impl DrawStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn layers(&self) -> &[DrawLayer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&DrawLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn active_layer_id(&self) -> Option<LayerId> {
        self.active
    }

    pub fn active_layer(&self) -> Option<&DrawLayer> {
        self.active.and_then(|id| self.layer(id))
    }

    /// The id of the layer currently eligible for pointer edits: active,
    /// visible and unlocked. Re-evaluated per pointer event.
    pub fn editable_layer_id(&self) -> Option<LayerId> {
        self.active_layer()
            .filter(|l| l.is_editable())
            .map(|l| l.id)
    }

    /// Append a new layer at the top of the z-order; it becomes active,
    /// visible and unlocked.
    pub fn create_layer(&mut self) -> LayerId {
        let name = format!("Draw Layer {}", self.layers.len() + 1);
        let layer = DrawLayer::new(name);
        let id = layer.id;
        self.layers.push(layer);
        self.active = Some(id);
        self.events.emit(DrawLayerEvent::Added { id }.into());
        id
    }

    /// Remove a layer. If it was active, activation falls to the new
    /// topmost remaining layer, or to none.
    pub fn delete_layer(&mut self, id: LayerId) {
        let Some(index) = self.layers.iter().position(|l| l.id == id) else {
            return;
        };
        self.layers.remove(index);
        if self.active == Some(id) {
            self.active = self.layers.last().map(|l| l.id);
        }
        self.events.emit(DrawLayerEvent::Deleted { id }.into());
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) {
            layer.visible = visible;
            self.events.emit(DrawLayerEvent::VisibilityChanged { id, visible }.into());
        }
    }

    pub fn set_locked(&mut self, id: LayerId, locked: bool) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) {
            layer.locked = locked;
            self.events.emit(DrawLayerEvent::LockChanged { id, locked }.into());
        }
    }

    /// Activate a layer. Locked layers refuse activation.
    pub fn set_active(&mut self, id: LayerId) {
        let Some(layer) = self.layer(id) else { return };
        if layer.locked {
            return;
        }
        self.active = Some(id);
        self.events.emit(DrawLayerEvent::Activated { id: Some(id) }.into());
    }

    /// Move `dragged` so it lands at `target_index`, preserving all other
    /// relative order.
    pub fn reorder(&mut self, dragged: LayerId, target_index: usize) {
        let Some(from) = self.layers.iter().position(|l| l.id == dragged) else {
            return;
        };
        if target_index >= self.layers.len() || from == target_index {
            return;
        }
        let layer = self.layers.remove(from);
        self.layers.insert(target_index, layer);
        self.events.emit(DrawLayerEvent::Reordered.into());
    }

    pub fn clear_all(&mut self) {
        self.layers.clear();
        self.active = None;
        self.events.emit(DrawLayerEvent::Cleared.into());
    }

    // Object mutators used by the drawing tool state machine. Each one
    // only applies to the currently editable layer; anything else is a
    // silent no-op (a layer can be locked mid-gesture).

    /// Append a finished or seeded object to the editable layer.
    pub fn push_object(&mut self, id: LayerId, object: DrawObject) {
        if self.editable_layer_id() != Some(id) {
            return;
        }
        if let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) {
            layer.objects.push(object);
            self.events.emit(DrawLayerEvent::ObjectsChanged { id }.into());
        }
    }

    /// Append one point to the pen object currently being drawn (the last
    /// object on the layer).
    pub fn append_pen_point(&mut self, id: LayerId, pos: Pos2) {
        if self.editable_layer_id() != Some(id) {
            return;
        }
        if let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) {
            if let Some(DrawObject::Pen { points, .. }) = layer.objects.last_mut() {
                points.push(pos);
                self.events.emit(DrawLayerEvent::ObjectsChanged { id }.into());
            }
        }
    }

    /// Remove every object on the editable layer hit by the pointer.
    pub fn erase_at(&mut self, id: LayerId, pos: Pos2) {
        if self.editable_layer_id() != Some(id) {
            return;
        }
        if let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) {
            let before = layer.objects.len();
            layer.objects.retain(|obj| !obj.hit_test(pos));
            if layer.objects.len() != before {
                self.events.emit(DrawLayerEvent::ObjectsChanged { id }.into());
            }
        }
    }

    /// Clear the editable layer's object list (the "clear drawing"
    /// control).
    pub fn clear_objects(&mut self, id: LayerId) {
        if self.editable_layer_id() != Some(id) {
            return;
        }
        if let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) {
            layer.objects.clear();
            self.events.emit(DrawLayerEvent::ObjectsChanged { id }.into());
        }
    }
}
