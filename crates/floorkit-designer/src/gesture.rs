//! Gesture controller.
//!
//! Binds pointer/touch event sequences (press, move frames, release) to
//! geometry model calls for a specific entity. Three independent gesture
//! kinds exist per entity: drag, resize, and rotate. Gestures on different
//! entities are honored independently; each pointer sequence targets exactly
//! one entity, so no two gestures ever mutate the same geometry.
//!
//! Lock handling is delegated entirely to the geometry model: a frame on a
//! locked entity commits nothing because the `apply_*` functions are
//! identity. The binding's attachment flag only decides whether a *new*
//! gesture may begin, and it is deliberately a snapshot: a lock toggle
//! queues a rebind that [`GestureController::process_rebinds`] applies on
//! the next tick, after the toggle has settled in the store. This replaces
//! a timing assumption with a deterministic post-commit hook.

use std::collections::{HashMap, HashSet};

use floorkit_core::EntityId;
use tracing::{debug, trace};

use crate::geometry::{CanvasBounds, Rect, ResizeEdges};
use crate::store::FloorStore;

/// The gesture kinds an entity binding can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Translate the entity.
    Drag,
    /// Resize from an edge or corner.
    Resize,
    /// Two-point twist rotation.
    Rotate,
}

/// An in-flight gesture on one entity.
#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    kind: GestureKind,
    /// Whether any frame committed a change. Bounds clamping at gesture end
    /// only runs when something moved.
    moved: bool,
}

/// Per-entity handler attachment state.
#[derive(Debug, Clone)]
struct GestureBinding {
    /// Whether new gestures may begin. A snapshot of the entity's
    /// interactivity taken at attach or rebind time.
    accepts_gestures: bool,
    active: Option<ActiveGesture>,
}

/// Translates pointer input into geometry mutations for bound entities.
#[derive(Debug)]
pub struct GestureController {
    bindings: HashMap<EntityId, GestureBinding>,
    pending_rebinds: HashSet<EntityId>,
    canvas: CanvasBounds,
}

impl GestureController {
    /// Creates a controller for the given canvas bounds.
    pub fn new(canvas: CanvasBounds) -> Self {
        Self {
            bindings: HashMap::new(),
            pending_rebinds: HashSet::new(),
            canvas,
        }
    }

    /// Attaches gesture handling for an entity. No-op if the entity is not
    /// in the store.
    pub fn attach(&mut self, store: &FloorStore, id: EntityId) {
        let Some(entity) = store.get(id) else {
            return;
        };
        self.bindings.insert(
            id,
            GestureBinding {
                accepts_gestures: entity.interactive(),
                active: None,
            },
        );
        trace!("Attached gesture binding for {}", id);
    }

    /// Detaches gesture handling for a removed entity.
    pub fn detach(&mut self, id: EntityId) {
        self.bindings.remove(&id);
        self.pending_rebinds.remove(&id);
    }

    /// Marks an entity for re-attachment on the next tick.
    ///
    /// Called when the lock flag (or visibility) changes. The binding keeps
    /// its current snapshot until [`Self::process_rebinds`] runs.
    pub fn queue_rebind(&mut self, id: EntityId) {
        self.pending_rebinds.insert(id);
    }

    /// Applies all queued rebinds against the store's current state.
    ///
    /// Run once per tick, after store mutations for the tick have committed,
    /// so each refreshed binding observes the settled flag rather than a
    /// value captured before the toggle. Bindings for entities no longer in
    /// the store are dropped.
    pub fn process_rebinds(&mut self, store: &FloorStore) {
        for id in std::mem::take(&mut self.pending_rebinds) {
            match store.get(id) {
                Some(entity) => {
                    if let Some(binding) = self.bindings.get_mut(&id) {
                        binding.accepts_gestures = entity.interactive();
                        trace!("Rebound {} accepts={}", id, binding.accepts_gestures);
                    }
                }
                None => {
                    self.bindings.remove(&id);
                }
            }
        }
    }

    /// Moves a binding from a local id to its canonical id.
    ///
    /// Part of identity reconciliation: after this, no binding references
    /// the retired local id.
    pub fn rekey(&mut self, local: EntityId, canonical: EntityId) {
        if let Some(binding) = self.bindings.remove(&local) {
            self.bindings.insert(canonical, binding);
        }
        if self.pending_rebinds.remove(&local) {
            self.pending_rebinds.insert(canonical);
        }
    }

    /// Whether an entity currently accepts new gestures.
    pub fn accepts_gestures(&self, id: EntityId) -> bool {
        self.bindings
            .get(&id)
            .map(|b| b.accepts_gestures)
            .unwrap_or(false)
    }

    /// Begins a gesture on an entity.
    ///
    /// Returns false (and starts nothing) when the entity has no binding,
    /// the binding does not accept gestures, the entity is gone or hidden,
    /// or the gesture kind does not apply to its kind. Doors only drag.
    pub fn begin(&mut self, store: &FloorStore, id: EntityId, kind: GestureKind) -> bool {
        let Some(entity) = store.get(id) else {
            trace!("Gesture begin dropped for absent entity {}", id);
            return false;
        };
        if !entity.visible {
            return false;
        }
        let supported = match kind {
            GestureKind::Drag => true,
            GestureKind::Resize => entity.supports_resize(),
            GestureKind::Rotate => entity.supports_rotate(),
        };
        if !supported {
            return false;
        }
        let Some(binding) = self.bindings.get_mut(&id) else {
            return false;
        };
        if !binding.accepts_gestures || binding.active.is_some() {
            return false;
        }
        binding.active = Some(ActiveGesture { kind, moved: false });
        debug!("Gesture {:?} began on {}", kind, id);
        true
    }

    /// Applies one drag frame: a pixel delta from the previous committed
    /// frame.
    ///
    /// The new position is committed immediately without bounds clamping;
    /// intermediate frames may overshoot the canvas. Frames for an entity
    /// with no active drag, or one deleted or hidden mid-gesture, are
    /// silently dropped.
    pub fn drag_by(&mut self, store: &mut FloorStore, id: EntityId, dx: f64, dy: f64) -> bool {
        if !self.frame_active(store, id, GestureKind::Drag) {
            return false;
        }
        let applied = store.update(id, |entity| {
            entity.geometry.position = entity.geometry.apply_translation(dx, dy);
        });
        self.note_frame(id, applied);
        applied
    }

    /// Applies one resize frame toward a proposed rectangle.
    ///
    /// The size is clamped to its permitted range before committing, every
    /// frame, with the anchor edge compensated so it stays put.
    pub fn resize_to(
        &mut self,
        store: &mut FloorStore,
        id: EntityId,
        edges: ResizeEdges,
        proposed: Rect,
    ) -> bool {
        if !self.frame_active(store, id, GestureKind::Resize) {
            return false;
        }
        let applied = store.update(id, |entity| {
            let (position, size) = entity.geometry.apply_resize(edges, proposed);
            entity.geometry.position = position;
            entity.geometry.size = size;
        });
        self.note_frame(id, applied);
        applied
    }

    /// Applies one rotation frame: a delta in degrees.
    ///
    /// Deltas accumulate against the current angle rather than computing an
    /// absolute angle, so multi-frame gestures that cross the 0/360 boundary
    /// normalize correctly.
    pub fn rotate_by(&mut self, store: &mut FloorStore, id: EntityId, delta_deg: f64) -> bool {
        if !self.frame_active(store, id, GestureKind::Rotate) {
            return false;
        }
        let applied = store.update(id, |entity| {
            entity.geometry.rotation = entity.geometry.apply_rotation(delta_deg);
        });
        self.note_frame(id, applied);
        applied
    }

    /// Ends the active gesture on an entity and commits the end-only bounds
    /// restriction: the final position is clamped so the bounding box stays
    /// within the canvas.
    pub fn end(&mut self, store: &mut FloorStore, id: EntityId) {
        let Some(binding) = self.bindings.get_mut(&id) else {
            return;
        };
        let Some(active) = binding.active.take() else {
            return;
        };
        if !active.moved {
            return;
        }
        let canvas = self.canvas;
        store.update(id, |entity| {
            if entity.visible {
                entity.geometry.position =
                    entity.geometry.clamp_position(entity.geometry.position, canvas);
            }
        });
        debug!("Gesture {:?} ended on {}", active.kind, id);
    }

    fn frame_active(&self, store: &FloorStore, id: EntityId, kind: GestureKind) -> bool {
        // Entities hidden mid-gesture stop accepting frames immediately,
        // before the deferred rebind runs
        if !store.get(id).is_some_and(|e| e.visible) {
            return false;
        }
        matches!(
            self.bindings.get(&id).and_then(|b| b.active),
            Some(active) if active.kind == kind
        )
    }

    fn note_frame(&mut self, id: EntityId, applied: bool) {
        if let Some(binding) = self.bindings.get_mut(&id) {
            if let Some(active) = binding.active.as_mut() {
                active.moved |= applied;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use floorkit_core::EntityKind;

    fn setup(kind: EntityKind) -> (FloorStore, GestureController, EntityId) {
        let mut store = FloorStore::new();
        let id = store.create(kind, Vec::new());
        let mut controller = GestureController::new(CanvasBounds::new(1200.0, 600.0));
        controller.attach(&store, id);
        (store, controller, id)
    }

    #[test]
    fn test_drag_commits_each_frame() {
        let (mut store, mut ctl, id) = setup(EntityKind::Rack);
        assert!(ctl.begin(&store, id, GestureKind::Drag));
        ctl.drag_by(&mut store, id, 40.0, 25.0);
        assert_eq!(store.get(id).unwrap().geometry.position, Point::new(40.0, 25.0));
        ctl.drag_by(&mut store, id, -10.0, 5.0);
        assert_eq!(store.get(id).unwrap().geometry.position, Point::new(30.0, 30.0));
    }

    #[test]
    fn test_drag_without_begin_is_dropped() {
        let (mut store, mut ctl, id) = setup(EntityKind::Rack);
        assert!(!ctl.drag_by(&mut store, id, 10.0, 10.0));
        assert_eq!(store.get(id).unwrap().geometry.position, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_end_only_bounds_clamp() {
        let (mut store, mut ctl, id) = setup(EntityKind::Rack);
        ctl.begin(&store, id, GestureKind::Drag);
        // Intermediate frames overshoot the 1200-wide canvas
        ctl.drag_by(&mut store, id, 1500.0, 0.0);
        assert_eq!(store.get(id).unwrap().geometry.position.x, 1500.0);
        ctl.end(&mut store, id);
        // Committed position keeps the 100-wide box inside
        assert_eq!(store.get(id).unwrap().geometry.position.x, 1100.0);
    }

    #[test]
    fn test_resize_clamps_before_commit() {
        let (mut store, mut ctl, id) = setup(EntityKind::Rack);
        ctl.begin(&store, id, GestureKind::Resize);
        ctl.resize_to(
            &mut store,
            id,
            ResizeEdges::BOTTOM_RIGHT,
            Rect::new(0.0, 0.0, 20.0, 20.0),
        );
        let size = store.get(id).unwrap().geometry.size;
        assert_eq!((size.width, size.height), (50.0, 50.0));
    }

    #[test]
    fn test_rotation_accumulates_across_wrap() {
        let (mut store, mut ctl, id) = setup(EntityKind::Pallet);
        ctl.begin(&store, id, GestureKind::Rotate);
        ctl.rotate_by(&mut store, id, 350.0);
        ctl.rotate_by(&mut store, id, 20.0);
        assert_eq!(store.get(id).unwrap().geometry.rotation, 10.0);
    }

    #[test]
    fn test_door_rejects_resize_and_rotate() {
        let (store, mut ctl, id) = setup(EntityKind::Door);
        assert!(!ctl.begin(&store, id, GestureKind::Resize));
        assert!(!ctl.begin(&store, id, GestureKind::Rotate));
        assert!(ctl.begin(&store, id, GestureKind::Drag));
    }

    #[test]
    fn test_locked_entity_frames_commit_nothing() {
        let (mut store, mut ctl, id) = setup(EntityKind::Rack);
        store.toggle_lock(id);
        ctl.queue_rebind(id);

        // Before the rebind processes, the stale binding still accepts the
        // gesture. The geometry model is the enforcement point, so the
        // frame commits nothing.
        ctl.begin(&store, id, GestureKind::Drag);
        ctl.drag_by(&mut store, id, 10.0, 10.0);
        assert_eq!(store.get(id).unwrap().geometry.position, Point::new(0.0, 0.0));
        ctl.end(&mut store, id);

        // After the rebind, gestures no longer begin at all.
        ctl.process_rebinds(&store);
        assert!(!ctl.begin(&store, id, GestureKind::Drag));
    }

    #[test]
    fn test_unlock_reaccepts_gestures_after_rebind() {
        let (mut store, mut ctl, id) = setup(EntityKind::Rack);
        store.toggle_lock(id);
        ctl.queue_rebind(id);
        ctl.process_rebinds(&store);
        assert!(!ctl.accepts_gestures(id));

        store.toggle_lock(id);
        ctl.queue_rebind(id);
        ctl.process_rebinds(&store);
        assert!(ctl.accepts_gestures(id));
        assert!(ctl.begin(&store, id, GestureKind::Drag));
    }

    #[test]
    fn test_frames_for_deleted_entity_dropped() {
        let (mut store, mut ctl, id) = setup(EntityKind::Rack);
        ctl.begin(&store, id, GestureKind::Drag);
        store.remove(id);
        assert!(!ctl.drag_by(&mut store, id, 10.0, 10.0));
    }

    #[test]
    fn test_frames_for_hidden_door_dropped() {
        let (mut store, mut ctl, id) = setup(EntityKind::Door);
        ctl.begin(&store, id, GestureKind::Drag);
        ctl.drag_by(&mut store, id, 5.0, 5.0);

        // Soft-deleted mid-gesture: the record survives but interaction
        // stops in the same tick, before any rebind runs
        store.remove(id);
        assert!(!ctl.drag_by(&mut store, id, 10.0, 10.0));
        ctl.end(&mut store, id);
        assert_eq!(store.get(id).unwrap().geometry.position, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_concurrent_gestures_on_distinct_entities() {
        let mut store = FloorStore::new();
        let a = store.create(EntityKind::Rack, Vec::new());
        let b = store.create(EntityKind::Pallet, Vec::new());
        let mut ctl = GestureController::new(CanvasBounds::default());
        ctl.attach(&store, a);
        ctl.attach(&store, b);

        assert!(ctl.begin(&store, a, GestureKind::Drag));
        assert!(ctl.begin(&store, b, GestureKind::Rotate));
        ctl.drag_by(&mut store, a, 5.0, 5.0);
        ctl.rotate_by(&mut store, b, 90.0);

        assert_eq!(store.get(a).unwrap().geometry.position, Point::new(5.0, 5.0));
        assert_eq!(store.get(b).unwrap().geometry.rotation, 90.0);
    }

    #[test]
    fn test_rekey_moves_binding() {
        let (mut store, mut ctl, id) = setup(EntityKind::Rack);
        let canonical = floorkit_core::EntityId::Canonical(42);
        store.reconcile_id(id, canonical).unwrap();
        ctl.rekey(id, canonical);

        assert!(!ctl.accepts_gestures(id));
        assert!(ctl.begin(&store, canonical, GestureKind::Drag));
        ctl.drag_by(&mut store, canonical, 3.0, 0.0);
        assert_eq!(store.get(canonical).unwrap().geometry.position.x, 3.0);
    }
}
