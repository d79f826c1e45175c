//! One client session over one floor plan.
//!
//! Wires the entity store, gesture controller, hover and overlay state, and
//! the sync engine together, and owns the tick that drains completions.
//! Everything here runs on one logical thread; the only suspension points
//! are the remote calls inside the engine's spawned tasks.

use std::sync::Arc;

use floorkit_core::{
    default_pallet_assignment, Config, EntityId, EntityKind, Product, ProductCatalog, Result,
};
use floorkit_designer::{
    CanvasBounds, DetailOverlay, FloorStore, GestureController, HoverState, Removal,
};
use tracing::info;

use crate::engine::{SyncEngine, SyncOutcome};
use crate::remote::RemoteStore;

/// An interactive floor-plan editing session.
#[derive(Debug)]
pub struct DepotSession {
    store: FloorStore,
    gestures: GestureController,
    hover: HoverState,
    overlay: DetailOverlay,
    engine: SyncEngine,
}

impl DepotSession {
    /// Creates a session over the given remote collaborator.
    pub fn new(config: &Config, remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            store: FloorStore::new(),
            gestures: GestureController::new(CanvasBounds::from(config.canvas)),
            hover: HoverState::new(),
            overlay: DetailOverlay::new(),
            engine: SyncEngine::new(remote),
        }
    }

    /// Seeds the rack partition from the remote listing and attaches
    /// gesture bindings for the seeded entities.
    pub async fn start(&mut self) -> Result<usize> {
        let count = self.engine.seed(&mut self.store).await?;
        let ids: Vec<EntityId> = self
            .store
            .list(EntityKind::Rack)
            .iter()
            .map(|e| e.id)
            .collect();
        for id in ids {
            self.gestures.attach(&self.store, id);
        }
        info!("Session started with {} seeded racks", count);
        Ok(count)
    }

    /// Adds a rack with the given product assignments. The rack is
    /// interactive immediately; the remote create runs in the background.
    pub fn add_rack(&mut self, products: Vec<Product>) -> EntityId {
        self.add_entity(EntityKind::Rack, products)
    }

    /// Adds a session-local pallet.
    pub fn add_pallet(&mut self, products: Vec<Product>) -> EntityId {
        self.add_entity(EntityKind::Pallet, products)
    }

    /// Adds a pallet assigned the default catalog window.
    pub fn add_pallet_from_catalog(&mut self, catalog: &dyn ProductCatalog) -> EntityId {
        self.add_pallet(default_pallet_assignment(catalog))
    }

    /// Adds a session-local door.
    pub fn add_door(&mut self) -> EntityId {
        self.add_entity(EntityKind::Door, Vec::new())
    }

    fn add_entity(&mut self, kind: EntityKind, products: Vec<Product>) -> EntityId {
        let id = self.store.create(kind, products);
        self.gestures.attach(&self.store, id);
        if let Some(entity) = self.store.get(id) {
            self.engine.entity_created(entity);
        }
        id
    }

    /// Removes an entity: racks and pallets are deleted, doors are hidden.
    /// A confirmed rack also gets a remote delete.
    pub fn remove_entity(&mut self, id: EntityId) {
        let removal = self.store.remove(id);
        match &removal {
            Removal::Removed { .. } => {
                self.gestures.detach(id);
                self.hover.entity_removed(id);
                self.overlay.entity_removed(id);
                self.engine.entity_removed(&removal);
            }
            Removal::Hidden => {
                self.gestures.queue_rebind(id);
                self.hover.entity_removed(id);
            }
            Removal::NotFound => {}
        }
    }

    /// Flips an entity's lock flag and queues the gesture rebind that the
    /// next tick applies.
    pub fn toggle_lock(&mut self, id: EntityId) -> Option<bool> {
        let locked = self.store.toggle_lock(id)?;
        self.gestures.queue_rebind(id);
        Some(locked)
    }

    /// Runs one event tick: drains sync completions, rekeys any state that
    /// held retired ids, and applies queued gesture rebinds.
    pub fn tick(&mut self) -> Vec<SyncOutcome> {
        let outcomes = self.engine.apply_completions(&mut self.store);
        for outcome in &outcomes {
            match *outcome {
                SyncOutcome::Reconciled { local, canonical } => {
                    self.gestures.rekey(local, canonical);
                    self.hover.rekey(local, canonical);
                    self.overlay.rekey(local, canonical);
                }
                SyncOutcome::RolledBack { local } => {
                    self.gestures.detach(local);
                    self.hover.entity_removed(local);
                    self.overlay.entity_removed(local);
                }
                SyncOutcome::Restored { id } => {
                    self.gestures.attach(&self.store, id);
                }
            }
        }
        self.gestures.process_rebinds(&self.store);
        outcomes
    }

    /// The entity store.
    pub fn store(&self) -> &FloorStore {
        &self.store
    }

    /// Mutable store and gesture controller access, for driving gesture
    /// frames.
    pub fn parts_mut(&mut self) -> (&mut FloorStore, &mut GestureController) {
        (&mut self.store, &mut self.gestures)
    }

    /// The gesture controller.
    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    /// The hover state.
    pub fn hover_mut(&mut self) -> &mut HoverState {
        &mut self.hover
    }

    /// The overlay state, with read access to the store for panel opening.
    pub fn overlay_mut(&mut self) -> (&mut DetailOverlay, &FloorStore) {
        (&mut self.overlay, &self.store)
    }

    /// Whether any create request is still awaiting confirmation.
    pub fn has_pending_creates(&self) -> bool {
        self.engine.has_pending_creates()
    }
}
