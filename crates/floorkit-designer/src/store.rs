//! The authoritative in-memory entity collection.
//!
//! Entities are partitioned by kind. Racks, pallets, and doors are
//! independent collections with their own lifecycle rules, never merged
//! into one ordered list. Insertion order is preserved and is the only
//! defined order.
//!
//! All structural invariants (id uniqueness, local id assignment, atomic
//! reconciliation) are enforced here, at one boundary, rather than at every
//! call site.

use floorkit_core::emit;
use floorkit_core::event_bus::{AppEvent, LayoutEvent};
use floorkit_core::{EntityId, EntityKind, Product, Result, StoreError};
use tracing::debug;

use crate::entity::PlaceableEntity;

/// Outcome of a `remove` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    /// A rack or pallet was removed. The record and its insertion index are
    /// returned so a failed remote delete can restore it in place.
    Removed {
        /// The removed record.
        entity: PlaceableEntity,
        /// Its position within the kind partition.
        index: usize,
    },
    /// A door was soft-deleted. The record stays in the collection with
    /// `visible = false`.
    Hidden,
    /// No entity with that id exists. Expected under concurrent
    /// edit/delete, not an error.
    NotFound,
}

/// The authoritative collection of all placeable entities.
#[derive(Debug, Default)]
pub struct FloorStore {
    racks: Vec<PlaceableEntity>,
    pallets: Vec<PlaceableEntity>,
    doors: Vec<PlaceableEntity>,
    /// Monotonic counter for local id assignment. Never reused within a
    /// session, so ids stay unique under any create/delete interleaving.
    next_local_id: u64,
    rack_count: u64,
    pallet_count: u64,
}

impl FloorStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn partition(&self, kind: EntityKind) -> &Vec<PlaceableEntity> {
        match kind {
            EntityKind::Rack => &self.racks,
            EntityKind::Pallet => &self.pallets,
            EntityKind::Door => &self.doors,
        }
    }

    fn partition_mut(&mut self, kind: EntityKind) -> &mut Vec<PlaceableEntity> {
        match kind {
            EntityKind::Rack => &mut self.racks,
            EntityKind::Pallet => &mut self.pallets,
            EntityKind::Door => &mut self.doors,
        }
    }

    /// Creates an entity with a fresh local id and default geometry, and
    /// inserts it at the end of its kind partition.
    ///
    /// Racks and pallets receive a generated label and the given product
    /// assignments; the product list is ignored for doors.
    pub fn create(&mut self, kind: EntityKind, products: Vec<Product>) -> EntityId {
        self.next_local_id += 1;
        let id = EntityId::Local(self.next_local_id);

        let mut entity = PlaceableEntity::new(id, kind);
        match kind {
            EntityKind::Rack => {
                self.rack_count += 1;
                entity.label = Some(format!("Rack-{}", self.rack_count));
                entity.products = products;
            }
            EntityKind::Pallet => {
                self.pallet_count += 1;
                entity.label = Some(format!("Palet-{}", self.pallet_count));
                entity.products = products;
            }
            EntityKind::Door => {}
        }

        debug!("Created {} {}", kind, id);
        self.partition_mut(kind).push(entity);
        emit!(AppEvent::Layout(LayoutEvent::EntityCreated { kind, id })).ok();
        id
    }

    /// Inserts a pre-built entity, as when seeding racks from the remote
    /// listing at session start.
    pub fn insert_seeded(&mut self, entity: PlaceableEntity) -> Result<()> {
        if self.contains(entity.id) {
            return Err(StoreError::DuplicateId {
                id: entity.id.to_string(),
            }
            .into());
        }
        // Seeded records count toward label numbering so the next created
        // entity of the same kind does not reuse a label.
        match entity.kind {
            EntityKind::Rack => self.rack_count += 1,
            EntityKind::Pallet => self.pallet_count += 1,
            EntityKind::Door => {}
        }
        let kind = entity.kind;
        self.partition_mut(kind).push(entity);
        Ok(())
    }

    /// Looks up an entity by id across all partitions.
    pub fn get(&self, id: EntityId) -> Option<&PlaceableEntity> {
        self.racks
            .iter()
            .chain(self.pallets.iter())
            .chain(self.doors.iter())
            .find(|e| e.id == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut PlaceableEntity> {
        self.racks
            .iter_mut()
            .chain(self.pallets.iter_mut())
            .chain(self.doors.iter_mut())
            .find(|e| e.id == id)
    }

    /// Whether an entity with this id exists.
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Applies a partial mutation to the entity with the given id.
    ///
    /// Returns false without applying anything if the id is not found. This
    /// covers races with deletion and is deliberately silent.
    pub fn update<F>(&mut self, id: EntityId, f: F) -> bool
    where
        F: FnOnce(&mut PlaceableEntity),
    {
        match self.get_mut(id) {
            Some(entity) => {
                f(entity);
                true
            }
            None => {
                debug!("Update dropped for absent entity {}", id);
                false
            }
        }
    }

    /// Removes a rack or pallet, or hides a door.
    ///
    /// Doors are never hard-deleted; their record is retained with
    /// `visible = false` so the collection keeps its history of placements.
    pub fn remove(&mut self, id: EntityId) -> Removal {
        let Some(kind) = self.get(id).map(|e| e.kind) else {
            return Removal::NotFound;
        };

        if kind == EntityKind::Door {
            if let Some(door) = self.doors.iter_mut().find(|e| e.id == id) {
                door.visible = false;
            }
            debug!("Hid door {}", id);
            emit!(AppEvent::Layout(LayoutEvent::DoorHidden { id })).ok();
            return Removal::Hidden;
        }

        let partition = self.partition_mut(kind);
        match partition.iter().position(|e| e.id == id) {
            Some(index) => {
                let entity = partition.remove(index);
                debug!("Removed {} {}", kind, id);
                emit!(AppEvent::Layout(LayoutEvent::EntityRemoved { kind, id })).ok();
                Removal::Removed { entity, index }
            }
            None => Removal::NotFound,
        }
    }

    /// Reinserts a previously removed entity at its former index.
    ///
    /// Used to roll back a remote delete failure. The index is clamped to
    /// the current partition length, so restores stay valid even if other
    /// entities were removed in the meantime.
    pub fn restore(&mut self, entity: PlaceableEntity, index: usize) {
        debug!("Restored {} {}", entity.kind, entity.id);
        let partition = self.partition_mut(entity.kind);
        let index = index.min(partition.len());
        partition.insert(index, entity);
    }

    /// Flips the lock flag on an entity, returning the new state.
    ///
    /// Returns None if the id is not found. No other entity is affected.
    pub fn toggle_lock(&mut self, id: EntityId) -> Option<bool> {
        let entity = self.get_mut(id)?;
        entity.geometry.locked = !entity.geometry.locked;
        let locked = entity.geometry.locked;
        debug!("Lock {} -> {}", id, locked);
        emit!(AppEvent::Layout(LayoutEvent::LockToggled { id, locked })).ok();
        Some(locked)
    }

    /// Replaces a local id with the canonical id assigned by the remote
    /// store, in place.
    ///
    /// Atomic from the consumer's point of view: the entry is rekeyed, never
    /// duplicated. Only the identity changes; geometry committed since the
    /// create request stays untouched. Returns Ok(false) when the local id
    /// is no longer present (already reconciled, or deleted before
    /// confirmation), which makes duplicate or delayed confirmations no-ops.
    pub fn reconcile_id(&mut self, local: EntityId, canonical: EntityId) -> Result<bool> {
        if !local.is_local() {
            return Err(StoreError::NotLocal {
                id: local.to_string(),
            }
            .into());
        }
        if self.contains(canonical) {
            return Err(StoreError::DuplicateId {
                id: canonical.to_string(),
            }
            .into());
        }
        match self.get_mut(local) {
            Some(entity) => {
                entity.id = canonical;
                debug!("Reconciled {} -> {}", local, canonical);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Current snapshot of one kind partition, in insertion order.
    pub fn list(&self, kind: EntityKind) -> &[PlaceableEntity] {
        self.partition(kind)
    }

    /// Visible doors, for rendering and interaction.
    pub fn visible_doors(&self) -> impl Iterator<Item = &PlaceableEntity> {
        self.doors.iter().filter(|d| d.visible)
    }
}
