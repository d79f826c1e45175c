//! Placeable entity records.

use floorkit_core::{EntityId, EntityKind, Product};
use serde::{Deserialize, Serialize};

use crate::geometry::EntityGeometry;

/// One placeable object on the floor plan.
///
/// The geometry model is the single source of truth for spatial state; the
/// rendering layer reads from it and never the reverse. Kind is fixed at
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceableEntity {
    /// Store-unique identity. Local until the remote store confirms.
    pub id: EntityId,
    /// Rack, pallet, or door.
    pub kind: EntityKind,
    /// Position, size, rotation, lock.
    pub geometry: EntityGeometry,
    /// Scannable-code payload. Racks and pallets only.
    pub label: Option<String>,
    /// Non-owning references into the product catalog. Racks and pallets
    /// only; doors never carry products.
    pub products: Vec<Product>,
    /// Soft-delete flag. Only doors are ever hidden.
    pub visible: bool,
}

impl PlaceableEntity {
    /// Creates an entity with default geometry for its kind.
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        let geometry = match kind {
            EntityKind::Door => EntityGeometry::door(),
            _ => EntityGeometry::new(),
        };
        Self {
            id,
            kind,
            geometry,
            label: None,
            products: Vec::new(),
            visible: true,
        }
    }

    /// Whether resize gestures apply to this kind.
    pub fn supports_resize(&self) -> bool {
        matches!(self.kind, EntityKind::Rack | EntityKind::Pallet)
    }

    /// Whether rotate gestures apply to this kind.
    pub fn supports_rotate(&self) -> bool {
        matches!(self.kind, EntityKind::Rack | EntityKind::Pallet)
    }

    /// Whether this kind carries a label and product assignments.
    pub fn carries_products(&self) -> bool {
        matches!(self.kind, EntityKind::Rack | EntityKind::Pallet)
    }

    /// Whether the entity currently accepts gestures at all.
    pub fn interactive(&self) -> bool {
        self.visible && !self.geometry.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_defaults() {
        let door = PlaceableEntity::new(EntityId::Local(1), EntityKind::Door);
        assert_eq!(door.geometry.size.width, 40.0);
        assert_eq!(door.geometry.size.height, 40.0);
        assert!(!door.supports_resize());
        assert!(!door.supports_rotate());
        assert!(!door.carries_products());
        assert!(door.visible);
    }

    #[test]
    fn test_rack_defaults() {
        let rack = PlaceableEntity::new(EntityId::Local(2), EntityKind::Rack);
        assert_eq!(rack.geometry.size.width, 100.0);
        assert_eq!(rack.geometry.rotation, 0.0);
        assert!(!rack.geometry.locked);
        assert!(rack.supports_resize());
        assert!(rack.carries_products());
    }
}
