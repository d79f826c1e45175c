//! The remote store contract and its wire records.
//!
//! Only racks are persisted remotely. Pallets and doors are session-local
//! and no request is ever issued for them; the asymmetry is intentional
//! product behavior and preserved here.

use async_trait::async_trait;
use floorkit_core::{EntityId, EntityKind, Product, Result};
use floorkit_designer::{PlaceableEntity, Point};
use serde::{Deserialize, Serialize};

/// A persisted rack as the remote store exchanges it.
///
/// This shape is the contract collaborators honor when seeding the entity
/// store; the field names are fixed by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackRecord {
    /// Canonical id assigned by the remote store.
    pub id: u64,
    /// Position on the canvas.
    pub x: f64,
    /// Position on the canvas.
    pub y: f64,
    /// Lock flag at last persist.
    pub locked: bool,
    /// The scannable-code payload.
    #[serde(rename = "qrData")]
    pub qr_data: String,
    /// Assigned product references.
    pub productos: Vec<Product>,
}

impl RackRecord {
    /// Builds a store entity from a seeded record.
    pub fn into_entity(self) -> PlaceableEntity {
        let mut entity = PlaceableEntity::new(EntityId::Canonical(self.id), EntityKind::Rack);
        entity.geometry.position = Point::new(self.x, self.y);
        entity.geometry.locked = self.locked;
        entity.label = Some(self.qr_data);
        entity.products = self.productos;
        entity
    }
}

/// A create request payload: a [`RackRecord`] minus the id the remote store
/// has yet to assign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRackRecord {
    /// Position on the canvas.
    pub x: f64,
    /// Position on the canvas.
    pub y: f64,
    /// Lock flag.
    pub locked: bool,
    /// The scannable-code payload.
    #[serde(rename = "qrData")]
    pub qr_data: String,
    /// Assigned product references.
    pub productos: Vec<Product>,
}

impl NewRackRecord {
    /// Snapshot of an entity at create time.
    pub fn from_entity(entity: &PlaceableEntity) -> Self {
        Self {
            x: entity.geometry.position.x,
            y: entity.geometry.position.y,
            locked: entity.geometry.locked,
            qr_data: entity.label.clone().unwrap_or_default(),
            productos: entity.products.clone(),
        }
    }
}

/// The remote persistence collaborator.
///
/// Implementations own transport, endpoint, and timeout concerns; errors
/// surface as [`floorkit_core::RemoteError`] variants inside the unified
/// error type.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Persists a new rack, returning the canonical id it was assigned.
    async fn create_rack(&self, record: NewRackRecord) -> Result<u64>;

    /// Deletes a persisted rack by canonical id.
    async fn delete_rack(&self, canonical_id: u64) -> Result<()>;

    /// Lists all persisted racks. Used once at session start to seed the
    /// entity store.
    async fn list_racks(&self) -> Result<Vec<RackRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_shape() {
        let record = RackRecord {
            id: 4,
            x: 10.0,
            y: 20.0,
            locked: true,
            qr_data: "Rack-4".to_string(),
            productos: Vec::new(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"qrData\":\"Rack-4\""));
        assert!(json.contains("\"productos\":[]"));
        assert!(json.contains("\"locked\":true"));
    }

    #[test]
    fn test_seeded_record_becomes_canonical_entity() {
        let record = RackRecord {
            id: 9,
            x: 120.0,
            y: 45.0,
            locked: false,
            qr_data: "Rack-2".to_string(),
            productos: Vec::new(),
        };
        let entity = record.into_entity();
        assert_eq!(entity.id, EntityId::Canonical(9));
        assert_eq!(entity.kind, EntityKind::Rack);
        assert_eq!(entity.geometry.position, Point::new(120.0, 45.0));
        assert_eq!(entity.label.as_deref(), Some("Rack-2"));
    }
}
