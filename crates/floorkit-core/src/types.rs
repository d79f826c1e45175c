//! Shared identity types for placeable entities.

use serde::{Deserialize, Serialize};

/// The kind of a placeable entity. Fixed at creation, never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Storage rack. Persisted remotely.
    Rack,
    /// Pallet. Session-local.
    Pallet,
    /// Doorway. Session-local, soft-deleted only.
    Door,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Rack => write!(f, "rack"),
            EntityKind::Pallet => write!(f, "pallet"),
            EntityKind::Door => write!(f, "door"),
        }
    }
}

/// Identity of a placeable entity.
///
/// An entity has exactly one authoritative id at any time. It starts life
/// with a `Local` id assigned by the store's monotonic counter, and — for
/// kinds that are persisted — is swapped for the `Canonical` id assigned by
/// the remote store once the create request confirms. The two phases live in
/// disjoint halves of the id space, so a stale local id can never collide
/// with a canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityId {
    /// Session-local id, assigned before remote confirmation.
    Local(u64),
    /// Id assigned by the remote store.
    Canonical(u64),
}

impl EntityId {
    /// Returns true for ids not yet confirmed by the remote store.
    pub fn is_local(&self) -> bool {
        matches!(self, EntityId::Local(_))
    }

    /// Returns true for remote-assigned ids.
    pub fn is_canonical(&self) -> bool {
        matches!(self, EntityId::Canonical(_))
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityId::Local(n) => write!(f, "local:{n}"),
            EntityId::Canonical(n) => write!(f, "remote:{n}"),
        }
    }
}
