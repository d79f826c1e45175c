//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so an embedding application can
//! log them or forward them across a process boundary.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, EntityKind};

/// Root event enum for all engine events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// Entity lifecycle and geometry events
    Layout(LayoutEvent),
    /// Persistence synchronization events
    Sync(SyncEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Layout(_) => EventCategory::Layout,
            AppEvent::Sync(_) => EventCategory::Sync,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Layout(e) => e.description(),
            AppEvent::Sync(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Entity lifecycle and geometry events.
    Layout,
    /// Persistence synchronization events.
    Sync,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Layout => write!(f, "Layout"),
            EventCategory::Sync => write!(f, "Sync"),
        }
    }
}

/// Entity lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LayoutEvent {
    /// An entity was created and inserted into the store.
    EntityCreated {
        /// The kind of entity created.
        kind: EntityKind,
        /// The id assigned at creation.
        id: EntityId,
    },
    /// A rack or pallet was removed from the store.
    EntityRemoved {
        /// The kind of entity removed.
        kind: EntityKind,
        /// The id that was removed.
        id: EntityId,
    },
    /// A door was soft-deleted (hidden, record retained).
    DoorHidden {
        /// The id of the hidden door.
        id: EntityId,
    },
    /// An entity's lock flag was toggled.
    LockToggled {
        /// The id whose lock changed.
        id: EntityId,
        /// The new lock state.
        locked: bool,
    },
}

impl LayoutEvent {
    /// Get a short description for logging
    pub fn description(&self) -> String {
        match self {
            LayoutEvent::EntityCreated { kind, id } => format!("created {kind} {id}"),
            LayoutEvent::EntityRemoved { kind, id } => format!("removed {kind} {id}"),
            LayoutEvent::DoorHidden { id } => format!("hid door {id}"),
            LayoutEvent::LockToggled { id, locked } => {
                format!("lock {id} -> {locked}")
            }
        }
    }
}

/// Persistence synchronization events
///
/// `CreateFailed` and `DeleteFailed` are the user-facing failure surface
/// required by the error design: they are published only after local state
/// has been rolled back, so a subscriber can show a recoverable prompt
/// without ever observing divergent state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SyncEvent {
    /// The rack partition was seeded from the remote listing.
    Seeded {
        /// How many racks were loaded.
        count: usize,
    },
    /// A local id was replaced by its canonical id.
    Reconciled {
        /// The local id that was retired.
        local: EntityId,
        /// The canonical id that replaced it.
        canonical: EntityId,
    },
    /// A remote create failed; the optimistic entity was removed.
    CreateFailed {
        /// The local id that was rolled back.
        id: EntityId,
        /// The failure reason, for the user prompt.
        reason: String,
    },
    /// A remote delete failed; the entity was restored.
    DeleteFailed {
        /// The canonical id that was restored.
        id: EntityId,
        /// The failure reason, for the user prompt.
        reason: String,
    },
}

impl SyncEvent {
    /// Get a short description for logging
    pub fn description(&self) -> String {
        match self {
            SyncEvent::Seeded { count } => format!("seeded {count} racks"),
            SyncEvent::Reconciled { local, canonical } => {
                format!("reconciled {local} -> {canonical}")
            }
            SyncEvent::CreateFailed { id, reason } => format!("create {id} failed: {reason}"),
            SyncEvent::DeleteFailed { id, reason } => format!("delete {id} failed: {reason}"),
        }
    }
}
