//! Hover tracking for contextual action affordances.

use std::collections::HashMap;

use floorkit_core::{EntityId, EntityKind};

/// Tracks which entity is hovered, exclusively per kind group.
///
/// Entering a new hover within a kind clears the previous one; hovering a
/// rack does not disturb a hovered pallet.
#[derive(Debug, Default)]
pub struct HoverState {
    hovered: HashMap<EntityKind, EntityId>,
}

impl HoverState {
    /// Creates an empty hover state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an entity as hovered, returning the id it displaced within the
    /// same kind group, if any.
    pub fn enter(&mut self, kind: EntityKind, id: EntityId) -> Option<EntityId> {
        let previous = self.hovered.insert(kind, id);
        previous.filter(|p| *p != id)
    }

    /// Clears the hover for an entity. No-op if a different entity of the
    /// same kind is hovered, which covers out-of-order enter/leave events.
    pub fn leave(&mut self, kind: EntityKind, id: EntityId) {
        if self.hovered.get(&kind) == Some(&id) {
            self.hovered.remove(&kind);
        }
    }

    /// The currently hovered entity for a kind group.
    pub fn hovered(&self, kind: EntityKind) -> Option<EntityId> {
        self.hovered.get(&kind).copied()
    }

    /// Drops any hover referencing a removed entity.
    pub fn entity_removed(&mut self, id: EntityId) {
        self.hovered.retain(|_, hovered| *hovered != id);
    }

    /// Replaces a local id with its canonical id wherever it is hovered.
    pub fn rekey(&mut self, local: EntityId, canonical: EntityId) {
        for hovered in self.hovered.values_mut() {
            if *hovered == local {
                *hovered = canonical;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_exclusive_per_kind() {
        let mut hover = HoverState::new();
        hover.enter(EntityKind::Rack, EntityId::Local(1));
        let displaced = hover.enter(EntityKind::Rack, EntityId::Local(2));

        assert_eq!(displaced, Some(EntityId::Local(1)));
        assert_eq!(hover.hovered(EntityKind::Rack), Some(EntityId::Local(2)));
    }

    #[test]
    fn test_kind_groups_independent() {
        let mut hover = HoverState::new();
        hover.enter(EntityKind::Rack, EntityId::Local(1));
        hover.enter(EntityKind::Pallet, EntityId::Local(2));

        assert_eq!(hover.hovered(EntityKind::Rack), Some(EntityId::Local(1)));
        assert_eq!(hover.hovered(EntityKind::Pallet), Some(EntityId::Local(2)));
    }

    #[test]
    fn test_stale_leave_ignored() {
        let mut hover = HoverState::new();
        hover.enter(EntityKind::Rack, EntityId::Local(1));
        hover.enter(EntityKind::Rack, EntityId::Local(2));
        // Leave for the displaced entity arrives late
        hover.leave(EntityKind::Rack, EntityId::Local(1));
        assert_eq!(hover.hovered(EntityKind::Rack), Some(EntityId::Local(2)));
    }

    #[test]
    fn test_rekey_updates_hover() {
        let mut hover = HoverState::new();
        hover.enter(EntityKind::Rack, EntityId::Local(3));
        hover.rekey(EntityId::Local(3), EntityId::Canonical(9));
        assert_eq!(hover.hovered(EntityKind::Rack), Some(EntityId::Canonical(9)));
    }
}
