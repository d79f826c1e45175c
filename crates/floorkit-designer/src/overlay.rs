//! Selection and detail overlay state.
//!
//! Two nested read-only panels: a per-entity panel listing its assigned
//! products, and a per-product panel for one record. They track independent
//! open state, but closing the parent cascades to the child so no panel
//! ever references a dismissed parent.

use floorkit_core::{
    product_label_payload, CodeRenderer, EntityId, PrintRegion, Product, ProductId, Result,
};
use tracing::debug;

use crate::store::FloorStore;

/// Where a dismissal signal originated.
///
/// Dismissal discriminates on origin rather than using a blanket
/// outside-click handler: clicks inside a panel must never close it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOrigin {
    /// The panel's explicit close action.
    CloseAction,
    /// A click or cancel signal outside the panel.
    OutsideClick,
    /// An incidental click within the panel body.
    InsidePanel,
}

impl DismissOrigin {
    fn dismisses(self) -> bool {
        !matches!(self, DismissOrigin::InsidePanel)
    }
}

/// The nested detail panel state.
#[derive(Debug, Default)]
pub struct DetailOverlay {
    entity_panel: Option<EntityId>,
    product_panel: Option<ProductId>,
}

impl DetailOverlay {
    /// Creates an overlay with no panels open.
    pub fn new() -> Self {
        Self::default()
    }

    /// The entity whose detail panel is open, if any.
    pub fn entity_panel(&self) -> Option<EntityId> {
        self.entity_panel
    }

    /// The product whose detail panel is open, if any.
    pub fn product_panel(&self) -> Option<&ProductId> {
        self.product_panel.as_ref()
    }

    /// Opens the detail panel for an entity.
    ///
    /// Returns false for absent or hidden entities and for kinds without
    /// product assignments. Switching to another entity closes any open
    /// product panel from the previous one.
    pub fn open_entity(&mut self, store: &FloorStore, id: EntityId) -> bool {
        let Some(entity) = store.get(id) else {
            return false;
        };
        if !entity.visible || !entity.carries_products() {
            return false;
        }
        if self.entity_panel != Some(id) {
            self.product_panel = None;
        }
        self.entity_panel = Some(id);
        debug!("Opened detail panel for {}", id);
        true
    }

    /// Opens the nested panel for one product listed in the open entity
    /// panel. Returns false if no entity panel is open or the product is
    /// not assigned to that entity.
    pub fn open_product(&mut self, store: &FloorStore, product_id: &str) -> bool {
        let Some(entity_id) = self.entity_panel else {
            return false;
        };
        let assigned = store
            .get(entity_id)
            .map(|e| e.products.iter().any(|p| p.product_id == product_id))
            .unwrap_or(false);
        if !assigned {
            return false;
        }
        self.product_panel = Some(product_id.to_string());
        true
    }

    /// Dismisses the entity panel, cascading to the product panel.
    ///
    /// Returns true if the panel closed. Signals originating inside the
    /// panel are ignored.
    pub fn dismiss_entity(&mut self, origin: DismissOrigin) -> bool {
        if !origin.dismisses() || self.entity_panel.is_none() {
            return false;
        }
        self.entity_panel = None;
        self.product_panel = None;
        true
    }

    /// Dismisses only the product panel. The parent entity panel stays
    /// open.
    pub fn dismiss_product(&mut self, origin: DismissOrigin) -> bool {
        if !origin.dismisses() || self.product_panel.is_none() {
            return false;
        }
        self.product_panel = None;
        true
    }

    /// Closes panels referencing a removed entity.
    pub fn entity_removed(&mut self, id: EntityId) {
        if self.entity_panel == Some(id) {
            self.entity_panel = None;
            self.product_panel = None;
        }
    }

    /// Replaces a local id with its canonical id in the open panel state.
    pub fn rekey(&mut self, local: EntityId, canonical: EntityId) {
        if self.entity_panel == Some(local) {
            self.entity_panel = Some(canonical);
        }
    }

    /// Renders and prints the scannable label of the open entity.
    ///
    /// The payload is the entity's label string; the region title follows
    /// the `Etiqueta-{label}` convention.
    pub fn print_entity_label(&self, store: &FloorStore, renderer: &dyn CodeRenderer) -> Result<()> {
        let Some(label) = self
            .entity_panel
            .and_then(|id| store.get(id))
            .and_then(|e| e.label.clone())
        else {
            return Ok(());
        };
        let code = renderer.render(&label)?;
        renderer.print(&code, &PrintRegion::label(format!("Etiqueta-{label}")))
    }

    /// Renders and prints the scannable label for the open product panel.
    ///
    /// The payload is the serialized product record.
    pub fn print_product_label(&self, store: &FloorStore, renderer: &dyn CodeRenderer) -> Result<()> {
        let Some(product) = self.open_product_record(store) else {
            return Ok(());
        };
        let payload = product_label_payload(product)?;
        let title = format!("Etiqueta-{}", product.name);
        let code = renderer.render(&payload)?;
        renderer.print(&code, &PrintRegion::label(title))
    }

    fn open_product_record<'a>(&self, store: &'a FloorStore) -> Option<&'a Product> {
        let entity = store.get(self.entity_panel?)?;
        let product_id = self.product_panel.as_ref()?;
        entity.products.iter().find(|p| &p.product_id == product_id)
    }
}
