//! Product catalog types.
//!
//! Products are owned by an external catalog; entities on the floor plan
//! hold non-owning reference lists. Deleting an entity never deletes the
//! referenced products.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Unique product identifier, assigned by the catalog.
pub type ProductId = String;

/// Stock level below which a product is flagged in the detail panel.
const LOW_STOCK_THRESHOLD: u32 = 10;

/// A product record from the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned id.
    #[serde(rename = "productoId")]
    pub product_id: ProductId,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Unit price.
    #[serde(rename = "precio")]
    pub price: f64,
    /// Units currently in stock.
    #[serde(rename = "cantidadExistente")]
    pub stock_quantity: u32,
    /// Category rating, when assigned.
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<u32>,
    /// Free-form description.
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Supplier name.
    #[serde(rename = "proveedor", skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

impl Product {
    /// Whether the detail panel should flag this product as nearly out of
    /// stock.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity < LOW_STOCK_THRESHOLD
    }
}

/// Read-only access to the external product catalog.
///
/// The engine only ever reads from the catalog — products are assigned to
/// entities at creation time and listed in detail panels, never mutated.
pub trait ProductCatalog {
    /// All products known to the catalog, in catalog order.
    fn products(&self) -> &[Product];

    /// Looks up a single product by id.
    fn get(&self, id: &str) -> Option<&Product> {
        self.products().iter().find(|p| p.product_id == id)
    }
}

/// The catalog window assigned to a new pallet.
const PALLET_ASSIGNMENT: std::ops::Range<usize> = 3..6;

/// Product references assigned to a new pallet: a fixed window of the
/// catalog, clamped to the catalog length.
pub fn default_pallet_assignment(catalog: &dyn ProductCatalog) -> Vec<Product> {
    let products = catalog.products();
    let start = PALLET_ASSIGNMENT.start.min(products.len());
    let end = PALLET_ASSIGNMENT.end.min(products.len());
    products[start..end].to_vec()
}

/// Serializes a product record into a scannable-code payload.
///
/// The payload is the full JSON record, matching what the label printer
/// encodes for a single-product label.
pub fn product_label_payload(product: &Product) -> Result<String> {
    Ok(serde_json::to_string(product)?)
}
