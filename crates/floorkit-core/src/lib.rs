//! # FloorKit Core
//!
//! Shared types, traits, and utilities for the FloorKit warehouse layout
//! engine. This crate holds everything the designer and sync layers have in
//! common:
//!
//! - **Errors**: layered error taxonomy (`StoreError`, `SyncError`,
//!   `RemoteError`) unified under [`Error`]
//! - **Event bus**: publish/subscribe distribution of layout and sync events
//! - **Products**: read-only product catalog records referenced by entities
//! - **Labels**: the opaque scannable-code renderer collaborator
//! - **Config**: canvas and remote-store configuration
//!
//! The engine itself lives in `floorkit-designer`; remote persistence in
//! `floorkit-sync`.

pub mod config;
pub mod error;
pub mod event_bus;
pub mod label;
pub mod product;
pub mod types;

pub use config::{CanvasConfig, Config, RemoteConfig};
pub use error::{Error, RemoteError, Result, StoreError, SyncError};
pub use label::{CodeRenderer, PrintRegion, RenderedCode};
pub use product::{
    default_pallet_assignment, product_label_payload, Product, ProductCatalog, ProductId,
};
pub use types::{EntityId, EntityKind};
