//! # FloorKit Designer
//!
//! The interactive layout engine: geometry and transform state, gesture
//! handling, the authoritative entity store, and the selection/detail
//! overlay for one floor plan.
//!
//! Data flow: pointer input goes to the [`GestureController`], which
//! delegates transform application (and the lock check) to the
//! [`geometry::EntityGeometry`] model and commits results through the
//! [`FloorStore`]. Hover and selection state flow independently into
//! [`HoverState`] and [`DetailOverlay`], which read from the store but
//! never mutate geometry. Remote persistence lives in `floorkit-sync`.

pub mod entity;
pub mod geometry;
pub mod gesture;
pub mod hover;
pub mod overlay;
pub mod store;

pub use entity::PlaceableEntity;
pub use geometry::{CanvasBounds, EntityGeometry, Point, Rect, ResizeEdges, Size};
pub use gesture::{GestureController, GestureKind};
pub use hover::HoverState;
pub use overlay::{DetailOverlay, DismissOrigin};
pub use store::{FloorStore, Removal};
