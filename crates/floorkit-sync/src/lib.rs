//! # FloorKit Sync
//!
//! Persistence synchronization for the layout engine. Racks survive the
//! session through an optimistic create-then-reconcile protocol against a
//! remote store: the entity appears locally first, the request runs in the
//! background, and the confirmation contributes only the canonical id.
//! Failures roll local state back and surface through the event bus, so the
//! store never diverges from what the remote store will agree to.

pub mod engine;
pub mod remote;
pub mod session;

pub use engine::{SyncEngine, SyncOutcome};
pub use remote::{NewRackRecord, RackRecord, RemoteStore};
pub use session::DepotSession;
