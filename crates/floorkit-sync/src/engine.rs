//! The optimistic create/reconcile sync engine.
//!
//! Entity store mutations stay immediately interactive; remote requests run
//! asynchronously on spawned tasks and report back through a completion
//! channel. Completions are drained on the session tick, single-threaded,
//! which gives the applied-after ordering guarantee: a confirmation is
//! processed only after every geometry mutation already committed for that
//! entity, and it contributes nothing but the identity field.

use std::collections::HashSet;
use std::sync::Arc;

use floorkit_core::emit;
use floorkit_core::event_bus::{AppEvent, SyncEvent};
use floorkit_core::{EntityId, EntityKind, Result, SyncError};
use floorkit_designer::{FloorStore, PlaceableEntity, Removal};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::remote::{NewRackRecord, RemoteStore};

/// A finished remote request, queued for the next tick.
#[derive(Debug)]
enum SyncCompletion {
    CreateConfirmed {
        local: EntityId,
        canonical: EntityId,
    },
    CreateRejected {
        local: EntityId,
        reason: String,
    },
    DeleteConfirmed {
        id: EntityId,
    },
    DeleteRejected {
        entity: Box<PlaceableEntity>,
        index: usize,
        reason: String,
    },
}

/// What a drained completion did to the store. The session uses these to
/// rekey gesture, hover, and overlay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A local id was swapped for its canonical id.
    Reconciled {
        /// The retired local id.
        local: EntityId,
        /// The canonical replacement.
        canonical: EntityId,
    },
    /// A create was rejected and the optimistic entity removed.
    RolledBack {
        /// The local id that no longer exists.
        local: EntityId,
    },
    /// A delete was rejected and the entity reinserted.
    Restored {
        /// The id that is back in the store.
        id: EntityId,
    },
}

/// Bridges entity store mutations to the remote store for persisted kinds.
pub struct SyncEngine {
    remote: Arc<dyn RemoteStore>,
    completions: mpsc::UnboundedSender<SyncCompletion>,
    inbox: mpsc::UnboundedReceiver<SyncCompletion>,
    /// Local ids with a create request in flight. Makes confirmation
    /// handling idempotent: a duplicate or delayed confirmation finds its
    /// id already retired and does nothing.
    pending_creates: HashSet<EntityId>,
}

impl SyncEngine {
    /// Creates an engine over the given remote collaborator.
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        let (completions, inbox) = mpsc::unbounded_channel();
        Self {
            remote,
            completions,
            inbox,
            pending_creates: HashSet::new(),
        }
    }

    /// Seeds the store's rack partition from the remote listing. Called
    /// once at session start.
    pub async fn seed(&self, store: &mut FloorStore) -> Result<usize> {
        let records = self.remote.list_racks().await.map_err(|e| SyncError::SeedFailed {
            reason: e.to_string(),
        })?;
        let count = records.len();
        for record in records {
            store.insert_seeded(record.into_entity())?;
        }
        debug!("Seeded {} racks from remote listing", count);
        emit!(AppEvent::Sync(SyncEvent::Seeded { count })).ok();
        Ok(count)
    }

    /// Reacts to a local creation: racks get an asynchronous create
    /// request; pallets and doors are session-local and nothing is sent.
    pub fn entity_created(&mut self, entity: &PlaceableEntity) {
        if entity.kind != EntityKind::Rack || !entity.id.is_local() {
            return;
        }
        let local = entity.id;
        let record = NewRackRecord::from_entity(entity);
        self.pending_creates.insert(local);

        let remote = Arc::clone(&self.remote);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let completion = match remote.create_rack(record).await {
                Ok(canonical) => SyncCompletion::CreateConfirmed {
                    local,
                    canonical: EntityId::Canonical(canonical),
                },
                Err(e) => SyncCompletion::CreateRejected {
                    local,
                    reason: e.to_string(),
                },
            };
            // Receiver dropped means the session is gone; nothing to do
            completions.send(completion).ok();
        });
    }

    /// Reacts to a local removal: a previously confirmed rack gets an
    /// asynchronous delete request. The removed record and its index travel
    /// with the request so a rejection can restore it in place.
    pub fn entity_removed(&mut self, removal: &Removal) {
        let Removal::Removed { entity, index } = removal else {
            return;
        };
        if entity.kind != EntityKind::Rack {
            return;
        }
        let EntityId::Canonical(canonical) = entity.id else {
            // Create still pending. The eventual confirmation is dropped by
            // the membership check in apply_completions.
            return;
        };

        let id = entity.id;
        let entity = entity.clone();
        let index = *index;
        let remote = Arc::clone(&self.remote);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let completion = match remote.delete_rack(canonical).await {
                Ok(()) => SyncCompletion::DeleteConfirmed { id },
                Err(e) => SyncCompletion::DeleteRejected {
                    entity: Box::new(entity),
                    index,
                    reason: e.to_string(),
                },
            };
            completions.send(completion).ok();
        });
    }

    /// Drains queued completions and applies them to the store.
    ///
    /// Runs on the session tick. Returns the outcomes in application order
    /// so the caller can rekey any state still holding retired ids.
    pub fn apply_completions(&mut self, store: &mut FloorStore) -> Vec<SyncOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(completion) = self.inbox.try_recv() {
            match completion {
                SyncCompletion::CreateConfirmed { local, canonical } => {
                    if !self.pending_creates.remove(&local) {
                        debug!("Duplicate confirmation for {} ignored", local);
                        continue;
                    }
                    if !store.contains(local) {
                        // Deleted before confirmation; no resurrection
                        debug!("Confirmation for deleted entity {} ignored", local);
                        continue;
                    }
                    match store.reconcile_id(local, canonical) {
                        Ok(true) => {
                            emit!(AppEvent::Sync(SyncEvent::Reconciled { local, canonical })).ok();
                            outcomes.push(SyncOutcome::Reconciled { local, canonical });
                        }
                        Ok(false) => {}
                        Err(e) => warn!("Reconciliation of {} failed: {}", local, e),
                    }
                }
                SyncCompletion::CreateRejected { local, reason } => {
                    self.pending_creates.remove(&local);
                    if let Removal::Removed { .. } = store.remove(local) {
                        warn!("Create failed for {}: {}", local, reason);
                        emit!(AppEvent::Sync(SyncEvent::CreateFailed { id: local, reason })).ok();
                        outcomes.push(SyncOutcome::RolledBack { local });
                    }
                }
                SyncCompletion::DeleteConfirmed { id } => {
                    debug!("Delete confirmed for {}", id);
                }
                SyncCompletion::DeleteRejected {
                    entity,
                    index,
                    reason,
                } => {
                    let id = entity.id;
                    warn!("Delete failed for {}: {}", id, reason);
                    store.restore(*entity, index);
                    emit!(AppEvent::Sync(SyncEvent::DeleteFailed { id, reason })).ok();
                    outcomes.push(SyncOutcome::Restored { id });
                }
            }
        }
        outcomes
    }

    /// Whether any create request is still awaiting confirmation.
    pub fn has_pending_creates(&self) -> bool {
        !self.pending_creates.is_empty()
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("pending_creates", &self.pending_creates.len())
            .finish()
    }
}
