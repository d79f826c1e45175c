//! Error handling for FloorKit
//!
//! Provides error types for the layers of the engine:
//! - Store errors (entity collection violations)
//! - Sync errors (optimistic create/delete reconciliation)
//! - Remote errors (the persistence collaborator)
//!
//! All error types use `thiserror` for ergonomic error handling. Note that
//! two whole classes of failure from the design never appear here: geometry
//! validation problems are corrected by clamping, and stale references
//! (mutations targeting deleted entities) are silently dropped. Only
//! conditions that must be surfaced or rolled back are errors.

use thiserror::Error;

/// Entity store error type
///
/// Represents violations of the store's structural invariants. Lookup misses
/// during updates are deliberately *not* errors (they are expected under
/// concurrent edit/delete and handled as no-ops).
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// An id was inserted that already exists in the store
    #[error("Duplicate entity id: {id}")]
    DuplicateId {
        /// Display form of the conflicting id.
        id: String,
    },

    /// A reconciliation targeted an id that is not a local id
    #[error("Cannot reconcile {id}: not a local id")]
    NotLocal {
        /// Display form of the offending id.
        id: String,
    },

    /// Generic store error
    #[error("Store error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Persistence sync error type
///
/// Represents failures of the optimistic create/delete protocol. Each of
/// these is surfaced to the user after local state has been rolled back.
#[derive(Error, Debug, Clone)]
pub enum SyncError {
    /// A remote create failed; the optimistic local entity was removed
    #[error("Create failed for entity {id}: {reason}")]
    CreateFailed {
        /// Display form of the local id that was rolled back.
        id: String,
        /// The reason the create was rejected.
        reason: String,
    },

    /// A remote delete failed; the entity was restored locally
    #[error("Delete failed for entity {id}: {reason}")]
    DeleteFailed {
        /// Display form of the canonical id that was restored.
        id: String,
        /// The reason the delete was rejected.
        reason: String,
    },

    /// Seeding the store from the remote listing failed at session start
    #[error("Seeding failed: {reason}")]
    SeedFailed {
        /// The reason the listing was unavailable.
        reason: String,
    },

    /// Generic sync error
    #[error("Sync error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Remote store error type
///
/// Represents errors from the remote persistence collaborator itself:
/// rejected requests, unreachable endpoints, and transport timeouts.
#[derive(Error, Debug, Clone)]
pub enum RemoteError {
    /// The request was rejected by the remote store
    #[error("Request rejected: {reason}")]
    Rejected {
        /// The reason the request was rejected.
        reason: String,
    },

    /// The remote store could not be reached
    #[error("Remote store unreachable: {reason}")]
    Unreachable {
        /// The reason the endpoint was unreachable.
        reason: String,
    },

    /// The transport timeout elapsed
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// The response payload could not be decoded
    #[error("Failed to parse remote response: {reason}")]
    ResponseParseError {
        /// The reason the response parsing failed.
        reason: String,
    },

    /// Generic remote error
    #[error("Remote error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for FloorKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Entity store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Persistence sync error
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Remote store error
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Remote(RemoteError::Timeout { .. }))
    }

    /// Check if this is a remote error
    pub fn is_remote_error(&self) -> bool {
        matches!(self, Error::Remote(_))
    }

    /// Check if this is a sync error
    pub fn is_sync_error(&self) -> bool {
        matches!(self, Error::Sync(_))
    }

    /// Check if this is a store error
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
