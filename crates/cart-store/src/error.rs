//! # Store Error Types
//!
//! Error types for storage backends and the cart store.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Propagation                                   │
//! │                                                                         │
//! │  Backend failure (I/O, quota, ...)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds read/write categorization            │
//! │       │                                                                 │
//! │       ├── at open():    StoreError → caller (fail fast)                 │
//! │       │                                                                 │
//! │       └── at mutation:  tracing::error! and swallowed — mutations       │
//! │                         never surface storage failures to the UI        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage backend errors.
///
/// Backends map their native failures onto these two categories; the store
/// only cares whether a read or a write went wrong.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A value could not be read from the backend.
    ///
    /// ## When This Occurs
    /// - Backing file unreadable
    /// - Backend unavailable
    #[error("storage read failed: {0}")]
    ReadFailed(String),

    /// A value could not be written to the backend.
    ///
    /// ## When This Occurs
    /// - Disk full / quota exceeded
    /// - Backing file not writable
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

/// Errors surfaced by the cart store itself.
///
/// Only construction can fail: [`crate::CartStore::open`] refuses to hand out
/// a store whose initial load could not read storage. Mutations never return
/// errors (see module docs above).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The initial storage read failed during `open`.
    #[error("cart storage unavailable: {0}")]
    Storage(#[from] StorageError),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
