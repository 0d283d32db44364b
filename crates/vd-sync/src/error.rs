//! Sync coordinator errors.
//!
//! A detected conflict is a normal outcome, not an error; only misuse of
//! the resolution API fails.

use thiserror::Error;
use uuid::Uuid;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Unknown conflict: {id}")]
    UnknownConflict { id: Uuid },

    #[error("Conflict {id} is already resolved")]
    AlreadyResolved { id: Uuid },

    /// Critical differences never auto-resolve.
    #[error("Conflict {id} contains critical differences and requires manual resolution")]
    ManualResolutionRequired { id: Uuid },
}
