//! Error taxonomy for store operations.
//!
//! Store operations never panic the UI layer: callers pattern-match on
//! these variants and decide what (if anything) to show the user.
//!
//! There is no dedicated already-exists variant: a name collision is
//! always resolved in-band through the overwrite prompt, so the only
//! observable failure from a collision is the user declining it, which
//! surfaces as `Cancelled`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The source file for an add operation does not exist.
    #[error("source file does not exist: {0}")]
    SourceMissing(PathBuf),

    /// No entry with the given name is present in the store.
    #[error("no entry named '{0}' in the store")]
    EntryMissing(String),

    /// The user dismissed a prompt or declined an overwrite.
    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Failures that are silent no-ops by contract, as opposed to real
    /// I/O trouble worth a diagnostic.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            StoreError::SourceMissing(_) | StoreError::EntryMissing(_) | StoreError::Cancelled
        )
    }
}
