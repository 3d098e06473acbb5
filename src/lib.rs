//! RagSnip - Snippet Folder Curation
//!
//! A tool for curating a folder of snippet files via symbolic links.
//! Instead of copying file contents around, RagSnip keeps one symlink per
//! snippet in a store directory and regenerates a single concatenated
//! markdown digest from the linked files whenever membership changes.

pub mod config;
pub mod error;
pub mod markdown;
pub mod prompt;
pub mod store;
pub mod watch;

pub use config::StoreConfig;
pub use error::StoreError;
pub use prompt::{AssumeYes, ConsolePrompt, Prompt};
pub use store::{Store, Toggled};
