//! Snippet store management.
//!
//! The store is one directory of symlinks, each pointing at an original
//! file elsewhere on disk, plus the generated markdown digest. Every
//! mutation regenerates the digest synchronously before returning, so the
//! digest always reflects the membership the mutation produced. An
//! operation either fully succeeds or leaves the store exactly as it was.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::markdown;
use crate::prompt::Prompt;

/// Outcome of a toggle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    /// The entry was not present and has been added
    Added,
    /// The entry was present and has been removed
    Removed,
}

/// Manages the snippet directory and its markdown digest
pub struct Store {
    config: StoreConfig,
}

impl Store {
    /// Create a store handle, ensuring the directory exists.
    ///
    /// Creation failure propagates: every subsequent operation depends on
    /// the directory being there.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let store = Self { config };
        store.ensure_dir()?;
        Ok(store)
    }

    /// The store directory
    pub fn dir(&self) -> &Path {
        &self.config.store_dir
    }

    /// Path of the generated digest
    pub fn artifact_path(&self) -> PathBuf {
        self.config.artifact_path()
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        if !self.config.store_dir.exists() {
            fs::create_dir_all(&self.config.store_dir)?;
        }
        Ok(())
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.config.store_dir.join(name)
    }

    /// Whether an entry with this name is present. Broken links count:
    /// the symlink itself is the entry, regardless of its target.
    pub fn contains(&self, name: &str) -> bool {
        fs::symlink_metadata(self.entry_path(name)).is_ok()
    }

    /// Entry names, sorted lexicographically. The digest file, OS
    /// metadata files, and directories are never entries.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        self.ensure_dir()?;

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.config.store_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::other)?;
            if entry.file_type().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if StoreConfig::is_excluded_name(&name) {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    /// Link a source file into the store under its base name, then
    /// regenerate the digest.
    ///
    /// A name collision requires explicit confirmation; declining leaves
    /// the store untouched. The source must exist at call time.
    pub fn add(&self, source: &Path, prompt: &dyn Prompt) -> Result<String, StoreError> {
        self.ensure_dir()?;

        if !source.exists() {
            return Err(StoreError::SourceMissing(source.to_path_buf()));
        }

        let name = StoreConfig::entry_name(source)
            .ok_or_else(|| StoreError::SourceMissing(source.to_path_buf()))?;
        let link_path = self.entry_path(&name);

        if self.contains(&name) {
            let question = format!("'{name}' already exists in the store. Overwrite?");
            if prompt.confirm(&question) != Some(true) {
                return Err(StoreError::Cancelled);
            }
            fs::remove_file(&link_path)?;
        }

        create_symlink(source, &link_path)?;
        self.generate()?;

        tracing::debug!(entry = %name, source = %source.display(), "Added entry");
        Ok(name)
    }

    /// Remove the entry keyed by the base name of `target`, then
    /// regenerate the digest. Accepts a full path or a bare name.
    pub fn remove(&self, target: &Path) -> Result<String, StoreError> {
        self.ensure_dir()?;

        let name = StoreConfig::entry_name(target)
            .ok_or_else(|| StoreError::EntryMissing(target.display().to_string()))?;
        let link_path = self.entry_path(&name);

        let meta = fs::symlink_metadata(&link_path)
            .map_err(|_| StoreError::EntryMissing(name.clone()))?;
        if meta.is_dir() {
            // Directories are never valid entries.
            return Err(StoreError::EntryMissing(name));
        }

        fs::remove_file(&link_path)?;
        self.generate()?;

        tracing::debug!(entry = %name, "Removed entry");
        Ok(name)
    }

    /// Remove the entry if present, add it otherwise.
    pub fn toggle(&self, source: &Path, prompt: &dyn Prompt) -> Result<Toggled, StoreError> {
        let name = StoreConfig::entry_name(source)
            .ok_or_else(|| StoreError::SourceMissing(source.to_path_buf()))?;

        if self.contains(&name) {
            self.remove(source)?;
            Ok(Toggled::Removed)
        } else {
            self.add(source, prompt)?;
            Ok(Toggled::Added)
        }
    }

    /// Regenerate the digest from the current entry set, replacing any
    /// prior contents. Idempotent; safe to run redundantly.
    pub fn generate(&self) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let names = self.list()?;
        let digest = markdown::render(&self.config.store_dir, &names);
        fs::write(self.artifact_path(), digest)?;
        Ok(())
    }

    /// Symlink the digest into a workspace as `<target_dir>/<file_name>`,
    /// generating the digest first if it does not exist yet.
    ///
    /// A pre-existing file at the target path is removed after
    /// confirmation; declining cancels the operation.
    pub fn link_artifact(
        &self,
        target_dir: &Path,
        file_name: &str,
        prompt: &dyn Prompt,
    ) -> Result<PathBuf, StoreError> {
        self.ensure_dir()?;

        let artifact = self.artifact_path();
        if !artifact.exists() {
            self.generate()?;
        }

        let target = target_dir.join(file_name);
        if fs::symlink_metadata(&target).is_ok() {
            let question = format!("'{file_name}' already exists in the project. Overwrite?");
            if prompt.confirm(&question) != Some(true) {
                return Err(StoreError::Cancelled);
            }
            fs::remove_file(&target)?;
        }

        create_symlink(&artifact, &target)?;
        Ok(target)
    }
}

fn create_symlink(source: &Path, link: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, link)
    }

    #[cfg(windows)]
    {
        if source.is_dir() {
            std::os::windows::fs::symlink_dir(source, link)
        } else {
            std::os::windows::fs::symlink_file(source, link)
        }
    }
}
