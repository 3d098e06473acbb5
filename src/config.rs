//! Store location configuration.
//!
//! The store directory defaults to `~/rag-snippet` and the digest is
//! always named `rag-content.md` inside it. The default can be overridden
//! per invocation (CLI flag / environment) or globally via an optional
//! `config.toml` in the user's config directory.

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default store directory name under the user's home directory
pub const STORE_DIR_NAME: &str = "rag-snippet";

/// Name of the generated markdown digest inside the store
pub const ARTIFACT_FILE_NAME: &str = "rag-content.md";

/// OS metadata file excluded from all listings
pub const OS_METADATA_FILE_NAME: &str = ".DS_Store";

/// Optional user configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Optional user-level configuration file contents
#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    /// Override for the store directory
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
}

/// Resolved store location
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the snippet symlinks and the digest
    pub store_dir: PathBuf,
}

impl StoreConfig {
    /// Create a configuration pointing at an explicit directory
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
        }
    }

    /// Resolve the store directory: explicit override, then the user
    /// config file, then the home-directory default.
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::new(dir));
        }

        let user = Self::load_user_config()?;
        if let Some(dir) = user.store_dir {
            return Ok(Self::new(dir));
        }

        Ok(Self::new(Self::default_store_dir()?))
    }

    /// Default store directory: `<home>/rag-snippet`
    pub fn default_store_dir() -> Result<PathBuf> {
        let base = BaseDirs::new().context("Could not determine home directory")?;
        Ok(base.home_dir().join(STORE_DIR_NAME))
    }

    /// Path of the user configuration file, if a config directory exists
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "ragsnip", "ragsnip")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn load_user_config() -> Result<UserConfig> {
        let config_path = match Self::user_config_path() {
            Some(path) => path,
            None => return Ok(UserConfig::default()),
        };

        if !config_path.exists() {
            return Ok(UserConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    /// Path of the generated digest inside the store
    pub fn artifact_path(&self) -> PathBuf {
        self.store_dir.join(ARTIFACT_FILE_NAME)
    }

    /// File names that are never entries
    pub fn is_excluded_name(name: &str) -> bool {
        name == ARTIFACT_FILE_NAME || name == OS_METADATA_FILE_NAME
    }

    /// Base name of a path as an entry name, if it has one
    pub fn entry_name(path: &Path) -> Option<String> {
        path.file_name().map(|name| name.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_config() {
        let toml = r#"
            store_dir = "/tmp/custom-store"
        "#;

        let config: UserConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.store_dir, Some(PathBuf::from("/tmp/custom-store")));
    }

    #[test]
    fn test_parse_empty_user_config() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert!(config.store_dir.is_none());
    }

    #[test]
    fn test_resolve_prefers_override() {
        let config = StoreConfig::resolve(Some(PathBuf::from("/tmp/override"))).unwrap();
        assert_eq!(config.store_dir, PathBuf::from("/tmp/override"));
    }

    #[test]
    fn test_artifact_path_lives_inside_store() {
        let config = StoreConfig::new("/tmp/store");
        assert_eq!(
            config.artifact_path(),
            PathBuf::from("/tmp/store/rag-content.md")
        );
    }

    #[test]
    fn test_excluded_names() {
        assert!(StoreConfig::is_excluded_name("rag-content.md"));
        assert!(StoreConfig::is_excluded_name(".DS_Store"));
        assert!(!StoreConfig::is_excluded_name("notes.txt"));
    }

    #[test]
    fn test_entry_name_is_base_name() {
        assert_eq!(
            StoreConfig::entry_name(Path::new("/src/deep/a.py")),
            Some("a.py".to_string())
        );
        assert_eq!(StoreConfig::entry_name(Path::new("/")), None);
    }
}
