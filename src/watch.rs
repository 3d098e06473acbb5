//! Store directory watching.
//!
//! Regenerates the digest whenever something in the store changes, so
//! externally created or deleted symlinks are picked up without an
//! explicit command. Events for the digest file itself are filtered out;
//! regenerating on our own write would just be redundant work.

use anyhow::Result;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crate::config::StoreConfig;
use crate::store::Store;

/// Watch the store directory and regenerate the digest on every relevant
/// change. Blocks until the watcher channel closes.
///
/// Regeneration is idempotent, so redundant triggers are harmless;
/// debouncing only coalesces bursts for efficiency.
pub fn run(store: &Store, debounce: Duration) -> Result<()> {
    // One generation up front so the digest reflects the state at start.
    store.generate()?;

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(debounce, tx)?;

    debouncer
        .watcher()
        .watch(store.dir(), RecursiveMode::NonRecursive)?;

    println!(
        "{} Watching {} (debounce: {:?})",
        "➤".cyan(),
        store.dir().display(),
        debounce
    );

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events
                    .iter()
                    .filter(|event| !should_ignore_path(&event.path))
                    .count();

                if relevant == 0 {
                    continue;
                }

                match store.generate() {
                    Ok(()) => {
                        println!(
                            "  {} Regenerated {} ({} change(s))",
                            "✔".green(),
                            store.artifact_path().display(),
                            relevant
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Regeneration failed");
                        eprintln!("  {} Regeneration failed: {}", "✘".red(), e);
                    }
                }
            }
            Ok(Err(error)) => {
                tracing::warn!(?error, "Watch error");
            }
            Err(e) => {
                tracing::debug!(error = %e, "Watcher channel closed");
                break;
            }
        }
    }

    Ok(())
}

/// Events the watcher must not react to: the digest's own writes and OS
/// metadata churn.
fn should_ignore_path(path: &Path) -> bool {
    path.file_name()
        .map(|name| StoreConfig::is_excluded_name(&name.to_string_lossy()))
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_digest_and_metadata_events() {
        assert!(should_ignore_path(Path::new("/store/rag-content.md")));
        assert!(should_ignore_path(Path::new("/store/.DS_Store")));
    }

    #[test]
    fn test_reacts_to_entry_events() {
        assert!(!should_ignore_path(Path::new("/store/notes.txt")));
        assert!(!should_ignore_path(Path::new("/store/a.py")));
    }
}
