//! Digest rendering.
//!
//! Turns the current store contents into one markdown document: a
//! top-level heading followed by one section per readable entry, in
//! lexicographic name order. Entries that cannot be resolved or read
//! contribute nothing; a bad entry never aborts the whole render.

use std::fs;
use std::path::{Path, PathBuf};

/// Top-level heading of the generated digest
pub const DIGEST_TITLE: &str = "# RAG Snippets\n\n";

/// Render the digest for the given entry names inside `store_dir`.
///
/// `names` must already be sorted and filtered (see `Store::list`). For
/// symlink entries the target is resolved exactly one hop via
/// `read_link`; chains are deliberately not chased.
pub fn render(store_dir: &Path, names: &[String]) -> String {
    let mut out = String::from(DIGEST_TITLE);

    for name in names {
        let entry_path = store_dir.join(name);

        let meta = match fs::symlink_metadata(&entry_path) {
            Ok(meta) => meta,
            Err(_) => continue,
        };
        if meta.is_dir() {
            continue;
        }

        // One-hop resolution for symlinks; regular files read in place.
        let (read_path, link_target): (PathBuf, Option<PathBuf>) =
            if meta.file_type().is_symlink() {
                match fs::read_link(&entry_path) {
                    Ok(target) if target.exists() => (target.clone(), Some(target)),
                    Ok(target) => {
                        tracing::debug!(entry = %name, target = %target.display(), "Skipping broken link");
                        continue;
                    }
                    Err(e) => {
                        tracing::debug!(entry = %name, error = %e, "Skipping unresolvable link");
                        continue;
                    }
                }
            } else {
                (entry_path.clone(), None)
            };

        let content = match fs::read_to_string(&read_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(entry = %name, error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        out.push_str(&format!("## {name}\n\n"));

        if let Some(target) = &link_target {
            out.push_str(&format!("- **Source**: {}\n\n", target.display()));
        }

        let language = language_hint(name);
        out.push_str(&format!("```{language}\n{content}\n```\n\n"));
    }

    out
}

/// Fence language hint from a file name: lowercased extension without the
/// leading dot, or "text" when there is none.
pub fn language_hint(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "text".to_string())
}
