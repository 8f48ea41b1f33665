//! Incremental staleness detection
//!
//! Decides per source file whether a recompile is needed, using the
//! compiler-emitted dependency listing (`.d` file, make-rule syntax) and
//! file modification times. No content hashing; a touch invalidates.

use std::path::{Path, PathBuf};

use crate::infra::filesystem;

/// Whether the object at `object_path` must be recompiled
///
/// Rules:
/// 1. Missing object file: stale.
/// 2. Missing dependency listing: not stale from dependencies. The listing
///    only ever adds staleness; a compiler configured not to emit one makes
///    the object permanent until deleted.
/// 3. Any recorded dependency missing or newer than the object: stale.
pub fn is_stale(object_path: &Path, listing_path: &Path) -> bool {
    if !object_path.exists() {
        return true;
    }

    let Ok(listing) = std::fs::read_to_string(listing_path) else {
        return false;
    };
    let Ok(object_mtime) = filesystem::modified_time(object_path) else {
        return true;
    };

    for dependency in parse_listing(&listing) {
        match filesystem::modified_time(&dependency) {
            Ok(dep_mtime) if dep_mtime > object_mtime => return true,
            Ok(_) => {}
            Err(_) => return true,
        }
    }

    false
}

/// Parse a make-rule dependency listing into the recorded paths
///
/// Skips empty lines and rule-target lines (ending in `:` or `: \`), and
/// strips trailing ` \` line continuations from the remainder.
pub fn parse_listing(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.ends_with(':') && !line.ends_with(": \\"))
        .map(|line| {
            let line = line.strip_suffix(" \\").unwrap_or(line);
            PathBuf::from(line.trim())
        })
        .collect()
}
