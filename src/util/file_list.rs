//! Fixture enumeration.
//!
//! [`list_fixtures`] returns the regular files directly inside a directory,
//! sorted by name, minus anything the caller's filter rejects. Subdirectories
//! (such as the outputs directory when it lives under the fixtures
//! directory) are never descended into.
//!
//! **Symlink handling**: links are followed, so a symlink to a regular file
//! counts as a fixture. Since the walk is one level deep, a link to a
//! directory cannot cause a loop; it is simply not a file and is skipped.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

fn walk_error(e: walkdir::Error) -> io::Error {
    e.io_error()
        .map(|io| io::Error::new(io.kind(), io.to_string()))
        .unwrap_or_else(|| io::Error::other(e.to_string()))
}

/// Regular files in `dir` (not recursive) whose names `exclude` rejects are
/// dropped; the rest are returned in file-name order.
///
/// Fails if `dir` cannot be read. An entry inside it that cannot be
/// resolved (a dangling symlink, a permission error) is skipped with a
/// warning.
pub fn list_fixtures<F>(dir: &Path, exclude: F) -> io::Result<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    let mut result = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                if let Some(path) = e.path() {
                    crate::displaylevel!(2, "warning: skipping {}: {}\n", path.display(), e);
                }
                continue;
            }
            Err(e) => return Err(walk_error(e)),
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if exclude(&name) {
            crate::displaylevel!(4, "Skipping {}\n", entry.path().display());
            continue;
        }
        result.push(entry.into_path());
    }
    Ok(result)
}
