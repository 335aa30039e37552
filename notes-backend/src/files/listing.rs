//! Directory walks for file and folder listings.

use super::error::{FileError, FileResult};
use super::path::{has_hidden_segment, is_markdown, Sandbox};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// What a listing collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular `.md` files
    Markdown,
    Directory,
}

impl EntryKind {
    fn matches(self, entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        match self {
            EntryKind::Markdown => file_type.is_file() && is_markdown(entry.path()),
            EntryKind::Directory => file_type.is_dir(),
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Collect root-relative paths under `dir`.
///
/// Non-recursive listings stop at direct children. Hidden entries are pruned
/// during the walk, and results whose root-relative path has any hidden
/// segment (e.g. when `dir` itself sits in a dot-directory) are dropped.
/// Symlinks are neither followed nor listed.
pub fn collect(
    sandbox: &Sandbox,
    dir: &Path,
    recursive: bool,
    kind: EntryKind,
) -> FileResult<Vec<String>> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    // The walk root is never pruned: its own name says nothing about the
    // caller's path, only the root-relative segments do.
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(FileError::Unexpected(format!(
                    "Failed to read directory '{}': {}",
                    dir.display(),
                    e
                )));
            }
            // Unreadable subtrees are skipped
            Err(_) => continue,
        };

        if !kind.matches(&entry) {
            continue;
        }

        let Some(relative) = sandbox.relative(entry.path()) else {
            continue;
        };
        if has_hidden_segment(&relative) {
            continue;
        }
        paths.push(relative);
    }

    Ok(paths)
}
