//! Path containment for the notes base folder.
//!
//! Caller paths are normalized lexically first (so `a/../b.md` is fine but
//! `../b.md` is not), then the deepest existing ancestor is canonicalized and
//! checked against the canonical base folder, which catches symlink escapes.

use super::error::{FileError, FileResult};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// A caller path that has passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Normalized, `/`-separated path relative to the base folder ("" for the root)
    pub relative: String,
    /// Absolute location beneath the canonical base folder
    pub full: PathBuf,
}

impl ResolvedPath {
    pub fn is_root(&self) -> bool {
        self.relative.is_empty()
    }

    /// Relative path of the parent directory ("" when the parent is the root)
    pub fn parent_relative(&self) -> &str {
        self.relative
            .rsplit_once('/')
            .map(|(parent, _)| parent)
            .unwrap_or("")
    }

    pub fn is_markdown(&self) -> bool {
        is_markdown(&self.full)
    }
}

/// Canonical base folder that every path is confined to
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    pub fn new(base_folder: impl AsRef<Path>) -> FileResult<Self> {
        let base_folder = base_folder.as_ref();
        let invalid = || {
            FileError::NotADirectory(format!(
                "The provided base_folder '{}' is not a valid directory.",
                base_folder.display()
            ))
        };

        let root = base_folder.canonicalize().map_err(|_| invalid())?;
        if !root.is_dir() {
            return Err(invalid());
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate a caller path and resolve it beneath the base folder.
    ///
    /// Absolute input is rejected before anything touches the filesystem.
    pub fn resolve(&self, input: &str) -> FileResult<ResolvedPath> {
        let requested = Path::new(input);
        if requested.is_absolute() || requested.has_root() {
            return Err(FileError::relative_path_required());
        }

        let mut parts: Vec<&OsStr> = Vec::new();
        for component in requested.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return Err(FileError::relative_path_required());
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if parts.pop().is_none() {
                        return Err(FileError::outside_base(input));
                    }
                }
                Component::Normal(part) => parts.push(part),
            }
        }

        let mut full = self.root.clone();
        for part in &parts {
            full.push(part);
        }

        self.ensure_contained(&full, input)?;

        let relative = parts
            .iter()
            .map(|p| p.to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        Ok(ResolvedPath { relative, full })
    }

    /// Root-relative, `/`-separated form of a path under the base folder
    pub fn relative(&self, path: &Path) -> Option<String> {
        let stripped = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = stripped
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Some(parts.join("/"))
    }

    /// The deepest ancestor that exists on disk must canonicalize to a
    /// location under the root; a symlink pointing elsewhere fails here.
    fn ensure_contained(&self, full: &Path, input: &str) -> FileResult<()> {
        for ancestor in full.ancestors() {
            match ancestor.canonicalize() {
                Ok(canonical) => {
                    if canonical.starts_with(&self.root) {
                        return Ok(());
                    }
                    return Err(FileError::outside_base(input));
                }
                Err(_) => continue,
            }
        }

        Err(FileError::Unexpected(format!(
            "The base folder '{}' is no longer accessible.",
            self.root.display()
        )))
    }
}

/// Only `.md` documents are served
pub fn is_markdown(path: &Path) -> bool {
    path.extension().map(|ext| ext == "md").unwrap_or(false)
}

/// True if any `/`-separated segment is a dotfile or dot-directory
pub fn has_hidden_segment(relative: &str) -> bool {
    relative.split('/').any(|part| part.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::error::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_new_rejects_missing_root() {
        let dir = tempdir().unwrap();
        let err = Sandbox::new(dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn test_new_rejects_file_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.md");
        fs::write(&file, "x").unwrap();
        assert!(Sandbox::new(&file).is_err());
    }

    #[test]
    fn test_resolve_relative() {
        let dir = tempdir().unwrap();
        let sandbox = Sandbox::new(dir.path()).unwrap();

        let resolved = sandbox.resolve("notes/today.md").unwrap();
        assert_eq!(resolved.relative, "notes/today.md");
        assert_eq!(resolved.full, sandbox.root().join("notes").join("today.md"));
        assert_eq!(resolved.parent_relative(), "notes");
        assert!(resolved.is_markdown());
    }

    #[test]
    fn test_resolve_root_forms() {
        let dir = tempdir().unwrap();
        let sandbox = Sandbox::new(dir.path()).unwrap();

        for input in ["", ".", "./", "a/.."] {
            let resolved = sandbox.resolve(input).unwrap();
            assert!(resolved.is_root(), "{input:?} should resolve to the root");
            assert_eq!(resolved.full, sandbox.root());
        }
    }

    #[test]
    fn test_resolve_rejects_absolute() {
        let dir = tempdir().unwrap();
        let sandbox = Sandbox::new(dir.path()).unwrap();

        let err = sandbox.resolve("/absolute/path/file.md").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
        assert_eq!(err.to_string(), "The path must be a relative path.");
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("inner")).unwrap();
        let sandbox = Sandbox::new(dir.path().join("inner")).unwrap();

        for input in ["..", "../x.md", "a/../../x.md", "./../inner/../../x.md"] {
            let err = sandbox.resolve(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPath, "{input:?}");
        }

        let ok = sandbox.resolve("a/b/../c.md").unwrap();
        assert_eq!(ok.relative, "a/c.md");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_rejects_symlink_escape() {
        let outside = tempdir().unwrap();
        fs::write(outside.path().join("secret.md"), "secret").unwrap();

        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();
        let sandbox = Sandbox::new(dir.path()).unwrap();

        let err = sandbox.resolve("link/secret.md").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPath);

        // Also refused for paths that do not exist yet beneath the link
        let err = sandbox.resolve("link/new.md").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
    }

    #[test]
    fn test_relative_uses_forward_slashes() {
        let dir = tempdir().unwrap();
        let sandbox = Sandbox::new(dir.path()).unwrap();
        let nested = sandbox.root().join("a").join("b").join("c.md");
        assert_eq!(sandbox.relative(&nested).unwrap(), "a/b/c.md");
    }

    #[test]
    fn test_hidden_segments() {
        assert!(has_hidden_segment(".obsidian/app.md"));
        assert!(has_hidden_segment("notes/.draft.md"));
        assert!(!has_hidden_segment("notes/draft.md"));
    }
}
