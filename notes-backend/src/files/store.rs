//! FileStore: sandboxed list/read/write/update of markdown notes
//!
//! Every operation re-reads the disk; nothing is cached between calls.
//! New files are created exclusively and existing files are rewritten whole
//! through a temporary sibling, so a failed call leaves no partial content.

use super::document::{self, BlockStyle, Document};
use super::error::{FileError, FileResult};
use super::frontmatter::Frontmatter;
use super::listing::{self, EntryKind};
use super::path::{ResolvedPath, Sandbox};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct FileStore {
    sandbox: Sandbox,
}

impl FileStore {
    /// Fails unless `base_folder` exists and is a directory
    pub fn new(base_folder: impl AsRef<Path>) -> FileResult<Self> {
        Ok(Self {
            sandbox: Sandbox::new(base_folder)?,
        })
    }

    /// Canonical base folder
    pub fn root(&self) -> &Path {
        self.sandbox.root()
    }

    // --- Listing ---

    pub fn list_files(&self, dir_path: &str, recursive: bool) -> FileResult<Vec<String>> {
        let dir = self.existing_dir(dir_path)?;
        listing::collect(&self.sandbox, &dir.full, recursive, EntryKind::Markdown)
    }

    pub fn list_dirs(&self, dir_path: &str, recursive: bool) -> FileResult<Vec<String>> {
        let dir = self.existing_dir(dir_path)?;
        listing::collect(&self.sandbox, &dir.full, recursive, EntryKind::Directory)
    }

    // --- Reading ---

    pub fn read_file(&self, file_path: &str) -> FileResult<Vec<String>> {
        let file = self.existing_markdown(file_path, "read")?;
        self.read_lines(&file, file_path)
    }

    pub fn get_frontmatter(&self, file_path: &str) -> FileResult<Frontmatter> {
        let lines = self.read_file(file_path)?;
        document::parse_frontmatter(&lines).map_err(|e| parse_error(file_path, e))
    }

    pub fn get_text_content(&self, file_path: &str) -> FileResult<Vec<String>> {
        let lines = self.read_file(file_path)?;
        Ok(document::body_lines(&lines))
    }

    // --- Writing ---

    /// Create a new document. Never overwrites an existing file.
    pub fn write_file(
        &self,
        file_path: &str,
        frontmatter: Option<Frontmatter>,
        body: Option<Vec<String>>,
    ) -> FileResult<()> {
        let target = self.sandbox.resolve(file_path)?;
        if target.is_root() {
            return Err(FileError::not_a_file(file_path));
        }
        if !target.is_markdown() {
            return Err(FileError::markdown_only("written"));
        }

        let parent_relative = target.parent_relative();
        let parent = target
            .full
            .parent()
            .ok_or_else(|| FileError::not_a_file(file_path))?;
        if !parent.exists() {
            return Err(FileError::directory_not_found(parent_relative));
        }
        if !parent.is_dir() {
            return Err(FileError::not_a_directory(parent_relative));
        }
        if target.full.symlink_metadata().is_ok() {
            return Err(FileError::already_exists(file_path));
        }

        let doc = Document::new(frontmatter.unwrap_or_default(), body.unwrap_or_default());
        let content = doc
            .render(BlockStyle::OmitWhenEmpty)
            .map_err(|e| serialize_error(file_path, e))?;

        create_exclusive(&target.full, &content).map_err(|e| FileError::io(file_path, e))
    }

    // --- Updating ---

    /// Shallow-merge `partial` into the frontmatter.
    ///
    /// Returns `false` without touching the file when the merge changes nothing.
    pub fn update_frontmatter(&self, file_path: &str, partial: &Frontmatter) -> FileResult<bool> {
        let (file, current) = self.load(file_path)?;

        let merged = current.frontmatter.merged(partial);
        if merged == current.frontmatter {
            return Ok(false);
        }

        self.rewrite(&file, file_path, &Document::new(merged, current.body))?;
        Ok(true)
    }

    /// Append lines after the existing body; frontmatter is kept as is
    pub fn update_content(&self, file_path: &str, append_lines: Vec<String>) -> FileResult<()> {
        let (file, mut current) = self.load(file_path)?;
        current.body.extend(append_lines);
        self.rewrite(&file, file_path, &current)
    }

    /// Replace the whole body; frontmatter is kept as is
    pub fn replace_content(&self, file_path: &str, lines: Vec<String>) -> FileResult<()> {
        let (file, current) = self.load(file_path)?;
        self.rewrite(&file, file_path, &Document::new(current.frontmatter, lines))
    }

    // --- Helpers ---

    fn existing_dir(&self, dir_path: &str) -> FileResult<ResolvedPath> {
        let dir = self.sandbox.resolve(dir_path)?;
        if !dir.full.exists() {
            return Err(FileError::path_not_found(dir_path));
        }
        if !dir.full.is_dir() {
            return Err(FileError::not_a_directory(dir_path));
        }
        Ok(dir)
    }

    /// Resolve an existing regular `.md` file to its canonical location
    fn existing_markdown(&self, file_path: &str, action: &str) -> FileResult<PathBuf> {
        let file = self.sandbox.resolve(file_path)?;
        if !file.full.exists() {
            return Err(FileError::path_not_found(file_path));
        }
        if !file.full.is_file() {
            return Err(FileError::not_a_file(file_path));
        }
        if !file.is_markdown() {
            return Err(FileError::markdown_only(action));
        }
        file.full
            .canonicalize()
            .map_err(|e| FileError::io(file_path, e))
    }

    fn read_lines(&self, file: &Path, file_path: &str) -> FileResult<Vec<String>> {
        let text = fs::read_to_string(file).map_err(|e| FileError::io(file_path, e))?;
        Ok(document::split_lines(&text))
    }

    /// Current on-disk document for an update
    fn load(&self, file_path: &str) -> FileResult<(PathBuf, Document)> {
        let file = self.existing_markdown(file_path, "updated")?;
        let lines = self.read_lines(&file, file_path)?;
        let doc = Document::from_lines(&lines).map_err(|e| parse_error(file_path, e))?;
        Ok((file, doc))
    }

    fn rewrite(&self, file: &Path, file_path: &str, doc: &Document) -> FileResult<()> {
        let content = doc
            .render(BlockStyle::Always)
            .map_err(|e| serialize_error(file_path, e))?;
        replace_atomically(file, &content).map_err(|e| FileError::io(file_path, e))
    }
}

fn parse_error(file_path: &str, detail: String) -> FileError {
    FileError::ParseError(format!(
        "Malformed frontmatter in '{}': {}",
        file_path, detail
    ))
}

fn serialize_error(file_path: &str, detail: String) -> FileError {
    FileError::Unexpected(format!(
        "Failed to serialize frontmatter for '{}': {}",
        file_path, detail
    ))
}

/// Create `path` only if nothing exists there yet
fn create_exclusive(path: &Path, content: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    if let Err(e) = file.write_all(content.as_bytes()).and_then(|_| file.sync_all()) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}

/// Write to a hidden temporary sibling, then rename it over `path`.
///
/// The temporary name is unique, so no existing file is ever truncated.
fn replace_atomically(path: &Path, content: &str) -> io::Result<()> {
    let permissions = fs::metadata(path)?.permissions();
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(".tmp")
        .tempfile_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
