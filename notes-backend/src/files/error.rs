//! Typed errors for the sandboxed file store.
//!
//! Every failure carries a machine-readable [`ErrorKind`] and a message that
//! can be shown to API clients as-is.

use std::io;
use thiserror::Error;

/// Machine-readable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Absolute path or traversal outside the base folder
    InvalidPath,
    NotFound,
    NotAFile,
    NotADirectory,
    /// Anything other than a `.md` document
    InvalidContentType,
    AlreadyExists,
    /// Frontmatter block is not a valid YAML mapping
    ParseError,
    Unexpected,
}

impl ErrorKind {
    /// Snake-case name sent to API clients
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidPath => "invalid_path",
            ErrorKind::NotFound => "not_found",
            ErrorKind::NotAFile => "not_a_file",
            ErrorKind::NotADirectory => "not_a_directory",
            ErrorKind::InvalidContentType => "invalid_content_type",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::ParseError => "parse_error",
            ErrorKind::Unexpected => "unexpected",
        }
    }
}

#[derive(Debug, Error)]
pub enum FileError {
    #[error("{0}")]
    InvalidPath(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NotAFile(String),
    #[error("{0}")]
    NotADirectory(String),
    #[error("{0}")]
    InvalidContentType(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    ParseError(String),
    #[error("{0}")]
    Unexpected(String),
}

pub type FileResult<T> = Result<T, FileError>;

impl FileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FileError::InvalidPath(_) => ErrorKind::InvalidPath,
            FileError::NotFound(_) => ErrorKind::NotFound,
            FileError::NotAFile(_) => ErrorKind::NotAFile,
            FileError::NotADirectory(_) => ErrorKind::NotADirectory,
            FileError::InvalidContentType(_) => ErrorKind::InvalidContentType,
            FileError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            FileError::ParseError(_) => ErrorKind::ParseError,
            FileError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    pub fn relative_path_required() -> Self {
        FileError::InvalidPath("The path must be a relative path.".to_string())
    }

    pub fn outside_base(path: &str) -> Self {
        FileError::InvalidPath(format!(
            "The path '{}' resolves outside the base folder.",
            path
        ))
    }

    pub fn path_not_found(path: &str) -> Self {
        FileError::NotFound(format!(
            "The provided path '{}' does not exist within the base folder.",
            path
        ))
    }

    pub fn directory_not_found(dir: &str) -> Self {
        FileError::NotFound(format!(
            "The directory '{}' does not exist within the base folder.",
            dir
        ))
    }

    pub fn not_a_file(path: &str) -> Self {
        FileError::NotAFile(format!("The provided path '{}' is not a file.", path))
    }

    pub fn not_a_directory(path: &str) -> Self {
        FileError::NotADirectory(format!(
            "The provided path '{}' is not a directory.",
            path
        ))
    }

    pub fn markdown_only(action: &str) -> Self {
        FileError::InvalidContentType(format!(
            "Only markdown (.md) files can be {}.",
            action
        ))
    }

    pub fn already_exists(path: &str) -> Self {
        FileError::AlreadyExists(format!(
            "The file '{}' already exists. Overwriting is not allowed.",
            path
        ))
    }

    /// Wrap an I/O failure, keeping the path it happened on in the message
    pub fn io(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::path_not_found(path),
            io::ErrorKind::AlreadyExists => Self::already_exists(path),
            io::ErrorKind::InvalidData => FileError::Unexpected(format!(
                "The file '{}' is not valid UTF-8 text.",
                path
            )),
            _ => FileError::Unexpected(format!("I/O error on '{}': {}", path, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            FileError::relative_path_required().kind(),
            ErrorKind::InvalidPath
        );
        assert_eq!(FileError::already_exists("a.md").kind(), ErrorKind::AlreadyExists);
        assert_eq!(FileError::not_a_directory("a.md").kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            FileError::relative_path_required().to_string(),
            "The path must be a relative path."
        );
        assert_eq!(
            FileError::path_not_found("nonexistent.md").to_string(),
            "The provided path 'nonexistent.md' does not exist within the base folder."
        );
        assert_eq!(
            FileError::markdown_only("read").to_string(),
            "Only markdown (.md) files can be read."
        );
    }

    #[test]
    fn test_io_mapping() {
        let err = FileError::io("x.md", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = FileError::io("x.md", io::Error::from(io::ErrorKind::AlreadyExists));
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        let err = FileError::io("x.md", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_kind_names_are_snake_case() {
        assert_eq!(ErrorKind::InvalidContentType.as_str(), "invalid_content_type");
        assert_eq!(ErrorKind::NotADirectory.as_str(), "not_a_directory");
        assert_eq!(FileError::already_exists("a.md").kind().as_str(), "already_exists");
    }
}
