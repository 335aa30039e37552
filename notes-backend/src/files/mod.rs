//! Sandboxed markdown file store
//!
//! Lists, reads, creates and updates `.md` documents beneath one base folder.
//! Documents are YAML frontmatter plus body lines; updates rewrite the whole
//! file from the parsed parts and never touch anything outside the base folder.

pub mod document;
pub mod error;
pub mod frontmatter;
pub mod listing;
pub mod path;
pub mod store;

pub use error::{ErrorKind, FileError, FileResult};
pub use frontmatter::Frontmatter;
pub use store::FileStore;
