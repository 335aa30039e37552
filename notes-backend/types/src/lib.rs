//! Shared request and response types for the notes file API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =====================================================
// Query Parameters
// =====================================================

/// What `GET /v1/files/` lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListType {
    /// Markdown files directly inside `path`
    Files,
    /// Markdown files anywhere below `path`
    #[default]
    FilesAll,
    Dirs,
    DirsAll,
}

impl ListType {
    pub fn is_recursive(self) -> bool {
        matches!(self, ListType::FilesAll | ListType::DirsAll)
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub path: String,
    #[serde(default, rename = "type")]
    pub list_type: ListType,
}

/// Which part of a document `GET /v1/files/read` returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadContent {
    #[default]
    Full,
    Frontmatter,
    Text,
}

#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    pub path: String,
    #[serde(default)]
    pub content: ReadContent,
}

#[derive(Debug, Deserialize)]
pub struct WriteQuery {
    pub path: String,
}

/// How `PATCH /v1/files/write` changes a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    /// Shallow-merge the given frontmatter
    Frontmatter,
    /// Append the given lines to the body
    Content,
    /// Replace the body with the given lines
    Replace,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuery {
    pub path: String,
    #[serde(rename = "type")]
    pub update_type: UpdateType,
}

// =====================================================
// Request Bodies
// =====================================================

/// Payload for creating or updating a document
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FileContent {
    #[serde(default)]
    pub frontmatter: Option<Map<String, Value>>,
    #[serde(default)]
    pub content: Option<Vec<String>>,
}

// =====================================================
// Responses
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentResponse {
    pub content: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FrontmatterResponse {
    pub frontmatter: Value,
}

/// Body of every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status_code: u16,
    /// Machine-readable error kind, e.g. `not_found`
    pub kind: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status_code: u16, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            kind: kind.into(),
            message: message.into(),
        }
    }
}
