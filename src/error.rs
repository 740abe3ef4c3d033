use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Raised when the markdown pipeline fails while parsing or serializing.
///
/// Only genuine parser/serializer faults end up here. Empty input is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Markdown rendering failed: {message}")]
pub struct MarkdownRenderError {
    pub message: String,
}

impl MarkdownRenderError {
    pub fn new(message: impl Into<String>) -> Self {
        MarkdownRenderError { message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid front matter: {0}")]
    FrontMatter(String),

    #[error("Invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Post with slug \"{0}\" not found")]
    NotFound(String),

    #[error("Slug \"{slug}\" is produced by both {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error(transparent)]
    Render(#[from] MarkdownRenderError),
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ContentError::Io { path: path.into(), source }
    }
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
