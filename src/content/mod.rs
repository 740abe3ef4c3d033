use serde::Serialize;

use crate::metadata::CanonicalPostMetadata;

pub mod ast;
pub mod content_file;
pub mod front_matter;
pub mod highlight;
pub mod html_writer;
pub mod markdown_renderer;

pub use content_file::RawContentUnit;
pub use markdown_renderer::{render_markdown, render_markdown_sync, render_with_preset, MarkdownPreset, RenderOptions};

/// Metadata of a post together with its rendered body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    pub metadata: CanonicalPostMetadata,
    pub html: String,
}
