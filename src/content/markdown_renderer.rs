use markdown::{Constructs, ParseOptions};
use serde::Deserialize;
use spdlog::error;

use crate::content::ast::{self, Node};
use crate::content::highlight::highlight;
use crate::content::html_writer;
use crate::error::MarkdownRenderError;
use crate::text_utils::truncate_chars;

const SNIPPET_CHAR_COUNT: usize = 100;

/// Unknown keys are ignored when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(alias = "enable_highlight")]
    pub enable_highlight: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { enable_highlight: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownPreset {
    /// Blog posts, every extension enabled
    Blog,
    /// Plain markdown
    Simple,
    /// Post summaries
    Description,
}

impl MarkdownPreset {
    pub fn options(self) -> RenderOptions {
        match self {
            MarkdownPreset::Blog => RenderOptions { enable_highlight: true },
            MarkdownPreset::Simple => RenderOptions { enable_highlight: false },
            MarkdownPreset::Description => RenderOptions { enable_highlight: false },
        }
    }
}

/// Start of the input, as written to the log when rendering fails.
fn error_snippet(content: &str) -> &str {
    truncate_chars(content, SNIPPET_CHAR_COUNT)
}

pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> MarkdownRenderer {
        MarkdownRenderer { options }
    }

    /// Renders `content` to HTML. Blank input gives an empty string and
    /// never reaches the parser.
    pub fn render(&self, content: &str) -> Result<String, MarkdownRenderError> {
        self.render_with(content, |content| self.run(content))
    }

    fn render_with<F>(&self, content: &str, run: F) -> Result<String, MarkdownRenderError>
    where
        F: FnOnce(&str) -> Result<String, MarkdownRenderError>,
    {
        if content.trim().is_empty() {
            return Ok(String::new());
        }

        let res = run(content);
        if let Err(ref e) = res {
            error!("Markdown rendering failed: {}", e.message);
            error!("Offending content: {}...", error_snippet(content));
        }
        res
    }

    fn run(&self, content: &str) -> Result<String, MarkdownRenderError> {
        let tree = Self::parse(content)?;
        let tree = self.transform(tree);
        html_writer::to_html(&tree)
            .map_err(|e| MarkdownRenderError::new(format!("Error writing HTML: {}", e)))
    }

    pub fn transform(&self, tree: Node) -> Node {
        if self.options.enable_highlight {
            highlight(tree)
        } else {
            tree
        }
    }

    pub fn parse(content: &str) -> Result<Node, MarkdownRenderError> {
        match markdown::to_mdast(content, &Self::parse_options()) {
            Ok(root) => Ok(ast::from_mdast(root)),
            Err(e) => Err(MarkdownRenderError::new(e.reason)),
        }
    }

    fn parse_options() -> ParseOptions {
        ParseOptions {
            constructs: Constructs {
                // A closing `==` right after a bare URL would be read as part of it
                gfm_autolink_literal: false,
                gfm_footnote_definition: false,
                gfm_label_start_footnote: false,
                ..Constructs::gfm()
            },
            ..ParseOptions::gfm()
        }
    }
}

/// Renders markdown to HTML.
///
/// Nothing inside awaits on I/O, the future is ready once the synchronous
/// work is done. It exists for callers that drive rendering from async code.
pub async fn render_markdown(content: &str, options: RenderOptions) -> Result<String, MarkdownRenderError> {
    MarkdownRenderer::new(options).render(content)
}

pub fn render_markdown_sync(content: &str, options: RenderOptions) -> Result<String, MarkdownRenderError> {
    MarkdownRenderer::new(options).render(content)
}

pub async fn render_with_preset(content: &str, preset: MarkdownPreset) -> Result<String, MarkdownRenderError> {
    render_markdown(content, preset.options()).await
}
