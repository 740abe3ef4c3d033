use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use postpress::content::front_matter::split_front_matter;
use postpress::content::{render_with_preset, MarkdownPreset};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PresetArg {
    /// Blog posts, with highlights
    Blog,
    /// Plain markdown
    Simple,
    /// Post summaries
    Description,
}

impl From<PresetArg> for MarkdownPreset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Blog => MarkdownPreset::Blog,
            PresetArg::Simple => MarkdownPreset::Simple,
            PresetArg::Description => MarkdownPreset::Description,
        }
    }
}

/// Renders the body of one markdown file, front matter excluded.
pub(crate) async fn render_file(file: &Path, preset: PresetArg) -> Result<String> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Error reading {}", file.display()))?;
    let (_, body) = split_front_matter(&raw)
        .with_context(|| format!("Error splitting front matter of {}", file.display()))?;

    Ok(render_with_preset(body, preset.into()).await?)
}
