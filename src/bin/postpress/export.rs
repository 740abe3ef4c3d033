use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use spdlog::info;

use postpress::content::RenderOptions;
use postpress::metadata::CanonicalPostMetadata;
use postpress::post_store::PostStore;

const INDEX_FILE: &str = "index.html";
const METADATA_FILE: &str = "posts.json";

/// Writes `<out_dir>/<slug>/index.html` for every post and the metadata of
/// all of them, newest first, to `<out_dir>/posts.json`.
/// Returns the number of posts written.
pub(crate) async fn export_posts(store: &PostStore, out_dir: &Path, options: RenderOptions) -> Result<usize> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Error creating {}", out_dir.display()))?;

    let mut metadata: Vec<&CanonicalPostMetadata> = Vec::with_capacity(store.len());
    for post in store.posts() {
        let doc = store.render(&post.id, options).await?;

        let post_dir = out_dir.join(&post.id);
        fs::create_dir_all(&post_dir)
            .with_context(|| format!("Error creating {}", post_dir.display()))?;
        fs::write(post_dir.join(INDEX_FILE), &doc.html)
            .with_context(|| format!("Error writing {}", post_dir.display()))?;

        info!("Exported {} to {}", post.id, post_dir.display());
        metadata.push(&post.fields);
    }

    let json = serde_json::to_string_pretty(&metadata)?;
    fs::write(out_dir.join(METADATA_FILE), json)
        .with_context(|| format!("Error writing {}", METADATA_FILE))?;

    Ok(metadata.len())
}
