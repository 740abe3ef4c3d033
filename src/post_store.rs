use std::collections::HashMap;
use std::path::Path;

use spdlog::{debug, info};

use crate::content::{render_markdown, render_markdown_sync, RenderOptions, RenderedDocument};
use crate::error::{ContentError, Result};
use crate::metadata::{slug_segments, Timestamp};
use crate::post::Post;
use crate::post_list::PostList;

/// Every post of a content directory, newest first.
pub struct PostStore {
    posts: Vec<Post>,
    // slug, position in posts
    slug_to_index: HashMap<String, usize>,
}

impl PostStore {
    pub fn load(content_dir: &Path) -> Result<PostStore> {
        let files = PostList::new(content_dir).retrieve_markdown_files()?;
        info!("Loading {} markdown files from {}", files.len(), content_dir.display());

        let mut posts = Vec::with_capacity(files.len());
        for relative_path in &files {
            let post = Post::from_file(content_dir, relative_path)?;
            debug!("Loaded {}", post);
            posts.push(post);
        }

        Self::from_posts(posts)
    }

    /// Builds a store out of already parsed posts. Slugs must be unique.
    pub fn from_posts(mut posts: Vec<Post>) -> Result<PostStore> {
        // Stable sort, ties keep discovery order
        posts.sort_by(|a, b| Timestamp::newest_first(&a.fields.create_time, &b.fields.create_time));

        let mut slug_to_index: HashMap<String, usize> = HashMap::with_capacity(posts.len());
        for (idx, post) in posts.iter().enumerate() {
            if let Some(&prev) = slug_to_index.get(&post.id) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.id.clone(),
                    first: posts[prev].fields.file_path.clone(),
                    second: post.fields.file_path.clone(),
                });
            }
            slug_to_index.insert(post.id.clone(), idx);
        }

        Ok(PostStore { posts, slug_to_index })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn published(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|post| post.fields.published)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Slugs split in path segments, as used by the page router.
    pub fn all_post_ids(&self) -> Vec<Vec<String>> {
        self.posts.iter().map(|post| slug_segments(&post.id)).collect()
    }

    pub fn get(&self, slug: &str) -> Result<&Post> {
        self.slug_to_index.get(slug)
            .map(|&idx| &self.posts[idx])
            .ok_or_else(|| ContentError::NotFound(slug.to_string()))
    }

    pub async fn render(&self, slug: &str, options: RenderOptions) -> Result<RenderedDocument> {
        let post = self.get(slug)?;
        let html = render_markdown(&post.body, options).await?;
        Ok(RenderedDocument { metadata: post.fields.clone(), html })
    }

    pub fn render_sync(&self, slug: &str, options: RenderOptions) -> Result<RenderedDocument> {
        let post = self.get(slug)?;
        let html = render_markdown_sync(&post.body, options)?;
        Ok(RenderedDocument { metadata: post.fields.clone(), html })
    }
}
