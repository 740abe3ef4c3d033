use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ContentError, Result};

const MARKDOWN_EXTENSION: &str = ".md";

pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(root_dir: impl Into<PathBuf>) -> PostList {
        PostList { root_dir: root_dir.into() }
    }

    /// Paths of every markdown file below the root, relative to it, with `/`
    /// separators, sorted.
    pub fn retrieve_markdown_files(&self) -> Result<Vec<String>> {
        let mut files = vec![];
        Self::walk(&self.root_dir, "", &mut files)?;
        files.sort();
        Ok(files)
    }

    fn walk(dir: &Path, prefix: &str, files: &mut Vec<String>) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|e| ContentError::io(dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| ContentError::io(dir, e))?;
            let file_type = entry.file_type().map_err(|e| ContentError::io(entry.path(), e))?;

            // Non UTF-8 names cannot become slugs
            let Some(file_name) = entry.file_name().to_str().map(|s| s.to_string()) else {
                continue;
            };
            let relative = format!("{}{}", prefix, file_name);

            if file_type.is_dir() {
                Self::walk(&entry.path(), &format!("{}/", relative), files)?;
            } else if file_type.is_file() && file_name.ends_with(MARKDOWN_EXTENSION) {
                files.push(relative);
            }
        }

        Ok(())
    }
}
