use std::fs;
use std::path::Path;

use crate::content::front_matter::{split_front_matter, FrontMatter};
use crate::error::{ContentError, Result};

/// One source file, split into front matter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawContentUnit {
    pub relative_path: String,
    pub front_matter: FrontMatter,
    pub body: String,
}

impl RawContentUnit {
    pub fn from_file(root_dir: &Path, relative_path: &str) -> Result<RawContentUnit> {
        let file_path = root_dir.join(relative_path);
        let raw_content = fs::read_to_string(&file_path)
            .map_err(|e| ContentError::io(&file_path, e))?;

        Self::from_string(relative_path, &raw_content).map_err(|e| match e {
            ContentError::FrontMatter(desc) => ContentError::FrontMatter(format!("{} - file={}", desc, relative_path)),
            other => other,
        })
    }

    pub fn from_string(relative_path: &str, raw_content: &str) -> Result<RawContentUnit> {
        let (front_matter, body) = split_front_matter(raw_content)?;

        Ok(RawContentUnit {
            relative_path: relative_path.to_string(),
            front_matter,
            body: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::content::front_matter::FrontMatterValue;
    use crate::test_data::POST_DATA_MD;

    use super::*;

    #[test]
    fn test_from_string() {
        let unit = RawContentUnit::from_string("posts/learned/index.md", POST_DATA_MD).unwrap();
        assert_eq!(unit.relative_path, "posts/learned/index.md");
        assert_eq!(unit.front_matter.get("author"), Some(&FrontMatterValue::from("thiago")));
        assert!(unit.body.starts_with("How to be a great software engineer?"));
    }

    #[test]
    fn test_from_missing_file() {
        let res = RawContentUnit::from_file(Path::new("does/not/exist"), "post.md");
        assert!(matches!(res, Err(ContentError::Io { .. })));
    }

    #[test]
    fn test_front_matter_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.md"), "---\ntitle: [\n---\nBody").unwrap();
        let err = RawContentUnit::from_file(dir.path(), "broken.md").unwrap_err();
        assert!(err.to_string().contains("file=broken.md"));
    }
}
