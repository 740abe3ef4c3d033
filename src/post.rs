use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::Serialize;

use crate::content::front_matter::FrontMatter;
use crate::content::RawContentUnit;
use crate::error::Result;
use crate::metadata::{normalize, CanonicalPostMetadata};

/// A post as the site sees it: the raw front matter, the normalized fields and
/// the markdown body, which is not serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub front_matter: FrontMatter,
    pub fields: CanonicalPostMetadata,
    #[serde(skip)]
    pub body: String,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, published={}, date={:?}\ntitle={}\nfile={}",
               self.id,
               self.fields.published,
               self.fields.create_time.to_date_time(),
               self.fields.title,
               self.fields.file_path,
        )
    }
}

impl Post {
    pub fn from_unit(unit: RawContentUnit) -> Post {
        let fields = normalize(&unit.relative_path, &unit.front_matter, &unit.body);

        Post {
            id: fields.slug.clone(),
            front_matter: unit.front_matter,
            fields,
            body: unit.body,
        }
    }

    pub fn from_file(root_dir: &Path, relative_path: &str) -> Result<Post> {
        let unit = RawContentUnit::from_file(root_dir, relative_path)?;
        Ok(Self::from_unit(unit))
    }

    pub fn from_string(relative_path: &str, content: &str) -> Result<Post> {
        let unit = RawContentUnit::from_string(relative_path, content)?;
        Ok(Self::from_unit(unit))
    }
}

#[cfg(test)]
mod tests {
    use crate::content::front_matter::FrontMatterValue;
    use crate::test_data::{POST_DATA_MD, POST_DATA_TOML};

    use super::*;

    #[test]
    fn test_from_string() {
        let post = Post::from_string("posts/20220402_what_i_learned/index.md", POST_DATA_MD).unwrap();
        println!("{}", post);
        assert_eq!(post.id, "posts/20220402_what_i_learned");
        assert_eq!(post.fields.slug, post.id);
        assert_eq!(post.front_matter.get("author"), Some(&FrontMatterValue::from("thiago")));
        assert!(post.body.starts_with("How to be a great software engineer?"));
    }

    #[test]
    fn test_toml_post() {
        let post = Post::from_string("toml-post.md", POST_DATA_TOML).unwrap();
        assert_eq!(post.id, "toml-post");
        assert_eq!(post.fields.title, "A TOML post");
        assert!(!post.fields.published);
        assert!(!post.fields.indexed);
        assert_eq!(post.fields.create_time.millis(), Some(1707778440000));
    }

    #[test]
    fn test_serialize_skips_body() {
        let post = Post::from_string("toml-post.md", POST_DATA_TOML).unwrap();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], "toml-post");
        assert_eq!(json["frontMatter"]["date"], "2024-02-12T22:54:00.000Z");
        assert_eq!(json["fields"]["title"], "A TOML post");
        assert!(json.get("body").is_none());
    }
}
