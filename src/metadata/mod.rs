use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::content::front_matter::FrontMatter;
use crate::text_utils::{excerpt, reading_time};

pub mod field_rules;
pub mod slug;
pub mod timestamp;

pub use slug::{slug_from_path, slug_segments, url_path};
pub use timestamp::Timestamp;

pub const DEFAULT_TITLE: &str = "Untitled Post";

/// Metadata of one post, with every front matter alias already resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPostMetadata {
    pub slug: String,
    pub url_path: String,
    pub file_path: String,
    pub published: bool,
    pub indexed: bool,
    pub title: String,
    pub published_title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub create_time: Timestamp,
    pub update_time: Timestamp,
    pub publish_time: Timestamp,
    pub cover: Option<String>,
    pub reading_time: u64,
}

/// Builds the canonical metadata of a post. Missing or malformed fields fall
/// back to defaults, this never fails.
pub fn normalize(relative_path: &str, front_matter: &FrontMatter, body: &str) -> CanonicalPostMetadata {
    normalize_at(relative_path, front_matter, body, Utc::now())
}

/// Same as [`normalize`], with `now` used when no creation date is present.
pub fn normalize_at(relative_path: &str,
                    front_matter: &FrontMatter,
                    body: &str,
                    now: DateTime<Utc>) -> CanonicalPostMetadata {
    use field_rules::*;

    let slug = slug_from_path(relative_path);
    let title = TITLE.resolve(front_matter).unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let explicit_published_title = PUBLISHED_TITLE.resolve(front_matter);
    let published = explicit_published_title.is_some()
        || PUBLISHED.resolve(front_matter).unwrap_or(false);
    // Publishing implies indexing, not the other way around
    let indexed = published || INDEXED.resolve(front_matter).unwrap_or(false);
    let published_title = explicit_published_title.unwrap_or_else(|| title.clone());

    let tags = TAGS.collect(front_matter).into_iter().flatten().collect();

    let create_time = CREATE_TIME.resolve(front_matter)
        .unwrap_or_else(|| Timestamp::from_date_time(&now));
    let update_time = UPDATE_TIME.resolve(front_matter).unwrap_or(create_time);
    let publish_time = PUBLISH_TIME.resolve(front_matter).unwrap_or(create_time);

    CanonicalPostMetadata {
        url_path: url_path(&slug),
        slug,
        file_path: relative_path.to_string(),
        published,
        indexed,
        title,
        published_title,
        description: excerpt(body),
        tags,
        create_time,
        update_time,
        publish_time,
        cover: COVER.resolve(front_matter),
        reading_time: reading_time(body),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::content::front_matter::{split_front_matter, FrontMatterValue};
    use crate::test_data::POST_DATA_MD;

    use super::*;

    fn front_matter(entries: Vec<(&str, FrontMatterValue)>) -> FrontMatter {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap()
    }

    #[test]
    fn test_defaults() {
        let meta = normalize_at("drafts/idea.md", &FrontMatter::new(), "", fixed_now());
        assert_eq!(meta.slug, "drafts/idea");
        assert_eq!(meta.url_path, "/drafts/idea/");
        assert_eq!(meta.file_path, "drafts/idea.md");
        assert_eq!(meta.title, DEFAULT_TITLE);
        assert_eq!(meta.published_title, DEFAULT_TITLE);
        assert!(!meta.published);
        assert!(!meta.indexed);
        assert!(meta.tags.is_empty());
        assert_eq!(meta.cover, None);
        assert_eq!(meta.reading_time, 0);
        assert_eq!(meta.description, "");

        let now = Timestamp::from_date_time(&fixed_now());
        assert_eq!(meta.create_time, now);
        assert_eq!(meta.update_time, now);
        assert_eq!(meta.publish_time, now);
    }

    #[test]
    fn test_published_title_forces_published() {
        let fm = front_matter(vec![("publishedTitle", "X".into())]);
        let meta = normalize_at("a.md", &fm, "", fixed_now());
        assert!(meta.published);
        assert!(meta.indexed);
        assert_eq!(meta.published_title, "X");
        assert_eq!(meta.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_indexed_does_not_imply_published() {
        let fm = front_matter(vec![("indexed", true.into())]);
        let meta = normalize_at("a.md", &fm, "", fixed_now());
        assert!(!meta.published);
        assert!(meta.indexed);

        let fm = front_matter(vec![("published", true.into()), ("index", false.into())]);
        let meta = normalize_at("a.md", &fm, "", fixed_now());
        assert!(meta.published);
        assert!(meta.indexed);
    }

    #[test]
    fn test_tags_are_merged() {
        let fm = front_matter(vec![("tag", "x".into()), ("tags", vec!["y", "z"].into())]);
        let meta = normalize_at("a.md", &fm, "", fixed_now());
        assert_eq!(meta.tags, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_reading_time() {
        let body = vec!["word"; 400].join(" ");
        let meta = normalize_at("a.md", &FrontMatter::new(), &body, fixed_now());
        assert_eq!(meta.reading_time, 2);

        let body = vec!["word"; 401].join("\n");
        let meta = normalize_at("a.md", &FrontMatter::new(), &body, fixed_now());
        assert_eq!(meta.reading_time, 3);
    }

    #[test]
    fn test_times_fall_back_to_create_time() {
        let fm = front_matter(vec![("date", "2024-01-02".into()), ("update-date", "2024-02-01".into())]);
        let meta = normalize_at("a.md", &fm, "", fixed_now());
        assert_eq!(meta.create_time, Timestamp::Millis(1704153600000));
        assert_eq!(meta.update_time, Timestamp::Millis(1706745600000));
        assert_eq!(meta.publish_time, Timestamp::Millis(1704153600000));
    }

    #[test]
    fn test_invalid_date_is_kept() {
        let fm = front_matter(vec![("date", "sometime last year".into())]);
        let meta = normalize_at("a.md", &fm, "", fixed_now());
        assert_eq!(meta.create_time, Timestamp::Invalid);
        assert_eq!(meta.update_time, Timestamp::Invalid);
        assert_eq!(meta.publish_time, Timestamp::Invalid);
    }

    #[test]
    fn test_description() {
        let meta = normalize_at("a.md", &FrontMatter::new(), "Intro\n<!-- more -->\nRest", fixed_now());
        assert_eq!(meta.description, "Intro\n");

        let body = "é".repeat(300);
        let meta = normalize_at("a.md", &FrontMatter::new(), &body, fixed_now());
        assert_eq!(meta.description.chars().count(), 200);
    }

    #[test]
    fn test_cover() {
        let fm = front_matter(vec![("cover", "https://img.example.com/c.png".into())]);
        let meta = normalize_at("a.md", &fm, "", fixed_now());
        assert_eq!(meta.cover.as_deref(), Some("https://img.example.com/c.png"));

        let fm = front_matter(vec![("cover", "cover.png".into())]);
        let meta = normalize_at("a.md", &fm, "", fixed_now());
        assert_eq!(meta.cover, None);
    }

    #[test]
    fn test_normalize_post_data() {
        let (fm, body) = split_front_matter(POST_DATA_MD).unwrap();
        let meta = normalize("posts/20220402_what_i_learned/index.md", &fm, body);
        assert_eq!(meta.slug, "posts/20220402_what_i_learned");
        assert_eq!(meta.title, "What I learned after 20+ years of software development");
        assert!(meta.published);
        assert_eq!(meta.tags, vec!["career", "software"]);
        assert_eq!(meta.create_time, Timestamp::parse("2022-04-02 12:05:00"));
        assert!(meta.description.starts_with("How to be a great software engineer?"));
        assert!(!meta.description.contains("<!-- more -->"));
        assert!(meta.reading_time >= 1);
    }

    #[test]
    fn test_serialize_camel_case() {
        let fm = front_matter(vec![("title", "T".into()), ("date", "sometime".into())]);
        let meta = normalize_at("t.md", &fm, "one two", fixed_now());
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["urlPath"], "/t/");
        assert_eq!(json["publishedTitle"], "T");
        assert_eq!(json["readingTime"], 1);
        assert!(json["createTime"].is_null());
        assert!(json["cover"].is_null());
    }
}
