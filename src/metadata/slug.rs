const INDEX_SUFFIX: &str = "/index.md";
const MD_SUFFIX: &str = ".md";

/// Derives the slug of a post from its path relative to the content root.
///
/// `foo/bar/index.md` and `foo/bar.md` both give `foo/bar`. Having both files
/// for the same post is a caller error and is not detected here.
pub fn slug_from_path(relative_path: &str) -> String {
    let path = relative_path.replace('\\', "/");

    if let Some(dir) = path.strip_suffix(INDEX_SUFFIX) {
        return dir.to_string();
    }

    match path.strip_suffix(MD_SUFFIX) {
        Some(stem) => stem.to_string(),
        None => path,
    }
}

pub fn url_path(slug: &str) -> String {
    format!("/{}/", slug)
}

pub fn slug_segments(slug: &str) -> Vec<String> {
    slug.split('/').map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_path() {
        assert_eq!(slug_from_path("a/b/index.md"), "a/b");
        assert_eq!(slug_from_path("a/b.md"), "a/b");
        assert_eq!(slug_from_path("c.md"), "c");
        assert_eq!(slug_from_path("a\\b\\index.md"), "a/b");
        assert_eq!(slug_from_path("oi\\2024\\post.md"), "oi/2024/post");
    }

    #[test]
    fn test_root_index_keeps_name() {
        assert_eq!(slug_from_path("index.md"), "index");
    }

    #[test]
    fn test_only_trailing_suffix_is_stripped() {
        assert_eq!(slug_from_path("notes.md/readme.md"), "notes.md/readme");
        assert_eq!(slug_from_path("post.markdown"), "post.markdown");
    }

    #[test]
    fn test_url_path_and_segments() {
        assert_eq!(url_path("course/os"), "/course/os/");
        assert_eq!(slug_segments("course/os/lab1"), vec!["course", "os", "lab1"]);
    }
}
