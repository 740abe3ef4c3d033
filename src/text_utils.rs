use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub const MORE_TAG: &str = "<!-- more -->";
pub const EXCERPT_CHAR_COUNT: usize = 200;
pub const WORDS_PER_MINUTE: usize = 200;

// Offsets are honoured, values without one are taken as UTC
const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M %z",
];

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

pub fn parse_date_time(buf: &str) -> Result<DateTime<Utc>, String> {
    let buf = buf.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Ok(date_time.with_timezone(&Utc));
    }

    if let Ok(date_time) = DateTime::parse_from_rfc2822(buf) {
        return Ok(date_time.with_timezone(&Utc));
    }

    for fmt in OFFSET_DATE_TIME_FORMATS {
        if let Ok(date_time) = DateTime::parse_from_str(buf, fmt) {
            return Ok(date_time.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(buf, fmt) {
            return Ok(date_time.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(buf, fmt) {
            return Ok(NaiveDateTime::new(date, NaiveTime::default()).and_utc());
        }
    }

    Err(format!("Unable to parse date time {}", buf))
}

/// Returns at most `count` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Everything before the first `<!-- more -->`, or the first 200 characters
/// of the body when the marker is missing.
pub fn excerpt(body: &str) -> String {
    match body.split_once(MORE_TAG) {
        Some((head, _)) => head.to_string(),
        None => truncate_chars(body, EXCERPT_CHAR_COUNT).to_string(),
    }
}

pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Minutes needed to read `body`, rounded up.
pub fn reading_time(body: &str) -> u64 {
    word_count(body).div_ceil(WORDS_PER_MINUTE) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(buf: &str) -> i64 {
        parse_date_time(buf).unwrap().timestamp_millis()
    }

    #[test]
    fn test_parse_date_time() {
        assert_eq!(millis("2024-01-02"), 1704153600000);
        assert_eq!(millis("2024/01/02"), 1704153600000);
        assert_eq!(millis("2024-01-02T00:00:00Z"), 1704153600000);
        assert_eq!(millis("2024-01-02T08:00:00+08:00"), 1704153600000);
        assert_eq!(millis("2024-01-02 00:00:00"), 1704153600000);
        assert_eq!(millis("2024-01-02 00:00"), 1704153600000);
        assert_eq!(millis("2017-09-10 10:42:32.123"), 1505040152123);
        assert_eq!(millis("2024-01-02 08:00:00 +0800"), 1704153600000);
        assert_eq!(millis("Tue, 02 Jan 2024 00:00:00 +0000"), 1704153600000);
    }

    #[test]
    fn test_parse_invalid_date_time() {
        assert!(parse_date_time("yesterday").is_err());
        assert!(parse_date_time("2024-13-45").is_err());
        assert!(parse_date_time("").is_err());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("高亮文字", 2), "高亮");
        assert_eq!(truncate_chars("", 2), "");
    }

    #[test]
    fn test_excerpt_with_more_tag() {
        let body = "Intro text\n\n<!-- more -->\n\nRest of the post";
        assert_eq!(excerpt(body), "Intro text\n\n");
    }

    #[test]
    fn test_excerpt_without_more_tag() {
        let body = "a".repeat(250);
        assert_eq!(excerpt(&body), "a".repeat(200));
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_reading_time() {
        let body = vec!["word"; 400].join(" ");
        assert_eq!(word_count(&body), 400);
        assert_eq!(reading_time(&body), 2);

        let body = vec!["word"; 401].join("\n");
        assert_eq!(reading_time(&body), 3);

        assert_eq!(reading_time("one"), 1);
        assert_eq!(reading_time("  \n "), 0);
    }
}
