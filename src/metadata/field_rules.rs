//! Front matter aliases, as data.
//!
//! Each logical field lists the keys it accepts in precedence order and how a
//! raw value turns into the field's type. A key counts only when its value is
//! truthy and coerces; anything else is treated as if the key were missing.

use spdlog::debug;

use crate::content::front_matter::{FrontMatter, FrontMatterValue};
use crate::metadata::timestamp::Timestamp;

pub struct FieldRule<T: 'static> {
    /// Name of the metadata field, used in logs
    pub field: &'static str,
    pub aliases: &'static [&'static str],
    pub coerce: fn(&FrontMatterValue) -> Option<T>,
}

impl<T> FieldRule<T> {
    /// First alias with a usable value.
    pub fn resolve(&self, front_matter: &FrontMatter) -> Option<T> {
        self.candidates(front_matter).next()
    }

    /// Every usable value, in alias order.
    pub fn collect(&self, front_matter: &FrontMatter) -> Vec<T> {
        self.candidates(front_matter).collect()
    }

    fn candidates<'a>(&'a self, front_matter: &'a FrontMatter) -> impl Iterator<Item = T> + 'a {
        self.aliases.iter()
            .filter_map(move |alias| front_matter.get(*alias).map(|value| (*alias, value)))
            .filter(|(_, value)| value.is_truthy())
            .filter_map(move |(alias, value)| {
                let coerced = (self.coerce)(value);
                if coerced.is_none() {
                    debug!("Ignoring front matter key {}: not usable as {}", alias, self.field);
                }
                coerced
            })
    }
}

fn coerce_string(value: &FrontMatterValue) -> Option<String> {
    value.as_str().map(|s| s.to_string())
}

fn coerce_flag(value: &FrontMatterValue) -> Option<bool> {
    Some(value.is_truthy())
}

fn coerce_https_url(value: &FrontMatterValue) -> Option<String> {
    value.as_str()
        .filter(|s| s.starts_with("https://"))
        .map(|s| s.to_string())
}

fn coerce_string_list(value: &FrontMatterValue) -> Option<Vec<String>> {
    match value {
        FrontMatterValue::String(s) => Some(vec![s.clone()]),
        FrontMatterValue::Sequence(items) => Some(
            items.iter().filter_map(|item| item.as_str()).map(|s| s.to_string()).collect()
        ),
        _ => None,
    }
}

fn coerce_timestamp(value: &FrontMatterValue) -> Option<Timestamp> {
    match value {
        FrontMatterValue::String(s) => Some(Timestamp::parse(s)),
        FrontMatterValue::Date(date) => Some(Timestamp::from_date_time(date)),
        _ => None,
    }
}

pub const TITLE: FieldRule<String> = FieldRule {
    field: "title",
    aliases: &["title"],
    coerce: coerce_string,
};

pub const PUBLISHED_TITLE: FieldRule<String> = FieldRule {
    field: "publishedTitle",
    aliases: &["publishedTitle", "publishTitle", "published-title", "publish-title"],
    coerce: coerce_string,
};

pub const PUBLISHED: FieldRule<bool> = FieldRule {
    field: "published",
    aliases: &["publish", "published"],
    coerce: coerce_flag,
};

pub const INDEXED: FieldRule<bool> = FieldRule {
    field: "indexed",
    aliases: &["index", "indexed"],
    coerce: coerce_flag,
};

pub const TAGS: FieldRule<Vec<String>> = FieldRule {
    field: "tags",
    aliases: &["tag", "tags"],
    coerce: coerce_string_list,
};

pub const CREATE_TIME: FieldRule<Timestamp> = FieldRule {
    field: "createTime",
    aliases: &[
        "date",
        "createTime", "create-time",
        "createdTime", "created-time",
        "createDate", "create-date",
        "createdDate", "created-date",
    ],
    coerce: coerce_timestamp,
};

pub const UPDATE_TIME: FieldRule<Timestamp> = FieldRule {
    field: "updateTime",
    aliases: &[
        "updateTime", "update-time",
        "updateDate", "update-date",
        "updatedTime", "updated-time",
        "updatedDate", "updated-date",
    ],
    coerce: coerce_timestamp,
};

pub const PUBLISH_TIME: FieldRule<Timestamp> = FieldRule {
    field: "publishTime",
    aliases: &[
        "publishTime", "publish-time",
        "publishDate", "publish-date",
        "publishedTime", "published-time",
        "publishedDate", "published-date",
    ],
    coerce: coerce_timestamp,
};

pub const COVER: FieldRule<String> = FieldRule {
    field: "cover",
    aliases: &["cover"],
    coerce: coerce_https_url,
};
