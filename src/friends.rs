use std::collections::BTreeMap;

use serde::Serialize;

use crate::content::front_matter::FrontMatterValue;
use crate::error::Result;

const UNKNOWN_LINK: &str = "#";

/// An entry of the links page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Friend {
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub link: String,
    pub hide: bool,
}

fn non_empty_str<'a>(entry: &'a BTreeMap<String, FrontMatterValue>, key: &str) -> Option<&'a str> {
    entry.get(key)
        .and_then(|value| value.as_str())
        .filter(|s| !s.is_empty())
}

impl Friend {
    /// `position` is 1-based and only names entries without a name.
    fn from_entry(position: usize, entry: &BTreeMap<String, FrontMatterValue>) -> Friend {
        let name = non_empty_str(entry, "name")
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("unnamed-friend-{}", position));
        let avatar = non_empty_str(entry, "avatar")
            .or_else(|| non_empty_str(entry, "avatar_url"))
            .unwrap_or(UNKNOWN_LINK);
        let hide = matches!(entry.get("hide"), Some(FrontMatterValue::Bool(true)));

        Friend {
            name,
            avatar: avatar.to_string(),
            bio: non_empty_str(entry, "bio").unwrap_or_default().to_string(),
            link: non_empty_str(entry, "link").unwrap_or(UNKNOWN_LINK).to_string(),
            hide,
        }
    }
}

/// Parses the friends list. Anything other than a YAML sequence at the top
/// level gives an empty list.
pub fn load_friends_from_yaml(yaml: &str) -> Result<Vec<Friend>> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;

    let FrontMatterValue::Sequence(items) = FrontMatterValue::from(value) else {
        return Ok(vec![]);
    };

    let empty = BTreeMap::new();
    let friends = items.iter().enumerate()
        .map(|(idx, item)| match item {
            FrontMatterValue::Mapping(entry) => Friend::from_entry(idx + 1, entry),
            _ => Friend::from_entry(idx + 1, &empty),
        })
        .collect();

    Ok(friends)
}
