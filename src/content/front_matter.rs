use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use spdlog::debug;

use crate::error::{ContentError, Result};
use crate::text_utils::parse_date_time;

pub type FrontMatter = BTreeMap<String, FrontMatterValue>;

const YAML_DELIMITER: &str = "---";
const TOML_DELIMITER: &str = "+++";

/// A loosely typed front matter value, as authors write them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FrontMatterValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    #[serde(serialize_with = "serialize_date")]
    Date(DateTime<Utc>),
    Sequence(Vec<FrontMatterValue>),
    Mapping(BTreeMap<String, FrontMatterValue>),
}

fn serialize_date<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl FrontMatterValue {
    /// `false`, `0`, `NaN`, `""` and null are falsy. Everything else, including
    /// empty sequences, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FrontMatterValue::Null => false,
            FrontMatterValue::Bool(b) => *b,
            FrontMatterValue::Integer(i) => *i != 0,
            FrontMatterValue::Float(f) => *f != 0.0 && !f.is_nan(),
            FrontMatterValue::String(s) => !s.is_empty(),
            FrontMatterValue::Date(_) | FrontMatterValue::Sequence(_) | FrontMatterValue::Mapping(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontMatterValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for FrontMatterValue {
    fn from(value: &str) -> Self {
        FrontMatterValue::String(value.to_string())
    }
}

impl From<bool> for FrontMatterValue {
    fn from(value: bool) -> Self {
        FrontMatterValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FrontMatterValue {
    fn from(value: DateTime<Utc>) -> Self {
        FrontMatterValue::Date(value)
    }
}

impl<T: Into<FrontMatterValue>> From<Vec<T>> for FrontMatterValue {
    fn from(value: Vec<T>) -> Self {
        FrontMatterValue::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_yaml::Value> for FrontMatterValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => FrontMatterValue::Null,
            Value::Bool(b) => FrontMatterValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FrontMatterValue::Integer(i),
                None => FrontMatterValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FrontMatterValue::String(s),
            Value::Sequence(seq) => FrontMatterValue::Sequence(seq.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => FrontMatterValue::Mapping(mapping_from_yaml(map)),
            Value::Tagged(tagged) => {
                let serde_yaml::value::TaggedValue { value, .. } = *tagged;
                Self::from(value)
            }
        }
    }
}

impl From<toml::Value> for FrontMatterValue {
    fn from(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::String(s) => FrontMatterValue::String(s),
            Value::Integer(i) => FrontMatterValue::Integer(i),
            Value::Float(f) => FrontMatterValue::Float(f),
            Value::Boolean(b) => FrontMatterValue::Bool(b),
            // A local time without a date has no instant, keep it as text
            Value::Datetime(dt) => {
                let buf = dt.to_string();
                match parse_date_time(&buf) {
                    Ok(date) => FrontMatterValue::Date(date),
                    Err(_) => FrontMatterValue::String(buf),
                }
            }
            Value::Array(items) => FrontMatterValue::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Table(table) => FrontMatterValue::Mapping(
                table.into_iter().map(|(k, v)| (k, Self::from(v))).collect()
            ),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn mapping_from_yaml(map: serde_yaml::Mapping) -> BTreeMap<String, FrontMatterValue> {
    map.into_iter()
        .filter_map(|(k, v)| yaml_key(k).map(|k| (k, FrontMatterValue::from(v))))
        .collect()
}

/// Finds a leading block opened and closed by `delimiter` lines.
/// Returns the block text and the body following the closing line.
fn find_block<'a>(content: &'a str, delimiter: &str) -> Result<Option<(&'a str, &'a str)>> {
    let (first_line, rest) = match content.split_once('\n') {
        Some(x) => x,
        None => return Ok(None),
    };

    if first_line.trim_end() != delimiter {
        return Ok(None);
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            return Ok(Some((&rest[..offset], &rest[offset + line.len()..])));
        }
        offset += line.len();
    }

    Err(ContentError::FrontMatter(format!("Closing {} delimiter is missing", delimiter)))
}

fn parse_yaml_block(block: &str) -> Result<FrontMatter> {
    if block.trim().is_empty() {
        return Ok(FrontMatter::new());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(block)
        .map_err(|e| ContentError::FrontMatter(format!("Error parsing YAML front matter: {}", e)))?;

    match value {
        serde_yaml::Value::Mapping(map) => Ok(mapping_from_yaml(map)),
        _ => {
            debug!("YAML front matter is not a mapping, ignoring it");
            Ok(FrontMatter::new())
        }
    }
}

fn parse_toml_block(block: &str) -> Result<FrontMatter> {
    let table: toml::Table = toml::from_str(block)
        .map_err(|e| ContentError::FrontMatter(format!("Error parsing TOML front matter: {}", e)))?;

    Ok(table.into_iter().map(|(k, v)| (k, FrontMatterValue::from(v))).collect())
}

/// Splits a leading `---` (YAML) or `+++` (TOML) block from the body text.
///
/// A document without such block has an empty front matter and is all body.
pub fn split_front_matter(content: &str) -> Result<(FrontMatter, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    if let Some((block, body)) = find_block(content, YAML_DELIMITER)? {
        return Ok((parse_yaml_block(block)?, body));
    }

    if let Some((block, body)) = find_block(content, TOML_DELIMITER)? {
        return Ok((parse_toml_block(block)?, body));
    }

    Ok((FrontMatter::new(), content))
}
