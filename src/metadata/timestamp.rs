use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use spdlog::debug;

use crate::text_utils::parse_date_time;

/// Milliseconds since the epoch, or `Invalid` when the source date could not
/// be parsed. Invalid values are kept, not replaced with a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Millis(i64),
    Invalid,
}

impl Timestamp {
    pub fn from_date_time(date_time: &DateTime<Utc>) -> Timestamp {
        Timestamp::Millis(date_time.timestamp_millis())
    }

    pub fn parse(buf: &str) -> Timestamp {
        match parse_date_time(buf) {
            Ok(date_time) => Self::from_date_time(&date_time),
            Err(e) => {
                debug!("{}", e);
                Timestamp::Invalid
            }
        }
    }

    pub fn millis(&self) -> Option<i64> {
        match self {
            Timestamp::Millis(ms) => Some(*ms),
            Timestamp::Invalid => None,
        }
    }

    pub fn to_date_time(&self) -> Option<DateTime<Utc>> {
        self.millis().and_then(DateTime::from_timestamp_millis)
    }

    /// Ordering for newest-first lists. Invalid timestamps go last.
    pub fn newest_first(a: &Timestamp, b: &Timestamp) -> Ordering {
        match (a.millis(), b.millis()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

// Invalid is written as null, the same as NaN in JSON
impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Timestamp::Millis(ms) => serializer.serialize_i64(*ms),
            Timestamp::Invalid => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Timestamp::parse("2024-01-02"), Timestamp::Millis(1704153600000));
        assert_eq!(Timestamp::parse("not a date"), Timestamp::Invalid);
        assert_eq!(Timestamp::Invalid.millis(), None);
        assert_eq!(Timestamp::Invalid.to_date_time(), None);
    }

    #[test]
    fn test_newest_first() {
        let mut list = vec![
            Timestamp::Millis(1),
            Timestamp::Invalid,
            Timestamp::Millis(3),
            Timestamp::Millis(2),
        ];
        list.sort_by(Timestamp::newest_first);
        assert_eq!(list, vec![
            Timestamp::Millis(3),
            Timestamp::Millis(2),
            Timestamp::Millis(1),
            Timestamp::Invalid,
        ]);
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&Timestamp::Millis(42)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&Timestamp::Invalid).unwrap(), "null");
    }
}
