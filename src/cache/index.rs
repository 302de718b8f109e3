//! On-disk record types for the art cache

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Parses an ISO-8601 timestamp
///
/// Accepts RFC 3339 (with offset) and offset-less `YYYY-MM-DDTHH:MM:SS[.ffffff]`,
/// which is read as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    let utc = match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => naive.and_utc(),
    };
    Some(utc)
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw))),
    }
}

/// Metadata stored next to each artwork as `<id>.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtRecord {
    /// Identifier shared with the art file name
    pub id: String,
    /// When the art was saved or imported
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created: DateTime<Utc>,
    /// Prompt used to generate the art, or the description of an imported piece
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub style: String,
}

/// One slot of the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created: DateTime<Utc>,
}

/// Contents of `metadata.json`
///
/// `items` is kept in insertion order, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheIndex {
    #[serde(default)]
    pub items: Vec<IndexEntry>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl CacheIndex {
    /// Whether an entry with `id` is present
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Removes and returns the oldest entries until at most `capacity` remain
    pub fn evict_over(&mut self, capacity: usize) -> Vec<IndexEntry> {
        let overflow = self.items.len().saturating_sub(capacity);
        self.items.drain(..overflow).collect()
    }
}
