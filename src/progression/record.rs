//! Persisted progression blob

use serde::{Deserialize, Deserializer, Serialize};

use super::level::level_from_xp;

/// Lifetime progression, stored as one JSON object.
///
/// Missing fields fall back to defaults and unknown fields are ignored, so
/// older and newer blobs both load. `level` is written out for readers that
/// want it, but any stored value is ignored and recomputed from
/// `experience` on every load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressionRecord {
    /// Cumulative experience, never decreases
    #[serde(alias = "xp")]
    pub experience: u64,
    /// Derived from `experience`
    #[serde(skip_deserializing)]
    pub level: u32,
    /// Spendable coin balance
    pub coins: u64,
    /// ISO-8601 time of the last save
    #[serde(
        alias = "lastPlayed",
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_played_timestamp: Option<String>,
}

/// Keep string timestamps, drop anything else
fn lenient_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl Default for ProgressionRecord {
    fn default() -> Self {
        Self {
            experience: 0,
            level: 1,
            coins: 0,
            last_played_timestamp: None,
        }
    }
}

impl ProgressionRecord {
    /// Recompute `level` from `experience`, returning the new level
    pub fn sync_level(&mut self) -> u32 {
        self.level = level_from_xp(self.experience);
        self.level
    }

    /// Parse a stored blob and heal its level.
    ///
    /// A bad `level` or timestamp is tolerated. Otherwise all-or-nothing:
    /// a blob that fails to parse yields an error and no fields are taken
    /// from it.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut record: Self = serde_json::from_str(json)?;
        record.sync_level();
        Ok(record)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let record = ProgressionRecord::from_json(r#"{"coins": 42}"#).unwrap();
        assert_eq!(record.coins, 42);
        assert_eq!(record.experience, 0);
        assert_eq!(record.level, 1);
        assert_eq!(record.last_played_timestamp, None);
    }

    #[test]
    fn test_stale_level_is_recomputed() {
        let record =
            ProgressionRecord::from_json(r#"{"experience": 6000, "level": 99, "coins": 0}"#)
                .unwrap();
        assert_eq!(record.level, 4);
    }

    #[test]
    fn test_unknown_and_legacy_fields() {
        let json = r#"{"xp": 3000, "level": 1, "coins": 7, "lastPlayed": "2024-01-01T00:00:00Z", "theme": "dark"}"#;
        let record = ProgressionRecord::from_json(json).unwrap();
        assert_eq!(record.experience, 3000);
        assert_eq!(record.level, 3);
        assert_eq!(record.coins, 7);
        assert_eq!(
            record.last_played_timestamp.as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let record = ProgressionRecord {
            experience: 1000,
            level: 2,
            coins: 5,
            last_played_timestamp: Some("t".into()),
        };
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(value["experience"], 1000);
        assert_eq!(value["level"], 2);
        assert_eq!(value["coins"], 5);
        assert_eq!(value["lastPlayedTimestamp"], "t");
    }

    #[test]
    fn test_malformed_level_keeps_progress() {
        for level in ["null", "-1", "2.5", "\"10\"", "{}"] {
            let json = format!(r#"{{"experience": 45000, "level": {level}, "coins": 3}}"#);
            let record = ProgressionRecord::from_json(&json).unwrap();
            assert_eq!(record.experience, 45000, "level = {level}");
            assert_eq!(record.level, 10, "level = {level}");
            assert_eq!(record.coins, 3, "level = {level}");
        }
    }

    #[test]
    fn test_malformed_timestamp_is_dropped() {
        for stamp in ["null", "17", "[1, 2]"] {
            let json = format!(r#"{{"experience": 1000, "lastPlayedTimestamp": {stamp}}}"#);
            let record = ProgressionRecord::from_json(&json).unwrap();
            assert_eq!(record.experience, 1000, "stamp = {stamp}");
            assert_eq!(record.last_played_timestamp, None, "stamp = {stamp}");
        }
    }

    #[test]
    fn test_corrupt_blob_is_rejected_whole() {
        assert!(ProgressionRecord::from_json("{\"experience\": 10, ").is_err());
        assert!(ProgressionRecord::from_json(r#"{"experience": "lots"}"#).is_err());
        assert!(ProgressionRecord::from_json(r#"{"coins": -3}"#).is_err());
    }
}
