use std::cmp::Ordering;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::warn;

use super::{RecordRejection, RecordsError};

/// Outcome of a completed game as reported by the rules engine
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Winner {
    Player,
    Computer,
    Tie,
}

impl Winner {
    /// Lower score wins, equal scores tie.
    pub fn from_scores(player_score: i32, computer_score: i32) -> Self {
        match player_score.cmp(&computer_score) {
            Ordering::Less => Winner::Player,
            Ordering::Greater => Winner::Computer,
            Ordering::Equal => Winner::Tie,
        }
    }
}

/// One completed game, exactly as served by the results service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: i64,
    pub player_name: String,
    pub player_score: i32,
    pub computer_score: i32,
    pub winner: Winner,
    pub rounds: u32,
    /// Local wall-clock time the server stamped on the result
    #[serde(
        rename = "gameDate",
        alias = "playedAt",
        deserialize_with = "deserialize_played_at"
    )]
    pub played_at: NaiveDateTime,
}

impl MatchRecord {
    pub fn validate(&self) -> Result<(), RecordRejection> {
        if self.player_name.trim().is_empty() {
            return Err(RecordRejection::EmptyPlayerName);
        }
        if self.rounds == 0 {
            return Err(RecordRejection::NoRounds);
        }
        Ok(())
    }
}

/// Accepts naive ISO-8601 timestamps as local time, and converts
/// offset-carrying ones into local time.
fn deserialize_played_at<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Ok(naive);
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|instant| instant.with_timezone(&Local).naive_local())
        .map_err(|err| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {err}")))
}

/// Validated records decoded from one fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    pub records: Vec<MatchRecord>,
    /// Documents dropped by validation
    pub rejected: usize,
}

impl RecordBatch {
    pub fn from_records(records: Vec<MatchRecord>) -> Self {
        Self {
            records,
            rejected: 0,
        }
    }

    /// Decodes a results payload document by document. A bad document is
    /// logged and skipped; only a payload that is not an array fails.
    pub fn from_documents(payload: serde_json::Value) -> Result<Self, RecordsError> {
        let serde_json::Value::Array(documents) = payload else {
            return Err(RecordsError::Decode(
                "expected a JSON array of match records".to_string(),
            ));
        };

        let mut batch = RecordBatch::default();
        for (index, document) in documents.into_iter().enumerate() {
            match decode_document(document) {
                Ok(record) => batch.records.push(record),
                Err(reason) => {
                    warn!(index, %reason, "Rejected match record");
                    batch.rejected += 1;
                }
            }
        }

        Ok(batch)
    }
}

fn decode_document(document: serde_json::Value) -> Result<MatchRecord, RecordRejection> {
    let record: MatchRecord = serde_json::from_value(document)
        .map_err(|err| RecordRejection::Malformed(err.to_string()))?;
    record.validate()?;
    Ok(record)
}
