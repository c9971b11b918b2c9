use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::{MatchRecord, Winner};

/// Presentation-side narrowing of a record set. All set predicates must
/// pass; an empty criteria set keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring of the player name
    pub search_text: String,
    pub winner: Option<Winner>,
    /// Inclusive bounds: `from_date` 00:00:00 through `to_date` 23:59:59
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty()
            && self.winner.is_none()
            && self.from_date.is_none()
            && self.to_date.is_none()
    }

    pub fn matches(&self, record: &MatchRecord) -> bool {
        self.matches_text(record) && self.matches_winner(record) && self.matches_dates(record)
    }

    fn matches_text(&self, record: &MatchRecord) -> bool {
        self.search_text.is_empty()
            || record
                .player_name
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }

    fn matches_winner(&self, record: &MatchRecord) -> bool {
        self.winner.map_or(true, |winner| winner == record.winner)
    }

    fn matches_dates(&self, record: &MatchRecord) -> bool {
        let after_start = self
            .from_date
            .map_or(true, |from| record.played_at.date() >= from);
        // Anything past the last whole second of `to_date` is out of range.
        let before_end = self
            .to_date
            .and_then(|to| to.and_hms_opt(23, 59, 59))
            .map_or(true, |end| record.played_at <= end);
        after_start && before_end
    }
}

/// Keeps the records matching `criteria`, in their original order
pub fn filter_records(records: &[MatchRecord], criteria: &FilterCriteria) -> Vec<MatchRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}
