use std::cmp::Ordering;

use chrono::NaiveDateTime;
use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::warn;

use crate::records::MatchRecord;

/// Record fields a view can be ordered by
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
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    Id,
    PlayerName,
    PlayerScore,
    ComputerScore,
    Winner,
    Rounds,
    PlayedAt,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    #[strum(to_string = "ascending", serialize = "asc")]
    Ascending,
    #[strum(to_string = "descending", serialize = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// How a field's values compare
enum Comparator {
    Numeric(fn(&MatchRecord) -> i64),
    Textual(fn(&MatchRecord) -> &str),
    Temporal(fn(&MatchRecord) -> NaiveDateTime),
}

fn id(record: &MatchRecord) -> i64 {
    record.id
}

fn player_name(record: &MatchRecord) -> &str {
    &record.player_name
}

fn player_score(record: &MatchRecord) -> i64 {
    i64::from(record.player_score)
}

fn computer_score(record: &MatchRecord) -> i64 {
    i64::from(record.computer_score)
}

fn winner(record: &MatchRecord) -> &str {
    record.winner.as_ref()
}

fn rounds(record: &MatchRecord) -> i64 {
    i64::from(record.rounds)
}

fn played_at(record: &MatchRecord) -> NaiveDateTime {
    record.played_at
}

impl SortField {
    fn comparator(self) -> Comparator {
        match self {
            SortField::Id => Comparator::Numeric(id),
            SortField::PlayerName => Comparator::Textual(player_name),
            SortField::PlayerScore => Comparator::Numeric(player_score),
            SortField::ComputerScore => Comparator::Numeric(computer_score),
            SortField::Winner => Comparator::Textual(winner),
            SortField::Rounds => Comparator::Numeric(rounds),
            SortField::PlayedAt => Comparator::Temporal(played_at),
        }
    }

    /// Natural (ascending) order of two records on this field
    pub fn compare(self, a: &MatchRecord, b: &MatchRecord) -> Ordering {
        match self.comparator() {
            Comparator::Numeric(key) => key(a).cmp(&key(b)),
            Comparator::Textual(key) => collate(key(a), key(b)),
            Comparator::Temporal(key) => key(a).cmp(&key(b)),
        }
    }
}

thread_local! {
    static COLLATOR: Option<Collator> = root_collator();
}

/// Unicode root collation at tertiary strength: base letters first, then
/// accents, then case (lowercase ahead of uppercase).
fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    Collator::try_new(&Default::default(), options)
        .map_err(|err| warn!(%err, "Collation data unavailable, text sorts by code point"))
        .ok()
}

/// Human-facing text order
fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Newest first, the order the results service uses
    fn default() -> Self {
        Self {
            field: SortField::PlayedAt,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column-header behavior: the active field flips direction, any other
    /// field starts ascending.
    pub fn toggle(self, field: SortField) -> Self {
        if field == self.field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Ascending)
        }
    }

    pub fn compare(&self, a: &MatchRecord, b: &MatchRecord) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Returns `records` ordered by `spec`. Equal keys keep their input order.
pub fn sort_records(records: &[MatchRecord], spec: SortSpec) -> Vec<MatchRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| spec.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::RecordBuilder;
    use rstest::rstest;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn sample() -> Vec<MatchRecord> {
        vec![
            RecordBuilder::new(1)
                .player("bob")
                .scores(-3, 10)
                .rounds(4)
                .at("2024-01-10T09:00:00")
                .build(),
            RecordBuilder::new(2)
                .player("Alice")
                .scores(25, 10)
                .rounds(2)
                .at("2024-01-09T21:00:00")
                .build(),
            RecordBuilder::new(3)
                .player("alice")
                .scores(7, 7)
                .rounds(4)
                .at("2024-01-10T08:59:59")
                .build(),
            RecordBuilder::new(4)
                .player("Carol")
                .scores(100, 10)
                .rounds(9)
                .at("2023-12-31T23:00:00")
                .build(),
        ]
    }

    fn ids(records: &[MatchRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[rstest]
    #[case(SortField::PlayerScore, vec![1, 3, 2, 4])]
    #[case(SortField::ComputerScore, vec![3, 1, 2, 4])]
    #[case(SortField::Rounds, vec![2, 1, 3, 4])]
    #[case(SortField::PlayedAt, vec![4, 2, 3, 1])]
    #[case(SortField::PlayerName, vec![3, 2, 1, 4])]
    #[case(SortField::Winner, vec![2, 4, 1, 3])]
    #[case(SortField::Id, vec![1, 2, 3, 4])]
    fn ascending_uses_natural_order(#[case] field: SortField, #[case] expected: Vec<i64>) {
        let sorted = sort_records(&sample(), SortSpec::new(field, SortDirection::Ascending));
        assert_eq!(ids(&sorted), expected);
    }

    #[test]
    fn descending_reverses_but_keeps_ties_stable() {
        let sorted = sort_records(
            &sample(),
            SortSpec::new(SortField::Rounds, SortDirection::Descending),
        );
        // ids 1 and 3 both have 4 rounds and keep input order
        assert_eq!(ids(&sorted), vec![4, 1, 3, 2]);
    }

    #[test]
    fn negative_scores_sort_below_positive() {
        let sorted = sort_records(
            &sample(),
            SortSpec::new(SortField::PlayerScore, SortDirection::Ascending),
        );
        assert_eq!(sorted[0].player_score, -3);
    }

    #[test]
    fn dates_compare_as_instants_across_days() {
        let records = vec![
            RecordBuilder::new(1).at("2024-02-01T00:00:00").build(),
            RecordBuilder::new(2).at("2024-01-31T23:59:59").build(),
            RecordBuilder::new(3).at("2023-12-31T12:00:00").build(),
        ];
        let sorted = sort_records(&records, SortSpec::default());
        assert_eq!(ids(&sorted), vec![1, 2, 3]);
    }

    #[test]
    fn text_order_ignores_case_before_breaking_ties() {
        assert_eq!(collate("alice", "Bob"), Ordering::Less);
        assert_eq!(collate("Zed", "adam"), Ordering::Greater);
        assert_eq!(collate("alice", "Alice"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn accented_letters_sort_with_their_base_letter() {
        assert_eq!(collate("Émile", "Fred"), Ordering::Less);
        assert_eq!(collate("eve", "Ève"), Ordering::Less);
        assert_eq!(collate("Zoë", "zoe"), Ordering::Greater);
    }

    #[test]
    fn player_names_sort_alphabetically_across_accents() {
        let records: Vec<MatchRecord> = ["Zoe", "Émile", "Fred", "émile"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| RecordBuilder::new(i as i64).player(name).build())
            .collect();

        let sorted = sort_records(
            &records,
            SortSpec::new(SortField::PlayerName, SortDirection::Ascending),
        );
        let names: Vec<&str> = sorted.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["émile", "Émile", "Fred", "Zoe"]);
    }

    #[test]
    fn sorting_is_idempotent_and_keeps_every_record() {
        let records = sample();
        for field in SortField::iter() {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let spec = SortSpec::new(field, direction);
                let once = sort_records(&records, spec);
                assert_eq!(once.len(), records.len());
                assert_eq!(sort_records(&once, spec), once, "{field} {direction}");

                let mut seen = ids(&once);
                seen.sort();
                assert_eq!(seen, vec![1, 2, 3, 4]);
            }
        }
    }

    #[test]
    fn empty_and_single_inputs() {
        assert!(sort_records(&[], SortSpec::default()).is_empty());
        let one = vec![RecordBuilder::new(9).build()];
        assert_eq!(sort_records(&one, SortSpec::default()), one);
    }

    #[test]
    fn toggling_active_field_flips_direction() {
        let spec = SortSpec::new(SortField::Rounds, SortDirection::Ascending);

        let flipped = spec.toggle(SortField::Rounds);
        assert_eq!(flipped, SortSpec::new(SortField::Rounds, SortDirection::Descending));
        assert_eq!(flipped.toggle(SortField::Rounds), spec);
    }

    #[rstest]
    #[case(SortDirection::Ascending)]
    #[case(SortDirection::Descending)]
    fn toggling_new_field_resets_to_ascending(#[case] direction: SortDirection) {
        let spec = SortSpec::new(SortField::PlayedAt, direction);
        assert_eq!(
            spec.toggle(SortField::PlayerName),
            SortSpec::new(SortField::PlayerName, SortDirection::Ascending)
        );
    }

    #[test]
    fn default_spec_is_newest_first() {
        assert_eq!(
            SortSpec::default(),
            SortSpec::new(SortField::PlayedAt, SortDirection::Descending)
        );
    }

    #[rstest]
    #[case("playerScore", SortField::PlayerScore)]
    #[case("playedAt", SortField::PlayedAt)]
    #[case("winner", SortField::Winner)]
    fn parses_field_names(#[case] raw: &str, #[case] expected: SortField) {
        assert_eq!(SortField::from_str(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("asc", SortDirection::Ascending)]
    #[case("DESC", SortDirection::Descending)]
    #[case("descending", SortDirection::Descending)]
    fn parses_direction_aliases(#[case] raw: &str, #[case] expected: SortDirection) {
        assert_eq!(SortDirection::from_str(raw).unwrap(), expected);
    }
}
