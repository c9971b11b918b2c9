use serde::{Deserialize, Serialize};

use crate::records::{MatchRecord, Winner};

/// Counts, rates and averages over a record set. Every rate and average
/// is 0 for an empty set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub games: u32,
    pub player_wins: u32,
    pub computer_wins: u32,
    pub ties: u32,
    pub win_rate: f64,
    pub avg_rounds: f64,
    pub avg_player_score: f64,
    pub avg_computer_score: f64,
}

#[derive(Default)]
struct Totals {
    games: u32,
    player_wins: u32,
    computer_wins: u32,
    ties: u32,
    rounds: i64,
    player_score: i64,
    computer_score: i64,
}

impl Totals {
    fn add(mut self, record: &MatchRecord) -> Self {
        self.games += 1;
        match record.winner {
            Winner::Player => self.player_wins += 1,
            Winner::Computer => self.computer_wins += 1,
            Winner::Tie => self.ties += 1,
        }
        self.rounds += i64::from(record.rounds);
        self.player_score += i64::from(record.player_score);
        self.computer_score += i64::from(record.computer_score);
        self
    }
}

fn ratio(numerator: i64, games: u32) -> f64 {
    if games == 0 {
        0.0
    } else {
        numerator as f64 / f64::from(games)
    }
}

/// Reduces `records` to a [`StatsSummary`] in a single pass
pub fn aggregate(records: &[MatchRecord]) -> StatsSummary {
    let totals = records.iter().fold(Totals::default(), Totals::add);

    StatsSummary {
        games: totals.games,
        player_wins: totals.player_wins,
        computer_wins: totals.computer_wins,
        ties: totals.ties,
        win_rate: ratio(i64::from(totals.player_wins), totals.games),
        avg_rounds: ratio(totals.rounds, totals.games),
        avg_player_score: ratio(totals.player_score, totals.games),
        avg_computer_score: ratio(totals.computer_score, totals.games),
    }
}
