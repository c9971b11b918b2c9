use chrono::NaiveDateTime;
use match_insights::{MatchRecord, Winner};

// ============================================================================
// Record Construction
// ============================================================================

/// Builds consistent records: the winner always follows the scores
pub struct RecordBuilder {
    record: MatchRecord,
}

impl RecordBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            record: MatchRecord {
                id,
                player_name: "alice".to_string(),
                player_score: 10,
                computer_score: 20,
                winner: Winner::Player,
                rounds: 3,
                played_at: "2024-01-10T12:00:00".parse().unwrap(),
            },
        }
    }

    pub fn player(mut self, name: &str) -> Self {
        self.record.player_name = name.to_string();
        self
    }

    pub fn scores(mut self, player_score: i32, computer_score: i32) -> Self {
        self.record.player_score = player_score;
        self.record.computer_score = computer_score;
        self.record.winner = Winner::from_scores(player_score, computer_score);
        self
    }

    pub fn rounds(mut self, rounds: u32) -> Self {
        self.record.rounds = rounds;
        self
    }

    pub fn at(mut self, timestamp: &str) -> Self {
        self.record.played_at = timestamp.parse::<NaiveDateTime>().unwrap();
        self
    }

    pub fn build(self) -> MatchRecord {
        self.record
    }
}

// ============================================================================
// Canned Histories
// ============================================================================

/// Two players, newest first like the results service returns them.
///
/// alice: W W W L T from 2024-01-08 to 2024-01-12, one 11-round game
/// bob:   L W
pub fn sample_history() -> Vec<MatchRecord> {
    vec![
        RecordBuilder::new(7)
            .player("bob")
            .scores(4, 9)
            .rounds(2)
            .at("2024-01-13T10:00:00")
            .build(),
        RecordBuilder::new(6)
            .player("alice")
            .scores(12, 12)
            .rounds(5)
            .at("2024-01-12T20:00:00")
            .build(),
        RecordBuilder::new(5)
            .player("alice")
            .scores(40, 15)
            .rounds(4)
            .at("2024-01-11T00:00:01")
            .build(),
        RecordBuilder::new(4)
            .player("bob")
            .scores(30, 10)
            .rounds(6)
            .at("2024-01-10T23:59:59")
            .build(),
        RecordBuilder::new(3)
            .player("alice")
            .scores(2, 25)
            .rounds(11)
            .at("2024-01-10T09:00:00")
            .build(),
        RecordBuilder::new(2)
            .player("alice")
            .scores(8, 18)
            .rounds(3)
            .at("2024-01-09T15:00:00")
            .build(),
        RecordBuilder::new(1)
            .player("alice")
            .scores(5, 30)
            .rounds(3)
            .at("2024-01-08T15:00:00")
            .build(),
    ]
}
