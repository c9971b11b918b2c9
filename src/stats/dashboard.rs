use serde::Serialize;
use tracing::debug;

use super::{
    aggregate, evaluate_badges, sort_records, BadgeContext, BadgeStatus, SortDirection, SortField,
    SortSpec, StatsSummary,
};
use crate::records::MatchRecord;

/// Lifetime profile of one player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDashboard {
    pub player: String,
    pub stats: StatsSummary,
    pub badges: Vec<BadgeStatus>,
}

/// The player's own records, oldest first
pub fn player_records(records: &[MatchRecord], player: &str) -> Vec<MatchRecord> {
    let owned: Vec<MatchRecord> = records
        .iter()
        .filter(|record| record.player_name == player)
        .cloned()
        .collect();
    sort_records(
        &owned,
        SortSpec::new(SortField::PlayedAt, SortDirection::Ascending),
    )
}

/// Scopes the full snapshot to `player`, then aggregates and evaluates badges.
/// Expects the unfiltered snapshot; view filters never reach badges.
pub fn player_dashboard(records: &[MatchRecord], player: &str) -> PlayerDashboard {
    let history = player_records(records, player);
    let stats = aggregate(&history);
    let badges = evaluate_badges(&BadgeContext::new(&stats, &history));

    debug!(
        player,
        games = stats.games,
        earned = badges.iter().filter(|badge| badge.earned).count(),
        "Built player dashboard"
    );

    PlayerDashboard {
        player: player.to_string(),
        stats,
        badges,
    }
}
