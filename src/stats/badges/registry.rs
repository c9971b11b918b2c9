use super::{BadgeContext, BadgeDefinition, BadgeOutcome};
use crate::records::{MatchRecord, Winner};

const VETERAN_GAMES: u32 = 10;
const HOT_STREAK_WINS: u32 = 3;
const SHARPSHOOTER_MIN_GAMES: u32 = 5;
const SHARPSHOOTER_WIN_RATE: f64 = 0.6;
const MARATHON_ROUNDS: u32 = 10;

/// Every badge, in display order
pub static BADGES: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: "first_game",
        name: "First Steps",
        description: "Play your first game",
        icon: "footprints",
        max_progress: Some(1),
        evaluate: first_game,
    },
    BadgeDefinition {
        id: "first_win",
        name: "First Victory",
        description: "Win a game against the computer",
        icon: "trophy",
        max_progress: Some(1),
        evaluate: first_win,
    },
    BadgeDefinition {
        id: "veteran",
        name: "Veteran",
        description: "Play 10 games",
        icon: "medal",
        max_progress: Some(VETERAN_GAMES),
        evaluate: veteran,
    },
    BadgeDefinition {
        id: "hot_streak",
        name: "Hot Streak",
        description: "Win 3 games in a row",
        icon: "flame",
        max_progress: Some(HOT_STREAK_WINS),
        evaluate: hot_streak,
    },
    BadgeDefinition {
        id: "sharpshooter",
        name: "Sharpshooter",
        description: "Keep a win rate of 60% or higher over at least 5 games",
        icon: "target",
        max_progress: None,
        evaluate: sharpshooter,
    },
    BadgeDefinition {
        id: "perfect_score",
        name: "Perfect Score",
        description: "Finish a game with the lowest score possible",
        icon: "star",
        max_progress: None,
        evaluate: perfect_score,
    },
    BadgeDefinition {
        id: "marathon",
        name: "Marathon",
        description: "Finish a game that lasted 10 or more rounds",
        icon: "hourglass",
        max_progress: None,
        evaluate: marathon,
    },
    BadgeDefinition {
        id: "peacemaker",
        name: "Peacemaker",
        description: "End a game in a tie",
        icon: "handshake",
        max_progress: None,
        evaluate: peacemaker,
    },
];

fn first_game(ctx: &BadgeContext<'_>) -> BadgeOutcome {
    BadgeOutcome::with_progress(ctx.stats.games >= 1, f64::from(ctx.stats.games))
}

fn first_win(ctx: &BadgeContext<'_>) -> BadgeOutcome {
    BadgeOutcome::with_progress(ctx.stats.player_wins >= 1, f64::from(ctx.stats.player_wins))
}

fn veteran(ctx: &BadgeContext<'_>) -> BadgeOutcome {
    BadgeOutcome::with_progress(
        ctx.stats.games >= VETERAN_GAMES,
        f64::from(ctx.stats.games),
    )
}

fn hot_streak(ctx: &BadgeContext<'_>) -> BadgeOutcome {
    let longest = longest_win_streak(ctx.records);
    BadgeOutcome::with_progress(longest >= HOT_STREAK_WINS, f64::from(longest))
}

fn sharpshooter(ctx: &BadgeContext<'_>) -> BadgeOutcome {
    BadgeOutcome::earned(
        ctx.stats.games >= SHARPSHOOTER_MIN_GAMES && ctx.stats.win_rate >= SHARPSHOOTER_WIN_RATE,
    )
}

// Earned by any non-negative score. This does not check for the lowest
// possible score the description promises.
fn perfect_score(ctx: &BadgeContext<'_>) -> BadgeOutcome {
    BadgeOutcome::earned(ctx.records.iter().any(|record| record.player_score >= 0))
}

fn marathon(ctx: &BadgeContext<'_>) -> BadgeOutcome {
    BadgeOutcome::earned(
        ctx.records
            .iter()
            .any(|record| record.rounds >= MARATHON_ROUNDS),
    )
}

fn peacemaker(ctx: &BadgeContext<'_>) -> BadgeOutcome {
    BadgeOutcome::earned(ctx.stats.ties >= 1)
}

/// Longest run of consecutive player wins in sequence order
fn longest_win_streak(records: &[MatchRecord]) -> u32 {
    let (_, longest) = records.iter().fold((0u32, 0u32), |(current, longest), record| {
        if record.winner == Winner::Player {
            (current + 1, longest.max(current + 1))
        } else {
            (0, longest)
        }
    });
    longest
}
