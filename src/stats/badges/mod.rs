//! Achievement badges evaluated over a player's lifetime record.
//!
//! Each badge is a plain data entry in [`BADGES`] carrying its own predicate.
//! The engine walks the registry in order and never looks at badge ids.

mod registry;

use std::fmt;

use serde::Serialize;

use super::StatsSummary;
use crate::records::MatchRecord;

pub use registry::BADGES;

/// Everything a predicate may look at
#[derive(Debug, Clone, Copy)]
pub struct BadgeContext<'a> {
    pub stats: &'a StatsSummary,
    /// Player-scoped records, oldest first
    pub records: &'a [MatchRecord],
}

impl<'a> BadgeContext<'a> {
    pub fn new(stats: &'a StatsSummary, records: &'a [MatchRecord]) -> Self {
        Self { stats, records }
    }
}

/// Raw predicate output. Only `earned` is trusted as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BadgeOutcome {
    pub earned: bool,
    pub progress: Option<f64>,
}

impl BadgeOutcome {
    pub fn earned(earned: bool) -> Self {
        Self {
            earned,
            progress: None,
        }
    }

    pub fn with_progress(earned: bool, progress: f64) -> Self {
        Self {
            earned,
            progress: Some(progress),
        }
    }
}

pub type BadgePredicate = fn(&BadgeContext<'_>) -> BadgeOutcome;

#[derive(Clone, Copy)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// `None` marks a binary badge
    pub max_progress: Option<u32>,
    pub evaluate: BadgePredicate,
}

impl fmt::Debug for BadgeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BadgeDefinition")
            .field("id", &self.id)
            .field("max_progress", &self.max_progress)
            .finish_non_exhaustive()
    }
}

/// Display metadata of a badge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub max_progress: Option<u32>,
}

impl BadgeDefinition {
    pub fn info(&self) -> BadgeInfo {
        BadgeInfo {
            id: self.id,
            name: self.name,
            description: self.description,
            icon: self.icon,
            max_progress: self.max_progress,
        }
    }

    /// Clamps raw progress into `[0, max_progress]`. Missing or non-finite
    /// progress reads as 0, and binary badges always report 0.
    pub fn normalize_progress(&self, raw: Option<f64>) -> f64 {
        let Some(max) = self.max_progress else {
            return 0.0;
        };
        raw.filter(|value| value.is_finite())
            .unwrap_or(0.0)
            .clamp(0.0, f64::from(max))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    #[serde(flatten)]
    pub badge: BadgeInfo,
    pub earned: bool,
    pub progress: f64,
}

/// Evaluates every badge in `registry`, in registry order
pub fn evaluate_registry(
    registry: &[BadgeDefinition],
    context: &BadgeContext<'_>,
) -> Vec<BadgeStatus> {
    registry
        .iter()
        .map(|definition| {
            let outcome = (definition.evaluate)(context);
            BadgeStatus {
                badge: definition.info(),
                earned: outcome.earned,
                progress: definition.normalize_progress(outcome.progress),
            }
        })
        .collect()
}

pub fn evaluate_badges(context: &BadgeContext<'_>) -> Vec<BadgeStatus> {
    evaluate_registry(BADGES, context)
}

pub fn badge_definitions() -> &'static [BadgeDefinition] {
    BADGES
}
