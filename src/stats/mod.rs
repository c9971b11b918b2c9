//! Pure derivations over match records: filtering, aggregation, sorting
//! and badge evaluation. Nothing in here holds state between calls except
//! the opt-in [`ViewCache`].

pub mod aggregate;
pub mod badges;
pub mod dashboard;
pub mod filter;
pub mod sort;
pub mod views;

pub use aggregate::{aggregate, StatsSummary};
pub use badges::{
    badge_definitions, evaluate_badges, evaluate_registry, BadgeContext, BadgeDefinition,
    BadgeInfo, BadgeOutcome, BadgeStatus, BADGES,
};
pub use dashboard::{player_dashboard, player_records, PlayerDashboard};
pub use filter::{filter_records, FilterCriteria};
pub use sort::{sort_records, SortDirection, SortField, SortSpec};
pub use views::{compute_view, ResultsView, ViewCache};
