// Library crate for the match insights service
// This file exposes the public API for the binary and integration tests

pub mod api;
pub mod config;
pub mod records;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use config::{Config, ConfigError};
pub use records::{
    HttpRecordSource, MatchRecord, RecordBatch, RecordSource, RecordStore, RecordsError,
    Snapshot, StaticRecordSource, StoreStatus, Winner,
};
pub use shared::{AppError, AppState};
pub use stats::{
    aggregate, evaluate_badges, filter_records, player_dashboard, sort_records, FilterCriteria,
    PlayerDashboard, SortDirection, SortField, SortSpec, StatsSummary,
};
