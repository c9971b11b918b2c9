mod errors;
pub mod models;
pub mod source;
pub mod store;

pub use errors::{RecordRejection, RecordsError};
pub use models::{MatchRecord, RecordBatch, Winner};
pub use source::{HttpRecordSource, RecordSource, StaticRecordSource};
pub use store::{FetchTicket, RecordStore, Snapshot, StoreState, StoreStatus};
