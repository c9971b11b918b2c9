use async_trait::async_trait;
use tokio::sync::Notify;

use match_insights::{MatchRecord, RecordBatch, RecordSource, RecordsError};

/// Always fails like an unreachable results service
#[allow(dead_code)]
pub struct FailingRecordSource;

#[async_trait]
impl RecordSource for FailingRecordSource {
    async fn fetch(&self) -> Result<RecordBatch, RecordsError> {
        Err(RecordsError::Http("connection refused".to_string()))
    }
}

/// Holds its fetch open until released, to simulate a slow response
#[allow(dead_code)]
pub struct GatedRecordSource {
    records: Vec<MatchRecord>,
    started: Notify,
    gate: Notify,
}

#[allow(dead_code)]
impl GatedRecordSource {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self {
            records,
            started: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Resolves once a fetch is in flight
    pub async fn wait_until_fetching(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl RecordSource for GatedRecordSource {
    async fn fetch(&self) -> Result<RecordBatch, RecordsError> {
        self.started.notify_one();
        self.gate.notified().await;
        Ok(RecordBatch::from_records(self.records.clone()))
    }
}
