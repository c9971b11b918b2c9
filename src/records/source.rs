use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::{MatchRecord, RecordBatch, RecordsError};

/// Where match records come from. The results service owns the data;
/// sources only read it.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self) -> Result<RecordBatch, RecordsError>;
}

/// Reads `GET {base}/api/results` from the remote results service
pub struct HttpRecordSource {
    client: reqwest::Client,
    results_url: String,
}

impl HttpRecordSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RecordsError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            results_url: format!("{}/api/results", base_url.trim_end_matches('/')),
        })
    }

    pub fn results_url(&self) -> &str {
        &self.results_url
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    #[instrument(skip(self), fields(url = %self.results_url))]
    async fn fetch(&self) -> Result<RecordBatch, RecordsError> {
        let response = self
            .client
            .get(&self.results_url)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let payload: serde_json::Value =
            serde_json::from_slice(&body).map_err(|err| RecordsError::Decode(err.to_string()))?;

        let batch = RecordBatch::from_documents(payload)?;
        info!(
            count = batch.records.len(),
            rejected = batch.rejected,
            "Fetched match records"
        );

        Ok(batch)
    }
}

/// In-memory source, handy for wiring tests and demos
#[derive(Debug, Default)]
pub struct StaticRecordSource {
    records: RwLock<Vec<MatchRecord>>,
}

impl StaticRecordSource {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Swaps the served records, as if the service had new results
    pub async fn replace(&self, records: Vec<MatchRecord>) {
        let mut guard = self.records.write().await;
        *guard = records;
    }
}

#[async_trait]
impl RecordSource for StaticRecordSource {
    async fn fetch(&self) -> Result<RecordBatch, RecordsError> {
        let records = self.records.read().await.clone();
        debug!(count = records.len(), "Serving static match records");
        Ok(RecordBatch::from_records(records))
    }
}
