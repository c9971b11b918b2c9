use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::{MatchRecord, RecordBatch, RecordSource, RecordsError};

/// The immutable record collection produced by one fetch
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub generation: u64,
    pub records: Vec<MatchRecord>,
    pub rejected: usize,
    pub fetched_at: DateTime<Utc>,
}

/// Identifies one fetch; later tickets supersede earlier ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub enum StoreState {
    Empty,
    Loading,
    Ready(Arc<Snapshot>),
    Unavailable(String),
}

/// Serializable summary of [`StoreState`] for callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StoreStatus {
    Empty,
    Loading,
    Ready {
        generation: u64,
        records: usize,
        rejected: usize,
        fetched_at: DateTime<Utc>,
    },
    Unavailable {
        reason: String,
    },
}

#[derive(Debug)]
enum Outcome {
    Empty,
    Ready(Arc<Snapshot>),
    Unavailable(String),
}

#[derive(Debug)]
struct Inner {
    issued: u64,
    applied: u64,
    /// Tickets handed out that have neither completed nor been abandoned
    pending: BTreeSet<u64>,
    outcome: Outcome,
}

impl Inner {
    fn is_loading(&self) -> bool {
        self.pending.range(self.applied + 1..).next().is_some()
    }

    fn abandon(&mut self, ticket: FetchTicket) {
        if self.pending.remove(&ticket.0) {
            debug!(generation = ticket.0, "Fetch abandoned before completing");
        }
    }
}

/// Keeps a fetch registered only while its future is alive. Dropping it
/// unsettled (a cancelled refresh) withdraws the ticket.
struct PendingFetch<'a> {
    store: &'a RecordStore,
    ticket: FetchTicket,
    settled: bool,
}

impl<'a> PendingFetch<'a> {
    fn new(store: &'a RecordStore, ticket: FetchTicket) -> Self {
        Self {
            store,
            ticket,
            settled: false,
        }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let ticket = self.ticket;
        if let Ok(mut inner) = self.store.inner.try_write() {
            inner.abandon(ticket);
            return;
        }
        // Lock is contended; finish the cleanup on the runtime instead.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = Arc::clone(&self.store.inner);
                handle.spawn(async move {
                    inner.write().await.abandon(ticket);
                });
            }
            Err(_) => warn!(
                generation = ticket.0,
                "Could not withdraw abandoned fetch outside a runtime"
            ),
        }
    }
}

/// Holds the latest fetched snapshot. Writes replace the snapshot wholesale.
#[derive(Debug, Clone)]
pub struct RecordStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                issued: 0,
                applied: 0,
                pending: BTreeSet::new(),
                outcome: Outcome::Empty,
            })),
        }
    }

    /// Registers a new fetch. Until it or a later fetch completes or is
    /// abandoned, the
    /// store reports `Loading`.
    pub async fn begin_fetch(&self) -> FetchTicket {
        let mut inner = self.inner.write().await;
        inner.issued += 1;
        let generation = inner.issued;
        inner.pending.insert(generation);
        debug!(generation, "Fetch started");
        FetchTicket(generation)
    }

    /// Applies a fetch result unless a newer one has already landed.
    /// Returns whether the result was applied.
    #[instrument(skip(self, result), fields(generation = ticket.0))]
    pub async fn complete(
        &self,
        ticket: FetchTicket,
        result: Result<RecordBatch, RecordsError>,
    ) -> bool {
        let mut inner = self.inner.write().await;
        inner.pending.remove(&ticket.0);
        if ticket.0 <= inner.applied {
            debug!(applied = inner.applied, "Discarding superseded fetch result");
            return false;
        }

        inner.applied = ticket.0;
        inner.outcome = match result {
            Ok(batch) => {
                info!(
                    count = batch.records.len(),
                    rejected = batch.rejected,
                    "Snapshot replaced"
                );
                Outcome::Ready(Arc::new(Snapshot {
                    generation: ticket.0,
                    records: batch.records,
                    rejected: batch.rejected,
                    fetched_at: Utc::now(),
                }))
            }
            Err(err) => {
                warn!(%err, "Match records unavailable");
                Outcome::Unavailable(err.to_string())
            }
        };

        true
    }

    /// Withdraws a fetch that will never complete. The store goes back to
    /// whatever it held before, unless another fetch is still outstanding.
    pub async fn abandon(&self, ticket: FetchTicket) {
        self.inner.write().await.abandon(ticket);
    }

    /// Runs one full fetch cycle against `source`. Cancelling the returned
    /// future withdraws its fetch.
    #[instrument(skip(self, source))]
    pub async fn refresh(&self, source: &dyn RecordSource) -> Result<Arc<Snapshot>, RecordsError> {
        let ticket = self.begin_fetch().await;
        let pending = PendingFetch::new(self, ticket);
        let result = source.fetch().await;
        self.complete(ticket, result).await;
        pending.settle();
        self.ready_snapshot().await
    }

    pub async fn state(&self) -> StoreState {
        let inner = self.inner.read().await;
        if inner.is_loading() {
            return StoreState::Loading;
        }
        match &inner.outcome {
            Outcome::Empty => StoreState::Empty,
            Outcome::Ready(snapshot) => StoreState::Ready(Arc::clone(snapshot)),
            Outcome::Unavailable(reason) => StoreState::Unavailable(reason.clone()),
        }
    }

    pub async fn status(&self) -> StoreStatus {
        match self.state().await {
            StoreState::Empty => StoreStatus::Empty,
            StoreState::Loading => StoreStatus::Loading,
            StoreState::Ready(snapshot) => StoreStatus::Ready {
                generation: snapshot.generation,
                records: snapshot.records.len(),
                rejected: snapshot.rejected,
                fetched_at: snapshot.fetched_at,
            },
            StoreState::Unavailable(reason) => StoreStatus::Unavailable { reason },
        }
    }

    /// The current snapshot, only when fully resolved. Never hands out a
    /// stale snapshot while a newer fetch is outstanding.
    pub async fn ready_snapshot(&self) -> Result<Arc<Snapshot>, RecordsError> {
        match self.state().await {
            StoreState::Ready(snapshot) => Ok(snapshot),
            StoreState::Loading => Err(RecordsError::Loading),
            StoreState::Empty => Err(RecordsError::NotLoaded),
            StoreState::Unavailable(reason) => Err(RecordsError::Unavailable(reason)),
        }
    }
}
