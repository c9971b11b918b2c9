use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::{aggregate, filter_records, sort_records, FilterCriteria, SortSpec, StatsSummary};
use crate::records::{MatchRecord, Snapshot};

/// A filtered, sorted record list plus the summary of what it shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub records: Vec<MatchRecord>,
    pub summary: StatsSummary,
}

pub fn compute_view(
    records: &[MatchRecord],
    criteria: &FilterCriteria,
    spec: SortSpec,
) -> ResultsView {
    let filtered = filter_records(records, criteria);
    let summary = aggregate(&filtered);
    ResultsView {
        records: sort_records(&filtered, spec),
        summary,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ViewKey {
    generation: u64,
    criteria: FilterCriteria,
    spec: SortSpec,
}

/// Memoizes the last computed view. A hit is only served when snapshot
/// generation, criteria and sort all match.
#[derive(Debug, Default)]
pub struct ViewCache {
    entry: Option<(ViewKey, Arc<ResultsView>)>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        snapshot: &Snapshot,
        criteria: &FilterCriteria,
        spec: SortSpec,
    ) -> Arc<ResultsView> {
        let key = ViewKey {
            generation: snapshot.generation,
            criteria: criteria.clone(),
            spec,
        };

        if let Some((cached_key, view)) = &self.entry {
            if *cached_key == key {
                debug!(generation = key.generation, "Results view cache hit");
                return Arc::clone(view);
            }
        }

        let view = Arc::new(compute_view(&snapshot.records, criteria, spec));
        debug!(
            generation = key.generation,
            records = view.records.len(),
            "Results view recomputed"
        );
        self.entry = Some((key, Arc::clone(&view)));
        view
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
