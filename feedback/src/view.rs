//! Caller-owned view state: criteria, search text and selection for one store.
//!
//! Every call to [`FeedbackView::snapshot`] recomputes the whole pipeline
//! (filter, search, aggregate, select) so the tiles always describe exactly
//! the rows in the list.

use crate::aggregation::{exposure, Aggregator, ExposureSummary, FeedbackSummary};
use crate::filter::{FilterCriteria, FilterEngine};
use crate::selection::{ResponseDetail, Selection};
use crate::store::{ResponseStore, Scope};
use crate::types::FeedbackResponse;
use serde::Serialize;

/// Derived state for one recomputation
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<'a> {
    pub scope: &'a Scope,
    pub rows: Vec<&'a FeedbackResponse>,
    pub summary: FeedbackSummary,
    pub exposure: ExposureSummary,
    pub selected: Option<ResponseDetail>,
}

#[derive(Debug, Clone)]
pub struct FeedbackView<'a> {
    store: &'a ResponseStore,
    aggregator: Aggregator,
    criteria: FilterCriteria,
    search: String,
    selection: Selection,
}

impl<'a> FeedbackView<'a> {
    pub fn new(store: &'a ResponseStore) -> Self {
        Self {
            store,
            aggregator: Aggregator::for_store(store),
            criteria: FilterCriteria::default(),
            search: String::new(),
            selection: Selection::new(),
        }
    }

    #[must_use]
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    #[must_use]
    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = search.into();
        self
    }

    pub fn store(&self) -> &'a ResponseStore {
        self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    pub fn set_search<S: Into<String>>(&mut self, search: S) {
        self.search = search.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Select a response; an id outside the filtered list falls back on the next snapshot
    pub fn select<S: Into<String>>(&mut self, id: S) {
        self.selection.select(id);
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Answered responses that pass the criteria and the search, in store order
    pub fn rows(&self) -> Vec<&'a FeedbackResponse> {
        FilterEngine::new(self.criteria.clone(), &self.search).apply(self.store.answered())
    }

    pub fn snapshot(&mut self) -> ViewSnapshot<'a> {
        let rows = self.rows();
        let summary = self.aggregator.aggregate(rows.iter().copied());
        let selected = self.selection.reconcile(&rows).map(|response| {
            ResponseDetail::new(response, self.store.scale(), self.store.declared_aspects())
        });

        ViewSnapshot {
            scope: self.store.scope(),
            rows,
            summary,
            exposure: exposure(self.store.responses()),
            selected,
        }
    }
}
