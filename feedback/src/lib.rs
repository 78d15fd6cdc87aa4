//! Feedback - survey response aggregation and filtering for contributor dashboards
//!
//! Turns a list of survey responses into summary tiles, a per-aspect
//! thumbs-up/down breakdown, and a filtered, searchable list with one
//! selected detail card.

// Core modules
pub mod error;
pub mod types;
pub mod traits;

// Data sources
pub mod survey;
pub mod store;
pub mod catalog;
pub mod config;

// Transforms
pub mod aggregation;
pub mod filter;
pub mod selection;
pub mod view;

// Output
pub mod renderers;
pub mod export;

// Re-export main types for convenience
pub use aggregation::{Aggregator, AspectRow, AverageScore, ExposureSummary, FeedbackSummary, ScoreTone};
pub use catalog::ScopeCatalog;
pub use config::{load_catalog, FeedbackData};
pub use error::{FeedbackError, Result};
pub use filter::{AspectConstraint, CommentMode, FilterCriteria, FilterEngine, RecencyWindow};
pub use renderers::{CliRenderer, JsonRenderer, OutputRenderer};
pub use selection::{ResponseDetail, Selection};
pub use store::{ResponseStore, Scope};
pub use survey::{AspectDefinition, ScoreScale, SurveyConfig};
pub use traits::ResponsePredicate;
pub use types::{FeedbackResponse, Reaction, Reactions, ResponseContext, SurveyStatus};
pub use view::{FeedbackView, ViewSnapshot};

/// Summarise the answered responses of a store that pass `criteria` and `search`
pub fn summarize(store: &ResponseStore, criteria: &FilterCriteria, search: &str) -> FeedbackSummary {
    let rows = FilterEngine::new(criteria.clone(), search).apply(store.answered());
    Aggregator::for_store(store).aggregate(rows)
}
