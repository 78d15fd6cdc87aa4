use super::criteria::{CommentMode, FilterCriteria};
use super::recency::parse_hours_ago;
use crate::traits::ResponsePredicate;
use crate::types::FeedbackResponse;
use tracing::{debug, warn};

impl FilterCriteria {
    fn passes_score(&self, response: &FeedbackResponse) -> bool {
        if self.scores.is_empty() {
            return true;
        }
        response
            .rounded_score()
            .map(|score| self.scores.contains(&score))
            .unwrap_or(false)
    }

    fn passes_comment(&self, response: &FeedbackResponse) -> bool {
        match self.comment {
            CommentMode::Any => true,
            CommentMode::MustHave => response.has_comment(),
            CommentMode::MustNotHave => !response.has_comment(),
        }
    }

    fn passes_aspects(&self, response: &FeedbackResponse) -> bool {
        self.aspects
            .iter()
            .all(|(aspect, constraint)| constraint.admits(response.reactions.get(aspect)))
    }

    /// Unparseable or missing labels stay visible in every window
    fn passes_recency(&self, response: &FeedbackResponse) -> bool {
        let limit = match self.window.hours() {
            Some(limit) => limit,
            None => return true,
        };

        let label = match response.updated_at() {
            Some(label) => label,
            None => return true,
        };

        match parse_hours_ago(label) {
            Some(hours) => hours <= limit,
            None => {
                warn!(
                    response = %response.id,
                    label,
                    "unrecognised relative time label, keeping response in window"
                );
                true
            }
        }
    }
}

impl ResponsePredicate for FilterCriteria {
    fn matches(&self, response: &FeedbackResponse) -> bool {
        self.passes_score(response)
            && self.passes_comment(response)
            && self.passes_aspects(response)
            && self.passes_recency(response)
    }
}

/// Case-insensitive containment search on the responder identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponderSearch {
    needle: String,
}

impl ResponderSearch {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }
}

impl ResponsePredicate for ResponderSearch {
    fn matches(&self, response: &FeedbackResponse) -> bool {
        self.needle.is_empty() || response.responder_id.to_lowercase().contains(&self.needle)
    }
}

/// Applies criteria first and the text search second
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    criteria: FilterCriteria,
    search: ResponderSearch,
}

impl FilterEngine {
    pub fn new(criteria: FilterCriteria, query: &str) -> Self {
        Self {
            criteria,
            search: ResponderSearch::new(query),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn apply<'a, I>(&self, responses: I) -> Vec<&'a FeedbackResponse>
    where
        I: IntoIterator<Item = &'a FeedbackResponse>,
    {
        let narrowed = self.criteria.retain(responses);
        let before_search = narrowed.len();
        let rows = self.search.retain(narrowed);

        debug!(
            matched = before_search,
            searched = rows.len(),
            "filtered responses"
        );
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::RecencyWindow;
    use crate::types::{Reaction, ResponseContext};

    fn scored(id: &str, score: f64) -> FeedbackResponse {
        FeedbackResponse::new(id, id).with_score(score)
    }

    fn aged(id: &str, label: &str) -> FeedbackResponse {
        FeedbackResponse::new(id, id).with_context(ResponseContext::default().with_updated_at(label))
    }

    #[test]
    fn test_default_criteria_pass_everything() {
        let responses = vec![scored("a", 1.0), FeedbackResponse::new("b", "b")];
        let rows = FilterEngine::default().apply(&responses);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_score_allowlist_keeps_relative_order() {
        let responses = vec![scored("a", 2.0), scored("b", 4.0), scored("c", 5.0), scored("d", 3.0)];
        let criteria = FilterCriteria::new().with_scores([4, 5]);

        let scores: Vec<f64> = FilterEngine::new(criteria, "")
            .apply(&responses)
            .iter()
            .filter_map(|response| response.score)
            .collect();
        assert_eq!(scores, vec![4.0, 5.0]);
    }

    #[test]
    fn test_unscored_response_fails_non_empty_allowlist() {
        let responses = vec![FeedbackResponse::new("a", "a")];
        let criteria = FilterCriteria::new().with_scores([3]);
        assert!(FilterEngine::new(criteria, "").apply(&responses).is_empty());
    }

    #[test]
    fn test_comment_modes() {
        let responses = vec![
            FeedbackResponse::new("a", "a").with_comment("Clear rules"),
            FeedbackResponse::new("b", "b").with_comment("  "),
            FeedbackResponse::new("c", "c"),
        ];

        let with = FilterCriteria::new().with_comment(CommentMode::MustHave);
        let ids: Vec<&str> = with.retain(&responses).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);

        let without = FilterCriteria::new().with_comment(CommentMode::MustNotHave);
        let ids: Vec<&str> = without.retain(&responses).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_aspect_constraints_and_across_aspects() {
        let responses = vec![
            FeedbackResponse::new("a", "a")
                .with_reaction("Reviewer", Reaction::Up)
                .with_reaction("Tool", Reaction::Down),
            FeedbackResponse::new("b", "b")
                .with_reaction("Reviewer", Reaction::Down)
                .with_reaction("Tool", Reaction::Down),
            FeedbackResponse::new("c", "c").with_reaction("Tool", Reaction::Down),
        ];

        let criteria = FilterCriteria::new()
            .require_up("Reviewer")
            .require_down("Reviewer")
            .require_down("Tool");
        let ids: Vec<&str> = criteria.retain(&responses).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let strict = FilterCriteria::new().require_up("Reviewer").require_down("Tool");
        let ids: Vec<&str> = strict.retain(&responses).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_recency_window() {
        let responses = vec![aged("recent", "3d ago"), aged("old", "40d ago"), aged("odd", "some time back")];

        let week = FilterCriteria::new().with_window(RecencyWindow::Last7d);
        let ids: Vec<&str> = week.retain(&responses).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["recent", "odd"]);

        let month = FilterCriteria::new().with_window(RecencyWindow::Last30d);
        assert_eq!(month.retain(&responses).len(), 2);

        let quarter = FilterCriteria::new().with_window(RecencyWindow::Last90d);
        assert_eq!(quarter.retain(&responses).len(), 3);
    }

    #[test]
    fn test_recency_window_limits_are_inclusive() {
        let responses = vec![
            aged("week", "7d ago"),
            aged("week_hours", "168h ago"),
            aged("past_week_hours", "169h ago"),
            aged("past_week", "8d ago"),
            aged("month", "30d ago"),
            aged("quarter", "90d ago"),
            aged("past_quarter", "91d ago"),
        ];
        fn ids(responses: &[FeedbackResponse], window: RecencyWindow) -> Vec<&str> {
            FilterCriteria::new()
                .with_window(window)
                .retain(responses)
                .into_iter()
                .map(|r| r.id.as_str())
                .collect()
        }

        assert_eq!(ids(&responses, RecencyWindow::Last7d), vec!["week", "week_hours"]);
        assert_eq!(
            ids(&responses, RecencyWindow::Last30d),
            vec!["week", "week_hours", "past_week_hours", "past_week", "month"]
        );
        assert_eq!(
            ids(&responses, RecencyWindow::Last90d),
            vec!["week", "week_hours", "past_week_hours", "past_week", "month", "quarter"]
        );
    }

    #[test]
    fn test_missing_label_passes_window() {
        let responses = vec![FeedbackResponse::new("a", "a")];
        let criteria = FilterCriteria::new().with_window(RecencyWindow::Last7d);
        assert_eq!(criteria.retain(&responses).len(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_and_runs_after_criteria() {
        let responses = vec![
            scored("1", 4.0).with_comment("x"),
            FeedbackResponse::new("2", "A-1044").with_score(2.0),
            FeedbackResponse::new("3", "a-1023").with_score(4.0),
        ];
        let engine = FilterEngine::new(FilterCriteria::new().with_scores([4]), "A-10");
        let ids: Vec<&str> = engine.apply(&responses).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }
}
