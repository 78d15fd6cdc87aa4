//! Selected-row state for a filtered list and the detail card it drives

use crate::aggregation::ScoreTone;
use crate::survey::ScoreScale;
use crate::types::{FeedbackResponse, Reaction};
use serde::Serialize;

/// Which response is currently selected in one filtered list.
///
/// Reconciling against a new list never fails: a stale id falls back to the
/// first row, or to nothing when the list is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<S: Into<String>>(&mut self, id: S) {
        self.selected = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Resolve the selection against `rows` and remember the outcome
    pub fn reconcile<'a>(&mut self, rows: &[&'a FeedbackResponse]) -> Option<&'a FeedbackResponse> {
        let resolved = self
            .selected
            .as_deref()
            .and_then(|id| rows.iter().copied().find(|row| row.id == id))
            .or_else(|| rows.first().copied());

        self.selected = resolved.map(|row| row.id.clone());
        resolved
    }
}

/// Everything the detail card shows for one response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseDetail {
    pub id: String,
    pub responder_id: String,
    pub score: Option<f64>,
    pub tone: Option<ScoreTone>,
    pub reactions: Vec<(String, Reaction)>,
    pub comment: Option<String>,
    pub device: Option<String>,
    pub updated_at: Option<String>,
    pub project: Option<String>,
    pub workflow: Option<String>,
    pub tasks_done: Option<u32>,
    pub asked_at_task: Option<u32>,
}

impl ResponseDetail {
    /// Build the card; reactions list declared aspects first, then the
    /// response's own aspects in recorded order. Absent reactions are left out.
    pub fn new(response: &FeedbackResponse, scale: ScoreScale, declared_aspects: &[String]) -> Self {
        let mut reactions: Vec<(String, Reaction)> = declared_aspects
            .iter()
            .map(|aspect| (aspect.clone(), response.reactions.get(aspect)))
            .filter(|(_, reaction)| reaction.is_present())
            .collect();

        for (aspect, reaction) in response.reactions.iter() {
            if reaction.is_present() && !declared_aspects.iter().any(|declared| declared == aspect) {
                reactions.push((aspect.to_string(), reaction));
            }
        }

        let context = response.context.clone().unwrap_or_default();

        Self {
            id: response.id.clone(),
            responder_id: response.responder_id.clone(),
            score: response.score,
            tone: response.score.map(|score| ScoreTone::for_score(score, scale)),
            reactions,
            comment: response.comment.clone().filter(|comment| !comment.trim().is_empty()),
            device: context.device,
            updated_at: context.updated_at,
            project: context.project,
            workflow: context.workflow,
            tasks_done: response.tasks_done,
            asked_at_task: response.asked_at_task,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(responses: &[FeedbackResponse]) -> Vec<&FeedbackResponse> {
        responses.iter().collect()
    }

    #[test]
    fn test_keeps_selection_when_still_present() {
        let responses = vec![FeedbackResponse::new("a", "A"), FeedbackResponse::new("b", "B")];
        let mut selection = Selection::new();
        selection.select("b");

        let selected = selection.reconcile(&rows(&responses)).unwrap();
        assert_eq!(selected.id, "b");
    }

    #[test]
    fn test_falls_back_to_first_when_stale() {
        let all = vec![FeedbackResponse::new("a", "A"), FeedbackResponse::new("b", "B")];
        let mut selection = Selection::new();
        selection.select("a");
        assert_eq!(selection.reconcile(&rows(&all)).unwrap().id, "a");

        let narrowed = vec![all[1].clone()];
        assert_eq!(selection.reconcile(&rows(&narrowed)).unwrap().id, "b");
        assert_eq!(selection.selected_id(), Some("b"));
    }

    #[test]
    fn test_empty_list_selects_nothing() {
        let mut selection = Selection::new();
        selection.select("ghost");
        assert!(selection.reconcile(&[]).is_none());
        assert_eq!(selection.selected_id(), None);
    }

    #[test]
    fn test_no_prior_selection_picks_first() {
        let responses = vec![FeedbackResponse::new("a", "A")];
        let mut selection = Selection::new();
        assert_eq!(selection.reconcile(&rows(&responses)).unwrap().id, "a");
    }

    #[test]
    fn test_detail_orders_reactions() {
        let response = FeedbackResponse::new("a", "A")
            .with_score(4.6)
            .with_comment("   ")
            .with_reaction("Latency", Reaction::Down)
            .with_reaction("Reviewer", Reaction::Up)
            .with_reaction("Instructions", Reaction::Absent);
        let declared = vec!["Instructions".to_string(), "Reviewer".to_string()];

        let detail = ResponseDetail::new(&response, ScoreScale::default(), &declared);
        assert_eq!(
            detail.reactions,
            vec![
                ("Reviewer".to_string(), Reaction::Up),
                ("Latency".to_string(), Reaction::Down)
            ]
        );
        assert_eq!(detail.tone, Some(ScoreTone::Good));
        assert_eq!(detail.comment, None);
    }
}
