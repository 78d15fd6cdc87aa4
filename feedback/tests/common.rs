//! Shared fixtures for feedback crate integration tests
//!
//! Response builders and a small platform-wide store modelled on real
//! contributor feedback.

#![allow(dead_code)]

use feedback::{
    FeedbackResponse, Reaction, ResponseContext, ResponseStore, Scope, ScoreScale, SurveyConfig,
    SurveyStatus,
};

/// Response with a score, a reaction per aspect key and a relative time label
pub fn create_response(
    id: &str,
    responder: &str,
    score: Option<f64>,
    reactions: &[(&str, Reaction)],
    comment: Option<&str>,
    updated_at: &str,
) -> FeedbackResponse {
    let mut response = FeedbackResponse::new(id, responder)
        .with_context(ResponseContext::default().with_device("Chrome • Win").with_updated_at(updated_at));
    response.score = score;
    response.comment = comment.map(str::to_string);
    for (aspect, reaction) in reactions {
        response.reactions.insert(*aspect, *reaction);
    }
    response
}

/// Platform responses keyed by aspect key, as stored before relabelling
pub fn platform_responses() -> Vec<FeedbackResponse> {
    use Reaction::{Down, Up};

    vec![
        create_response(
            "fts-1",
            "A-1023",
            Some(4.0),
            &[("instructions", Up), ("reviewer", Up), ("tool", Up), ("ui", Up)],
            Some("Good speed this week."),
            "2h ago",
        ),
        create_response(
            "fts-2",
            "B-2099",
            Some(3.0),
            &[("instructions", Down), ("reviewer", Up), ("tool", Down), ("ui", Down)],
            Some("Uploads flaky on hotel Wi-Fi."),
            "yesterday",
        ),
        create_response(
            "fts-3",
            "C-6677",
            Some(5.0),
            &[("instructions", Up), ("reviewer", Up), ("tool", Up), ("ui", Up)],
            None,
            "3d ago",
        ),
        create_response(
            "fts-4",
            "D-3001",
            Some(2.0),
            &[("instructions", Down), ("reviewer", Down), ("tool", Down), ("ui", Down)],
            Some("Review loop confusing; editor lags."),
            "40d ago",
        ),
        create_response("fts-5", "E-4100", None, &[], None, "5h ago").with_status(SurveyStatus::NotShown),
    ]
}

pub fn platform_store() -> ResponseStore {
    ResponseStore::from_survey(Scope::Platform, &SurveyConfig::default(), platform_responses())
        .expect("fixture store should be valid")
}

pub fn bare_store(responses: Vec<FeedbackResponse>) -> ResponseStore {
    ResponseStore::new(Scope::Platform, ScoreScale::default(), responses)
        .expect("fixture store should be valid")
}

/// Deterministic reorderings used in place of random shuffles
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut out = Vec::new();
    for shift in 0..items.len().max(1) {
        let mut rotated = items.to_vec();
        rotated.rotate_left(shift.min(items.len()));
        out.push(rotated.clone());
        rotated.reverse();
        out.push(rotated);
    }
    out
}
