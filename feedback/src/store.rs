use crate::error::{FeedbackError, Result};
use crate::survey::{ScoreScale, SurveyConfig};
use crate::types::FeedbackResponse;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier of the population a store covers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    /// One workflow within a project
    Workflow {
        id: String,
        project: String,
        workflow: String,
    },
    /// Feedback about the platform as a whole
    Platform,
}

impl Scope {
    pub fn workflow<S: Into<String>>(id: S, project: S, workflow: S) -> Self {
        Self::Workflow {
            id: id.into(),
            project: project.into(),
            workflow: workflow.into(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Scope::Workflow { id, .. } => id,
            Scope::Platform => "platform",
        }
    }

    pub fn project(&self) -> Option<&str> {
        match self {
            Scope::Workflow { project, .. } => Some(project),
            Scope::Platform => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Workflow {
                project, workflow, ..
            } => write!(f, "{} • {}", project, workflow),
            Scope::Platform => write!(f, "Platform"),
        }
    }
}

/// Immutable, ordered responses for one scope.
///
/// Construction is the validation boundary: ids are unique and every score
/// lies inside the survey scale.
#[derive(Debug, Clone)]
pub struct ResponseStore {
    scope: Scope,
    scale: ScoreScale,
    declared_aspects: Vec<String>,
    /// Survey `(key, label)` pairs used to resolve user-typed aspect names
    aspect_keys: Vec<(String, String)>,
    responses: Vec<FeedbackResponse>,
}

impl ResponseStore {
    pub fn new(scope: Scope, scale: ScoreScale, responses: Vec<FeedbackResponse>) -> Result<Self> {
        scale.validate()?;

        let mut seen = HashSet::with_capacity(responses.len());
        for response in &responses {
            if !seen.insert(response.id.as_str()) {
                return Err(FeedbackError::DuplicateResponseId {
                    id: response.id.clone(),
                    scope: scope.id().to_string(),
                });
            }

            if let Some(score) = response.score {
                if !scale.contains(score) {
                    return Err(FeedbackError::ScoreOutOfRange {
                        id: response.id.clone(),
                        score,
                        min: scale.min,
                        max: scale.max,
                    });
                }
            }
        }

        Ok(Self {
            scope,
            scale,
            declared_aspects: Vec::new(),
            aspect_keys: Vec::new(),
            responses,
        })
    }

    /// Build a store whose reaction keys are translated to the survey's labels
    /// and whose breakdown order follows the survey's enabled aspects.
    pub fn from_survey(
        scope: Scope,
        survey: &SurveyConfig,
        responses: Vec<FeedbackResponse>,
    ) -> Result<Self> {
        let responses = responses
            .into_iter()
            .map(|mut response| {
                response.reactions = response.reactions.relabel(|key| survey.label_for(key));
                response
            })
            .collect();

        let mut store = Self::new(scope, survey.scale, responses)?;
        store.declared_aspects = survey.declared_aspects();
        store.aspect_keys = survey
            .aspects
            .iter()
            .map(|aspect| (aspect.key.clone(), aspect.label.clone()))
            .collect();
        Ok(store)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn scale(&self) -> ScoreScale {
        self.scale
    }

    /// Aspect labels that lead the breakdown ordering
    pub fn declared_aspects(&self) -> &[String] {
        &self.declared_aspects
    }

    /// Reaction name stored for a user-typed aspect: a label or a survey key,
    /// matched case-insensitively, or any aspect a response reacted to
    pub fn resolve_aspect(&self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        self.declared_aspects
            .iter()
            .find(|label| label.eq_ignore_ascii_case(name))
            .cloned()
            .or_else(|| {
                self.aspect_keys
                    .iter()
                    .find(|(key, label)| key.eq_ignore_ascii_case(name) || label.eq_ignore_ascii_case(name))
                    .map(|(_, label)| label.clone())
            })
            .or_else(|| {
                self.responses
                    .iter()
                    .flat_map(|response| response.reactions.iter())
                    .find(|(aspect, _)| aspect.eq_ignore_ascii_case(name))
                    .map(|(aspect, _)| aspect.to_string())
            })
    }

    /// Every record, including surveys that were never answered
    pub fn responses(&self) -> &[FeedbackResponse] {
        &self.responses
    }

    /// Records of completed surveys, in store order
    pub fn answered(&self) -> impl Iterator<Item = &FeedbackResponse> {
        self.responses.iter().filter(|response| response.is_answered())
    }

    pub fn get(&self, id: &str) -> Option<&FeedbackResponse> {
        self.responses.iter().find(|response| response.id == id)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Reaction, SurveyStatus};

    #[test]
    fn test_duplicate_ids_rejected() {
        let responses = vec![
            FeedbackResponse::new("r1", "A-1").with_score(4.0),
            FeedbackResponse::new("r1", "A-2").with_score(3.0),
        ];
        let err = ResponseStore::new(Scope::Platform, ScoreScale::default(), responses).unwrap_err();
        assert!(matches!(err, FeedbackError::DuplicateResponseId { .. }));
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let responses = vec![FeedbackResponse::new("r1", "A-1").with_score(7.0)];
        let err = ResponseStore::new(Scope::Platform, ScoreScale::default(), responses).unwrap_err();
        assert!(err.to_string().contains("outside the survey scale"));
    }

    #[test]
    fn test_missing_score_is_accepted() {
        let responses = vec![FeedbackResponse::new("r1", "A-1").with_status(SurveyStatus::Shown)];
        let store = ResponseStore::new(Scope::Platform, ScoreScale::default(), responses).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.answered().count(), 0);
    }

    #[test]
    fn test_from_survey_relabels_reactions() {
        let survey = SurveyConfig::default();
        let responses = vec![FeedbackResponse::new("r1", "A-1")
            .with_score(4.0)
            .with_reaction("ui", Reaction::Up)
            .with_reaction("latency", Reaction::Down)];

        let store = ResponseStore::from_survey(Scope::Platform, &survey, responses).unwrap();
        let response = store.get("r1").unwrap();
        assert_eq!(response.reactions.get("UI / Layout"), Reaction::Up);
        assert_eq!(response.reactions.get("latency"), Reaction::Down);
        assert_eq!(store.declared_aspects().len(), 4);
    }

    #[test]
    fn test_resolve_aspect_accepts_keys_and_labels() {
        let responses = vec![FeedbackResponse::new("r1", "A-1")
            .with_score(4.0)
            .with_reaction("tool", Reaction::Down)
            .with_reaction("latency", Reaction::Down)];
        let store = ResponseStore::from_survey(Scope::Platform, &SurveyConfig::default(), responses).unwrap();

        assert_eq!(store.resolve_aspect("tool").as_deref(), Some("Tool performance"));
        assert_eq!(store.resolve_aspect("TOOL").as_deref(), Some("Tool performance"));
        assert_eq!(store.resolve_aspect("ui / layout").as_deref(), Some("UI / Layout"));
        assert_eq!(store.resolve_aspect("Latency").as_deref(), Some("latency"));
        assert_eq!(store.resolve_aspect("weather"), None);
        assert_eq!(store.resolve_aspect("  "), None);
    }

    #[test]
    fn test_scope_display() {
        let scope = Scope::workflow("wf_chem", "TextbookQnAProject", "Chemistry");
        assert_eq!(scope.to_string(), "TextbookQnAProject • Chemistry");
        assert_eq!(scope.id(), "wf_chem");
        assert_eq!(Scope::Platform.id(), "platform");
    }
}
