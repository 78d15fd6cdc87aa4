use crate::error::{FeedbackError, Result};
use crate::store::Scope;
use crate::survey::SurveyConfig;
use crate::types::FeedbackResponse;
use serde::{Deserialize, Serialize};

/// Main structure of a feedback data file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeedbackData {
    /// Survey shared by every scope unless a scope overrides it
    #[serde(default)]
    pub survey: SurveyConfig,
    /// Scopes with their responses
    #[serde(default)]
    pub scopes: Vec<ScopeData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Workflow,
    Platform,
}

/// One scope entry in the data file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScopeData {
    pub kind: ScopeKind,
    /// Workflow id; ignored for the platform scope
    pub id: Option<String>,
    pub project: Option<String>,
    pub workflow: Option<String>,
    /// Survey override for this scope
    pub survey: Option<SurveyConfig>,
    /// CSV file with additional responses, relative to the data file
    pub responses_csv: Option<String>,
    /// Inline responses
    #[serde(default)]
    pub responses: Vec<FeedbackResponse>,
}

impl ScopeData {
    pub fn to_scope(&self) -> Result<Scope> {
        match self.kind {
            ScopeKind::Platform => Ok(Scope::Platform),
            ScopeKind::Workflow => {
                let field = |value: &Option<String>, name: &str| {
                    value
                        .as_deref()
                        .map(str::trim)
                        .filter(|value| !value.is_empty())
                        .map(str::to_string)
                        .ok_or_else(|| {
                            FeedbackError::invalid_config(format!(
                                "Workflow scope is missing '{}'",
                                name
                            ))
                        })
                };

                Ok(Scope::Workflow {
                    id: field(&self.id, "id")?,
                    project: field(&self.project, "project")?,
                    workflow: field(&self.workflow, "workflow")?,
                })
            }
        }
    }

    /// Scope-specific survey, or the file-wide one
    pub fn survey<'a>(&'a self, fallback: &'a SurveyConfig) -> &'a SurveyConfig {
        self.survey.as_ref().unwrap_or(fallback)
    }
}
