use crate::config::types::{FeedbackData, ScopeKind};
use crate::error::{FeedbackError, Result};
use crate::survey::SurveyConfig;
use crate::traits::ConfigValidator;
use std::collections::HashSet;
use std::path::Path;

/// Structural checks on a data file before any store is built
pub struct DataValidator;

impl ConfigValidator for DataValidator {
    type Config = FeedbackData;

    fn validate(&self, config: &FeedbackData) -> Result<()> {
        self.validate_with_context(config, "data file")
    }
}

impl DataValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_with_context<P: AsRef<Path>>(&self, data: &FeedbackData, path: P) -> Result<()> {
        let path_str = path.as_ref().to_string_lossy();

        if data.scopes.is_empty() {
            return Err(FeedbackError::invalid_config(format!(
                "No scopes configured in {}. Add at least one [[scopes]] entry.",
                path_str
            )));
        }

        validate_survey(&data.survey, "[survey]")?;

        let platform_count = data
            .scopes
            .iter()
            .filter(|scope| scope.kind == ScopeKind::Platform)
            .count();
        if platform_count > 1 {
            return Err(FeedbackError::invalid_config(format!(
                "Multiple platform scopes defined in {}; only one is allowed",
                path_str
            )));
        }

        let mut ids = HashSet::new();
        for scope_data in &data.scopes {
            let scope = scope_data.to_scope()?;
            if !ids.insert(scope.id().to_string()) {
                return Err(FeedbackError::invalid_config(format!(
                    "Scope '{}' is defined more than once in {}",
                    scope.id(),
                    path_str
                )));
            }

            if let Some(survey) = &scope_data.survey {
                validate_survey(survey, &format!("survey of scope '{}'", scope.id()))?;
            }
        }

        Ok(())
    }
}

impl Default for DataValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_survey(survey: &SurveyConfig, context: &str) -> Result<()> {
    survey.scale.validate()?;

    let mut keys = HashSet::new();
    for aspect in &survey.aspects {
        if aspect.key.trim().is_empty() || aspect.label.trim().is_empty() {
            return Err(FeedbackError::invalid_config(format!(
                "Aspects in {} need a non-empty key and label",
                context
            )));
        }
        if !keys.insert(aspect.key.as_str()) {
            return Err(FeedbackError::invalid_config(format!(
                "Aspect key '{}' appears more than once in {}",
                aspect.key, context
            )));
        }
    }
    Ok(())
}
