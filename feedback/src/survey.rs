//! Survey definitions: score scale and the aspects contributors react to.
//!
//! Core aspects ship with every survey and can only be switched on or off.
//! Extra aspects are added per workflow and can be renamed or removed.

use crate::error::{FeedbackError, Result};
use serde::{Deserialize, Serialize};

/// Inclusive headline score range fixed per survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoreScale {
    pub min: u32,
    pub max: u32,
}

impl ScoreScale {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        let scale = Self { min, max };
        scale.validate()?;
        Ok(scale)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min >= self.max {
            return Err(FeedbackError::InvalidScale {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn contains(&self, score: f64) -> bool {
        score.is_finite() && score >= f64::from(self.min) && score <= f64::from(self.max)
    }

    /// Project a score on this scale onto a 5-point scale
    pub fn to_five_point(&self, score: f64) -> f64 {
        score / f64::from(self.max) * 5.0
    }
}

impl Default for ScoreScale {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

/// One aspect contributors can give a quick thumbs reaction on
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AspectDefinition {
    /// Stable key used in stored reactions
    pub key: String,
    /// Label shown to contributors and in summaries
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Core aspects cannot be renamed or deleted
    #[serde(default)]
    pub core: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl AspectDefinition {
    pub fn core<S: Into<String>>(key: S, label: S, description: S) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: Some(description.into()),
            core: true,
            enabled: true,
        }
    }
}

/// Survey shown to contributors for one scope
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SurveyConfig {
    #[serde(default = "default_survey_name")]
    pub name: String,
    #[serde(default)]
    pub scale: ScoreScale,
    #[serde(default = "default_aspects")]
    pub aspects: Vec<AspectDefinition>,
}

fn default_survey_name() -> String {
    "Workflow survey".to_string()
}

fn default_aspects() -> Vec<AspectDefinition> {
    vec![
        AspectDefinition::core("instructions", "Instructions", "Clarity of the task guidelines"),
        AspectDefinition::core("reviewer", "Reviewer", "Fairness and speed of review decisions"),
        AspectDefinition::core("tool", "Tool performance", "Speed and stability of the tool"),
        AspectDefinition::core("ui", "UI / Layout", "Ease of use of the task interface"),
    ]
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            name: default_survey_name(),
            scale: ScoreScale::default(),
            aspects: default_aspects(),
        }
    }
}

impl SurveyConfig {
    /// Labels of enabled aspects in declared order
    pub fn declared_aspects(&self) -> Vec<String> {
        self.aspects
            .iter()
            .filter(|aspect| aspect.enabled)
            .map(|aspect| aspect.label.clone())
            .collect()
    }

    /// Display label for a stored reaction key; unknown keys pass through
    pub fn label_for(&self, key: &str) -> String {
        self.aspects
            .iter()
            .find(|aspect| aspect.key == key)
            .map(|aspect| aspect.label.clone())
            .unwrap_or_else(|| key.to_string())
    }

    pub fn aspect(&self, key: &str) -> Option<&AspectDefinition> {
        self.aspects.iter().find(|aspect| aspect.key == key)
    }

    /// Add an enabled extra aspect and return its derived key
    pub fn add_aspect(&mut self, label: &str, description: Option<&str>) -> Result<String> {
        let label = label.trim();
        if label.is_empty() {
            return Err(FeedbackError::aspect("Aspect label cannot be empty"));
        }

        let key = aspect_key(label);
        if key.is_empty() {
            return Err(FeedbackError::aspect(format!(
                "Aspect label '{}' has no usable characters",
                label
            )));
        }
        self.ensure_unique(&key, label, None)?;

        self.aspects.push(AspectDefinition {
            key: key.clone(),
            label: label.to_string(),
            description: description.map(str::to_string),
            core: false,
            enabled: true,
        });
        Ok(key)
    }

    /// Rename an extra aspect; its key stays stable
    pub fn rename_aspect(&mut self, key: &str, label: &str) -> Result<()> {
        let label = label.trim();
        if label.is_empty() {
            return Err(FeedbackError::aspect("Aspect label cannot be empty"));
        }
        self.ensure_unique("", label, Some(key))?;

        let aspect = self.aspect_mut(key)?;
        if aspect.core {
            return Err(FeedbackError::aspect(format!(
                "Core aspect '{}' cannot be renamed",
                aspect.label
            )));
        }
        aspect.label = label.to_string();
        Ok(())
    }

    pub fn set_enabled(&mut self, key: &str, enabled: bool) -> Result<()> {
        self.aspect_mut(key)?.enabled = enabled;
        Ok(())
    }

    /// Delete an extra aspect
    pub fn remove_aspect(&mut self, key: &str) -> Result<AspectDefinition> {
        let index = self
            .aspects
            .iter()
            .position(|aspect| aspect.key == key)
            .ok_or_else(|| FeedbackError::aspect(format!("Unknown aspect '{}'", key)))?;

        if self.aspects[index].core {
            return Err(FeedbackError::aspect(format!(
                "Core aspect '{}' cannot be deleted, only disabled",
                self.aspects[index].label
            )));
        }
        Ok(self.aspects.remove(index))
    }

    fn aspect_mut(&mut self, key: &str) -> Result<&mut AspectDefinition> {
        self.aspects
            .iter_mut()
            .find(|aspect| aspect.key == key)
            .ok_or_else(|| FeedbackError::aspect(format!("Unknown aspect '{}'", key)))
    }

    fn ensure_unique(&self, key: &str, label: &str, skip_key: Option<&str>) -> Result<()> {
        for aspect in &self.aspects {
            if Some(aspect.key.as_str()) == skip_key {
                continue;
            }
            if aspect.key == key || aspect.label.eq_ignore_ascii_case(label) {
                return Err(FeedbackError::aspect(format!(
                    "Aspect '{}' already exists",
                    label
                )));
            }
        }
        Ok(())
    }
}

/// Lowercase the label and collapse every run of non-alphanumerics into `_`
fn aspect_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut pending_separator = false;

    for ch in label.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    key
}
