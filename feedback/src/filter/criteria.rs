use crate::error::{FeedbackError, Result};
use crate::types::Reaction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Constraint on whether a response carries a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentMode {
    #[default]
    Any,
    MustHave,
    MustNotHave,
}

impl FromStr for CommentMode {
    type Err = FeedbackError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "any" => Ok(CommentMode::Any),
            "must_have" | "with" => Ok(CommentMode::MustHave),
            "must_not_have" | "without" => Ok(CommentMode::MustNotHave),
            other => Err(FeedbackError::invalid_config(format!(
                "Unknown comment mode '{}'. Expected any, must-have or must-not-have",
                other
            ))),
        }
    }
}

/// Which reactions are required for one aspect.
///
/// Both flags together mean "has some opinion", not "has both at once".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct AspectConstraint {
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
}

impl AspectConstraint {
    pub fn is_active(&self) -> bool {
        self.up || self.down
    }

    pub fn admits(&self, reaction: Reaction) -> bool {
        match (self.up, self.down) {
            (true, true) => reaction.is_present(),
            (true, false) => reaction == Reaction::Up,
            (false, true) => reaction == Reaction::Down,
            (false, false) => true,
        }
    }
}

/// Coarse recency window resolved against relative-time labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyWindow {
    #[default]
    All,
    Last7d,
    Last30d,
    Last90d,
}

impl RecencyWindow {
    /// Upper bound in hours, `None` for no bound
    pub fn hours(self) -> Option<u64> {
        match self {
            RecencyWindow::All => None,
            RecencyWindow::Last7d => Some(7 * 24),
            RecencyWindow::Last30d => Some(30 * 24),
            RecencyWindow::Last90d => Some(90 * 24),
        }
    }
}

impl FromStr for RecencyWindow {
    type Err = FeedbackError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RecencyWindow::All),
            "7d" | "last7d" => Ok(RecencyWindow::Last7d),
            "30d" | "last30d" => Ok(RecencyWindow::Last30d),
            "90d" | "last90d" => Ok(RecencyWindow::Last90d),
            other => Err(FeedbackError::invalid_config(format!(
                "Unknown recency window '{}'. Expected all, 7d, 30d or 90d",
                other
            ))),
        }
    }
}

impl fmt::Display for RecencyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecencyWindow::All => "all",
            RecencyWindow::Last7d => "7d",
            RecencyWindow::Last30d => "30d",
            RecencyWindow::Last90d => "90d",
        };
        f.write_str(label)
    }
}

/// User-editable predicate set; the default passes every response
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct FilterCriteria {
    /// Accepted rounded scores; empty means no constraint
    #[serde(default)]
    pub scores: BTreeSet<i64>,
    #[serde(default)]
    pub comment: CommentMode,
    #[serde(default)]
    pub aspects: BTreeMap<String, AspectConstraint>,
    #[serde(default)]
    pub window: RecencyWindow,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scores<I: IntoIterator<Item = i64>>(mut self, scores: I) -> Self {
        self.scores.extend(scores);
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: CommentMode) -> Self {
        self.comment = comment;
        self
    }

    #[must_use]
    pub fn require_up<S: Into<String>>(mut self, aspect: S) -> Self {
        self.aspects.entry(aspect.into()).or_default().up = true;
        self
    }

    #[must_use]
    pub fn require_down<S: Into<String>>(mut self, aspect: S) -> Self {
        self.aspects.entry(aspect.into()).or_default().down = true;
        self
    }

    #[must_use]
    pub fn with_window(mut self, window: RecencyWindow) -> Self {
        self.window = window;
        self
    }

    /// Toggle one flag of an aspect constraint, as a checkbox would
    pub fn toggle_aspect(&mut self, aspect: &str, reaction: Reaction) {
        let constraint = self.aspects.entry(aspect.to_string()).or_default();
        match reaction {
            Reaction::Up => constraint.up = !constraint.up,
            Reaction::Down => constraint.down = !constraint.down,
            Reaction::Absent => {}
        }
        if !constraint.is_active() {
            self.aspects.remove(aspect);
        }
    }

    /// True when no criterion narrows anything
    pub fn is_pass_through(&self) -> bool {
        self.scores.is_empty()
            && self.comment == CommentMode::Any
            && !self.aspects.values().any(AspectConstraint::is_active)
            && self.window == RecencyWindow::All
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_constraint_both_flags_means_any_opinion() {
        let both = AspectConstraint { up: true, down: true };
        assert!(both.admits(Reaction::Up));
        assert!(both.admits(Reaction::Down));
        assert!(!both.admits(Reaction::Absent));
    }

    #[test]
    fn test_aspect_constraint_single_flag() {
        let up = AspectConstraint { up: true, down: false };
        assert!(up.admits(Reaction::Up));
        assert!(!up.admits(Reaction::Down));
        assert!(!up.admits(Reaction::Absent));
        assert!(AspectConstraint::default().admits(Reaction::Absent));
    }

    #[test]
    fn test_window_parsing_and_hours() {
        assert_eq!("7d".parse::<RecencyWindow>().unwrap().hours(), Some(168));
        assert_eq!("last30d".parse::<RecencyWindow>().unwrap().hours(), Some(720));
        assert_eq!("90D".parse::<RecencyWindow>().unwrap().hours(), Some(2160));
        assert_eq!(RecencyWindow::All.hours(), None);
        assert!("1y".parse::<RecencyWindow>().is_err());
    }

    #[test]
    fn test_comment_mode_parsing() {
        assert_eq!("must-have".parse::<CommentMode>().unwrap(), CommentMode::MustHave);
        assert_eq!("must_not_have".parse::<CommentMode>().unwrap(), CommentMode::MustNotHave);
        assert!("sometimes".parse::<CommentMode>().is_err());
    }

    #[test]
    fn test_toggle_aspect_clears_inactive_entries() {
        let mut criteria = FilterCriteria::new();
        criteria.toggle_aspect("Reviewer", Reaction::Down);
        assert!(!criteria.is_pass_through());

        criteria.toggle_aspect("Reviewer", Reaction::Down);
        assert!(criteria.aspects.is_empty());
        assert!(criteria.is_pass_through());
    }
}
