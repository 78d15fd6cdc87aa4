use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Thumbs reaction a contributor gave to one aspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Up,
    Down,
    #[default]
    Absent,
}

impl Reaction {
    /// Whether the contributor expressed any opinion
    pub fn is_present(self) -> bool {
        !matches!(self, Reaction::Absent)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Reaction::Up => "up",
            Reaction::Down => "down",
            Reaction::Absent => "",
        }
    }
}

/// Ordered aspect → reaction mapping.
///
/// Aspects keep the order in which they were first inserted. Looking up an
/// aspect that was never recorded yields [`Reaction::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reactions {
    entries: Vec<(String, Reaction)>,
}

impl Reactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with<S: Into<String>>(mut self, aspect: S, reaction: Reaction) -> Self {
        self.insert(aspect, reaction);
        self
    }

    /// Record a reaction, replacing any earlier value for the same aspect in place
    pub fn insert<S: Into<String>>(&mut self, aspect: S, reaction: Reaction) {
        let aspect = aspect.into();
        match self.entries.iter_mut().find(|(name, _)| *name == aspect) {
            Some(entry) => entry.1 = reaction,
            None => self.entries.push((aspect, reaction)),
        }
    }

    pub fn get(&self, aspect: &str) -> Reaction {
        self.entries
            .iter()
            .find(|(name, _)| name == aspect)
            .map(|(_, reaction)| *reaction)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Reaction)> {
        self.entries.iter().map(|(name, reaction)| (name.as_str(), *reaction))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite every aspect name through `relabel`, keeping order.
    /// Two keys that map to the same label collapse into one entry (last wins).
    pub fn relabel<F>(&self, relabel: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let mut out = Reactions::new();
        for (name, reaction) in self.iter() {
            out.insert(relabel(name), reaction);
        }
        out
    }
}

impl<S: Into<String>> FromIterator<(S, Reaction)> for Reactions {
    fn from_iter<I: IntoIterator<Item = (S, Reaction)>>(iter: I) -> Self {
        let mut reactions = Reactions::new();
        for (aspect, reaction) in iter {
            reactions.insert(aspect, reaction);
        }
        reactions
    }
}

impl Serialize for Reactions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, reaction) in &self.entries {
            map.serialize_entry(name, reaction)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Reactions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ReactionsVisitor;

        impl<'de> Visitor<'de> for ReactionsVisitor {
            type Value = Reactions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of aspect names to \"up\", \"down\" or \"absent\"")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Reactions, A::Error> {
                let mut reactions = Reactions::new();
                while let Some((aspect, reaction)) = access.next_entry::<String, Reaction>()? {
                    reactions.insert(aspect, reaction);
                }
                Ok(reactions)
            }
        }

        deserializer.deserialize_map(ReactionsVisitor)
    }
}

/// Whether a survey was shown to the contributor and answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStatus {
    #[default]
    Answered,
    /// Shown but dismissed without answering
    Shown,
    NotShown,
}

impl SurveyStatus {
    pub fn was_shown(self) -> bool {
        !matches!(self, SurveyStatus::NotShown)
    }
}

/// Descriptive metadata attached to a response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Relative time label such as "2h ago" or "yesterday"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,
}

impl ResponseContext {
    #[must_use]
    pub fn with_device<S: Into<String>>(mut self, device: S) -> Self {
        self.device = Some(device.into());
        self
    }

    #[must_use]
    pub fn with_updated_at<S: Into<String>>(mut self, label: S) -> Self {
        self.updated_at = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_scope<S: Into<String>>(mut self, project: S, workflow: S) -> Self {
        self.project = Some(project.into());
        self.workflow = Some(workflow.into());
        self
    }
}

/// One contributor's answer to a survey instance
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedbackResponse {
    pub id: String,
    pub responder_id: String,
    /// Headline score; `None` when the survey was not completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default)]
    pub reactions: Reactions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ResponseContext>,
    #[serde(default)]
    pub status: SurveyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_done: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asked_at_task: Option<u32>,
}

impl FeedbackResponse {
    pub fn new<S: Into<String>>(id: S, responder_id: S) -> Self {
        Self {
            id: id.into(),
            responder_id: responder_id.into(),
            score: None,
            reactions: Reactions::new(),
            comment: None,
            context: None,
            status: SurveyStatus::Answered,
            tasks_done: None,
            asked_at_task: None,
        }
    }

    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    #[must_use]
    pub fn with_reaction<S: Into<String>>(mut self, aspect: S, reaction: Reaction) -> Self {
        self.reactions.insert(aspect, reaction);
        self
    }

    #[must_use]
    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: ResponseContext) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: SurveyStatus) -> Self {
        self.status = status;
        self
    }

    /// True when the comment has visible text
    pub fn has_comment(&self) -> bool {
        self.comment
            .as_deref()
            .map(|comment| !comment.trim().is_empty())
            .unwrap_or(false)
    }

    /// Score rounded to the nearest whole point, halves rounding up
    pub fn rounded_score(&self) -> Option<i64> {
        self.score.map(|score| (score + 0.5).floor() as i64)
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.context.as_ref().and_then(|ctx| ctx.updated_at.as_deref())
    }

    pub fn device(&self) -> Option<&str> {
        self.context.as_ref().and_then(|ctx| ctx.device.as_deref())
    }

    pub fn is_answered(&self) -> bool {
        self.status == SurveyStatus::Answered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_aspect_reads_as_absent() {
        let reactions = Reactions::new().with("Instructions", Reaction::Up);
        assert_eq!(reactions.get("Instructions"), Reaction::Up);
        assert_eq!(reactions.get("Reviewer"), Reaction::Absent);
    }

    #[test]
    fn test_insert_keeps_original_position() {
        let mut reactions = Reactions::new()
            .with("b", Reaction::Up)
            .with("a", Reaction::Down);
        reactions.insert("b", Reaction::Down);

        let names: Vec<&str> = reactions.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(reactions.get("b"), Reaction::Down);
    }

    #[test]
    fn test_reactions_deserialize_in_document_order() {
        let reactions: Reactions =
            serde_json::from_str(r#"{"zeta": "up", "alpha": "down", "mid": "absent"}"#).unwrap();
        let names: Vec<&str> = reactions.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(reactions.get("mid"), Reaction::Absent);
    }

    #[test]
    fn test_unknown_reaction_value_rejected() {
        let parsed: std::result::Result<Reactions, _> =
            serde_json::from_str(r#"{"ui": "meh"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_comment_presence_ignores_whitespace() {
        assert!(!FeedbackResponse::new("1", "u").has_comment());
        assert!(!FeedbackResponse::new("1", "u").with_comment("   ").has_comment());
        assert!(FeedbackResponse::new("1", "u").with_comment(" ok ").has_comment());
    }

    #[test]
    fn test_rounded_score() {
        assert_eq!(FeedbackResponse::new("1", "u").with_score(4.5).rounded_score(), Some(5));
        assert_eq!(FeedbackResponse::new("1", "u").with_score(4.4).rounded_score(), Some(4));
        assert_eq!(FeedbackResponse::new("1", "u").rounded_score(), None);
    }

    #[test]
    fn test_relabel_maps_keys() {
        let reactions = Reactions::new()
            .with("ui", Reaction::Up)
            .with("tool", Reaction::Down);
        let relabelled = reactions.relabel(|key| match key {
            "ui" => "UI / Layout".to_string(),
            other => other.to_string(),
        });
        assert_eq!(relabelled.get("UI / Layout"), Reaction::Up);
        assert_eq!(relabelled.get("tool"), Reaction::Down);
    }
}
