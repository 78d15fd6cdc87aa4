//! Summary tiles and per-aspect reaction breakdown
//!
//! Everything here is a pure function of the responses passed in. Callers are
//! expected to pass the already filtered and searched rows so the summary
//! always describes exactly what the list shows.

use crate::store::ResponseStore;
use crate::survey::ScoreScale;
use crate::types::{FeedbackResponse, Reaction};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Marker shown in place of an average when no response carries a score
pub const NO_DATA: &str = "—";

/// Average headline score, or the explicit absence of one
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AverageScore {
    NoData,
    Value { value: f64, scale_max: u32 },
}

impl AverageScore {
    pub fn value(&self) -> Option<f64> {
        match self {
            AverageScore::NoData => None,
            AverageScore::Value { value, .. } => Some(*value),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, AverageScore::NoData)
    }

    /// Traffic-light tone for the average, judged on a 5-point scale
    pub fn tone(&self) -> Option<ScoreTone> {
        match self {
            AverageScore::NoData => None,
            AverageScore::Value { value, scale_max } => {
                Some(ScoreTone::for_five_point(value / f64::from(*scale_max) * 5.0))
            }
        }
    }
}

impl fmt::Display for AverageScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageScore::NoData => f.write_str(NO_DATA),
            AverageScore::Value { value, scale_max } => {
                // Ties round up, so 3.125 shows as 3.13
                let shown = round_half_up(value * 100.0) / 100.0;
                write!(f, "{:.2} / {}", shown, scale_max)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTone {
    Good,
    Ok,
    Poor,
}

impl ScoreTone {
    pub fn for_five_point(score: f64) -> Self {
        if score >= 4.3 {
            ScoreTone::Good
        } else if score >= 3.5 {
            ScoreTone::Ok
        } else {
            ScoreTone::Poor
        }
    }

    pub fn for_score(score: f64, scale: ScoreScale) -> Self {
        Self::for_five_point(scale.to_five_point(score))
    }
}

/// Reaction counts for one aspect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AspectRow {
    pub aspect: String,
    pub up: usize,
    pub down: usize,
    pub total: usize,
    pub up_pct: u32,
    pub down_pct: u32,
}

impl AspectRow {
    fn from_counts(aspect: String, up: usize, down: usize) -> Self {
        let total = up + down;
        let up_pct = if total == 0 {
            0
        } else {
            round_half_up(100.0 * up as f64 / total as f64) as u32
        };
        let down_pct = if total == 0 { 0 } else { 100 - up_pct };

        Self {
            aspect,
            up,
            down,
            total,
            up_pct,
            down_pct,
        }
    }
}

/// Tiles plus aspect breakdown for one set of responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackSummary {
    pub total_answered: usize,
    pub average: AverageScore,
    pub aspects: Vec<AspectRow>,
}

/// How many contributors saw the survey at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExposureSummary {
    pub shown: usize,
    pub not_shown: usize,
}

/// Computes summaries for one survey scale and aspect ordering
#[derive(Debug, Clone)]
pub struct Aggregator {
    scale_max: u32,
    declared_aspects: Vec<String>,
}

impl Aggregator {
    pub fn new(scale: ScoreScale) -> Self {
        Self {
            scale_max: scale.max,
            declared_aspects: Vec::new(),
        }
    }

    /// Aggregator configured with the store's scale and declared aspects
    pub fn for_store(store: &ResponseStore) -> Self {
        Self::new(store.scale()).with_declared_aspects(store.declared_aspects().to_vec())
    }

    /// Aspect names that sort first, even when no response mentions them
    #[must_use]
    pub fn with_declared_aspects<I, S>(mut self, aspects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_aspects = aspects.into_iter().map(Into::into).collect();
        self
    }

    pub fn aggregate<'a, I>(&self, responses: I) -> FeedbackSummary
    where
        I: IntoIterator<Item = &'a FeedbackResponse>,
    {
        let responses: Vec<&FeedbackResponse> = responses.into_iter().collect();

        let summary = FeedbackSummary {
            total_answered: responses.len(),
            average: self.average_score(responses.iter().copied()),
            aspects: self.aspect_breakdown(responses.iter().copied()),
        };

        debug!(
            total = summary.total_answered,
            aspects = summary.aspects.len(),
            average = %summary.average,
            "aggregated feedback summary"
        );
        summary
    }

    /// Mean over responses that carry a score; unscored responses are skipped entirely
    pub fn average_score<'a, I>(&self, responses: I) -> AverageScore
    where
        I: IntoIterator<Item = &'a FeedbackResponse>,
    {
        let (sum, count) = responses
            .into_iter()
            .filter_map(|response| response.score)
            .fold((0.0_f64, 0_usize), |(sum, count), score| (sum + score, count + 1));

        if count == 0 {
            AverageScore::NoData
        } else {
            AverageScore::Value {
                value: sum / count as f64,
                scale_max: self.scale_max,
            }
        }
    }

    /// Per-aspect rows with data, declared aspects first, then first-seen order
    pub fn aspect_breakdown<'a, I>(&self, responses: I) -> Vec<AspectRow>
    where
        I: IntoIterator<Item = &'a FeedbackResponse>,
    {
        let mut counts: Vec<(String, usize, usize)> = self
            .declared_aspects
            .iter()
            .map(|aspect| (aspect.clone(), 0, 0))
            .collect();

        for response in responses {
            for (aspect, reaction) in response.reactions.iter() {
                let index = match counts.iter().position(|(name, _, _)| name == aspect) {
                    Some(index) => index,
                    None => {
                        counts.push((aspect.to_string(), 0, 0));
                        counts.len() - 1
                    }
                };
                match reaction {
                    Reaction::Up => counts[index].1 += 1,
                    Reaction::Down => counts[index].2 += 1,
                    Reaction::Absent => {}
                }
            }
        }

        counts
            .into_iter()
            .map(|(aspect, up, down)| AspectRow::from_counts(aspect, up, down))
            .filter(|row| row.total > 0)
            .collect()
    }
}

/// Count shown versus never-shown surveys
pub fn exposure<'a, I>(responses: I) -> ExposureSummary
where
    I: IntoIterator<Item = &'a FeedbackResponse>,
{
    responses
        .into_iter()
        .fold(ExposureSummary::default(), |mut acc, response| {
            if response.status.was_shown() {
                acc.shown += 1;
            } else {
                acc.not_shown += 1;
            }
            acc
        })
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
