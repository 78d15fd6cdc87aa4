use super::table::{tone_cell, TableBuilder, TableStyle};
use super::OutputRenderer;
use crate::aggregation::{FeedbackSummary, ScoreTone, NO_DATA};
use crate::selection::ResponseDetail;
use crate::types::{FeedbackResponse, Reaction};
use crate::view::ViewSnapshot;
use comfy_table::{Cell, Color};

const EMPTY_LIST: &str = "No answered surveys match your search.";
const EMPTY_ASPECTS: &str = "No aspect reactions yet.";

/// Terminal renderer built on comfy-table
#[derive(Debug, Clone)]
pub struct CliRenderer {
    show_list: bool,
    show_detail: bool,
}

impl CliRenderer {
    /// Tiles and aspect breakdown only
    pub fn summary() -> Self {
        Self {
            show_list: false,
            show_detail: false,
        }
    }

    /// Tiles, breakdown, response list and the selected detail card
    pub fn full() -> Self {
        Self {
            show_list: true,
            show_detail: true,
        }
    }

    fn render_tiles(&self, summary: &FeedbackSummary) -> String {
        let mut builder = TableBuilder::with_style(TableStyle::Grid);
        builder.headers(vec!["Total Answered", "Avg Score"]);
        builder.styled_row(vec![
            Cell::new(summary.total_answered.to_string()),
            tone_cell(summary.average.to_string(), summary.average.tone().map(tone_color)),
        ]);
        builder.build()
    }

    fn render_aspects(&self, summary: &FeedbackSummary) -> String {
        if summary.aspects.is_empty() {
            return EMPTY_ASPECTS.to_string();
        }

        let mut builder = TableBuilder::with_style(TableStyle::Grid);
        builder.headers(vec!["Aspect", "Answered", "Up", "Down"]);
        for row in &summary.aspects {
            builder.row(vec![
                row.aspect.clone(),
                row.total.to_string(),
                format!("{}% ({})", row.up_pct, row.up),
                format!("{}% ({})", row.down_pct, row.down),
            ]);
        }
        builder.align_right(1).align_right(2).align_right(3);
        builder.build()
    }

    fn render_list(&self, rows: &[&FeedbackResponse], selected: Option<&str>) -> String {
        if rows.is_empty() {
            return EMPTY_LIST.to_string();
        }

        let mut builder = TableBuilder::with_style(TableStyle::List);
        builder.headers(vec!["", "Contributor", "Score", "Comment", "Seen"]);
        for row in rows {
            let marker = if selected == Some(row.id.as_str()) { "▶" } else { "" };
            let seen = [row.device(), row.updated_at()]
                .iter()
                .flatten()
                .copied()
                .collect::<Vec<_>>()
                .join(" • ");
            builder.row(vec![
                marker.to_string(),
                row.responder_id.clone(),
                row.score.map(|score| format!("{:.1}", score)).unwrap_or_else(|| NO_DATA.to_string()),
                row.comment.clone().unwrap_or_default(),
                seen,
            ]);
        }
        builder.build()
    }

    fn render_detail(&self, detail: &ResponseDetail) -> String {
        let mut builder = TableBuilder::with_style(TableStyle::Grid);
        builder.headers(vec![detail.responder_id.clone(), String::new()]);

        builder.styled_row(vec![
            Cell::new("Score"),
            tone_cell(
                detail.score.map(|score| format!("{:.1}", score)).unwrap_or_else(|| NO_DATA.to_string()),
                detail.tone.map(tone_color),
            ),
        ]);

        if let (Some(project), Some(workflow)) = (&detail.project, &detail.workflow) {
            builder.row(vec!["Scope".to_string(), format!("{} • {}", project, workflow)]);
        }
        if let Some(tasks) = detail.tasks_done {
            builder.row(vec!["Tasks done".to_string(), tasks.to_string()]);
        }
        if let Some(task) = detail.asked_at_task {
            builder.row(vec!["Asked at".to_string(), format!("task {}", task)]);
        }
        if let Some(device) = &detail.device {
            builder.row(vec!["Device".to_string(), device.clone()]);
        }
        if let Some(updated_at) = &detail.updated_at {
            builder.row(vec!["Updated".to_string(), updated_at.clone()]);
        }

        for (aspect, reaction) in &detail.reactions {
            let (text, color) = match reaction {
                Reaction::Up => ("👍 up", Color::Green),
                Reaction::Down => ("👎 down", Color::Red),
                Reaction::Absent => continue,
            };
            builder.styled_row(vec![Cell::new(aspect), Cell::new(text).fg(color)]);
        }

        builder.row(vec![
            "Comment".to_string(),
            detail.comment.clone().unwrap_or_else(|| NO_DATA.to_string()),
        ]);
        builder.build()
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::full()
    }
}

impl OutputRenderer for CliRenderer {
    fn render(&self, snapshot: &ViewSnapshot<'_>) -> String {
        let mut sections = vec![
            format!("Feedback for {}", snapshot.scope),
            self.render_tiles(&snapshot.summary),
            "Aspect reactions (answered only)".to_string(),
            self.render_aspects(&snapshot.summary),
        ];

        if self.show_list {
            let selected = snapshot.selected.as_ref().map(|detail| detail.id.as_str());
            sections.push(self.render_list(&snapshot.rows, selected));
            sections.push(format!(
                "Shown: {} • Not shown: {}",
                snapshot.exposure.shown, snapshot.exposure.not_shown
            ));
        }

        if self.show_detail {
            match &snapshot.selected {
                Some(detail) => sections.push(self.render_detail(detail)),
                None => sections.push("Select a contributor to view their survey.".to_string()),
            }
        }

        sections.join("\n\n")
    }
}

fn tone_color(tone: ScoreTone) -> Color {
    match tone {
        ScoreTone::Good => Color::Green,
        ScoreTone::Ok => Color::Yellow,
        ScoreTone::Poor => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ResponseStore, Scope};
    use crate::survey::ScoreScale;
    use crate::view::FeedbackView;

    fn store() -> ResponseStore {
        ResponseStore::new(
            Scope::workflow("wf_vision", "Vision QA", "QC • Step 1"),
            ScoreScale::default(),
            vec![FeedbackResponse::new("vis-1", "D-3001")
                .with_score(2.0)
                .with_comment("Tool lag")
                .with_reaction("Tool performance", Reaction::Down)],
        )
        .unwrap()
    }

    #[test]
    fn test_full_render_includes_all_sections() {
        let store = store();
        let snapshot = FeedbackView::new(&store).snapshot();
        let output = CliRenderer::full().render(&snapshot);

        assert!(output.contains("Vision QA • QC • Step 1"));
        assert!(output.contains("2.00 / 5"));
        assert!(output.contains("Tool performance"));
        assert!(output.contains("D-3001"));
        assert!(output.contains("Shown: 1"));
    }

    #[test]
    fn test_summary_render_on_empty_filter() {
        let store = store();
        let snapshot = FeedbackView::new(&store).with_search("zzz").snapshot();
        let output = CliRenderer::summary().render(&snapshot);

        assert!(output.contains("—"));
        assert!(output.contains(EMPTY_ASPECTS));
        assert!(!output.contains("D-3001"));
    }
}
