use super::OutputRenderer;
use crate::view::ViewSnapshot;

/// Pretty-printed JSON of the whole snapshot
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn try_render(&self, snapshot: &ViewSnapshot<'_>) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(snapshot)?)
    }
}

impl OutputRenderer for JsonRenderer {
    fn render(&self, snapshot: &ViewSnapshot<'_>) -> String {
        self.try_render(snapshot)
            .unwrap_or_else(|e| error_document(&e.to_string()))
    }
}

fn error_document(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ResponseStore, Scope};
    use crate::survey::ScoreScale;
    use crate::types::FeedbackResponse;
    use crate::view::FeedbackView;

    #[test]
    fn test_json_snapshot_shape() {
        let store = ResponseStore::new(
            Scope::Platform,
            ScoreScale::default(),
            vec![FeedbackResponse::new("fts-1", "A-1023").with_score(4.0)],
        )
        .unwrap();
        let snapshot = FeedbackView::new(&store).snapshot();

        let value: serde_json::Value =
            serde_json::from_str(&JsonRenderer::new().render(&snapshot)).unwrap();
        assert_eq!(value["summary"]["total_answered"], 1);
        assert_eq!(value["summary"]["average"]["kind"], "value");
        assert_eq!(value["scope"]["kind"], "platform");
        assert_eq!(value["selected"]["id"], "fts-1");
    }

    #[test]
    fn test_error_document_escapes_message() {
        let document = error_document(r#"field "score" is "NaN""#);
        let value: serde_json::Value = serde_json::from_str(&document).unwrap();
        assert_eq!(value["error"], r#"field "score" is "NaN""#);
    }
}
