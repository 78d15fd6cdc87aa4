use crate::cli::{OutputFormat, ViewArgs};
use crate::data;
use crate::error::Result;
use crate::ui;
use feedback::{CliRenderer, FeedbackView, JsonRenderer, OutputRenderer};
use tracing::debug;

/// How much of the dashboard to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Summary,
    Full,
}

pub fn execute(args: ViewArgs, select: Option<String>, layout: Layout) -> Result<()> {
    let catalog = data::load(&args.data)?;
    let store = data::resolve_store(&catalog, &args)?;

    let mut view = FeedbackView::new(store)
        .with_criteria(data::build_criteria(&args, store)?)
        .with_search(args.search.clone());
    if let Some(id) = select {
        view.select(id);
    }

    let snapshot = view.snapshot();
    debug!(
        rows = snapshot.rows.len(),
        selected = snapshot.selected.as_ref().map(|detail| detail.id.as_str()),
        "built snapshot"
    );

    match (args.format, layout) {
        (OutputFormat::Json, Layout::Summary) => {
            println!("{}", serde_json::to_string_pretty(&snapshot.summary)?);
        }
        (OutputFormat::Json, Layout::Full) => {
            println!("{}", JsonRenderer::new().try_render(&snapshot)?);
        }
        (OutputFormat::Table, layout) => {
            if !view.criteria().is_pass_through() || !view.search().is_empty() {
                ui::info_message("Filters active: figures cover matching responses only");
            }
            let renderer = match layout {
                Layout::Summary => CliRenderer::summary(),
                Layout::Full => CliRenderer::full(),
            };
            println!("{}", renderer.render(&snapshot));
        }
    }
    Ok(())
}
