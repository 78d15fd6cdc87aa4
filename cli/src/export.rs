use crate::cli::ViewArgs;
use crate::data;
use crate::error::{Result, ResultExt};
use crate::ui;
use feedback::export::export_csv_file;
use feedback::FeedbackView;

pub fn execute(args: ViewArgs, output: String) -> Result<()> {
    let catalog = data::load(&args.data)?;
    let store = data::resolve_store(&catalog, &args)?;

    let view = FeedbackView::new(store)
        .with_criteria(data::build_criteria(&args, store)?)
        .with_search(args.search.clone());
    let rows = view.rows();

    ui::status_message(&format!("Exporting {} responses from {}", rows.len(), store.scope()));
    let written = export_csv_file(&output, &rows, store.declared_aspects())
        .with_context(|| format!("Failed to export to {output}"))?;

    ui::success_message(&format!("Wrote {written} responses to {output}"));
    Ok(())
}
