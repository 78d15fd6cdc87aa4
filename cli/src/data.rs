use crate::cli::{CommentArg, ViewArgs, WindowArg};
use crate::error::{CliError, Result, ResultExt};
use feedback::config::load_responses_csv;
use feedback::{
    load_catalog, CommentMode, FeedbackError, FilterCriteria, RecencyWindow, ResponseStore,
    Scope, ScopeCatalog, SurveyConfig,
};
use std::path::Path;
use tracing::{debug, info};

/// Load a catalog from a TOML data file, or a single platform scope from a CSV file
pub fn load(data_path: &str) -> Result<ScopeCatalog> {
    let path = Path::new(data_path);
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let catalog = if is_csv {
        let responses = load_responses_csv(path)?;
        let store = ResponseStore::from_survey(Scope::Platform, &SurveyConfig::default(), responses)?;
        ScopeCatalog::new(vec![store])?
    } else {
        load_catalog(path)?
    };

    info!(path = %path.display(), scopes = catalog.stores().len(), "loaded feedback data");
    Ok(catalog)
}

/// Pick the store named by the scope flags, defaulting to the first workflow
pub fn resolve_store<'a>(catalog: &'a ScopeCatalog, args: &ViewArgs) -> Result<&'a ResponseStore> {
    let store = if args.platform {
        catalog
            .platform()
            .ok_or_else(|| FeedbackError::unknown_scope("platform"))?
    } else if let Some(project) = args.project.as_deref() {
        catalog
            .resolve_workflow(project, args.workflow.as_deref())
            .ok_or_else(|| FeedbackError::unknown_scope(project))
            .with_context(|| format!("Project '{project}' has no workflows"))?
    } else if let Some(workflow) = args.workflow.as_deref() {
        catalog.get(workflow)?
    } else {
        catalog
            .default_store()
            .ok_or_else(|| CliError::Other("The data file defines no scopes".to_string()))?
    };

    debug!(scope = store.scope().id(), "resolved scope");
    Ok(store)
}

/// Criteria from the filter flags; aspect names resolve against the store's
/// survey so both keys (`tool`) and labels (`Tool performance`) work
pub fn build_criteria(args: &ViewArgs, store: &ResponseStore) -> Result<FilterCriteria> {
    let mut criteria = FilterCriteria::new()
        .with_scores(args.score.iter().copied())
        .with_comment(comment_mode(args.comment))
        .with_window(recency_window(args.window));

    for aspect in &args.aspect_up {
        criteria = criteria.require_up(resolve_aspect(store, aspect)?);
    }
    for aspect in &args.aspect_down {
        criteria = criteria.require_down(resolve_aspect(store, aspect)?);
    }
    Ok(criteria)
}

fn resolve_aspect(store: &ResponseStore, name: &str) -> Result<String> {
    store.resolve_aspect(name).ok_or_else(|| {
        CliError::Other(format!(
            "Aspect '{}' is not part of the {} survey. Known aspects: {}",
            name,
            store.scope(),
            store.declared_aspects().join(", ")
        ))
    })
}

fn comment_mode(arg: CommentArg) -> CommentMode {
    match arg {
        CommentArg::Any => CommentMode::Any,
        CommentArg::MustHave => CommentMode::MustHave,
        CommentArg::MustNotHave => CommentMode::MustNotHave,
    }
}

fn recency_window(arg: WindowArg) -> RecencyWindow {
    match arg {
        WindowArg::All => RecencyWindow::All,
        WindowArg::Days7 => RecencyWindow::Last7d,
        WindowArg::Days30 => RecencyWindow::Last30d,
        WindowArg::Days90 => RecencyWindow::Last90d,
    }
}
