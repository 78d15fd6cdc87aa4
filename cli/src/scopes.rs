use crate::cli::OutputFormat;
use crate::data;
use crate::error::Result;
use crate::ui;
use feedback::{ResponseStore, Scope, ScopeCatalog};
use serde_json::json;

pub fn execute(data_path: String, format: OutputFormat) -> Result<()> {
    let catalog = data::load(&data_path)?;

    match format {
        OutputFormat::Table => print_table(&catalog),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&to_json(&catalog))?),
    }
    Ok(())
}

fn describe(store: &ResponseStore) -> String {
    let label = match store.scope() {
        Scope::Workflow { workflow, .. } => workflow.as_str(),
        Scope::Platform => "Platform",
    };
    format!(
        "{} [{}] {} answered / {} total",
        label,
        store.scope().id(),
        store.answered().count(),
        store.len()
    )
}

fn print_table(catalog: &ScopeCatalog) {
    for project in catalog.projects() {
        ui::section_header(project);
        for (index, store) in catalog.workflows_for(project).into_iter().enumerate() {
            ui::step_message(index + 1, &describe(store));
        }
    }

    if let Some(platform) = catalog.platform() {
        ui::section_header("Platform");
        ui::step_message(1, &describe(platform));
    }
}

fn to_json(catalog: &ScopeCatalog) -> serde_json::Value {
    let entry = |store: &ResponseStore| {
        json!({
            "scope": store.scope(),
            "answered": store.answered().count(),
            "total": store.len(),
            "aspects": store.declared_aspects(),
        })
    };

    let projects: Vec<serde_json::Value> = catalog
        .projects()
        .into_iter()
        .map(|project| {
            json!({
                "project": project,
                "workflows": catalog.workflows_for(project).into_iter().map(entry).collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({
        "projects": projects,
        "platform": catalog.platform().map(entry),
    })
}
