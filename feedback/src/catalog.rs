use crate::error::{FeedbackError, Result};
use crate::store::{ResponseStore, Scope};
use std::collections::HashSet;

/// All response stores loaded from one data source, keyed by scope
#[derive(Debug, Clone, Default)]
pub struct ScopeCatalog {
    stores: Vec<ResponseStore>,
}

impl ScopeCatalog {
    pub fn new(stores: Vec<ResponseStore>) -> Result<Self> {
        let mut seen = HashSet::new();
        for store in &stores {
            if !seen.insert(store.scope().id().to_string()) {
                return Err(FeedbackError::invalid_config(format!(
                    "Scope '{}' is defined more than once",
                    store.scope().id()
                )));
            }
        }
        Ok(Self { stores })
    }

    pub fn stores(&self) -> &[ResponseStore] {
        &self.stores
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Distinct project names in first-seen order
    pub fn projects(&self) -> Vec<&str> {
        let mut projects: Vec<&str> = Vec::new();
        for project in self.stores.iter().filter_map(|store| store.scope().project()) {
            if !projects.contains(&project) {
                projects.push(project);
            }
        }
        projects
    }

    pub fn workflows_for(&self, project: &str) -> Vec<&ResponseStore> {
        self.stores
            .iter()
            .filter(|store| store.scope().project() == Some(project))
            .collect()
    }

    /// The requested workflow when it belongs to `project`, otherwise the
    /// project's first workflow
    pub fn resolve_workflow(&self, project: &str, workflow_id: Option<&str>) -> Option<&ResponseStore> {
        let workflows = self.workflows_for(project);
        workflow_id
            .and_then(|id| workflows.iter().copied().find(|store| store.scope().id() == id))
            .or_else(|| workflows.first().copied())
    }

    pub fn platform(&self) -> Option<&ResponseStore> {
        self.stores
            .iter()
            .find(|store| matches!(store.scope(), Scope::Platform))
    }

    pub fn get(&self, scope_id: &str) -> Result<&ResponseStore> {
        self.stores
            .iter()
            .find(|store| store.scope().id() == scope_id)
            .ok_or_else(|| FeedbackError::unknown_scope(scope_id))
    }

    /// Store a dashboard opens on: first workflow, else the platform
    pub fn default_store(&self) -> Option<&ResponseStore> {
        self.projects()
            .first()
            .and_then(|project| self.resolve_workflow(project, None))
            .or_else(|| self.platform())
    }
}
