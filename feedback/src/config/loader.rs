use crate::catalog::ScopeCatalog;
use crate::config::types::FeedbackData;
use crate::config::validator::DataValidator;
use crate::error::{FeedbackError, Result};
use crate::store::{ResponseStore, Scope};
use crate::types::{FeedbackResponse, Reaction, ResponseContext, SurveyStatus};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Column prefix marking a reaction column in response CSV files
pub const REACTION_COLUMN_PREFIX: &str = "reaction:";

/// Data loader trait
pub trait DataLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<FeedbackData>;
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<FeedbackData>;
}

/// Default loader for TOML data files
pub struct DefaultDataLoader;

impl DataLoader for DefaultDataLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<FeedbackData> {
        let content = std::fs::read_to_string(&path).map_err(|_| FeedbackError::ConfigNotFound {
            path: path.as_ref().to_path_buf(),
        })?;

        let data: FeedbackData = toml::from_str(&content)?;
        Ok(data)
    }

    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<FeedbackData> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(FeedbackError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref).map_err(FeedbackError::Io)?;

        let data: FeedbackData = toml::from_str(&content).map_err(|e| {
            FeedbackError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        DataValidator::new().validate_with_context(&data, path_ref)?;
        Ok(data)
    }
}

impl FeedbackData {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultDataLoader::load_from_file(path)
    }

    pub fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultDataLoader::load_with_validation(path)
    }

    /// Build one validated store per scope. CSV paths resolve against `base_dir`.
    pub fn into_catalog<P: AsRef<Path>>(self, base_dir: P) -> Result<ScopeCatalog> {
        let base_dir = base_dir.as_ref();
        let mut stores = Vec::with_capacity(self.scopes.len());

        for scope_data in &self.scopes {
            let scope = scope_data.to_scope()?;
            let survey = scope_data.survey(&self.survey);

            let mut responses = scope_data.responses.clone();
            if let Some(csv_path) = &scope_data.responses_csv {
                let csv_responses = load_responses_csv(base_dir.join(csv_path))?;
                debug!(scope = scope.id(), count = csv_responses.len(), "loaded responses from CSV");
                responses.extend(csv_responses);
            }

            if let Scope::Workflow { project, workflow, .. } = &scope {
                for response in &mut responses {
                    let context = response.context.get_or_insert_with(ResponseContext::default);
                    context.project.get_or_insert_with(|| project.clone());
                    context.workflow.get_or_insert_with(|| workflow.clone());
                }
            }

            stores.push(ResponseStore::from_survey(scope, survey, responses)?);
        }

        info!(scopes = stores.len(), "built response stores");
        ScopeCatalog::new(stores)
    }
}

/// Load and validate a data file, then build its catalog
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<ScopeCatalog> {
    let path = path.as_ref();
    let data = FeedbackData::load_with_validation(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    data.into_catalog(base_dir)
}

/// Load responses from a CSV file
pub fn load_responses_csv<P: AsRef<Path>>(path: P) -> Result<Vec<FeedbackResponse>> {
    let file = std::fs::File::open(&path).map_err(|_| FeedbackError::ConfigNotFound {
        path: path.as_ref().to_path_buf(),
    })?;
    parse_responses_csv(file)
}

/// Parse responses from CSV.
///
/// Recognised columns: `id`, `responder_id`, `score`, `comment`, `device`,
/// `updated_at`, `status`, `tasks_done`, `asked_at_task`, and any number of
/// `reaction:<aspect>` columns holding `up`, `down` or nothing.
pub fn parse_responses_csv<R: Read>(reader: R) -> Result<Vec<FeedbackResponse>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut responses = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let mut row: HashMap<&str, &str> = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(i) {
                row.insert(header, value.trim());
            }
        }

        responses.push(response_from_row(&row, &headers, line + 2)?);
    }

    Ok(responses)
}

fn response_from_row(
    row: &HashMap<&str, &str>,
    headers: &csv::StringRecord,
    line: usize,
) -> Result<FeedbackResponse> {
    let text = |name: &str| row.get(name).copied().filter(|value| !value.is_empty());

    let id = text("id").ok_or_else(|| {
        FeedbackError::invalid_config(format!("Missing 'id' on CSV line {}", line))
    })?;
    let responder_id = text("responder_id").unwrap_or(id);

    let mut response = FeedbackResponse::new(id, responder_id);
    response.score = text("score").map(|raw| parse_number(raw, "score", line)).transpose()?;
    response.comment = text("comment").map(str::to_string);
    response.tasks_done = text("tasks_done")
        .map(|raw| parse_count(raw, "tasks_done", line))
        .transpose()?;
    response.asked_at_task = text("asked_at_task")
        .map(|raw| parse_count(raw, "asked_at_task", line))
        .transpose()?;
    response.status = match text("status") {
        None | Some("answered") => SurveyStatus::Answered,
        Some("shown") => SurveyStatus::Shown,
        Some("not_shown") => SurveyStatus::NotShown,
        Some(other) => {
            return Err(FeedbackError::invalid_config(format!(
                "Unknown status '{}' on CSV line {}",
                other, line
            )))
        }
    };

    if text("device").is_some() || text("updated_at").is_some() {
        response.context = Some(ResponseContext {
            device: text("device").map(str::to_string),
            updated_at: text("updated_at").map(str::to_string),
            ..ResponseContext::default()
        });
    }

    for header in headers.iter() {
        let aspect = match header.strip_prefix(REACTION_COLUMN_PREFIX) {
            Some(aspect) => aspect,
            None => continue,
        };
        let reaction = match text(header) {
            None | Some("absent") => continue,
            Some("up") => Reaction::Up,
            Some("down") => Reaction::Down,
            Some(other) => {
                return Err(FeedbackError::invalid_config(format!(
                    "Invalid reaction '{}' for aspect '{}' on CSV line {}",
                    other, aspect, line
                )))
            }
        };
        response.reactions.insert(aspect, reaction);
    }

    Ok(response)
}

fn parse_number(raw: &str, column: &str, line: usize) -> Result<f64> {
    raw.parse::<f64>().map_err(|_| {
        FeedbackError::invalid_config(format!(
            "Column '{}' on CSV line {} is not a number: '{}'",
            column, line, raw
        ))
    })
}

fn parse_count(raw: &str, column: &str, line: usize) -> Result<u32> {
    raw.parse::<u32>().map_err(|_| {
        FeedbackError::invalid_config(format!(
            "Column '{}' on CSV line {} is not a whole number: '{}'",
            column, line, raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_responses_csv() {
        let csv = "\
id,responder_id,score,comment,device,updated_at,status,reaction:instructions,reaction:ui
chem-1,A-1023,4,Shortcuts are great,Chrome • Win,2h ago,,down,up
chem-2,A-1044,,,,,shown,,
";
        let responses = parse_responses_csv(csv.as_bytes()).unwrap();
        assert_eq!(responses.len(), 2);

        let first = &responses[0];
        assert_eq!(first.score, Some(4.0));
        assert_eq!(first.reactions.get("instructions"), Reaction::Down);
        assert_eq!(first.reactions.get("ui"), Reaction::Up);
        assert_eq!(first.updated_at(), Some("2h ago"));

        let second = &responses[1];
        assert_eq!(second.score, None);
        assert_eq!(second.status, SurveyStatus::Shown);
        assert!(second.reactions.is_empty());
        assert!(second.context.is_none());
    }

    #[test]
    fn test_csv_rejects_bad_values() {
        let bad_score = "id,score\nr1,four\n";
        assert!(parse_responses_csv(bad_score.as_bytes()).is_err());

        let bad_reaction = "id,reaction:ui\nr1,sideways\n";
        assert!(parse_responses_csv(bad_reaction.as_bytes()).is_err());

        let missing_id = "id,score\n,4\n";
        assert!(parse_responses_csv(missing_id.as_bytes()).is_err());

        let negative_tasks = "id,score,tasks_done\nr1,4,-5\n";
        let err = parse_responses_csv(negative_tasks.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("tasks_done"));

        let fractional_task = "id,score,asked_at_task\nr1,4,3.9\n";
        let err = parse_responses_csv(fractional_task.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("asked_at_task"));

        let counts = "id,score,tasks_done,asked_at_task\nr1,4,12,3\n";
        let responses = parse_responses_csv(counts.as_bytes()).unwrap();
        assert_eq!((responses[0].tasks_done, responses[0].asked_at_task), (Some(12), Some(3)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = FeedbackData::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, FeedbackError::ConfigNotFound { .. }));
    }
}
