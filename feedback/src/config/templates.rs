use crate::error::{FeedbackError, Result};
use std::fs;
use std::path::Path;

/// Generate a sample feedback.toml with two workflows and platform feedback
pub fn generate_default_data_template() -> String {
    r#"# Feedback data file
# Defines the survey contributors answer and the responses collected per scope.

[survey]
name = "Workflow survey"
# Inclusive headline score range
scale = { min = 1, max = 5 }

# Core aspects cannot be deleted, only disabled
[[survey.aspects]]
key = "instructions"
label = "Instructions"
description = "Clarity of the task guidelines"
core = true

[[survey.aspects]]
key = "reviewer"
label = "Reviewer"
description = "Fairness and speed of review decisions"
core = true

[[survey.aspects]]
key = "tool"
label = "Tool performance"
description = "Speed and stability of the tool"
core = true

[[survey.aspects]]
key = "ui"
label = "UI / Layout"
description = "Ease of use of the task interface"
core = true

# Workflow scopes belong to a project
[[scopes]]
kind = "workflow"
id = "wf_chem_maker"
project = "TextbookQnAProject"
workflow = "Chemistry"
# Additional responses can be read from CSV next to this file
# responses_csv = "chemistry.csv"

[[scopes.responses]]
id = "chem-1"
responder_id = "A-1023"
score = 4
comment = "Shortcuts are great; occasional upload lag."
reactions = { instructions = "down", reviewer = "up", tool = "up", ui = "up" }
context = { device = "Chrome • Win", updated_at = "2h ago" }

[[scopes.responses]]
id = "chem-2"
responder_id = "A-1044"
score = 5
comment = "Examples very clear."
reactions = { instructions = "up", reviewer = "up", tool = "up", ui = "up" }
context = { device = "Safari • iOS", updated_at = "yesterday" }

[[scopes.responses]]
id = "chem-3"
responder_id = "B-2099"
score = 3
comment = "Guidelines conflict with edge cases."
reactions = { instructions = "down", reviewer = "up", tool = "down", ui = "down" }
context = { device = "Edge • Win", updated_at = "3d ago" }

[[scopes.responses]]
id = "chem-4"
responder_id = "B-2100"
status = "shown"
context = { device = "Firefox • Linux", updated_at = "5h ago" }

[[scopes]]
kind = "workflow"
id = "wf_vision_qc1"
project = "Vision QA"
workflow = "QC • Step 1"

[[scopes.responses]]
id = "vis-1"
responder_id = "D-3001"
score = 2
comment = "Tool lag + unclear rejection reasons."
reactions = { instructions = "down", reviewer = "down", tool = "down", ui = "down" }
context = { device = "Firefox • Linux", updated_at = "1h ago" }

[[scopes.responses]]
id = "vis-2"
responder_id = "D-3002"
score = 3
comment = "Review helpful, but editor freezes."
reactions = { instructions = "down", reviewer = "up", tool = "down", ui = "up" }
context = { device = "Chrome • Win", updated_at = "today" }

# Feedback about the platform as a whole
[[scopes]]
kind = "platform"

[[scopes.responses]]
id = "fts-1"
responder_id = "A-1023"
score = 4
comment = "Good speed this week."
reactions = { instructions = "up", reviewer = "up", tool = "up", ui = "up" }
context = { device = "Chrome • Win", updated_at = "2h ago" }

[[scopes.responses]]
id = "fts-2"
responder_id = "B-2099"
score = 3
comment = "Uploads flaky on hotel Wi-Fi."
reactions = { instructions = "down", reviewer = "up", tool = "down", ui = "down" }
context = { device = "Edge • Win", updated_at = "yesterday" }

[[scopes.responses]]
id = "fts-3"
responder_id = "C-6677"
score = 5
comment = "Everything feels smooth."
reactions = { instructions = "up", reviewer = "up", tool = "up", ui = "up" }
context = { device = "Chrome • Mac", updated_at = "3d ago" }

[[scopes.responses]]
id = "fts-4"
responder_id = "D-3001"
score = 2
comment = "Review loop confusing; editor lags."
reactions = { instructions = "down", reviewer = "down", tool = "down", ui = "down" }
context = { device = "Firefox • Linux", updated_at = "5h ago" }
"#
    .to_string()
}

/// Write the sample data file when it is missing (or always, with `overwrite`).
/// Returns whether a file was written.
pub fn ensure_data_file_exists<P: AsRef<Path>>(path: P, overwrite: bool) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() && !overwrite {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(FeedbackError::Io)?;
    }
    fs::write(path, generate_default_data_template()).map_err(FeedbackError::Io)?;
    Ok(true)
}
