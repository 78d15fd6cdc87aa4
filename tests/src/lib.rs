//! Fixture helpers shared by the feedback integration tests

use std::fs;
use std::path::{Path, PathBuf};

use feedback::config::ensure_data_file_exists;

/// Write the sample data file into `dir` and return its path
pub fn write_sample_data(dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join("feedback.toml");
    ensure_data_file_exists(&path, true)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;
    Ok(path)
}

/// Data file whose only workflow reads its responses from `responses.csv`
pub fn write_csv_backed_data(dir: &Path, csv: &str) -> std::io::Result<PathBuf> {
    let data = r#"[survey]
name = "Latency survey"
scale = { min = 0, max = 10 }

[[survey.aspects]]
key = "instructions"
label = "Instructions"
core = true

[[survey.aspects]]
key = "latency"
label = "Latency"

[[scopes]]
kind = "workflow"
id = "wf_audio"
project = "Speech"
workflow = "Transcription"
responses_csv = "responses.csv"
"#;

    fs::write(dir.join("responses.csv"), csv)?;
    let path = dir.join("feedback.toml");
    fs::write(&path, data)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_data_is_written() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_sample_data(temp_dir.path()).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("[survey]"));
        assert!(content.contains("[[scopes.responses]]"));
    }
}
