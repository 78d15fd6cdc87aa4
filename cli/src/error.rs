use feedback::FeedbackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Feedback error: {0}")]
    Feedback(#[from] FeedbackError),

    #[error("Failed to serialise JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Dialoguer error: {0}")]
    DialoguerError(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<CliError>),
}

impl CliError {
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Io(err) => format!("I/O operation failed: {err}"),
            Self::Feedback(err) => feedback_message(err),
            Self::JsonError(err) => format!("Failed to produce JSON: {err}"),
            Self::DialoguerError(err) => format!("UI interaction error: {err}"),
            Self::Other(msg) => msg.clone(),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }
}

fn feedback_message(err: &FeedbackError) -> String {
    match err {
        FeedbackError::ConfigNotFound { path } => {
            format!(
                "Data file not found at {}. Run `fbv init` to create a sample",
                path.display()
            )
        }
        FeedbackError::UnknownScope { scope } => {
            format!("Scope '{scope}' not found. Run `fbv scopes` to list available scopes")
        }
        other => other.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

pub trait ResultExt<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: Into<CliError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let cli_err: CliError = err.into();
            cli_err.with_context(context())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_user_message() {
        let result: std::result::Result<(), FeedbackError> =
            Err(FeedbackError::unknown_scope("wf_missing"));
        let err = result.with_context(|| "Failed to open scope").unwrap_err();

        let message = err.user_message();
        assert!(message.starts_with("Failed to open scope: "));
        assert!(message.contains("fbv scopes"));
    }
}
