pub mod types;
pub mod loader;
pub mod validator;
pub mod templates;

pub use types::{FeedbackData, ScopeData, ScopeKind};
pub use loader::{load_catalog, load_responses_csv, parse_responses_csv, DataLoader, DefaultDataLoader};
pub use validator::DataValidator;
pub use templates::{generate_default_data_template, ensure_data_file_exists};
