pub mod criteria;
pub mod engine;
pub mod recency;

pub use criteria::{AspectConstraint, CommentMode, FilterCriteria, RecencyWindow};
pub use engine::{FilterEngine, ResponderSearch};
pub use recency::parse_hours_ago;
