use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "fbv")]
#[command(
    author,
    version,
    about = "Feedback viewer that summarises and filters contributor survey responses"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample feedback data file
    Init {
        /// Data file path (defaults to feedback.toml)
        #[clap(short, long, default_value = "feedback.toml")]
        data: String,

        /// Overwrite an existing file without asking
        #[clap(long, default_value_t = false)]
        force: bool,

        #[clap(flatten)]
        logging: LoggingArgs,
    },

    /// List projects, workflows and response counts
    Scopes {
        /// Data file path (.toml data file or .csv of platform responses)
        #[clap(short, long, default_value = "feedback.toml")]
        data: String,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        #[clap(flatten)]
        logging: LoggingArgs,
    },

    /// Show the summary tiles and aspect breakdown
    Summary {
        #[clap(flatten)]
        view: ViewArgs,
    },

    /// Show tiles, breakdown, the filtered response list and the selected detail
    View {
        #[clap(flatten)]
        view: ViewArgs,

        /// Response id to open in the detail card (falls back to the first row)
        #[clap(long)]
        select: Option<String>,
    },

    /// Export the filtered responses as CSV
    Export {
        #[clap(flatten)]
        view: ViewArgs,

        /// Destination CSV file
        #[clap(short, long)]
        output: String,
    },
}

/// Flags shared by every command that reads a scope
#[derive(Args, Clone, Debug)]
pub struct ViewArgs {
    /// Data file path (.toml data file or .csv of platform responses)
    #[clap(short, long, default_value = "feedback.toml")]
    pub data: String,

    /// Project whose workflows to consider (first workflow when --workflow is absent or foreign)
    #[clap(long, conflicts_with = "platform")]
    pub project: Option<String>,

    /// Workflow scope id
    #[clap(short, long, conflicts_with = "platform")]
    pub workflow: Option<String>,

    /// Use the platform-wide survey
    #[clap(long, default_value_t = false)]
    pub platform: bool,

    /// Case-insensitive responder id search
    #[clap(short, long, default_value = "")]
    pub search: String,

    /// Comma-separated score allowlist (rounded scores)
    #[clap(long, value_delimiter = ',')]
    pub score: Vec<i64>,

    /// Comment presence filter
    #[clap(long, value_enum, default_value_t = CommentArg::Any)]
    pub comment: CommentArg,

    /// Keep responses with a thumbs-up on this aspect, by label or survey key (repeatable)
    #[clap(long = "aspect-up")]
    pub aspect_up: Vec<String>,

    /// Keep responses with a thumbs-down on this aspect, by label or survey key (repeatable)
    #[clap(long = "aspect-down")]
    pub aspect_down: Vec<String>,

    /// Recency window
    #[clap(long, value_enum, default_value_t = WindowArg::All)]
    pub window: WindowArg,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[clap(flatten)]
    pub logging: LoggingArgs,
}

#[derive(Args, Clone, Copy, Debug)]
pub struct LoggingArgs {
    /// Enable verbose output with additional information
    #[clap(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Only print errors and the requested output (no status lines)
    #[clap(short, long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentArg {
    Any,
    MustHave,
    MustNotHave,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowArg {
    All,
    #[value(name = "7d")]
    Days7,
    #[value(name = "30d")]
    Days30,
    #[value(name = "90d")]
    Days90,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Coloured terminal tables
    Table,

    /// Pretty-printed JSON
    Json,
}
