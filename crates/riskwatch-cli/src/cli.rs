use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "riskwatch")]
#[command(
    author,
    version,
    about = "Safety text classification and incident monitoring"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "riskwatch.yaml")]
    pub config: String,

    /// Classifier model, overriding the configuration file
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify text for self-harm, suicide, violence, abuse or overdose risk
    Classify {
        /// Text to classify; reads one text per line from stdin when omitted
        text: Option<String>,

        /// Print verdicts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assess the severity of a post and optionally add it to a feed file
    Assess {
        /// Post content
        text: String,

        /// Post title
        #[arg(long, default_value = "")]
        title: String,

        /// Post URL, used for de-duplication in the feed
        #[arg(long, default_value = "")]
        url: String,

        /// Category the post was collected for
        #[arg(long)]
        category: Option<String>,

        /// Feed file to merge the resulting incident into
        #[arg(long)]
        append: Option<PathBuf>,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the severity-ranked incident feed
    Monitor {
        /// Incident file
        #[arg(short, long)]
        data: PathBuf,

        /// Show at most this many incidents
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show aggregate statistics for an incident file
    Analytics {
        /// Incident file
        #[arg(short, long)]
        data: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse the labelled benchmark dataset
    Dataset {
        /// Dataset file
        #[arg(short, long)]
        data: PathBuf,

        /// Only show entries with this label ("all" shows everything)
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Merge newly collected incidents into the rolling feed window
    Merge {
        /// Current feed file; treated as empty when missing
        #[arg(long)]
        existing: PathBuf,

        /// Newly collected incidents, in arrival order
        #[arg(long)]
        incoming: PathBuf,

        /// Where to write the merged feed (defaults to the existing file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of incidents kept
        #[arg(long)]
        capacity: Option<usize>,
    },
}

impl Commands {
    /// Whether the command talks to the classifier model
    pub fn needs_classifier(&self) -> bool {
        matches!(self, Self::Classify { .. } | Self::Assess { .. })
    }
}
