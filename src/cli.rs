use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "ytcap",
    about = "Fetch a YouTube video's captions as timestamped lines",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube video URL or video ID (reads from stdin if omitted)
    pub url: Option<String>,

    /// Output format: text (default), json
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Caption language to try, in priority order (repeatable; overrides config)
    #[arg(short, long = "lang")]
    pub langs: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also save title and transcript as transc-<title>.txt in the current directory
    #[arg(long)]
    pub save: bool,

    /// Show video title, language and caption format
    #[arg(short, long)]
    pub verbose: bool,
}
