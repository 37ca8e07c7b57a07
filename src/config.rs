// src/config.rs
use crate::constants::DEFAULT_FETCH_DEPTH;
use crate::error::AppError;
use crate::pipeline::ExtractOptions;
use crate::types::{ApiKey, NotionId};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion page URL or ID (e.g., "https://www.notion.so/...")
    pub notion_input: String,

    /// Output file for the simplified JSON (stdout when omitted)
    #[arg(short, long)]
    pub output_file: Option<String>,

    /// Maximum recursion depth when fetching the block tree
    #[arg(long, default_value_t = DEFAULT_FETCH_DEPTH)]
    pub depth: u8,

    /// Number of concurrent fetch workers (default: auto, max 32)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Overall deadline in seconds for the whole extraction
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved extraction configuration — validated and ready to run.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub notion_id: NotionId,
    pub api_key: ApiKey,
    pub depth: u8,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
}

impl ExtractorConfig {
    /// Resolves configuration from CLI input and the environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key_str = std::env::var("NOTION_API_KEY").map_err(|_| {
            AppError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;

        Ok(Self {
            notion_id: NotionId::parse(&cli.notion_input)?,
            api_key: ApiKey::new(api_key_str)?,
            depth: cli.depth,
            concurrency: cli.concurrency,
            timeout_secs: cli.timeout,
            output_file: cli.output_file.map(PathBuf::from),
            verbose: cli.verbose,
        })
    }

    /// The tuning knobs the pipeline needs from this configuration.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            depth: self.depth,
            concurrency: self
                .concurrency
                .unwrap_or_else(crate::constants::default_concurrency),
            timeout: self.timeout_secs.map(Duration::from_secs),
            ..ExtractOptions::default()
        }
    }
}
