use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;

use crate::llm_client::{CompletionConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

/// Converts a PDF resume into other formats.
#[derive(Debug, Parser)]
#[command(name = "convert")]
#[command(version)]
pub struct Cli {
    /// The file (PDF) to be converted
    #[arg(long)]
    pub input: PathBuf,

    /// The output folder
    #[arg(long)]
    pub output: PathBuf,

    /// OpenAI API Key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub apikey: String,

    /// Text file with the job description used for the cover letter
    #[arg(long)]
    pub job: Option<PathBuf>,

    /// Chat model identifier
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Completion token limit per call
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Sampling temperature, 0 to 2
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f64,

    /// Extra attempts on transport errors, 429 and 5xx (0 = single attempt)
    #[arg(long, default_value_t = 0)]
    pub retries: u32,
}

/// Run configuration assembled from CLI flags and the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub api_key: String,
    /// `None` means the built-in job posting.
    pub job_description: Option<String>,
    pub completion: CompletionConfig,
    pub rust_log: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        ensure!(!cli.apikey.trim().is_empty(), "API key must not be empty");

        let job_description = cli
            .job
            .as_ref()
            .map(|path| {
                std::fs::read_to_string(path)
                    .map(|text| text.trim().to_string())
                    .with_context(|| format!("Failed to read job description '{}'", path.display()))
            })
            .transpose()?;

        let completion = CompletionConfig {
            model: cli.model,
            max_tokens: cli.max_tokens,
            temperature: cli.temperature,
            max_retries: cli.retries,
            ..CompletionConfig::default()
        };
        completion.validate()?;

        Ok(Config {
            input: cli.input,
            output: cli.output,
            api_key: cli.apikey,
            job_description,
            completion,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
