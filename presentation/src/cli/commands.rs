//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for comparison results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One labelled section per provider
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for translation-comparator
#[derive(Parser, Debug)]
#[command(name = "translation-comparator")]
#[command(author, version, about = "Compare translations and language feedback from several LLMs")]
#[command(long_about = r#"
Translation Comparator sends your text to several LLM providers at once and
shows every answer side by side.

Each provider is retried up to 3 times within a shared 20 second budget. A
provider that fails or times out shows an error in its own slot; the others
are not affected.

API keys are read from OPENAI_API_KEY, CLAUDE_API_KEY, GEMINI_API_KEY,
MISTRAL_API_KEY, PERPLEXITY_API_KEY, DEEPSEEK_API_KEY, GROK_API_KEY and
OPENROUTER_API_KEY. Providers without a key are not available.

Configuration files are loaded from (in priority order):
1. COMPARATOR_* environment variables
2. --config <path>     Explicit config file
3. ./comparator.toml   Project-level config
4. ~/.config/translation-comparator/config.toml   Global config

Example:
  translation-comparator translate "Good morning" --to fr
  translation-comparator -p grok -p deepseek grammar "I has a apple"
  translation-comparator -p claude follow-up --prompt "..." --response "..." "Why?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Providers to compare (can be specified multiple times, at most 5)
    #[arg(short, long = "provider", value_name = "ID", global = true)]
    pub providers: Vec<String>,

    /// Model override for one provider, as PROVIDER=MODEL
    #[arg(short, long = "model", value_name = "PROVIDER=MODEL", value_parser = parse_model_override, global = true)]
    pub models: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to a daily-rotated file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Append every provider outcome to this JSONL file
    #[arg(long, value_name = "PATH", global = true)]
    pub outcome_log: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Translate text into a target language
    Translate {
        text: String,
        /// Language of the input text
        #[arg(long, value_name = "LANGUAGE")]
        from: Option<String>,
        /// Target language: es, fr, tr, or Spanish, French, Turkish
        #[arg(long, value_name = "LANGUAGE")]
        to: Option<String>,
    },

    /// Check grammar and get corrections
    Grammar {
        text: String,
        /// Language of the input text
        #[arg(long, value_name = "LANGUAGE")]
        from: Option<String>,
        /// Language the explanation is written in
        #[arg(long, value_name = "LANGUAGE")]
        response_language: Option<String>,
    },

    /// Analyze how natural the text sounds
    Usage {
        text: String,
        /// Language of the input text
        #[arg(long, value_name = "LANGUAGE")]
        from: Option<String>,
        /// Language the explanation is written in
        #[arg(long, value_name = "LANGUAGE")]
        response_language: Option<String>,
    },

    /// Ask one provider a follow-up question about an earlier answer
    FollowUp {
        /// The follow-up question
        question: String,
        /// The prompt that produced the earlier answer
        #[arg(long = "prompt", value_name = "TEXT")]
        original_prompt: String,
        /// The earlier answer
        #[arg(long = "response", value_name = "TEXT")]
        original_response: String,
    },

    /// List providers and whether they are available
    Providers,

    /// Show estimated usage and cost
    Stats {
        /// Clear all recorded usage
        #[arg(long)]
        reset: bool,
    },
}

fn parse_model_override(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((provider, model)) if !provider.trim().is_empty() && !model.trim().is_empty() => {
            Ok((provider.trim().to_string(), model.trim().to_string()))
        }
        _ => Err(format!("expected PROVIDER=MODEL, got '{value}'")),
    }
}
