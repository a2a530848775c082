//! CLI entrypoint for translation-comparator
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use comparator_application::{
    CompareProvidersUseCase, CompositeOutcomeSink, FanOutRequest, OutcomeSink, ProviderRegistry,
};
use comparator_domain::{
    ComparisonMode, ProviderDescriptor, ProviderId, ProviderKind, Prompt, PromptTemplate,
    language_name,
};
use comparator_infrastructure::{
    ConfigLoader, FileConfig, JsonlOutcomeLogger, UsageTracker, build_registry,
};
use comparator_presentation::{
    Cli, Command, ComparisonBoard, ConsoleFormatter, OutputFormat, ProgressReporter,
    SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    info!("Starting translation-comparator");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    // === Load Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    // === Dependency Injection ===
    let client = config
        .http
        .build_client()
        .context("Failed to build HTTP client")?;
    let registry = Arc::new(build_registry(&config, &client, |name| {
        std::env::var(name).ok()
    }));
    let tracker = match config.telemetry.usage_file_path() {
        Some(path) => UsageTracker::load(path),
        None => UsageTracker::in_memory(),
    };
    let use_case = CompareProvidersUseCase::new(Arc::clone(&registry), config.to_behavior_config());

    match command {
        Command::Translate { text, from, to } => {
            let source = from.unwrap_or_else(|| config.comparison.source_language.clone());
            let code = to.unwrap_or_else(|| config.comparison.target_language.clone());
            let target = language_name(&code)?;
            run_comparison(
                &cli,
                &config,
                &use_case,
                &tracker,
                ComparisonMode::Translate,
                &text,
                &source,
                target,
            )
            .await?;
        }
        Command::Grammar {
            text,
            from,
            response_language,
        } => {
            let source = from.unwrap_or_else(|| config.comparison.source_language.clone());
            let response = response_language
                .unwrap_or_else(|| config.comparison.response_language.clone());
            run_comparison(
                &cli,
                &config,
                &use_case,
                &tracker,
                ComparisonMode::Grammar,
                &text,
                &source,
                &response,
            )
            .await?;
        }
        Command::Usage {
            text,
            from,
            response_language,
        } => {
            let source = from.unwrap_or_else(|| config.comparison.source_language.clone());
            let response = response_language
                .unwrap_or_else(|| config.comparison.response_language.clone());
            run_comparison(
                &cli,
                &config,
                &use_case,
                &tracker,
                ComparisonMode::Usage,
                &text,
                &source,
                &response,
            )
            .await?;
        }
        Command::FollowUp {
            question,
            original_prompt,
            original_response,
        } => {
            let [provider] = cli.providers.as_slice() else {
                bail!("follow-up needs exactly one provider (-p <ID>)");
            };
            let provider_id = ProviderId::from(provider.as_str());
            let prompt = Prompt::new(PromptTemplate::follow_up(
                &original_prompt,
                &original_response,
                &question,
            ))?;

            let answer = tokio::select! {
                result = use_case.call_single_with_telemetry(&provider_id, &prompt, &tracker) => result,
                _ = tokio::signal::ctrl_c() => bail!("Interrupted"),
            };
            save_usage(&tracker);
            let answer = answer?;

            let display_name = registry
                .get(&provider_id)
                .map(|p| p.descriptor().display_name.clone())
                .unwrap_or_else(|| provider_id.to_string());
            match cli.output {
                OutputFormat::Text => println!(
                    "{}",
                    ConsoleFormatter::format_follow_up(&display_name, &question, &answer)
                ),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "provider_id": provider_id,
                        "question": question,
                        "answer": answer,
                    })
                ),
            }
        }
        Command::Providers => {
            let providers = provider_listing(&config, &registry);
            match cli.output {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_providers(&providers)),
                OutputFormat::Json => {
                    println!("{}", ConsoleFormatter::format_providers_json(&providers))
                }
            }
        }
        Command::Stats { reset } => {
            if reset {
                tracker.reset();
                tracker.save().context("Failed to save usage")?;
                println!("Usage statistics cleared.");
                return Ok(());
            }
            let summary = tracker.summary();
            match cli.output {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_usage(&summary)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_usage_json(&summary)),
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_comparison(
    cli: &Cli,
    config: &FileConfig,
    use_case: &CompareProvidersUseCase,
    tracker: &UsageTracker,
    mode: ComparisonMode,
    text: &str,
    source_language: &str,
    second_language: &str,
) -> Result<()> {
    let prompt = Prompt::new(mode.build_prompt(text, source_language, second_language))?;

    let provider_ids: Vec<ProviderId> = if !cli.providers.is_empty() {
        cli.providers.iter().map(|p| ProviderId::from(p.as_str())).collect()
    } else if !config.comparison.providers.is_empty() {
        config
            .comparison
            .providers
            .iter()
            .map(|p| ProviderId::from(p.as_str()))
            .collect()
    } else {
        use_case.registry().default_selection()
    };

    let cancellation = CancellationToken::new();
    let ctrl_c_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding calls");
            ctrl_c_token.cancel();
        }
    });

    let mut request = FanOutRequest::new(prompt, provider_ids).with_cancellation(cancellation);
    for (provider, model) in &cli.models {
        request = request.with_model(provider.as_str(), model.as_str());
    }

    let board = ComparisonBoard::new();
    let progress = ProgressReporter::new();
    let plain_progress = SimpleProgress;
    let outcome_log = cli.outcome_log.as_ref().and_then(JsonlOutcomeLogger::new);

    let mut sink = CompositeOutcomeSink::new(vec![&board as &dyn OutcomeSink]);
    let show_progress = !cli.quiet && cli.output == OutputFormat::Text;
    if show_progress {
        if std::io::stderr().is_terminal() {
            sink.push(&progress);
        } else {
            sink.push(&plain_progress);
        }
    }
    if let Some(logger) = &outcome_log {
        sink.push(logger as &dyn OutcomeSink);
    }

    let report = use_case.fan_out(request, &sink, tracker).await;
    save_usage(tracker);
    let report = report?;
    info!(
        "Comparison finished: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );

    let slots = board.slots();
    match cli.output {
        OutputFormat::Text => {
            let title = match mode {
                ComparisonMode::Translate => format!("Translation to {second_language}"),
                ComparisonMode::Grammar => "Grammar check".to_string(),
                ComparisonMode::Usage => "Usage analysis".to_string(),
            };
            print!("{}", ConsoleFormatter::format_board(&title, text, &slots));
        }
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_board_json(text, &slots)),
    }

    Ok(())
}

/// Every built-in vendor with its configured descriptor and availability
fn provider_listing(
    config: &FileConfig,
    registry: &ProviderRegistry,
) -> Vec<(ProviderDescriptor, bool)> {
    ProviderKind::ALL
        .iter()
        .map(|kind| match registry.get(&ProviderId::from(kind.as_str())) {
            Some(provider) => (provider.descriptor().clone(), true),
            None => (config.providers.entry(*kind).descriptor_for(*kind), false),
        })
        .collect()
}

fn save_usage(tracker: &UsageTracker) {
    if let Err(e) = tracker.save() {
        warn!("Failed to save usage statistics: {}", e);
    }
}

fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "translation-comparator.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    guard
}
