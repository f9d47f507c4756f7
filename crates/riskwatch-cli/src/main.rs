use clap::Parser;
use riskwatch_classifiers::{GeminiClient, SafetyClassifier};
use riskwatch_cli::commands::{self, AssessRequest, MergeRequest};
use riskwatch_cli::{AppConfig, Cli, Commands};
use riskwatch_core::SourcedPost;
use std::io::BufRead;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load(&cli.config, &cli)?;
    riskwatch_telemetry::describe_metrics();

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    if cli.command.needs_classifier() {
        info!(model = %config.classifier.model, "Using classifier model");
    }

    match cli.command {
        Commands::Classify { text, json } => {
            let texts = match text {
                Some(text) => vec![text],
                None => std::io::stdin()
                    .lock()
                    .lines()
                    .collect::<std::io::Result<Vec<_>>>()?,
            };
            let classifier = SafetyClassifier::new(GeminiClient::new(&config.classifier)?);
            commands::classify(&classifier, texts, json, &mut out, &mut err).await?;
        }

        Commands::Assess {
            text,
            title,
            url,
            category,
            append,
            json,
        } => {
            let classifier = SafetyClassifier::new(GeminiClient::new(&config.classifier)?);
            let request = AssessRequest {
                post: SourcedPost {
                    title,
                    url,
                    content: text,
                    category,
                    query: None,
                },
                append,
                as_json: json,
            };
            commands::assess(&classifier, request, &config, &mut out, &mut err).await?;
        }

        Commands::Monitor { data, limit } => {
            commands::monitor(&data, limit, &mut out)?;
        }

        Commands::Analytics { data, json } => {
            commands::analytics(&data, json, &mut out)?;
        }

        Commands::Dataset { data, label } => {
            commands::dataset(&data, label.as_deref(), &mut out)?;
        }

        Commands::Merge {
            existing,
            incoming,
            output,
            capacity,
        } => {
            let request = MergeRequest {
                existing,
                incoming,
                output,
                capacity: capacity.unwrap_or(config.monitor.window_capacity),
            };
            commands::merge(&request, &mut out)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "riskwatch=debug,riskwatch_cli=debug,riskwatch_classifiers=debug,riskwatch_monitor=debug"
    } else {
        "riskwatch=warn,riskwatch_cli=warn,riskwatch_classifiers=warn,riskwatch_monitor=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
