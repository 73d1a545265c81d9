use std::process::ExitCode;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use web_summarizer::{
    build_summarizer,
    cli::{render_console, Cli},
    config::Config,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Missing --url exits here with clap's usage message
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the summary
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,web_summarizer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let summarizer = build_summarizer(&config);
    match summarizer.summarize(&cli.url).await {
        Ok(summary) => {
            print!("{}", render_console(&summary.summary));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
