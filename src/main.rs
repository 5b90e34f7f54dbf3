use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_transcript::{fetch_transcript, output, utils, Cli, Config, RequestOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the transcript itself.
    let default_filter = if cli.verbose {
        "yt_transcript=debug"
    } else {
        "yt_transcript=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    let options = build_options(&cli, &config)?;

    tracing::info!("Fetching transcript for URL: {}", cli.url);
    let spinner = if cli.quiet {
        None
    } else {
        Some(make_spinner())
    };

    let result = fetch_transcript(&cli.url, &options).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let rendered = result?;

    match cli.output {
        Some(path) => {
            output::save_to_file(&rendered, &path)?;
            println!("Transcript saved to: {}", path.display());
        }
        None => output::print_to_console(&rendered)?,
    }

    Ok(())
}

/// Merge CLI flags over config-file defaults into the pipeline options.
fn build_options(cli: &Cli, config: &Config) -> Result<RequestOptions> {
    let language = cli
        .language
        .clone()
        .unwrap_or_else(|| config.transcript.default_language.clone());

    let output_format = match cli.format {
        Some(format) => format,
        None => config.transcript.default_format.parse()?,
    };

    let proxy = cli
        .proxy
        .clone()
        .or_else(|| config.transport.proxy.clone())
        .map(|proxy| utils::validate_proxy_url(&proxy))
        .transpose()?;

    let timeout = cli
        .timeout
        .or(config.transport.timeout_secs)
        .map(Duration::from_secs);

    Ok(RequestOptions {
        language,
        output_format,
        headers: utils::parse_headers(&cli.headers)?,
        proxy,
        timeout,
        user_agent: cli
            .user_agent
            .clone()
            .or_else(|| config.transport.user_agent.clone()),
    })
}

fn make_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Fetching transcript...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
