use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use anyhow::Context;
use tracing::{debug, info};

use clap::Parser;

use inclusify::cli::{self, CliArgs};
use inclusify::config::Config;
use inclusify::rewriter::CaseMode;
use inclusify::{logging, AppError, InclusivityChecker};

fn read_input(args: &CliArgs) -> anyhow::Result<String> {
    if let Some(text) = args.text() {
        return Ok(text);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter your text, then press Ctrl-D:");
    }
    let mut text = String::new();
    stdin
        .lock()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text)
}

fn load_config(args: &CliArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    if let Some(language) = args.lang {
        config.language = language;
    }
    if let Some(enabled) = args.suggest_override() {
        config.suggestions.enabled = enabled;
    }
    if args.match_case {
        config.case_mode = CaseMode::MatchSource;
    }

    debug!("Using config: {:?}", config);
    Ok(config)
}

async fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let text = read_input(&args)?;

    if text.trim().is_empty() {
        return Err(AppError::Input("enter some text to check".to_string()).into());
    }

    let checker = InclusivityChecker::from_config(&config);
    info!("🔍 Checking {} characters", text.len());
    let outcome = checker.check(&text, config.language).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
    } else {
        print!("{}", cli::render(&outcome));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
