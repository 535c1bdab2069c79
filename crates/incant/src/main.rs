//! incant - Describe the task in English, get the shell incantation back

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use reqwest::blocking::Client;
use std::process;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use incant::cli::Cli;
use incant::clipboard;
use incant::community::CommunitySource;
use incant::config::Config;
use incant::confirm::InteractiveConfirmation;
use incant::exec;
use incant::model::ModelSource;
use incant::pipeline::{Outcome, Resolver};
use incant::sources::{AnswerSource, CacheSource};
use incant::store::{self, ExampleStore};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            process::exit(1);
        }
    }
}

fn init_tracing(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(debug))
        .with_writer(std::io::stderr)
        .init();
}

/// `--debug` forces crate-level debug output; otherwise `RUST_LOG` is
/// honored, with `warn` as the fallback when it is unset.
fn log_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("incant=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn run(cli: Cli) -> Result<i32> {
    let query = cli.query();
    let config = Config::load()?;

    let store_path = config
        .store_path
        .clone()
        .unwrap_or_else(store::default_path);
    let store = ExampleStore::open(&store_path)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    // Priority order: cache, community, model. Disabled sources are
    // simply left out of the list.
    let mut sources: Vec<Box<dyn AnswerSource>> = Vec::new();
    if !cli.no_cache {
        sources.push(Box::new(CacheSource::new(store.clone())));
    }
    if !cli.no_community {
        sources.push(Box::new(CommunitySource::new(
            client.clone(),
            config.community.clone(),
        )));
    }
    if !cli.no_model {
        sources.push(Box::new(ModelSource::new(
            client,
            config.model.clone(),
            store.clone(),
        )));
    }

    let resolver = Resolver::new(store, sources);
    let outcome = resolver.resolve(&query, &mut InteractiveConfirmation)?;

    let answer = match outcome {
        Outcome::Confirmed(answer) => answer,
        Outcome::Abandoned(_) => {
            println!("Aborted.");
            return Ok(0);
        }
    };

    if !cli.no_clipboard {
        match clipboard::copy(&answer.command) {
            Ok(()) => println!("Copied to clipboard."),
            // The resolution already succeeded; a missing clipboard
            // does not change the exit status
            Err(err) => warn!("clipboard copy failed: {:#}", err),
        }
    }

    if cli.run {
        return exec::run(&answer.command);
    }

    Ok(0)
}
