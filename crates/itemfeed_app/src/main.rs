mod cli;
mod config;
mod render;

use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use itemfeed_core::{ListPhase, ListViewModel};
use itemfeed_engine::StateHolder;
use itemfeed_logging::{feed_error, feed_info};

use crate::cli::Cli;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.apply(config::load_config(&cli.config)?);
    itemfeed_logging::initialize(&config.log_settings()?);
    feed_info!("Fetching items from {}", config.endpoint);

    let holder =
        StateHolder::with_settings(config.fetch_settings()).context("failed to start fetch")?;
    let updates = holder.subscribe();
    let timeout = config.settle_timeout();
    let started = Instant::now();

    loop {
        let remaining = timeout.saturating_sub(started.elapsed());
        let view = match updates.recv_timeout(remaining) {
            Ok(view) => view,
            Err(_) => {
                feed_error!("No result after {:?}", timeout);
                eprintln!("Error: timed out after {}s", timeout.as_secs());
                return Ok(ExitCode::FAILURE);
            }
        };

        print_view(&view);
        if !view.is_loading && view.phase != ListPhase::Idle {
            return Ok(exit_code(&view));
        }
    }
}

fn print_view(view: &ListViewModel) {
    let lines = render::render(view, Utc::now());
    if view.phase == ListPhase::Loaded {
        for line in lines {
            println!("{line}");
        }
    } else {
        for line in lines {
            eprintln!("{line}");
        }
    }
}

fn exit_code(view: &ListViewModel) -> ExitCode {
    if view.has_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
