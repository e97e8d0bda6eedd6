use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, LogTarget, DEFAULT_CONFIG_FILE};

/// Fetch the remote item feed, clean it and print the result.
#[derive(Debug, Parser)]
#[command(name = "itemfeed", version)]
pub struct Cli {
    /// RON config file; missing means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the feed endpoint.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Override where logs go.
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,

    /// Override how long to wait for the fetch to settle, in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Command-line flags win over file values.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(target) = self.log {
            config.log.target = target;
        }
        if let Some(secs) = self.timeout_secs {
            config.settle_timeout_secs = secs;
        }
        config
    }
}
