pub mod check;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use cloudscout_common::config::Config;

#[derive(Parser)]
#[command(name = "cloudscout")]
#[command(about = "Domain reachability, cloud and mail checker.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check domain status and cloud usage
    #[command(alias = "c")]
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to TOML file
    #[arg(short = 'f', long = "file", default_value = "domains.toml")]
    pub file: PathBuf,
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
    /// Seconds allowed for each HTTP request
    #[arg(long, value_name = "SECS")]
    pub http_timeout: Option<u64>,
    /// Milliseconds allowed for each port connect
    #[arg(long, value_name = "MS")]
    pub port_timeout_ms: Option<u64>,
    /// Seconds allowed for the SMTP connect and banner read
    #[arg(long, value_name = "SECS")]
    pub smtp_timeout: Option<u64>,
    /// Do not draw the progress spinner
    #[arg(long)]
    pub no_spinner: bool,
    /// Alternative location of the AWS ip-ranges.json document
    #[arg(long, value_name = "URL")]
    pub aws_ranges_url: Option<String>,
    /// Alternative location of the GCP cloud.json document
    #[arg(long, value_name = "URL")]
    pub gcp_ranges_url: Option<String>,
}

impl CheckArgs {
    pub fn to_config(&self) -> Config {
        let mut cfg = Config {
            verbose: self.verbose,
            ..Config::default()
        };
        if let Some(secs) = self.http_timeout {
            cfg.http_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = self.port_timeout_ms {
            cfg.port_timeout = Duration::from_millis(ms);
        }
        if let Some(secs) = self.smtp_timeout {
            cfg.smtp_timeout = Duration::from_secs(secs);
        }
        if let Some(url) = &self.aws_ranges_url {
            cfg.datasets.aws_url = url.clone();
        }
        if let Some(url) = &self.gcp_ranges_url {
            cfg.datasets.gcp.url = url.clone();
        }
        cfg
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
