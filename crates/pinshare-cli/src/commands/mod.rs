//! CLI command definitions and dispatch.

pub mod config;
pub mod gateway;
pub mod pin;
pub mod share;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use pinshare_core::config::AppConfig;
use pinshare_core::error::AppError;
use pinshare_core::traits::clock::SystemClock;
use pinshare_gateway::GatewayResolver;
use pinshare_share::{AccessEvaluator, PasswordVerifier};

use crate::output::OutputFormat;

/// PinShare: capability links for content-addressed files
#[derive(Debug, Parser)]
#[command(name = "pinshare", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (extension optional)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build and open share links
    Share(share::ShareArgs),
    /// Gateway URL resolution
    Gateway(gateway::GatewayArgs),
    /// Pinning service operations
    Pin(pin::PinArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config)?;
        match &self.command {
            Commands::Share(args) => share::execute(args, &config, self.format).await,
            Commands::Gateway(args) => gateway::execute(args, &config, self.format),
            Commands::Pin(args) => pin::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_from(config_path)
}

/// Helper: evaluator wired from configuration with the system clock
pub fn build_evaluator(config: &AppConfig) -> Result<AccessEvaluator, AppError> {
    let resolver = Arc::new(GatewayResolver::new(&config.gateway)?);
    Ok(AccessEvaluator::new(
        PasswordVerifier::new(config.share.verification_scheme),
        resolver,
        Arc::new(SystemClock),
    ))
}
