//! Configuration CLI commands.

use clap::{Args, Subcommand};

use pinshare_core::config::AppConfig;
use pinshare_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Check that the configuration is usable
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => output::print_item(&redacted(config), format),
        ConfigCommand::Validate => {
            pinshare_gateway::GatewayResolver::new(&config.gateway)?;
            output::print_success("Configuration is valid");
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            output::print_kv("Public origin", &config.share.public_origin);
            output::print_kv("Gateways", &config.gateway.gateways.len().to_string());
            if !config.pinning.is_configured() {
                output::print_warning("Pinning API keys not set; uploads are disabled");
            }
        }
    }
    Ok(())
}

/// Copy of `config` safe to print.
fn redacted(config: &AppConfig) -> AppConfig {
    let mut copy = config.clone();
    copy.pinning.api_key = mask(&copy.pinning.api_key);
    copy.pinning.secret_key = mask(&copy.pinning.secret_key);
    copy
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "****".to_string()
    }
}
