//! Pinning service CLI commands.

use std::path::PathBuf;

use bytes::Bytes;
use clap::{Args, Subcommand};

use pinshare_core::config::AppConfig;
use pinshare_core::error::AppError;
use pinshare_gateway::GatewayResolver;
use pinshare_pinning::PinningClient;

use crate::output::{self, OutputFormat};

/// Arguments for pin commands
#[derive(Debug, Args)]
pub struct PinArgs {
    /// Pin subcommand
    #[command(subcommand)]
    pub command: PinCommand,
}

/// Pin subcommands
#[derive(Debug, Subcommand)]
pub enum PinCommand {
    /// Upload and pin a local file
    Upload {
        /// Path to the file
        file: PathBuf,
        /// Override file name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Check the configured API keys
    Test,
}

/// Execute pin commands
pub async fn execute(
    args: &PinArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = PinningClient::new(&config.pinning)?;

    match &args.command {
        PinCommand::Upload { file, name } => {
            if !file.is_file() {
                return Err(AppError::not_found(format!(
                    "File not found: {}",
                    file.display()
                )));
            }

            let file_name = name.clone().unwrap_or_else(|| {
                file.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("upload")
                    .to_string()
            });
            let mime = mime_guess::from_path(&file_name)
                .first_or_octet_stream()
                .to_string();
            let content = tokio::fs::read(file).await?;

            println!("Pinning '{}' ({} bytes)...", file_name, content.len());
            let pinned = client
                .pin_file(&file_name, &mime, Bytes::from(content))
                .await?;

            match format {
                OutputFormat::Json => output::print_json(&pinned),
                OutputFormat::Table => {
                    let resolver = GatewayResolver::new(&config.gateway)?;
                    output::print_success("File pinned");
                    output::print_kv("Content id", &pinned.content_id);
                    output::print_kv("Size", &pinned.size_bytes.to_string());
                    output::print_kv("URL", &resolver.preferred_url(&pinned.content_id));
                }
            }
        }
        PinCommand::Test => {
            if client.test_authentication().await? {
                output::print_success("Pinning service accepted the API keys");
            } else {
                return Err(AppError::authentication(
                    "Pinning service rejected the API keys",
                ));
            }
        }
    }

    Ok(())
}
