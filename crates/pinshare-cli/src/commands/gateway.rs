//! Gateway URL CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use pinshare_core::config::AppConfig;
use pinshare_core::error::AppError;
use pinshare_gateway::{GatewayResolver, GatewayUrl};

use crate::output::{self, OutputFormat};

/// Arguments for gateway commands
#[derive(Debug, Args)]
pub struct GatewayArgs {
    /// Gateway subcommand
    #[command(subcommand)]
    pub command: GatewayCommand,
}

/// Gateway subcommands
#[derive(Debug, Subcommand)]
pub enum GatewayCommand {
    /// Print retrieval URLs for a content id
    Urls {
        /// Content id
        cid: String,
        /// File name for the download URL
        #[arg(long)]
        filename: Option<String>,
    },
    /// List configured gateways
    List,
}

/// Table row for a gateway URL.
#[derive(Debug, Serialize, Tabled)]
pub struct GatewayRow {
    /// Gateway name
    #[tabled(rename = "Gateway")]
    pub gateway: String,
    /// URL
    #[tabled(rename = "URL")]
    pub url: String,
}

impl From<GatewayUrl> for GatewayRow {
    fn from(u: GatewayUrl) -> Self {
        Self {
            gateway: u.gateway,
            url: u.url,
        }
    }
}

/// Execute gateway commands
pub fn execute(
    args: &GatewayArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let resolver = GatewayResolver::new(&config.gateway)?;

    match &args.command {
        GatewayCommand::Urls { cid, filename } => {
            let resolved = resolver.resolve(cid, filename.as_deref());
            match format {
                OutputFormat::Json => output::print_json(&resolved),
                OutputFormat::Table => {
                    if resolved.substituted {
                        output::print_warning("Content id looks malformed; showing placeholder");
                    }
                    output::print_kv("Preferred", &resolved.preferred);
                    output::print_kv("Download", &resolved.download);
                    let rows: Vec<GatewayRow> =
                        resolved.alternates.into_iter().map(GatewayRow::from).collect();
                    output::print_list(&rows, format);
                }
            }
        }
        GatewayCommand::List => {
            let rows: Vec<GatewayRow> = resolver
                .gateways()
                .iter()
                .map(|g| GatewayRow {
                    gateway: g.name.clone(),
                    url: g.base_url.clone(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
