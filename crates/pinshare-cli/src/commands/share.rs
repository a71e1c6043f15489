//! Share link CLI commands.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;

use pinshare_core::config::AppConfig;
use pinshare_core::error::AppError;
use pinshare_gateway::GatewayFetcher;
use pinshare_share::{
    AccessState, LinkCodec, PasswordVerifier, ShareError, ShareRequest, ShareSession,
};

use crate::commands::gateway::GatewayRow;
use crate::output::{self, OutputFormat};

/// Arguments for share commands
#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Share subcommand
    #[command(subcommand)]
    pub command: ShareCommand,
}

/// Share subcommands
#[derive(Debug, Subcommand)]
pub enum ShareCommand {
    /// Build a share link for pinned content
    Create {
        /// Content id
        #[arg(long)]
        cid: String,
        /// File name shown to recipients
        #[arg(short, long)]
        name: String,
        /// Optional password gate
        #[arg(short, long)]
        password: Option<String>,
        /// Optional lifetime in days
        #[arg(short, long)]
        expires_days: Option<u32>,
        /// Override the configured public origin
        #[arg(long)]
        origin: Option<String>,
    },
    /// Open a share link as a recipient would
    Open {
        /// The share URL
        url: String,
        /// Password for protected links
        #[arg(short, long)]
        password: Option<String>,
        /// Fetch the content through the gateways and write it here
        #[arg(short, long)]
        download: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct CreatedLink {
    url: String,
    content_id: String,
    display_name: String,
    is_protected: bool,
    expires_at: Option<chrono::DateTime<Utc>>,
}

/// What a recipient sees before the password gate is passed.
#[derive(Debug, Serialize)]
struct LockedLink {
    content_id: String,
    display_name: String,
    state: AccessState,
    is_protected: bool,
    expires_at: Option<chrono::DateTime<Utc>>,
}

impl From<&ShareSession> for LockedLink {
    fn from(session: &ShareSession) -> Self {
        let descriptor = session.descriptor();
        Self {
            content_id: descriptor.content_id.clone(),
            display_name: descriptor.display_name.clone(),
            state: session.state(),
            is_protected: descriptor.is_protected,
            expires_at: descriptor.expires_at,
        }
    }
}

/// Execute share commands
pub async fn execute(
    args: &ShareArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ShareCommand::Create {
            cid,
            name,
            password,
            expires_days,
            origin,
        } => {
            let verifier = PasswordVerifier::new(config.share.verification_scheme);
            let descriptor = ShareRequest {
                content_id: cid.clone(),
                display_name: name.clone(),
                password: password.clone(),
                expiry_days: *expires_days,
            }
            .into_descriptor(&verifier, Utc::now(), config.share.max_expiry_days)?;

            let codec = match origin {
                Some(origin) => LinkCodec::new(origin)?,
                None => LinkCodec::from_config(&config.share)?,
            };
            let url = codec.encode(&descriptor)?;

            let created = CreatedLink {
                url,
                content_id: descriptor.content_id,
                display_name: descriptor.display_name,
                is_protected: descriptor.is_protected,
                expires_at: descriptor.expires_at,
            };

            match format {
                OutputFormat::Json => output::print_json(&created),
                OutputFormat::Table => {
                    output::print_success("Share link created");
                    output::print_kv("URL", &created.url);
                    output::print_kv("File", &created.display_name);
                    output::print_kv("Protected", &created.is_protected.to_string());
                    if let Some(at) = created.expires_at {
                        output::print_kv("Expires", &at.to_rfc3339());
                    }
                }
            }
        }
        ShareCommand::Open {
            url,
            password,
            download,
        } => {
            let evaluator = super::build_evaluator(config)?;
            let mut session = evaluator.open_url(url)?.ok_or_else(|| {
                AppError::from(ShareError::InvalidLink {
                    reason: "not a share link",
                })
            })?;

            if let Some(password) = password {
                evaluator.submit_password(&mut session, password)?;
            }

            if !session.state().allows_reveal() {
                let locked = LockedLink::from(&session);
                match format {
                    OutputFormat::Json => output::print_json(&locked),
                    OutputFormat::Table => {
                        output::print_kv("File", &locked.display_name);
                        output::print_warning("This file is password protected; pass --password");
                    }
                }
                return Ok(());
            }

            let revealed = evaluator.reveal(&mut session)?;

            match format {
                OutputFormat::Json => output::print_json(&revealed),
                OutputFormat::Table => {
                    output::print_kv("File", &revealed.display_name);
                    output::print_kv("Kind", session.file_kind().label());
                    if let Some(label) = session.expiry_label(evaluator.now()) {
                        output::print_kv("Expiry", &label);
                    }
                    output::print_kv("Download", &revealed.urls.download);
                    let rows: Vec<GatewayRow> = revealed
                        .urls
                        .alternates
                        .iter()
                        .cloned()
                        .map(GatewayRow::from)
                        .collect();
                    output::print_list(&rows, format);
                }
            }

            if let Some(path) = download {
                let fetcher = GatewayFetcher::new(&config.gateway)?;
                let content = fetcher.fetch_first(&revealed.urls.alternates).await?;
                tokio::fs::write(path, &content.body).await?;
                output::print_success(&format!(
                    "Saved {} bytes from {} to {}",
                    content.body.len(),
                    content.gateway,
                    path.display()
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinshare_share::ShareDescriptor;

    #[test]
    fn test_locked_link_serializes_without_urls() {
        let evaluator = crate::commands::build_evaluator(&AppConfig::default()).expect("evaluator");
        let session = evaluator.open(
            ShareDescriptor::new("QmContentId123", "report.pdf").protected("c2VjcmV0MQ=="),
        );

        let json = serde_json::to_value(LockedLink::from(&session)).expect("serialize");
        assert_eq!(json["display_name"], "report.pdf");
        assert_eq!(json["state"], "unverified");
        assert_eq!(json["is_protected"], true);
        assert!(json.get("urls").is_none());
    }
}
