//! Command-line client for Moorage.

mod api_client;

use anyhow::{Context, Result};
use api_client::ApiClient;
use clap::{Args, Parser, Subcommand};
use moorage_core::{format_size, FileView, ListScope};
use std::path::PathBuf;
use time::format_description::well_known::Rfc3339;

#[derive(Parser)]
#[command(name = "moorage")]
#[command(about = "Wallet-scoped file storage with on-chain ownership records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ApiArgs {
    /// Server API URL
    #[arg(long, env = "MOORAGE_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Owner wallet address (0x-prefixed)
    #[arg(long, env = "MOORAGE_OWNER")]
    owner: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file
    Upload {
        /// Path of the file to upload
        path: PathBuf,
        /// Display name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// List files
    Ls {
        /// List soft-deleted files instead of active ones
        #[arg(long)]
        deleted: bool,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Soft-delete a file (recoverable; bytes stay pinned)
    Rm {
        /// Content hash of the file
        hash: String,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Recover a soft-deleted file
    Restore {
        /// Content hash of the file
        hash: String,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Permanently delete a soft-deleted file's bytes
    Purge {
        /// Content hash of the file
        hash: String,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Show storage quota usage
    Quota {
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Report ledger/store inconsistencies
    Orphans {
        #[command(flatten)]
        api: ApiArgs,
    },
}

fn print_views(views: &[FileView]) {
    if views.is_empty() {
        println!("no files");
        return;
    }
    for view in views {
        let pinned = view
            .pinned_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());
        println!(
            "{}  {:>10}  {}  {}",
            view.content_hash,
            format_size(view.size_bytes),
            pinned,
            view.display_name
        );
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Upload { path, name, api } => {
            let client = ApiClient::new(&api.server)?;
            let data = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let name = match name {
                Some(name) => name,
                None => path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .context("path has no file name; pass --name")?,
            };
            let view = client.upload(&api.owner, &name, &data).await?;
            println!(
                "uploaded {} ({}) -> {}",
                view.display_name,
                format_size(view.size_bytes),
                view.content_hash
            );
        }
        Commands::Ls { deleted, api } => {
            let client = ApiClient::new(&api.server)?;
            let scope = if deleted {
                ListScope::SoftDeleted
            } else {
                ListScope::Active
            };
            let views = client.list_files(&api.owner, scope).await?;
            print_views(&views);
        }
        Commands::Rm { hash, api } => {
            let client = ApiClient::new(&api.server)?;
            let view = client.soft_delete(&api.owner, &hash).await?;
            println!(
                "soft-deleted {} (recover with `moorage restore {}`)",
                view.display_name, view.content_hash
            );
        }
        Commands::Restore { hash, api } => {
            let client = ApiClient::new(&api.server)?;
            let view = client.recover(&api.owner, &hash).await?;
            println!("recovered {}", view.display_name);
        }
        Commands::Purge { hash, api } => {
            let client = ApiClient::new(&api.server)?;
            client.purge(&api.owner, &hash).await?;
            println!("purged {hash} permanently");
        }
        Commands::Quota { api } => {
            let client = ApiClient::new(&api.server)?;
            let usage = client.quota(&api.owner).await?;
            println!(
                "{} / {} ({:.2}%)",
                format_size(usage.used_bytes),
                format_size(usage.quota_bytes),
                usage.percent
            );
        }
        Commands::Orphans { api } => {
            let client = ApiClient::new(&api.server)?;
            let orphans = client.orphans(&api.owner).await?;
            if orphans.is_empty() {
                println!("no inconsistencies found");
            } else {
                for orphan in orphans {
                    let size = orphan
                        .size_bytes
                        .map(format_size)
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:?}  {}  {:>10}  {}",
                        orphan.kind,
                        orphan.content_hash,
                        size,
                        orphan.display_name.as_deref().unwrap_or("-")
                    );
                }
                println!(
                    "note: reports taken right after a write may be transient; re-check before acting"
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
