//! Edvise CLI
//!
//! Command-line administration for the record store and object storage:
//! list/create/delete for both tables, file upload, and a storage probe.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use edvise_assets::{AssetClient, AssetStore};
use edvise_core::{AssetCategory, AssetSource, CollegeDraft, EdviseConfig, LogoDraft};
use edvise_store::{RecordStore, StoreClient};

/// Edvise administration tool
#[derive(Parser, Debug)]
#[command(name = "edvise")]
#[command(version, about = "Edvise record and storage administration", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// College record operations
    College {
        #[command(subcommand)]
        command: CollegeCommand,
    },
    /// Partner logo operations
    Logo {
        #[command(subcommand)]
        command: LogoCommand,
    },
    /// Upload a file to object storage
    Upload {
        /// Path of the file to upload
        file: std::path::PathBuf,
        /// Asset category the upload belongs to
        #[arg(long, value_enum)]
        category: Category,
    },
    /// Probe the storage service and report bucket configuration
    Storage,
}

#[derive(Subcommand, Debug)]
enum CollegeCommand {
    /// List all colleges
    List,
    /// Create a college
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// City / country line
        #[arg(long)]
        location: String,
        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
        /// Ranking; non-numeric input stores null
        #[arg(long, default_value = "")]
        ranking: String,
        /// Annual tuition; non-numeric input stores null
        #[arg(long, default_value = "")]
        tuition: String,
        /// Homepage URL
        #[arg(long, default_value = "")]
        website: String,
    },
    /// Delete a college by id
    Delete {
        /// Record id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum LogoCommand {
    /// List all partner logos
    List,
    /// Create a partner logo from an image URL
    Create {
        /// Partner name
        #[arg(long)]
        name: String,
        /// Public URL of the logo image
        #[arg(long)]
        url: String,
    },
    /// Delete a logo by id
    Delete {
        /// Record id
        id: i64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Category {
    Image,
    Logo,
    Brochure,
    PartnerLogo,
}

impl From<Category> for AssetCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Image => AssetCategory::CollegeImage,
            Category::Logo => AssetCategory::CollegeLogo,
            Category::Brochure => AssetCategory::CollegeBrochure,
            Category::PartnerLogo => AssetCategory::PartnerLogo,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = EdviseConfig::from_env();
    if config.backend.url.is_empty() {
        bail!("EDVISE_BACKEND_URL is not set");
    }

    match args.command {
        Command::College { command } => college(&config, command).await,
        Command::Logo { command } => logo(&config, command).await,
        Command::Upload { file, category } => upload(&config, &file, category.into()).await,
        Command::Storage => storage(&config).await,
    }
}

async fn college(config: &EdviseConfig, command: CollegeCommand) -> Result<()> {
    let store = StoreClient::new(&config.backend);
    match command {
        CollegeCommand::List => {
            let colleges = store.list_colleges().await?;
            for c in &colleges {
                println!("{}\t{}\t{}", c.id, c.name, c.location);
            }
            println!("{} college(s)", colleges.len());
        }
        CollegeCommand::Create {
            name,
            location,
            description,
            ranking,
            tuition,
            website,
        } => {
            let draft = CollegeDraft {
                name,
                location,
                description,
                ranking,
                tuition,
                website,
                ..Default::default()
            };
            let college = store.create_college(&draft).await?;
            println!("created {} ({})", college.name, college.id);
        }
        CollegeCommand::Delete { id } => {
            store.delete_college(&id).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

async fn logo(config: &EdviseConfig, command: LogoCommand) -> Result<()> {
    let store = StoreClient::new(&config.backend);
    match command {
        LogoCommand::List => {
            let logos = store.list_logos().await?;
            for l in &logos {
                println!("{}\t{}\t{}", l.id, l.name, l.logo_url);
            }
            println!("{} logo(s)", logos.len());
        }
        LogoCommand::Create { name, url } => {
            let draft = LogoDraft {
                name,
                logo: AssetSource::Direct(url),
            };
            let logo = store.create_logo(&draft).await?;
            println!("created {} ({})", logo.name, logo.id);
        }
        LogoCommand::Delete { id } => {
            store.delete_logo(id).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

async fn upload(
    config: &EdviseConfig,
    file: &std::path::Path,
    category: AssetCategory,
) -> Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .context("file name is not valid UTF-8")?;

    let assets = AssetClient::new(&config.backend);
    let url = assets.upload(bytes, filename, category).await?;
    println!("{url}");
    Ok(())
}

async fn storage(config: &EdviseConfig) -> Result<()> {
    let assets = AssetClient::new(&config.backend);
    let buckets = assets.check_storage().await?;
    for bucket in &buckets {
        println!("{bucket}");
    }
    if buckets.iter().any(|b| b == &config.backend.bucket) {
        println!("bucket '{}' is configured", config.backend.bucket);
    } else {
        bail!(
            "bucket '{}' not found among {} bucket(s)",
            config.backend.bucket,
            buckets.len()
        );
    }
    Ok(())
}
