//! EISCAT data deposit publisher.
//!
//! Reads a run descriptor and parameter catalogue handed over by the
//! file-conversion pipeline, synthesizes the deposit metadata record and
//! parameter patch, and runs the draft / patch / upload sequence against
//! the B2SHARE repository.

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use b2share_client::{B2ShareClient, B2ShareConfig, Publisher};
use eiscat_metadata::{
    build_parameter_patch, DataLevel, MetadataBuilder, ParameterDescriptor, RunDescriptor,
    SegmentedNameResolver,
};

use config::PublisherConfig;

#[derive(Parser, Debug)]
#[command(name = "publisher")]
#[command(about = "Publishes EISCAT data products to B2SHARE")]
struct Args {
    /// Publisher configuration file
    #[arg(long, env = "PUBLISHER_CONFIG", default_value = "config/publisher.yaml")]
    config: PathBuf,

    /// Run descriptor JSON handed over by the conversion pipeline
    #[arg(long)]
    run: PathBuf,

    /// Parameter catalogue JSON for the run
    #[arg(long)]
    parameters: PathBuf,

    /// Data level of the product
    #[arg(long)]
    level: u8,

    /// Build and print the record and patch without contacting the repository
    #[arg(long)]
    dry_run: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = PublisherConfig::load(&args.config)?;
    let run = read_run_descriptor(&args.run)?;
    let parameters = read_parameter_catalogue(&args.parameters)?;
    let data_level = DataLevel(args.level);

    info!(
        experiment_id = %run.experiment_id,
        antenna = %run.antenna,
        location = %run.location,
        level = %data_level,
        parameters = parameters.len(),
        "Loaded run descriptor"
    );

    let builder = MetadataBuilder::new(
        config.community.id.to_string(),
        config.community.specific_id.to_string(),
        SegmentedNameResolver,
    );

    let output_file_url = format!("{}{}", config.local_base_url, run.output_path.display());
    let record = builder.build(&run, data_level, &output_file_url, Utc::now().naive_utc())?;
    let patch = build_parameter_patch(&parameters, builder.community_specific_id());

    if args.dry_run || !config.enabled {
        println!("{}", serde_json::to_string_pretty(&record)?);
        println!("{}", serde_json::to_string_pretty(&patch)?);
        return Ok(());
    }

    let client = B2ShareClient::new(B2ShareConfig {
        base_url: config.repository.base_url.clone(),
        access_token: config.access_token()?,
        request_timeout: config.repository.request_timeout(),
    })?;

    match Publisher::new(client).publish(&record, &patch, &run.output_path).await {
        Ok(receipt) => {
            info!(draft_id = %receipt.draft_id, "Publish complete");
            Ok(())
        }
        Err(e) => {
            // The draft id is the resume point; it must reach the operator.
            match e.draft_id() {
                Some(id) => error!(
                    stage = %e.stage(),
                    draft_id = %id,
                    "Publish failed; draft remains in repository and can be resumed"
                ),
                None => error!(stage = %e.stage(), "Publish failed before a draft was created"),
            }
            Err(e.into())
        }
    }
}

fn read_run_descriptor(path: &Path) -> Result<RunDescriptor> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read run descriptor: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse run descriptor: {}", path.display()))
}

fn read_parameter_catalogue(path: &Path) -> Result<Vec<ParameterDescriptor>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameter catalogue: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse parameter catalogue: {}", path.display()))
}
