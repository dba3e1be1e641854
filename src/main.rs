//! Bucket Browser
//!
//! Command-line front end: connect with an access-key pair, list its buckets,
//! or list the objects in one bucket.

use anyhow::Result;
use bucket_browser::s3::{BucketDescriptor, ObjectSummary, S3ClientFactory};
use bucket_browser::settings::Settings;
use bucket_browser::{ListingSession, SessionState};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(version, about = "List S3 buckets and objects for an access-key pair")]
struct Args {
    /// Access key ID
    #[arg(long)]
    access_key: String,

    /// Secret access key
    #[arg(long)]
    secret_key: String,

    /// List the objects in this bucket instead of listing buckets
    #[arg(long)]
    bucket: Option<String>,

    /// Override the configured region
    #[arg(long)]
    region: Option<String>,

    /// Custom S3-compatible endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Use path-style addressing
    #[arg(long)]
    path_style: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Bucket Browser v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let settings = Settings::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load settings, using defaults: {:#}", e);
        Settings::default()
    });

    let mut config = settings.client_config();
    if let Some(region) = &args.region {
        config = config.with_region(region.clone());
    }
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    if args.path_style {
        config = config.with_path_style(true);
    }

    let session = ListingSession::with_config(config);

    match &args.bucket {
        None => list_buckets(&session, &args).await,
        Some(bucket) => list_objects(&session, &args, bucket).await,
    }
}

async fn list_buckets(
    session: &ListingSession<S3ClientFactory>,
    args: &Args,
) -> Result<()> {
    let mut state: SessionState<Vec<BucketDescriptor>> = SessionState::Idle;

    state.begin();
    eprintln!("Loading...");
    let task = session.spawn_fetch_buckets(args.access_key.clone(), args.secret_key.clone());
    state.finish(task.join().await);

    match state.results() {
        Some(buckets) if !buckets.is_empty() => {
            for bucket in buckets {
                match bucket.creation_date {
                    Some(created) => println!("{}\t{}", bucket.name, created.format("%Y-%m-%d %H:%M")),
                    None => println!("{}", bucket.name),
                }
            }
        }
        _ => println!("No buckets found"),
    }

    Ok(())
}

async fn list_objects(
    session: &ListingSession<S3ClientFactory>,
    args: &Args,
    bucket: &str,
) -> Result<()> {
    let mut state: SessionState<Vec<ObjectSummary>> = SessionState::Idle;

    state.begin();
    eprintln!("Loading...");
    let task = session.spawn_fetch_objects(args.access_key.clone(), args.secret_key.clone(), bucket);
    state.finish(task.join().await);

    if let Some(e) = state.error() {
        tracing::error!("Failed to list objects in {}: {}", bucket, e);
        anyhow::bail!("{}", e);
    }

    let objects = state.results().map(Vec::as_slice).unwrap_or_default();
    if objects.is_empty() {
        println!("Bucket {} is empty", bucket);
    }
    for object in objects {
        println!("{:>12}\t{}", object.size_string(), object.key);
    }

    Ok(())
}
