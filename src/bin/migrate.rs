//! Rehnuma Migrate - legacy media migration
//!
//! Scans institute records for media fields still referencing
//! server-local upload paths, uploads the files to the cloud media
//! host, and rewrites each record to the returned durable URLs.
//!
//! Safe to re-run: migrated URLs no longer match the legacy prefix, so
//! a second pass changes nothing. Per-record failures are logged and
//! skipped; re-running the tool is the retry mechanism.
//!
//! Usage:
//!   rehnuma-migrate --media-upload-url https://media.example.com/upload
//!
//! Environment variables:
//!   MONGODB_URI - MongoDB connection URI (default: mongodb://localhost:27017)
//!   MONGODB_DB - database name (default: rehnuma)
//!   UPLOADS_DIR - local uploads directory (default: ./uploads)
//!   LEGACY_MEDIA_PREFIX - legacy path prefix (default: /uploads/)
//!   MEDIA_UPLOAD_URL - media host upload endpoint (required)
//!   MEDIA_API_KEY - media host bearer key (optional)
//!   MEDIA_FOLDER - destination folder (default: rehnuma)

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rehnuma::db::schemas::{InstituteDoc, INSTITUTE_COLLECTION};
use rehnuma::db::MongoClient;
use rehnuma::migrate::{Migrator, UploadsDir};
use rehnuma::services::{CloudMediaClient, CloudMediaConfig};

#[derive(Parser, Debug)]
#[command(name = "rehnuma-migrate")]
#[command(about = "Migrate legacy local media references to the cloud media host")]
#[command(version)]
struct Args {
    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "rehnuma")]
    mongodb_db: String,

    /// Directory where legacy upload files live on disk
    #[arg(long, env = "UPLOADS_DIR", default_value = "./uploads")]
    uploads_dir: String,

    /// Path prefix identifying legacy local media references
    #[arg(long, env = "LEGACY_MEDIA_PREFIX", default_value = "/uploads/")]
    legacy_media_prefix: String,

    /// Cloud media host upload endpoint
    #[arg(long, env = "MEDIA_UPLOAD_URL")]
    media_upload_url: String,

    /// API key for the cloud media host
    #[arg(long, env = "MEDIA_API_KEY")]
    media_api_key: Option<String>,

    /// Destination folder on the media host
    #[arg(long, env = "MEDIA_FOLDER", default_value = "rehnuma")]
    media_folder: String,

    /// Upload timeout in milliseconds
    #[arg(long, env = "UPLOAD_TIMEOUT_MS", default_value = "30000")]
    upload_timeout_ms: u64,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,rehnuma=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse arguments
    let args = Args::parse();

    info!(
        "Starting media migration (db: {}, uploads: {}, prefix: {})",
        args.mongodb_db, args.uploads_dir, args.legacy_media_prefix
    );

    let mongo = match MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await {
        Ok(client) => client,
        Err(e) => {
            error!("MongoDB connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let institutes = match mongo.collection::<InstituteDoc>(INSTITUTE_COLLECTION).await {
        Ok(col) => col,
        Err(e) => {
            error!("Failed to open institutes collection: {}", e);
            std::process::exit(1);
        }
    };

    let media = match CloudMediaClient::new(CloudMediaConfig {
        upload_url: args.media_upload_url.clone(),
        api_key: args.media_api_key.clone(),
        timeout_ms: args.upload_timeout_ms,
    }) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build media host client: {}", e);
            std::process::exit(1);
        }
    };

    let files = UploadsDir::new(args.uploads_dir.as_str(), args.legacy_media_prefix.as_str());
    let migrator = Migrator::new(&media, &files, &args.legacy_media_prefix, &args.media_folder);

    match migrator.run(&institutes).await {
        Ok(summary) => {
            info!("======================================");
            info!("  Migration complete");
            info!("======================================");
            info!("Records scanned:    {}", summary.scanned);
            info!("With legacy paths:  {}", summary.with_legacy);
            info!("Records updated:    {}", summary.records_updated);
            info!("Logos migrated:     {}", summary.logos_migrated);
            info!("Banners migrated:   {}", summary.banners_migrated);
            info!("Gallery migrated:   {}", summary.gallery_migrated);
            info!("Uploads failed:     {}", summary.uploads_failed);
            info!("Files missing:      {}", summary.files_missing);
            info!("======================================");
        }
        Err(e) => {
            error!("Migration run failed: {}", e);
            std::process::exit(1);
        }
    }
}
