//! Configuration for Rehnuma
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use uuid::Uuid;

/// Rehnuma - directory backend for education and healthcare listings
#[derive(Parser, Debug, Clone)]
#[command(name = "rehnuma")]
#[command(about = "Directory backend for education and healthcare listings")]
pub struct Args {
    /// Unique node identifier for this instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "rehnuma")]
    pub mongodb_db: String,

    /// JWT secret for bearer token validation (required in production)
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: Option<String>,

    /// Enable development mode (fixed development identity when no token is sent)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum accepted JSON request body in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value = "65536")]
    pub max_body_bytes: usize,

    /// Path prefix identifying legacy local media references
    #[arg(long, env = "LEGACY_MEDIA_PREFIX", default_value = "/uploads/")]
    pub legacy_media_prefix: String,

    /// Directory where legacy upload files live on disk
    #[arg(long, env = "UPLOADS_DIR", default_value = "./uploads")]
    pub uploads_dir: String,

    /// Cloud media host upload endpoint (required by rehnuma-migrate)
    #[arg(long, env = "MEDIA_UPLOAD_URL")]
    pub media_upload_url: Option<String>,

    /// API key for the cloud media host
    #[arg(long, env = "MEDIA_API_KEY")]
    pub media_api_key: Option<String>,

    /// Destination folder on the media host
    #[arg(long, env = "MEDIA_FOLDER", default_value = "rehnuma")]
    pub media_folder: String,

    /// Upload timeout in milliseconds
    #[arg(long, env = "UPLOAD_TIMEOUT_MS", default_value = "30000")]
    pub upload_timeout_ms: u64,
}

impl Args {
    /// Get effective JWT secret (uses default in dev mode)
    pub fn jwt_secret(&self) -> String {
        if self.dev_mode {
            self.jwt_secret
                .clone()
                .unwrap_or_else(|| "dev-only-insecure-secret".to_string())
        } else {
            self.jwt_secret
                .clone()
                .expect("JWT_SECRET is required in production mode")
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.dev_mode && self.jwt_secret.is_none() {
            return Err("JWT_SECRET is required in production mode".to_string());
        }

        if !self.legacy_media_prefix.starts_with('/') {
            return Err("LEGACY_MEDIA_PREFIX must be an absolute path prefix".to_string());
        }

        if self.max_body_bytes == 0 {
            return Err("MAX_BODY_BYTES must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args::parse_from(["rehnuma", "--dev-mode"])
    }

    #[test]
    fn test_dev_mode_defaults() {
        let args = base_args();
        assert!(args.validate().is_ok());
        assert_eq!(args.jwt_secret(), "dev-only-insecure-secret");
        assert_eq!(args.legacy_media_prefix, "/uploads/");
    }

    #[test]
    fn test_production_requires_jwt_secret() {
        let args = Args::parse_from(["rehnuma"]);
        assert!(args.validate().is_err());

        let args = Args::parse_from(["rehnuma", "--jwt-secret", "s3cret"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_prefix_must_be_absolute() {
        let args = Args::parse_from(["rehnuma", "--dev-mode", "--legacy-media-prefix", "uploads/"]);
        assert!(args.validate().is_err());
    }
}
