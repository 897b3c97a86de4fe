//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. One task per
//! connection; request routing is a plain method/path match.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::auth::JwtValidator;
use crate::config::Args;
use crate::db::schemas::{
    get_or_create_settings, InstituteDoc, SiteSettingsDoc, UserDoc, INSTITUTE_COLLECTION,
    SETTINGS_COLLECTION, USER_COLLECTION,
};
use crate::db::{MongoClient, MongoCollection};
use crate::institute::MediaDefaults;
use crate::routes;
use crate::types::DirectoryError;

type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub mongo: MongoClient,
    /// Bearer token validator for caller identity
    pub jwt: JwtValidator,
    pub institutes: MongoCollection<InstituteDoc>,
    pub users: MongoCollection<UserDoc>,
    /// Store-backed settings singleton, loaded at startup
    pub settings: SiteSettingsDoc,
    /// Placeholders substituted for omitted media fields
    pub media_defaults: MediaDefaults,
    pub started_at: Instant,
}

impl AppState {
    /// Build application state: typed collections with their indexes,
    /// plus the settings singleton (created with defaults on first run)
    pub async fn init(args: Args, mongo: MongoClient) -> Result<Self, DirectoryError> {
        let institutes = mongo.collection::<InstituteDoc>(INSTITUTE_COLLECTION).await?;
        let users = mongo.collection::<UserDoc>(USER_COLLECTION).await?;

        let settings_col = mongo
            .collection::<SiteSettingsDoc>(SETTINGS_COLLECTION)
            .await?;
        let settings = get_or_create_settings(&settings_col).await?;
        let media_defaults = MediaDefaults::from(&settings);

        let jwt = JwtValidator::new(&args.jwt_secret());

        Ok(Self {
            args,
            mongo,
            jwt,
            institutes,
            users,
            settings,
            media_defaults,
            started_at: Instant::now(),
        })
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), DirectoryError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Rehnuma listening on {} as node {}",
        state.args.listen, state.args.node_id
    );

    if state.args.dev_mode {
        warn!("Development mode enabled - requests without a token get a fixed dev identity");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new()
                        .preserve_header_case(true)
                        .title_case_headers(true)
                        .serve_connection(io, service)
                        .await
                    {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    // Institute API routes (/api/institutes*) - these consume the request
    if path.starts_with("/api/institutes") {
        if let Some(response) = routes::handle_institute_request(req, Arc::clone(&state)).await {
            return Ok(response);
        }
        return Ok(to_boxed(not_found_response(&path)));
    }

    let response = match (method, path.as_str()) {
        // Liveness probe - returns 200 if the service is running
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            to_boxed(routes::health_check(Arc::clone(&state)))
        }

        // Readiness probe - returns 200 only if MongoDB answers a ping
        (Method::GET, "/ready") | (Method::GET, "/readyz") => {
            to_boxed(routes::readiness_check(Arc::clone(&state)).await)
        }

        // Version info for deployment verification
        (Method::GET, "/version") => to_boxed(routes::version_info()),

        // CORS preflight
        (Method::OPTIONS, _) => to_boxed(preflight_response()),

        // Not found
        _ => to_boxed(not_found_response(&path)),
    };

    Ok(response)
}

/// Convert a Full<Bytes> body to BoxBody
fn to_boxed(response: Response<Full<Bytes>>) -> Response<BoxBody> {
    response.map(|body| body.map_err(|never| match never {}).boxed())
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PATCH, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// Not found response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "path": path,
        "hint": "See /api/institutes for the listing API"
    });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
