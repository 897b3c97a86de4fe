//! HTTP routes for institute listings
//!
//! - POST  /api/institutes               - create (authenticated, starts pending)
//! - GET   /api/institutes               - public listing, approved records only
//! - GET   /api/institutes/mine          - caller's records, any status
//! - GET   /api/institutes/{id}          - single record (visibility-gated)
//! - PATCH /api/institutes/{id}          - owner update, non-approval fields
//! - POST  /api/institutes/{id}/approve  - admin decision
//! - POST  /api/institutes/{id}/reject   - admin decision

use bson::{doc, oid::ObjectId};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::{self, Caller};
use crate::db::schemas::{Course, Domain, FacultyMember, InstituteDoc, InstituteType};
use crate::institute::approval::{self, ApprovalDecision, ApprovalStatus};
use crate::institute::normalize::{normalize, ListInput};
use crate::institute::validate;
use crate::institute::{assemble, CreateInstituteRequest};
use crate::server::AppState;
use crate::types::{DirectoryError, FieldViolation, Result};

type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Owner-editable fields; ownership and approval fields are not
/// patchable by construction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstituteRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub courses: Option<ListInput<Course>>,
    #[serde(default)]
    pub faculty: Option<ListInput<FacultyMember>>,
    #[serde(default)]
    pub accreditation: Option<ListInput<String>>,
    #[serde(default)]
    pub facilities: Option<ListInput<String>>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub gallery: Option<Vec<String>>,
}

/// Optional notes accompanying an approval decision
#[derive(Debug, Default, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

/// Wire representation of an institute record
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstituteResponse {
    pub id: String,
    pub agent_id: String,
    pub domain: Domain,
    #[serde(rename = "type")]
    pub institute_type: InstituteType,
    pub name: String,
    pub location: String,
    pub city: String,
    pub province: String,
    pub description: String,
    pub specialization: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub facebook: String,
    pub instagram: String,
    pub courses: Vec<Course>,
    pub faculty: Vec<FacultyMember>,
    pub accreditation: Vec<String>,
    pub facilities: Vec<String>,
    pub logo: String,
    pub banner: String,
    pub gallery: Vec<String>,
    pub owner: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub verified: bool,
    pub approval_status: ApprovalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,
    pub rating: f64,
    pub total_reviews: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<InstituteDoc> for InstituteResponse {
    fn from(doc: InstituteDoc) -> Self {
        Self {
            id: doc._id.map(|id| id.to_hex()).unwrap_or_default(),
            agent_id: doc.agent_id,
            domain: doc.domain,
            institute_type: doc.institute_type,
            name: doc.name,
            location: doc.location,
            city: doc.city,
            province: doc.province,
            description: doc.description,
            specialization: doc.specialization,
            phone: doc.phone,
            email: doc.email,
            website: doc.website,
            facebook: doc.facebook,
            instagram: doc.instagram,
            courses: doc.courses,
            faculty: doc.faculty,
            accreditation: doc.accreditation,
            facilities: doc.facilities,
            logo: doc.logo,
            banner: doc.banner,
            gallery: doc.gallery,
            owner: doc.owner.to_hex(),
            owner_name: doc.owner_name,
            owner_email: doc.owner_email,
            owner_phone: doc.owner_phone,
            verified: doc.verified,
            approval_status: doc.approval_status,
            approval_notes: doc.approval_notes,
            approved_by: doc.approved_by.map(|id| id.to_hex()),
            approved_at: doc.approved_at.map(|at| at.to_chrono().to_rfc3339()),
            rating: doc.rating,
            total_reviews: doc.total_reviews,
            created_at: doc
                .metadata
                .created_at
                .map(|at| at.to_chrono().to_rfc3339()),
            updated_at: doc
                .metadata
                .updated_at
                .map(|at| at.to_chrono().to_rfc3339()),
        }
    }
}

/// Listing response
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub count: usize,
    pub institutes: Vec<InstituteResponse>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<FieldViolation>>,
}

// =============================================================================
// Response Helpers
// =============================================================================

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<BoxBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PATCH, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .body(full_body(json))
        .unwrap()
}

fn error_response(err: DirectoryError) -> Response<BoxBody> {
    let status = err.status_code();
    let violations = err.violations().map(|v| v.to_vec());

    json_response(
        status,
        &ErrorResponse {
            error: err.to_string(),
            code: None,
            violations,
        },
    )
}

fn cors_preflight() -> Response<BoxBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PATCH, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .header("Access-Control-Max-Age", "86400")
        .body(empty_body())
        .unwrap()
}

fn full_body(data: impl Into<Bytes>) -> BoxBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

fn empty_body() -> BoxBody {
    Full::new(Bytes::new())
        .map_err(|never| match never {})
        .boxed()
}

async fn read_body(
    req: Request<hyper::body::Incoming>,
    max_bytes: usize,
) -> Result<Bytes> {
    let body = req
        .collect()
        .await
        .map_err(|e| DirectoryError::Http(format!("Failed to read body: {}", e)))?;

    let bytes = body.to_bytes();
    if bytes.len() > max_bytes {
        return Err(DirectoryError::Http("Request body too large".into()));
    }
    Ok(bytes)
}

async fn parse_json_body<T: for<'de> Deserialize<'de>>(
    req: Request<hyper::body::Incoming>,
    max_bytes: usize,
) -> Result<T> {
    let bytes = read_body(req, max_bytes).await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| DirectoryError::Http(format!("Invalid JSON: {}", e)))
}

/// Parse a JSON body, treating an empty body as the default value
async fn parse_json_body_or_default<T>(
    req: Request<hyper::body::Incoming>,
    max_bytes: usize,
) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    let bytes = read_body(req, max_bytes).await?;
    if bytes.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(&bytes)
        .map_err(|e| DirectoryError::Http(format!("Invalid JSON: {}", e)))
}

fn get_auth_header(req: &Request<hyper::body::Incoming>) -> Option<String> {
    req.headers()
        .get(hyper::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    query?.split('&').find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        let name = parts.next()?;
        (name == key).then(|| parts.next().unwrap_or("").to_string())
    })
}

/// Resolve the caller, substituting the fixed dev identity when
/// development mode is on and no token was sent
async fn resolve_caller(state: &AppState, auth_header: Option<&str>) -> Result<Caller> {
    if state.args.dev_mode && auth_header.is_none() {
        return Ok(Caller::dev());
    }
    auth::authenticate(&state.jwt, &state.users, auth_header).await
}

fn parse_record_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw)
        .map_err(|_| DirectoryError::BadRequest(format!("'{}' is not a valid record id", raw)))
}

// =============================================================================
// Dispatch
// =============================================================================

/// Route /api/institutes requests; returns None for unrelated paths
pub async fn handle_institute_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Option<Response<BoxBody>> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    if !path.starts_with("/api/institutes") {
        return None;
    }

    if method == Method::OPTIONS {
        return Some(cors_preflight());
    }

    // Remove query string for matching
    let path = path.split('?').next().unwrap_or(&path).to_string();
    let tail = path.strip_prefix("/api/institutes").unwrap_or("");

    let response = match (&method, tail) {
        (&Method::POST, "") | (&Method::POST, "/") => handle_create(req, state).await,
        (&Method::GET, "") | (&Method::GET, "/") => handle_list(req, state).await,
        (&Method::GET, "/mine") => handle_mine(req, state).await,

        (&Method::POST, t) if t.ends_with("/approve") => {
            let raw_id = t
                .strip_prefix('/')
                .and_then(|s| s.strip_suffix("/approve"))
                .unwrap_or("");
            handle_decision(req, state, raw_id, ApprovalDecision::Approve).await
        }
        (&Method::POST, t) if t.ends_with("/reject") => {
            let raw_id = t
                .strip_prefix('/')
                .and_then(|s| s.strip_suffix("/reject"))
                .unwrap_or("");
            handle_decision(req, state, raw_id, ApprovalDecision::Reject).await
        }

        (&Method::GET, t) if is_id_segment(t) => {
            let raw_id = t.strip_prefix('/').unwrap_or("");
            handle_get(req, state, raw_id).await
        }
        (&Method::PATCH, t) if is_id_segment(t) => {
            let raw_id = t.strip_prefix('/').unwrap_or("");
            handle_update(req, state, raw_id).await
        }

        (_, "") | (_, "/") | (_, "/mine") => json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            &ErrorResponse {
                error: "Method not allowed".into(),
                code: None,
                violations: None,
            },
        ),

        _ => json_response(
            StatusCode::NOT_FOUND,
            &ErrorResponse {
                error: "Institute endpoint not found".into(),
                code: None,
                violations: None,
            },
        ),
    };

    Some(response)
}

/// A tail like `/{id}` with no further segments
fn is_id_segment(tail: &str) -> bool {
    match tail.strip_prefix('/') {
        Some(rest) => !rest.is_empty() && !rest.contains('/'),
        None => false,
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// POST /api/institutes
///
/// Assemble and persist a new listing for the authenticated caller.
/// The record always starts pending; validation failures abort with a
/// field-level violation list and nothing is written.
async fn handle_create(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let auth_header = get_auth_header(&req);

    let caller = match resolve_caller(&state, auth_header.as_deref()).await {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };

    let body: CreateInstituteRequest =
        match parse_json_body(req, state.args.max_body_bytes).await {
            Ok(b) => b,
            Err(e) => return error_response(e),
        };

    let assembled = match assemble(body, &(&caller).into(), &state.media_defaults) {
        Ok(a) => a,
        Err(e) => return error_response(e),
    };

    for issue in &assembled.issues {
        warn!(owner = %caller.id, issue = %issue, "Kept non-conformant sub-record entry");
    }

    let mut doc = assembled.doc;
    match state.institutes.insert_one(doc.clone()).await {
        Ok(id) => {
            doc._id = Some(id);
            info!(id = %id, name = %doc.name, owner = %caller.id, "Institute created");
            json_response(StatusCode::CREATED, &InstituteResponse::from(doc))
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/institutes
///
/// Public discovery: approved records only, with optional domain, type,
/// and city filters.
async fn handle_list(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let query = req.uri().query().map(|q| q.to_string());
    let query = query.as_deref();

    let mut filter = doc! { "approval_status": ApprovalStatus::Approved.as_str() };

    if let Some(raw) = query_param(query, "domain") {
        match Domain::parse(&raw) {
            Some(domain) => {
                filter.insert("domain", domain.as_str());
            }
            None => {
                return error_response(DirectoryError::BadRequest(format!(
                    "'{}' is not one of: education, healthcare",
                    raw
                )))
            }
        }
    }

    if let Some(raw) = query_param(query, "type") {
        match InstituteType::parse(&raw) {
            Some(kind) => {
                filter.insert("type", kind.as_str());
            }
            None => {
                return error_response(DirectoryError::BadRequest(format!(
                    "'{}' is not a recognized institute type",
                    raw
                )))
            }
        }
    }

    if let Some(city) = query_param(query, "city") {
        filter.insert("city", city);
    }

    let page_size = state.settings.listing_page_size.max(0) as usize;

    match state.institutes.find_many(filter).await {
        Ok(records) => {
            let institutes: Vec<InstituteResponse> = records
                .into_iter()
                .take(page_size)
                .map(InstituteResponse::from)
                .collect();
            json_response(
                StatusCode::OK,
                &ListResponse {
                    count: institutes.len(),
                    institutes,
                },
            )
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/institutes/mine
///
/// The caller's own records, any approval status.
async fn handle_mine(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let auth_header = get_auth_header(&req);

    let caller = match resolve_caller(&state, auth_header.as_deref()).await {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };

    match state.institutes.find_many(doc! { "owner": caller.id }).await {
        Ok(records) => {
            let institutes: Vec<InstituteResponse> =
                records.into_iter().map(InstituteResponse::from).collect();
            json_response(
                StatusCode::OK,
                &ListResponse {
                    count: institutes.len(),
                    institutes,
                },
            )
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/institutes/{id}
///
/// Approved records are public; pending and rejected records resolve
/// only for their owner and admins, and 404 for everyone else.
async fn handle_get(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    raw_id: &str,
) -> Response<BoxBody> {
    let id = match parse_record_id(raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    // A missing or invalid token just means an anonymous viewer here
    let auth_header = get_auth_header(&req);
    let viewer = resolve_caller(&state, auth_header.as_deref()).await.ok();

    let record = match state.institutes.find_by_id(id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return error_response(DirectoryError::NotFound(format!(
                "No institute with id {}",
                raw_id
            )))
        }
        Err(e) => return error_response(e),
    };

    if !approval::visible_to(&record, viewer.as_ref()) {
        // Hide existence of unapproved records from other callers
        return error_response(DirectoryError::NotFound(format!(
            "No institute with id {}",
            raw_id
        )));
    }

    json_response(StatusCode::OK, &InstituteResponse::from(record))
}

/// PATCH /api/institutes/{id}
///
/// Owner (or admin) updates to descriptive fields. Ownership and
/// approval fields are never patchable through this endpoint.
async fn handle_update(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    raw_id: &str,
) -> Response<BoxBody> {
    let id = match parse_record_id(raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    let auth_header = get_auth_header(&req);
    let caller = match resolve_caller(&state, auth_header.as_deref()).await {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };

    let body: UpdateInstituteRequest =
        match parse_json_body(req, state.args.max_body_bytes).await {
            Ok(b) => b,
            Err(e) => return error_response(e),
        };

    let record = match state.institutes.find_by_id(id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return error_response(DirectoryError::NotFound(format!(
                "No institute with id {}",
                raw_id
            )))
        }
        Err(e) => return error_response(e),
    };

    if record.owner != caller.id && !caller.is_admin() {
        return error_response(DirectoryError::Forbidden(
            "Only the owner can update this record".into(),
        ));
    }

    let set = match build_update(body, &state) {
        Ok(set) => set,
        Err(e) => return error_response(e),
    };

    if set.is_empty() {
        return error_response(DirectoryError::BadRequest(
            "No updatable fields supplied".into(),
        ));
    }

    if let Err(e) = state.institutes.update_by_id(id, set).await {
        return error_response(e);
    }

    match state.institutes.find_by_id(id).await {
        Ok(Some(updated)) => json_response(StatusCode::OK, &InstituteResponse::from(updated)),
        Ok(None) => error_response(DirectoryError::NotFound(format!(
            "No institute with id {}",
            raw_id
        ))),
        Err(e) => error_response(e),
    }
}

/// Translate an update request into `$set` fields
fn build_update(body: UpdateInstituteRequest, state: &AppState) -> Result<bson::Document> {
    let mut set = bson::Document::new();
    let mut violations = Vec::new();

    // Required fields may be changed but never emptied
    for (field, value) in [
        ("name", body.name),
        ("city", body.city),
        ("province", body.province),
    ] {
        if let Some(value) = value {
            if value.trim().is_empty() {
                violations.push(FieldViolation::new(field, format!("{} cannot be empty", field)));
            } else {
                set.insert(field, value.trim());
            }
        }
    }

    if !violations.is_empty() {
        return Err(DirectoryError::Validation(violations));
    }

    if let Some(address) = body.address {
        if !address.trim().is_empty() {
            set.insert("location", address.trim());
        }
    }

    for (field, value) in [
        ("description", body.description),
        ("specialization", body.specialization),
        ("phone", body.phone),
        ("email", body.email),
        ("website", body.website),
        ("facebook", body.facebook),
        ("instagram", body.instagram),
    ] {
        if let Some(value) = value {
            set.insert(field, value);
        }
    }

    // Media is never left empty; a blank value resets to the placeholder
    if let Some(logo) = body.logo {
        let value = if logo.trim().is_empty() {
            state.media_defaults.logo.clone()
        } else {
            logo
        };
        set.insert("logo", value);
    }
    if let Some(banner) = body.banner {
        let value = if banner.trim().is_empty() {
            state.media_defaults.banner.clone()
        } else {
            banner
        };
        set.insert("banner", value);
    }
    if let Some(gallery) = body.gallery {
        set.insert("gallery", gallery);
    }

    if let Some(input) = body.courses {
        let courses = normalize(Some(input));
        for issue in validate::subrecord_issues(&courses, &[]) {
            warn!(issue = %issue, "Kept non-conformant sub-record entry");
        }
        set.insert("courses", bson::to_bson(&courses)?);
    }
    if let Some(input) = body.faculty {
        let faculty = normalize(Some(input));
        for issue in validate::subrecord_issues(&[], &faculty) {
            warn!(issue = %issue, "Kept non-conformant sub-record entry");
        }
        set.insert("faculty", bson::to_bson(&faculty)?);
    }
    if let Some(input) = body.accreditation {
        set.insert("accreditation", normalize(Some(input)));
    }
    if let Some(input) = body.facilities {
        set.insert("facilities", normalize(Some(input)));
    }

    Ok(set)
}

/// POST /api/institutes/{id}/approve and /reject
///
/// Admin-only. Records the deciding admin, the decision time, and any
/// notes; a record that is no longer pending yields 409.
async fn handle_decision(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    raw_id: &str,
    decision: ApprovalDecision,
) -> Response<BoxBody> {
    let id = match parse_record_id(raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    let auth_header = get_auth_header(&req);
    let caller = match resolve_caller(&state, auth_header.as_deref()).await {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };

    if !caller.is_admin() {
        return error_response(DirectoryError::Forbidden(
            "Approval decisions require an admin".into(),
        ));
    }

    let body: DecisionRequest =
        match parse_json_body_or_default(req, state.args.max_body_bytes).await {
            Ok(b) => b,
            Err(e) => return error_response(e),
        };

    let record = match state.institutes.find_by_id(id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return error_response(DirectoryError::NotFound(format!(
                "No institute with id {}",
                raw_id
            )))
        }
        Err(e) => return error_response(e),
    };

    if let Err(e) = approval::transition(record.approval_status, decision) {
        return error_response(e);
    }

    let set = approval::decision_update(decision, caller.id, body.notes);
    if let Err(e) = state.institutes.update_by_id(id, set).await {
        return error_response(e);
    }

    info!(
        id = %id,
        decision = decision.verb(),
        admin = %caller.id,
        "Approval decision recorded"
    );

    match state.institutes.find_by_id(id).await {
        Ok(Some(updated)) => json_response(StatusCode::OK, &InstituteResponse::from(updated)),
        Ok(None) => error_response(DirectoryError::NotFound(format!(
            "No institute with id {}",
            raw_id
        ))),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param() {
        let q = Some("domain=education&city=Lahore&type=University");
        assert_eq!(query_param(q, "domain").as_deref(), Some("education"));
        assert_eq!(query_param(q, "city").as_deref(), Some("Lahore"));
        assert_eq!(query_param(q, "province"), None);
        assert_eq!(query_param(None, "domain"), None);
    }

    #[test]
    fn test_id_segment_matching() {
        assert!(is_id_segment("/64f000000000000000000001"));
        assert!(!is_id_segment(""));
        assert!(!is_id_segment("/"));
        assert!(!is_id_segment("/abc/def"));
    }

    #[test]
    fn test_decision_request_default() {
        let parsed: DecisionRequest = serde_json::from_str("{}").unwrap();
        assert!(parsed.notes.is_none());

        let parsed: DecisionRequest =
            serde_json::from_str(r#"{"notes":"incomplete documents"}"#).unwrap();
        assert_eq!(parsed.notes.as_deref(), Some("incomplete documents"));
    }
}
