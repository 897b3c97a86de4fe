//! Record assembly
//!
//! Turns a raw submission plus the authenticated caller into a
//! fully-populated institute document ready for a single atomic insert.
//! Validation happens before anything else; a violation aborts the
//! whole operation with no partial state.

use serde::Deserialize;

use crate::db::schemas::{Course, FacultyMember, InstituteDoc, Metadata, SiteSettingsDoc};
use crate::db::schemas::DEFAULT_RATING;
use crate::institute::approval::ApprovalStatus;
use crate::institute::normalize::{normalize, ListInput};
use crate::institute::validate;
use crate::services::agent_id;
use crate::types::{DirectoryError, Result};

use bson::oid::ObjectId;

/// Raw creation payload as received on the wire
///
/// List-valued fields accept all three wizard/API shapes; everything
/// except the four hard-required fields is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstituteRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, rename = "type")]
    pub institute_type: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    /// Full street address; location is derived from city and province
    /// when absent
    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub instagram: String,

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
    pub gallery: Vec<String>,

    #[serde(default)]
    pub agent_id: Option<String>,
}

/// Caller identity snapshot used to stamp ownership
#[derive(Debug, Clone)]
pub struct CallerProfile {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&crate::auth::Caller> for CallerProfile {
    fn from(caller: &crate::auth::Caller) -> Self {
        Self {
            id: caller.id,
            name: caller.name.clone(),
            email: caller.email.clone(),
            phone: caller.phone.clone(),
        }
    }
}

/// Deterministic placeholders substituted for omitted media fields
#[derive(Debug, Clone)]
pub struct MediaDefaults {
    pub logo: String,
    pub banner: String,
}

impl From<&SiteSettingsDoc> for MediaDefaults {
    fn from(settings: &SiteSettingsDoc) -> Self {
        Self {
            logo: settings.placeholder_logo.clone(),
            banner: settings.placeholder_banner.clone(),
        }
    }
}

/// An assembled record plus its non-fatal diagnostics
#[derive(Debug)]
pub struct AssembledRecord {
    pub doc: InstituteDoc,
    /// Kept-but-non-conformant sub-record entries, for the caller to log
    pub issues: Vec<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Assemble a candidate record from a validated submission
///
/// Fails with `Validation` carrying every detected field violation;
/// nothing is persisted by this function.
pub fn assemble(
    req: CreateInstituteRequest,
    caller: &CallerProfile,
    media: &MediaDefaults,
) -> Result<AssembledRecord> {
    let mut violations = validate::check_required(&req);

    // Only resolve enums once the type field is present at all; a missing
    // type is already reported above.
    let kind = if req.institute_type.trim().is_empty() {
        None
    } else {
        match validate::resolve_kind(req.domain.as_deref(), &req.institute_type) {
            Ok(resolved) => Some(resolved),
            Err(mut enum_violations) => {
                violations.append(&mut enum_violations);
                None
            }
        }
    };

    if !violations.is_empty() {
        return Err(DirectoryError::Validation(violations));
    }
    let (domain, institute_type) = kind.expect("kind resolved when no violations");

    let courses = normalize(req.courses);
    let faculty = normalize(req.faculty);
    let accreditation = normalize(req.accreditation);
    let facilities = normalize(req.facilities);

    let issues = validate::subrecord_issues(&courses, &faculty);

    let location = non_empty(req.address)
        .unwrap_or_else(|| format!("{}, {}", req.city.trim(), req.province.trim()));

    let logo = non_empty(req.logo).unwrap_or_else(|| media.logo.clone());
    let banner = non_empty(req.banner).unwrap_or_else(|| media.banner.clone());

    let agent_id = non_empty(req.agent_id).unwrap_or_else(|| agent_id::generate(&req.name));

    let doc = InstituteDoc {
        _id: None,
        metadata: Metadata::new(),
        agent_id,
        domain,
        institute_type,
        name: req.name.trim().to_string(),
        location,
        city: req.city.trim().to_string(),
        province: req.province.trim().to_string(),
        description: req.description,
        specialization: req.specialization,
        phone: req.phone,
        email: req.email,
        website: req.website,
        facebook: req.facebook,
        instagram: req.instagram,
        courses,
        faculty,
        accreditation,
        facilities,
        logo,
        banner,
        gallery: req.gallery,
        owner: caller.id,
        owner_name: caller.name.clone(),
        owner_email: caller.email.clone(),
        owner_phone: caller.phone.clone(),
        verified: false,
        approval_status: ApprovalStatus::Pending,
        approval_notes: None,
        approved_by: None,
        approved_at: None,
        rating: DEFAULT_RATING,
        total_reviews: 0,
    };

    Ok(AssembledRecord { doc, issues })
}
