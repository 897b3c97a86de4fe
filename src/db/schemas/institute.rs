//! Institute document schema
//!
//! The canonical entity for an education or healthcare listing: flat
//! descriptive fields, nested course/faculty sub-records, media slots,
//! and the approval lifecycle fields.

use bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;
use crate::institute::approval::ApprovalStatus;

/// Collection name for institutes
pub const INSTITUTE_COLLECTION: &str = "institutes";

/// Default rating for a fresh listing
pub const DEFAULT_RATING: f64 = 4.5;

/// Sector a listing belongs to
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    #[default]
    Education,
    Healthcare,
}

impl Domain {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "education" => Some(Self::Education),
            "healthcare" => Some(Self::Healthcare),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Healthcare => "healthcare",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of institute; the allowed subset depends on the domain.
///
/// Serialized with the wire spelling clients send, e.g. `"University"`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstituteType {
    #[default]
    School,
    College,
    University,
    Academy,
    Hospital,
    Clinic,
    Lab,
}

impl InstituteType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "School" => Some(Self::School),
            "College" => Some(Self::College),
            "University" => Some(Self::University),
            "Academy" => Some(Self::Academy),
            "Hospital" => Some(Self::Hospital),
            "Clinic" => Some(Self::Clinic),
            "Lab" => Some(Self::Lab),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::School => "School",
            Self::College => "College",
            Self::University => "University",
            Self::Academy => "Academy",
            Self::Hospital => "Hospital",
            Self::Clinic => "Clinic",
            Self::Lab => "Lab",
        }
    }

    /// Whether this type belongs to the given domain
    pub fn allowed_for(&self, domain: Domain) -> bool {
        match domain {
            Domain::Education => matches!(
                self,
                Self::School | Self::College | Self::University | Self::Academy
            ),
            Domain::Healthcare => matches!(self, Self::Hospital | Self::Clinic | Self::Lab),
        }
    }

    /// Wire names of the types allowed in a domain, for error messages
    pub fn allowed_names(domain: Domain) -> &'static [&'static str] {
        match domain {
            Domain::Education => &["School", "College", "University", "Academy"],
            Domain::Healthcare => &["Hospital", "Clinic", "Lab"],
        }
    }
}

impl fmt::Display for InstituteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Course offered by an institute
///
/// All fields deserialize with defaults; a missing `name` is flagged as a
/// diagnostic, never a rejection.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Course {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub fee: Option<f64>,
    #[serde(default)]
    pub category: String,
}

/// Faculty member of an institute
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FacultyMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub image: String,
}

/// Institute document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct InstituteDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Common metadata (created_at, updated_at, is_deleted)
    #[serde(default)]
    pub metadata: Metadata,

    /// Referral/agent identifier, supplied or generated at assembly
    pub agent_id: String,

    pub domain: Domain,

    #[serde(rename = "type")]
    pub institute_type: InstituteType,

    pub name: String,

    /// Display address; derived from city and province when not supplied
    pub location: String,

    pub city: String,
    pub province: String,

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

    /// Ordered, non-unique sub-records
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub faculty: Vec<FacultyMember>,
    #[serde(default)]
    pub accreditation: Vec<String>,
    #[serde(default)]
    pub facilities: Vec<String>,

    /// Media slots; always a URL after assembly (placeholder substituted)
    pub logo: String,
    pub banner: String,
    #[serde(default)]
    pub gallery: Vec<String>,

    /// Owning user; immutable after creation
    pub owner: ObjectId,

    /// Owner snapshot taken at creation, never re-synced
    pub owner_name: String,
    pub owner_email: String,
    #[serde(default)]
    pub owner_phone: String,

    #[serde(default)]
    pub verified: bool,

    #[serde(default)]
    pub approval_status: ApprovalStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_notes: Option<String>,

    /// Admin who decided the approval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<ObjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime>,

    #[serde(default = "default_rating")]
    pub rating: f64,

    #[serde(default)]
    pub total_reviews: i64,
}

fn default_rating() -> f64 {
    DEFAULT_RATING
}

impl InstituteDoc {
    pub fn is_public(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }
}

impl IntoIndexes for InstituteDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Unique index on agent_id
            (
                doc! { "agent_id": 1 },
                Some(
                    IndexOptions::builder()
                        .unique(true)
                        .name("agent_id_unique".to_string())
                        .build(),
                ),
            ),
            // Public listing filter: status + domain
            (
                doc! { "approval_status": 1, "domain": 1 },
                Some(
                    IndexOptions::builder()
                        .name("approval_domain_index".to_string())
                        .build(),
                ),
            ),
            // City filter for discovery
            (
                doc! { "city": 1 },
                Some(
                    IndexOptions::builder()
                        .name("city_index".to_string())
                        .build(),
                ),
            ),
            // Owner lookups for /mine
            (
                doc! { "owner": 1 },
                Some(
                    IndexOptions::builder()
                        .name("owner_index".to_string())
                        .build(),
                ),
            ),
        ]
    }
}

impl MutMetadata for InstituteDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_parse() {
        assert_eq!(Domain::parse("education"), Some(Domain::Education));
        assert_eq!(Domain::parse("Healthcare"), Some(Domain::Healthcare));
        assert_eq!(Domain::parse("retail"), None);
    }

    #[test]
    fn test_type_domain_membership() {
        assert!(InstituteType::University.allowed_for(Domain::Education));
        assert!(!InstituteType::University.allowed_for(Domain::Healthcare));
        assert!(InstituteType::Clinic.allowed_for(Domain::Healthcare));
        assert!(!InstituteType::Clinic.allowed_for(Domain::Education));
    }

    #[test]
    fn test_type_wire_spelling() {
        // Clients send PascalCase type names, e.g. "University"
        let json = serde_json::to_string(&InstituteType::University).unwrap();
        assert_eq!(json, "\"University\"");
        assert_eq!(InstituteType::parse("University"), Some(InstituteType::University));
        assert_eq!(InstituteType::parse("university"), None);
    }

    #[test]
    fn test_course_partial_decode() {
        let course: Course = serde_json::from_str(r#"{"name":"CS"}"#).unwrap();
        assert_eq!(course.name, "CS");
        assert_eq!(course.description, "");
        assert_eq!(course.duration, "");
        assert_eq!(course.fee, None);
        assert_eq!(course.category, "");
    }
}
