//! Approval state machine
//!
//! Every listing starts pending. An admin moves it to approved or
//! rejected exactly once; there is no transition out of a decided
//! state. Only approved listings appear in public discovery.

use bson::{doc, oid::ObjectId, DateTime, Document};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::auth::Caller;
use crate::db::schemas::InstituteDoc;
use crate::types::{DirectoryError, Result};

/// Lifecycle state controlling public visibility
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin decision on a pending listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

impl ApprovalDecision {
    pub fn target(&self) -> ApprovalStatus {
        match self {
            Self::Approve => ApprovalStatus::Approved,
            Self::Reject => ApprovalStatus::Rejected,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

/// Compute the state after a decision
///
/// Only a pending record accepts a decision; anything else is a
/// conflict (re-opening a decision is not supported here).
pub fn transition(current: ApprovalStatus, decision: ApprovalDecision) -> Result<ApprovalStatus> {
    match current {
        ApprovalStatus::Pending => Ok(decision.target()),
        decided => Err(DirectoryError::Conflict(format!(
            "cannot {} a record that is already {}",
            decision.verb(),
            decided
        ))),
    }
}

/// BSON `$set` fields recording a decision, for a partial update by id
///
/// Stamps the deciding admin and the decision time alongside the new
/// status.
pub fn decision_update(
    decision: ApprovalDecision,
    admin: ObjectId,
    notes: Option<String>,
) -> Document {
    let mut set = doc! {
        "approval_status": decision.target().as_str(),
        "approved_by": admin,
        "approved_at": DateTime::now(),
    };
    if let Some(notes) = notes {
        set.insert("approval_notes", notes);
    }
    set
}

/// Whether a record is visible to the given viewer
///
/// Approved records are public. Pending and rejected records are
/// visible only to their owner and to admins.
pub fn visible_to(record: &InstituteDoc, viewer: Option<&Caller>) -> bool {
    if record.approval_status == ApprovalStatus::Approved {
        return true;
    }
    match viewer {
        Some(caller) => caller.is_admin() || caller.id == record.owner,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::{Domain, InstituteType, Metadata};
    use crate::db::schemas::UserRole;

    fn record_with_status(status: ApprovalStatus, owner: ObjectId) -> InstituteDoc {
        InstituteDoc {
            _id: None,
            metadata: Metadata::new(),
            agent_id: "abc-x1y2z3".into(),
            domain: Domain::Education,
            institute_type: InstituteType::University,
            name: "ABC".into(),
            location: "Lahore, Punjab".into(),
            city: "Lahore".into(),
            province: "Punjab".into(),
            description: String::new(),
            specialization: String::new(),
            phone: String::new(),
            email: String::new(),
            website: String::new(),
            facebook: String::new(),
            instagram: String::new(),
            courses: Vec::new(),
            faculty: Vec::new(),
            accreditation: Vec::new(),
            facilities: Vec::new(),
            logo: "https://example.com/logo.png".into(),
            banner: "https://example.com/banner.png".into(),
            gallery: Vec::new(),
            owner,
            owner_name: "Owner".into(),
            owner_email: "owner@example.com".into(),
            owner_phone: String::new(),
            verified: false,
            approval_status: status,
            approval_notes: None,
            approved_by: None,
            approved_at: None,
            rating: 4.5,
            total_reviews: 0,
        }
    }

    fn caller(id: ObjectId, role: UserRole) -> Caller {
        Caller {
            id,
            name: "X".into(),
            email: "x@example.com".into(),
            phone: String::new(),
            role,
        }
    }

    #[test]
    fn test_pending_accepts_both_decisions() {
        assert_eq!(
            transition(ApprovalStatus::Pending, ApprovalDecision::Approve).unwrap(),
            ApprovalStatus::Approved
        );
        assert_eq!(
            transition(ApprovalStatus::Pending, ApprovalDecision::Reject).unwrap(),
            ApprovalStatus::Rejected
        );
    }

    #[test]
    fn test_decided_states_are_terminal() {
        for decided in [ApprovalStatus::Approved, ApprovalStatus::Rejected] {
            for decision in [ApprovalDecision::Approve, ApprovalDecision::Reject] {
                let err = transition(decided, decision).unwrap_err();
                assert!(matches!(err, DirectoryError::Conflict(_)));
            }
        }
    }

    #[test]
    fn test_decision_update_stamps_admin_and_time() {
        let admin = ObjectId::new();
        let set = decision_update(ApprovalDecision::Approve, admin, Some("looks good".into()));

        assert_eq!(set.get_str("approval_status").unwrap(), "approved");
        assert_eq!(set.get_object_id("approved_by").unwrap(), admin);
        assert!(set.get_datetime("approved_at").is_ok());
        assert_eq!(set.get_str("approval_notes").unwrap(), "looks good");
    }

    #[test]
    fn test_decision_update_notes_optional() {
        let set = decision_update(ApprovalDecision::Reject, ObjectId::new(), None);
        assert_eq!(set.get_str("approval_status").unwrap(), "rejected");
        assert!(set.get("approval_notes").is_none());
    }

    #[test]
    fn test_visibility() {
        let owner = ObjectId::new();
        let stranger = ObjectId::new();

        let approved = record_with_status(ApprovalStatus::Approved, owner);
        let pending = record_with_status(ApprovalStatus::Pending, owner);

        // Approved is public
        assert!(visible_to(&approved, None));
        assert!(visible_to(&approved, Some(&caller(stranger, UserRole::User))));

        // Pending only for owner and admins
        assert!(!visible_to(&pending, None));
        assert!(!visible_to(&pending, Some(&caller(stranger, UserRole::User))));
        assert!(visible_to(&pending, Some(&caller(owner, UserRole::User))));
        assert!(visible_to(&pending, Some(&caller(stranger, UserRole::Admin))));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
