//! Submission validation
//!
//! Hard-required fields and enum membership are checked before any
//! write; a failure aborts the whole operation with the collected
//! field violations. Sub-record name checks are diagnostic only:
//! entries with an empty name are kept, by product decision.

use crate::db::schemas::{Course, Domain, FacultyMember, InstituteType};
use crate::institute::assemble::CreateInstituteRequest;
use crate::types::FieldViolation;

/// Collect violations for the four hard-required fields
pub fn check_required(req: &CreateInstituteRequest) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if req.name.trim().is_empty() {
        violations.push(FieldViolation::new("name", "name is required"));
    }
    if req.institute_type.trim().is_empty() {
        violations.push(FieldViolation::new("type", "type is required"));
    }
    if req.city.trim().is_empty() {
        violations.push(FieldViolation::new("city", "city is required"));
    }
    if req.province.trim().is_empty() {
        violations.push(FieldViolation::new("province", "province is required"));
    }

    violations
}

/// Resolve domain and type, collecting enum violations
///
/// An omitted domain defaults to education. Returns `Err` with the
/// violations when either value is outside its allowed set; the caller
/// merges these with any other violations before aborting.
pub fn resolve_kind(
    domain: Option<&str>,
    type_name: &str,
) -> Result<(Domain, InstituteType), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let resolved_domain = match domain {
        None => Some(Domain::default()),
        Some(raw) => {
            let parsed = Domain::parse(raw);
            if parsed.is_none() {
                violations.push(FieldViolation::new(
                    "domain",
                    format!("'{}' is not one of: education, healthcare", raw),
                ));
            }
            parsed
        }
    };

    let resolved_type = InstituteType::parse(type_name);
    if resolved_type.is_none() && !type_name.trim().is_empty() {
        violations.push(FieldViolation::new(
            "type",
            format!("'{}' is not a recognized institute type", type_name),
        ));
    }

    match (resolved_domain, resolved_type) {
        (Some(d), Some(t)) => {
            if !t.allowed_for(d) {
                violations.push(FieldViolation::new(
                    "type",
                    format!(
                        "'{}' is not valid for domain '{}'; allowed: {}",
                        t,
                        d,
                        InstituteType::allowed_names(d).join(", ")
                    ),
                ));
                return Err(violations);
            }
            Ok((d, t))
        }
        _ => Err(violations),
    }
}

/// Diagnostic issues for kept-but-non-conformant sub-record entries
///
/// An entry with an empty name is reported, not dropped and not fatal.
pub fn subrecord_issues(courses: &[Course], faculty: &[FacultyMember]) -> Vec<String> {
    let mut issues = Vec::new();

    for (i, course) in courses.iter().enumerate() {
        if course.name.trim().is_empty() {
            issues.push(format!("courses[{}].name is empty", i));
        }
    }
    for (i, member) in faculty.iter().enumerate() {
        if member.name.trim().is_empty() {
            issues.push(format!("faculty[{}].name is empty", i));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_request() -> CreateInstituteRequest {
        serde_json::from_str(
            r#"{"name":"ABC","type":"University","city":"Lahore","province":"Punjab"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_complete_request_has_no_violations() {
        assert!(check_required(&minimal_request()).is_empty());
    }

    #[test]
    fn test_each_missing_field_is_named() {
        let req: CreateInstituteRequest = serde_json::from_str("{}").unwrap();
        let violations = check_required(&req);
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "type", "city", "province"]);
    }

    #[test]
    fn test_resolve_kind_defaults_domain() {
        let (domain, kind) = resolve_kind(None, "University").unwrap();
        assert_eq!(domain, Domain::Education);
        assert_eq!(kind, InstituteType::University);
    }

    #[test]
    fn test_resolve_kind_rejects_cross_domain_type() {
        let err = resolve_kind(Some("healthcare"), "University").unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].field, "type");
        assert!(err[0].message.contains("Hospital"));
    }

    #[test]
    fn test_resolve_kind_rejects_unknown_values() {
        let err = resolve_kind(Some("retail"), "Mall").unwrap_err();
        let fields: Vec<&str> = err.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["domain", "type"]);
    }

    #[test]
    fn test_subrecord_issues_flag_but_keep() {
        let courses = vec![
            Course {
                name: "CS".into(),
                ..Course::default()
            },
            Course::default(),
        ];
        let faculty = vec![FacultyMember::default()];

        let issues = subrecord_issues(&courses, &faculty);
        assert_eq!(
            issues,
            vec![
                "courses[1].name is empty".to_string(),
                "faculty[0].name is empty".to_string()
            ]
        );
        // The entries themselves are untouched
        assert_eq!(courses.len(), 2);
    }
}
