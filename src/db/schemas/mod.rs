//! Database schemas for Rehnuma
//!
//! Defines MongoDB document structures for users, institutes, and the
//! site settings singleton.

mod institute;
mod metadata;
mod settings;
mod user;

pub use institute::{
    Course, Domain, FacultyMember, InstituteDoc, InstituteType, DEFAULT_RATING,
    INSTITUTE_COLLECTION,
};
pub use metadata::Metadata;
pub use settings::{get_or_create_settings, SiteSettingsDoc, SETTINGS_COLLECTION, SETTINGS_KEY};
pub use user::{UserDoc, UserRole, USER_COLLECTION};
