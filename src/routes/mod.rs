//! HTTP routes for Rehnuma

pub mod health;
pub mod institutes;

pub use health::{health_check, readiness_check, version_info};
pub use institutes::handle_institute_request;
