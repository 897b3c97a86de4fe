//! Shared types for Rehnuma

mod error;

pub use error::{DirectoryError, FieldViolation, Result};
