//! Rehnuma - directory backend for education and healthcare listings
//!
//! ## Services
//!
//! - **API**: institute CRUD over MongoDB, with an approval workflow
//!   gating public visibility
//! - **Normalizer**: resolves wizard/API submission shapes into typed
//!   records once, at the boundary
//! - **Migration**: idempotent rewrite of legacy local media paths to
//!   cloud-hosted URLs (`rehnuma-migrate` binary)

pub mod auth;
pub mod config;
pub mod db;
pub mod institute;
pub mod migrate;
pub mod routes;
pub mod server;
pub mod services;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{DirectoryError, Result};
