//! External collaborators
//!
//! Clients and helpers the core pipeline depends on: the cloud media
//! host and the agent-id generator.

pub mod agent_id;
pub mod media_host;

pub use media_host::{CloudMediaClient, CloudMediaConfig, MediaHost};
