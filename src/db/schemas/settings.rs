//! Site settings singleton
//!
//! A single store-backed settings document, fetched with
//! find-one-or-create. Request handlers receive the loaded settings as
//! part of application state; there is no process-global.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MongoCollection, MutMetadata};
use crate::db::schemas::Metadata;
use crate::types::Result;

/// Collection name for settings
pub const SETTINGS_COLLECTION: &str = "settings";

/// Discriminator value of the singleton document
pub const SETTINGS_KEY: &str = "site";

/// Site settings document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SiteSettingsDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Common metadata (created_at, updated_at, is_deleted)
    #[serde(default)]
    pub metadata: Metadata,

    /// Fixed discriminator so the singleton is addressable without an id
    #[serde(default = "default_key")]
    pub key: String,

    /// Placeholder substituted when a submission omits its logo
    #[serde(default = "default_placeholder_logo")]
    pub placeholder_logo: String,

    /// Placeholder substituted when a submission omits its banner
    #[serde(default = "default_placeholder_banner")]
    pub placeholder_banner: String,

    /// Page size for public listings
    #[serde(default = "default_listing_page_size")]
    pub listing_page_size: i64,
}

fn default_key() -> String {
    SETTINGS_KEY.to_string()
}

fn default_placeholder_logo() -> String {
    "https://placehold.co/400x400?text=Logo".to_string()
}

fn default_placeholder_banner() -> String {
    "https://placehold.co/1200x400?text=Banner".to_string()
}

fn default_listing_page_size() -> i64 {
    50
}

impl Default for SiteSettingsDoc {
    fn default() -> Self {
        Self {
            _id: None,
            metadata: Metadata::new(),
            key: default_key(),
            placeholder_logo: default_placeholder_logo(),
            placeholder_banner: default_placeholder_banner(),
            listing_page_size: default_listing_page_size(),
        }
    }
}

impl IntoIndexes for SiteSettingsDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "key": 1 },
            Some(
                IndexOptions::builder()
                    .unique(true)
                    .name("settings_key_unique".to_string())
                    .build(),
            ),
        )]
    }
}

impl MutMetadata for SiteSettingsDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

/// Fetch the settings singleton, creating it with defaults on first run
pub async fn get_or_create_settings(
    col: &MongoCollection<SiteSettingsDoc>,
) -> Result<SiteSettingsDoc> {
    if let Some(existing) = col.find_one(doc! { "key": SETTINGS_KEY }).await? {
        return Ok(existing);
    }

    let mut fresh = SiteSettingsDoc::default();
    let id = col.insert_one(fresh.clone()).await?;
    fresh._id = Some(id);
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_deterministic() {
        let a = SiteSettingsDoc::default();
        let b = SiteSettingsDoc::default();
        assert_eq!(a.placeholder_logo, b.placeholder_logo);
        assert_eq!(a.placeholder_banner, b.placeholder_banner);
        assert!(a.placeholder_logo.starts_with("https://"));
        assert_eq!(a.key, SETTINGS_KEY);
    }
}
