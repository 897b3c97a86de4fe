//! Legacy media migration
//!
//! Rewrites institute media slots that still reference server-local
//! upload paths (`/uploads/...`) to durable URLs on the cloud media
//! host. Safe to re-run: migrated values no longer match the legacy
//! prefix, so a second pass stages nothing.
//!
//! Records are processed sequentially to bound concurrent upload load,
//! and a failure on one record never aborts the rest of the run.

use bson::Document;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::db::schemas::InstituteDoc;
use crate::db::MongoCollection;
use crate::services::MediaHost;
use crate::types::Result;

/// Lookup of legacy references on the local filesystem
pub trait LocalFiles: Send + Sync {
    /// Resolve a legacy reference to an on-disk path, if the file exists
    fn resolve(&self, legacy: &str) -> Option<PathBuf>;
}

/// Resolves legacy references under an uploads directory on disk
pub struct UploadsDir {
    root: PathBuf,
    prefix: String,
}

impl UploadsDir {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }
}

impl LocalFiles for UploadsDir {
    fn resolve(&self, legacy: &str) -> Option<PathBuf> {
        let relative = legacy.strip_prefix(&self.prefix)?;
        let path = self.root.join(relative);
        path.is_file().then_some(path)
    }
}

/// Whether a media value still references legacy local storage
pub fn is_legacy_path(value: &str, prefix: &str) -> bool {
    value.starts_with(prefix)
}

/// Per-category counts for one migration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Records examined
    pub scanned: u64,
    /// Records holding at least one legacy reference
    pub with_legacy: u64,
    /// Records actually written
    pub records_updated: u64,
    pub logos_migrated: u64,
    pub banners_migrated: u64,
    pub gallery_migrated: u64,
    /// Uploads the media host rejected or that errored
    pub uploads_failed: u64,
    /// Legacy references whose local file is gone
    pub files_missing: u64,
}

impl MigrationSummary {
    pub fn fields_migrated(&self) -> u64 {
        self.logos_migrated + self.banners_migrated + self.gallery_migrated
    }
}

/// Scan-and-rewrite engine over the institutes collection
pub struct Migrator<'a> {
    media: &'a dyn MediaHost,
    files: &'a dyn LocalFiles,
    prefix: &'a str,
    folder: &'a str,
}

impl<'a> Migrator<'a> {
    pub fn new(
        media: &'a dyn MediaHost,
        files: &'a dyn LocalFiles,
        prefix: &'a str,
        folder: &'a str,
    ) -> Self {
        Self {
            media,
            files,
            prefix,
            folder,
        }
    }

    /// Whether a record holds any legacy reference
    pub fn record_has_legacy(&self, record: &InstituteDoc) -> bool {
        is_legacy_path(&record.logo, self.prefix)
            || is_legacy_path(&record.banner, self.prefix)
            || record
                .gallery
                .iter()
                .any(|entry| is_legacy_path(entry, self.prefix))
    }

    /// Migrate a single media value; `None` means leave it unchanged
    async fn migrate_value(
        &self,
        field: &str,
        value: &str,
        summary: &mut MigrationSummary,
    ) -> Option<String> {
        if !is_legacy_path(value, self.prefix) {
            return None;
        }

        let Some(path) = self.files.resolve(value) else {
            summary.files_missing += 1;
            warn!(field = %field, value = %value, "Legacy file missing on disk, skipping");
            return None;
        };

        match self.media.upload(&path, self.folder).await {
            Ok(url) => Some(url),
            Err(e) => {
                summary.uploads_failed += 1;
                warn!(field = %field, value = %value, error = %e, "Upload failed, keeping original value");
                None
            }
        }
    }

    /// Compute the staged `$set` fields for one record; does not write
    pub async fn stage_record(
        &self,
        record: &InstituteDoc,
        summary: &mut MigrationSummary,
    ) -> Document {
        let mut staged = Document::new();

        if let Some(url) = self.migrate_value("logo", &record.logo, summary).await {
            staged.insert("logo", url);
            summary.logos_migrated += 1;
        }

        if let Some(url) = self.migrate_value("banner", &record.banner, summary).await {
            staged.insert("banner", url);
            summary.banners_migrated += 1;
        }

        // Gallery entries are evaluated independently; order is preserved
        // and untouched entries pass through unchanged.
        let mut rewritten = Vec::with_capacity(record.gallery.len());
        let mut gallery_changed = false;
        for entry in &record.gallery {
            match self.migrate_value("gallery", entry, summary).await {
                Some(url) => {
                    rewritten.push(url);
                    gallery_changed = true;
                    summary.gallery_migrated += 1;
                }
                None => rewritten.push(entry.clone()),
            }
        }
        if gallery_changed {
            staged.insert("gallery", rewritten);
        }

        staged
    }

    /// Run the migration over every institute record
    pub async fn run(&self, institutes: &MongoCollection<InstituteDoc>) -> Result<MigrationSummary> {
        let mut summary = MigrationSummary::default();

        let records = institutes.find_many(Document::new()).await?;
        info!(total = records.len(), "Scanning institutes for legacy media");

        for record in records {
            summary.scanned += 1;

            if !self.record_has_legacy(&record) {
                continue;
            }
            summary.with_legacy += 1;

            let staged = self.stage_record(&record, &mut summary).await;
            if staged.is_empty() {
                continue;
            }

            let Some(id) = record._id else {
                warn!(name = %record.name, "Record without id, cannot update");
                continue;
            };

            // One partial update per record; a failed write is logged and
            // the run moves on (re-running the tool is the retry path).
            match institutes.update_by_id(id, staged).await {
                Ok(_) => {
                    summary.records_updated += 1;
                    info!(id = %id, name = %record.name, "Migrated legacy media");
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "Failed to persist migrated media");
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::{Domain, InstituteType, Metadata};
    use crate::institute::approval::ApprovalStatus;
    use crate::types::DirectoryError;
    use async_trait::async_trait;
    use bson::oid::ObjectId;
    use std::collections::HashSet;
    use std::path::Path;

    /// Host that uploads by file name, failing for configured names
    struct FakeHost {
        fail_names: HashSet<String>,
    }

    impl FakeHost {
        fn new() -> Self {
            Self {
                fail_names: HashSet::new(),
            }
        }

        fn failing(names: &[&str]) -> Self {
            Self {
                fail_names: names.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl MediaHost for FakeHost {
        async fn upload(&self, local_path: &Path, folder: &str) -> Result<String> {
            let name = local_path.file_name().unwrap().to_string_lossy().to_string();
            if self.fail_names.contains(&name) {
                return Err(DirectoryError::Upload("host unavailable".into()));
            }
            Ok(format!("https://media.example.com/{}/{}", folder, name))
        }
    }

    /// Filesystem stub backed by a set of existing legacy references
    struct FakeFiles {
        existing: HashSet<String>,
    }

    impl FakeFiles {
        fn with(existing: &[&str]) -> Self {
            Self {
                existing: existing.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl LocalFiles for FakeFiles {
        fn resolve(&self, legacy: &str) -> Option<PathBuf> {
            self.existing
                .contains(legacy)
                .then(|| PathBuf::from(format!("/srv{}", legacy)))
        }
    }

    fn record(logo: &str, banner: &str, gallery: Vec<&str>) -> InstituteDoc {
        InstituteDoc {
            _id: Some(ObjectId::new()),
            metadata: Metadata::new(),
            agent_id: "abc-x1y2z3".into(),
            domain: Domain::Education,
            institute_type: InstituteType::School,
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
            logo: logo.into(),
            banner: banner.into(),
            gallery: gallery.into_iter().map(String::from).collect(),
            owner: ObjectId::new(),
            owner_name: "Owner".into(),
            owner_email: "owner@example.com".into(),
            owner_phone: String::new(),
            verified: false,
            approval_status: ApprovalStatus::Approved,
            approval_notes: None,
            approved_by: None,
            approved_at: None,
            rating: 4.5,
            total_reviews: 0,
        }
    }

    #[test]
    fn test_legacy_predicate() {
        assert!(is_legacy_path("/uploads/x.png", "/uploads/"));
        assert!(!is_legacy_path("https://media.example.com/x.png", "/uploads/"));
        assert!(!is_legacy_path("", "/uploads/"));
    }

    #[tokio::test]
    async fn test_migrates_all_three_slots() {
        let host = FakeHost::new();
        let files = FakeFiles::with(&["/uploads/logo.png", "/uploads/banner.png", "/uploads/g1.png"]);
        let migrator = Migrator::new(&host, &files, "/uploads/", "rehnuma");

        let rec = record("/uploads/logo.png", "/uploads/banner.png", vec!["/uploads/g1.png"]);
        let mut summary = MigrationSummary::default();
        let staged = migrator.stage_record(&rec, &mut summary).await;

        assert_eq!(
            staged.get_str("logo").unwrap(),
            "https://media.example.com/rehnuma/logo.png"
        );
        assert_eq!(
            staged.get_str("banner").unwrap(),
            "https://media.example.com/rehnuma/banner.png"
        );
        assert_eq!(summary.fields_migrated(), 3);
        assert_eq!(summary.uploads_failed, 0);
        assert_eq!(summary.files_missing, 0);
    }

    #[tokio::test]
    async fn test_missing_file_skipped_and_counted() {
        let host = FakeHost::new();
        let files = FakeFiles::with(&[]);
        let migrator = Migrator::new(&host, &files, "/uploads/", "rehnuma");

        let rec = record("https://media.example.com/ok.png", "/uploads/gone.png", vec![]);
        let mut summary = MigrationSummary::default();
        let staged = migrator.stage_record(&rec, &mut summary).await;

        // Record left unchanged, skip counter incremented
        assert!(staged.is_empty());
        assert_eq!(summary.files_missing, 1);
        assert_eq!(summary.fields_migrated(), 0);
    }

    #[tokio::test]
    async fn test_upload_failure_keeps_original() {
        let host = FakeHost::failing(&["banner.png"]);
        let files = FakeFiles::with(&["/uploads/banner.png", "/uploads/logo.png"]);
        let migrator = Migrator::new(&host, &files, "/uploads/", "rehnuma");

        let rec = record("/uploads/logo.png", "/uploads/banner.png", vec![]);
        let mut summary = MigrationSummary::default();
        let staged = migrator.stage_record(&rec, &mut summary).await;

        // The failing slot is left alone; the other still migrates
        assert!(staged.get_str("logo").is_ok());
        assert!(staged.get("banner").is_none());
        assert_eq!(summary.uploads_failed, 1);
        assert_eq!(summary.logos_migrated, 1);
        assert_eq!(summary.banners_migrated, 0);
    }

    #[tokio::test]
    async fn test_gallery_order_preserved() {
        let host = FakeHost::failing(&["d.png"]);
        let files = FakeFiles::with(&["/uploads/a.png", "/uploads/d.png"]);
        let migrator = Migrator::new(&host, &files, "/uploads/", "rehnuma");

        let rec = record(
            "https://media.example.com/logo.png",
            "https://media.example.com/banner.png",
            vec![
                "/uploads/a.png",                    // migrates
                "https://already.example.com/b.png", // passes through
                "/uploads/c.png",                    // file missing
                "/uploads/d.png",                    // upload fails
            ],
        );
        let mut summary = MigrationSummary::default();
        let staged = migrator.stage_record(&rec, &mut summary).await;

        let gallery: Vec<&str> = staged
            .get_array("gallery")
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            gallery,
            vec![
                "https://media.example.com/rehnuma/a.png",
                "https://already.example.com/b.png",
                "/uploads/c.png",
                "/uploads/d.png",
            ]
        );
        assert_eq!(summary.gallery_migrated, 1);
        assert_eq!(summary.files_missing, 1);
        assert_eq!(summary.uploads_failed, 1);
    }

    #[tokio::test]
    async fn test_second_pass_stages_nothing() {
        let host = FakeHost::new();
        let files = FakeFiles::with(&["/uploads/logo.png"]);
        let migrator = Migrator::new(&host, &files, "/uploads/", "rehnuma");

        let mut rec = record("/uploads/logo.png", "https://media.example.com/banner.png", vec![]);
        let mut summary = MigrationSummary::default();
        let staged = migrator.stage_record(&rec, &mut summary).await;
        assert_eq!(summary.logos_migrated, 1);

        // Apply the staged update the way the run would
        rec.logo = staged.get_str("logo").unwrap().to_string();

        let mut second = MigrationSummary::default();
        let staged_again = migrator.stage_record(&rec, &mut second).await;
        assert!(staged_again.is_empty());
        assert_eq!(second, MigrationSummary::default());
        assert!(!migrator.record_has_legacy(&rec));
    }
}
