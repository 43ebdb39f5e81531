//! File-based consent repository
//!
//! This module provides a file-based implementation of the ConsentStorePort,
//! persisting the consent record of the current attempt to a local JSON file.
//! Only one record is kept: a new attempt clears it.

use async_trait::async_trait;
use dop_core::consent::{ConsentFlag, ConsentRecord};
use dop_core::ids::AttemptId;
use dop_core::ports::ConsentStorePort;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub const DEFAULT_CONSENT_FILE: &str = ".consent_record";

pub struct FileConsentRepository {
    record_file_path: PathBuf,
}

impl FileConsentRepository {
    /// Create repository with custom file path
    pub fn new(record_file_path: PathBuf) -> Self {
        Self { record_file_path }
    }

    /// Create repository with base dir and filename
    pub fn with_base_dir(base_dir: PathBuf, filename: impl Into<String>) -> Self {
        Self {
            record_file_path: base_dir.join(filename.into()),
        }
    }

    /// Create repository with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            record_file_path: base_dir.join(DEFAULT_CONSENT_FILE),
        }
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.record_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn read_record(&self) -> anyhow::Result<Option<ConsentRecord>> {
        if !self.record_file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.record_file_path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let record: ConsentRecord = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse consent record: {e}"))?;

        Ok(Some(record))
    }
}

#[async_trait]
impl ConsentStorePort for FileConsentRepository {
    async fn load(&self, attempt: &AttemptId, admin_package: &str) -> anyhow::Result<ConsentFlag> {
        let Some(record) = self.read_record().await? else {
            return Ok(ConsentFlag::default());
        };

        let flag = record.flag_for(attempt, admin_package);
        if flag != record.flag() {
            debug!(
                stored_attempt = %record.attempt,
                stored_admin = %record.admin_package,
                requested_attempt = %attempt,
                requested_admin = %admin_package,
                "consent record belongs to another attempt or admin"
            );
        }
        Ok(flag)
    }

    async fn save(&self, record: &ConsentRecord) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| anyhow::anyhow!("Failed to serialize consent record: {e}"))?;

        let mut file = fs::File::create(&self.record_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create consent file: {e}"))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write consent file: {e}"))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync consent file: {e}"))?;

        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.record_file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Failed to remove consent file: {e}")),
        }
    }
}
