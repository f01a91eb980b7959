//! File attachment storage under the configured media root.
//!
//! Records store paths relative to the root (e.g. `staff_photos/abc.png`);
//! the root itself is served read-only under `/media`.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use crate::errors::ServiceError;

pub const STAFF_PHOTOS: &str = "staff_photos";
pub const OFFER_LETTERS: &str = "offer_letters";
pub const LICENSES: &str = "licenses";
pub const INVOICES: &str = "invoices";

#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path for a stored relative path.
    pub fn absolute(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Saves bytes under `subdir`, deriving a collision-free name from the
    /// original filename. Returns the stored relative path.
    pub async fn save(
        &self,
        subdir: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, ServiceError> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let filename = format!("{}{}", Uuid::new_v4(), extension);
        let relative = format!("{subdir}/{filename}");

        let dir = self.root.join(subdir);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ServiceError::InternalError(format!("failed to create media dir: {e}")))?;
        fs::write(dir.join(&filename), bytes)
            .await
            .map_err(|e| ServiceError::InternalError(format!("failed to store file: {e}")))?;

        Ok(relative)
    }

    /// Removes a stored file. A missing file is logged and tolerated so a
    /// record delete never fails on a half-cleaned directory.
    pub async fn delete(&self, relative: &str) {
        let path = self.absolute(relative);
        if let Err(e) = fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), "failed to delete stored file: {e}");
            }
        }
    }

    /// Reads a stored file fully into memory.
    pub async fn read(&self, relative: &str) -> Result<Vec<u8>, ServiceError> {
        fs::read(self.absolute(relative))
            .await
            .map_err(|e| ServiceError::InternalError(format!("failed to read stored file: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_read_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let relative = store
            .save(STAFF_PHOTOS, "portrait.png", b"not really a png")
            .await
            .unwrap();
        assert!(relative.starts_with("staff_photos/"));
        assert!(relative.ends_with(".png"));

        let bytes = store.read(&relative).await.unwrap();
        assert_eq!(bytes, b"not really a png");

        store.delete(&relative).await;
        assert!(store.read(&relative).await.is_err());
        // Deleting twice is fine.
        store.delete(&relative).await;
    }

    #[tokio::test]
    async fn save_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        let relative = store.save(LICENSES, "license", b"data").await.unwrap();
        assert!(!relative.contains('.'));
    }
}
