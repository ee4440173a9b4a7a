//! Upload storage on the local filesystem.
//!
//! Files live flat in one directory, which is also served at `/uploads`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::config::ALLOWED_IMAGE_EXTENSIONS;
use crate::errors::{AppError, AppResult};

/// File part received from a multipart form
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Client-side filename, used only for its extension
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }

    /// Lowercased extension if it is an accepted image type.
    pub fn image_extension(&self) -> Option<String> {
        let ext = Path::new(self.file_name.as_deref()?)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        ALLOWED_IMAGE_EXTENSIONS
            .contains(&ext.as_str())
            .then_some(ext)
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if needed.
    pub async fn ensure_root(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Store an image as `<kind>_<unix-ts>_<8 hex>.<ext>` and return the name.
    pub async fn save(&self, kind: &str, file: &UploadedFile) -> AppResult<String> {
        let ext = file.image_extension().ok_or_else(|| {
            AppError::validation(format!(
                "Only image files ({}) are allowed",
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            ))
        })?;

        let name = format!(
            "{}_{}_{}.{}",
            kind,
            Utc::now().timestamp(),
            &Uuid::new_v4().simple().to_string()[..8],
            ext
        );

        self.ensure_root().await?;
        tokio::fs::write(self.root.join(&name), &file.bytes).await?;
        tracing::debug!(file = %name, bytes = file.bytes.len(), "Stored upload");
        Ok(name)
    }

    /// Store several images; already-written files are removed if one fails.
    pub async fn save_all(&self, kind: &str, files: &[UploadedFile]) -> AppResult<Vec<String>> {
        let mut names = Vec::with_capacity(files.len());
        for file in files {
            match self.save(kind, file).await {
                Ok(name) => names.push(name),
                Err(e) => {
                    self.remove_all(&names).await;
                    return Err(e);
                }
            }
        }
        Ok(names)
    }

    /// Delete a stored file. Failures are logged and swallowed; returns
    /// false when the file may still be on disk.
    pub async fn remove(&self, name: &str) -> bool {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            tracing::warn!(file = %name, "Refusing to remove file outside upload directory");
            return false;
        }

        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => {
                tracing::debug!(file = %name, "Removed upload");
                true
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(file = %name, "Upload already gone");
                true
            }
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "Failed to remove upload");
                false
            }
        }
    }

    /// Remove every file, returning how many could not be removed.
    pub async fn remove_all<S: AsRef<str>>(&self, names: &[S]) -> usize {
        let mut failed = 0;
        for name in names {
            if !self.remove(name.as_ref()).await {
                failed += 1;
            }
        }
        failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> UploadedFile {
        UploadedFile::new(Some(name.to_string()), b"fake image".to_vec())
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(image("photo.JPG").image_extension().as_deref(), Some("jpg"));
        assert_eq!(image("a.b.webp").image_extension().as_deref(), Some("webp"));
        assert_eq!(image("script.sh").image_extension(), None);
        assert_eq!(UploadedFile::new(None, vec![]).image_extension(), None);
    }

    #[tokio::test]
    async fn test_save_names_and_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let name = store.save("beneficiary", &image("me.png")).await.unwrap();
        let parts: Vec<_> = name.trim_end_matches(".png").split('_').collect();
        assert_eq!(parts[0], "beneficiary");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 8);
        assert_eq!(std::fs::read(dir.path().join(&name)).unwrap(), b"fake image");
    }

    #[tokio::test]
    async fn test_save_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let err = store.save("crop", &image("notes.txt")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_remove_is_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let name = store.save("crop", &image("x.jpg")).await.unwrap();

        store.remove(&name).await;
        assert!(!dir.path().join(&name).exists());

        // Missing files count as removed; traversal attempts are refused
        assert!(store.remove(&name).await);
        assert!(!store.remove("../etc/passwd").await);
    }

    #[tokio::test]
    async fn test_remove_all_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let kept = store.save("crop", &image("a.jpg")).await.unwrap();
        // remove_file cannot delete a directory
        std::fs::create_dir(dir.path().join("stuck.jpg")).unwrap();

        let failed = store
            .remove_all(&[kept.as_str(), "stuck.jpg", "../outside.jpg", "missing.jpg"])
            .await;
        assert_eq!(failed, 2);
        assert!(!dir.path().join(&kept).exists());
    }
}
