// Filesystem catalog adapter - Directory scanning for source assets

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Scans a single directory level for media files
#[derive(Debug, Clone, Default)]
pub struct FsCatalogAdapter;

impl FsCatalogAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Collect matching files, sorted by name so that a seeded shuffle is
    /// reproducible across filesystems.
    fn collect(dir: &Path, kind: MediaKind, extensions: &[String]) -> Result<Vec<Asset>, DomainError> {
        let mut assets = Vec::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| {
                DomainError::FsFail(format!("Failed to read directory {}: {}", dir.display(), e))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            match Asset::new(entry.path(), kind) {
                Ok(asset) if asset.has_extension(extensions) => assets.push(asset),
                _ => debug!("Skipping non-{} file: {}", kind, entry.path().display()),
            }
        }

        Ok(assets)
    }
}

#[async_trait]
impl CatalogPort for FsCatalogAdapter {
    async fn directory_exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    async fn scan(
        &self,
        dir: &Path,
        kind: MediaKind,
        extensions: &[String],
    ) -> Result<Vec<Asset>, DomainError> {
        if !dir.is_dir() {
            return Err(DomainError::DirectoryNotFound {
                kind,
                path: dir.display().to_string(),
            });
        }

        let assets = Self::collect(dir, kind, extensions)?;
        if assets.is_empty() {
            return Err(DomainError::CatalogEmpty {
                kind,
                path: dir.display().to_string(),
            });
        }

        debug!("Found {} {} files in {}", assets.len(), kind, dir.display());
        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn exts(kind: MediaKind) -> Vec<String> {
        kind.default_extensions()
    }

    #[tokio::test]
    async fn test_scan_filters_by_extension_case_insensitively() {
        let dir = TempDir::new().unwrap();
        for name in ["b.WAV", "a.mp3", "notes.txt", "c.m4a", "clip.mp4"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.wav")).unwrap();

        let assets = FsCatalogAdapter::new()
            .scan(dir.path(), MediaKind::Audio, &exts(MediaKind::Audio))
            .await
            .unwrap();

        let names: Vec<String> = assets.iter().map(|a| a.file_name()).collect();
        assert_eq!(names, vec!["a.mp3", "b.WAV", "c.m4a"]);
        assert!(assets.iter().all(|a| a.kind == MediaKind::Audio));
    }

    #[tokio::test]
    async fn test_scan_reports_empty_catalog() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("readme.md"), b"x").unwrap();

        let result = FsCatalogAdapter::new()
            .scan(dir.path(), MediaKind::Video, &exts(MediaKind::Video))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::CatalogEmpty { kind: MediaKind::Video, .. })
        ));
    }

    #[tokio::test]
    async fn test_scan_reports_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let result = FsCatalogAdapter::new()
            .scan(&missing, MediaKind::Audio, &exts(MediaKind::Audio))
            .await;

        assert!(matches!(result, Err(DomainError::DirectoryNotFound { .. })));
        assert!(!FsCatalogAdapter::new().directory_exists(&missing).await);
    }

    #[tokio::test]
    async fn test_scan_sees_files_added_later() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.wav"), b"x").unwrap();
        let catalog = FsCatalogAdapter::new();
        let audio = exts(MediaKind::Audio);

        assert_eq!(catalog.scan(dir.path(), MediaKind::Audio, &audio).await.unwrap().len(), 1);
        fs::write(dir.path().join("two.wav"), b"x").unwrap();
        assert_eq!(catalog.scan(dir.path(), MediaKind::Audio, &audio).await.unwrap().len(), 2);
    }
}
