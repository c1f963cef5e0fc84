//! Filesystem artifact store.

use picturebook_core::{ArtifactNames, AudioFormat, RunManifest, StoryId};
use picturebook_error::{JsonError, PicturebookResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Writes and reads a story's artifacts under one output directory.
///
/// All artifacts live flat in the root, named by [`ArtifactNames`]:
///
/// ```text
/// uploads/
/// ├── page_1_ab12cd34.png
/// ├── page_1_ab12cd34.wav
/// ├── storybook_ab12cd34.pdf
/// └── story_data_ab12cd34.json
/// ```
///
/// The root is made absolute once at construction and every path handed out
/// is built with [`Path::join`]. Each file is written to a sibling temp file
/// first and renamed into place, so a reader never sees a partial file.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be made absolute or the directory
    /// cannot be created.
    #[tracing::instrument(skip(root))]
    pub fn new(root: impl AsRef<Path>) -> PicturebookResult<Self> {
        let root = std::path::absolute(root.as_ref()).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{}: {}",
                root.as_ref().display(),
                e
            )))
        })?;

        std::fs::create_dir_all(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        tracing::debug!(path = %root.display(), "Opened artifact store");
        Ok(Self { root })
    }

    /// Absolute output directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a bare file name against the root.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidPath`] if `file_name` is empty or
    /// has more than one path component.
    pub fn path_for(&self, file_name: &str) -> PicturebookResult<PathBuf> {
        let mut components = Path::new(file_name).components();
        match (components.next(), components.next()) {
            (Some(std::path::Component::Normal(_)), None) => Ok(self.root.join(file_name)),
            _ => Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "not a plain file name: {:?}",
                file_name
            )))
            .into()),
        }
    }

    /// Write a page illustration (`page_{n}_{id}.png`).
    pub async fn write_image(
        &self,
        names: &ArtifactNames,
        page: usize,
        bytes: &[u8],
    ) -> PicturebookResult<PathBuf> {
        self.write_file(&names.image_file(page), bytes).await
    }

    /// Write page narration (`page_{n}_{id}.{wav|mp3}`).
    pub async fn write_audio(
        &self,
        names: &ArtifactNames,
        page: usize,
        format: AudioFormat,
        bytes: &[u8],
    ) -> PicturebookResult<PathBuf> {
        self.write_file(&names.audio_file(page, format), bytes).await
    }

    /// Write the assembled PDF (`storybook_{id}.pdf`).
    pub async fn write_pdf(&self, names: &ArtifactNames, bytes: &[u8]) -> PicturebookResult<PathBuf> {
        self.write_file(&names.pdf_file(), bytes).await
    }

    /// Persist a run manifest as `story_data_{id}.json`.
    #[tracing::instrument(skip(self, manifest), fields(story_id = %manifest.story_id))]
    pub async fn save_bundle(&self, manifest: &RunManifest) -> PicturebookResult<PathBuf> {
        let json = serde_json::to_vec_pretty(manifest)
            .map_err(|e| JsonError::new(format!("serialize bundle: {}", e)))?;
        let names = ArtifactNames::new(manifest.story_id.clone());
        self.write_file(&names.bundle_file(), &json).await
    }

    /// Load the bundle for `story_id`.
    ///
    /// # Errors
    ///
    /// [`StorageErrorKind::NotFound`] if no bundle exists for the id, or a
    /// JSON error if the file does not hold a manifest.
    #[tracing::instrument(skip(self), fields(story_id = %story_id))]
    pub async fn load_bundle(&self, story_id: &StoryId) -> PicturebookResult<RunManifest> {
        let file_name = ArtifactNames::new(story_id.clone()).bundle_file();
        let path = self.path_for(&file_name)?;

        let data = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(file_name.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        let manifest: RunManifest = serde_json::from_slice(&data)
            .map_err(|e| JsonError::new(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "Loaded story bundle");
        Ok(manifest)
    }

    /// Write `bytes` to `file_name` under the root via temp file and rename.
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn write_file(&self, file_name: &str, bytes: &[u8]) -> PicturebookResult<PathBuf> {
        let path = self.path_for(file_name)?;
        let temp_path = self.root.join(format!(".{}.tmp", file_name));

        tokio::fs::write(&temp_path, bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        tracing::debug!(path = %path.display(), "Wrote artifact");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_rejects_nested_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).unwrap();

        assert!(store.path_for("page_1_ab12cd34.png").is_ok());
        assert!(store.path_for("../escape.png").is_err());
        assert!(store.path_for("nested/file.png").is_err());
        assert!(store.path_for("/etc/passwd").is_err());
        assert!(store.path_for("").is_err());
    }

    #[test]
    fn test_root_is_absolute_and_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("books");
        let store = ArtifactStore::new(&nested).unwrap();
        assert!(store.root().is_absolute());
        assert!(nested.is_dir());
    }
}
