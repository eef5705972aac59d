//! Working and artifact directories for generated media.
//!
//! In-flight downloads live in a working directory as scoped temp files;
//! finished renditions are promoted into a separate artifact directory
//! (handling cross-device moves) and served from there.

use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{MediaError, MediaResult};

/// Filesystem layout for in-flight downloads and finished artifacts.
#[derive(Debug, Clone)]
pub struct MediaStore {
    work_dir: PathBuf,
    processed_dir: PathBuf,
}

impl MediaStore {
    /// Create a store rooted at the given directories.
    pub fn new(work_dir: impl Into<PathBuf>, processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            processed_dir: processed_dir.into(),
        }
    }

    /// Ensure both directories exist. Idempotent; called once at startup.
    pub async fn init(&self) -> MediaResult<()> {
        fs::create_dir_all(&self.work_dir).await?;
        fs::create_dir_all(&self.processed_dir).await?;
        Ok(())
    }

    /// Working directory for in-flight downloads.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Directory that finished artifacts are served from.
    pub fn processed_dir(&self) -> &Path {
        &self.processed_dir
    }

    /// Allocate a uniquely named temp file path in the working directory.
    ///
    /// The file itself is not created. The returned guard removes whatever
    /// exists at the path when dropped, unless [`TempFile::disarm`] is called.
    pub fn temp_file(&self, extension: &str) -> TempFile {
        let name = format!(
            "temp_video_{}_{}.{}",
            Utc::now().timestamp_millis(),
            short_token(),
            extension
        );
        TempFile::new(self.work_dir.join(name))
    }

    /// Generate a unique artifact file name.
    pub fn artifact_name(&self, extension: &str) -> String {
        format!(
            "processed_video_{}_{}.{}",
            Utc::now().timestamp_millis(),
            short_token(),
            extension
        )
    }

    /// Path of a named artifact inside the processed directory.
    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.processed_dir.join(file_name)
    }

    /// Move a finished file into the processed directory under `file_name`.
    pub async fn promote(&self, src: impl AsRef<Path>, file_name: &str) -> MediaResult<PathBuf> {
        let dst = self.processed_dir.join(file_name);
        move_file(src.as_ref(), &dst).await?;
        Ok(dst)
    }

    /// Delete a promoted artifact. A missing file is not an error.
    pub async fn remove_artifact(&self, file_name: &str) -> MediaResult<()> {
        match fs::remove_file(self.processed_dir.join(file_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaError::from(e)),
        }
    }
}

/// Random suffix to keep same-millisecond names distinct.
fn short_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(8);
    token
}

/// Move `src` to `dst`, handling cross-device moves.
///
/// Attempts a fast rename first. On EXDEV it falls back to copying to a temp
/// file next to `dst` and renaming, so the file appears atomically on the
/// destination filesystem.
async fn move_file(src: &Path, dst: &Path) -> MediaResult<()> {
    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_error(&e) => {
            debug!(
                "Cross-device rename detected, falling back to copy+delete: {} -> {}",
                src.display(),
                dst.display()
            );
            copy_and_delete(src, dst).await
        }
        Err(e) => Err(MediaError::from(e)),
    }
}

/// Check if an IO error is EXDEV (cross-device link).
fn is_cross_device_error(e: &std::io::Error) -> bool {
    // EXDEV is error code 18 on Linux/macOS
    e.raw_os_error() == Some(18)
}

/// Copy file to destination (via temp file) then delete source.
async fn copy_and_delete(src: &Path, dst: &Path) -> MediaResult<()> {
    let tmp_dst = dst.with_extension("tmp");

    fs::copy(src, &tmp_dst).await?;

    if let Err(e) = fs::rename(&tmp_dst, dst).await {
        let _ = std::fs::remove_file(&tmp_dst);
        return Err(MediaError::from(e));
    }

    // Delete source, best effort.
    if let Err(e) = fs::remove_file(src).await {
        warn!(
            "Failed to remove source after cross-device move: {}: {}",
            src.display(),
            e
        );
    }

    Ok(())
}

/// Scoped temp file path. Removes the file on drop unless disarmed.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
    armed: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    /// Path the guard owns.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Give up ownership without deleting, once the file has been moved away.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed temp file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to remove temp file")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> MediaStore {
        MediaStore::new(dir.path().join("work"), dir.path().join("processed"))
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.init().await.unwrap();
        store.init().await.unwrap();

        assert!(store.work_dir().is_dir());
        assert!(store.processed_dir().is_dir());
    }

    #[tokio::test]
    async fn test_temp_file_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.init().await.unwrap();

        let tmp = store.temp_file("mp4");
        let path = tmp.path().to_path_buf();
        fs::write(&path, b"data").await.unwrap();
        assert!(path.exists());

        drop(tmp);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_disarmed_temp_file_survives() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.init().await.unwrap();

        let tmp = store.temp_file("mp4");
        let path = tmp.path().to_path_buf();
        fs::write(&path, b"data").await.unwrap();

        tmp.disarm();
        assert!(path.exists());
    }

    #[test]
    fn test_dropping_guard_for_missing_file_is_silent() {
        let tmp = TempFile::new(PathBuf::from("/nonexistent/never-created.mp4"));
        drop(tmp);
    }

    #[tokio::test]
    async fn test_temp_file_names_are_unique() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let a = store.temp_file("mp4");
        let b = store.temp_file("mp4");

        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_artifact_name_shape() {
        let store = MediaStore::new("work", "processed");
        let name = store.artifact_name("mp4");

        assert!(name.starts_with("processed_video_"));
        assert!(name.ends_with(".mp4"));
    }

    #[tokio::test]
    async fn test_promote_moves_into_processed_dir() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.init().await.unwrap();

        let src = store.work_dir().join("finished.mp4");
        fs::write(&src, b"encoded bytes").await.unwrap();

        let dst = store.promote(&src, "clip.mp4").await.unwrap();

        assert!(!src.exists(), "source should be moved away");
        assert_eq!(dst, store.artifact_path("clip.mp4"));
        assert_eq!(fs::read(&dst).await.unwrap(), b"encoded bytes");
    }

    #[tokio::test]
    async fn test_remove_artifact_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.init().await.unwrap();

        store.remove_artifact("nope.mp4").await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_artifact_deletes_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.init().await.unwrap();

        let path = store.artifact_path("old.mp4");
        fs::write(&path, b"bytes").await.unwrap();

        store.remove_artifact("old.mp4").await.unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_is_cross_device_error() {
        let exdev = std::io::Error::from_raw_os_error(18);
        assert!(is_cross_device_error(&exdev));

        let not_found = std::io::Error::from_raw_os_error(2);
        assert!(!is_cross_device_error(&not_found));
    }
}
