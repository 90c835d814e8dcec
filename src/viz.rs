//! Visualization image storage
//!
//! The backend returns rendered charts as raw image bytes. They are written
//! to a local file so an external viewer can open them; the file is deleted
//! when the handle is replaced or dropped.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A locally stored chart image, deleted when the handle is dropped
#[derive(Debug)]
pub struct VisualizationImage {
    path: PathBuf,
    size: usize,
}

impl VisualizationImage {
    /// Write image bytes to a new file under `dir`
    ///
    /// `seq` is the dispatch sequence number of the fetch; it keeps file
    /// names unique across rapid consecutive fetches.
    pub fn write(dir: &Path, seq: u64, bytes: &[u8]) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create image directory {}", dir.display()))?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("chart_{}_{}.png", seq, timestamp));
        fs::write(&path, bytes)
            .with_context(|| format!("Failed to write image to {}", path.display()))?;

        Ok(Self {
            path,
            size: bytes.len(),
        })
    }

    /// Default directory for chart images
    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join("nlidb")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Image size in bytes
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Drop for VisualizationImage {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::debug!("Could not remove image file {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let image = VisualizationImage::write(dir.path(), 1, b"png bytes").unwrap();

        assert!(image.path().exists());
        assert_eq!(image.size(), 9);
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let image = VisualizationImage::write(dir.path(), 1, b"png bytes").unwrap();
        let path = image.path().to_path_buf();

        drop(image);
        assert!(!path.exists());
    }

    #[test]
    fn test_replacing_releases_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut current = Some(VisualizationImage::write(dir.path(), 1, b"first").unwrap());
        let first_path = current.as_ref().unwrap().path().to_path_buf();

        current = Some(VisualizationImage::write(dir.path(), 2, b"second").unwrap());
        assert!(!first_path.exists());
        assert!(current.as_ref().unwrap().path().exists());
    }
}
