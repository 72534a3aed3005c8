//! Shared test utilities for domain testing
//!
//! `TempPics`: throwaway picture directory for picture endpoint tests.

use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Temporary picture directory, removed when dropped
pub struct TempPics {
    dir: PathBuf,
}

impl TempPics {
    /// Creates a unique directory under the system temp dir.
    pub fn new(test_name: &str) -> std::io::Result<Self> {
        let dir = std::env::temp_dir().join(format!("pics-{}-{}", test_name, Uuid::now_v7()));
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Writes a picture file into the directory.
    pub fn add(&self, file_name: &str, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::write(self.dir.join(file_name), bytes)
    }
}

impl Drop for TempPics {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_dir_all(&self.dir) {
            tracing::warn!(error = %err, dir = %self.dir.display(), "Failed to remove temp pics dir");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_pics_roundtrip() {
        let pics = TempPics::new("roundtrip").unwrap();
        pics.add("bike.png", b"not-a-real-png").unwrap();

        let bytes = std::fs::read(pics.path().join("bike.png")).unwrap();
        assert_eq!(bytes, b"not-a-real-png");
    }

    #[test]
    fn test_temp_pics_dirs_are_unique_per_instance() {
        let a = TempPics::new("unique").unwrap();
        let b = TempPics::new("unique").unwrap();
        assert_ne!(a.path(), b.path());
    }
}
