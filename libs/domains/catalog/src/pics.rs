//! Picture files served alongside catalog items

use std::path::{Path, PathBuf};

/// Reads item pictures from a directory on disk
#[derive(Debug, Clone)]
pub struct PictureStore {
    root: PathBuf,
}

impl PictureStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root defaults to `pics` when PICS_PATH is unset.
    pub fn from_env() -> Self {
        let root = std::env::var("PICS_PATH").unwrap_or_else(|_| "pics".to_string());
        Self::new(root)
    }

    /// MIME type from the picture file extension.
    pub fn mime_for(file_name: &str) -> &'static str {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("bmp") => "image/bmp",
            Some("gif") => "image/gif",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("svg") => "image/svg+xml",
            Some("tiff") => "image/tiff",
            Some("webp") => "image/webp",
            Some("wmf") => "image/wmf",
            _ => "application/octet-stream",
        }
    }

    pub async fn read(&self, file_name: &str) -> std::io::Result<Vec<u8>> {
        // Serve only plain file names, never nested paths.
        let base = Path::new(file_name)
            .file_name()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))?;
        tokio::fs::read(self.root.join(base)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(PictureStore::mime_for("bike.png"), "image/png");
        assert_eq!(PictureStore::mime_for("bike.JPG"), "image/jpeg");
        assert_eq!(PictureStore::mime_for("bike.jpeg"), "image/jpeg");
        assert_eq!(PictureStore::mime_for("bike.svg"), "image/svg+xml");
        assert_eq!(PictureStore::mime_for("bike.webp"), "image/webp");
        assert_eq!(PictureStore::mime_for("bike.wmf"), "image/wmf");
    }

    #[test]
    fn test_mime_for_unknown_extension_is_octet_stream() {
        assert_eq!(PictureStore::mime_for("bike.avif"), "application/octet-stream");
        assert_eq!(PictureStore::mime_for("no-extension"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let store = PictureStore::new("/nonexistent-pics-root");
        let err = store.read("bike.png").await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
