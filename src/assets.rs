//! Static assets handed through to the presentation layer

use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{DashboardError, Result};

/// Logo image read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoAsset {
    pub path: PathBuf,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl LogoAsset {
    /// Read the logo; a missing file is an error, not a blank image
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|source| DashboardError::Asset {
            path: path.clone(),
            source,
        })?;
        let content_type = content_type_for(&path);
        info!("Loaded logo {} ({} bytes, {})", path.display(), bytes.len(), content_type);
        Ok(Self {
            path,
            content_type,
            bytes,
        })
    }
}

/// MIME type from the file extension
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for(Path::new("BLC_LOGO.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("logo.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("logo")), "application/octet-stream");
    }

    #[test]
    fn test_missing_logo_fails() {
        let err = LogoAsset::load("no/such/BLC_LOGO.jpg").unwrap_err();
        assert!(matches!(err, DashboardError::Asset { .. }));
        assert!(err.to_string().contains("BLC_LOGO.jpg"));
    }

    #[test]
    fn test_load_logo() {
        let path = std::env::temp_dir().join(format!("logo-{}.png", std::process::id()));
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let logo = LogoAsset::load(&path).unwrap();
        assert_eq!(logo.content_type, "image/png");
        assert_eq!(logo.bytes, vec![0x89, b'P', b'N', b'G']);

        std::fs::remove_file(&path).unwrap();
    }
}
