//! Image files attached to multipart submissions.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is not a PNG or JPEG image")]
    UnsupportedFormat { path: PathBuf },
}

/// A picked file, held in memory until it is sent.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl Upload {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read an image from disk. The format is sniffed from the content, not
    /// the extension; only PNG and JPEG are accepted.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let bytes = fs::read(path).map_err(|e| UploadError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let format = image::guess_format(&bytes)
            .ok()
            .filter(|format| matches!(format, ImageFormat::Png | ImageFormat::Jpeg))
            .ok_or_else(|| UploadError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self::new(file_name, format.to_mime_type(), bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
