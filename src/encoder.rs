//! Turning captured image files into transport payloads

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::preview::PreviewHandle;

/// A captured image file together with its media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    path: PathBuf,
    media_type: String,
}

impl ImageFile {
    /// Create a handle with an explicit media type
    pub fn new<P: Into<PathBuf>>(path: P, media_type: &str) -> Self {
        Self {
            path: path.into(),
            media_type: media_type.to_string(),
        }
    }

    /// Create a handle, inferring the media type from the file extension
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let media_type = guess_media_type(&path);
        Self { path, media_type }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// File name for display, e.g. "Selected file: pills.jpg"
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// A selected image: the raw file plus the preview handle shown for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub file: ImageFile,
    pub preview: PreviewHandle,
}

impl ImageAsset {
    pub fn media_type(&self) -> &str {
        self.file.media_type()
    }
}

/// Base64 payload body (no data-URI prefix) and its media type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub data: String,
    pub mime_type: String,
}

impl EncodedImage {
    /// Encode raw bytes
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            data: BASE64.encode(bytes),
            mime_type: mime_type.to_string(),
        }
    }

    /// Parse a `data:<type>;base64,<payload>` URI, keeping only the payload
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| Error::encoding("not a data URI"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::encoding("data URI has no payload"))?;
        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| Error::encoding("data URI is not base64 encoded"))?;

        BASE64
            .decode(payload)
            .map_err(|e| Error::encoding(format!("invalid base64 payload: {}", e)))?;

        Ok(Self {
            data: payload.to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    /// Recover the original bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(&self.data)
            .map_err(|e| Error::encoding(format!("invalid base64 payload: {}", e)))
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Reads image files into [`EncodedImage`] payloads
pub struct ImageEncoder;

impl ImageEncoder {
    /// Read `file` and encode it. Performs no network I/O.
    pub async fn encode(file: &ImageFile) -> Result<EncodedImage> {
        let bytes = tokio::fs::read(file.path()).await.map_err(|e| {
            Error::encoding(format!("failed to read {}: {}", file.path().display(), e))
        })?;
        debug!("Encoded {} ({} bytes)", file.path().display(), bytes.len());
        Ok(EncodedImage::from_bytes(&bytes, file.media_type()))
    }
}

fn guess_media_type(path: &Path) -> String {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG.to_string(),
        "png" => mime::IMAGE_PNG.to_string(),
        "gif" => mime::IMAGE_GIF.to_string(),
        "bmp" => mime::IMAGE_BMP.to_string(),
        "webp" | "heic" | "heif" => format!("image/{}", extension),
        _ => mime::APPLICATION_OCTET_STREAM.to_string(),
    }
}
