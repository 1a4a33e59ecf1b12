use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Image formats accepted by the publishing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Jpeg,
    Png,
    Gif,
}

impl MediaType {
    /// Map a declared MIME type onto a media type.
    ///
    /// Only `image/png` and `image/gif` are recognized explicitly; every other
    /// value (including an empty one) falls back to JPEG.
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Self::Png,
            "image/gif" => Self::Gif,
            _ => Self::Jpeg,
        }
    }

    /// Map a filename extension (without the dot) onto a media type.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "gif" => Self::Gif,
            _ => Self::Jpeg,
        }
    }

    /// File extension used when materializing this media type.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }

    /// Canonical MIME type string.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// An image file materialized on disk and ready to be uploaded.
///
/// The artifact itself carries no ownership semantics; whoever created the
/// file decides whether it is deleted after use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaArtifact {
    /// Location of the file on disk.
    pub path: PathBuf,
    /// Declared (or inferred) media type.
    pub media_type: MediaType,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl MediaArtifact {
    pub fn new(path: impl Into<PathBuf>, media_type: MediaType, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            media_type,
            size_bytes,
        }
    }

    /// The file name component of the artifact path, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Opaque reference to media already uploaded to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(pub String);

impl MediaRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_mapping_defaults_to_jpeg() {
        assert_eq!(MediaType::from_mime("image/png"), MediaType::Png);
        assert_eq!(MediaType::from_mime("image/gif"), MediaType::Gif);
        assert_eq!(MediaType::from_mime("IMAGE/PNG"), MediaType::Png);
        assert_eq!(MediaType::from_mime("image/jpeg"), MediaType::Jpeg);
        assert_eq!(MediaType::from_mime("image/webp"), MediaType::Jpeg);
        assert_eq!(MediaType::from_mime(""), MediaType::Jpeg);
    }

    #[test]
    fn extension_mapping() {
        assert_eq!(MediaType::from_extension("PNG"), MediaType::Png);
        assert_eq!(MediaType::from_extension("gif"), MediaType::Gif);
        assert_eq!(MediaType::from_extension("jpeg"), MediaType::Jpeg);
        assert_eq!(MediaType::Png.extension(), "png");
        assert_eq!(MediaType::Jpeg.extension(), "jpg");
    }

    #[test]
    fn artifact_file_name() {
        let artifact = MediaArtifact::new("/tmp/uploads/cat.png", MediaType::Png, 12);
        assert_eq!(artifact.file_name(), Some("cat.png"));
    }

    #[test]
    fn media_ref_serializes_as_plain_string() {
        let json = serde_json::to_string(&MediaRef("1880".into())).unwrap();
        assert_eq!(json, "\"1880\"");
    }
}
