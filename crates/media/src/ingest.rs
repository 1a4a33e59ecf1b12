use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use base64::Engine;
use bytes::Bytes;
use chrono::Utc;
use futures::{Stream, StreamExt};
use herald_core::{MediaArtifact, MediaType};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use crate::error::MediaError;
use crate::sanitize::{sanitize_filename, with_extension};
use crate::scoped::ScopedArtifact;

/// Default size cap for a single image (5 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Attempts at finding an unused file name before giving up.
const MAX_CREATE_ATTEMPTS: u32 = 16;

/// Filename used when the caller does not supply one: `image_<unix-millis>.jpg`.
pub fn default_filename() -> String {
    format!("image_{}.jpg", Utc::now().timestamp_millis())
}

/// Materializes inbound image data as files in a dedicated directory.
///
/// Every file gets a name of its own (`<stem>_<unix-millis>_<seq>.<ext>`) and
/// is created exclusively, so two requests sending the same file name never
/// share, overwrite or delete each other's file.
#[derive(Debug, Clone)]
pub struct MediaIngestor {
    temp_dir: PathBuf,
    max_bytes: u64,
    sequence: Arc<AtomicU64>,
}

impl MediaIngestor {
    /// Create the ingestor, creating `temp_dir` if it does not exist.
    pub fn open(temp_dir: impl Into<PathBuf>, max_bytes: u64) -> Result<Self, MediaError> {
        let temp_dir = temp_dir.into();
        std::fs::create_dir_all(&temp_dir)?;
        info!(temp_dir = %temp_dir.display(), max_bytes, "media ingestor ready");
        Ok(Self {
            temp_dir,
            max_bytes,
            sequence: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Decode a `data:<mime>;base64,<payload>` URL into a file.
    ///
    /// The extension of `filename` is replaced with the one implied by the
    /// declared MIME type before sanitizing, and the result is made unique.
    /// Every check runs before the file is created, so a rejected input leaves
    /// nothing behind.
    #[instrument(skip(self, data_url), fields(len = data_url.len()))]
    pub async fn materialize_data_url(
        &self,
        data_url: &str,
        filename: &str,
    ) -> Result<ScopedArtifact, MediaError> {
        let (media_type, encoded) = split_data_url(data_url)?;

        let cleaned: Vec<u8> = encoded
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(cleaned)
            .map_err(|e| MediaError::DecodeFailed(e.to_string()))?;

        if decoded.len() as u64 > self.max_bytes {
            return Err(MediaError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let renamed = with_extension(filename, media_type.extension());
        let safe = sanitize_filename(&renamed)
            .ok_or_else(|| MediaError::InvalidFilename(filename.to_owned()))?;
        let (path, mut file) = self.create_unique(&safe).await?;

        let written = async {
            file.write_all(&decoded).await?;
            file.flush().await
        }
        .await;
        drop(file);
        if let Err(e) = written {
            discard(&path).await;
            return Err(e.into());
        }

        debug!(
            path = %path.display(),
            media_type = %media_type,
            size_bytes = decoded.len(),
            "materialized inline image"
        );
        Ok(ScopedArtifact::owned(MediaArtifact::new(
            path,
            media_type,
            decoded.len() as u64,
        )))
    }

    /// Stream an uploaded file to disk without decoding it.
    ///
    /// The media type is inferred from the sanitized filename's extension and
    /// the file name is made unique. A stream failure or an oversized upload
    /// removes the partial file.
    #[instrument(skip(self, stream))]
    pub async fn materialize_upload<S, E>(
        &self,
        filename: &str,
        stream: S,
    ) -> Result<ScopedArtifact, MediaError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: std::fmt::Display,
    {
        let safe = sanitize_filename(filename)
            .ok_or_else(|| MediaError::InvalidFilename(filename.to_owned()))?;
        let media_type = Path::new(&safe)
            .extension()
            .and_then(|e| e.to_str())
            .map_or(MediaType::Jpeg, MediaType::from_extension);
        let (path, file) = self.create_unique(&safe).await?;

        match self.write_stream(file, stream).await {
            Ok(size_bytes) => {
                debug!(
                    path = %path.display(),
                    media_type = %media_type,
                    size_bytes,
                    "materialized uploaded image"
                );
                Ok(ScopedArtifact::owned(MediaArtifact::new(
                    path, media_type, size_bytes,
                )))
            }
            Err(e) => {
                discard(&path).await;
                Err(e)
            }
        }
    }

    /// Create a new file for `safe_name` that no other request can hold.
    ///
    /// Never opens an existing file: a name that is already taken is retried
    /// with the next sequence number.
    async fn create_unique(
        &self,
        safe_name: &str,
    ) -> Result<(PathBuf, tokio::fs::File), MediaError> {
        let (stem, ext) = split_name(safe_name);
        let mut last_err = None;

        for _ in 0..MAX_CREATE_ATTEMPTS {
            let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
            let millis = Utc::now().timestamp_millis();
            let name = match ext {
                Some(ext) => format!("{stem}_{millis}_{seq}.{ext}"),
                None => format!("{stem}_{millis}_{seq}"),
            };
            let path = self.temp_dir.join(name);

            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "media file name taken, retrying");
                    last_err = Some(e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(last_err
            .unwrap_or_else(|| std::io::Error::from(std::io::ErrorKind::AlreadyExists))
            .into())
    }

    async fn write_stream<S, E>(
        &self,
        mut file: tokio::fs::File,
        stream: S,
    ) -> Result<u64, MediaError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: std::fmt::Display,
    {
        let mut stream = std::pin::pin!(stream);
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| MediaError::Stream(e.to_string()))?;
            written += chunk.len() as u64;
            if written > self.max_bytes {
                return Err(MediaError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        Ok(written)
    }
}

/// Split a sanitized name into stem and extension.
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

/// Split a data URL into its media type and base64 payload.
fn split_data_url(data_url: &str) -> Result<(MediaType, &str), MediaError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or(MediaError::InvalidFormat)?;
    let (header, encoded) = rest.split_once(',').ok_or(MediaError::InvalidFormat)?;
    let mime = header.split(';').next().unwrap_or_default();
    Ok((MediaType::from_mime(mime), encoded))
}

async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "removed partial media file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove partial media file"),
    }
}
