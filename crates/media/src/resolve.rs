use std::path::{Path, PathBuf};

use herald_core::{MediaArtifact, MediaType};
use tracing::debug;

use crate::error::MediaError;
use crate::scoped::ScopedArtifact;

/// Finds caller-supplied image paths on the local filesystem.
///
/// Lookup order: the path as given, then the path relative to `base_dir` with
/// any leading `/` removed, then `<public_dir>/<file name>`. Resolved files are
/// borrowed and never deleted by the pipeline.
#[derive(Debug, Clone)]
pub struct LocalArtifactResolver {
    base_dir: PathBuf,
    public_dir: PathBuf,
}

impl LocalArtifactResolver {
    /// `public_dir` is interpreted relative to `base_dir` unless absolute.
    pub fn new(base_dir: impl Into<PathBuf>, public_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.into();
        let public_dir = base_dir.join(public_dir);
        Self {
            base_dir,
            public_dir,
        }
    }

    pub async fn resolve(&self, requested: &str) -> Result<ScopedArtifact, MediaError> {
        for candidate in self.candidates(requested) {
            if let Ok(meta) = tokio::fs::metadata(&candidate).await
                && meta.is_file()
            {
                debug!(
                    requested,
                    resolved = %candidate.display(),
                    "resolved local image"
                );
                let media_type = candidate
                    .extension()
                    .and_then(|e| e.to_str())
                    .map_or(MediaType::Jpeg, MediaType::from_extension);
                return Ok(ScopedArtifact::borrowed(MediaArtifact::new(
                    candidate,
                    media_type,
                    meta.len(),
                )));
            }
        }

        Err(MediaError::NotFound(requested.to_owned()))
    }

    fn candidates(&self, requested: &str) -> Vec<PathBuf> {
        if requested.is_empty() {
            return Vec::new();
        }

        let mut candidates = vec![
            PathBuf::from(requested),
            self.base_dir.join(requested.trim_start_matches('/')),
        ];
        if let Some(name) = Path::new(requested).file_name() {
            candidates.push(self.public_dir.join(name));
        }
        candidates
    }
}
