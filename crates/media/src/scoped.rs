use std::path::Path;

use herald_core::MediaArtifact;
use tracing::{debug, warn};

/// Who is responsible for deleting an artifact's file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Created by the ingestor for a single request; deleted on release.
    Owned,
    /// Supplied by the caller; never deleted.
    Borrowed,
}

/// A [`MediaArtifact`] bound to the lifetime of the request that uses it.
///
/// Owned files are removed by [`release`](Self::release), or by `Drop` if the
/// artifact goes out of scope without being released (for example on an early
/// error return). Borrowed files are left untouched either way.
#[derive(Debug)]
pub struct ScopedArtifact {
    artifact: MediaArtifact,
    ownership: Ownership,
    armed: bool,
}

impl ScopedArtifact {
    pub fn owned(artifact: MediaArtifact) -> Self {
        Self {
            artifact,
            ownership: Ownership::Owned,
            armed: true,
        }
    }

    pub fn borrowed(artifact: MediaArtifact) -> Self {
        Self {
            artifact,
            ownership: Ownership::Borrowed,
            armed: false,
        }
    }

    pub fn artifact(&self) -> &MediaArtifact {
        &self.artifact
    }

    pub fn path(&self) -> &Path {
        &self.artifact.path
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Delete the file if this artifact owns it.
    ///
    /// Deletion failures are logged and swallowed.
    pub async fn release(mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;

        match tokio::fs::remove_file(&self.artifact.path).await {
            Ok(()) => debug!(path = %self.artifact.path.display(), "released media artifact"),
            Err(e) => warn!(
                path = %self.artifact.path.display(),
                error = %e,
                "failed to remove media artifact"
            ),
        }
    }

    /// Keep the file on disk past this scope and hand back the artifact.
    ///
    /// Used when the file itself is the result of the request, as with a saved
    /// image that a later request publishes by path.
    pub fn persist(mut self) -> MediaArtifact {
        self.armed = false;
        self.artifact.clone()
    }
}

impl Drop for ScopedArtifact {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.artifact.path) {
            warn!(
                path = %self.artifact.path.display(),
                error = %e,
                "failed to remove unreleased media artifact"
            );
        } else {
            debug!(path = %self.artifact.path.display(), "removed unreleased media artifact");
        }
    }
}
