//! Media ingestion for Herald.
//!
//! Turns inbound image data (an inline `data:` URL or a streamed multipart
//! upload) into a [`ScopedArtifact`] on disk, and resolves caller-supplied
//! paths for local-file publishing. Files created here are owned by the
//! artifact and deleted when it is released or dropped.

pub mod error;
pub mod ingest;
pub mod resolve;
pub mod sanitize;
pub mod scoped;

pub use error::MediaError;
pub use ingest::{DEFAULT_MAX_BYTES, MediaIngestor, default_filename};
pub use resolve::LocalArtifactResolver;
pub use sanitize::sanitize_filename;
pub use scoped::{Ownership, ScopedArtifact};
