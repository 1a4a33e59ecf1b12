use serde::Deserialize;

/// Where inbound images are written and looked up.
#[derive(Debug, Deserialize)]
pub struct MediaConfig {
    /// Directory for materialized images. Created at startup if missing.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,
    /// Fallback directory searched by file name for local-image posts.
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    /// Largest accepted image, in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
            public_dir: default_public_dir(),
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_temp_dir() -> String {
    "temp_uploads".to_owned()
}

fn default_public_dir() -> String {
    "public".to_owned()
}

fn default_max_bytes() -> u64 {
    herald_media::DEFAULT_MAX_BYTES
}
