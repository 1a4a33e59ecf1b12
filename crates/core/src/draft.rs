use crate::media::MediaArtifact;

/// Maximum number of characters the platform accepts in a single post.
pub const TEXT_LIMIT: usize = 280;

/// Suffix appended to text that had to be shortened.
pub const TRUNCATION_MARKER: &str = "...";

/// Shorten `text` to at most [`TEXT_LIMIT`] characters.
///
/// Lengths are counted in Unicode scalar values. Text over the limit keeps its
/// first `TEXT_LIMIT - 3` characters followed by [`TRUNCATION_MARKER`], so the
/// result is always exactly `TEXT_LIMIT` characters long.
pub fn truncate_text(text: &str) -> String {
    if text.chars().count() <= TEXT_LIMIT {
        return text.to_owned();
    }
    let keep = TEXT_LIMIT - TRUNCATION_MARKER.len();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Text plus optional media, ready to be handed to the publish pipeline.
///
/// Truncation happens once, at construction, so every later log line and
/// result reflects the text that is actually submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDraft {
    text: String,
    media: Option<MediaArtifact>,
    truncated: bool,
}

impl ContentDraft {
    pub fn new(text: impl AsRef<str>, media: Option<MediaArtifact>) -> Self {
        let original = text.as_ref();
        let text = truncate_text(original);
        let truncated = text != original;
        Self {
            text,
            media,
            truncated,
        }
    }

    /// Draft without any attached media.
    pub fn text_only(text: impl AsRef<str>) -> Self {
        Self::new(text, None)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn media(&self) -> Option<&MediaArtifact> {
        self.media.as_ref()
    }

    /// Whether the caller's text was shortened to fit the limit.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    /// Length of the (possibly truncated) text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
