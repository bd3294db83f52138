//! Media references attached to a wish.
//!
//! Only references are modelled here; uploading and storing the binary
//! content is the job of an external media store.

use super::{MediaId, WishDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media behind a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Video clip.
    Video,
    /// Audio clip.
    Audio,
}

impl MediaKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MediaKind {
    type Error = WishDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            _ => Err(WishDomainError::InvalidMediaKind(value.to_owned())),
        }
    }
}

/// A media reference attached to a wish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    id: MediaId,
    kind: MediaKind,
    url: String,
    thumbnail: Option<String>,
}

impl MediaItem {
    /// Creates a media reference with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::EmptyMediaUrl`] when the URL is blank.
    pub fn new(
        kind: MediaKind,
        url: impl Into<String>,
        thumbnail: Option<String>,
    ) -> Result<Self, WishDomainError> {
        let raw_url = url.into();
        let trimmed_url = raw_url.trim();
        if trimmed_url.is_empty() {
            return Err(WishDomainError::EmptyMediaUrl);
        }
        let trimmed_thumbnail = thumbnail
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        Ok(Self {
            id: MediaId::new(),
            kind,
            url: trimmed_url.to_owned(),
            thumbnail: trimmed_thumbnail,
        })
    }

    /// Returns the media identifier.
    #[must_use]
    pub const fn id(&self) -> MediaId {
        self.id
    }

    /// Returns the media kind.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Returns the media URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the thumbnail URL, if any.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }
}
