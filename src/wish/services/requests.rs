//! Request payloads accepted by the wish services.
//!
//! Payloads deserialize from the camelCase JSON bodies and query strings the
//! transport layer receives. Validation happens in the services, so every
//! field here is raw input.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::wish::{
    config::WishLimits,
    domain::{
        Budget, GeoPoint, Location, MediaItem, MediaKind, MetadataChanges, Tags, WishCategory,
        WishDescription, WishDomainError, WishTitle,
    },
};

/// A location as submitted: `[longitude, latitude]` plus an address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationInput {
    /// `[longitude, latitude]` in degrees.
    pub coordinates: [f64; 2],
    /// Free-text address.
    pub address: String,
}

impl LocationInput {
    /// Creates a location input.
    #[must_use]
    pub fn new(longitude: f64, latitude: f64, address: impl Into<String>) -> Self {
        Self {
            coordinates: [longitude, latitude],
            address: address.into(),
        }
    }

    fn validate(self) -> Result<Location, WishDomainError> {
        let [longitude, latitude] = self.coordinates;
        Location::new(GeoPoint::new(longitude, latitude)?, self.address)
    }
}

/// A media reference as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaInput {
    /// `image`, `video` or `audio`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Location of the stored media.
    pub url: String,
    /// Optional preview location.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl MediaInput {
    /// Creates a media input without a thumbnail.
    #[must_use]
    pub fn new(kind: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            url: url.into(),
            thumbnail: None,
        }
    }

    /// Sets the thumbnail URL.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub(crate) fn validate(self) -> Result<MediaItem, WishDomainError> {
        let kind = MediaKind::try_from(self.kind.as_str())?;
        MediaItem::new(kind, self.url, self.thumbnail)
    }
}

const fn default_public() -> bool {
    true
}

/// Request payload for creating a wish.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishRequest {
    title: String,
    description: String,
    category: String,
    budget: f64,
    location: LocationInput,
    deadline: DateTime<Utc>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default = "default_public")]
    is_public: bool,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    media: Vec<MediaInput>,
}

impl CreateWishRequest {
    /// Creates a request with the required wish fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        budget: f64,
        location: LocationInput,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            budget,
            location,
            deadline,
            status: None,
            is_public: true,
            tags: Vec::new(),
            media: Vec::new(),
        }
    }

    /// Requests an initial status other than draft.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the visibility flag.
    #[must_use]
    pub const fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the media references.
    #[must_use]
    pub fn with_media(mut self, media: impl IntoIterator<Item = MediaInput>) -> Self {
        self.media = media.into_iter().collect();
        self
    }

    pub(crate) fn validate(self, limits: &WishLimits) -> Result<ValidatedWish, WishDomainError> {
        Ok(ValidatedWish {
            title: WishTitle::new(self.title, limits.max_title_chars)?,
            description: WishDescription::new(self.description, limits.max_description_chars)?,
            category: WishCategory::try_from(self.category.as_str())?,
            budget: Budget::new(self.budget)?,
            location: self.location.validate()?,
            deadline: self.deadline,
            status: self.status,
            is_public: self.is_public,
            tags: Tags::new(self.tags, limits.max_tag_chars, limits.max_tags)?,
            media: self
                .media
                .into_iter()
                .map(MediaInput::validate)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Field-validated creation payload; the initial status is still raw.
pub(crate) struct ValidatedWish {
    pub(crate) title: WishTitle,
    pub(crate) description: WishDescription,
    pub(crate) category: WishCategory,
    pub(crate) budget: Budget,
    pub(crate) location: Location,
    pub(crate) deadline: DateTime<Utc>,
    pub(crate) status: Option<String>,
    pub(crate) is_public: bool,
    pub(crate) tags: Tags,
    pub(crate) media: Vec<MediaItem>,
}

/// Request payload for editing a wish. Absent fields keep their value.
///
/// `status`, `creator` and `helper` are accepted only so that attempts to set
/// them can be rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWishRequest {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement category.
    #[serde(default)]
    pub category: Option<String>,
    /// Replacement budget.
    #[serde(default)]
    pub budget: Option<f64>,
    /// Replacement location.
    #[serde(default)]
    pub location: Option<LocationInput>,
    /// Replacement deadline.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Replacement visibility.
    #[serde(default)]
    pub is_public: Option<bool>,
    /// Replacement tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Rejected when present.
    #[serde(default)]
    pub status: Option<Value>,
    /// Rejected when present.
    #[serde(default)]
    pub creator: Option<Value>,
    /// Rejected when present.
    #[serde(default)]
    pub helper: Option<Value>,
}

impl UpdateWishRequest {
    /// Names the lifecycle-owned fields this payload tries to set.
    #[must_use]
    pub fn protected_fields(&self) -> Vec<&'static str> {
        [
            ("status", &self.status),
            ("creator", &self.creator),
            ("helper", &self.helper),
        ]
        .into_iter()
        .filter(|(_, value)| matches!(value, Some(json) if !json.is_null()))
        .map(|(name, _)| name)
        .collect()
    }

    pub(crate) fn validate(self, limits: &WishLimits) -> Result<MetadataChanges, WishDomainError> {
        Ok(MetadataChanges {
            title: self
                .title
                .map(|title| WishTitle::new(title, limits.max_title_chars))
                .transpose()?,
            description: self
                .description
                .map(|description| WishDescription::new(description, limits.max_description_chars))
                .transpose()?,
            category: self
                .category
                .map(|category| WishCategory::try_from(category.as_str()))
                .transpose()?,
            budget: self.budget.map(Budget::new).transpose()?,
            location: self.location.map(LocationInput::validate).transpose()?,
            deadline: self.deadline,
            is_public: self.is_public,
            tags: self
                .tags
                .map(|tags| Tags::new(tags, limits.max_tag_chars, limits.max_tags))
                .transpose()?,
        })
    }
}

/// List parameters as parsed from the query string.
///
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWishesRequest {
    /// Category filter.
    #[serde(default)]
    pub category: Option<String>,
    /// Status filter.
    #[serde(default)]
    pub status: Option<String>,
    /// Creator filter.
    #[serde(default)]
    pub creator: Option<String>,
    /// Helper filter.
    #[serde(default)]
    pub helper: Option<String>,
    /// Inclusive lower budget bound.
    #[serde(default)]
    pub min_budget: Option<f64>,
    /// Inclusive upper budget bound.
    #[serde(default)]
    pub max_budget: Option<f64>,
    /// Search origin as `"longitude,latitude"`.
    #[serde(default)]
    pub location: Option<String>,
    /// Search radius in kilometres.
    #[serde(default)]
    pub radius: Option<f64>,
    /// One-based page number.
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size.
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Review payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewRequest {
    /// Stars, 1 to 5.
    pub rating: i32,
    /// Optional comment.
    #[serde(default)]
    pub comment: Option<String>,
}

impl ReviewRequest {
    /// Creates a review payload.
    #[must_use]
    pub fn new(rating: i32, comment: impl Into<String>) -> Self {
        Self {
            rating,
            comment: Some(comment.into()),
        }
    }
}
