//! Configuration for wish validation limits, query defaults, and policy.
//!
//! The host deserialises a [`WishConfig`] from whatever source it uses
//! (file, environment, defaults) and hands it to the services. Every section
//! falls back to its defaults when omitted.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the wish services.
///
/// # Examples
///
/// ```
/// use wishboard::wish::config::WishConfig;
///
/// let config = WishConfig::default();
/// assert_eq!(config.limits.max_title_chars, 50);
/// assert!(!config.policy.require_future_deadline);
///
/// let strict = WishConfig::strict();
/// assert!(strict.policy.restrict_reviews_to_participants);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WishConfig {
    /// Field length and count limits.
    pub limits: WishLimits,
    /// Defaults applied to list queries.
    pub query: QueryDefaults,
    /// Optional behaviour switches.
    pub policy: WishPolicy,
}

impl WishConfig {
    /// Creates a configuration with every optional policy check enabled.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            policy: WishPolicy {
                require_future_deadline: true,
                restrict_reviews_to_participants: true,
            },
            ..Self::default()
        }
    }
}

/// Length and count limits for wish fields, measured in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WishLimits {
    /// Maximum title length.
    pub max_title_chars: usize,
    /// Maximum description length.
    pub max_description_chars: usize,
    /// Maximum review comment length.
    pub max_comment_chars: usize,
    /// Maximum length of a single tag.
    pub max_tag_chars: usize,
    /// Maximum number of tags on a wish.
    pub max_tags: usize,
}

impl Default for WishLimits {
    fn default() -> Self {
        Self {
            max_title_chars: 50,
            max_description_chars: 500,
            max_comment_chars: 200,
            max_tag_chars: 30,
            max_tags: 20,
        }
    }
}

/// Defaults applied when list requests omit pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDefaults {
    /// Page size used when the request carries no `limit`.
    pub default_limit: u32,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self { default_limit: 10 }
    }
}

/// Behaviour switches for checks the platform does not enforce by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WishPolicy {
    /// Rejects creation or updates whose deadline is not after the current
    /// time.
    pub require_future_deadline: bool,
    /// Only the creator and the accepted helper may review a wish.
    pub restrict_reviews_to_participants: bool,
}
