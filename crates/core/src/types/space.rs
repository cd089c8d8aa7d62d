//! Space (tenant) identifier and configuration record.
//!
//! A "space" is one branded storefront variant sharing the same codebase and
//! backend, distinguished by subdomain. The [`SpaceId`] is the join key used
//! everywhere: host resolution, config lookup, catalog filtering, and cart
//! key scoping.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::theme::Theme;

/// The reserved identifier for the default (unbranded) space.
///
/// The registry must always be able to serve this id, even when the config
/// source is unreachable.
pub const DEFAULT_SPACE_ID: &str = "default";

/// Errors that can occur when parsing a [`SpaceId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SpaceIdError {
    /// The input string is empty.
    #[error("space id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("space id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("space id contains invalid character '{found}'")]
    InvalidCharacter {
        /// The offending character.
        found: char,
    },
    /// The input starts or ends with a hyphen.
    #[error("space id must not start or end with '-'")]
    EdgeHyphen,
}

/// A space (tenant) identifier.
///
/// Space ids double as subdomain labels, so they follow DNS label rules:
/// lowercase alphanumerics and hyphens, at most 63 characters, no leading or
/// trailing hyphen. Parsing normalizes input to lowercase and trims
/// surrounding whitespace.
///
/// ## Examples
///
/// ```
/// use merchspace_core::SpaceId;
///
/// let id = SpaceId::parse("Acme").unwrap();
/// assert_eq!(id.as_str(), "acme");
/// assert!(!id.is_default());
///
/// assert!(SpaceId::parse("").is_err());
/// assert!(SpaceId::parse("no.dots").is_err());
/// assert!(SpaceId::parse("-edge").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpaceId(String);

impl SpaceId {
    /// Maximum length of a space id (DNS label limit).
    pub const MAX_LENGTH: usize = 63;

    /// Parse a `SpaceId` from a string.
    ///
    /// Input is trimmed and lowercased before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 63 characters,
    /// contains a character outside `[a-z0-9-]`, or starts/ends with a hyphen.
    pub fn parse(s: &str) -> Result<Self, SpaceIdError> {
        let normalized = s.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(SpaceIdError::Empty);
        }

        if normalized.len() > Self::MAX_LENGTH {
            return Err(SpaceIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(found) = normalized
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(SpaceIdError::InvalidCharacter { found });
        }

        if normalized.starts_with('-') || normalized.ends_with('-') {
            return Err(SpaceIdError::EdgeHyphen);
        }

        Ok(Self(normalized))
    }

    /// Whether this is the reserved default space id.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SPACE_ID
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SpaceId {
    fn default() -> Self {
        Self(DEFAULT_SPACE_ID.to_string())
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SpaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SpaceId {
    type Error = SpaceIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SpaceId> for String {
    fn from(id: SpaceId) -> Self {
        id.0
    }
}

/// Configuration record for one space.
///
/// Authored out-of-band as a `space.yaml` file per space; immutable from the
/// storefront's perspective. Every presentation field is optional and
/// defaults to an empty value; absent theme roles fall back to the global
/// default palette at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    /// Unique space id (subdomain label). Join key everywhere else.
    pub id: SpaceId,
    /// Display name shown in the header and page titles.
    pub name: String,
    /// Short marketing line shown under the name.
    #[serde(default)]
    pub tagline: String,
    /// Longer storefront description.
    #[serde(default)]
    pub description: String,
    /// Canonical domain for this space (informational).
    #[serde(default)]
    pub domain: String,
    /// Footer copy.
    #[serde(default)]
    pub footer_text: String,
    /// Logo image URL, if the space has one.
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Per-space palette overrides.
    #[serde(default)]
    pub theme: Theme,
    /// Opaque predicate passed to the catalog query to select this space's
    /// designs. `"all"` means no restriction.
    #[serde(default = "default_design_filter")]
    pub design_filter: String,
    /// Ordered help strings shown on design/product pages.
    #[serde(default)]
    pub design_tips: Vec<String>,
}

fn default_design_filter() -> String {
    "all".to_string()
}

impl Space {
    /// Built-in fallback configuration for the default space.
    ///
    /// Used when the config source has no `default/space.yaml` (or is
    /// unreachable), so that default-space lookups always succeed.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            id: SpaceId::default(),
            name: "Merchspace".to_string(),
            tagline: String::new(),
            description: String::new(),
            domain: "merchspace.shop".to_string(),
            footer_text: String::new(),
            logo_url: None,
            theme: Theme::default(),
            design_filter: default_design_filter(),
            design_tips: Vec::new(),
        }
    }
}
