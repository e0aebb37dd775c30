//! Media type handling
//!
//! Thin wrapper over [`mime::Mime`] adding the wildcard matching rules
//! converters use to decide whether they accept a content type.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// `application/json`
pub const APPLICATION_JSON: &str = "application/json";

/// `application/*+json`, any JSON-suffixed subtype
pub const APPLICATION_WILDCARD_JSON: &str = "application/*+json";

/// `*/*`
pub const ALL: &str = "*/*";

const WILDCARD: &str = "*";

/// A parsed media type such as `application/vnd.api+json; charset=utf-8`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    inner: mime::Mime,
}

impl MediaType {
    /// Parse a media type string
    pub fn parse(s: &str) -> Result<Self> {
        s.trim()
            .parse::<mime::Mime>()
            .map(|inner| Self { inner })
            .map_err(|e| Error::InvalidMediaType(format!("{}: {}", s, e)))
    }

    /// Parse a media type known at compile time.
    ///
    /// # Panics
    ///
    /// Panics if `s` is not a valid media type.
    pub fn from_static(s: &'static str) -> Self {
        match s.parse::<mime::Mime>() {
            Ok(inner) => Self { inner },
            Err(e) => panic!("invalid static media type {:?}: {}", s, e),
        }
    }

    /// `application/json`
    pub fn application_json() -> Self {
        Self { inner: mime::APPLICATION_JSON }
    }

    /// Top-level type, e.g. `application`
    pub fn type_(&self) -> &str {
        self.inner.type_().as_str()
    }

    /// Subtype without its structured suffix, e.g. `vnd.api` for `vnd.api+json`
    pub fn subtype(&self) -> &str {
        self.inner.subtype().as_str()
    }

    /// Structured syntax suffix, e.g. `json` for `vnd.api+json`
    pub fn suffix(&self) -> Option<&str> {
        self.inner.suffix().map(|s| s.as_str())
    }

    /// Value of the named parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.inner.get_param(name).map(|v| v.as_str())
    }

    /// Value of the `charset` parameter
    pub fn charset(&self) -> Option<&str> {
        self.param("charset")
    }

    /// `type/subtype` without parameters
    pub fn essence(&self) -> &str {
        self.inner.essence_str()
    }

    /// Whether the top-level type is `*`
    pub fn is_wildcard_type(&self) -> bool {
        self.type_() == WILDCARD
    }

    /// Whether the subtype is `*` or `*+suffix`
    pub fn is_wildcard_subtype(&self) -> bool {
        self.subtype() == WILDCARD
    }

    /// Whether neither the type nor the subtype contains a wildcard
    pub fn is_concrete(&self) -> bool {
        !self.is_wildcard_type() && !self.is_wildcard_subtype()
    }

    /// Whether this media type includes `other`.
    ///
    /// `text/*` includes `text/plain`, `application/*+json` includes
    /// `application/vnd.api+json`, but not the other way around.
    pub fn includes(&self, other: &MediaType) -> bool {
        if self.is_wildcard_type() {
            return true;
        }
        if self.type_() != other.type_() {
            return false;
        }
        if self.subtype() == other.subtype() && self.suffix() == other.suffix() {
            return true;
        }
        if !self.is_wildcard_subtype() {
            return false;
        }
        match self.suffix() {
            None => true,
            Some(suffix) => other.suffix() == Some(suffix),
        }
    }

    /// Whether this media type and `other` overlap.
    ///
    /// Symmetric: `application/*+json` is compatible with
    /// `application/vnd.api+json` and vice versa.
    pub fn is_compatible_with(&self, other: &MediaType) -> bool {
        self.includes(other) || other.includes(self)
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<mime::Mime> for MediaType {
    fn from(inner: mime::Mime) -> Self {
        Self { inner }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}
