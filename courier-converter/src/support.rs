//! Media type gating shared by converters

use courier_core::media_type::{ALL, APPLICATION_WILDCARD_JSON};
use courier_core::MediaType;

/// Ordered, non-empty list of media types a converter handles
#[derive(Debug, Clone, PartialEq)]
pub struct SupportedMediaTypes {
    media_types: Vec<MediaType>,
}

impl SupportedMediaTypes {
    /// `application/json` and `application/*+json`
    pub fn json() -> Self {
        Self {
            media_types: vec![
                MediaType::application_json(),
                MediaType::from_static(APPLICATION_WILDCARD_JSON),
            ],
        }
    }

    pub fn as_slice(&self) -> &[MediaType] {
        &self.media_types
    }

    /// Whether a payload declared as `media_type` can be read.
    ///
    /// An absent media type is accepted.
    pub fn can_convert_from(&self, media_type: Option<&MediaType>) -> bool {
        match media_type {
            None => true,
            Some(media_type) => self.media_types.iter().any(|s| s.includes(media_type)),
        }
    }

    /// Whether a payload can be written for a caller accepting `media_type`.
    ///
    /// An absent media type and `*/*` are accepted.
    pub fn can_convert_to(&self, media_type: Option<&MediaType>) -> bool {
        match media_type {
            None => true,
            Some(media_type) if media_type.essence() == ALL => true,
            Some(media_type) => self
                .media_types
                .iter()
                .any(|s| s.is_compatible_with(media_type)),
        }
    }

    /// Content type written when the caller does not name a concrete one
    pub fn default_content_type(&self) -> &MediaType {
        &self.media_types[0]
    }

    /// The requested content type when concrete, the default otherwise
    pub fn resolve_content_type(&self, requested: Option<&MediaType>) -> MediaType {
        match requested {
            Some(media_type) if media_type.is_concrete() => media_type.clone(),
            _ => self.default_content_type().clone(),
        }
    }
}

impl Default for SupportedMediaTypes {
    fn default() -> Self {
        Self::json()
    }
}
