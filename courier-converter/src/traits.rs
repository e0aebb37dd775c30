//! Converter traits

use courier_core::{MediaType, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Contract between a message-handling framework and a payload converter.
///
/// The framework picks a converter by media type, then hands it raw bytes
/// to read or a value to write.
pub trait MessageConverter: Send + Sync {
    /// Media types this converter handles, default content type first
    fn supported_media_types(&self) -> &[MediaType];

    /// Whether a payload of `media_type` can be read into `T`
    fn can_convert_from_payload<T>(&self, media_type: Option<&MediaType>) -> bool
    where
        T: DeserializeOwned + 'static;

    /// Whether `T` can be written for a caller accepting `media_type`
    fn can_convert_to_payload<T>(&self, media_type: Option<&MediaType>) -> bool
    where
        T: Serialize + ?Sized + 'static;

    /// Read `payload` into `T`
    fn convert_from_payload<T>(&self, content_type: Option<&MediaType>, payload: &[u8]) -> Result<T>
    where
        T: DeserializeOwned + 'static;

    /// Write `value` as payload bytes
    fn convert_to_payload<T>(&self, value: &T, content_type: Option<&MediaType>) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized + 'static;
}
