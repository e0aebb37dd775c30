//! JSON payload converter
//!
//! Reads and writes message payloads as UTF-8 JSON for
//! `application/json` and `application/*+json`.

use crate::codec::JsonCodec;
use crate::resolver::{DefaultTypeResolver, TypeResolver};
use crate::support::SupportedMediaTypes;
use crate::traits::MessageConverter;
use crate::types::{DeclaredType, JsonType, TypeDescriptor};
use courier_core::config::ConverterOptions;
use courier_core::{Error, MediaType, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Written ahead of the document when `prefix_json` is on
pub const JSON_PREFIX: &[u8] = b"{} && ";

/// Converts between typed values and JSON payloads
#[derive(Clone)]
pub struct JsonMessageConverter {
    codec: JsonCodec,
    prefix_json: bool,
    pretty_print: Option<bool>,
    resolver: Arc<dyn TypeResolver>,
    supported: SupportedMediaTypes,
}

// Manual Debug because the resolver is a trait object
impl fmt::Debug for JsonMessageConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonMessageConverter")
            .field("codec", &self.codec)
            .field("prefix_json", &self.prefix_json)
            .field("pretty_print", &self.pretty_print)
            .field("supported", &self.supported)
            .finish()
    }
}

impl JsonMessageConverter {
    /// Create a converter with a default codec, no prefix and no pretty-print override
    pub fn new() -> Self {
        Self {
            codec: JsonCodec::new(),
            prefix_json: false,
            pretty_print: None,
            resolver: Arc::new(DefaultTypeResolver),
            supported: SupportedMediaTypes::json(),
        }
    }

    /// Create a converter from configuration
    pub fn from_options(options: &ConverterOptions) -> Self {
        let mut converter = Self::new();
        converter.configure(options);
        converter
    }

    /// Replace the whole configuration at once.
    ///
    /// The pretty-print override, when set, wins over the codec's own
    /// `indent_output`.
    pub fn configure(&mut self, options: &ConverterOptions) {
        self.codec = JsonCodec::from_options(&options.codec);
        self.prefix_json = options.prefix_json;
        self.pretty_print = options.pretty_print;
        self.apply_pretty_print();
        tracing::debug!(
            prefix_json = self.prefix_json,
            indent_output = self.codec.indent_output(),
            "Configured JSON converter"
        );
    }

    /// Current configuration
    pub fn options(&self) -> ConverterOptions {
        ConverterOptions {
            prefix_json: self.prefix_json,
            pretty_print: self.pretty_print,
            codec: self.codec.options(),
        }
    }

    /// Replace the codec, re-applying the pretty-print override
    pub fn set_codec(&mut self, codec: JsonCodec) {
        self.codec = codec;
        self.apply_pretty_print();
    }

    pub fn with_codec(mut self, codec: JsonCodec) -> Self {
        self.set_codec(codec);
        self
    }

    pub fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    /// Prefix written documents with `{} && `
    pub fn set_prefix_json(&mut self, prefix_json: bool) {
        self.prefix_json = prefix_json;
    }

    pub fn with_prefix_json(mut self, prefix_json: bool) -> Self {
        self.set_prefix_json(prefix_json);
        self
    }

    pub fn prefix_json(&self) -> bool {
        self.prefix_json
    }

    /// Override the codec's `indent_output`
    pub fn set_pretty_print(&mut self, pretty_print: bool) {
        self.pretty_print = Some(pretty_print);
        self.apply_pretty_print();
    }

    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.set_pretty_print(pretty_print);
        self
    }

    /// The pretty-print override, `None` when the codec decides
    pub fn pretty_print(&self) -> Option<bool> {
        self.pretty_print
    }

    fn apply_pretty_print(&mut self) {
        if let Some(pretty_print) = self.pretty_print {
            self.codec.set_indent_output(pretty_print);
        }
    }

    /// Install a custom type resolver
    pub fn set_type_resolver(&mut self, resolver: Arc<dyn TypeResolver>) {
        self.resolver = resolver;
    }

    pub fn with_type_resolver<R: TypeResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Resolve a declared type through the installed resolver
    pub fn resolve_type(
        &self,
        declared: &DeclaredType,
        context: Option<&TypeDescriptor>,
    ) -> Result<JsonType> {
        self.resolver.resolve(&self.codec, declared, context)
    }

    /// Media type gating
    pub fn supported(&self) -> &SupportedMediaTypes {
        &self.supported
    }

    /// Content type to announce for a write, see [`SupportedMediaTypes::resolve_content_type`]
    pub fn content_type_for(&self, requested: Option<&MediaType>) -> MediaType {
        self.supported.resolve_content_type(requested)
    }
}

impl Default for JsonMessageConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageConverter for JsonMessageConverter {
    fn supported_media_types(&self) -> &[MediaType] {
        self.supported.as_slice()
    }

    fn can_convert_from_payload<T>(&self, media_type: Option<&MediaType>) -> bool
    where
        T: DeserializeOwned + 'static,
    {
        let readable = match self.resolve_type(&DeclaredType::readable::<T>(), None) {
            Ok(json_type) => self.codec.can_deserialize(&json_type),
            Err(e) => {
                tracing::debug!("Not readable as JSON: {}", e);
                false
            }
        };
        readable && self.supported.can_convert_from(media_type)
    }

    fn can_convert_to_payload<T>(&self, media_type: Option<&MediaType>) -> bool
    where
        T: Serialize + ?Sized + 'static,
    {
        let writable = match self.resolve_type(&DeclaredType::writable::<T>(), None) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Not writable as JSON: {}", e);
                false
            }
        };
        writable && self.supported.can_convert_to(media_type)
    }

    fn convert_from_payload<T>(&self, content_type: Option<&MediaType>, payload: &[u8]) -> Result<T>
    where
        T: DeserializeOwned + 'static,
    {
        let json_type = self.resolve_type(&DeclaredType::readable::<T>(), None)?;
        tracing::trace!(
            target_type = %json_type.descriptor(),
            content_type = content_type.map(|m| m.essence()).unwrap_or("-"),
            len = payload.len(),
            "Reading JSON payload"
        );
        self.codec
            .read_value(payload, &json_type)
            .map_err(Error::payload_not_readable)
    }

    // The content type does not influence encoding; output is always UTF-8.
    fn convert_to_payload<T>(&self, value: &T, _content_type: Option<&MediaType>) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized + 'static,
    {
        let mut out = Vec::new();
        if self.prefix_json {
            out.extend_from_slice(JSON_PREFIX);
        }
        self.codec
            .write_value(&mut out, value)
            .map_err(Error::serialization_failed)?;
        tracing::trace!(
            source_type = std::any::type_name::<T>(),
            len = out.len(),
            "Wrote JSON payload"
        );
        Ok(out)
    }
}
