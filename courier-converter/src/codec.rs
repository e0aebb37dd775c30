//! JSON codec
//!
//! Holds the settings that drive `serde_json` and performs the actual
//! reads and writes.

use crate::types::{DeclaredType, JsonType, TypeDescriptor};
use courier_core::config::CodecOptions;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io;

/// JSON codec settings
#[derive(Debug, Clone, PartialEq)]
pub struct JsonCodec {
    indent_output: bool,
    indent: String,
    accept_single_value_as_array: bool,
}

impl JsonCodec {
    /// Create a codec with default settings (compact output)
    pub fn new() -> Self {
        Self::from_options(&CodecOptions::default())
    }

    /// Create a codec from configuration
    pub fn from_options(options: &CodecOptions) -> Self {
        Self {
            indent_output: options.indent_output,
            indent: options.indent.clone(),
            accept_single_value_as_array: options.accept_single_value_as_array,
        }
    }

    /// Current settings as configuration
    pub fn options(&self) -> CodecOptions {
        CodecOptions {
            indent_output: self.indent_output,
            indent: self.indent.clone(),
            accept_single_value_as_array: self.accept_single_value_as_array,
        }
    }

    pub fn indent_output(&self) -> bool {
        self.indent_output
    }

    pub fn set_indent_output(&mut self, enabled: bool) {
        self.indent_output = enabled;
    }

    pub fn with_indent_output(mut self, enabled: bool) -> Self {
        self.indent_output = enabled;
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn accept_single_value_as_array(&self) -> bool {
        self.accept_single_value_as_array
    }

    pub fn with_accept_single_value_as_array(mut self, enabled: bool) -> Self {
        self.accept_single_value_as_array = enabled;
        self
    }

    /// Build the codec's view of a declared type
    pub fn construct_type(
        &self,
        declared: &DeclaredType,
        context: Option<&TypeDescriptor>,
    ) -> JsonType {
        JsonType::new(declared.clone(), context.copied())
            .with_single_value_as_array(self.accept_single_value_as_array)
    }

    /// Whether the type's `Deserialize` impl could be introspected
    pub fn can_deserialize(&self, json_type: &JsonType) -> bool {
        json_type.shape().is_some()
    }

    /// Parse `payload` into `T`
    pub fn read_value<T: DeserializeOwned>(
        &self,
        payload: &[u8],
        json_type: &JsonType,
    ) -> serde_json::Result<T> {
        if !json_type.accepts_single_value_as_array() {
            return serde_json::from_slice(payload);
        }

        let first = payload.iter().find(|b| !b.is_ascii_whitespace());
        if first == Some(&b'[') {
            return serde_json::from_slice(payload);
        }

        // A lone document only; `1, 2` must not become `[1, 2]`
        serde_json::from_slice::<IgnoredAny>(payload)?;
        let mut wrapped = Vec::with_capacity(payload.len() + 2);
        wrapped.push(b'[');
        wrapped.extend_from_slice(payload);
        wrapped.push(b']');
        serde_json::from_slice(&wrapped)
    }

    /// Write `value` to `writer`, indented when `indent_output` is on
    pub fn write_value<W, T>(&self, writer: W, value: &T) -> serde_json::Result<()>
    where
        W: io::Write,
        T: Serialize + ?Sized,
    {
        if self.indent_output {
            let formatter = PrettyFormatter::with_indent(self.indent.as_bytes());
            let mut serializer = Serializer::with_formatter(writer, formatter);
            value.serialize(&mut serializer)
        } else {
            let mut serializer = Serializer::new(writer);
            value.serialize(&mut serializer)
        }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::{json, Value};

    fn write(codec: &JsonCodec, value: &Value) -> String {
        let mut out = Vec::new();
        codec.write_value(&mut out, value).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_compact_by_default() {
        let codec = JsonCodec::new();
        assert!(!codec.indent_output());
        assert_eq!(write(&codec, &json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_indent_output() {
        let codec = JsonCodec::new().with_indent_output(true);
        assert_eq!(write(&codec, &json!({"a": 1})), "{\n  \"a\": 1\n}");

        let tabs = codec.with_indent("\t");
        assert_eq!(write(&tabs, &json!({"a": 1})), "{\n\t\"a\": 1\n}");
    }

    #[test]
    fn test_options_round_trip() {
        let options = CodecOptions {
            indent_output: true,
            indent: "    ".to_string(),
            accept_single_value_as_array: true,
        };
        assert_eq!(JsonCodec::from_options(&options).options(), options);
    }

    #[test]
    fn test_construct_type_applies_single_value_setting() {
        let declared = DeclaredType::readable::<Vec<u32>>();
        let context = TypeDescriptor::of::<String>();

        let plain = JsonCodec::new().construct_type(&declared, Some(&context));
        assert!(!plain.accepts_single_value_as_array());
        assert_eq!(plain.context(), Some(&context));

        let lenient = JsonCodec::new()
            .with_accept_single_value_as_array(true)
            .construct_type(&declared, None);
        assert!(lenient.accepts_single_value_as_array());
    }

    #[test]
    fn test_read_single_value_as_array() {
        let codec = JsonCodec::new().with_accept_single_value_as_array(true);
        let json_type = codec.construct_type(&DeclaredType::readable::<Vec<u32>>(), None);

        let single: Vec<u32> = codec.read_value(b"7", &json_type).unwrap();
        assert_eq!(single, vec![7]);

        let many: Vec<u32> = codec.read_value(b"[1,2]", &json_type).unwrap();
        assert_eq!(many, vec![1, 2]);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Named {
        name: String,
    }

    fn lenient<T: DeserializeOwned + 'static>() -> (JsonCodec, JsonType) {
        let codec = JsonCodec::new().with_accept_single_value_as_array(true);
        let json_type = codec.construct_type(&DeclaredType::readable::<T>(), None);
        (codec, json_type)
    }

    #[test]
    fn test_single_value_as_array_keeps_wide_integers() {
        let (codec, json_type) = lenient::<Vec<u128>>();

        let mut out = Vec::new();
        codec.write_value(&mut out, &vec![u128::MAX]).unwrap();
        let back: Vec<u128> = codec.read_value(&out, &json_type).unwrap();
        assert_eq!(back, vec![u128::MAX]);

        let single: Vec<u128> = codec
            .read_value(u128::MAX.to_string().as_bytes(), &json_type)
            .unwrap();
        assert_eq!(single, vec![u128::MAX]);
    }

    #[test]
    fn test_single_value_as_array_keeps_duplicate_field_check() {
        let (codec, json_type) = lenient::<Vec<Named>>();

        assert!(codec
            .read_value::<Vec<Named>>(br#"[{"name":"a","name":"b"}]"#, &json_type)
            .is_err());
        assert!(codec
            .read_value::<Vec<Named>>(br#"{"name":"a","name":"b"}"#, &json_type)
            .is_err());

        let one: Vec<Named> = codec
            .read_value(br#" {"name":"a"} "#, &json_type)
            .unwrap();
        assert_eq!(one, vec![Named { name: "a".to_string() }]);
    }

    #[test]
    fn test_single_value_as_array_rejects_bare_lists() {
        let (codec, json_type) = lenient::<Vec<u32>>();
        assert!(codec.read_value::<Vec<u32>>(b"1, 2", &json_type).is_err());
        assert!(codec.read_value::<Vec<u32>>(b"", &json_type).is_err());
    }

    #[test]
    fn test_read_rejects_trailing_garbage() {
        let codec = JsonCodec::new();
        let json_type = codec.construct_type(&DeclaredType::readable::<Value>(), None);
        assert!(codec.read_value::<Value>(b"{} {}", &json_type).is_err());
    }
}
