//! Configuration type definitions
//!
//! These types describe how a converter is set up before first use.

use serde::{Deserialize, Serialize};

/// Root configuration for Courier
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CourierConfig {
    /// JSON converter settings
    #[serde(default)]
    pub converter: ConverterOptions,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// JSON converter options
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConverterOptions {
    /// Prefix every written document with `{} && `
    #[serde(default)]
    pub prefix_json: bool,

    /// Pretty-print override; `None` keeps the codec's own setting
    #[serde(default)]
    pub pretty_print: Option<bool>,

    /// Codec settings
    #[serde(default)]
    pub codec: CodecOptions,
}

/// JSON codec settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodecOptions {
    /// Indent written documents
    #[serde(default)]
    pub indent_output: bool,

    /// Indentation unit used when `indent_output` is on
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Read a lone value into a sequence target as a one-element sequence
    #[serde(default)]
    pub accept_single_value_as_array: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            indent_output: false,
            indent: default_indent(),
            accept_single_value_as_array: false,
        }
    }
}

fn default_indent() -> String {
    "  ".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}
