//! Courier Message Converters
//!
//! Converts message payloads to and from typed values. The JSON converter
//! is the one implementation shipped here.
//!
//! # Example
//!
//! ```rust
//! use courier_converter::{JsonMessageConverter, MessageConverter};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Greeting {
//!     name: String,
//! }
//!
//! let converter = JsonMessageConverter::new().with_prefix_json(true);
//! let bytes = converter
//!     .convert_to_payload(&Greeting { name: "ok".into() }, None)
//!     .unwrap();
//! assert_eq!(bytes, b"{} && {\"name\":\"ok\"}");
//! ```

mod codec;
mod json;
mod resolver;
mod support;
mod traits;
mod types;

pub use codec::JsonCodec;
pub use json::{JsonMessageConverter, JSON_PREFIX};
pub use resolver::{DefaultTypeResolver, TypeResolver};
pub use support::SupportedMediaTypes;
pub use traits::MessageConverter;
pub use types::{DeclaredType, JsonType, Shape, TypeDescriptor};
