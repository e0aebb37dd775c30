//! Courier Core Library
//!
//! This crate provides the shared building blocks for Courier message
//! converters, including error handling, media types and configuration.

pub mod config;
pub mod error;
pub mod media_type;

pub use error::{Error, Result};
pub use media_type::MediaType;

/// Courier version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
