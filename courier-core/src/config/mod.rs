//! Configuration for Courier converters

mod loader;
mod types;

pub use loader::{ConfigFormat, ConfigLoader};
pub use types::*;
