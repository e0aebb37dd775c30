//! Type resolution hook

use crate::codec::JsonCodec;
use crate::types::{DeclaredType, JsonType, TypeDescriptor};
use courier_core::Result;

/// Turns a declared type into the codec's [`JsonType`].
///
/// `context` is the type the declaration appeared in, when known. Returning
/// an error marks the type as unsupported: capability checks answer `false`
/// and conversions fail with that error.
pub trait TypeResolver: Send + Sync {
    fn resolve(
        &self,
        codec: &JsonCodec,
        declared: &DeclaredType,
        context: Option<&TypeDescriptor>,
    ) -> Result<JsonType>;
}

/// Delegates to [`JsonCodec::construct_type`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTypeResolver;

impl TypeResolver for DefaultTypeResolver {
    fn resolve(
        &self,
        codec: &JsonCodec,
        declared: &DeclaredType,
        context: Option<&TypeDescriptor>,
    ) -> Result<JsonType> {
        Ok(codec.construct_type(declared, context))
    }
}

impl<F> TypeResolver for F
where
    F: Fn(&JsonCodec, &DeclaredType, Option<&TypeDescriptor>) -> Result<JsonType> + Send + Sync,
{
    fn resolve(
        &self,
        codec: &JsonCodec,
        declared: &DeclaredType,
        context: Option<&TypeDescriptor>,
    ) -> Result<JsonType> {
        self(codec, declared, context)
    }
}
