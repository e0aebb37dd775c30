//! Type descriptors
//!
//! Rust types are known statically, so "reflection" here means two things:
//! a [`TypeDescriptor`] naming the type, and a [`Shape`] recorded by asking
//! the type's `Deserialize` impl which part of the serde data model it
//! expects.

use serde::de::{self, DeserializeOwned, Visitor};
use std::any::TypeId;
use std::cell::Cell;
use std::fmt;

/// Identity of a Rust type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    /// Descriptor for `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name, as reported by [`std::any::type_name`]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this describes `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Serde data model category a type reads itself from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Bool,
    Integer,
    Float,
    Char,
    String,
    Bytes,
    Optional,
    Unit,
    UnitStruct(&'static str),
    Newtype(&'static str),
    Seq,
    Tuple(usize),
    TupleStruct(&'static str, usize),
    Map,
    Struct {
        name: &'static str,
        fields: &'static [&'static str],
    },
    Enum {
        name: &'static str,
        variants: &'static [&'static str],
    },
    Identifier,
    /// Self-describing: the type accepts whatever the input holds
    Dynamic,
}

impl Shape {
    /// Record the shape `T` asks for.
    ///
    /// Returns `None` when the `Deserialize` impl never consults its
    /// deserializer, in which case nothing is known about the type.
    pub fn probe<T: DeserializeOwned>() -> Option<Shape> {
        let recorded = Cell::new(None);
        let _ = T::deserialize(ShapeProbe { recorded: &recorded });
        recorded.get()
    }

    /// Variable-length sequence (`Vec`, `HashSet`, `VecDeque`, ...)
    pub fn is_sequence(&self) -> bool {
        matches!(self, Shape::Seq)
    }
}

/// A type as declared by the caller, before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    descriptor: TypeDescriptor,
    shape: Option<Shape>,
}

impl DeclaredType {
    /// Declared target of a read, with its shape probed
    pub fn readable<T: DeserializeOwned + 'static>() -> Self {
        Self {
            descriptor: TypeDescriptor::of::<T>(),
            shape: Shape::probe::<T>(),
        }
    }

    /// Declared source of a write; no shape is recorded
    pub fn writable<T: ?Sized + 'static>() -> Self {
        Self {
            descriptor: TypeDescriptor::of::<T>(),
            shape: None,
        }
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }
}

/// A resolved, codec-specific type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonType {
    declared: DeclaredType,
    context: Option<TypeDescriptor>,
    single_value_as_array: bool,
}

impl JsonType {
    pub fn new(declared: DeclaredType, context: Option<TypeDescriptor>) -> Self {
        Self {
            declared,
            context,
            single_value_as_array: false,
        }
    }

    /// Read a lone JSON value as a one-element array.
    ///
    /// Only takes effect for sequence-shaped types.
    pub fn with_single_value_as_array(mut self, enabled: bool) -> Self {
        self.single_value_as_array = enabled && self.is_sequence();
        self
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        self.declared.descriptor()
    }

    pub fn shape(&self) -> Option<Shape> {
        self.declared.shape()
    }

    /// Type the declaration appeared in, if any
    pub fn context(&self) -> Option<&TypeDescriptor> {
        self.context.as_ref()
    }

    pub fn is_sequence(&self) -> bool {
        self.shape().is_some_and(|s| s.is_sequence())
    }

    pub fn accepts_single_value_as_array(&self) -> bool {
        self.single_value_as_array
    }
}

/// Deserializer that records the first request made of it and then fails
struct ShapeProbe<'a> {
    recorded: &'a Cell<Option<Shape>>,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct ProbeError(String);

impl de::Error for ProbeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ProbeError(msg.to_string())
    }
}

impl ShapeProbe<'_> {
    fn record<T>(self, shape: Shape) -> Result<T, ProbeError> {
        self.recorded.set(Some(shape));
        Err(ProbeError("shape recorded".to_string()))
    }
}

macro_rules! probe_as {
    ($($method:ident => $shape:expr),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeError> {
                self.record($shape)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ShapeProbe<'_> {
    type Error = ProbeError;

    probe_as! {
        deserialize_any => Shape::Dynamic,
        deserialize_bool => Shape::Bool,
        deserialize_i8 => Shape::Integer,
        deserialize_i16 => Shape::Integer,
        deserialize_i32 => Shape::Integer,
        deserialize_i64 => Shape::Integer,
        deserialize_i128 => Shape::Integer,
        deserialize_u8 => Shape::Integer,
        deserialize_u16 => Shape::Integer,
        deserialize_u32 => Shape::Integer,
        deserialize_u64 => Shape::Integer,
        deserialize_u128 => Shape::Integer,
        deserialize_f32 => Shape::Float,
        deserialize_f64 => Shape::Float,
        deserialize_char => Shape::Char,
        deserialize_str => Shape::String,
        deserialize_string => Shape::String,
        deserialize_bytes => Shape::Bytes,
        deserialize_byte_buf => Shape::Bytes,
        deserialize_option => Shape::Optional,
        deserialize_unit => Shape::Unit,
        deserialize_seq => Shape::Seq,
        deserialize_map => Shape::Map,
        deserialize_identifier => Shape::Identifier,
        deserialize_ignored_any => Shape::Dynamic,
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        _visitor: V,
    ) -> Result<V::Value, ProbeError> {
        self.record(Shape::UnitStruct(name))
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        _visitor: V,
    ) -> Result<V::Value, ProbeError> {
        self.record(Shape::Newtype(name))
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        len: usize,
        _visitor: V,
    ) -> Result<V::Value, ProbeError> {
        self.record(Shape::Tuple(len))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        len: usize,
        _visitor: V,
    ) -> Result<V::Value, ProbeError> {
        self.record(Shape::TupleStruct(name, len))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, ProbeError> {
        self.record(Shape::Struct { name, fields })
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, ProbeError> {
        self.record(Shape::Enum { name, variants })
    }
}
