//! Attribute reading.
//!
//! Every attribute of a node is copied into an [`AttrValue`], keeping the
//! dataspace shape of array-valued attributes intact.

use super::dtype::TypeCode;
use super::raw::{self, TypeClass};
use super::Attributes;
use crate::error::{H5MetaError, Result};
use hdf5::types::{FloatSize, H5Type, IntSize, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Attribute, Datatype, Location};
use indexmap::IndexMap;
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

/// A single attribute element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// Signed integer of any width.
    Int(i64),
    /// Unsigned integer of any width.
    UInt(u64),
    /// Floating point value of any width.
    Float(f64),
    /// Fixed or variable length string, resolved reference path, or a
    /// `<...>` placeholder for data with no structured form.
    Str(String),
    /// Fixed or variable length array element.
    List(Vec<Scalar>),
    /// Compound element, field name to value in declaration order.
    Record(IndexMap<String, Scalar>),
}

/// Value of one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Attribute with a null dataspace.
    Empty,
    /// Attribute with a scalar dataspace.
    Scalar(Scalar),
    /// Attribute with a simple dataspace, stored with its original shape.
    Array(ArrayD<Scalar>),
}

impl AttrValue {
    /// Build a value from the attribute's dataspace shape and its elements in
    /// row-major order.
    pub fn from_shape(shape: &[usize], values: Vec<Scalar>) -> Result<Self> {
        if shape.is_empty() {
            return Ok(values
                .into_iter()
                .next()
                .map_or(AttrValue::Empty, AttrValue::Scalar));
        }
        let array = ArrayD::from_shape_vec(IxDyn(shape), values)
            .map_err(|e| H5MetaError::Hdf5(format!("attribute shape mismatch: {}", e)))?;
        Ok(AttrValue::Array(array))
    }

    /// Dimension sizes, empty for scalars.
    pub fn shape(&self) -> &[usize] {
        match self {
            AttrValue::Array(array) => array.shape(),
            AttrValue::Empty | AttrValue::Scalar(_) => &[],
        }
    }

    /// The scalar value, if this attribute is a scalar.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            AttrValue::Scalar(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AttrValue::Empty => serializer.serialize_none(),
            AttrValue::Scalar(s) => s.serialize(serializer),
            AttrValue::Array(array) => Nested(array.view()).serialize(serializer),
        }
    }
}

/// Serializes an n-dimensional view as nested sequences.
struct Nested<'a>(ArrayViewD<'a, Scalar>);

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.0.ndim() == 0 {
            return match self.0.iter().next() {
                Some(value) => value.serialize(serializer),
                None => serializer.serialize_none(),
            };
        }
        let mut seq = serializer.serialize_seq(Some(self.0.len_of(Axis(0))))?;
        for sub in self.0.outer_iter() {
            seq.serialize_element(&Nested(sub))?;
        }
        seq.end()
    }
}

/// Copy every attribute of `loc` into a plain mapping.
///
/// Enums are reported as their base integer, compounds as records, arrays
/// as lists and object references as the path of their target. Only a
/// failing read aborts the extraction.
pub fn extract_attributes(loc: &Location) -> Result<Attributes> {
    let owner = loc.name();
    let mut attributes = Attributes::new();

    for name in loc.attr_names()? {
        let attr = loc.attr(&name)?;
        let value = read_attribute(&owner, &name, &attr)?;
        attributes.insert(name, value);
    }

    Ok(attributes)
}

fn read_attribute(owner: &str, name: &str, attr: &Attribute) -> Result<AttrValue> {
    let dtype = attr.dtype()?;

    let values = match dtype.to_descriptor() {
        Ok(descriptor) => read_described(attr, &descriptor).map_err(|err| {
            tracing::debug!("Reading {}@{} failed: {}", owner, name, err);
            H5MetaError::unsupported_attribute(owner, name, format!("{:?}", descriptor))
        })?,
        Err(_) => read_undescribed(attr, &dtype).map_err(|err| {
            tracing::debug!("Reading {}@{} failed: {}", owner, name, err);
            H5MetaError::unsupported_attribute(owner, name, TypeCode::of(&dtype).to_string())
        })?,
    };

    AttrValue::from_shape(&attr.shape(), values)
}

fn read_described(attr: &Attribute, descriptor: &TypeDescriptor) -> Result<Vec<Scalar>> {
    match descriptor {
        TypeDescriptor::Boolean => lift(attr, Scalar::Bool),
        TypeDescriptor::Integer(IntSize::U1) => lift(attr, |v: i8| Scalar::Int(v.into())),
        TypeDescriptor::Integer(IntSize::U2) => lift(attr, |v: i16| Scalar::Int(v.into())),
        TypeDescriptor::Integer(IntSize::U4) => lift(attr, |v: i32| Scalar::Int(v.into())),
        TypeDescriptor::Integer(IntSize::U8) => lift(attr, Scalar::Int),
        TypeDescriptor::Unsigned(IntSize::U1) => lift(attr, |v: u8| Scalar::UInt(v.into())),
        TypeDescriptor::Unsigned(IntSize::U2) => lift(attr, |v: u16| Scalar::UInt(v.into())),
        TypeDescriptor::Unsigned(IntSize::U4) => lift(attr, |v: u32| Scalar::UInt(v.into())),
        TypeDescriptor::Unsigned(IntSize::U8) => lift(attr, Scalar::UInt),
        TypeDescriptor::Float(FloatSize::U4) => lift(attr, |v: f32| Scalar::Float(v.into())),
        TypeDescriptor::Float(FloatSize::U8) => lift(attr, Scalar::Float),
        TypeDescriptor::VarLenAscii => {
            lift(attr, |v: VarLenAscii| Scalar::Str(v.as_str().to_string()))
        },
        TypeDescriptor::VarLenUnicode => {
            lift(attr, |v: VarLenUnicode| Scalar::Str(v.as_str().to_string()))
        },
        // Fixed strings are read at their stored width.
        other => raw::read_elements(attr, other),
    }
}

// Half floats and odd-width integers convert to the widest native type.
// Opaque, bitfield and time data keep a placeholder per element.
fn read_undescribed(attr: &Attribute, dtype: &Datatype) -> Result<Vec<Scalar>> {
    match raw::type_class(dtype) {
        TypeClass::Float => lift(attr, Scalar::Float),
        TypeClass::Integer { signed: true } => lift(attr, Scalar::Int),
        TypeClass::Integer { signed: false } => lift(attr, Scalar::UInt),
        TypeClass::Bitfield | TypeClass::VarLen | TypeClass::Other => {
            let placeholder = Scalar::Str(format!("<{}>", TypeCode::of(dtype)));
            Ok(vec![placeholder; attr.space()?.size()])
        },
    }
}

/// Read all elements as `T` and map each one into a [`Scalar`].
fn lift<T, F>(attr: &Attribute, f: F) -> Result<Vec<Scalar>>
where
    T: H5Type,
    F: Fn(T) -> Scalar,
{
    Ok(attr.read_raw::<T>()?.into_iter().map(f).collect())
}
