//! Attribute payloads read in the library's native memory layout.
//!
//! Compound, enum, array, reference and fixed-length string attributes have
//! no static Rust type to read into. Their elements are copied into a byte
//! buffer built from the type descriptor and decoded field by field. Memory
//! the library allocates for variable-length members is reclaimed before the
//! buffer is dropped.

#![allow(unsafe_code)]

use std::ffi::{c_char, CStr};
use std::{mem, ptr, slice};

use hdf5::types::{FloatSize, IntSize, Reference, TypeDescriptor};
use hdf5::{Attribute, Datatype};
use hdf5_sys::h5a::H5Aread;
use hdf5_sys::h5p::H5P_DEFAULT;
use hdf5_sys::h5r::{H5R_ref_t, H5R_type_t, H5Rget_name, H5Rget_obj_name};
use hdf5_sys::h5t::{H5T_class_t, H5T_sign_t, H5Tget_class, H5Tget_sign, H5Treclaim};

use super::attribute::Scalar;
use crate::error::{H5MetaError, Result};

/// Storage class of a datatype, for types without a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeClass {
    Integer { signed: bool },
    Float,
    Bitfield,
    VarLen,
    Other,
}

pub(crate) fn type_class(dtype: &Datatype) -> TypeClass {
    let id = dtype.id();
    hdf5::sync::sync(|| {
        // SAFETY: `id` is a live datatype handle owned by `dtype`.
        unsafe {
            match H5Tget_class(id) {
                H5T_class_t::H5T_INTEGER => TypeClass::Integer {
                    signed: H5Tget_sign(id) == H5T_sign_t::H5T_SGN_2,
                },
                H5T_class_t::H5T_FLOAT => TypeClass::Float,
                H5T_class_t::H5T_BITFIELD => TypeClass::Bitfield,
                H5T_class_t::H5T_VLEN => TypeClass::VarLen,
                _ => TypeClass::Other,
            }
        }
    })
}

/// Read every element of `attr` as `descriptor` and decode it.
pub(crate) fn read_elements(
    attr: &Attribute,
    descriptor: &TypeDescriptor,
) -> Result<Vec<Scalar>> {
    let layout = descriptor.to_c_repr();
    let mem_type = Datatype::from_descriptor(&layout)?;
    let space = attr.space()?;
    let count = space.size();
    let width = layout.size();
    if count == 0 || width == 0 {
        return Ok(Vec::new());
    }

    // u64 words keep pointers inside the buffer aligned.
    let len = count * width;
    let mut words = vec![0u64; (len + 7) / 8];
    let buf = words.as_mut_ptr().cast::<u8>();

    hdf5::sync::sync(|| {
        // SAFETY: `buf` holds `count` elements of `mem_type`.
        if unsafe { H5Aread(attr.id(), mem_type.id(), buf.cast()) } < 0 {
            return Err(H5MetaError::Hdf5(format!("H5Aread failed for {}", layout)));
        }

        let decoded: Vec<Scalar> = {
            // SAFETY: the first `len` bytes were written by the read above.
            let bytes = unsafe { slice::from_raw_parts(buf, len) };
            bytes
                .chunks_exact(width)
                .map(|element| decode(attr, &layout, element))
                .collect()
        };

        // SAFETY: releases what the read allocated for variable-length members.
        unsafe {
            H5Treclaim(mem_type.id(), space.id(), H5P_DEFAULT, buf.cast());
        }
        Ok(decoded)
    })
}

fn decode(attr: &Attribute, descriptor: &TypeDescriptor, bytes: &[u8]) -> Scalar {
    match descriptor {
        TypeDescriptor::Integer(size) => Scalar::Int(signed(bytes, *size)),
        TypeDescriptor::Unsigned(size) => Scalar::UInt(unsigned(bytes, *size)),
        TypeDescriptor::Float(FloatSize::U4) => {
            Scalar::Float(f32::from_ne_bytes(word(bytes)).into())
        },
        TypeDescriptor::Float(_) => Scalar::Float(f64::from_ne_bytes(word(bytes))),
        TypeDescriptor::Boolean => Scalar::Bool(bytes.first().is_some_and(|b| *b != 0)),
        TypeDescriptor::Enum(e) if e.signed => Scalar::Int(signed(bytes, e.size)),
        TypeDescriptor::Enum(e) => Scalar::UInt(unsigned(bytes, e.size)),
        TypeDescriptor::Compound(compound) => Scalar::Record(
            compound
                .fields
                .iter()
                .map(|field| {
                    let end = field.offset + field.ty.size();
                    let member = bytes.get(field.offset..end).unwrap_or_default();
                    (field.name.clone(), decode(attr, &field.ty, member))
                })
                .collect(),
        ),
        TypeDescriptor::FixedArray(item, n) => Scalar::List(
            bytes
                .chunks_exact(item.size().max(1))
                .take(*n)
                .map(|element| decode(attr, item, element))
                .collect(),
        ),
        TypeDescriptor::VarLenArray(item) => Scalar::List(
            varlen_payload(bytes, item.size())
                .chunks_exact(item.size().max(1))
                .map(|element| decode(attr, item, element))
                .collect(),
        ),
        TypeDescriptor::FixedAscii(_) | TypeDescriptor::FixedUnicode(_) => {
            let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
            Scalar::Str(String::from_utf8_lossy(&bytes[..end]).into_owned())
        },
        TypeDescriptor::VarLenAscii | TypeDescriptor::VarLenUnicode => {
            Scalar::Str(varlen_string(bytes))
        },
        TypeDescriptor::Reference(kind) => Scalar::Str(reference_target(attr, *kind, bytes)),
    }
}

fn word<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let n = N.min(bytes.len());
    out[..n].copy_from_slice(&bytes[..n]);
    out
}

fn signed(bytes: &[u8], size: IntSize) -> i64 {
    match size {
        IntSize::U1 => i8::from_ne_bytes(word(bytes)).into(),
        IntSize::U2 => i16::from_ne_bytes(word(bytes)).into(),
        IntSize::U4 => i32::from_ne_bytes(word(bytes)).into(),
        IntSize::U8 => i64::from_ne_bytes(word(bytes)),
    }
}

fn unsigned(bytes: &[u8], size: IntSize) -> u64 {
    match size {
        IntSize::U1 => u8::from_ne_bytes(word(bytes)).into(),
        IntSize::U2 => u16::from_ne_bytes(word(bytes)).into(),
        IntSize::U4 => u32::from_ne_bytes(word(bytes)).into(),
        IntSize::U8 => u64::from_ne_bytes(word(bytes)),
    }
}

fn pointer(bytes: &[u8]) -> *const u8 {
    usize::from_ne_bytes(word(bytes)) as *const u8
}

/// Elements behind an `hvl_t` (length, then pointer).
fn varlen_payload(bytes: &[u8], width: usize) -> &[u8] {
    let len = usize::from_ne_bytes(word(bytes));
    let data = pointer(bytes.get(mem::size_of::<usize>()..).unwrap_or_default());
    if data.is_null() || len == 0 {
        return &[];
    }
    // SAFETY: the library allocated `len` elements at `data`; they live until reclaimed.
    unsafe { slice::from_raw_parts(data, len * width) }
}

fn varlen_string(bytes: &[u8]) -> String {
    let data = pointer(bytes);
    if data.is_null() {
        return String::new();
    }
    // SAFETY: variable-length strings are NUL-terminated library allocations.
    unsafe { CStr::from_ptr(data.cast::<c_char>()) }
        .to_string_lossy()
        .into_owned()
}

/// Path of the referenced object, or a tagged placeholder when the
/// reference is null or dangling.
fn reference_target(attr: &Attribute, kind: Reference, bytes: &[u8]) -> String {
    let target = match kind {
        Reference::Object => object_name(attr, H5R_type_t::H5R_OBJECT1, bytes),
        Reference::Region => object_name(attr, H5R_type_t::H5R_DATASET_REGION1, bytes)
            .map(|path| format!("<region of {}>", path)),
        #[allow(unreachable_patterns)]
        _ => standard_name(bytes),
    };
    target.unwrap_or_else(|| "<null reference>".to_string())
}

fn object_name(attr: &Attribute, kind: H5R_type_t, bytes: &[u8]) -> Option<String> {
    let reference = bytes.as_ptr().cast();
    // SAFETY: `bytes` holds one reference of `kind` in native layout.
    read_name(|name, size| unsafe { H5Rget_name(attr.id(), kind, reference, name, size) })
}

fn standard_name(bytes: &[u8]) -> Option<String> {
    let reference = bytes.as_ptr().cast::<H5R_ref_t>();
    // SAFETY: `bytes` holds one `H5R_ref_t`, released by the reclaim after decoding.
    read_name(|name, size| unsafe { H5Rget_obj_name(reference, H5P_DEFAULT, name, size) })
}

/// Call a name getter twice: once for the length, once to fill the buffer.
fn read_name(get: impl Fn(*mut c_char, usize) -> isize) -> Option<String> {
    let len = usize::try_from(get(ptr::null_mut(), 0)).ok().filter(|len| *len > 0)?;
    let mut name = vec![0u8; len + 1];
    if get(name.as_mut_ptr().cast(), name.len()) < 0 {
        return None;
    }
    name.truncate(len);
    String::from_utf8(name).ok()
}
