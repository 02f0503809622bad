//! Dataset type and storage descriptions.

use std::fmt;

use super::raw::{self, TypeClass};
use hdf5::datatype::ByteOrder;
use hdf5::filters::Filter;
use hdf5::types::TypeDescriptor;
use hdf5::Datatype;
use serde::Serialize;

/// Item width reported for variable-length payloads (an object pointer).
const OBJECT_WIDTH: usize = 8;

/// HDF5 filter id registered for LZF.
const LZF_FILTER_ID: i32 = 32000;

/// NumPy array-interface type string (`<f8`, `|u1`, `|S16`, `|O`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCode {
    order: char,
    kind: char,
    width: usize,
}

impl TypeCode {
    /// Numeric type code. Single-byte types carry no byte order.
    pub fn numeric(kind: char, width: usize, order: ByteOrder) -> Self {
        let order = match order {
            _ if width <= 1 => '|',
            ByteOrder::LittleEndian => '<',
            ByteOrder::BigEndian => '>',
            _ => '|',
        };
        Self { order, kind, width }
    }

    /// Fixed-length byte string of `width` bytes.
    pub fn bytes(width: usize) -> Self {
        Self {
            order: '|',
            kind: 'S',
            width,
        }
    }

    /// Opaque record of `width` bytes (compounds, fixed arrays).
    pub fn void(width: usize) -> Self {
        Self {
            order: '|',
            kind: 'V',
            width,
        }
    }

    /// Variable-length payload.
    pub fn object() -> Self {
        Self {
            order: '|',
            kind: 'O',
            width: OBJECT_WIDTH,
        }
    }

    /// Bytes per element.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Describe an HDF5 datatype.
    ///
    /// Types the descriptor cannot express (half and extended floats,
    /// odd-width integers, opaque, bitfield and time data, multi-dimensional
    /// arrays) are described from their storage class and size.
    pub fn of(dtype: &Datatype) -> Self {
        let width = dtype.size();
        match dtype.to_descriptor() {
            Ok(descriptor) => Self::described(&descriptor, width, dtype.byte_order()),
            Err(_) => Self::from_class(raw::type_class(dtype), width, dtype.byte_order()),
        }
    }

    fn described(descriptor: &TypeDescriptor, width: usize, order: ByteOrder) -> Self {
        match descriptor {
            TypeDescriptor::Boolean => Self {
                order: '|',
                kind: 'b',
                width,
            },
            TypeDescriptor::Integer(_) => Self::numeric('i', width, order),
            TypeDescriptor::Unsigned(_) => Self::numeric('u', width, order),
            TypeDescriptor::Float(_) => Self::numeric('f', width, order),
            TypeDescriptor::Enum(e) => {
                let kind = if e.signed { 'i' } else { 'u' };
                Self::numeric(kind, width, order)
            },
            TypeDescriptor::FixedAscii(len) | TypeDescriptor::FixedUnicode(len) => {
                Self::bytes(*len)
            },
            TypeDescriptor::Compound(_) | TypeDescriptor::FixedArray(..) => Self::void(width),
            _ => Self::object(),
        }
    }

    fn from_class(class: TypeClass, width: usize, order: ByteOrder) -> Self {
        match class {
            TypeClass::Integer { signed: true } => Self::numeric('i', width, order),
            TypeClass::Integer { signed: false } | TypeClass::Bitfield => {
                Self::numeric('u', width, order)
            },
            TypeClass::Float => Self::numeric('f', width, order),
            TypeClass::VarLen => Self::object(),
            TypeClass::Other => Self::void(width),
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == 'O' {
            write!(f, "{}{}", self.order, self.kind)
        } else {
            write!(f, "{}{}{}", self.order, self.kind, self.width)
        }
    }
}

/// Compression codec applied to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Deflate (zlib).
    Gzip,
    /// SZIP.
    Szip,
    /// LZF.
    Lzf,
}

impl Compression {
    /// Codec name as reported in records.
    pub fn name(self) -> &'static str {
        match self {
            Compression::Gzip => "gzip",
            Compression::Szip => "szip",
            Compression::Lzf => "lzf",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the compression codec and its option out of a dataset's filter
/// pipeline. Shuffle, checksums and other filters are ignored.
pub fn compression_of(filters: &[Filter]) -> Option<(Compression, Option<u32>)> {
    let find = |wanted: Compression| {
        filters.iter().find_map(|filter| match (wanted, filter) {
            (Compression::Gzip, Filter::Deflate(level)) => {
                Some((Compression::Gzip, Some(u32::from(*level))))
            },
            (Compression::Szip, Filter::SZip(_, pixels)) => {
                Some((Compression::Szip, Some(u32::from(*pixels))))
            },
            (Compression::Lzf, Filter::User(id, _)) if *id == LZF_FILTER_ID => {
                Some((Compression::Lzf, None))
            },
            _ => None,
        })
    };

    find(Compression::Gzip)
        .or_else(|| find(Compression::Lzf))
        .or_else(|| find(Compression::Szip))
}
