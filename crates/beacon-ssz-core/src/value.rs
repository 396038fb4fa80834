//! Materialized values.
//!
//! A [`Value`] is an immutable tree mirroring some [`Shape`]. Values carry no
//! limits of their own; the shape they are encoded or Merkleized against
//! decides whether they fit.

use crate::error::DecodeError;
use crate::shape::{BasicKind, Shape, ShapeKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    /// Little-endian bytes.
    U256([u8; 32]),
    /// Byte vectors and byte lists.
    Bytes(Vec<u8>),
    /// Bitvectors and bitlists.
    Bits(Vec<bool>),
    Vector(Vec<Value>),
    List(Vec<Value>),
    Container(Vec<Value>),
}

impl Value {
    /// Short name used in mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::U8(_) => "uint8",
            Self::U16(_) => "uint16",
            Self::U32(_) => "uint32",
            Self::U64(_) => "uint64",
            Self::U128(_) => "uint128",
            Self::U256(_) => "uint256",
            Self::Bytes(_) => "bytes",
            Self::Bits(_) => "bits",
            Self::Vector(_) => "vector",
            Self::List(_) => "list",
            Self::Container(_) => "container",
        }
    }

    /// The all-zero value of a shape. Lists are empty.
    pub fn default_for(shape: &Shape) -> Self {
        match shape.kind() {
            ShapeKind::Basic(kind) => match kind {
                BasicKind::Bool => Self::Bool(false),
                BasicKind::U8 => Self::U8(0),
                BasicKind::U16 => Self::U16(0),
                BasicKind::U32 => Self::U32(0),
                BasicKind::U64 => Self::U64(0),
                BasicKind::U128 => Self::U128(0),
                BasicKind::U256 => Self::U256([0; 32]),
            },
            ShapeKind::ByteVector(n) => Self::Bytes(vec![0; *n]),
            ShapeKind::ByteList(_) => Self::Bytes(Vec::new()),
            ShapeKind::Bitvector(n) => Self::Bits(vec![false; *n]),
            ShapeKind::Bitlist(_) => Self::Bits(Vec::new()),
            ShapeKind::Vector(elem, n) => Self::Vector(vec![Self::default_for(elem); *n]),
            ShapeKind::List(..) => Self::List(Vec::new()),
            ShapeKind::Container(fields) => {
                Self::Container(fields.iter().map(|f| Self::default_for(&f.shape)).collect())
            }
        }
    }

    fn mismatch(&self, expected: &'static str) -> DecodeError {
        DecodeError::ValueMismatch {
            expected,
            got: self.kind_name(),
        }
    }

    pub fn into_bool(self) -> Result<bool, DecodeError> {
        match self {
            Self::Bool(b) => Ok(b),
            other => Err(other.mismatch("bool")),
        }
    }

    pub fn into_u8(self) -> Result<u8, DecodeError> {
        match self {
            Self::U8(n) => Ok(n),
            other => Err(other.mismatch("uint8")),
        }
    }

    pub fn into_u16(self) -> Result<u16, DecodeError> {
        match self {
            Self::U16(n) => Ok(n),
            other => Err(other.mismatch("uint16")),
        }
    }

    pub fn into_u32(self) -> Result<u32, DecodeError> {
        match self {
            Self::U32(n) => Ok(n),
            other => Err(other.mismatch("uint32")),
        }
    }

    pub fn into_u64(self) -> Result<u64, DecodeError> {
        match self {
            Self::U64(n) => Ok(n),
            other => Err(other.mismatch("uint64")),
        }
    }

    pub fn into_bytes(self) -> Result<Vec<u8>, DecodeError> {
        match self {
            Self::Bytes(b) => Ok(b),
            other => Err(other.mismatch("bytes")),
        }
    }

    /// Bytes of a known width, as decoded from a byte vector.
    pub fn into_byte_array<const N: usize>(self) -> Result<[u8; N], DecodeError> {
        let bytes = self.into_bytes()?;
        let got = bytes.len();
        bytes
            .try_into()
            .map_err(|_| DecodeError::LengthMismatch { expected: N, got })
    }

    pub fn into_bits(self) -> Result<Vec<bool>, DecodeError> {
        match self {
            Self::Bits(b) => Ok(b),
            other => Err(other.mismatch("bits")),
        }
    }

    /// Elements of a vector or a list.
    pub fn into_items(self) -> Result<Vec<Value>, DecodeError> {
        match self {
            Self::Vector(items) | Self::List(items) => Ok(items),
            other => Err(other.mismatch("vector or list")),
        }
    }

    /// Exactly `N` container fields, in declaration order.
    pub fn into_fields<const N: usize>(self) -> Result<[Value; N], DecodeError> {
        match self {
            Self::Container(fields) => {
                let got = fields.len();
                fields
                    .try_into()
                    .map_err(|_| DecodeError::LengthMismatch { expected: N, got })
            }
            other => Err(other.mismatch("container")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::U64(n)
    }
}
