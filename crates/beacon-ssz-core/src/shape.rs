//! Type shape descriptors.
//!
//! A [`Shape`] drives both the codec and the Merkleizer. Shapes are only
//! built through the validating constructors, so a shape in hand is always
//! well formed: no zero limits, no zero-length vectors, no empty containers.

use crate::error::ShapeError;
use crate::gindex::{cover_depth, MAX_DEPTH};
use crate::merkle::BYTES_PER_CHUNK;

/// Bytes occupied by one offset in the head of a variable-size encoding.
pub const OFFSET_LEN: usize = 4;

/// Bits packed into one chunk.
const BITS_PER_CHUNK: u128 = 256;

/// Basic (scalar) kinds, all little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
}

impl BasicKind {
    /// Encoded size in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::Bool | Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
            Self::U128 => 16,
            Self::U256 => 32,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::U128 => "uint128",
            Self::U256 => "uint256",
        }
    }
}

/// A named container field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub shape: Shape,
}

impl Field {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

/// The structure of a shape, for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeKind {
    Basic(BasicKind),
    ByteVector(usize),
    ByteList(u64),
    Bitvector(usize),
    Bitlist(u64),
    Vector(Box<Shape>, usize),
    List(Box<Shape>, u64),
    Container(Vec<Field>),
}

/// A validated type shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape(ShapeKind);

impl Shape {
    /// A scalar.
    pub fn basic(kind: BasicKind) -> Self {
        Self(ShapeKind::Basic(kind))
    }

    pub fn uint64() -> Self {
        Self::basic(BasicKind::U64)
    }

    /// A 32-byte vector, the shape of a [`Root`](crate::Root).
    pub fn bytes32() -> Self {
        Self(ShapeKind::ByteVector(32))
    }

    /// Exactly `len` bytes.
    pub fn byte_vector(len: usize) -> Result<Self, ShapeError> {
        if len == 0 {
            return Err(ShapeError::ZeroLength);
        }
        Self::checked(ShapeKind::ByteVector(len))
    }

    /// Up to `max_len` bytes.
    pub fn byte_list(max_len: u64) -> Result<Self, ShapeError> {
        if max_len == 0 {
            return Err(ShapeError::ZeroLimit);
        }
        Self::checked(ShapeKind::ByteList(max_len))
    }

    /// Exactly `len` bits.
    pub fn bitvector(len: usize) -> Result<Self, ShapeError> {
        if len == 0 {
            return Err(ShapeError::ZeroLength);
        }
        Self::checked(ShapeKind::Bitvector(len))
    }

    /// Up to `max_len` bits.
    pub fn bitlist(max_len: u64) -> Result<Self, ShapeError> {
        if max_len == 0 {
            return Err(ShapeError::ZeroLimit);
        }
        Self::checked(ShapeKind::Bitlist(max_len))
    }

    /// Exactly `len` elements of `elem`.
    pub fn vector(elem: Shape, len: usize) -> Result<Self, ShapeError> {
        if len == 0 {
            return Err(ShapeError::ZeroLength);
        }
        if let Some(size) = elem.fixed_len() {
            if size.checked_mul(len).is_none() {
                return Err(ShapeError::LimitTooLarge(len as u64));
            }
        }
        Self::checked(ShapeKind::Vector(Box::new(elem), len))
    }

    /// Up to `max_len` elements of `elem`.
    pub fn list(elem: Shape, max_len: u64) -> Result<Self, ShapeError> {
        if max_len == 0 {
            return Err(ShapeError::ZeroLimit);
        }
        Self::checked(ShapeKind::List(Box::new(elem), max_len))
    }

    /// An ordered record of fields.
    pub fn container(fields: Vec<Field>) -> Result<Self, ShapeError> {
        if fields.is_empty() {
            return Err(ShapeError::EmptyContainer);
        }
        Self::checked(ShapeKind::Container(fields))
    }

    /// Reject limits whose chunk tree (plus a length mix-in) would not be
    /// addressable by a 64-bit gindex.
    fn checked(kind: ShapeKind) -> Result<Self, ShapeError> {
        let limit = chunk_limit_of(&kind);
        if limit > 1u128 << (MAX_DEPTH - 1) {
            let declared = match &kind {
                ShapeKind::ByteVector(n) | ShapeKind::Bitvector(n) | ShapeKind::Vector(_, n) => {
                    *n as u64
                }
                ShapeKind::ByteList(n) | ShapeKind::Bitlist(n) | ShapeKind::List(_, n) => *n,
                _ => u64::MAX,
            };
            return Err(ShapeError::LimitTooLarge(declared));
        }
        Ok(Self(kind))
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.0
    }

    /// Short name used in mismatch errors.
    pub fn name(&self) -> &'static str {
        match &self.0 {
            ShapeKind::Basic(kind) => kind.name(),
            ShapeKind::ByteVector(_) => "byte vector",
            ShapeKind::ByteList(_) => "byte list",
            ShapeKind::Bitvector(_) => "bitvector",
            ShapeKind::Bitlist(_) => "bitlist",
            ShapeKind::Vector(..) => "vector",
            ShapeKind::List(..) => "list",
            ShapeKind::Container(_) => "container",
        }
    }

    /// Encoded size when constant, `None` for variable-size shapes.
    pub fn fixed_len(&self) -> Option<usize> {
        match &self.0 {
            ShapeKind::Basic(kind) => Some(kind.size()),
            ShapeKind::ByteVector(n) => Some(*n),
            ShapeKind::Bitvector(n) => Some(n.div_ceil(8)),
            ShapeKind::Vector(elem, n) => elem.fixed_len().map(|size| size * n),
            ShapeKind::Container(fields) => fields.iter().map(|f| f.shape.fixed_len()).sum(),
            ShapeKind::ByteList(_) | ShapeKind::Bitlist(_) | ShapeKind::List(..) => None,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed_len().is_some()
    }

    pub fn is_basic(&self) -> bool {
        matches!(self.0, ShapeKind::Basic(_))
    }

    /// Bytes this shape occupies in an enclosing head: its own size when
    /// fixed, an offset otherwise.
    pub fn head_len(&self) -> usize {
        self.fixed_len().unwrap_or(OFFSET_LEN)
    }

    /// Number of leaf slots of the data tree. Depends only on the shape,
    /// never on a value's actual length.
    pub fn chunk_limit(&self) -> u64 {
        // bounded by `checked`
        chunk_limit_of(&self.0) as u64
    }

    /// Whether the root mixes in the element count.
    pub fn has_length_mixin(&self) -> bool {
        matches!(
            self.0,
            ShapeKind::ByteList(_) | ShapeKind::Bitlist(_) | ShapeKind::List(..)
        )
    }

    /// Depth of this shape's own tree: the data tree plus one level for a
    /// length mix-in.
    pub fn tree_depth(&self) -> u32 {
        cover_depth(self.chunk_limit()) + u32::from(self.has_length_mixin())
    }
}

fn chunk_limit_of(kind: &ShapeKind) -> u128 {
    let chunk = BYTES_PER_CHUNK as u128;
    let packed = |elem: &Shape, n: u128| match elem.kind() {
        ShapeKind::Basic(k) => (n * k.size() as u128).div_ceil(chunk),
        _ => n,
    };
    match kind {
        ShapeKind::Basic(_) => 1,
        ShapeKind::ByteVector(n) => (*n as u128).div_ceil(chunk),
        ShapeKind::ByteList(n) => u128::from(*n).div_ceil(chunk),
        ShapeKind::Bitvector(n) => (*n as u128).div_ceil(BITS_PER_CHUNK),
        ShapeKind::Bitlist(n) => u128::from(*n).div_ceil(BITS_PER_CHUNK),
        ShapeKind::Vector(elem, n) => packed(elem, *n as u128),
        ShapeKind::List(elem, n) => packed(elem, u128::from(*n)),
        ShapeKind::Container(fields) => fields.len() as u128,
    }
}
