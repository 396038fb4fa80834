//! Error types for the SSZ core.

use thiserror::Error;

use crate::gindex::Gindex;

/// Errors raised while constructing a [`Shape`](crate::Shape).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("list limit must be non-zero")]
    ZeroLimit,

    #[error("fixed length must be non-zero")]
    ZeroLength,

    #[error("container must have at least one field")]
    EmptyContainer,

    #[error("limit {0} needs a deeper tree than a 64-bit gindex can address")]
    LimitTooLarge(u64),
}

/// Structural decode errors. Input is never silently truncated or padded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated input: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("length mismatch: expected {expected} bytes, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("first offset {got} does not match head size {expected}")]
    FirstOffsetMismatch { expected: usize, got: usize },

    #[error("offset {offset} is lower than previous offset {previous}")]
    OffsetDecreasing { previous: usize, offset: usize },

    #[error("offset {offset} is beyond input length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("byte length {len} is not a multiple of element size {stride}")]
    StrideMismatch { len: usize, stride: usize },

    #[error("element count {count} exceeds limit {limit}")]
    TooManyElements { count: u64, limit: u64 },

    #[error("bitlist is missing its delimiter bit")]
    MissingDelimiter,

    #[error("bitvector has non-zero padding bits")]
    NonZeroPadding,

    #[error("invalid boolean byte: {0:#04x}")]
    InvalidBool(u8),

    #[error("value mismatch: expected {expected}, got {got}")]
    ValueMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("invalid shape: {0}")]
    Shape(#[from] ShapeError),
}

/// Errors raised while encoding or Merkleizing a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SszError {
    #[error("{len} elements exceed capacity {limit}")]
    Capacity { len: u64, limit: u64 },

    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("value mismatch: expected {expected}, got {got}")]
    ValueMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("offset {0} does not fit in 4 bytes")]
    OffsetOverflow(usize),

    #[error("invalid shape: {0}")]
    Shape(#[from] ShapeError),
}

/// Errors raised by gindex arithmetic and proof construction.
///
/// A branch that is well-formed but does not reproduce the root is not an
/// error: [`verify_branch`](crate::verify_branch) returns `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    #[error("generalized index must be positive")]
    ZeroGindex,

    #[error("index {index} out of range for depth {depth}")]
    IndexOutOfRange { index: u64, depth: u32 },

    #[error("generalized index would need depth {depth}, beyond 63")]
    GindexOverflow { depth: u32 },

    #[error("gindex {0} does not address a node of this value")]
    Unreachable(Gindex),

    #[error("branch length {got} does not match gindex depth {expected}")]
    BranchLength { expected: usize, got: usize },

    #[error("outer branch does not prove the subtree root at gindex {0}")]
    SubtreeMismatch(Gindex),

    #[error("merkleization failed: {0}")]
    Ssz(#[from] SszError),

    #[error("invalid shape: {0}")]
    Shape(#[from] ShapeError),
}
