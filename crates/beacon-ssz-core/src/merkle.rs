//! Merkleization.
//!
//! Every value reduces to a list of 32-byte leaves and a leaf capacity. The
//! leaves are folded pairwise into a perfect binary tree of
//! `2^cover_depth(capacity)` slots; slots past the last leaf are filled with
//! the roots of all-zero subtrees, which are never materialized. Lists and
//! bitlists then mix in their element count.

use crate::codec::{bits_to_bytes, encode_basic};
use crate::crypto::{zero_hashes, HashFn};
use crate::error::SszError;
use crate::gindex::cover_depth;
use crate::shape::{Shape, ShapeKind};
use crate::types::{Chunk, Root};
use crate::value::Value;

/// Bytes per Merkleization chunk.
pub const BYTES_PER_CHUNK: usize = 32;

/// Split bytes into chunks, zero-padding the last one.
pub fn pack(bytes: &[u8]) -> Vec<Chunk> {
    bytes
        .chunks(BYTES_PER_CHUNK)
        .map(|part| {
            let mut chunk = [0u8; BYTES_PER_CHUNK];
            chunk[..part.len()].copy_from_slice(part);
            Root(chunk)
        })
        .collect()
}

/// Pack bits LSB first, without a delimiter.
pub fn pack_bits(bits: &[bool]) -> Vec<Chunk> {
    pack(&bits_to_bytes(bits, false))
}

/// Root of a tree over `chunks` with room for `limit` leaves.
///
/// Without a limit the tree is just wide enough for the chunks given.
pub fn merkleize<H: HashFn + ?Sized>(
    h: &H,
    chunks: &[Chunk],
    limit: Option<u64>,
) -> Result<Root, SszError> {
    let count = chunks.len() as u64;
    let limit = match limit {
        Some(limit) if count > limit => return Err(SszError::Capacity { len: count, limit }),
        Some(limit) => limit,
        None => count,
    };
    let depth = cover_depth(limit);
    let zeros = zero_hashes(h, depth);
    Ok(fold(h, chunks.to_vec(), &zeros))
}

/// `hash(root, le64(length) ‖ zeros)`.
pub fn mix_in_length<H: HashFn + ?Sized>(h: &H, root: &Root, length: u64) -> Root {
    h.hash_pair(root, &length_root(length))
}

/// The chunk holding a list length.
pub fn length_root(length: u64) -> Root {
    Root::from_u64(length)
}

/// The hash-tree-root of a value.
pub fn hash_tree_root<H: HashFn + ?Sized>(
    h: &H,
    shape: &Shape,
    value: &Value,
) -> Result<Root, SszError> {
    Layout::of(shape, value)?.root(h)
}

/// Fold a layer up `zeros.len() - 1` levels. `zeros[i]` stands in for a
/// missing node `i` levels above the leaves.
pub(crate) fn fold<H: HashFn + ?Sized>(h: &H, mut layer: Vec<Root>, zeros: &[Root]) -> Root {
    let depth = zeros.len() - 1;
    if layer.is_empty() {
        return zeros[depth];
    }
    for zero in &zeros[..depth] {
        if layer.len() % 2 == 1 {
            layer.push(*zero);
        }
        layer = layer
            .chunks_exact(2)
            .map(|pair| h.hash_pair(&pair[0], &pair[1]))
            .collect();
    }
    layer[0]
}

/// Root of the subtree `height` levels tall whose leftmost leaf is
/// `position << height`.
pub(crate) fn subtree_root<H: HashFn + ?Sized>(
    h: &H,
    leaves: &[Root],
    height: u32,
    position: u64,
) -> Root {
    let zeros = zero_hashes(h, height);
    let start = (position << height) as usize;
    let end = start.saturating_add(1usize << height).min(leaves.len());
    let slice = leaves.get(start..end).unwrap_or(&[]);
    fold(h, slice.to_vec(), &zeros)
}

/// Leaves of a value's data tree.
pub(crate) enum Leaves<'a> {
    /// Packed bytes; a proof cannot descend below these.
    Packed(Vec<Chunk>),
    /// One subtree per element or field.
    Composite(Vec<(&'a Shape, &'a Value)>),
}

/// How a value maps onto its tree, checked against its shape.
pub(crate) struct Layout<'a> {
    pub leaves: Leaves<'a>,
    /// Leaf capacity of the data tree.
    pub limit: u64,
    /// Element count to mix in, for lists.
    pub length: Option<u64>,
}

impl<'a> Layout<'a> {
    pub fn of(shape: &'a Shape, value: &'a Value) -> Result<Self, SszError> {
        let limit = shape.chunk_limit();
        let (leaves, length) = match (shape.kind(), value) {
            (ShapeKind::Basic(kind), value) => {
                let mut bytes = Vec::with_capacity(kind.size());
                encode_basic(*kind, value, &mut bytes)?;
                (Leaves::Packed(pack(&bytes)), None)
            }
            (ShapeKind::ByteVector(n), Value::Bytes(bytes)) => {
                expect_len(bytes.len(), *n)?;
                (Leaves::Packed(pack(bytes)), None)
            }
            (ShapeKind::ByteList(max), Value::Bytes(bytes)) => {
                expect_capacity(bytes.len(), *max)?;
                (Leaves::Packed(pack(bytes)), Some(bytes.len() as u64))
            }
            (ShapeKind::Bitvector(n), Value::Bits(bits)) => {
                expect_len(bits.len(), *n)?;
                (Leaves::Packed(pack_bits(bits)), None)
            }
            (ShapeKind::Bitlist(max), Value::Bits(bits)) => {
                expect_capacity(bits.len(), *max)?;
                (Leaves::Packed(pack_bits(bits)), Some(bits.len() as u64))
            }
            (ShapeKind::Vector(elem, n), Value::Vector(items)) => {
                expect_len(items.len(), *n)?;
                (sequence_leaves(elem, items)?, None)
            }
            (ShapeKind::List(elem, max), Value::List(items)) => {
                expect_capacity(items.len(), *max)?;
                (sequence_leaves(elem, items)?, Some(items.len() as u64))
            }
            (ShapeKind::Container(fields), Value::Container(values)) => {
                expect_len(values.len(), fields.len())?;
                let children = fields.iter().map(|f| &f.shape).zip(values).collect();
                (Leaves::Composite(children), None)
            }
            (_, value) => {
                return Err(SszError::ValueMismatch {
                    expected: shape.name(),
                    got: value.kind_name(),
                })
            }
        };
        Ok(Self {
            leaves,
            limit,
            length,
        })
    }

    /// Depth of the data tree.
    pub fn depth(&self) -> u32 {
        cover_depth(self.limit)
    }

    /// Roots of the leaves actually present.
    pub fn leaf_roots<H: HashFn + ?Sized>(&self, h: &H) -> Result<Vec<Root>, SszError> {
        match &self.leaves {
            Leaves::Packed(chunks) => Ok(chunks.clone()),
            Leaves::Composite(children) => children
                .iter()
                .map(|(shape, value)| hash_tree_root(h, shape, value))
                .collect(),
        }
    }

    /// Root of the data tree, before any length mix-in.
    pub fn data_root<H: HashFn + ?Sized>(&self, h: &H) -> Result<Root, SszError> {
        merkleize(h, &self.leaf_roots(h)?, Some(self.limit))
    }

    pub fn root<H: HashFn + ?Sized>(&self, h: &H) -> Result<Root, SszError> {
        let data = self.data_root(h)?;
        Ok(match self.length {
            Some(length) => mix_in_length(h, &data, length),
            None => data,
        })
    }
}

fn sequence_leaves<'a>(elem: &'a Shape, items: &'a [Value]) -> Result<Leaves<'a>, SszError> {
    match elem.kind() {
        ShapeKind::Basic(kind) => {
            let mut bytes = Vec::with_capacity(items.len() * kind.size());
            for item in items {
                encode_basic(*kind, item, &mut bytes)?;
            }
            Ok(Leaves::Packed(pack(&bytes)))
        }
        _ => Ok(Leaves::Composite(items.iter().map(|item| (elem, item)).collect())),
    }
}

fn expect_len(got: usize, expected: usize) -> Result<(), SszError> {
    if got != expected {
        return Err(SszError::LengthMismatch { expected, got });
    }
    Ok(())
}

fn expect_capacity(len: usize, limit: u64) -> Result<(), SszError> {
    if len as u64 > limit {
        return Err(SszError::Capacity {
            len: len as u64,
            limit,
        });
    }
    Ok(())
}
