//! Generalized indices.
//!
//! A gindex addresses a node of a conceptually infinite binary tree: the root
//! is 1, the children of `i` are `2i` and `2i + 1`, and the depth of `i` is
//! `floor(log2(i))`. The bits below the leading one spell the path from the
//! root, most significant first, `0` meaning left.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProofError;

/// Deepest level a 64-bit gindex can address.
pub const MAX_DEPTH: u32 = 63;

/// A generalized index. Always positive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Gindex(u64);

impl Gindex {
    /// The root of any tree.
    pub const ROOT: Self = Self(1);

    /// Create a gindex, rejecting zero.
    pub fn new(value: u64) -> Result<Self, ProofError> {
        if value == 0 {
            return Err(ProofError::ZeroGindex);
        }
        Ok(Self(value))
    }

    /// The raw integer.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Depth below the root: `floor(log2(self))`.
    pub const fn depth(self) -> u32 {
        MAX_DEPTH - self.0.leading_zeros()
    }

    /// Position of this node among the nodes of its depth.
    pub const fn position(self) -> u64 {
        self.0 - (1u64 << self.depth())
    }

    /// Whether this node is a left child. The root is not.
    pub const fn is_left(self) -> bool {
        self.0 > 1 && self.0 & 1 == 0
    }

    /// The parent node, `None` for the root.
    pub const fn parent(self) -> Option<Self> {
        if self.0 == 1 {
            None
        } else {
            Some(Self(self.0 >> 1))
        }
    }

    /// The other child of this node's parent, `None` for the root.
    pub const fn sibling(self) -> Option<Self> {
        if self.0 == 1 {
            None
        } else {
            Some(Self(self.0 ^ 1))
        }
    }

    /// Left child.
    pub fn left(self) -> Result<Self, ProofError> {
        self.child(0)
    }

    /// Right child.
    pub fn right(self) -> Result<Self, ProofError> {
        self.child(1)
    }

    fn child(self, bit: u64) -> Result<Self, ProofError> {
        if self.depth() >= MAX_DEPTH {
            return Err(ProofError::GindexOverflow {
                depth: self.depth() + 1,
            });
        }
        Ok(Self((self.0 << 1) | bit))
    }

    /// Address `inner` (relative to the subtree rooted at `self`) in the
    /// outer tree's index space.
    pub fn concat(self, inner: Gindex) -> Result<Self, ProofError> {
        let depth = self.depth() + inner.depth();
        if depth > MAX_DEPTH {
            return Err(ProofError::GindexOverflow { depth });
        }
        let d = inner.depth();
        Ok(Self((self.0 << d) | inner.position()))
    }

    /// Split into the ancestor `levels` steps below the root and the
    /// remaining path relative to that ancestor.
    ///
    /// `levels` must not exceed `self.depth()`.
    pub(crate) fn split_at(self, levels: u32) -> (Gindex, Gindex) {
        debug_assert!(levels <= self.depth());
        let rest = self.depth() - levels;
        let top = Self(self.0 >> rest);
        let mask = (1u64 << rest) - 1;
        (top, Self((1u64 << rest) | (self.0 & mask)))
    }
}

impl fmt::Debug for Gindex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gindex({})", self.0)
    }
}

impl fmt::Display for Gindex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for Gindex {
    type Error = ProofError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Gindex> for u64 {
    fn from(g: Gindex) -> Self {
        g.0
    }
}

/// Smallest depth `d` with `2^d >= n`. Zero and one leaf both need depth 0.
pub fn cover_depth(n: u64) -> u32 {
    if n <= 1 {
        0
    } else {
        64 - (n - 1).leading_zeros()
    }
}

/// Gindex of slot `index` at `depth`: `2^depth + index`.
pub fn to_gindex(index: u64, depth: u32) -> Result<Gindex, ProofError> {
    if depth > MAX_DEPTH {
        return Err(ProofError::GindexOverflow { depth });
    }
    let width = 1u64 << depth;
    if index >= width {
        return Err(ProofError::IndexOutOfRange { index, depth });
    }
    Ok(Gindex(width | index))
}
