//! The hash primitive consumed by Merkleization.
//!
//! The core never picks a hash function itself: every root and proof
//! computation takes a [`HashFn`]. [`Sha256Hasher`] is the consensus default.

use sha2::{Digest, Sha256};

use crate::types::Root;

/// A stateless hash primitive, safe to call from many threads at once.
pub trait HashFn: Send + Sync {
    /// Hash arbitrary bytes to a root.
    fn hash(&self, data: &[u8]) -> Root;

    /// Hash two tree nodes into their parent.
    fn hash_pair(&self, left: &Root, right: &Root) -> Root {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(&left.0);
        buf[32..].copy_from_slice(&right.0);
        self.hash(&buf)
    }
}

/// SHA-256, the hash used by the consensus layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl HashFn for Sha256Hasher {
    fn hash(&self, data: &[u8]) -> Root {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Root(hasher.finalize().into())
    }

    fn hash_pair(&self, left: &Root, right: &Root) -> Root {
        let mut hasher = Sha256::new();
        hasher.update(left.0);
        hasher.update(right.0);
        Root(hasher.finalize().into())
    }
}

/// Roots of all-zero subtrees: entry `i` is the root of a depth-`i` subtree.
///
/// Returns `depth + 1` entries.
pub fn zero_hashes<H: HashFn + ?Sized>(h: &H, depth: u32) -> Vec<Root> {
    let mut out = Vec::with_capacity(depth as usize + 1);
    out.push(Root::ZERO);
    for i in 0..depth as usize {
        let next = h.hash_pair(&out[i], &out[i]);
        out.push(next);
    }
    out
}
