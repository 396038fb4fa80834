//! Generalized-index proofs.
//!
//! A branch lists the sibling roots met on the way from a node up to the
//! root, bottom-up. Its length always equals the depth of the node's gindex.
//!
//! Proofs descend through containers, vectors and lists. Below a list the
//! gindex space starts with `2` for the data tree and `3` for the length
//! chunk. Nodes made entirely of zero padding past a value's actual leaves,
//! and nodes inside a packed chunk, cannot be proven.

use crate::crypto::HashFn;
use crate::error::ProofError;
use crate::gindex::Gindex;
use crate::merkle::{hash_tree_root, length_root, subtree_root, Layout, Leaves};
use crate::shape::Shape;
use crate::types::Root;
use crate::value::Value;

/// Branch proving the node at `gindex` against the value's root.
pub fn prove<H: HashFn + ?Sized>(
    h: &H,
    shape: &Shape,
    value: &Value,
    gindex: Gindex,
) -> Result<Vec<Root>, ProofError> {
    prove_value(h, shape, value, gindex).map_err(|e| match e {
        ProofError::Unreachable(_) => ProofError::Unreachable(gindex),
        other => other,
    })
}

/// Root of the node at `gindex`.
pub fn node_root<H: HashFn + ?Sized>(
    h: &H,
    shape: &Shape,
    value: &Value,
    gindex: Gindex,
) -> Result<Root, ProofError> {
    node_in_value(h, shape, value, gindex).map_err(|e| match e {
        ProofError::Unreachable(_) => ProofError::Unreachable(gindex),
        other => other,
    })
}

fn prove_value<H: HashFn + ?Sized>(
    h: &H,
    shape: &Shape,
    value: &Value,
    gindex: Gindex,
) -> Result<Vec<Root>, ProofError> {
    if gindex == Gindex::ROOT {
        return Ok(Vec::new());
    }
    let layout = Layout::of(shape, value)?;
    let Some(length) = layout.length else {
        return prove_in_layout(h, &layout, gindex);
    };
    let (top, rest) = gindex.split_at(1);
    if top.get() == 3 {
        if rest != Gindex::ROOT {
            return Err(ProofError::Unreachable(gindex));
        }
        return Ok(vec![layout.data_root(h)?]);
    }
    let mut branch = prove_in_layout(h, &layout, rest)?;
    branch.push(length_root(length));
    Ok(branch)
}

fn prove_in_layout<H: HashFn + ?Sized>(
    h: &H,
    layout: &Layout<'_>,
    gindex: Gindex,
) -> Result<Vec<Root>, ProofError> {
    let leaves = layout.leaf_roots(h)?;
    branch_in_tree(h, &leaves, layout.depth(), gindex, |index, below| {
        match &layout.leaves {
            Leaves::Composite(children) => {
                let (shape, value) = children
                    .get(index)
                    .ok_or(ProofError::Unreachable(below))?;
                prove_value(h, shape, value, below)
            }
            Leaves::Packed(_) => Err(ProofError::Unreachable(below)),
        }
    })
}

/// Branch for `gindex` in a tree of `2^depth` slots over `leaves`.
///
/// Targets below leaf level are handed to `descend` with the leaf index and
/// the gindex relative to that leaf; its branch is extended with the
/// siblings above the leaf. Types whose tree is not a plain shape (like a
/// block body carrying some fields as roots) build their proofs with this.
pub fn branch_in_tree<H, F>(
    h: &H,
    leaves: &[Root],
    depth: u32,
    gindex: Gindex,
    descend: F,
) -> Result<Vec<Root>, ProofError>
where
    H: HashFn + ?Sized,
    F: FnOnce(usize, Gindex) -> Result<Vec<Root>, ProofError>,
{
    if gindex == Gindex::ROOT {
        return Ok(Vec::new());
    }
    let level = gindex.depth().min(depth);
    let (node, below) = gindex.split_at(level);
    let first_leaf = node.position() << (depth - level);
    if first_leaf >= leaves.len() as u64 {
        return Err(ProofError::Unreachable(gindex));
    }

    let mut branch = if below == Gindex::ROOT {
        Vec::new()
    } else {
        descend(first_leaf as usize, below)?
    };

    // sibling subtrees are disjoint: each leaf is folded at most once
    for height in depth - level..depth {
        let position = first_leaf >> height;
        branch.push(subtree_root(h, leaves, height, position ^ 1));
    }
    Ok(branch)
}

/// Root of the node at `gindex` in a tree of `2^depth` slots over `leaves`.
/// `descend` resolves nodes below leaf level.
pub fn node_in_tree<H, F>(
    h: &H,
    leaves: &[Root],
    depth: u32,
    gindex: Gindex,
    descend: F,
) -> Result<Root, ProofError>
where
    H: HashFn + ?Sized,
    F: FnOnce(usize, Gindex) -> Result<Root, ProofError>,
{
    let level = gindex.depth().min(depth);
    let (node, below) = gindex.split_at(level);
    let first_leaf = node.position() << (depth - level);
    if first_leaf >= leaves.len() as u64 && gindex != Gindex::ROOT {
        return Err(ProofError::Unreachable(gindex));
    }
    if below != Gindex::ROOT {
        return descend(first_leaf as usize, below);
    }
    Ok(subtree_root(h, leaves, depth - level, node.position()))
}

fn node_in_value<H: HashFn + ?Sized>(
    h: &H,
    shape: &Shape,
    value: &Value,
    gindex: Gindex,
) -> Result<Root, ProofError> {
    if gindex == Gindex::ROOT {
        return Ok(hash_tree_root(h, shape, value)?);
    }
    let layout = Layout::of(shape, value)?;
    let data_gindex = match layout.length {
        None => gindex,
        Some(length) => {
            let (top, rest) = gindex.split_at(1);
            if top.get() == 3 {
                if rest != Gindex::ROOT {
                    return Err(ProofError::Unreachable(gindex));
                }
                return Ok(length_root(length));
            }
            if rest == Gindex::ROOT {
                return Ok(layout.data_root(h)?);
            }
            rest
        }
    };
    let leaves = layout.leaf_roots(h)?;
    node_in_tree(h, &leaves, layout.depth(), data_gindex, |index, below| {
        match &layout.leaves {
            Leaves::Composite(children) => {
                let (shape, value) = children
                    .get(index)
                    .ok_or(ProofError::Unreachable(below))?;
                node_in_value(h, shape, value, below)
            }
            Leaves::Packed(_) => Err(ProofError::Unreachable(below)),
        }
    })
}

/// Recompute the root from a leaf and its branch.
pub fn compute_root<H: HashFn + ?Sized>(
    h: &H,
    branch: &[Root],
    gindex: Gindex,
    leaf: &Root,
) -> Result<Root, ProofError> {
    let depth = gindex.depth() as usize;
    if branch.len() != depth {
        return Err(ProofError::BranchLength {
            expected: depth,
            got: branch.len(),
        });
    }
    let mut node = *leaf;
    let mut index = gindex.get();
    for sibling in branch {
        node = if index & 1 == 1 {
            h.hash_pair(sibling, &node)
        } else {
            h.hash_pair(&node, sibling)
        };
        index >>= 1;
    }
    Ok(node)
}

/// Check that `branch` proves `leaf` at `gindex` under `root`.
///
/// A branch of the wrong length is an error; a well-formed branch that does
/// not reproduce the root is `Ok(false)`.
pub fn verify_branch<H: HashFn + ?Sized>(
    h: &H,
    branch: &[Root],
    gindex: Gindex,
    root: &Root,
    leaf: &Root,
) -> Result<bool, ProofError> {
    Ok(compute_root(h, branch, gindex, leaf)? == *root)
}

/// Join an inner branch (target up to a subtree root) with an outer branch
/// (subtree root up to the full root).
pub fn compose_branches(inner: &[Root], outer: &[Root]) -> Vec<Root> {
    let mut out = Vec::with_capacity(inner.len() + outer.len());
    out.extend_from_slice(inner);
    out.extend_from_slice(outer);
    out
}

/// Compose proofs from two trees after checking that the outer branch
/// really places `subtree_root` at `outer_gindex` under `root`.
///
/// Returns the combined gindex and branch.
pub fn compose_checked<H: HashFn + ?Sized>(
    h: &H,
    (inner, inner_gindex): (&[Root], Gindex),
    subtree_root: &Root,
    (outer, outer_gindex): (&[Root], Gindex),
    root: &Root,
) -> Result<(Gindex, Vec<Root>), ProofError> {
    if !verify_branch(h, outer, outer_gindex, root, subtree_root)? {
        return Err(ProofError::SubtreeMismatch(outer_gindex));
    }
    if inner.len() != inner_gindex.depth() as usize {
        return Err(ProofError::BranchLength {
            expected: inner_gindex.depth() as usize,
            got: inner.len(),
        });
    }
    let gindex = outer_gindex.concat(inner_gindex)?;
    Ok((gindex, compose_branches(inner, outer)))
}
