//! Block body summary.
//!
//! Inclusion proofs only need the body's field roots, plus the commitment
//! list itself for the path into it. The summary carries every other field
//! as its hash-tree-root, so its root equals the full body's root.

use serde::{Deserialize, Serialize};

use beacon_ssz_core::merkle;
use beacon_ssz_core::proof::branch_in_tree;
use beacon_ssz_core::{Gindex, HashFn, Merkleized, ProofError, Root, SszError, SszType};

use crate::kzg::KzgCommitments;
use crate::spec::Spec;

/// Fields in a Deneb block body.
pub const BODY_FIELD_COUNT: u64 = 12;

/// Index of `blob_kzg_commitments` among the body fields.
pub const BLOB_KZG_COMMITMENTS_FIELD: u64 = 11;

/// Depth of the body's field tree: `cover_depth(BODY_FIELD_COUNT)`.
pub const BODY_TREE_DEPTH: u32 = 4;

/// A Deneb block body with all but the commitments reduced to roots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BeaconBlockBody {
    pub randao_reveal: Root,
    pub eth1_data: Root,
    pub graffiti: Root,
    pub proposer_slashings: Root,
    pub attester_slashings: Root,
    pub attestations: Root,
    pub deposits: Root,
    pub voluntary_exits: Root,
    pub sync_aggregate: Root,
    pub execution_payload: Root,
    pub bls_to_execution_changes: Root,
    pub blob_kzg_commitments: KzgCommitments,
}

impl BeaconBlockBody {
    /// The body's tree under `spec`.
    pub fn tree<'a>(&'a self, spec: &'a Spec) -> BlockBodyTree<'a> {
        BlockBodyTree { body: self, spec }
    }
}

/// A [`BeaconBlockBody`] bound to the preset that sizes its commitment list.
#[derive(Debug, Clone, Copy)]
pub struct BlockBodyTree<'a> {
    body: &'a BeaconBlockBody,
    spec: &'a Spec,
}

impl BlockBodyTree<'_> {
    fn leaves<H: HashFn + ?Sized>(&self, h: &H) -> Result<Vec<Root>, SszError> {
        let b = self.body;
        Ok(vec![
            b.randao_reveal,
            b.eth1_data,
            b.graffiti,
            b.proposer_slashings,
            b.attester_slashings,
            b.attestations,
            b.deposits,
            b.voluntary_exits,
            b.sync_aggregate,
            b.execution_payload,
            b.bls_to_execution_changes,
            b.blob_kzg_commitments.hash_tree_root(h, self.spec)?,
        ])
    }
}

impl Merkleized for BlockBodyTree<'_> {
    fn hash_tree_root<H: HashFn + ?Sized>(&self, h: &H) -> Result<Root, SszError> {
        merkle::merkleize(h, &self.leaves(h)?, Some(BODY_FIELD_COUNT))
    }

    /// Proofs reach any field root; only the commitment list can be
    /// descended into.
    fn hash_tree_proof<H: HashFn + ?Sized>(
        &self,
        h: &H,
        gindex: Gindex,
    ) -> Result<Vec<Root>, ProofError> {
        let leaves = self.leaves(h)?;
        branch_in_tree(h, &leaves, BODY_TREE_DEPTH, gindex, |index, below| {
            if index as u64 == BLOB_KZG_COMMITMENTS_FIELD {
                self.body
                    .blob_kzg_commitments
                    .hash_tree_proof(h, self.spec, below)
            } else {
                Err(ProofError::Unreachable(gindex))
            }
        })
    }
}
