//! Blob sidecars and commitment inclusion proofs.
//!
//! A sidecar ships one blob apart from its block. It carries the signed
//! header and a branch proving its commitment against the header's
//! `body_root`. That branch is composed from two trees: the commitment list
//! (element up to list root, then the length mix-in) and the body (field 11
//! up to the body root).

use serde::{Deserialize, Serialize};

use beacon_ssz_core::{
    compose_checked, cover_depth, to_gindex, verify_branch, DecodeError, Field, Gindex, HashFn,
    Merkleized, ProofError, Root, Shape, ShapeError, SszType, Value,
};

use crate::blob::{Blob, BlobIndex};
use crate::body::{BeaconBlockBody, BLOB_KZG_COMMITMENTS_FIELD, BODY_TREE_DEPTH};
use crate::error::SidecarError;
use crate::header::SignedBeaconBlockHeader;
use crate::kzg::{KzgCommitment, KzgProof};
use crate::macros::spec_list;
use crate::spec::Spec;

/// Gindex of the commitment list inside the body.
pub fn commitments_field_gindex() -> Result<Gindex, ProofError> {
    to_gindex(BLOB_KZG_COMMITMENTS_FIELD, BODY_TREE_DEPTH)
}

/// Gindex of commitment `index` inside the commitment list.
pub fn commitment_in_list_gindex(spec: &Spec, index: u64) -> Result<Gindex, ProofError> {
    let depth = cover_depth(spec.max_blob_commitments_per_block);
    Gindex::ROOT.left()?.concat(to_gindex(index, depth)?)
}

/// Gindex of commitment `index` inside the body.
pub fn commitment_gindex(spec: &Spec, index: u64) -> Result<Gindex, ProofError> {
    commitments_field_gindex()?.concat(commitment_in_list_gindex(spec, index)?)
}

/// Branch of `KZG_COMMITMENT_INCLUSION_PROOF_DEPTH` roots, bottom-up.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KzgCommitmentInclusionProof(pub Vec<Root>);

impl SszType for KzgCommitmentInclusionProof {
    type Context = Spec;

    fn shape(spec: &Spec) -> Result<Shape, ShapeError> {
        Shape::vector(Shape::bytes32(), spec.kzg_commitment_inclusion_proof_depth as usize)
    }

    fn to_value(&self) -> Value {
        Value::Vector(self.0.iter().map(SszType::to_value).collect())
    }

    fn from_value(value: Value, _: &Spec) -> Result<Self, DecodeError> {
        value
            .into_items()?
            .into_iter()
            .map(|item| Root::from_value(item, &()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

spec_list!(
    /// Inclusion proofs for the blobs of one block.
    KzgCommitmentInclusionProofs of KzgCommitmentInclusionProof,
    |spec| limit = spec.max_blobs_per_block, elem = spec
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobSidecar {
    pub index: BlobIndex,
    pub blob: Blob,
    pub kzg_commitment: KzgCommitment,
    pub kzg_proof: KzgProof,
    pub signed_block_header: SignedBeaconBlockHeader,
    pub kzg_commitment_inclusion_proof: KzgCommitmentInclusionProof,
}

impl BlobSidecar {
    /// Build the commitment inclusion proof from the block body and store it.
    ///
    /// The body must hash to the header's `body_root` and carry this
    /// sidecar's commitment at its index.
    pub fn include_proof<H: HashFn + ?Sized>(
        &mut self,
        h: &H,
        spec: &Spec,
        body: &BeaconBlockBody,
    ) -> Result<(), SidecarError> {
        self.kzg_commitment_inclusion_proof = self.build_proof(h, spec, body)?;
        tracing::debug!(
            "Included commitment proof for blob {} at gindex {}",
            self.index,
            commitment_gindex(spec, self.index.0)?
        );
        Ok(())
    }

    fn build_proof<H: HashFn + ?Sized>(
        &self,
        h: &H,
        spec: &Spec,
        body: &BeaconBlockBody,
    ) -> Result<KzgCommitmentInclusionProof, SidecarError> {
        let commitments = &body.blob_kzg_commitments;
        let index = self.index.0;
        let at = commitments
            .get(index as usize)
            .ok_or(SidecarError::IndexOutOfRange {
                index,
                count: commitments.len(),
            })?;
        if *at != self.kzg_commitment {
            return Err(SidecarError::CommitmentMismatch { index });
        }

        let tree = body.tree(spec);
        let body_root = tree.hash_tree_root(h)?;
        let header_root = self.signed_block_header.message.body_root;
        if body_root != header_root {
            tracing::warn!(
                "Body root {} does not match header body root {}",
                body_root,
                header_root
            );
            return Err(SidecarError::BodyRootMismatch {
                header: header_root,
                body: body_root,
            });
        }

        let field = commitments_field_gindex()?;
        let outer = tree.hash_tree_proof(h, field)?;
        let element = commitment_in_list_gindex(spec, index)?;
        let inner = commitments.hash_tree_proof(h, spec, element)?;
        let list_root = commitments.hash_tree_root(h, spec)?;

        let (_, branch) =
            compose_checked(h, (&inner, element), &list_root, (&outer, field), &body_root)?;
        let expected = spec.kzg_commitment_inclusion_proof_depth as usize;
        if branch.len() != expected {
            return Err(SidecarError::ProofDepth {
                expected,
                got: branch.len(),
            });
        }
        Ok(KzgCommitmentInclusionProof(branch))
    }

    /// Check the stored proof places the commitment at its index under the
    /// header's `body_root`.
    ///
    /// A proof of the wrong length is an error; a proof that does not
    /// reproduce the root is `Ok(false)`.
    pub fn verify_inclusion_proof<H: HashFn + ?Sized>(
        &self,
        h: &H,
        spec: &Spec,
    ) -> Result<bool, SidecarError> {
        let proof = &self.kzg_commitment_inclusion_proof.0;
        let expected = spec.kzg_commitment_inclusion_proof_depth as usize;
        if proof.len() != expected {
            return Err(SidecarError::ProofDepth {
                expected,
                got: proof.len(),
            });
        }
        let gindex = commitment_gindex(spec, self.index.0)?;
        let leaf = self.kzg_commitment.hash_tree_root(h, &())?;
        let root = self.signed_block_header.message.body_root;
        let valid = verify_branch(h, proof, gindex, &root, &leaf)?;
        if !valid {
            tracing::warn!("Invalid commitment inclusion proof for blob {}", self.index);
        }
        Ok(valid)
    }

    /// Check the stored proof equals the one the body produces.
    pub fn verify_against_body<H: HashFn + ?Sized>(
        &self,
        h: &H,
        spec: &Spec,
        body: &BeaconBlockBody,
    ) -> Result<bool, SidecarError> {
        Ok(self.build_proof(h, spec, body)? == self.kzg_commitment_inclusion_proof)
    }
}

impl SszType for BlobSidecar {
    type Context = Spec;

    fn shape(spec: &Spec) -> Result<Shape, ShapeError> {
        Shape::container(vec![
            Field::new("index", BlobIndex::shape(&())?),
            Field::new("blob", Blob::shape(spec)?),
            Field::new("kzg_commitment", KzgCommitment::shape(&())?),
            Field::new("kzg_proof", KzgProof::shape(&())?),
            Field::new("signed_block_header", SignedBeaconBlockHeader::shape(&())?),
            Field::new(
                "kzg_commitment_inclusion_proof",
                KzgCommitmentInclusionProof::shape(spec)?,
            ),
        ])
    }

    fn to_value(&self) -> Value {
        Value::Container(vec![
            self.index.to_value(),
            self.blob.to_value(),
            self.kzg_commitment.to_value(),
            self.kzg_proof.to_value(),
            self.signed_block_header.to_value(),
            self.kzg_commitment_inclusion_proof.to_value(),
        ])
    }

    fn from_value(value: Value, spec: &Spec) -> Result<Self, DecodeError> {
        let [index, blob, kzg_commitment, kzg_proof, signed_block_header, inclusion_proof] =
            value.into_fields()?;
        Ok(Self {
            index: BlobIndex::from_value(index, &())?,
            blob: Blob::from_value(blob, spec)?,
            kzg_commitment: KzgCommitment::from_value(kzg_commitment, &())?,
            kzg_proof: KzgProof::from_value(kzg_proof, &())?,
            signed_block_header: SignedBeaconBlockHeader::from_value(signed_block_header, &())?,
            kzg_commitment_inclusion_proof: KzgCommitmentInclusionProof::from_value(
                inclusion_proof,
                spec,
            )?,
        })
    }
}
