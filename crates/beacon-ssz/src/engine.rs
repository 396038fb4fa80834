//! The Engine: a preset and a hash function bound together.
//!
//! Typed values whose shape depends on preset constants take them from the
//! engine's [`Spec`]; everything else is passed straight through to the
//! core and blob crates.

use beacon_ssz_core::{verify_branch, Gindex, HashFn, Root, Sha256Hasher, SszType};
use beacon_ssz_deneb::{
    bind_versioned_hashes, BeaconBlockBody, BlindedBlobsBundle, Blob, BlobIndex, BlobSidecar,
    BlobsBundle, KzgCommitment, KzgCommitmentInclusionProof, KzgProof, SidecarError,
    SignedBeaconBlockHeader, Spec,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Configuration for the Engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Preset constants.
    pub spec: Spec,
}

impl EngineConfig {
    pub fn minimal() -> Self {
        Self {
            spec: Spec::minimal(),
        }
    }

    pub fn mainnet() -> Self {
        Self {
            spec: Spec::mainnet(),
        }
    }

    /// Load the preset from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            spec: Spec::from_json_file(path)?,
        })
    }
}

/// Contexts an engine can supply from its preset.
pub trait SpecContext {
    fn from_spec(spec: &Spec) -> &Self;
}

impl SpecContext for () {
    fn from_spec(_: &Spec) -> &Self {
        &()
    }
}

impl SpecContext for Spec {
    fn from_spec(spec: &Spec) -> &Self {
        spec
    }
}

/// The main Engine struct.
///
/// Provides a unified API for:
/// - Encoding and decoding typed values
/// - Hash-tree-roots and proofs
/// - Binding blob transactions to block commitments
/// - Building and checking blob sidecars
#[derive(Debug, Clone)]
pub struct Engine<H: HashFn = Sha256Hasher> {
    /// The hash primitive.
    hasher: H,
    /// Configuration.
    config: EngineConfig,
}

impl Engine<Sha256Hasher> {
    /// Create an engine hashing with SHA-256.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_hasher(Sha256Hasher, config)
    }
}

impl<H: HashFn> Engine<H> {
    /// Create an engine with a custom hash primitive.
    ///
    /// The preset is validated first.
    pub fn with_hasher(hasher: H, config: EngineConfig) -> Result<Self> {
        config.spec.validate()?;
        tracing::debug!("Engine configured with {} preset", config.spec.preset_base);
        Ok(Self { hasher, config })
    }

    pub fn spec(&self) -> &Spec {
        &self.config.spec
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Codec and Merkleization
    // ─────────────────────────────────────────────────────────────────────────

    pub fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: SszType,
        T::Context: SpecContext,
    {
        Ok(value.to_ssz_bytes(self.context::<T>())?)
    }

    pub fn decode<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: SszType,
        T::Context: SpecContext,
    {
        T::from_ssz_bytes(bytes, self.context::<T>()).map_err(|e| {
            tracing::warn!("Rejected {} byte input: {}", bytes.len(), e);
            Error::from(e)
        })
    }

    pub fn hash_tree_root<T>(&self, value: &T) -> Result<Root>
    where
        T: SszType,
        T::Context: SpecContext,
    {
        Ok(value.hash_tree_root(&self.hasher, self.context::<T>())?)
    }

    /// Branch for the node at `gindex` of `value`'s tree.
    pub fn prove<T>(&self, value: &T, gindex: Gindex) -> Result<Vec<Root>>
    where
        T: SszType,
        T::Context: SpecContext,
    {
        let branch = value.hash_tree_proof(&self.hasher, self.context::<T>(), gindex)?;
        tracing::debug!("Proved gindex {} with {} nodes", gindex, branch.len());
        Ok(branch)
    }

    /// Check `branch` places `leaf` at `gindex` under `root`.
    pub fn verify(
        &self,
        branch: &[Root],
        gindex: Gindex,
        root: &Root,
        leaf: &Root,
    ) -> Result<bool> {
        Ok(verify_branch(&self.hasher, branch, gindex, root, leaf)?)
    }

    fn context<T>(&self) -> &T::Context
    where
        T: SszType,
        T::Context: SpecContext,
    {
        <T::Context as SpecContext>::from_spec(&self.config.spec)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Blob Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Check the payload's blob transactions reference exactly `commitments`.
    pub fn check_blob_commitments<T: AsRef<[u8]>>(
        &self,
        transactions: &[T],
        commitments: &[KzgCommitment],
    ) -> Result<()> {
        Ok(bind_versioned_hashes(&self.hasher, transactions, commitments)?)
    }

    /// Replace the blobs of a bundle by their roots.
    pub fn blind_bundle(&self, bundle: &BlobsBundle) -> Result<BlindedBlobsBundle> {
        Ok(bundle.blinded(&self.hasher, self.spec())?)
    }

    /// Build the sidecar for blob `index` of a block.
    pub fn build_sidecar(
        &self,
        index: u64,
        blob: Blob,
        kzg_proof: KzgProof,
        header: &SignedBeaconBlockHeader,
        body: &BeaconBlockBody,
    ) -> Result<BlobSidecar> {
        let commitments = &body.blob_kzg_commitments;
        let kzg_commitment = *commitments
            .get(index as usize)
            .ok_or(SidecarError::IndexOutOfRange {
                index,
                count: commitments.len(),
            })?;
        let mut sidecar = BlobSidecar {
            index: BlobIndex(index),
            blob,
            kzg_commitment,
            kzg_proof,
            signed_block_header: header.clone(),
            kzg_commitment_inclusion_proof: KzgCommitmentInclusionProof::default(),
        };
        sidecar.include_proof(&self.hasher, self.spec(), body)?;
        Ok(sidecar)
    }

    /// Build one sidecar per blob of `bundle`.
    pub fn build_sidecars(
        &self,
        bundle: &BlobsBundle,
        header: &SignedBeaconBlockHeader,
        body: &BeaconBlockBody,
    ) -> Result<Vec<BlobSidecar>> {
        let (commitments, proofs, blobs) =
            (bundle.commitments.len(), bundle.proofs.len(), bundle.blobs.len());
        if commitments != proofs || commitments != blobs {
            tracing::warn!(
                "Bundle parts differ: {} commitments, {} proofs, {} blobs",
                commitments,
                proofs,
                blobs
            );
            return Err(Error::BundleMismatch {
                commitments,
                proofs,
                blobs,
            });
        }
        let sidecars = bundle
            .blobs
            .iter()
            .zip(bundle.proofs.iter())
            .enumerate()
            .map(|(index, (blob, proof))| {
                self.build_sidecar(index as u64, blob.clone(), *proof, header, body)
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!("Built {} blob sidecars", sidecars.len());
        Ok(sidecars)
    }

    /// Check a sidecar's commitment against its header's body root.
    pub fn verify_sidecar(&self, sidecar: &BlobSidecar) -> Result<bool> {
        Ok(sidecar.verify_inclusion_proof(&self.hasher, self.spec())?)
    }
}
