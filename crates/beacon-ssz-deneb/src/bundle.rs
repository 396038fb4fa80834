//! Blob bundles handed from the execution layer to a block builder.

use serde::{Deserialize, Serialize};

use beacon_ssz_core::{DecodeError, Field, HashFn, Shape, ShapeError, SszError, SszType, Value};

use crate::blob::{BlobRoots, Blobs};
use crate::kzg::{KzgCommitments, KzgProofs};
use crate::spec::Spec;

/// Commitments, proofs and blobs, index-aligned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlobsBundle {
    pub commitments: KzgCommitments,
    pub proofs: KzgProofs,
    pub blobs: Blobs,
}

/// A [`BlobsBundle`] with each blob replaced by its hash-tree-root.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlindedBlobsBundle {
    pub commitments: KzgCommitments,
    pub proofs: KzgProofs,
    pub blob_roots: BlobRoots,
}

impl BlobsBundle {
    /// Replace every blob by its root.
    pub fn blinded<H: HashFn + ?Sized>(
        &self,
        h: &H,
        spec: &Spec,
    ) -> Result<BlindedBlobsBundle, SszError> {
        Ok(BlindedBlobsBundle {
            commitments: self.commitments.clone(),
            proofs: self.proofs.clone(),
            blob_roots: self.blobs.roots(h, spec)?,
        })
    }
}

impl SszType for BlobsBundle {
    type Context = Spec;

    fn shape(spec: &Spec) -> Result<Shape, ShapeError> {
        Shape::container(vec![
            Field::new("commitments", KzgCommitments::shape(spec)?),
            Field::new("proofs", KzgProofs::shape(spec)?),
            Field::new("blobs", Blobs::shape(spec)?),
        ])
    }

    fn to_value(&self) -> Value {
        Value::Container(vec![
            self.commitments.to_value(),
            self.proofs.to_value(),
            self.blobs.to_value(),
        ])
    }

    fn from_value(value: Value, spec: &Spec) -> Result<Self, DecodeError> {
        let [commitments, proofs, blobs] = value.into_fields()?;
        Ok(Self {
            commitments: KzgCommitments::from_value(commitments, spec)?,
            proofs: KzgProofs::from_value(proofs, spec)?,
            blobs: Blobs::from_value(blobs, spec)?,
        })
    }
}

impl SszType for BlindedBlobsBundle {
    type Context = Spec;

    fn shape(spec: &Spec) -> Result<Shape, ShapeError> {
        Shape::container(vec![
            Field::new("commitments", KzgCommitments::shape(spec)?),
            Field::new("proofs", KzgProofs::shape(spec)?),
            Field::new("blob_roots", BlobRoots::shape(spec)?),
        ])
    }

    fn to_value(&self) -> Value {
        Value::Container(vec![
            self.commitments.to_value(),
            self.proofs.to_value(),
            self.blob_roots.to_value(),
        ])
    }

    fn from_value(value: Value, spec: &Spec) -> Result<Self, DecodeError> {
        let [commitments, proofs, blob_roots] = value.into_fields()?;
        Ok(Self {
            commitments: KzgCommitments::from_value(commitments, spec)?,
            proofs: KzgProofs::from_value(proofs, spec)?,
            blob_roots: BlobRoots::from_value(blob_roots, spec)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::Blob;
    use crate::kzg::{KzgCommitment, KzgProof};
    use beacon_ssz_core::{merkle, Root, Sha256Hasher};

    fn bundle(spec: &Spec) -> BlobsBundle {
        BlobsBundle {
            commitments: vec![KzgCommitment([1; 48]), KzgCommitment([2; 48])].into(),
            proofs: vec![KzgProof([3; 48]), KzgProof([4; 48])].into(),
            blobs: vec![Blob(vec![5; spec.blob_size() as usize]), Blob::zeroed(spec)].into(),
        }
    }

    fn small_spec() -> Spec {
        Spec {
            field_elements_per_blob: 2,
            ..Spec::minimal()
        }
    }

    #[test]
    fn test_blinded_keeps_commitments_and_proofs() {
        let h = Sha256Hasher;
        let spec = small_spec();
        let bundle = bundle(&spec);
        let blinded = bundle.blinded(&h, &spec).unwrap();
        assert_eq!(blinded.commitments, bundle.commitments);
        assert_eq!(blinded.proofs, bundle.proofs);
        assert_eq!(blinded.blob_roots.len(), 2);
        assert_eq!(
            blinded.blob_roots[1],
            merkle::merkleize(&h, &[Root::ZERO; 2], None).unwrap()
        );
    }

    #[test]
    fn test_bundle_roundtrip() {
        let spec = small_spec();
        let bundle = bundle(&spec);
        let bytes = bundle.to_ssz_bytes(&spec).unwrap();
        // three offsets, 2 commitments, 2 proofs, 2 blobs
        assert_eq!(bytes.len(), 12 + 96 + 96 + 128);
        assert_eq!(BlobsBundle::from_ssz_bytes(&bytes, &spec).unwrap(), bundle);
        assert_eq!(BlobsBundle::fixed_length(&spec).unwrap(), None);
    }

    #[test]
    fn test_blinded_roundtrip() {
        let h = Sha256Hasher;
        let spec = small_spec();
        let blinded = bundle(&spec).blinded(&h, &spec).unwrap();
        let bytes = blinded.to_ssz_bytes(&spec).unwrap();
        assert_eq!(bytes.len(), 12 + 96 + 96 + 64);
        assert_eq!(BlindedBlobsBundle::from_ssz_bytes(&bytes, &spec).unwrap(), blinded);
    }
}
