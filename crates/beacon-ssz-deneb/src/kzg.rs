//! KZG commitments, proofs and versioned hashes.
//!
//! Commitments and proofs are opaque 48-byte group elements here; no curve
//! arithmetic is done on them. As SSZ values they are 2-chunk byte vectors.

use beacon_ssz_core::HashFn;

use crate::macros::{fixed_bytes, spec_list};
use crate::spec::VERSIONED_HASH_VERSION_KZG;

fixed_bytes!(
    /// A KZG commitment to a blob.
    KzgCommitment,
    48
);

fixed_bytes!(
    /// A KZG opening proof.
    KzgProof,
    48
);

fixed_bytes!(
    /// A commitment hash tagged with its scheme version, as referenced by
    /// blob transactions.
    VersionedHash,
    32
);

impl KzgCommitment {
    /// `hash(commitment)` with the first byte replaced by the KZG version tag.
    pub fn versioned_hash<H: HashFn + ?Sized>(&self, h: &H) -> VersionedHash {
        let mut out = h.hash(&self.0).0;
        out[0] = VERSIONED_HASH_VERSION_KZG;
        VersionedHash(out)
    }
}

spec_list!(
    /// Commitments of one block, bounded by `MAX_BLOB_COMMITMENTS_PER_BLOCK`.
    KzgCommitments of KzgCommitment,
    |spec| limit = spec.max_blob_commitments_per_block, elem = &()
);

spec_list!(
    /// Proofs matching a block's commitments.
    KzgProofs of KzgProof,
    |spec| limit = spec.max_blob_commitments_per_block, elem = &()
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Spec;
    use beacon_ssz_core::{zero_hashes, Sha256Hasher, SszType};

    #[test]
    fn test_zero_commitment_text() {
        let zero = KzgCommitment::ZERO;
        assert_eq!(zero.to_hex(), format!("0x{}", "00".repeat(48)));

        let one: KzgCommitment = format!("0x{}01", "00".repeat(47)).parse().unwrap();
        assert_eq!(one.0[47], 1);
        let h = Sha256Hasher;
        assert_ne!(
            one.hash_tree_root(&h, &()).unwrap(),
            zero.hash_tree_root(&h, &()).unwrap()
        );
    }

    #[test]
    fn test_from_value_enforces_preset_limit() {
        let spec = Spec::minimal();
        let items = |n: usize| {
            beacon_ssz_core::Value::List(vec![KzgCommitment::ZERO.to_value(); n])
        };
        assert_eq!(
            KzgCommitments::from_value(items(16), &spec).unwrap().len(),
            16
        );
        assert_eq!(
            KzgCommitments::from_value(items(17), &spec),
            Err(beacon_ssz_core::DecodeError::TooManyElements {
                count: 17,
                limit: 16
            })
        );
        assert!(KzgCommitments::from_value(items(17), &Spec::mainnet()).is_ok());
    }

    #[test]
    fn test_commitment_root_is_two_chunks() {
        let h = Sha256Hasher;
        assert_eq!(
            KzgCommitment::ZERO.hash_tree_root(&h, &()).unwrap(),
            zero_hashes(&h, 1)[1]
        );
        let mut bytes = [0u8; 48];
        bytes[..32].copy_from_slice(&[7; 32]);
        bytes[32..].copy_from_slice(&[9; 16]);
        let mut tail = [0u8; 32];
        tail[..16].copy_from_slice(&[9; 16]);
        assert_eq!(
            KzgCommitment(bytes).hash_tree_root(&h, &()).unwrap(),
            h.hash_pair(&[7u8; 32].into(), &tail.into())
        );
    }

    #[test]
    fn test_text_length_enforced() {
        assert!(KzgCommitment::from_hex(&"00".repeat(47)).is_err());
        assert!(KzgCommitment::from_hex(&"00".repeat(49)).is_err());
        assert!(KzgCommitment::from_hex(&"AB".repeat(48)).is_ok());
    }

    #[test]
    fn test_versioned_hash() {
        let h = Sha256Hasher;
        let commitment = KzgCommitment([0x11; 48]);
        let vh = commitment.versioned_hash(&h);
        assert_eq!(vh.0[0], VERSIONED_HASH_VERSION_KZG);
        assert_eq!(vh.0[1..], h.hash(&[0x11; 48]).0[1..]);
    }

    #[test]
    fn test_commitments_json_and_limit() {
        let spec = Spec::minimal();
        let list: KzgCommitments = vec![KzgCommitment::ZERO, KzgCommitment([1; 48])].into();
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.starts_with("[\"0x0000"));
        assert_eq!(serde_json::from_str::<KzgCommitments>(&json).unwrap(), list);

        let bytes = list.to_ssz_bytes(&spec).unwrap();
        assert_eq!(bytes.len(), 96);
        assert_eq!(KzgCommitments::from_ssz_bytes(&bytes, &spec).unwrap(), list);

        let too_many: KzgCommitments = vec![KzgCommitment::ZERO; 17].into();
        assert!(too_many.to_ssz_bytes(&spec).is_err());
        assert!(KzgCommitments::from_ssz_bytes(&[0; 17 * 48], &spec).is_err());
    }
}
