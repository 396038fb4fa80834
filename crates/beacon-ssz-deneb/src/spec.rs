//! Preset constants.
//!
//! List limits and blob sizes are never global: every shape that depends on
//! them takes a [`Spec`]. Two presets are built in and any other set can be
//! loaded from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;

use beacon_ssz_core::cover_depth;

use crate::body::BODY_TREE_DEPTH;
use crate::error::SpecError;

/// Bytes per blob field element.
pub const BYTES_PER_FIELD_ELEMENT: u64 = 32;

/// Type tag of an EIP-4844 blob transaction.
pub const BLOB_TX_TYPE: u8 = 0x03;

/// First byte of a KZG versioned hash.
pub const VERSIONED_HASH_VERSION_KZG: u8 = 0x01;

/// Constants consumed by the blob types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct Spec {
    /// Name of the preset these values come from.
    pub preset_base: String,

    /// Field elements in one blob.
    pub field_elements_per_blob: u64,

    /// Limit of the commitment, proof and blob lists.
    pub max_blob_commitments_per_block: u64,

    /// Blobs a block may actually carry.
    pub max_blobs_per_block: u64,

    /// Length of a commitment inclusion proof.
    pub kzg_commitment_inclusion_proof_depth: u32,

    /// Byte limit of one opaque transaction.
    pub max_bytes_per_transaction: u64,

    /// Limit of the transactions list of an execution payload.
    pub max_transactions_per_payload: u64,
}

impl Spec {
    /// The minimal preset used by test networks.
    pub fn minimal() -> Self {
        Self {
            preset_base: "minimal".to_string(),
            field_elements_per_blob: 4096,
            max_blob_commitments_per_block: 16,
            max_blobs_per_block: 6,
            kzg_commitment_inclusion_proof_depth: 9,
            max_bytes_per_transaction: 1 << 30,
            max_transactions_per_payload: 1 << 20,
        }
    }

    /// The mainnet preset.
    pub fn mainnet() -> Self {
        Self {
            preset_base: "mainnet".to_string(),
            field_elements_per_blob: 4096,
            max_blob_commitments_per_block: 4096,
            max_blobs_per_block: 6,
            kzg_commitment_inclusion_proof_depth: 17,
            max_bytes_per_transaction: 1 << 30,
            max_transactions_per_payload: 1 << 20,
        }
    }

    /// Parse and validate a JSON preset.
    pub fn from_json_str(json: &str) -> Result<Self, SpecError> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Read, parse and validate a JSON preset file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check limits are non-zero, the blob byte size fits, and the inclusion
    /// proof depth matches the commitment list limit.
    pub fn validate(&self) -> Result<(), SpecError> {
        let limits = [
            ("FIELD_ELEMENTS_PER_BLOB", self.field_elements_per_blob),
            ("MAX_BLOB_COMMITMENTS_PER_BLOCK", self.max_blob_commitments_per_block),
            ("MAX_BLOBS_PER_BLOCK", self.max_blobs_per_block),
            ("MAX_BYTES_PER_TRANSACTION", self.max_bytes_per_transaction),
            ("MAX_TRANSACTIONS_PER_PAYLOAD", self.max_transactions_per_payload),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(SpecError::ZeroLimit(name));
            }
        }
        let blob_size = self
            .field_elements_per_blob
            .checked_mul(BYTES_PER_FIELD_ELEMENT)
            .filter(|size| usize::try_from(*size).is_ok());
        if blob_size.is_none() {
            return Err(SpecError::BlobSize(self.field_elements_per_blob));
        }
        if self.max_blobs_per_block > self.max_blob_commitments_per_block {
            return Err(SpecError::BlobLimit {
                blobs: self.max_blobs_per_block,
                commitments: self.max_blob_commitments_per_block,
            });
        }
        let expected = self.expected_inclusion_depth();
        if self.kzg_commitment_inclusion_proof_depth != expected {
            return Err(SpecError::InclusionDepth {
                expected,
                got: self.kzg_commitment_inclusion_proof_depth,
            });
        }
        Ok(())
    }

    /// Commitment list depth, its length mix-in, then the body tree.
    pub fn expected_inclusion_depth(&self) -> u32 {
        cover_depth(self.max_blob_commitments_per_block) + 1 + BODY_TREE_DEPTH
    }

    /// Bytes in one blob. Saturates on presets that fail [`Spec::validate`].
    pub fn blob_size(&self) -> u64 {
        self.field_elements_per_blob.saturating_mul(BYTES_PER_FIELD_ELEMENT)
    }
}

impl Default for Spec {
    fn default() -> Self {
        Self::mainnet()
    }
}
