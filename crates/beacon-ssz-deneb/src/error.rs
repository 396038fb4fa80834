//! Error types for the blob domain.

use thiserror::Error;

use beacon_ssz_core::{ProofError, Root, ShapeError, SszError};

use crate::kzg::VersionedHash;

/// Errors loading or validating a [`Spec`](crate::Spec).
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("{0} must be non-zero")]
    ZeroLimit(&'static str),

    #[error("MAX_BLOBS_PER_BLOCK {blobs} exceeds MAX_BLOB_COMMITMENTS_PER_BLOCK {commitments}")]
    BlobLimit { blobs: u64, commitments: u64 },

    #[error("FIELD_ELEMENTS_PER_BLOB {0} overflows the blob byte size")]
    BlobSize(u64),

    #[error("KZG_COMMITMENT_INCLUSION_PROOF_DEPTH must be {expected}, got {got}")]
    InclusionDepth { expected: u32, got: u32 },

    #[error("invalid preset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read preset: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors peeking into an opaque blob transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    #[error("blob tx is too small: {len} bytes, need at least {min}")]
    TooShort { len: usize, min: usize },

    #[error("tx is not a blob tx: type {0:#04x}")]
    NotBlobTx(u8),

    #[error("blob tx has message offset {got}, expected {expected}")]
    BadMessageOffset { got: u32, expected: u32 },

    #[error("versioned hashes start at byte {start} of {len}, leaving a partial hash")]
    BadVersionedHashesRegion { start: u64, len: usize },
}

/// Errors binding transactions to block commitments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("got {hashes} versioned hashes but {commitments} commitments")]
    CountMismatch { hashes: usize, commitments: usize },

    #[error("entry {index}: versioned hash {expected} does not match {got} computed from the commitment")]
    HashMismatch {
        index: usize,
        expected: VersionedHash,
        got: VersionedHash,
    },

    #[error("transaction {index} is malformed: {source}")]
    MalformedTransaction {
        index: usize,
        #[source]
        source: TxError,
    },
}

/// Errors building or checking a sidecar's commitment inclusion proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SidecarError {
    #[error("block body root {body} does not match header body root {header}")]
    BodyRootMismatch { header: Root, body: Root },

    #[error("blob index {index} out of range for {count} commitments")]
    IndexOutOfRange { index: u64, count: usize },

    #[error("sidecar commitment does not match body commitment {index}")]
    CommitmentMismatch { index: u64 },

    #[error("inclusion proof has {got} nodes, expected {expected}")]
    ProofDepth { expected: usize, got: usize },

    #[error("proof error: {0}")]
    Proof(#[from] ProofError),

    #[error("merkleization error: {0}")]
    Ssz(#[from] SszError),
}

impl From<ShapeError> for SidecarError {
    fn from(e: ShapeError) -> Self {
        SidecarError::Ssz(SszError::Shape(e))
    }
}
