//! Error types for the engine.

use beacon_ssz_core::{DecodeError, ProofError, ShapeError, SszError, TextError};
use beacon_ssz_deneb::{BindError, SidecarError, SpecError, TxError};
use thiserror::Error;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid type shape.
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    /// Malformed encoding.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Encoding or merkleization failure.
    #[error("ssz error: {0}")]
    Ssz(#[from] SszError),

    /// Gindex or branch error.
    #[error("proof error: {0}")]
    Proof(#[from] ProofError),

    /// Malformed hex text.
    #[error("text error: {0}")]
    Text(#[from] TextError),

    /// Invalid or unreadable preset.
    #[error("spec error: {0}")]
    Spec(#[from] SpecError),

    /// Malformed blob transaction.
    #[error("transaction error: {0}")]
    Tx(#[from] TxError),

    /// Transactions disagree with the block's commitments.
    #[error("binding error: {0}")]
    Bind(#[from] BindError),

    /// Sidecar proof construction or check failed.
    #[error("sidecar error: {0}")]
    Sidecar(#[from] SidecarError),

    /// A bundle whose parts differ in length.
    #[error("bundle has {commitments} commitments, {proofs} proofs and {blobs} blobs")]
    BundleMismatch {
        commitments: usize,
        proofs: usize,
        blobs: usize,
    },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
