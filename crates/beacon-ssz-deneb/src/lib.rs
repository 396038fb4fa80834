//! # Beacon SSZ Deneb
//!
//! Blob-carrying types of the Deneb fork, built on the shape engine from
//! `beacon_ssz_core`.
//!
//! ## Key Types
//!
//! - [`Spec`] - Preset constants every blob shape is sized by
//! - [`KzgCommitment`], [`KzgProof`], [`VersionedHash`] - Opaque commitment bytes
//! - [`Blob`], [`BlobsBundle`], [`BlindedBlobsBundle`] - Blob payloads
//! - [`BlobSidecar`] - One blob with its commitment inclusion proof
//! - [`BeaconBlockBody`] - Body summary the inclusion proof is taken against
//!
//! ## Binding
//!
//! [`bind_versioned_hashes`] checks that the blob transactions of a payload
//! reference exactly the block's commitments, in order.
//!
//! ## Example
//!
//! ```rust
//! use beacon_ssz_core::{Sha256Hasher, SszType};
//! use beacon_ssz_deneb::{KzgCommitment, KzgCommitments, Spec};
//!
//! let spec = Spec::minimal();
//! let commitments: KzgCommitments = vec![KzgCommitment::from_bytes([1; 48])].into();
//!
//! let bytes = commitments.to_ssz_bytes(&spec).unwrap();
//! assert_eq!(bytes.len(), 48);
//!
//! let root = commitments.hash_tree_root(&Sha256Hasher, &spec).unwrap();
//! assert_eq!(KzgCommitments::from_ssz_bytes(&bytes, &spec).unwrap(), commitments);
//! # let _ = root;
//! ```

mod macros;

pub mod binder;
pub mod blob;
pub mod body;
pub mod bundle;
pub mod error;
pub mod header;
pub mod kzg;
pub mod sidecar;
pub mod spec;
pub mod transaction;

pub use binder::{bind_versioned_hashes, peek_blob_versioned_hashes};
pub use blob::{Blob, BlobIndex, BlobRoots, Blobs};
pub use body::{BeaconBlockBody, BlockBodyTree};
pub use bundle::{BlindedBlobsBundle, BlobsBundle};
pub use error::{BindError, SidecarError, SpecError, TxError};
pub use header::{BeaconBlockHeader, BlsSignature, SignedBeaconBlockHeader};
pub use kzg::{KzgCommitment, KzgCommitments, KzgProof, KzgProofs, VersionedHash};
pub use sidecar::{
    commitment_gindex, BlobSidecar, KzgCommitmentInclusionProof, KzgCommitmentInclusionProofs,
};
pub use spec::Spec;
pub use transaction::{Transaction, Transactions};
