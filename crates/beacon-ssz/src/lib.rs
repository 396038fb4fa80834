//! # Beacon SSZ
//!
//! The unified API for consensus-layer wire encoding: SSZ codec,
//! Merkleization, generalized-index proofs and blob commitment binding.
//!
//! ## Overview
//!
//! - **Codec**: Deterministic head/offset encoding of typed values
//! - **Merkleization**: Hash-tree-roots over zero-padded binary trees
//! - **Proofs**: Branches addressed by generalized index, composable across
//!   nested structures
//! - **Blobs**: KZG commitments, versioned hashes, sidecars with commitment
//!   inclusion proofs
//!
//! ## Usage
//!
//! ```rust
//! use beacon_ssz::{Engine, EngineConfig, KzgCommitment, KzgCommitments};
//!
//! let engine = Engine::new(EngineConfig::minimal()).unwrap();
//!
//! let commitments: KzgCommitments = vec![KzgCommitment::ZERO].into();
//! let bytes = engine.encode(&commitments).unwrap();
//! let decoded: KzgCommitments = engine.decode(&bytes).unwrap();
//! assert_eq!(decoded, commitments);
//!
//! let root = engine.hash_tree_root(&commitments).unwrap();
//! println!("{}", root);
//! ```
//!
//! ## Re-exports
//!
//! - `beacon_ssz::core` - Shapes, codec, Merkleization, proofs
//! - `beacon_ssz::deneb` - Blob types, sidecars and the binder

pub mod engine;
pub mod error;

// Re-export component crates
pub use beacon_ssz_core as core;
pub use beacon_ssz_deneb as deneb;

// Re-export main types for convenience
pub use engine::{Engine, EngineConfig, SpecContext};
pub use error::{Error, Result};

// Re-export commonly used types
pub use beacon_ssz_core::{
    Gindex, HashFn, Merkleized, Root, Sha256Hasher, Shape, SszType, Value,
};
pub use beacon_ssz_deneb::{
    BeaconBlockBody, BeaconBlockHeader, Blob, BlobSidecar, BlobsBundle, KzgCommitment,
    KzgCommitments, KzgProof, SignedBeaconBlockHeader, Spec, Transaction, VersionedHash,
};
