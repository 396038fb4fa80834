//! # Beacon SSZ Testkit
//!
//! Testing utilities for beacon SSZ.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known encodings and roots for cross-implementation verification
//! - **Generators**: Proptest strategies for shapes, values and commitments
//! - **Fixtures**: Consistent blocks, bundles and blob transactions
//!
//! ## Golden Vectors
//!
//! ```rust
//! use beacon_ssz_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, root) in verify_all_vectors().unwrap() {
//!     println!("{}: {} ({})", name, root, matches);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use beacon_ssz_core::codec;
//! use beacon_ssz_testkit::generators::shaped_value;
//!
//! proptest! {
//!     #[test]
//!     fn roundtrip((shape, value) in shaped_value()) {
//!         let bytes = codec::encode(&shape, &value).unwrap();
//!         prop_assert_eq!(codec::decode(&shape, &bytes).unwrap(), value);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use beacon_ssz_testkit::fixtures::BlockFixture;
//!
//! let fixture = BlockFixture::with_seed(42, 2).unwrap();
//! let sidecars = fixture.sidecars().unwrap();
//! assert!(fixture.engine.verify_sidecar(&sidecars[1]).unwrap());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{blob_tx, small_spec, BlockFixture};
