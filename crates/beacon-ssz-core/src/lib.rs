//! # Beacon SSZ Core
//!
//! Pure primitives for the consensus-layer wire encoding: type shapes, the
//! offset-based codec, Merkleization and generalized-index proofs.
//!
//! This crate contains no I/O and no global state. Every operation is a pure
//! function of its inputs and an injected [`HashFn`].
//!
//! ## Key Types
//!
//! - [`Shape`] - Type shape descriptor (basic, vectors, lists, containers)
//! - [`Value`] - A materialized value of some shape
//! - [`Root`] - A 32-byte chunk or tree node
//! - [`Gindex`] - Generalized index addressing a node of the implicit tree
//! - [`SszType`] - Capability trait for typed values (encode, decode, roots, proofs)
//!
//! ## Example
//!
//! ```rust
//! use beacon_ssz_core::{codec, merkle, BasicKind, Sha256Hasher, Shape, Value};
//!
//! let shape = Shape::list(Shape::basic(BasicKind::U64), 4).unwrap();
//! let value = Value::List(vec![Value::U64(1), Value::U64(2)]);
//!
//! let bytes = codec::encode(&shape, &value).unwrap();
//! assert_eq!(bytes.len(), 16);
//! assert_eq!(codec::decode(&shape, &bytes).unwrap(), value);
//!
//! let root = merkle::hash_tree_root(&Sha256Hasher, &shape, &value).unwrap();
//! assert_ne!(root, beacon_ssz_core::Root::ZERO);
//! ```

pub mod codec;
pub mod crypto;
pub mod error;
pub mod gindex;
pub mod merkle;
pub mod object;
pub mod proof;
pub mod shape;
pub mod text;
pub mod types;
pub mod value;

pub use crypto::{zero_hashes, HashFn, Sha256Hasher};
pub use error::{DecodeError, ProofError, ShapeError, SszError};
pub use gindex::{cover_depth, to_gindex, Gindex};
pub use object::{Bound, Merkleized, SszType};
pub use proof::{compose_branches, compose_checked, node_root, prove, verify_branch};
pub use shape::{BasicKind, Field, Shape, ShapeKind};
pub use text::TextError;
pub use types::{Chunk, Root};
pub use value::Value;
