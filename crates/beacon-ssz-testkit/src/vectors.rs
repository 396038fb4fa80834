//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the wire bytes and the root that every implementation
//! must produce.

use beacon_ssz_core::{codec, merkle, BasicKind, Field, Sha256Hasher, Shape, ShapeError, Value};

/// Root of a depth-1 all-zero tree.
pub const ZERO_HASH_1: &str = "0xf5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a92759fb4b";

/// Root of a depth-2 all-zero tree.
pub const ZERO_HASH_2: &str = "0xdb56114e00fdd4c1f85c892bf35ac9a89289aaecb1ebd0a96cde606a748b5d71";

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub shape: Shape,
    pub value: Value,
    /// Expected encoding (hex, no prefix).
    pub expected_bytes: String,
    /// Expected hash-tree-root (hex).
    pub expected_root: String,
}

fn chunk_hex(prefix: &str) -> String {
    format!("0x{prefix}{}", "0".repeat(64 - prefix.len()))
}

/// Get all golden test vectors.
pub fn all_vectors() -> Result<Vec<GoldenVector>, ShapeError> {
    let u8_list = Shape::list(Shape::basic(BasicKind::U8), 8)?;
    Ok(vec![
        GoldenVector {
            name: "uint64 5",
            shape: Shape::uint64(),
            value: Value::U64(5),
            expected_bytes: "0500000000000000".to_string(),
            expected_root: chunk_hex("05"),
        },
        GoldenVector {
            name: "bool true",
            shape: Shape::basic(BasicKind::Bool),
            value: Value::Bool(true),
            expected_bytes: "01".to_string(),
            expected_root: chunk_hex("01"),
        },
        GoldenVector {
            name: "bitvector of 10 with bits 0 and 9",
            shape: Shape::bitvector(10)?,
            value: Value::Bits((0..10).map(|i| i == 0 || i == 9).collect()),
            expected_bytes: "0102".to_string(),
            expected_root: chunk_hex("0102"),
        },
        GoldenVector {
            name: "bitlist 101",
            shape: Shape::bitlist(8)?,
            value: Value::Bits(vec![true, false, true]),
            expected_bytes: "0d".to_string(),
            expected_root: "0xcf8ca64c265b9b6234fb7573a200745204fd04fecf680f1157f27367ee8f4aa2".to_string(),
        },
        GoldenVector {
            name: "uint16 list 1 2 3",
            shape: Shape::list(Shape::basic(BasicKind::U16), 8)?,
            value: Value::List(vec![Value::U16(1), Value::U16(2), Value::U16(3)]),
            expected_bytes: "010002000300".to_string(),
            expected_root: "0x8c0cd61afd522875dc93f9cfd0d3514d3bc6f60271d00ec8fb0c10881159b3b9".to_string(),
        },
        GoldenVector {
            name: "container with a variable field",
            shape: Shape::container(vec![
                Field::new("a", Shape::basic(BasicKind::U16)),
                Field::new("b", u8_list.clone()),
            ])?,
            value: Value::Container(vec![
                Value::U16(0x0102),
                Value::List(vec![Value::U8(1), Value::U8(2), Value::U8(3)]),
            ]),
            expected_bytes: "020106000000010203".to_string(),
            expected_root: "0x710d0a5ab9743fd59b984e91f651038ac27d99f6739dfb5b3dda78f1ef56e912".to_string(),
        },
        GoldenVector {
            name: "empty uint64 list",
            shape: Shape::list(Shape::uint64(), 4)?,
            value: Value::List(vec![]),
            expected_bytes: String::new(),
            expected_root: ZERO_HASH_1.to_string(),
        },
        GoldenVector {
            name: "two empty lists",
            shape: Shape::container(vec![
                Field::new("a", u8_list.clone()),
                Field::new("b", u8_list),
            ])?,
            value: Value::Container(vec![Value::List(vec![]), Value::List(vec![])]),
            expected_bytes: "0800000008000000".to_string(),
            expected_root: ZERO_HASH_2.to_string(),
        },
        GoldenVector {
            name: "zero commitment",
            shape: Shape::byte_vector(48)?,
            value: Value::Bytes(vec![0; 48]),
            expected_bytes: "00".repeat(48),
            expected_root: ZERO_HASH_1.to_string(),
        },
    ])
}

/// Verify all golden vectors.
///
/// Returns `(name, matches, root)` per vector.
pub fn verify_all_vectors() -> Result<Vec<(String, bool, String)>, String> {
    let h = Sha256Hasher;
    all_vectors()
        .map_err(|e| e.to_string())?
        .iter()
        .map(|v| {
            let bytes = codec::encode(&v.shape, &v.value).map_err(|e| e.to_string())?;
            let root = merkle::hash_tree_root(&h, &v.shape, &v.value)
                .map_err(|e| e.to_string())?
                .to_hex();
            let matches = hex::encode(&bytes) == v.expected_bytes && root == v.expected_root;
            Ok((v.name.to_string(), matches, root))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_ssz_core::Root;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, root) in verify_all_vectors().unwrap() {
            assert!(matches, "Vector '{}' does not match (root {})", name, root);
        }
    }

    #[test]
    fn test_every_root_pinned() {
        let h = Sha256Hasher;
        for vector in all_vectors().unwrap() {
            let pinned = Root::from_hex(&vector.expected_root).unwrap();
            let root = merkle::hash_tree_root(&h, &vector.shape, &vector.value).unwrap();
            assert_eq!(root, pinned, "Vector '{}' root differs", vector.name);
        }
    }

    #[test]
    fn test_vectors_decode_back() {
        for vector in all_vectors().unwrap() {
            let bytes = hex::decode(&vector.expected_bytes).unwrap();
            assert_eq!(
                codec::decode(&vector.shape, &bytes).unwrap(),
                vector.value,
                "Vector '{}' decoded differently",
                vector.name
            );
        }
    }
}
