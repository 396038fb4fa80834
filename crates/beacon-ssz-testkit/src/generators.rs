//! Proptest generators for property-based testing.

use proptest::prelude::*;

use beacon_ssz_core::{BasicKind, Field, Shape, ShapeKind, Value};
use beacon_ssz_deneb::{KzgCommitment, KzgProof};

/// Generate a scalar kind.
pub fn basic_kind() -> impl Strategy<Value = BasicKind> {
    prop_oneof![
        Just(BasicKind::Bool),
        Just(BasicKind::U8),
        Just(BasicKind::U16),
        Just(BasicKind::U32),
        Just(BasicKind::U64),
        Just(BasicKind::U128),
        Just(BasicKind::U256),
    ]
}

/// Generate a shape, nested up to three levels deep.
pub fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        basic_kind().prop_map(Shape::basic),
        (1usize..=40).prop_filter_map("byte vector", |n| Shape::byte_vector(n).ok()),
        (1u64..=64).prop_filter_map("byte list", |n| Shape::byte_list(n).ok()),
        (1usize..=20).prop_filter_map("bitvector", |n| Shape::bitvector(n).ok()),
        (1u64..=40).prop_filter_map("bitlist", |n| Shape::bitlist(n).ok()),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), 1usize..=4)
                .prop_filter_map("vector", |(elem, n)| Shape::vector(elem, n).ok()),
            (inner.clone(), 1u64..=6)
                .prop_filter_map("list", |(elem, max)| Shape::list(elem, max).ok()),
            prop::collection::vec(inner, 1..=4).prop_filter_map("container", |shapes| {
                let fields = shapes
                    .into_iter()
                    .enumerate()
                    .map(|(i, shape)| Field::new(format!("field_{i}"), shape))
                    .collect();
                Shape::container(fields).ok()
            }),
        ]
    })
}

fn basic_value(kind: BasicKind) -> BoxedStrategy<Value> {
    match kind {
        BasicKind::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        BasicKind::U8 => any::<u8>().prop_map(Value::U8).boxed(),
        BasicKind::U16 => any::<u16>().prop_map(Value::U16).boxed(),
        BasicKind::U32 => any::<u32>().prop_map(Value::U32).boxed(),
        BasicKind::U64 => any::<u64>().prop_map(Value::U64).boxed(),
        BasicKind::U128 => any::<u128>().prop_map(Value::U128).boxed(),
        BasicKind::U256 => any::<[u8; 32]>().prop_map(Value::U256).boxed(),
    }
}

/// Generate a value that fits `shape`.
pub fn value_for(shape: &Shape) -> BoxedStrategy<Value> {
    use prop::collection::vec;

    match shape.kind() {
        ShapeKind::Basic(kind) => basic_value(*kind),
        ShapeKind::ByteVector(n) => vec(any::<u8>(), *n).prop_map(Value::Bytes).boxed(),
        ShapeKind::ByteList(max) => vec(any::<u8>(), 0..=*max as usize)
            .prop_map(Value::Bytes)
            .boxed(),
        ShapeKind::Bitvector(n) => vec(any::<bool>(), *n).prop_map(Value::Bits).boxed(),
        ShapeKind::Bitlist(max) => vec(any::<bool>(), 0..=*max as usize)
            .prop_map(Value::Bits)
            .boxed(),
        ShapeKind::Vector(elem, n) => vec(value_for(elem), *n).prop_map(Value::Vector).boxed(),
        ShapeKind::List(elem, max) => vec(value_for(elem), 0..=*max as usize)
            .prop_map(Value::List)
            .boxed(),
        ShapeKind::Container(fields) => fields
            .iter()
            .map(|field| value_for(&field.shape))
            .collect::<Vec<_>>()
            .prop_map(Value::Container)
            .boxed(),
    }
}

/// Generate a shape together with a value of it.
pub fn shaped_value() -> impl Strategy<Value = (Shape, Value)> {
    shape().prop_flat_map(|shape| {
        let value = value_for(&shape);
        (Just(shape), value)
    })
}

/// Generate an element shape, a list limit, and fewer items than the limit.
pub fn list_with_room() -> impl Strategy<Value = (Shape, u64, Vec<Value>)> {
    (shape(), 2u64..=8).prop_flat_map(|(elem, max)| {
        let items = prop::collection::vec(value_for(&elem), 0..max as usize);
        (Just(elem), Just(max), items)
    })
}

/// Generate a random commitment.
pub fn kzg_commitment() -> impl Strategy<Value = KzgCommitment> {
    prop::collection::vec(any::<u8>(), 48).prop_map(|bytes| {
        let mut out = [0u8; 48];
        out.copy_from_slice(&bytes);
        KzgCommitment(out)
    })
}

/// Generate a random KZG proof.
pub fn kzg_proof() -> impl Strategy<Value = KzgProof> {
    kzg_commitment().prop_map(|c| KzgProof(c.0))
}

/// Generate up to `max` commitments.
pub fn kzg_commitments(max: usize) -> impl Strategy<Value = Vec<KzgCommitment>> {
    prop::collection::vec(kzg_commitment(), 0..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::blob_tx;
    use beacon_ssz_core::{
        codec, merkle, node_root, prove, verify_branch, Gindex, Sha256Hasher,
    };
    use beacon_ssz_deneb::{bind_versioned_hashes, BindError};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_encoding_roundtrip((shape, value) in shaped_value()) {
            let bytes = codec::encode(&shape, &value).unwrap();
            prop_assert_eq!(codec::encoded_len(&shape, &value).unwrap(), bytes.len());
            if let Some(len) = shape.fixed_len() {
                prop_assert_eq!(bytes.len(), len);
            }
            prop_assert_eq!(&codec::decode(&shape, &bytes).unwrap(), &value);
            prop_assert_eq!(codec::encode(&shape, &value).unwrap(), bytes);
        }

        #[test]
        fn test_root_deterministic((shape, value) in shaped_value()) {
            let h = Sha256Hasher;
            let r1 = merkle::hash_tree_root(&h, &shape, &value).unwrap();
            let r2 = merkle::hash_tree_root(&h, &shape, &value.clone()).unwrap();
            prop_assert_eq!(r1, r2);
        }

        #[test]
        fn test_append_changes_root((elem, max, mut items) in list_with_room()) {
            let h = Sha256Hasher;
            let shape = Shape::list(elem.clone(), max).unwrap();
            let before = merkle::hash_tree_root(&h, &shape, &Value::List(items.clone())).unwrap();
            items.push(Value::default_for(&elem));
            let after = merkle::hash_tree_root(&h, &shape, &Value::List(items)).unwrap();
            prop_assert_ne!(before, after);
        }

        #[test]
        fn test_proofs_sound((shape, value) in shaped_value()) {
            let h = Sha256Hasher;
            let root = merkle::hash_tree_root(&h, &shape, &value).unwrap();
            for g in 1u64..32 {
                let gindex = Gindex::new(g).unwrap();
                let proved = prove(&h, &shape, &value, gindex);
                let node = node_root(&h, &shape, &value, gindex);
                match (proved, node) {
                    (Ok(branch), Ok(leaf)) => {
                        prop_assert_eq!(branch.len(), gindex.depth() as usize);
                        prop_assert!(verify_branch(&h, &branch, gindex, &root, &leaf).unwrap());

                        let mut bad_leaf = leaf;
                        bad_leaf.0[31] ^= 1;
                        prop_assert!(!verify_branch(&h, &branch, gindex, &root, &bad_leaf).unwrap());

                        if !branch.is_empty() {
                            let mut bad = branch.clone();
                            bad[0].0[0] ^= 1;
                            prop_assert!(!verify_branch(&h, &bad, gindex, &root, &leaf).unwrap());
                        }
                    }
                    (Err(_), Err(_)) => {}
                    (proved, node) => {
                        prop_assert!(false, "gindex {}: prove {:?}, node {:?}", g, proved, node);
                    }
                }
            }
        }

        #[test]
        fn test_bind_any_commitments(commitments in kzg_commitments(6)) {
            let h = Sha256Hasher;
            let hashes: Vec<_> = commitments.iter().map(|c| c.versioned_hash(&h)).collect();
            let txs = vec![blob_tx(&hashes)];
            prop_assert!(bind_versioned_hashes(&h, &txs, &commitments).is_ok());

            if commitments.len() > 1 && commitments[0] != commitments[1] {
                let mut swapped = commitments.clone();
                swapped.swap(0, 1);
                let is_mismatch = matches!(
                    bind_versioned_hashes(&h, &txs, &swapped),
                    Err(BindError::HashMismatch { index: 0, .. })
                );
                prop_assert!(is_mismatch);
            }
        }
    }
}
