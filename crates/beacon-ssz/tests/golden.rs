//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation must produce identical:
//! - wire bytes for the encodings below
//! - zero-subtree roots and list roots
//! - commitment gindices and inclusion proof depths
//! - inclusion proofs, whether composed or taken in one pass

use beacon_ssz::core::{
    codec, merkle, prove, to_gindex, verify_branch, zero_hashes, BasicKind, DecodeError,
    Merkleized,
};
use beacon_ssz::deneb::binder::{
    BLOB_TX_MESSAGE_OFFSET, MIN_BLOB_TX_LEN, VERSIONED_HASHES_OFFSET_POS,
};
use beacon_ssz::deneb::spec::BLOB_TX_TYPE;
use beacon_ssz::deneb::{commitment_gindex, BindError, BlobIndex, KzgCommitmentInclusionProof};
use beacon_ssz::{
    BeaconBlockBody, BeaconBlockHeader, Blob, BlobSidecar, BlobsBundle, Engine, EngineConfig,
    Error, KzgCommitment, KzgCommitments, KzgProof, Root, Sha256Hasher, Shape,
    SignedBeaconBlockHeader, Spec, SszType, Value, VersionedHash,
};

const ZERO_HASH_1: &str = "0xf5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a92759fb4b";
const ZERO_HASH_2: &str = "0xdb56114e00fdd4c1f85c892bf35ac9a89289aaecb1ebd0a96cde606a748b5d71";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn root(hex: &str) -> Root {
    Root::from_hex(hex).unwrap()
}

/// Envelope of a blob transaction carrying `hashes`.
fn blob_tx(hashes: &[VersionedHash]) -> Vec<u8> {
    let mut tx = vec![0u8; MIN_BLOB_TX_LEN];
    tx[0] = BLOB_TX_TYPE;
    tx[1..5].copy_from_slice(&(BLOB_TX_MESSAGE_OFFSET as u32).to_le_bytes());
    let rel = (MIN_BLOB_TX_LEN - 1 - BLOB_TX_MESSAGE_OFFSET) as u32;
    tx[VERSIONED_HASHES_OFFSET_POS..MIN_BLOB_TX_LEN].copy_from_slice(&rel.to_le_bytes());
    for hash in hashes {
        tx.extend_from_slice(hash.as_bytes());
    }
    tx
}

fn commitments(n: u8) -> KzgCommitments {
    (0..n).map(|i| KzgCommitment::from_bytes([0xc0 | i; 48])).collect()
}

fn block(engine: &Engine, n: u8) -> (SignedBeaconBlockHeader, BeaconBlockBody) {
    let body = BeaconBlockBody {
        randao_reveal: Root::from_bytes([1; 32]),
        execution_payload: Root::from_bytes([2; 32]),
        blob_kzg_commitments: commitments(n),
        ..Default::default()
    };
    let body_root = body.tree(engine.spec()).hash_tree_root(engine.hasher()).unwrap();
    let header = SignedBeaconBlockHeader {
        message: BeaconBlockHeader {
            slot: 100,
            proposer_index: 3,
            body_root,
            ..Default::default()
        },
        ..Default::default()
    };
    (header, body)
}

// ─────────────────────────────────────────────────────────────────────────────
// Merkleization
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_zero_hashes() {
    let zeros = zero_hashes(&Sha256Hasher, 2);
    assert_eq!(zeros[0], Root::ZERO);
    assert_eq!(zeros[1], root(ZERO_HASH_1));
    assert_eq!(zeros[2], root(ZERO_HASH_2));
}

#[test]
fn golden_zero_vectors() {
    let h = Sha256Hasher;

    // 8 x uint64 packs into two chunks
    let shape = Shape::vector(Shape::uint64(), 8).unwrap();
    let value = Value::default_for(&shape);
    assert_eq!(codec::encode(&shape, &value).unwrap(), vec![0u8; 64]);
    assert_eq!(merkle::hash_tree_root(&h, &shape, &value).unwrap(), root(ZERO_HASH_1));

    let shape = Shape::vector(Shape::bytes32(), 4).unwrap();
    let value = Value::default_for(&shape);
    assert_eq!(merkle::hash_tree_root(&h, &shape, &value).unwrap(), root(ZERO_HASH_2));
}

#[test]
fn golden_empty_list_root() {
    // one chunk of capacity: data root is zero, then mix in length 0
    let h = Sha256Hasher;
    let shape = Shape::list(Shape::uint64(), 4).unwrap();
    let empty = Value::List(vec![]);
    assert_eq!(codec::encode(&shape, &empty).unwrap(), Vec::<u8>::new());
    assert_eq!(merkle::hash_tree_root(&h, &shape, &empty).unwrap(), root(ZERO_HASH_1));
}

#[test]
fn golden_list_length_leaf() {
    let h = Sha256Hasher;
    let shape = Shape::list(Shape::basic(BasicKind::U16), 100).unwrap();
    let value = Value::List((0..20).map(Value::U16).collect());
    let list_root = merkle::hash_tree_root(&h, &shape, &value).unwrap();

    let length = to_gindex(1, 1).unwrap();
    assert_eq!(length.get(), 3);
    let branch = prove(&h, &shape, &value, length).unwrap();
    assert_eq!(branch.len(), 1);
    assert!(verify_branch(&h, &branch, length, &list_root, &Root::from_u64(20)).unwrap());
    assert!(!verify_branch(&h, &branch, length, &list_root, &Root::from_u64(21)).unwrap());
}

// ─────────────────────────────────────────────────────────────────────────────
// Codec
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_container_bytes() {
    let engine = Engine::new(EngineConfig::minimal()).unwrap();
    let header = BeaconBlockHeader {
        slot: 1,
        proposer_index: 2,
        parent_root: Root::from_bytes([0xaa; 32]),
        ..Default::default()
    };
    let bytes = engine.encode(&header).unwrap();
    assert_eq!(hex::encode(&bytes[..16]), "01000000000000000200000000000000");
    assert_eq!(&bytes[16..48], &[0xaau8; 32]);
    assert_eq!(&bytes[48..], &[0u8; 64]);
}

#[test]
fn golden_empty_bundle_bytes() {
    let engine = Engine::new(EngineConfig::minimal()).unwrap();
    let bytes = engine.encode(&BlobsBundle::default()).unwrap();
    assert_eq!(hex::encode(&bytes), "0c0000000c0000000c000000");
    assert_eq!(engine.decode::<BlobsBundle>(&bytes).unwrap(), BlobsBundle::default());
}

#[test]
fn golden_decreasing_offsets_rejected() {
    init_tracing();
    let engine = Engine::new(EngineConfig::minimal()).unwrap();
    // three offsets: commitments at 12, proofs at 60, blobs at 50
    let mut bytes = Vec::new();
    for offset in [12u32, 60, 50] {
        bytes.extend_from_slice(&offset.to_le_bytes());
    }
    bytes.extend_from_slice(&[0xc0; 48]);
    let err = engine.decode::<BlobsBundle>(&bytes).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode(DecodeError::OffsetDecreasing {
            previous: 60,
            offset: 50
        })
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Text
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_commitment_text() {
    let h = Sha256Hasher;
    let zero = KzgCommitment::ZERO;
    assert_eq!(zero.to_hex(), format!("0x{}", "0".repeat(96)));

    let one: KzgCommitment = format!("0x{}01", "00".repeat(47)).parse().unwrap();
    assert_eq!(one.as_bytes()[47], 1);
    assert_ne!(
        one.hash_tree_root(&h, &()).unwrap(),
        zero.hash_tree_root(&h, &()).unwrap()
    );
    // two chunks, the second zero-padded
    assert_eq!(zero.hash_tree_root(&h, &()).unwrap(), root(ZERO_HASH_1));

    assert!(KzgCommitment::from_hex(&"00".repeat(47)).is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Binding
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_versioned_hash_binding() {
    init_tracing();
    let engine = Engine::new(EngineConfig::minimal()).unwrap();
    let c0 = KzgCommitment::from_bytes([0xc0; 48]);
    let c1 = KzgCommitment::from_bytes([0xc1; 48]);
    let h0 = c0.versioned_hash(engine.hasher());
    let h1 = c1.versioned_hash(engine.hasher());
    assert_eq!(h0.as_bytes()[0], 0x01);

    let txs = vec![vec![0x02, 0x01, 0x02], blob_tx(&[h0, h1])];
    engine.check_blob_commitments(&txs, &[c0, c1]).unwrap();

    assert!(matches!(
        engine.check_blob_commitments(&txs, &[c1, c0]),
        Err(Error::Bind(BindError::HashMismatch { index: 0, .. }))
    ));
    assert!(matches!(
        engine.check_blob_commitments(&txs, &[c0]),
        Err(Error::Bind(BindError::CountMismatch {
            hashes: 2,
            commitments: 1
        }))
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Inclusion proofs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_commitment_gindices() {
    let minimal = Spec::minimal();
    let mainnet = Spec::mainnet();
    // field 11 of 16 slots is gindex 27; then list data (2) and the element
    assert_eq!(commitment_gindex(&minimal, 0).unwrap().get(), 27 << 5);
    assert_eq!(commitment_gindex(&minimal, 5).unwrap().get(), (27 << 5) | 5);
    assert_eq!(commitment_gindex(&mainnet, 0).unwrap().get(), 27 << 13);
    assert_eq!(commitment_gindex(&mainnet, 4095).unwrap().get(), (27 << 13) | 4095);
    assert_eq!(commitment_gindex(&minimal, 0).unwrap().depth(), 9);
    assert_eq!(commitment_gindex(&mainnet, 0).unwrap().depth(), 17);
    assert!(commitment_gindex(&minimal, 16).is_err());
}

fn check_composed_matches_direct(config: EngineConfig, depth: usize) {
    init_tracing();
    let engine = Engine::new(config).unwrap();
    let (header, body) = block(&engine, 4);
    let tree = body.tree(engine.spec());

    for index in 0..4u64 {
        let sidecar = engine
            .build_sidecar(index, Blob::zeroed(engine.spec()), KzgProof::ZERO, &header, &body)
            .unwrap();
        let composed = &sidecar.kzg_commitment_inclusion_proof.0;
        assert_eq!(composed.len(), depth);

        let gindex = commitment_gindex(engine.spec(), index).unwrap();
        let direct = tree.hash_tree_proof(engine.hasher(), gindex).unwrap();
        assert_eq!(*composed, direct);
        assert!(engine.verify_sidecar(&sidecar).unwrap());
    }
}

#[test]
fn golden_inclusion_proof_minimal() {
    check_composed_matches_direct(EngineConfig::minimal(), 9);
}

#[test]
fn golden_inclusion_proof_mainnet() {
    check_composed_matches_direct(EngineConfig::mainnet(), 17);
}

/// Body root and branch for commitment 1 of `block(engine, 2)`, computed
/// independently with plain SHA-256.
const PINNED_LEAF: &str = "0xcdde1adabeaf84fe3cbf6a85a9c364a38281481216a90051c3fb55c908bf6240";

const PINNED_MINIMAL_ROOT: &str =
    "0x17b41a13fc40c2cb42e5a89be530183acba85171caf50048864063d1f6f5c260";

const PINNED_MINIMAL_BRANCH: [&str; 9] = [
    "0x451ab8696964e5cd33b69b66af52206386031233d74032ab0b110ca7af30344b",
    ZERO_HASH_1,
    ZERO_HASH_2,
    "0xc78009fdf07fc56a11f122370658a353aaa542ed63e44c4bc15ff4cd105ab33c",
    "0x0200000000000000000000000000000000000000000000000000000000000000",
    "0x0000000000000000000000000000000000000000000000000000000000000000",
    "0x36b7217f9799dadcda3546267e32d6774a1ce2a76de7c20c336f160e68481c38",
    ZERO_HASH_2,
    "0x1816c247cd225822fc9794454debb9f0d557c0ca1207b1319fdf70fd2312c134",
];

const PINNED_MAINNET_ROOT: &str =
    "0x206a29d1b82602382f81be4a60a9605ebf4c545a9227b99f7863a22cd0bf70a6";

const PINNED_MAINNET_BRANCH: [&str; 17] = [
    "0x451ab8696964e5cd33b69b66af52206386031233d74032ab0b110ca7af30344b",
    ZERO_HASH_1,
    ZERO_HASH_2,
    "0xc78009fdf07fc56a11f122370658a353aaa542ed63e44c4bc15ff4cd105ab33c",
    "0x536d98837f2dd165a55d5eeae91485954472d56f246df256bf3cae19352a123c",
    "0x9efde052aa15429fae05bad4d0b1d7c64da64d03d7a1854a588c2cb8430c0d30",
    "0xd88ddfeed400a8755596b21942c1497e114c302e6118290f91e6772976041fa1",
    "0x87eb0ddba57e35f6d286673802a4af5975e22506c7cf4c64bb6be5ee11527f2c",
    "0x26846476fd5fc54a5d43385167c95144f2643f533cc85bb9d16b782f8d7db193",
    "0x506d86582d252405b840018792cad2bf1259f1ef5aa5f887e13cb2f0094f51e1",
    "0xffff0ad7e659772f9534c195c815efc4014ef1e1daed4404c06385d11192e92b",
    "0x6cf04127db05441cd833107a52be852868890e4317e6a02ab47683aa75964220",
    "0x0200000000000000000000000000000000000000000000000000000000000000",
    "0x0000000000000000000000000000000000000000000000000000000000000000",
    "0x36b7217f9799dadcda3546267e32d6774a1ce2a76de7c20c336f160e68481c38",
    ZERO_HASH_2,
    "0x1816c247cd225822fc9794454debb9f0d557c0ca1207b1319fdf70fd2312c134",
];

fn check_pinned_inclusion_proof(config: EngineConfig, body_root: &str, branch: &[&str]) {
    let engine = Engine::new(config).unwrap();
    let (header, body) = block(&engine, 2);
    assert_eq!(header.message.body_root, root(body_root));

    let leaf = engine.hash_tree_root(&body.blob_kzg_commitments[1]).unwrap();
    assert_eq!(leaf, root(PINNED_LEAF));

    let expected: Vec<Root> = branch.iter().map(|hex| root(hex)).collect();
    let sidecar = engine
        .build_sidecar(1, Blob::zeroed(engine.spec()), KzgProof::ZERO, &header, &body)
        .unwrap();
    assert_eq!(sidecar.kzg_commitment_inclusion_proof.0, expected);

    let gindex = commitment_gindex(engine.spec(), 1).unwrap();
    let body_root = root(body_root);
    assert!(verify_branch(engine.hasher(), &expected, gindex, &body_root, &leaf).unwrap());
}

#[test]
fn golden_pinned_inclusion_proof_minimal() {
    check_pinned_inclusion_proof(
        EngineConfig::minimal(),
        PINNED_MINIMAL_ROOT,
        &PINNED_MINIMAL_BRANCH,
    );
}

#[test]
fn golden_pinned_inclusion_proof_mainnet() {
    check_pinned_inclusion_proof(
        EngineConfig::mainnet(),
        PINNED_MAINNET_ROOT,
        &PINNED_MAINNET_BRANCH,
    );
}

#[test]
fn golden_tampered_sidecar() {
    init_tracing();
    let engine = Engine::new(EngineConfig::minimal()).unwrap();
    let (header, body) = block(&engine, 2);
    let sidecar = engine
        .build_sidecar(1, Blob::zeroed(engine.spec()), KzgProof::ZERO, &header, &body)
        .unwrap();

    let mut wrong_index = sidecar.clone();
    wrong_index.index = BlobIndex(0);
    assert!(!engine.verify_sidecar(&wrong_index).unwrap());

    let mut wrong_node = sidecar.clone();
    wrong_node.kzg_commitment_inclusion_proof.0[4].0[0] ^= 1;
    assert!(!engine.verify_sidecar(&wrong_node).unwrap());

    let mut short = sidecar;
    short.kzg_commitment_inclusion_proof = KzgCommitmentInclusionProof(vec![Root::ZERO; 8]);
    assert!(engine.verify_sidecar(&short).is_err());
}

#[test]
fn golden_sidecar_wire_size() {
    let engine = Engine::new(EngineConfig::minimal()).unwrap();
    let (header, body) = block(&engine, 1);
    let sidecar: BlobSidecar = engine
        .build_sidecar(0, Blob::zeroed(engine.spec()), KzgProof::ZERO, &header, &body)
        .unwrap();
    let bytes = engine.encode(&sidecar).unwrap();
    // index, blob, commitment, proof, signed header, 9 proof nodes
    assert_eq!(bytes.len(), 8 + 131_072 + 48 + 48 + 208 + 9 * 32);
    assert_eq!(BlobSidecar::fixed_length(engine.spec()).unwrap(), Some(bytes.len()));
    assert_eq!(engine.decode::<BlobSidecar>(&bytes).unwrap(), sidecar);
}
