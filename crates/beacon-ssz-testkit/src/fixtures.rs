//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a small preset, blob
//! transaction envelopes, and a block whose body root matches its header.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use beacon_ssz::{Engine, EngineConfig, Merkleized, Result};
use beacon_ssz_core::Root;
use beacon_ssz_deneb::binder::{
    BLOB_TX_MESSAGE_OFFSET, MIN_BLOB_TX_LEN, VERSIONED_HASHES_OFFSET_POS,
};
use beacon_ssz_deneb::spec::BLOB_TX_TYPE;
use beacon_ssz_deneb::{
    BeaconBlockBody, BeaconBlockHeader, Blob, BlobSidecar, BlobsBundle, KzgCommitment, KzgProof,
    SignedBeaconBlockHeader, Spec, Transaction, Transactions, VersionedHash,
};

/// The minimal preset with two field elements per blob.
pub fn small_spec() -> Spec {
    Spec {
        preset_base: "small".to_string(),
        field_elements_per_blob: 2,
        ..Spec::minimal()
    }
}

/// A blob transaction envelope carrying `hashes` and an otherwise empty
/// message.
pub fn blob_tx(hashes: &[VersionedHash]) -> Vec<u8> {
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

/// A block with `n` blobs: bundle, body, header and the payload's
/// transactions, all consistent with each other.
pub struct BlockFixture {
    pub engine: Engine,
    pub header: SignedBeaconBlockHeader,
    pub body: BeaconBlockBody,
    pub bundle: BlobsBundle,
    pub transactions: Transactions,
}

impl BlockFixture {
    /// Create a fixture with random contents.
    pub fn new(n: usize) -> Result<Self> {
        Self::with_seed(rand::thread_rng().gen(), n)
    }

    /// Create with deterministic contents from seed.
    pub fn with_seed(seed: u64, n: usize) -> Result<Self> {
        let engine = Engine::new(EngineConfig { spec: small_spec() })?;
        let mut rng = StdRng::seed_from_u64(seed);

        let blob_size = engine.spec().blob_size() as usize;
        let mut bundle = BlobsBundle::default();
        for _ in 0..n {
            bundle.commitments.0.push(KzgCommitment(random_array(&mut rng)));
            bundle.proofs.0.push(KzgProof(random_array(&mut rng)));
            let mut blob = vec![0u8; blob_size];
            rng.fill(&mut blob[..]);
            bundle.blobs.0.push(Blob(blob));
        }

        let body = BeaconBlockBody {
            randao_reveal: Root(random_array(&mut rng)),
            eth1_data: Root(random_array(&mut rng)),
            execution_payload: Root(random_array(&mut rng)),
            blob_kzg_commitments: bundle.commitments.clone(),
            ..Default::default()
        };
        let header = SignedBeaconBlockHeader {
            message: BeaconBlockHeader {
                slot: rng.gen_range(1..1_000_000),
                proposer_index: rng.gen_range(0..1024),
                parent_root: Root(random_array(&mut rng)),
                state_root: Root(random_array(&mut rng)),
                body_root: body.tree(engine.spec()).hash_tree_root(engine.hasher())?,
            },
            ..Default::default()
        };

        let hashes: Vec<_> = bundle
            .commitments
            .iter()
            .map(|c| c.versioned_hash(engine.hasher()))
            .collect();
        let mut legacy = vec![0x02];
        legacy.extend((0..40).map(|_| rng.gen::<u8>()));
        let transactions =
            vec![Transaction::new(legacy), Transaction::new(blob_tx(&hashes))].into();

        Ok(Self {
            engine,
            header,
            body,
            bundle,
            transactions,
        })
    }

    /// One sidecar per blob, with inclusion proofs.
    pub fn sidecars(&self) -> Result<Vec<BlobSidecar>> {
        self.engine.build_sidecars(&self.bundle, &self.header, &self.body)
    }
}

fn random_array<const N: usize>(rng: &mut StdRng) -> [u8; N] {
    let mut out = [0u8; N];
    rng.fill(&mut out[..]);
    out
}
