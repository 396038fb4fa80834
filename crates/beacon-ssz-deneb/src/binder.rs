//! Binding blob transactions to block commitments.
//!
//! A block commits to its blobs twice: the body lists the KZG commitments,
//! and each blob transaction lists the versioned hashes of the commitments
//! it pays for. The two must agree position by position, in transaction
//! order. Transactions stay opaque; only the versioned hashes are peeked
//! out of the fixed layout of a signed blob transaction.

use beacon_ssz_core::HashFn;

use crate::error::{BindError, TxError};
use crate::kzg::{KzgCommitment, VersionedHash};
use crate::spec::BLOB_TX_TYPE;

/// Offset field preceding the message: 4 bytes.
const MESSAGE_OFFSET_LEN: usize = 4;

/// `y_parity ‖ r ‖ s`.
const SIGNATURE_LEN: usize = 1 + 32 + 32;

/// Expected value of the message offset field.
pub const BLOB_TX_MESSAGE_OFFSET: usize = MESSAGE_OFFSET_LEN + SIGNATURE_LEN;

/// Message bytes before the versioned-hashes offset field: chain id, nonce,
/// priority fee, max fee, gas, to, value, data offset, access list offset,
/// max fee per blob gas.
const MESSAGE_LEN_TILL_VERSIONED_HASHES: usize = 32 + 8 + 32 + 32 + 8 + 4 + 32 + 4 + 4 + 32;

/// Position of the versioned-hashes offset field in the envelope.
pub const VERSIONED_HASHES_OFFSET_POS: usize =
    1 + BLOB_TX_MESSAGE_OFFSET + MESSAGE_LEN_TILL_VERSIONED_HASHES;

/// Smallest envelope the peek can read.
pub const MIN_BLOB_TX_LEN: usize = VERSIONED_HASHES_OFFSET_POS + 4;

const HASH_LEN: usize = VersionedHash::LEN;

/// Read the versioned hashes out of an opaque blob transaction.
pub fn peek_blob_versioned_hashes(tx: &[u8]) -> Result<Vec<VersionedHash>, TxError> {
    if tx.len() < MIN_BLOB_TX_LEN {
        return Err(TxError::TooShort {
            len: tx.len(),
            min: MIN_BLOB_TX_LEN,
        });
    }
    if tx[0] != BLOB_TX_TYPE {
        return Err(TxError::NotBlobTx(tx[0]));
    }
    let message_offset = read_u32(tx, 1);
    if message_offset as usize != BLOB_TX_MESSAGE_OFFSET {
        return Err(TxError::BadMessageOffset {
            got: message_offset,
            expected: BLOB_TX_MESSAGE_OFFSET as u32,
        });
    }

    let start = 1 + BLOB_TX_MESSAGE_OFFSET as u64
        + u64::from(read_u32(tx, VERSIONED_HASHES_OFFSET_POS));
    let len = tx.len() as u64;
    if start > len || (len - start) % HASH_LEN as u64 != 0 {
        return Err(TxError::BadVersionedHashesRegion {
            start,
            len: tx.len(),
        });
    }

    Ok(tx[start as usize..]
        .chunks_exact(HASH_LEN)
        .map(|chunk| {
            let mut out = [0u8; HASH_LEN];
            out.copy_from_slice(chunk);
            VersionedHash(out)
        })
        .collect())
}

fn read_u32(bytes: &[u8], pos: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[pos..pos + 4]);
    u32::from_le_bytes(raw)
}

/// Check the versioned hashes of every blob transaction, in order, against
/// the block's commitments.
///
/// Transactions whose first byte is not the blob type tag are skipped.
pub fn bind_versioned_hashes<H, T>(
    h: &H,
    transactions: &[T],
    commitments: &[KzgCommitment],
) -> Result<(), BindError>
where
    H: HashFn + ?Sized,
    T: AsRef<[u8]>,
{
    let mut hashes = Vec::new();
    for (index, tx) in transactions.iter().enumerate() {
        let tx = tx.as_ref();
        if tx.first() != Some(&BLOB_TX_TYPE) {
            continue;
        }
        let found = peek_blob_versioned_hashes(tx).map_err(|source| {
            tracing::warn!("Cannot peek versioned hashes of tx {}: {}", index, source);
            BindError::MalformedTransaction { index, source }
        })?;
        hashes.extend(found);
    }

    if hashes.len() != commitments.len() {
        tracing::warn!(
            "Got {} versioned hashes but {} commitments",
            hashes.len(),
            commitments.len()
        );
        return Err(BindError::CountMismatch {
            hashes: hashes.len(),
            commitments: commitments.len(),
        });
    }

    for (index, (expected, commitment)) in hashes.iter().zip(commitments).enumerate() {
        let got = commitment.versioned_hash(h);
        if got != *expected {
            tracing::warn!("Versioned hash mismatch at entry {}", index);
            return Err(BindError::HashMismatch {
                index,
                expected: *expected,
                got,
            });
        }
    }

    tracing::debug!("Bound {} blob commitments", commitments.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_ssz_core::Sha256Hasher;

    /// A minimal envelope carrying `hashes`, laid out the way the peek reads it.
    fn blob_tx(hashes: &[VersionedHash]) -> Vec<u8> {
        let mut tx = vec![0u8; MIN_BLOB_TX_LEN];
        tx[0] = BLOB_TX_TYPE;
        tx[1..5].copy_from_slice(&(BLOB_TX_MESSAGE_OFFSET as u32).to_le_bytes());
        let rel = (MIN_BLOB_TX_LEN - 1 - BLOB_TX_MESSAGE_OFFSET) as u32;
        tx[VERSIONED_HASHES_OFFSET_POS..MIN_BLOB_TX_LEN].copy_from_slice(&rel.to_le_bytes());
        for hash in hashes {
            tx.extend_from_slice(&hash.0);
        }
        tx
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(BLOB_TX_MESSAGE_OFFSET, 69);
        assert_eq!(VERSIONED_HASHES_OFFSET_POS, 258);
        assert_eq!(MIN_BLOB_TX_LEN, 262);
    }

    #[test]
    fn test_peek() {
        let hashes = [VersionedHash([1; 32]), VersionedHash([2; 32])];
        let tx = blob_tx(&hashes);
        assert_eq!(peek_blob_versioned_hashes(&tx).unwrap(), hashes.to_vec());
        assert!(peek_blob_versioned_hashes(&blob_tx(&[])).unwrap().is_empty());
    }

    #[test]
    fn test_peek_rejections() {
        assert_eq!(
            peek_blob_versioned_hashes(&[BLOB_TX_TYPE; 10]),
            Err(TxError::TooShort { len: 10, min: 262 })
        );

        let mut tx = blob_tx(&[]);
        tx[0] = 0x02;
        assert_eq!(peek_blob_versioned_hashes(&tx), Err(TxError::NotBlobTx(0x02)));

        let mut tx = blob_tx(&[]);
        tx[1] = 70;
        assert_eq!(
            peek_blob_versioned_hashes(&tx),
            Err(TxError::BadMessageOffset {
                got: 70,
                expected: 69
            })
        );

        let mut tx = blob_tx(&[VersionedHash([1; 32])]);
        tx.push(0);
        assert!(matches!(
            peek_blob_versioned_hashes(&tx),
            Err(TxError::BadVersionedHashesRegion { start: 262, .. })
        ));

        let mut tx = blob_tx(&[]);
        tx[VERSIONED_HASHES_OFFSET_POS] = 0xff;
        assert!(matches!(
            peek_blob_versioned_hashes(&tx),
            Err(TxError::BadVersionedHashesRegion { .. })
        ));
    }

    #[test]
    fn test_bind() {
        let h = Sha256Hasher;
        let c0 = KzgCommitment([0xc0; 48]);
        let c1 = KzgCommitment([0xc1; 48]);
        let h0 = c0.versioned_hash(&h);
        let h1 = c1.versioned_hash(&h);
        let txs = vec![vec![0x02, 0xff], blob_tx(&[h0, h1]), vec![]];

        bind_versioned_hashes(&h, &txs, &[c0, c1]).unwrap();

        assert_eq!(
            bind_versioned_hashes(&h, &txs, &[c1, c0]),
            Err(BindError::HashMismatch {
                index: 0,
                expected: h0,
                got: h1
            })
        );
        assert_eq!(
            bind_versioned_hashes(&h, &txs, &[c0]),
            Err(BindError::CountMismatch {
                hashes: 2,
                commitments: 1
            })
        );
    }

    #[test]
    fn test_bind_reports_malformed_index() {
        let h = Sha256Hasher;
        let txs = vec![vec![0x02], vec![BLOB_TX_TYPE, 0, 0]];
        assert!(matches!(
            bind_versioned_hashes(&h, &txs, &[]),
            Err(BindError::MalformedTransaction {
                index: 1,
                source: TxError::TooShort { .. }
            })
        ));
    }
}
