//! Blobs and their indices.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use beacon_ssz_core::text;
use beacon_ssz_core::{DecodeError, HashFn, Root, Shape, ShapeError, SszError, SszType, Value};

use crate::macros::spec_list;
use crate::spec::Spec;

/// Position of a blob within its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobIndex(pub u64);

impl fmt::Display for BlobIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlobIndex {
    fn from(index: u64) -> Self {
        Self(index)
    }
}

impl SszType for BlobIndex {
    type Context = ();

    fn shape(_: &()) -> Result<Shape, ShapeError> {
        Ok(Shape::uint64())
    }

    fn to_value(&self) -> Value {
        Value::U64(self.0)
    }

    fn from_value(value: Value, _: &()) -> Result<Self, DecodeError> {
        value.into_u64().map(Self)
    }
}

/// One blob: `FIELD_ELEMENTS_PER_BLOB * 32` opaque bytes.
///
/// The length is only checked against a [`Spec`] when encoding, decoding or
/// Merkleizing, since the text form carries no preset.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Blob(pub Vec<u8>);

impl Blob {
    /// An all-zero blob of the preset's size.
    pub fn zeroed(spec: &Spec) -> Self {
        Self(vec![0; spec.blob_size() as usize])
    }

    pub fn to_hex(&self) -> String {
        text::encode_hex(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, beacon_ssz_core::TextError> {
        text::decode_hex(s).map(Self)
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blob({} bytes)", self.0.len())
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Blob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Blob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl SszType for Blob {
    type Context = Spec;

    fn shape(spec: &Spec) -> Result<Shape, ShapeError> {
        Shape::byte_vector(spec.blob_size() as usize)
    }

    fn to_value(&self) -> Value {
        Value::Bytes(self.0.clone())
    }

    fn from_value(value: Value, _: &Spec) -> Result<Self, DecodeError> {
        value.into_bytes().map(Self)
    }
}

spec_list!(
    /// Blobs of one block, bounded by `MAX_BLOB_COMMITMENTS_PER_BLOCK`.
    Blobs of Blob,
    |spec| limit = spec.max_blob_commitments_per_block, elem = spec
);

spec_list!(
    /// Hash-tree-roots standing in for blobs in a blinded bundle.
    BlobRoots of Root,
    |spec| limit = spec.max_blob_commitments_per_block, elem = &()
);

impl Blobs {
    /// The hash-tree-root of every blob, in order.
    pub fn roots<H: HashFn + ?Sized>(&self, h: &H, spec: &Spec) -> Result<BlobRoots, SszError> {
        self.iter().map(|blob| blob.hash_tree_root(h, spec)).collect()
    }
}
