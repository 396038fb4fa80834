//! Opaque execution-layer transactions.

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use beacon_ssz_core::text;
use beacon_ssz_core::{DecodeError, Shape, ShapeError, SszType, Value};

use crate::macros::spec_list;
use crate::spec::{Spec, BLOB_TX_TYPE};

/// A typed transaction envelope: one type byte followed by its payload.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Transaction(pub Bytes);

impl Transaction {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// The envelope type byte, if any.
    pub fn tx_type(&self) -> Option<u8> {
        self.0.first().copied()
    }

    /// Whether this claims to be a blob transaction.
    pub fn is_blob_tx(&self) -> bool {
        self.tx_type() == Some(BLOB_TX_TYPE)
    }
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tx_type() {
            Some(t) => write!(f, "Transaction(type {:#04x}, {} bytes)", t, self.0.len()),
            None => write!(f, "Transaction(empty)"),
        }
    }
}

impl AsRef<[u8]> for Transaction {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&text::encode_hex(&self.0))
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        text::decode_hex(&s)
            .map(Self::new)
            .map_err(serde::de::Error::custom)
    }
}

impl SszType for Transaction {
    type Context = Spec;

    fn shape(spec: &Spec) -> Result<Shape, ShapeError> {
        Shape::byte_list(spec.max_bytes_per_transaction)
    }

    fn to_value(&self) -> Value {
        Value::Bytes(self.0.to_vec())
    }

    fn from_value(value: Value, _: &Spec) -> Result<Self, DecodeError> {
        value.into_bytes().map(Self::new)
    }
}

spec_list!(
    /// Transactions of an execution payload.
    Transactions of Transaction,
    |spec| limit = spec.max_transactions_per_payload, elem = spec
);
