//! Block headers.

use serde::{Deserialize, Serialize};

use beacon_ssz_core::{DecodeError, Field, Root, Shape, ShapeError, SszType, Value};

use crate::macros::fixed_bytes;

fixed_bytes!(
    /// A BLS signature, kept opaque.
    BlsSignature,
    96
);

/// The header of a beacon block; `body_root` commits to the whole body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BeaconBlockHeader {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: Root,
    pub state_root: Root,
    pub body_root: Root,
}

impl SszType for BeaconBlockHeader {
    type Context = ();

    fn shape(ctx: &()) -> Result<Shape, ShapeError> {
        Shape::container(vec![
            Field::new("slot", u64::shape(ctx)?),
            Field::new("proposer_index", u64::shape(ctx)?),
            Field::new("parent_root", Root::shape(ctx)?),
            Field::new("state_root", Root::shape(ctx)?),
            Field::new("body_root", Root::shape(ctx)?),
        ])
    }

    fn to_value(&self) -> Value {
        Value::Container(vec![
            self.slot.to_value(),
            self.proposer_index.to_value(),
            self.parent_root.to_value(),
            self.state_root.to_value(),
            self.body_root.to_value(),
        ])
    }

    fn from_value(value: Value, ctx: &()) -> Result<Self, DecodeError> {
        let [slot, proposer_index, parent_root, state_root, body_root] = value.into_fields()?;
        Ok(Self {
            slot: u64::from_value(slot, ctx)?,
            proposer_index: u64::from_value(proposer_index, ctx)?,
            parent_root: Root::from_value(parent_root, ctx)?,
            state_root: Root::from_value(state_root, ctx)?,
            body_root: Root::from_value(body_root, ctx)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignedBeaconBlockHeader {
    pub message: BeaconBlockHeader,
    pub signature: BlsSignature,
}

impl SszType for SignedBeaconBlockHeader {
    type Context = ();

    fn shape(ctx: &()) -> Result<Shape, ShapeError> {
        Shape::container(vec![
            Field::new("message", BeaconBlockHeader::shape(ctx)?),
            Field::new("signature", BlsSignature::shape(ctx)?),
        ])
    }

    fn to_value(&self) -> Value {
        Value::Container(vec![self.message.to_value(), self.signature.to_value()])
    }

    fn from_value(value: Value, ctx: &()) -> Result<Self, DecodeError> {
        let [message, signature] = value.into_fields()?;
        Ok(Self {
            message: BeaconBlockHeader::from_value(message, ctx)?,
            signature: BlsSignature::from_value(signature, ctx)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_ssz_core::Sha256Hasher;

    fn header() -> BeaconBlockHeader {
        BeaconBlockHeader {
            slot: 12,
            proposer_index: 4,
            parent_root: Root::from_bytes([1; 32]),
            state_root: Root::from_bytes([2; 32]),
            body_root: Root::from_bytes([3; 32]),
        }
    }

    #[test]
    fn test_header_encoding() {
        let bytes = header().to_ssz_bytes(&()).unwrap();
        assert_eq!(bytes.len(), 112);
        assert_eq!(&bytes[..8], &12u64.to_le_bytes());
        assert_eq!(BeaconBlockHeader::fixed_length(&()).unwrap(), Some(112));
        assert_eq!(BeaconBlockHeader::from_ssz_bytes(&bytes, &()).unwrap(), header());
    }

    #[test]
    fn test_signed_header_root_covers_signature() {
        let h = Sha256Hasher;
        let signed = SignedBeaconBlockHeader {
            message: header(),
            signature: BlsSignature([7; 96]),
        };
        assert_eq!(SignedBeaconBlockHeader::fixed_length(&()).unwrap(), Some(208));
        let mut other = signed.clone();
        other.signature.0[95] ^= 1;
        assert_ne!(
            signed.hash_tree_root(&h, &()).unwrap(),
            other.hash_tree_root(&h, &()).unwrap()
        );
        assert_eq!(
            signed.message.hash_tree_root(&h, &()).unwrap(),
            other.message.hash_tree_root(&h, &()).unwrap()
        );
    }

    #[test]
    fn test_header_json() {
        let json = serde_json::to_value(header()).unwrap();
        assert_eq!(json["slot"], 12);
        assert_eq!(json["body_root"], Root::from_bytes([3; 32]).to_hex());
        let mut bad = json.clone();
        bad["slot"] = serde_json::json!(-1);
        assert!(serde_json::from_value::<BeaconBlockHeader>(bad).is_err());
    }
}
