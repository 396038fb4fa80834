//! Boilerplate for byte-array newtypes and preset-bounded lists.

/// A fixed-width byte value: hex text form, serde through the text form,
/// and an SSZ byte-vector shape.
macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Width in bytes.
            pub const LEN: usize = $len;

            pub const ZERO: Self = Self([0u8; $len]);

            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Convert to `0x`-prefixed hex.
            pub fn to_hex(&self) -> String {
                beacon_ssz_core::text::encode_hex(&self.0)
            }

            /// Parse from hex, `0x` prefix optional.
            pub fn from_hex(s: &str) -> Result<Self, beacon_ssz_core::TextError> {
                beacon_ssz_core::text::decode_hex_fixed(s).map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({}...)", stringify!($name), &self.to_hex()[..10])
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = beacon_ssz_core::TextError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }

        impl beacon_ssz_core::SszType for $name {
            type Context = ();

            fn shape(_: &()) -> Result<beacon_ssz_core::Shape, beacon_ssz_core::ShapeError> {
                beacon_ssz_core::Shape::byte_vector($len)
            }

            fn to_value(&self) -> beacon_ssz_core::Value {
                beacon_ssz_core::Value::Bytes(self.0.to_vec())
            }

            fn from_value(
                value: beacon_ssz_core::Value,
                _: &(),
            ) -> Result<Self, beacon_ssz_core::DecodeError> {
                value.into_byte_array().map(Self)
            }
        }
    };
}

/// A list newtype whose limit comes from the [`Spec`](crate::Spec).
///
/// `|spec| limit = .., elem = ..` names the limit and the element context in
/// terms of the preset.
macro_rules! spec_list {
    (
        $(#[$meta:meta])*
        $name:ident of $elem:ty,
        |$spec:ident| limit = $limit:expr, elem = $ctx:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Vec<$elem>);

        impl beacon_ssz_core::SszType for $name {
            type Context = $crate::Spec;

            fn shape($spec: &$crate::Spec) -> Result<beacon_ssz_core::Shape, beacon_ssz_core::ShapeError> {
                let elem = <$elem as beacon_ssz_core::SszType>::shape($ctx)?;
                beacon_ssz_core::Shape::list(elem, $limit)
            }

            fn to_value(&self) -> beacon_ssz_core::Value {
                beacon_ssz_core::Value::List(
                    self.0.iter().map(beacon_ssz_core::SszType::to_value).collect(),
                )
            }

            fn from_value(
                value: beacon_ssz_core::Value,
                $spec: &$crate::Spec,
            ) -> Result<Self, beacon_ssz_core::DecodeError> {
                let items = value.into_items()?;
                let limit: u64 = $limit;
                if items.len() as u64 > limit {
                    return Err(beacon_ssz_core::DecodeError::TooManyElements {
                        count: items.len() as u64,
                        limit,
                    });
                }
                items
                    .into_iter()
                    .map(|item| <$elem as beacon_ssz_core::SszType>::from_value(item, $ctx))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Self)
            }
        }

        impl std::ops::Deref for $name {
            type Target = [$elem];

            fn deref(&self) -> &[$elem] {
                &self.0
            }
        }

        impl From<Vec<$elem>> for $name {
            fn from(items: Vec<$elem>) -> Self {
                Self(items)
            }
        }

        impl FromIterator<$elem> for $name {
            fn from_iter<I: IntoIterator<Item = $elem>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }
    };
}

pub(crate) use fixed_bytes;
pub(crate) use spec_list;
