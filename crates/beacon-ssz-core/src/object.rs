//! Typed values.
//!
//! [`SszType`] connects a Rust type to the shape engine: a type names its
//! [`Shape`] and converts to and from a [`Value`], and gets encoding,
//! decoding, roots and proofs for free. Shapes that depend on runtime
//! constants (list limits, blob sizes) read them from `Context`.

use crate::codec;
use crate::crypto::HashFn;
use crate::error::{DecodeError, ProofError, ShapeError, SszError};
use crate::gindex::Gindex;
use crate::merkle;
use crate::proof;
use crate::shape::{BasicKind, Shape};
use crate::types::Root;
use crate::value::Value;

/// The capability set of an SSZ type.
pub trait SszType: Sized {
    /// Constants the shape depends on. `()` for types with a fixed shape.
    type Context: ?Sized;

    fn shape(ctx: &Self::Context) -> Result<Shape, ShapeError>;

    fn to_value(&self) -> Value;

    fn from_value(value: Value, ctx: &Self::Context) -> Result<Self, DecodeError>;

    fn to_ssz_bytes(&self, ctx: &Self::Context) -> Result<Vec<u8>, SszError> {
        codec::encode(&Self::shape(ctx)?, &self.to_value())
    }

    fn from_ssz_bytes(bytes: &[u8], ctx: &Self::Context) -> Result<Self, DecodeError> {
        let shape = Self::shape(ctx)?;
        Self::from_value(codec::decode(&shape, bytes)?, ctx)
    }

    fn byte_length(&self, ctx: &Self::Context) -> Result<usize, SszError> {
        codec::encoded_len(&Self::shape(ctx)?, &self.to_value())
    }

    /// Encoded size when constant for this type, `None` otherwise.
    fn fixed_length(ctx: &Self::Context) -> Result<Option<usize>, ShapeError> {
        Ok(Self::shape(ctx)?.fixed_len())
    }

    fn hash_tree_root<H: HashFn + ?Sized>(
        &self,
        h: &H,
        ctx: &Self::Context,
    ) -> Result<Root, SszError> {
        merkle::hash_tree_root(h, &Self::shape(ctx)?, &self.to_value())
    }

    fn hash_tree_proof<H: HashFn + ?Sized>(
        &self,
        h: &H,
        ctx: &Self::Context,
        gindex: Gindex,
    ) -> Result<Vec<Root>, ProofError> {
        proof::prove(h, &Self::shape(ctx)?, &self.to_value(), gindex)
    }

    /// Pair this value with its context so it can stand as a [`Merkleized`].
    fn bind<'a>(&'a self, ctx: &'a Self::Context) -> Bound<'a, Self> {
        Bound { value: self, ctx }
    }
}

/// Anything with a root and proofs against it.
///
/// Implemented by [`Bound`] values and by hand-built trees whose leaves are
/// not all plain values.
pub trait Merkleized {
    fn hash_tree_root<H: HashFn + ?Sized>(&self, h: &H) -> Result<Root, SszError>;

    fn hash_tree_proof<H: HashFn + ?Sized>(
        &self,
        h: &H,
        gindex: Gindex,
    ) -> Result<Vec<Root>, ProofError>;
}

/// A typed value together with its context.
pub struct Bound<'a, T: SszType> {
    value: &'a T,
    ctx: &'a T::Context,
}

impl<T: SszType> Bound<'_, T> {
    pub fn value(&self) -> &T {
        self.value
    }
}

impl<T: SszType> Merkleized for Bound<'_, T> {
    fn hash_tree_root<H: HashFn + ?Sized>(&self, h: &H) -> Result<Root, SszError> {
        self.value.hash_tree_root(h, self.ctx)
    }

    fn hash_tree_proof<H: HashFn + ?Sized>(
        &self,
        h: &H,
        gindex: Gindex,
    ) -> Result<Vec<Root>, ProofError> {
        self.value.hash_tree_proof(h, self.ctx, gindex)
    }
}

macro_rules! impl_ssz_uint {
    ($($ty:ty => $kind:ident, $into:ident;)*) => {$(
        impl SszType for $ty {
            type Context = ();

            fn shape(_: &()) -> Result<Shape, ShapeError> {
                Ok(Shape::basic(BasicKind::$kind))
            }

            fn to_value(&self) -> Value {
                Value::$kind(*self)
            }

            fn from_value(value: Value, _: &()) -> Result<Self, DecodeError> {
                value.$into()
            }
        }
    )*};
}

impl_ssz_uint! {
    u8 => U8, into_u8;
    u16 => U16, into_u16;
    u32 => U32, into_u32;
    u64 => U64, into_u64;
}

impl SszType for bool {
    type Context = ();

    fn shape(_: &()) -> Result<Shape, ShapeError> {
        Ok(Shape::basic(BasicKind::Bool))
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value, _: &()) -> Result<Self, DecodeError> {
        value.into_bool()
    }
}

impl SszType for Root {
    type Context = ();

    fn shape(_: &()) -> Result<Shape, ShapeError> {
        Ok(Shape::bytes32())
    }

    fn to_value(&self) -> Value {
        Value::Bytes(self.0.to_vec())
    }

    fn from_value(value: Value, _: &()) -> Result<Self, DecodeError> {
        value.into_byte_array().map(Root)
    }
}
