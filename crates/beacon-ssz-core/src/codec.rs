//! The offset-based binary codec.
//!
//! Fixed-size values concatenate without framing. A sequence holding
//! variable-size parts is written as a head (fixed parts in order, a 4-byte
//! little-endian offset in place of each variable part) followed by the
//! variable parts back to back. Offsets are relative to the start of the
//! enclosing encoding.
//!
//! Decoding is strict: every byte of the input is accounted for exactly once.

use crate::error::{DecodeError, SszError};
use crate::shape::{BasicKind, Shape, ShapeKind};
use crate::value::Value;

pub use crate::shape::OFFSET_LEN;

/// Encode a value against its shape.
pub fn encode(shape: &Shape, value: &Value) -> Result<Vec<u8>, SszError> {
    let mut out = Vec::new();
    encode_into(shape, value, &mut out)?;
    Ok(out)
}

/// Length of the encoding, without producing it.
pub fn encoded_len(shape: &Shape, value: &Value) -> Result<usize, SszError> {
    match (shape.kind(), value) {
        (ShapeKind::ByteList(max), Value::Bytes(bytes)) => {
            check_capacity(bytes.len(), *max)?;
            Ok(bytes.len())
        }
        (ShapeKind::Bitlist(max), Value::Bits(bits)) => {
            check_capacity(bits.len(), *max)?;
            Ok(bits.len() / 8 + 1)
        }
        (ShapeKind::Vector(elem, n), Value::Vector(items)) if !elem.is_fixed() => {
            check_len(items.len(), *n)?;
            parts_len(items.iter().map(|item| (&**elem, item)))
        }
        (ShapeKind::List(elem, max), Value::List(items)) => {
            check_capacity(items.len(), *max)?;
            parts_len(items.iter().map(|item| (&**elem, item)))
        }
        (ShapeKind::Container(fields), Value::Container(values)) if !shape.is_fixed() => {
            check_len(values.len(), fields.len())?;
            parts_len(fields.iter().map(|f| &f.shape).zip(values))
        }
        _ => match shape.fixed_len() {
            Some(len) => Ok(len),
            None => Err(mismatch(shape, value)),
        },
    }
}

fn parts_len<'a>(parts: impl Iterator<Item = (&'a Shape, &'a Value)>) -> Result<usize, SszError> {
    parts.map(|(shape, value)| part_len(shape, value)).sum()
}

fn part_len(shape: &Shape, value: &Value) -> Result<usize, SszError> {
    match shape.fixed_len() {
        Some(len) => Ok(len),
        None => Ok(OFFSET_LEN + encoded_len(shape, value)?),
    }
}

fn mismatch(shape: &Shape, value: &Value) -> SszError {
    SszError::ValueMismatch {
        expected: shape.name(),
        got: value.kind_name(),
    }
}

fn check_len(got: usize, expected: usize) -> Result<(), SszError> {
    if got != expected {
        return Err(SszError::LengthMismatch { expected, got });
    }
    Ok(())
}

fn check_capacity(len: usize, limit: u64) -> Result<(), SszError> {
    if len as u64 > limit {
        return Err(SszError::Capacity {
            len: len as u64,
            limit,
        });
    }
    Ok(())
}

fn encode_into(shape: &Shape, value: &Value, out: &mut Vec<u8>) -> Result<(), SszError> {
    match (shape.kind(), value) {
        (ShapeKind::Basic(kind), value) => encode_basic(*kind, value, out),
        (ShapeKind::ByteVector(n), Value::Bytes(bytes)) => {
            check_len(bytes.len(), *n)?;
            out.extend_from_slice(bytes);
            Ok(())
        }
        (ShapeKind::ByteList(max), Value::Bytes(bytes)) => {
            check_capacity(bytes.len(), *max)?;
            out.extend_from_slice(bytes);
            Ok(())
        }
        (ShapeKind::Bitvector(n), Value::Bits(bits)) => {
            check_len(bits.len(), *n)?;
            out.extend(bits_to_bytes(bits, false));
            Ok(())
        }
        (ShapeKind::Bitlist(max), Value::Bits(bits)) => {
            check_capacity(bits.len(), *max)?;
            out.extend(bits_to_bytes(bits, true));
            Ok(())
        }
        (ShapeKind::Vector(elem, n), Value::Vector(items)) => {
            check_len(items.len(), *n)?;
            encode_parts(items.iter().map(|item| (&**elem, item)), out)
        }
        (ShapeKind::List(elem, max), Value::List(items)) => {
            check_capacity(items.len(), *max)?;
            encode_parts(items.iter().map(|item| (&**elem, item)), out)
        }
        (ShapeKind::Container(fields), Value::Container(values)) => {
            check_len(values.len(), fields.len())?;
            encode_parts(fields.iter().map(|f| &f.shape).zip(values), out)
        }
        _ => Err(mismatch(shape, value)),
    }
}

fn encode_parts<'a>(
    parts: impl Iterator<Item = (&'a Shape, &'a Value)>,
    out: &mut Vec<u8>,
) -> Result<(), SszError> {
    let parts: Vec<_> = parts.collect();
    let head: usize = parts.iter().map(|(shape, _)| shape.head_len()).sum();
    let mut tail = Vec::new();
    for (shape, value) in parts {
        if shape.is_fixed() {
            encode_into(shape, value, out)?;
        } else {
            let offset = head + tail.len();
            let offset = u32::try_from(offset).map_err(|_| SszError::OffsetOverflow(offset))?;
            out.extend_from_slice(&offset.to_le_bytes());
            encode_into(shape, value, &mut tail)?;
        }
    }
    out.extend(tail);
    Ok(())
}

/// Append the little-endian encoding of a scalar.
pub(crate) fn encode_basic(kind: BasicKind, value: &Value, out: &mut Vec<u8>) -> Result<(), SszError> {
    match (kind, value) {
        (BasicKind::Bool, Value::Bool(b)) => out.push(u8::from(*b)),
        (BasicKind::U8, Value::U8(n)) => out.push(*n),
        (BasicKind::U16, Value::U16(n)) => out.extend_from_slice(&n.to_le_bytes()),
        (BasicKind::U32, Value::U32(n)) => out.extend_from_slice(&n.to_le_bytes()),
        (BasicKind::U64, Value::U64(n)) => out.extend_from_slice(&n.to_le_bytes()),
        (BasicKind::U128, Value::U128(n)) => out.extend_from_slice(&n.to_le_bytes()),
        (BasicKind::U256, Value::U256(bytes)) => out.extend_from_slice(bytes),
        (kind, value) => {
            return Err(SszError::ValueMismatch {
                expected: kind.name(),
                got: value.kind_name(),
            })
        }
    }
    Ok(())
}

/// Pack bits LSB first. A bitlist appends a delimiter bit after the last
/// element.
pub(crate) fn bits_to_bytes(bits: &[bool], delimit: bool) -> Vec<u8> {
    let total = bits.len() + usize::from(delimit);
    let mut out = vec![0u8; total.div_ceil(8)];
    for (i, bit) in bits.iter().enumerate() {
        if *bit {
            out[i / 8] |= 1 << (i % 8);
        }
    }
    if delimit {
        out[bits.len() / 8] |= 1 << (bits.len() % 8);
    }
    out
}

fn bytes_to_bits(bytes: &[u8], count: usize) -> Vec<bool> {
    (0..count).map(|i| (bytes[i / 8] >> (i % 8)) & 1 == 1).collect()
}

/// Decode a value of the given shape. The whole input must be consumed.
pub fn decode(shape: &Shape, bytes: &[u8]) -> Result<Value, DecodeError> {
    match shape.kind() {
        ShapeKind::Basic(kind) => {
            expect_len(kind.size(), bytes)?;
            decode_basic(*kind, bytes)
        }
        ShapeKind::ByteVector(n) => {
            expect_len(*n, bytes)?;
            Ok(Value::Bytes(bytes.to_vec()))
        }
        ShapeKind::ByteList(max) => {
            check_count(bytes.len(), *max)?;
            Ok(Value::Bytes(bytes.to_vec()))
        }
        ShapeKind::Bitvector(n) => {
            expect_len(n.div_ceil(8), bytes)?;
            let padding = bytes.len() * 8 - n;
            if padding > 0 {
                let last = bytes[bytes.len() - 1];
                if last >> (8 - padding) != 0 {
                    return Err(DecodeError::NonZeroPadding);
                }
            }
            Ok(Value::Bits(bytes_to_bits(bytes, *n)))
        }
        ShapeKind::Bitlist(max) => {
            let last = match bytes.last() {
                Some(last) if *last != 0 => *last,
                _ => return Err(DecodeError::MissingDelimiter),
            };
            let count = (bytes.len() - 1) * 8 + (7 - last.leading_zeros() as usize);
            check_count(count, *max)?;
            Ok(Value::Bits(bytes_to_bits(bytes, count)))
        }
        ShapeKind::Vector(elem, n) => {
            let items = match elem.fixed_len() {
                Some(size) => {
                    expect_len(size * n, bytes)?;
                    decode_strided(elem, size, bytes)?
                }
                None => decode_parts(&vec![&**elem; *n], bytes)?,
            };
            Ok(Value::Vector(items))
        }
        ShapeKind::List(elem, max) => Ok(Value::List(decode_list(elem, *max, bytes)?)),
        ShapeKind::Container(fields) => {
            let shapes: Vec<&Shape> = fields.iter().map(|f| &f.shape).collect();
            Ok(Value::Container(decode_parts(&shapes, bytes)?))
        }
    }
}

/// Decode a scalar from exactly `kind.size()` bytes.
pub(crate) fn decode_basic(kind: BasicKind, bytes: &[u8]) -> Result<Value, DecodeError> {
    expect_len(kind.size(), bytes)?;
    let value = match kind {
        BasicKind::Bool => match bytes[0] {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            b => return Err(DecodeError::InvalidBool(b)),
        },
        BasicKind::U8 => Value::U8(bytes[0]),
        BasicKind::U16 => Value::U16(u16::from_le_bytes([bytes[0], bytes[1]])),
        BasicKind::U32 => Value::U32(u32::from_le_bytes(read_array(bytes))),
        BasicKind::U64 => Value::U64(u64::from_le_bytes(read_array(bytes))),
        BasicKind::U128 => Value::U128(u128::from_le_bytes(read_array(bytes))),
        BasicKind::U256 => Value::U256(read_array(bytes)),
    };
    Ok(value)
}

/// Copy the first `N` bytes. Callers have checked the length.
fn read_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

fn expect_len(expected: usize, bytes: &[u8]) -> Result<(), DecodeError> {
    if bytes.len() < expected {
        return Err(DecodeError::Truncated {
            needed: expected,
            available: bytes.len(),
        });
    }
    if bytes.len() > expected {
        return Err(DecodeError::LengthMismatch {
            expected,
            got: bytes.len(),
        });
    }
    Ok(())
}

fn check_count(count: usize, limit: u64) -> Result<(), DecodeError> {
    if count as u64 > limit {
        return Err(DecodeError::TooManyElements {
            count: count as u64,
            limit,
        });
    }
    Ok(())
}

fn read_offset(bytes: &[u8], pos: usize) -> Result<usize, DecodeError> {
    let raw = bytes.get(pos..pos + OFFSET_LEN).ok_or(DecodeError::Truncated {
        needed: pos + OFFSET_LEN,
        available: bytes.len(),
    })?;
    Ok(u32::from_le_bytes(read_array(raw)) as usize)
}

fn decode_strided(elem: &Shape, size: usize, bytes: &[u8]) -> Result<Vec<Value>, DecodeError> {
    bytes.chunks_exact(size).map(|part| decode(elem, part)).collect()
}

fn decode_list(elem: &Shape, max: u64, bytes: &[u8]) -> Result<Vec<Value>, DecodeError> {
    if let Some(size) = elem.fixed_len() {
        if bytes.len() % size != 0 {
            return Err(DecodeError::StrideMismatch {
                len: bytes.len(),
                stride: size,
            });
        }
        check_count(bytes.len() / size, max)?;
        return decode_strided(elem, size, bytes);
    }

    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    // The first offset also sizes the head: one offset per element.
    let first = read_offset(bytes, 0)?;
    let count = first / OFFSET_LEN;
    if count == 0 || first % OFFSET_LEN != 0 {
        return Err(DecodeError::FirstOffsetMismatch {
            expected: count.max(1) * OFFSET_LEN,
            got: first,
        });
    }
    if first > bytes.len() {
        return Err(DecodeError::OffsetOutOfRange {
            offset: first,
            len: bytes.len(),
        });
    }
    check_count(count, max)?;
    decode_parts(&vec![elem; count], bytes)
}

fn decode_parts(shapes: &[&Shape], bytes: &[u8]) -> Result<Vec<Value>, DecodeError> {
    let head: usize = shapes.iter().map(|s| s.head_len()).sum();
    if bytes.len() < head {
        return Err(DecodeError::Truncated {
            needed: head,
            available: bytes.len(),
        });
    }

    let mut values: Vec<Option<Value>> = Vec::with_capacity(shapes.len());
    let mut variable: Vec<(usize, usize)> = Vec::new();
    let mut pos = 0;
    for shape in shapes {
        match shape.fixed_len() {
            Some(len) => {
                values.push(Some(decode(shape, &bytes[pos..pos + len])?));
                pos += len;
            }
            None => {
                variable.push((values.len(), read_offset(bytes, pos)?));
                values.push(None);
                pos += OFFSET_LEN;
            }
        }
    }

    match variable.first() {
        None if bytes.len() != head => {
            return Err(DecodeError::LengthMismatch {
                expected: head,
                got: bytes.len(),
            })
        }
        Some((_, first)) if *first != head => {
            return Err(DecodeError::FirstOffsetMismatch {
                expected: head,
                got: *first,
            })
        }
        _ => {}
    }

    let mut previous = head;
    for (i, (slot, offset)) in variable.iter().enumerate() {
        if *offset < previous {
            return Err(DecodeError::OffsetDecreasing {
                previous,
                offset: *offset,
            });
        }
        let end = variable.get(i + 1).map_or(bytes.len(), |(_, next)| *next);
        if *offset > bytes.len() || end > bytes.len() {
            return Err(DecodeError::OffsetOutOfRange {
                offset: (*offset).max(end),
                len: bytes.len(),
            });
        }
        if end < *offset {
            return Err(DecodeError::OffsetDecreasing {
                previous: *offset,
                offset: end,
            });
        }
        values[*slot] = Some(decode(shapes[*slot], &bytes[*offset..end])?);
        previous = *offset;
    }

    Ok(values.into_iter().flatten().collect())
}
