//! Text form for fixed-size byte values.
//!
//! Output is always `0x` followed by lowercase hex. On input the prefix is
//! optional and the digit count must be exactly twice the byte length.

use thiserror::Error;

/// Errors parsing the hex text form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextError {
    #[error("expected {expected} hex characters, got {got}")]
    Length { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Encode bytes as `0x`-prefixed lowercase hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode hex text into a fixed-size array.
pub fn decode_hex_fixed<const N: usize>(s: &str) -> Result<[u8; N], TextError> {
    let digits = strip_prefix(s);
    if digits.len() != 2 * N {
        return Err(TextError::Length {
            expected: 2 * N,
            got: digits.len(),
        });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out)?;
    Ok(out)
}

/// Decode hex text of any even length.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, TextError> {
    Ok(hex::decode(strip_prefix(s))?)
}
