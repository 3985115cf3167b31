//! Shared text helpers for hexadecimal formatting and parsing.

use std::fmt::Write;

/// Error parsing a hexadecimal string.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid hexadecimal digit {digit:?}")]
pub struct ParseHexError {
    digit: char,
}

/// Converts a byte sequence to a lowercase hexadecimal string, dropping leading zero-valued
/// bytes.
///
/// Once a non-zero byte has been emitted, single hex digits are padded with a leading zero.
/// An input of nothing but zero bytes yields an empty string, and interior zero bytes after
/// the first non-zero byte make the output length ambiguous; both behaviors are long-standing
/// quirks that callers depend on, so they are preserved as is. Use [`to_hex_spaced`] when every
/// byte must be visible.
///
/// # Examples
///
/// ```rust
/// assert_eq!(uuid1::text::to_hex(&[0x6c, 0x01]), "6c01");
/// assert_eq!(uuid1::text::to_hex(&[0x00, 0x6c, 0x01]), "6c01");
/// assert_eq!(uuid1::text::to_hex(&[0x00, 0x00]), "");
/// ```
pub fn to_hex(value: &[u8]) -> String {
    let mut result = String::new();
    let mut can_discard_zero = true;
    for byte in value {
        if *byte == 0 && can_discard_zero {
            continue;
        }
        can_discard_zero = false;
        if *byte < 0x10 && !result.is_empty() {
            result.push('0');
        }
        let _ = write!(result, "{:x}", byte);
    }
    result
}

/// Converts a byte sequence to space-separated two-digit hexadecimal pairs.
///
/// # Examples
///
/// ```rust
/// assert_eq!(uuid1::text::to_hex_spaced(&[0x00, 0x6c, 0x01]), "00 6c 01");
/// ```
pub fn to_hex_spaced(value: &[u8]) -> String {
    let mut result = String::new();
    for byte in value {
        if !result.is_empty() {
            result.push(' ');
        }
        let _ = write!(result, "{:02x}", byte);
    }
    result
}

/// Converts a hexadecimal expression back to a byte sequence.
///
/// Spaces are ignored, and an odd number of digits gets an implied leading zero, so the output
/// of both [`to_hex`] and [`to_hex_spaced`] parses back.
///
/// # Examples
///
/// ```rust
/// assert_eq!(uuid1::text::from_hex("6c01")?, [0x6c, 0x01]);
/// assert_eq!(uuid1::text::from_hex("00 6c 01")?, [0x00, 0x6c, 0x01]);
/// assert_eq!(uuid1::text::from_hex("c01")?, [0x0c, 0x01]);
/// # Ok::<(), uuid1::text::ParseHexError>(())
/// ```
pub fn from_hex(hex: &str) -> Result<Vec<u8>, ParseHexError> {
    let mut digits = Vec::with_capacity(hex.len());
    for c in hex.chars().filter(|c| *c != ' ') {
        match c.to_digit(16) {
            Some(digit) => digits.push(digit as u8),
            None => return Err(ParseHexError { digit: c }),
        }
    }
    if digits.len() % 2 != 0 {
        digits.insert(0, 0);
    }
    Ok(digits.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}
