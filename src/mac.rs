//! Network hardware (MAC) address value type.

use std::{fmt, str};

/// The number of octets in a MAC address.
const SIZE: usize = 6;

/// Error accessing a MAC address octet outside the valid range.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("index {index} out of the valid octet range 0..{SIZE}")]
pub struct OctetRangeError {
    index: usize,
}

/// Error parsing an invalid string representation of a MAC address.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid string representation")]
pub struct ParseMacError {}

/// Represents a six-octet network hardware address.
///
/// # Examples
///
/// ```rust
/// use uuid1::MacAddress;
///
/// let mac = "c8:45:c0:cd:1f:6e".parse::<MacAddress>()?;
/// assert_eq!(mac.octet(0)?, 0xc8);
/// assert_eq!(mac.to_string(), "c8:45:c0:cd:1f:6e");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct MacAddress([u8; SIZE]);

impl MacAddress {
    /// Creates an address from its six octets in transmission order.
    pub const fn new(octets: [u8; SIZE]) -> Self {
        Self(octets)
    }

    /// Returns a reference to the underlying octet array.
    pub const fn as_octets(&self) -> &[u8; SIZE] {
        &self.0
    }

    /// Returns the octet at the given position.
    pub fn octet(&self, index: usize) -> Result<u8, OctetRangeError> {
        self.0
            .get(index)
            .copied()
            .ok_or(OctetRangeError { index })
    }

    /// Replaces the octet at the given position.
    pub fn set_octet(&mut self, index: usize, value: u8) -> Result<(), OctetRangeError> {
        match self.0.get_mut(index) {
            Some(octet) => {
                *octet = value;
                Ok(())
            }
            None => Err(OctetRangeError { index }),
        }
    }
}

impl fmt::Display for MacAddress {
    /// Returns the colon-separated lowercase hexadecimal representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl str::FromStr for MacAddress {
    type Err = ParseMacError;

    /// Creates an object from the colon-separated hexadecimal representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseMacError = ParseMacError {};
        let mut dst = [0u8; SIZE];
        let mut parts = src.split(':');
        for e in dst.iter_mut() {
            let part = parts.next().ok_or(ERR)?;
            // from_str_radix tolerates a leading sign, so check the digits first
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ERR);
            }
            *e = u8::from_str_radix(part, 16).map_err(|_| ERR)?;
        }
        if parts.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<MacAddress> for [u8; SIZE] {
    fn from(src: MacAddress) -> Self {
        src.0
    }
}

impl From<[u8; SIZE]> for MacAddress {
    fn from(src: [u8; SIZE]) -> Self {
        Self(src)
    }
}
