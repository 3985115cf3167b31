//! Bit-serial CRC-16 checksum engine.

use crate::digester::Digester;
use crate::text;

/// The CRC-16/CCITT polynomial applied on each carried-out high-order bit.
const POLYNOMIAL: u16 = 0x1021;

/// Accumulates a 16-bit cyclic redundancy checksum over a byte stream.
///
/// The register starts at zero and folds in each byte with the bit-serial recurrence, so the
/// checksum of a sequence is the same whether it is fed in one call or split across several.
/// An instance is meant for single-owner sequential use; share it across threads only behind
/// external locking.
///
/// # Examples
///
/// ```rust
/// use uuid1::Crc16;
///
/// let mut crc = Crc16::new();
/// crc.update(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0]);
/// assert_eq!(crc.value(), 27649);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Crc16 {
    register: u16,
}

impl Crc16 {
    /// Creates an engine with a zeroed register.
    pub const fn new() -> Self {
        Self { register: 0 }
    }

    /// Sets the running register back to zero.
    pub fn reset(&mut self) {
        self.register = 0;
    }

    /// Folds the given bytes into the running register.
    ///
    /// An empty slice leaves the register unchanged.
    pub fn update(&mut self, buffer: &[u8]) {
        for byte in buffer {
            self.register ^= (*byte as u16) << 8;
            for _ in 0..8 {
                if self.register & 0x8000 != 0 {
                    self.register = (self.register << 1) ^ POLYNOMIAL;
                } else {
                    self.register <<= 1;
                }
            }
        }
    }

    /// Returns the current register value without altering it.
    pub const fn value(&self) -> u16 {
        self.register
    }

    /// Returns the current register value as a hexadecimal string.
    ///
    /// Uses the shared formatting convention of [`text::to_hex`], which drops leading
    /// zero-valued bytes.
    pub fn digest(&self) -> String {
        text::to_hex(&self.register.to_be_bytes())
    }
}

impl Digester for Crc16 {
    fn reset(&mut self) {
        Crc16::reset(self);
    }

    fn update(&mut self, buffer: &[u8]) {
        Crc16::update(self, buffer);
    }

    fn digest(&mut self) -> String {
        Crc16::digest(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Crc16;

    const BUFFER: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0];
    const CRC: u16 = 27649;
    const HASH: &str = "6c01";

    /// Matches the known checksum vector
    #[test]
    fn matches_the_known_checksum_vector() {
        let mut crc = Crc16::new();
        crc.update(&BUFFER);
        assert_eq!(crc.value(), CRC);
        assert_eq!(crc.digest(), HASH);
    }

    /// Accumulates across multiple update calls
    #[test]
    fn accumulates_across_multiple_update_calls() {
        let mut crc = Crc16::new();
        crc.update(&BUFFER[..3]);
        crc.update(&[]);
        crc.update(&BUFFER[3..]);
        assert_eq!(crc.value(), CRC);
    }

    /// Returns to zero on reset
    #[test]
    fn returns_to_zero_on_reset() {
        let mut crc = Crc16::new();
        assert_eq!(crc.value(), 0);
        crc.update(&BUFFER);
        crc.reset();
        assert_eq!(crc.value(), 0);
        crc.reset();
        assert_eq!(crc.value(), 0);
        // the register behaves as if freshly constructed
        crc.update(&BUFFER);
        assert_eq!(crc.value(), CRC);
    }

    /// Reads value and digest non-destructively
    #[test]
    fn reads_value_and_digest_non_destructively() {
        let mut crc = Crc16::new();
        crc.update(&BUFFER);
        assert_eq!(crc.value(), crc.value());
        assert_eq!(crc.digest(), crc.digest());
        assert_eq!(crc.value(), CRC);
    }

    /// Formats small register values with the shared hex convention
    #[test]
    fn formats_small_register_values_with_the_shared_hex_convention() {
        let crc = Crc16::new();
        // all-zero register renders as an empty string under the shared formatter
        assert_eq!(crc.digest(), "");

        let mut crc = Crc16::new();
        crc.update(&BUFFER[..4]);
        // 0x0d03: the zero-valued high nibble of the leading byte is dropped
        assert_eq!(crc.value(), 0x0d03);
        assert_eq!(crc.digest(), "d03");
    }
}
