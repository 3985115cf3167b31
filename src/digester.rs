//! Hash and checksum digesting behind a common dispatch interface.

use std::fmt;

use digest::DynDigest;

use crate::crc16::Crc16;
use crate::text;

/// The named digest algorithms the dispatch supports.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Algorithm {
    /// Bit-serial 16-bit cyclic redundancy check.
    Crc16,
    /// MD5 message digest.
    Md5,
    /// SHA-1.
    Sha1,
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
    /// SHA3-224.
    Sha3_224,
    /// SHA3-256.
    Sha3_256,
    /// SHA3-384.
    Sha3_384,
    /// SHA3-512.
    Sha3_512,
}

impl Algorithm {
    /// Returns the conventional name of the algorithm.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Crc16 => "CRC16",
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha3_224 => "SHA3-224",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
        }
    }

    /// Creates the digester appropriate for the algorithm.
    ///
    /// [`Algorithm::Crc16`] routes to the [`Crc16`] engine; every other algorithm routes to a
    /// [`HashDigester`] backed by the matching hash provider.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::digester::{Algorithm, Digester};
    ///
    /// let mut digester = Algorithm::Crc16.digester();
    /// digester.update(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0]);
    /// assert_eq!(digester.digest(), "6c01");
    /// ```
    pub fn digester(self) -> Box<dyn Digester> {
        tracing::debug!(algorithm = self.name(), "preparing digester");
        match self {
            Self::Crc16 => Box::new(Crc16::new()),
            other => Box::new(HashDigester {
                inner: new_hasher(other),
            }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error selecting an algorithm that the requested digester kind cannot serve.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum DigesterError {
    /// The algorithm is a checksum, not a hash, and carries no hash provider.
    #[error("algorithm {0} is not backed by a hash provider")]
    NotHashBacked(Algorithm),
}

/// The incremental digesting contract shared by every algorithm.
pub trait Digester {
    /// Restarts the digest computation.
    fn reset(&mut self);

    /// Accumulates a chunk of the input.
    fn update(&mut self, buffer: &[u8]);

    /// Finishes the computation and returns the result as a hexadecimal string.
    ///
    /// The result is formatted with [`text::to_hex`], so leading zero-valued bytes are dropped.
    fn digest(&mut self) -> String;
}

/// Maps a hash algorithm to its provider.
fn new_hasher(algorithm: Algorithm) -> Box<dyn DynDigest> {
    match algorithm {
        Algorithm::Crc16 => unreachable!("CRC16 is dispatched to the dedicated engine"),
        Algorithm::Md5 => Box::new(md5::Md5::default()),
        Algorithm::Sha1 => Box::new(sha1::Sha1::default()),
        Algorithm::Sha224 => Box::new(sha2::Sha224::default()),
        Algorithm::Sha256 => Box::new(sha2::Sha256::default()),
        Algorithm::Sha384 => Box::new(sha2::Sha384::default()),
        Algorithm::Sha512 => Box::new(sha2::Sha512::default()),
        Algorithm::Sha3_224 => Box::new(sha3::Sha3_224::default()),
        Algorithm::Sha3_256 => Box::new(sha3::Sha3_256::default()),
        Algorithm::Sha3_384 => Box::new(sha3::Sha3_384::default()),
        Algorithm::Sha3_512 => Box::new(sha3::Sha3_512::default()),
    }
}

/// A [`Digester`] backed by a cryptographic hash provider, with one-shot parse and verify
/// helpers on top of the incremental contract.
///
/// # Examples
///
/// ```rust
/// use uuid1::digester::{Algorithm, HashDigester};
///
/// let mut digester = HashDigester::new(Algorithm::Sha256)?;
/// let hash = digester.parse_str("abc");
/// assert!(digester.verify_str("abc", &hash));
/// # Ok::<(), uuid1::digester::DigesterError>(())
/// ```
pub struct HashDigester {
    inner: Box<dyn DynDigest>,
}

impl HashDigester {
    /// Creates a digester for the given hash algorithm.
    ///
    /// Fails for [`Algorithm::Crc16`], which is not hash-backed; use
    /// [`Algorithm::digester`] to dispatch over the full enumeration.
    pub fn new(algorithm: Algorithm) -> Result<Self, DigesterError> {
        if algorithm == Algorithm::Crc16 {
            return Err(DigesterError::NotHashBacked(algorithm));
        }
        tracing::debug!(algorithm = algorithm.name(), "preparing digester");
        Ok(Self {
            inner: new_hasher(algorithm),
        })
    }

    /// Computes the hash of the given bytes in one shot, discarding any accumulated input.
    pub fn parse(&mut self, value: &[u8]) -> String {
        self.inner.reset();
        self.inner.update(value);
        Digester::digest(self)
    }

    /// Computes the hash of the given text in one shot.
    pub fn parse_str(&mut self, value: &str) -> String {
        self.parse(value.as_bytes())
    }

    /// Checks the given bytes against a hexadecimal hash signature.
    pub fn verify(&mut self, value: &[u8], hash: &str) -> bool {
        self.parse(value) == hash
    }

    /// Checks the given text against a hexadecimal hash signature.
    pub fn verify_str(&mut self, value: &str, hash: &str) -> bool {
        self.verify(value.as_bytes(), hash)
    }
}

impl fmt::Debug for HashDigester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashDigester")
            .field("output_size", &self.inner.output_size())
            .finish()
    }
}

impl Digester for HashDigester {
    fn reset(&mut self) {
        self.inner.reset();
    }

    fn update(&mut self, buffer: &[u8]) {
        self.inner.update(buffer);
    }

    fn digest(&mut self) -> String {
        text::to_hex(&self.inner.finalize_reset())
    }
}
