use std::{fmt, str};

/// Represents a Universally Unique IDentifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID from the most significant and least significant 64-bit halves.
    pub const fn from_u64_pair(hi: u64, lo: u64) -> Self {
        Self((((hi as u128) << 64) | lo as u128).to_be_bytes())
    }

    /// Returns the most significant and least significant 64-bit halves.
    pub const fn as_u64_pair(&self) -> (u64, u64) {
        let n = u128::from_be_bytes(self.0);
        ((n >> 64) as u64, n as u64)
    }

    /// Reports the variant field value of the UUID.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0b0000..=0b0111 => Variant::Var0,
            0b1000..=0b1011 => Variant::Var10,
            0b1100..=0b1101 => Variant::Var110,
            0b1110..=0b1111 => Variant::VarReserved,
            _ => unreachable!(),
        }
    }

    /// Returns the version field value of the UUID, or `None` if the UUID does not have the
    /// variant field value of `0b10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }
}

/// The reserved UUID variants.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Variant {
    /// The variant `0` (NCS), i.e., `0b0xxx`.
    Var0,
    /// The variant `10` (RFC 4122), i.e., `0b10xx`.
    Var10,
    /// The variant `110` (Microsoft), i.e., `0b110x`.
    Var110,
    /// The variant `111` reserved for future definitions, i.e., `0b111x`.
    VarReserved,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let mut buffer = [0u8; 36];
        let mut buffer_iter = buffer.iter_mut();
        for i in 0..16 {
            let e = self.0[i] as usize;
            *buffer_iter.next().unwrap() = DIGITS[e >> 4];
            *buffer_iter.next().unwrap() = DIGITS[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buffer_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        f.write_str(unsafe { str::from_utf8_unchecked(&buffer) })
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid string representation")]
pub struct ParseError {}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.to_string())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{Uuid, Variant};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u64, u64), &'static str)] {
        &[
            ((0, 0), "00000000-0000-0000-0000-000000000000"),
            (
                (u64::MAX, u64::MAX),
                "ffffffff-ffff-ffff-ffff-ffffffffffff",
            ),
            (
                (0x1122_3344_5566_7788, 0x99aa_bbcc_ddee_ff00),
                "11223344-5566-7788-99aa-bbccddeeff00",
            ),
            (
                (0xdcf0_f4f1_e38c_11ed, 0x8c93_c845_c0cd_1f6e),
                "dcf0f4f1-e38c-11ed-8c93-c845c0cd1f6e",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (fs, text) in prepare_cases() {
            let from_pair = Uuid::from_u64_pair(fs.0, fs.1);
            assert_eq!(Ok(from_pair), text.parse());
            assert_eq!(Ok(from_pair), text.to_uppercase().parse());
            assert_eq!(&from_pair.to_string(), text);
        }
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " dcf0f4f1-e38c-11ed-8c93-c845c0cd1f6e",
            "dcf0f4f1-e38c-11ed-8c93-c845c0cd1f6e ",
            " dcf0f4f1-e38c-11ed-8c93-c845c0cd1f6e ",
            "+dcf0f4f1-e38c-11ed-8c93-c845c0cd1f6e",
            "-dcf0f4f1-e38c-11ed-8c93-c845c0cd1f6e",
            "+cf0f4f1-e38c-11ed-8c93-c845c0cd1f6e",
            "-cf0f4f1-e38c-11ed-8c93-c845c0cd1f6e",
            "dcf0f4f1e38c11ed8c93c845c0cd1f6e",
            "dcf0f4f1-e38c11ed-8c93-c845c0cd1f6e",
            "{dcf0f4f1-e38c-11ed-8c93-c845c0cd1f6e}",
            "dcf0f4f1-e38c-11 d-8c93-c845c0cd1f6e",
            "dcf0g4f1-e38c-11ed-8c93-c845c0cd1f6e",
            "dcf0f4f1-e38c-11ed-8c93_c845c0cd1f6e",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err());
        }
    }

    /// Reports variant and version fields
    #[test]
    fn reports_variant_and_version_fields() {
        let v1 = "dcf0f4f1-e38c-11ed-8c93-c845c0cd1f6e".parse::<Uuid>().unwrap();
        assert_eq!(v1.variant(), Variant::Var10);
        assert_eq!(v1.version(), Some(1));

        let v4 = "2ca4b2ce-6c13-40d4-bccf-37d222820f6f".parse::<Uuid>().unwrap();
        assert_eq!(v4.variant(), Variant::Var10);
        assert_eq!(v4.version(), Some(4));

        assert_eq!(Uuid::NIL.variant(), Variant::Var0);
        assert_eq!(Uuid::NIL.version(), None);
        assert_eq!(Uuid::MAX.variant(), Variant::VarReserved);
        assert_eq!(Uuid::MAX.version(), None);
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_u64_pair(fs.0, fs.1);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(e.as_u64_pair(), *fs);
            assert_eq!(e.to_string().parse(), Ok(e));
            assert_eq!(e.to_string().to_uppercase().parse(), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);

            #[cfg(feature = "uuid")]
            assert_eq!(uuid::Uuid::from(e).as_bytes(), &<[u8; 16]>::from(e));
            #[cfg(feature = "uuid")]
            assert_eq!(uuid::Uuid::from(e).as_u128(), u128::from(e));
        }
    }
}
