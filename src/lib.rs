//! A Rust implementation of UUID version 1 with tagged node fields, plus checksum and session
//! utilities
//!
//! ```rust
//! use uuid1::V1Generator;
//!
//! let g = V1Generator::new("node01")?;
//! let uuid = g.generate();
//! println!("{}", uuid); // e.g. "dcf0f4f1-e38c-11ed-8c93-6e6f64653031"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! # Ok::<(), uuid1::v1::InvalidNodeError>(())
//! ```
//!
//! See [RFC 4122](https://www.ietf.org/rfc/rfc4122.txt).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_low                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_hi         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|       clock_seq           |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             node                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The `time_low`, `time_mid`, and `time_hi` fields carry a 60-bit timestamp counted in
//!   100-nanosecond ticks since 1582-10-15. Each generator keeps the last used tick value in an
//!   atomic counter and forces it forward on ties, so the timestamps it embeds are strictly
//!   increasing even when the system clock stalls or steps back and even under concurrent
//!   callers.
//! - The 4-bit `ver` field is set at `0001`.
//! - The 2-bit `var` field is set at `10`.
//! - The 14-bit `clock_seq` field carries a random disambiguator drawn once per generator
//!   instance, guarding against clock regressions across restarts.
//! - The 48-bit `node` field carries a caller-supplied tag of up to six bytes in its trailing
//!   positions, with any remaining space filled with fresh random bytes. The tag identifies the
//!   generator that produced an identifier in place of a hardware address.
//!
//! # Other facilities
//!
//! The crate also bundles a handful of small application utilities around the generator: a
//! bit-serial [CRC-16 engine](Crc16) and the [hash-algorithm dispatch](digester) built over it,
//! the shared [hexadecimal text helpers](text), a typed in-memory [session registry](session),
//! and a [MAC address](MacAddress) value type.
//!
//! ```rust
//! use uuid1::{Algorithm, Digester};
//!
//! let mut digester = Algorithm::Crc16.digester();
//! digester.update(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0]);
//! assert_eq!(digester.digest(), "6c01");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod uuid;
pub use uuid::{ParseError, Uuid, Variant};

pub mod v1;
#[doc(inline)]
pub use v1::V1Generator;

mod crc16;
pub use crc16::Crc16;

pub mod digester;
#[doc(inline)]
pub use digester::{Algorithm, Digester};

pub mod session;

pub mod text;

mod mac;
pub use mac::MacAddress;
