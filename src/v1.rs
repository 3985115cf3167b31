//! UUIDv1-related functionality

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::Uuid;

/// The maximum length in bytes of a generator node tag.
const NODE_MAX_LEN: usize = 6;

/// The gap between the UUID timestamp epoch (1582-10-15) and the Unix epoch (1970-01-01) in
/// 100-nanosecond ticks.
const EPOCH_OFFSET_TICKS: u64 = 0x01b2_1dd2_1381_4000;

/// The number of 100-nanosecond ticks per millisecond.
const TICKS_PER_MS: u64 = 10_000;

/// The tick increment used to break ties when two UUIDs are requested within the resolution of
/// the system clock.
const TICK_ADVANCE: u64 = 100;

/// Error constructing a generator from an empty or oversized node tag.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("node tag must be 1 to {NODE_MAX_LEN} bytes long, got {len}")]
pub struct InvalidNodeError {
    len: usize,
}

/// Error extracting the creation time from a UUID that is not a version 1 UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("expected a version 1 UUID, got version {found:?}")]
pub struct InvalidVersionError {
    found: Option<u8>,
}

/// Represents a UUIDv1 generator that owns a node tag and guarantees the strictly increasing
/// order of the timestamps embedded in the UUIDs it produces.
///
/// A generator is a long-lived object created once per logical owner (e.g., one per subsystem).
/// The 16-bit clock sequence is drawn from the process random number generator when the
/// generator is constructed and stays fixed for its lifetime; the last used timestamp is kept in
/// an atomic counter, so one instance can be shared across threads behind a plain [`Arc`]
/// without external locking.
///
/// # Examples
///
/// ```rust
/// use std::{sync, thread};
/// use uuid1::V1Generator;
///
/// let g = sync::Arc::new(V1Generator::new("node01")?);
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// # Ok::<(), uuid1::v1::InvalidNodeError>(())
/// ```
///
/// [`Arc`]: std::sync::Arc
#[derive(Debug)]
pub struct V1Generator {
    /// The node tag bytes occupying the trailing positions of the node field.
    node: [u8; NODE_MAX_LEN],
    node_len: usize,

    /// The clock sequence drawn once at construction.
    clock_seq: u16,

    /// The last used timestamp in 100-nanosecond ticks since the UUID epoch.
    last_ticks: AtomicU64,
}

impl V1Generator {
    /// Creates a generator instance identified by the given node tag.
    ///
    /// The tag must be one to six bytes long; it is embedded verbatim in the trailing bytes of
    /// the node field of every generated UUID, with any remaining space filled with random
    /// bytes.
    pub fn new(node: impl AsRef<[u8]>) -> Result<Self, InvalidNodeError> {
        Self::with_clock_seq(node, rand::random())
    }

    /// Creates a generator instance with an explicit clock sequence instead of a random one.
    pub fn with_clock_seq(node: impl AsRef<[u8]>, clock_seq: u16) -> Result<Self, InvalidNodeError> {
        let node = node.as_ref();
        if node.is_empty() || node.len() > NODE_MAX_LEN {
            return Err(InvalidNodeError { len: node.len() });
        }
        let mut tag = [0u8; NODE_MAX_LEN];
        tag[..node.len()].copy_from_slice(node);
        Ok(Self {
            node: tag,
            node_len: node.len(),
            clock_seq,
            last_ticks: AtomicU64::new(u64::MIN),
        })
    }

    /// Returns the node tag the generator was created with.
    pub fn node(&self) -> &[u8] {
        &self.node[..self.node_len]
    }

    /// Returns the clock sequence of the generator.
    pub const fn clock_seq(&self) -> u16 {
        self.clock_seq
    }

    /// Generates a new UUIDv1 object.
    pub fn generate(&self) -> Uuid {
        let ticks = self.advance_ticks(current_ticks());
        Uuid::from_u64_pair(time_fields(ticks), self.clock_seq_and_node())
    }

    /// Claims a timestamp strictly greater than any claimed before on this instance.
    ///
    /// The wall-clock candidate wins only when it is ahead of the stored value; otherwise the
    /// stored value is pushed forward by a fixed increment. The compare-and-exchange loop makes
    /// sure concurrent callers never share a tick.
    fn advance_ticks(&self, candidate: u64) -> u64 {
        let mut last = self.last_ticks.load(Ordering::Relaxed);
        loop {
            let next = if candidate > last {
                candidate
            } else {
                last + TICK_ADVANCE
            };
            match self
                .last_ticks
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(observed) => last = observed,
            }
        }
    }

    /// Assembles the least significant half: the clock sequence, random filler bytes, and the
    /// node tag in the trailing positions, with the variant bits `10` on top.
    fn clock_seq_and_node(&self) -> u64 {
        let mut buffer: [u8; 8] = rand::random();
        buffer[..2].copy_from_slice(&self.clock_seq.to_be_bytes());
        buffer[8 - self.node_len..].copy_from_slice(self.node());
        ((u64::from_be_bytes(buffer) << 2) >> 2) | (0b10 << 62)
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv1 object for each call
/// of `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid1::V1Generator;
///
/// V1Generator::new("node01")?
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// # Ok::<(), uuid1::v1::InvalidNodeError>(())
/// ```
impl Iterator for V1Generator {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl std::iter::FusedIterator for V1Generator {}

/// Recovers the creation time embedded in a version 1 UUID.
///
/// Values whose timestamps fall before the Unix epoch are representable and decode to a
/// [`SystemTime`] earlier than [`UNIX_EPOCH`].
///
/// # Examples
///
/// ```rust
/// use uuid1::{v1, V1Generator};
///
/// let g = V1Generator::new("node01")?;
/// let t = v1::creation_time(g.generate())?;
/// println!("{:?}", t);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn creation_time(uuid: Uuid) -> Result<SystemTime, InvalidVersionError> {
    if uuid.version() != Some(1) {
        return Err(InvalidVersionError {
            found: uuid.version(),
        });
    }
    let unix_ms = (timestamp_ticks(uuid) as i64 - EPOCH_OFFSET_TICKS as i64) / TICKS_PER_MS as i64;
    if unix_ms >= 0 {
        Ok(UNIX_EPOCH + Duration::from_millis(unix_ms as u64))
    } else {
        Ok(UNIX_EPOCH - Duration::from_millis(unix_ms.unsigned_abs()))
    }
}

/// Reads the current time as 100-nanosecond ticks since the UUID epoch.
fn current_ticks() -> u64 {
    let unix_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock may have gone backward")
        .as_millis() as u64;
    unix_ms * TICKS_PER_MS + EPOCH_OFFSET_TICKS
}

/// Lays out a 60-bit tick count as the `time_low`, `time_mid`, and versioned `time_hi` fields.
fn time_fields(ticks: u64) -> u64 {
    let time_low = ticks as u32;
    // swap the 16-bit halves of the high word per RFC 4122 field order
    let time_high = ((ticks >> 32) as u32).rotate_left(16);
    let mid_hi = (time_high & !0xf000) | 0x1000;
    ((time_low as u64) << 32) | mid_hi as u64
}

/// Reassembles the 60-bit tick count from the timestamp fields of a UUID.
fn timestamp_ticks(uuid: Uuid) -> u64 {
    let bytes = uuid.as_bytes();
    let time_low = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as u64;
    let time_mid = u16::from_be_bytes([bytes[4], bytes[5]]) as u64;
    let time_hi = (u16::from_be_bytes([bytes[6], bytes[7]]) & 0x0fff) as u64;
    (time_hi << 48) | (time_mid << 32) | time_low
}

#[cfg(test)]
mod tests {
    use super::{creation_time, timestamp_ticks, V1Generator, EPOCH_OFFSET_TICKS, TICKS_PER_MS};
    use crate::{Uuid, Variant};
    use std::time::{SystemTime, UNIX_EPOCH};

    const N_SAMPLES: usize = 100_000;

    fn collect_samples() -> Vec<Uuid> {
        let g = V1Generator::new("node01").unwrap();
        (0..N_SAMPLES).map(|_| g.generate()).collect()
    }

    /// Rejects empty and oversized node tags
    #[test]
    fn rejects_empty_and_oversized_node_tags() {
        assert!(V1Generator::new("").is_err());
        assert!(V1Generator::new("exactly").is_err());
        assert!(V1Generator::new([0u8; 7]).is_err());
        for len in 1..=6 {
            assert!(V1Generator::new(&b"abcdef"[..len]).is_ok());
        }
    }

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-1[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        let g = V1Generator::new("node01").unwrap();
        for _ in 0..10_000 {
            assert!(re.is_match(&g.generate().to_string()));
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        let g = V1Generator::new("node01").unwrap();
        for _ in 0..1_000 {
            let e = g.generate();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(1));
        }
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        let samples = collect_samples();
        let s: HashSet<&Uuid> = samples.iter().collect();
        assert_eq!(s.len(), N_SAMPLES);
    }

    /// Embeds strictly increasing timestamps even within the same millisecond
    #[test]
    fn embeds_strictly_increasing_timestamps_even_within_the_same_millisecond() {
        let samples = collect_samples();
        let mut prev = timestamp_ticks(samples[0]);
        for e in &samples[1..] {
            let curr = timestamp_ticks(*e);
            assert!(prev < curr);
            prev = curr;
        }
    }

    /// Embeds node tag and clock sequence
    #[test]
    fn embeds_node_tag_and_clock_seq() {
        let g = V1Generator::with_clock_seq("abc", 0x1234).unwrap();
        assert_eq!(g.node(), b"abc");
        assert_eq!(g.clock_seq(), 0x1234);
        for _ in 0..1_000 {
            let bytes = *g.generate().as_bytes();
            // top two bits of 0x12 are replaced by the variant pattern
            assert_eq!(bytes[8], 0x92);
            assert_eq!(bytes[9], 0x34);
            assert_eq!(&bytes[13..], b"abc");
        }
    }

    /// Encodes up-to-date timestamp
    ///
    /// A fresh generator per probe: a hot loop on one instance outpaces the clock on purpose
    /// (the tie-break pushes the counter 100 ticks per call), which is covered separately.
    #[test]
    fn encodes_up_to_date_timestamp() {
        for _ in 0..1_000 {
            let g = V1Generator::new("node01").unwrap();
            let ts_now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock may have gone backward")
                .as_millis() as i64;
            let e = g.generate();
            let ticks = timestamp_ticks(e);
            let ts_embedded = (ticks as i64 - EPOCH_OFFSET_TICKS as i64) / TICKS_PER_MS as i64;
            assert!((ts_now - ts_embedded).abs() < 16);

            let decoded = creation_time(e)
                .unwrap()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_millis() as i64;
            assert_eq!(decoded, ts_embedded);
        }
    }

    /// Forces the counter past a stalled or rewound clock
    #[test]
    fn forces_the_counter_past_a_stalled_or_rewound_clock() {
        let g = V1Generator::with_clock_seq("abc", 0).unwrap();
        assert_eq!(g.advance_ticks(5_000_000), 5_000_000);
        // equal candidate: the tie is broken by the fixed increment
        assert_eq!(g.advance_ticks(5_000_000), 5_000_000 + super::TICK_ADVANCE);
        // candidate behind the stored value: still strictly increasing
        assert_eq!(
            g.advance_ticks(4_000_000),
            5_000_000 + 2 * super::TICK_ADVANCE
        );
        // the clock caught up: wall time wins again
        assert_eq!(g.advance_ticks(6_000_000), 6_000_000);
    }

    /// Returns error to non version 1 inputs
    #[test]
    fn returns_error_to_non_version_1_inputs() {
        // version 4 value
        let mut bytes: [u8; 16] = rand::random();
        bytes[6] = 0x40 | (bytes[6] >> 4);
        bytes[8] = 0x80 | (bytes[8] >> 2);
        assert!(creation_time(Uuid::from(bytes)).is_err());

        assert!(creation_time(Uuid::NIL).is_err());
        assert!(creation_time(Uuid::MAX).is_err());
    }

    /// Decodes a known timestamp
    #[test]
    fn decodes_a_known_timestamp() {
        // 2023-09-24T02:42:12.677Z
        let unix_ms = 1_695_523_332_677u64;
        let ticks = unix_ms * TICKS_PER_MS + EPOCH_OFFSET_TICKS;
        let hi = super::time_fields(ticks);
        let e = Uuid::from_u64_pair(hi, 0x8c93_6356_700e_abe2);
        assert_eq!(e.version(), Some(1));
        assert_eq!(
            creation_time(e).unwrap(),
            UNIX_EPOCH + std::time::Duration::from_millis(unix_ms)
        );
    }

    /// Generates no identifiers sharing a timestamp under multithreading
    #[test]
    fn generates_no_identifiers_sharing_a_timestamp_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync, sync::mpsc, thread};

        let g = sync::Arc::new(V1Generator::new("node01")?);
        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            let g = sync::Arc::clone(&g);
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(g.generate()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert(timestamp_ticks(e));
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }
}
