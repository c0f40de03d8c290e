//! Nonce generation for request signing.
//!
//! The API expects the wall-clock nonce format of its reference client: the
//! integer Unix seconds followed by the eight fractional-second digits of a
//! microsecond clock (six microsecond digits and two trailing zeros). Values
//! grow with time, so the server can reject replays, but they are neither
//! random nor safe against clock rollback.

use chrono::{DateTime, Utc};

/// Source of per-request nonces.
///
/// The client holds one behind an `Arc`, so implementations must be shareable
/// across tasks.
pub trait NonceSource: Send + Sync {
    /// Returns the nonce for the next request.
    fn nonce(&self) -> String;
}

/// Nonces derived from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl NonceSource for SystemClock {
    fn nonce(&self) -> String {
        nonce_at(Utc::now())
    }
}

/// Formats a nonce from a Unix timestamp split into seconds and microseconds.
///
/// # Examples
///
/// ```
/// use fiberpay_rs::nonce::nonce_from_parts;
///
/// assert_eq!(nonce_from_parts(1700000000, 123456), "170000000012345600");
/// assert_eq!(nonce_from_parts(1700000000, 42), "170000000000004200");
/// ```
pub fn nonce_from_parts(secs: i64, micros: u32) -> String {
    format!("{}{:06}00", secs, micros)
}

/// Formats the nonce for a given instant.
pub fn nonce_at(time: DateTime<Utc>) -> String {
    // Leap-second instants report 1_000_000+ microseconds
    let micros = time.timestamp_subsec_micros().min(999_999);
    nonce_from_parts(time.timestamp(), micros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64, micros: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, micros * 1_000).unwrap()
    }

    #[test]
    fn test_nonce_format() {
        assert_eq!(nonce_at(at(1700000000, 654321)), "170000000065432100");
        assert_eq!(nonce_at(at(1700000000, 0)), "170000000000000000");
    }

    #[test]
    fn test_nonce_increases_across_second_boundary() {
        let instants = [
            at(1699999999, 999_998),
            at(1699999999, 999_999),
            at(1700000000, 0),
            at(1700000000, 1),
            at(1700000001, 500_000),
        ];

        let nonces: Vec<u128> = instants
            .iter()
            .map(|t| nonce_at(*t).parse().unwrap())
            .collect();

        for pair in nonces.windows(2) {
            assert!(pair[0] < pair[1], "{} should be below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_system_clock_is_non_decreasing() {
        let clock = SystemClock;
        let mut previous: u128 = clock.nonce().parse().unwrap();
        for _ in 0..100 {
            let next: u128 = clock.nonce().parse().unwrap();
            assert!(next >= previous);
            previous = next;
        }
    }

    #[test]
    fn test_system_clock_tracks_current_time() {
        let before = Utc::now().timestamp();
        let nonce = SystemClock.nonce();
        let secs: i64 = nonce[..nonce.len() - 8].parse().unwrap();
        assert!(secs >= before);
        assert!(nonce.ends_with("00"));
    }
}
