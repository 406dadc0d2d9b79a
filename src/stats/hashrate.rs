// src/stats/hashrate.rs
//! Hashrate report encoding
//!
//! Pools expect the submitted rate as a 32 byte quantity: `0x` followed by
//! exactly 64 hex digits.

/// Encodes `rate` (hashes per second) for a hashrate report
///
/// The minimal big-endian byte form is hex encoded, one leading zero nibble
/// is dropped, and the result is left padded with zeros to 64 digits.
pub fn encode_hashrate(rate: u64) -> String {
    let bytes = rate.to_be_bytes();
    let first = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len() - 1);
    let digits = hex::encode(&bytes[first..]);
    let digits = digits.strip_prefix('0').unwrap_or(&digits);
    format!("0x{:0>64}", digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate() {
        assert_eq!(encode_hashrate(0), format!("0x{}", "0".repeat(64)));
    }

    #[test]
    fn unit_rate() {
        assert_eq!(encode_hashrate(1), format!("0x{}1", "0".repeat(63)));
    }

    #[test]
    fn odd_nibble_count() {
        // 25 MH/s = 0x17d7840
        let encoded = encode_hashrate(25_000_000);
        assert_eq!(encoded.len(), 66);
        assert!(encoded.ends_with("0017d7840"));
    }

    #[test]
    fn full_width_rate() {
        assert_eq!(
            encode_hashrate(u64::MAX),
            format!("0x{}{}", "0".repeat(48), "f".repeat(16))
        );
    }
}
