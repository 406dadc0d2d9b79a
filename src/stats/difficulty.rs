// src/stats/difficulty.rs
//! Pool difficulty display
//!
//! Converts an acceptance boundary into a human scaled difficulty. The
//! quotient `2^256 / boundary` does not fit 256 bits for small boundaries,
//! so the division runs in 512 bits.

use crate::miner::work::U256;
use uint::construct_uint;

construct_uint! {
    /// 512-bit unsigned integer for boundary division
    pub struct U512(8);
}

const UNITS: [&str; 6] = [
    "hashes",
    "kilohashes",
    "megahashes",
    "gigahashes",
    "terahashes",
    "petahashes",
];

/// Widens a boundary to 512 bits
fn widen(value: &U256) -> U512 {
    let mut limbs = [0u64; 8];
    limbs[..4].copy_from_slice(&value.0);
    U512(limbs)
}

/// `floor(2^256 / boundary)`, `None` for a zero boundary
pub fn difficulty(boundary: &U256) -> Option<U512> {
    if boundary.is_zero() {
        return None;
    }
    Some((U512::one() << 256usize) / widen(boundary))
}

/// Scales a raw difficulty into `"<value> <unit>"` with two decimals
///
/// Divides by 1000 while the value is above 1000, at most up to petahashes.
pub fn format_difficulty(difficulty: &U512) -> String {
    let mut value = to_f64(difficulty);
    let mut unit = 0;
    while value > 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Difficulty display for a boundary, `None` for a zero boundary
pub fn difficulty_to_display(boundary: &U256) -> Option<String> {
    difficulty(boundary).map(|d| format_difficulty(&d))
}

fn to_f64(value: &U512) -> f64 {
    value
        .0
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * 18_446_744_073_709_551_616.0 + *limb as f64)
}
