//! Reusable byte fixtures.
//!
//! - [`zeroed`]: a buffer of zero bytes.
//! - [`patterned`]: bytes `0, 1, 2, …` wrapping at 256, so every offset is
//!   recognizable in a failure message.
//! - [`Scenario`]: the fixed-size setups used across integration tests.

/// `size` zero bytes.
pub fn zeroed(size: usize) -> Vec<u8> {
    vec![0; size]
}

/// `size` bytes where byte `i` is `i as u8`.
pub fn patterned(size: usize) -> Vec<u8> {
    (0..size).map(|i| i as u8).collect()
}

/// Canonical test setups with their backing bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub bytes: Vec<u8>,
}

impl Scenario {
    /// Eight zero bytes: one `uint32` written at 0, one left untouched at 4.
    pub fn eight_zero_bytes() -> Self {
        Self {
            name: "eight_zero_bytes",
            bytes: zeroed(8),
        }
    }

    /// Four bytes: exactly two `int16` elements.
    pub fn two_int16_slots() -> Self {
        Self {
            name: "two_int16_slots",
            bytes: zeroed(4),
        }
    }

    /// Two patterned bytes: too small for any 32-bit access.
    pub fn two_bytes() -> Self {
        Self {
            name: "two_bytes",
            bytes: patterned(2),
        }
    }
}
