//! Test utilities for ffimem development.
//!
//! Provides byte fixtures with known contents and proptest strategies for
//! primitive types and host [`Value`]s.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod strategies;

pub use fixtures::{patterned, zeroed, Scenario};
pub use strategies::{arb_byte_order, arb_primitive_type, arb_typed_values, arb_value_for};

use ffimem_core::Value;

/// Compare two values, treating any two NaNs as equal and otherwise
/// comparing floats by bit pattern (so `0.0` and `-0.0` differ).
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => {
            (x.is_nan() && y.is_nan()) || x.to_bits() == y.to_bits()
        }
        _ => a == b,
    }
}
