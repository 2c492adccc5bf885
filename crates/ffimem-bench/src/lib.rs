//! Benchmark fixtures for ffimem region access.
//!
//! - [`typed_buffer`]: a zeroed buffer sized for `count` elements of a type
//! - [`sample_values`]: deterministic host values representable in a type

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ffimem_core::{Address, PrimitiveType, Value};
use ffimem_region::NativeBuffer;

/// Element counts used by the array benchmarks.
pub const ARRAY_SIZES: [usize; 3] = [16, 1_024, 65_536];

/// A zeroed buffer holding `count` elements of `ty`.
///
/// # Panics
///
/// Panics if the byte size overflows `usize`.
pub fn typed_buffer(ty: PrimitiveType, count: usize) -> NativeBuffer {
    NativeBuffer::for_type(ty, count).expect("benchmark buffer size overflows")
}

/// `count` values representable in `ty`, cycling through small magnitudes.
pub fn sample_values(ty: PrimitiveType, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let small = (i % 100) as u8;
            match ty {
                PrimitiveType::Int8
                | PrimitiveType::Int16
                | PrimitiveType::Int32
                | PrimitiveType::Int64 => Value::Int(i64::from(small) - 50),
                PrimitiveType::UInt8
                | PrimitiveType::UInt16
                | PrimitiveType::UInt32
                | PrimitiveType::UInt64 => Value::UInt(small.into()),
                PrimitiveType::Float32 | PrimitiveType::Float64 => {
                    Value::Float(f64::from(small) * 0.5)
                }
                PrimitiveType::Pointer => Value::Pointer(Address(usize::from(small) * 8)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_fit_their_buffer() {
        for ty in PrimitiveType::ALL {
            let values = sample_values(ty, 200);
            let mut buffer = typed_buffer(ty, values.len());
            let written = buffer.region().write_array_of(ty, &values).unwrap();
            assert_eq!(written, buffer.size());
        }
    }
}
