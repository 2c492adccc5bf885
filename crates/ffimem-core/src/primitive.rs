//! The [`Primitive`] codec trait and its implementations.
//!
//! Each primitive type contributes exactly three things to the accessor:
//! its byte width, a decoder, and an encoder. Everything else (scalar
//! bounds checks, bulk iteration, offset threading) is written once,
//! generically, in `ffimem-region`.

use std::mem::size_of;

use crate::error::MemoryError;
use crate::types::{ByteOrder, PrimitiveType};
use crate::value::{Address, Value};

/// A Rust type with a fixed native-memory representation.
///
/// Implemented for `i8`..`i64`, `u8`..`u64`, `f32`, `f64` and [`Address`].
pub trait Primitive: Copy + PartialEq + std::fmt::Debug + 'static {
    /// The type tag this Rust type encodes.
    const TYPE: PrimitiveType;
    /// Encoded size in bytes.
    const WIDTH: usize;

    /// Decode from the first [`WIDTH`](Self::WIDTH) bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than `WIDTH`. Callers bounds-check
    /// before slicing.
    fn decode(bytes: &[u8], order: ByteOrder) -> Self;

    /// Encode into the first [`WIDTH`](Self::WIDTH) bytes of `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `WIDTH`.
    fn encode(self, out: &mut [u8], order: ByteOrder);

    /// Widen into a host [`Value`].
    fn into_value(self) -> Value;

    /// Narrow a host [`Value`].
    ///
    /// Integer values must convert exactly, including into float types.
    /// Float values into float types must lie in the finite range of the
    /// target.
    fn from_value(value: Value) -> Result<Self, MemoryError>;
}

macro_rules! impl_codec {
    ($t:ty) => {
        fn decode(bytes: &[u8], order: ByteOrder) -> Self {
            let mut raw = [0u8; size_of::<$t>()];
            raw.copy_from_slice(&bytes[..size_of::<$t>()]);
            match order {
                ByteOrder::Native => <$t>::from_ne_bytes(raw),
                ByteOrder::Little => <$t>::from_le_bytes(raw),
                ByteOrder::Big => <$t>::from_be_bytes(raw),
            }
        }

        fn encode(self, out: &mut [u8], order: ByteOrder) {
            let raw = match order {
                ByteOrder::Native => self.to_ne_bytes(),
                ByteOrder::Little => self.to_le_bytes(),
                ByteOrder::Big => self.to_be_bytes(),
            };
            out[..size_of::<$t>()].copy_from_slice(&raw);
        }
    };
}

macro_rules! impl_integer {
    ($($t:ty => $tag:ident, $variant:ident;)*) => {$(
        impl Primitive for $t {
            const TYPE: PrimitiveType = PrimitiveType::$tag;
            const WIDTH: usize = size_of::<$t>();

            impl_codec!($t);

            fn into_value(self) -> Value {
                Value::$variant(self.into())
            }

            fn from_value(value: Value) -> Result<Self, MemoryError> {
                let narrowed = match value {
                    Value::Int(v) => <$t>::try_from(v).ok(),
                    Value::UInt(v) => <$t>::try_from(v).ok(),
                    Value::Float(_) | Value::Pointer(_) => {
                        return Err(MemoryError::TypeMismatch {
                            ty: Self::TYPE,
                            value,
                            element: None,
                        })
                    }
                };
                narrowed.ok_or(MemoryError::ValueOutOfRange {
                    ty: Self::TYPE,
                    value,
                    element: None,
                })
            }
        }
    )*};
}

impl_integer! {
    i8 => Int8, Int;
    u8 => UInt8, UInt;
    i16 => Int16, Int;
    u16 => UInt16, UInt;
    i32 => Int32, Int;
    u32 => UInt32, UInt;
    i64 => Int64, Int;
    u64 => UInt64, UInt;
}

/// `v` as an `f32`, if the conversion is exact.
///
/// The round trip goes through `i128` so that values rounding up to 2^63 or
/// 2^64 do not saturate back onto `i64::MAX` / `u64::MAX`.
fn exact_f32(v: i128) -> Option<f32> {
    let f = v as f32;
    (f as i128 == v).then_some(f)
}

/// `v` as an `f64`, if the conversion is exact.
fn exact_f64(v: i128) -> Option<f64> {
    let f = v as f64;
    (f as i128 == v).then_some(f)
}

impl Primitive for f32 {
    const TYPE: PrimitiveType = PrimitiveType::Float32;
    const WIDTH: usize = size_of::<f32>();

    impl_codec!(f32);

    fn into_value(self) -> Value {
        Value::Float(self.into())
    }

    fn from_value(value: Value) -> Result<Self, MemoryError> {
        let narrowed = match value {
            Value::Float(v) => {
                // Non-finite values carry over; finite values must fit the f32 range.
                if v.is_finite() && v.abs() > f32::MAX as f64 {
                    None
                } else {
                    Some(v as f32)
                }
            }
            Value::Int(v) => exact_f32(v.into()),
            Value::UInt(v) => exact_f32(v.into()),
            Value::Pointer(_) => {
                return Err(MemoryError::TypeMismatch {
                    ty: Self::TYPE,
                    value,
                    element: None,
                })
            }
        };
        narrowed.ok_or(MemoryError::ValueOutOfRange {
            ty: Self::TYPE,
            value,
            element: None,
        })
    }
}

impl Primitive for f64 {
    const TYPE: PrimitiveType = PrimitiveType::Float64;
    const WIDTH: usize = size_of::<f64>();

    impl_codec!(f64);

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Result<Self, MemoryError> {
        let narrowed = match value {
            Value::Float(v) => Some(v),
            Value::Int(v) => exact_f64(v.into()),
            Value::UInt(v) => exact_f64(v.into()),
            Value::Pointer(_) => {
                return Err(MemoryError::TypeMismatch {
                    ty: Self::TYPE,
                    value,
                    element: None,
                })
            }
        };
        narrowed.ok_or(MemoryError::ValueOutOfRange {
            ty: Self::TYPE,
            value,
            element: None,
        })
    }
}

impl Primitive for Address {
    const TYPE: PrimitiveType = PrimitiveType::Pointer;
    const WIDTH: usize = size_of::<usize>();

    fn decode(bytes: &[u8], order: ByteOrder) -> Self {
        Address(usize::decode(bytes, order))
    }

    fn encode(self, out: &mut [u8], order: ByteOrder) {
        self.0.encode(out, order)
    }

    fn into_value(self) -> Value {
        Value::Pointer(self)
    }

    fn from_value(value: Value) -> Result<Self, MemoryError> {
        let narrowed = match value {
            Value::Pointer(a) => Some(a.0),
            Value::UInt(v) => usize::try_from(v).ok(),
            Value::Int(v) => usize::try_from(v).ok(),
            Value::Float(_) => {
                return Err(MemoryError::TypeMismatch {
                    ty: Self::TYPE,
                    value,
                    element: None,
                })
            }
        };
        narrowed.map(Address).ok_or(MemoryError::ValueOutOfRange {
            ty: Self::TYPE,
            value,
            element: None,
        })
    }
}

/// `usize` is only the carrier for [`Address`]; it is not a primitive tag
/// of its own, so it gets the codec but not the trait.
trait UsizeCodec {
    fn decode(bytes: &[u8], order: ByteOrder) -> Self;
    fn encode(self, out: &mut [u8], order: ByteOrder);
}

impl UsizeCodec for usize {
    impl_codec!(usize);
}

/// Run `$body` with `$t` bound to the Rust type implementing
/// [`Primitive`] for the runtime tag `$ty`.
///
/// ```
/// use ffimem_core::{with_primitive, Primitive, PrimitiveType};
///
/// let width = with_primitive!(PrimitiveType::UInt16, T => T::WIDTH);
/// assert_eq!(width, 2);
/// ```
#[macro_export]
macro_rules! with_primitive {
    ($ty:expr, $t:ident => $body:expr) => {
        match $ty {
            $crate::PrimitiveType::Int8 => {
                type $t = i8;
                $body
            }
            $crate::PrimitiveType::UInt8 => {
                type $t = u8;
                $body
            }
            $crate::PrimitiveType::Int16 => {
                type $t = i16;
                $body
            }
            $crate::PrimitiveType::UInt16 => {
                type $t = u16;
                $body
            }
            $crate::PrimitiveType::Int32 => {
                type $t = i32;
                $body
            }
            $crate::PrimitiveType::UInt32 => {
                type $t = u32;
                $body
            }
            $crate::PrimitiveType::Int64 => {
                type $t = i64;
                $body
            }
            $crate::PrimitiveType::UInt64 => {
                type $t = u64;
                $body
            }
            $crate::PrimitiveType::Float32 => {
                type $t = f32;
                $body
            }
            $crate::PrimitiveType::Float64 => {
                type $t = f64;
                $body
            }
            $crate::PrimitiveType::Pointer => {
                type $t = $crate::Address;
                $body
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeTable;
    use proptest::prelude::*;

    #[test]
    fn widths_agree_with_type_table() {
        for ty in PrimitiveType::ALL {
            let width = with_primitive!(ty, T => T::WIDTH);
            assert_eq!(width, TypeTable::native().width(ty), "{ty}");
            let tag = with_primitive!(ty, T => T::TYPE);
            assert_eq!(tag, ty);
        }
    }

    #[test]
    fn explicit_orders_are_fixed() {
        let mut buf = [0u8; 4];
        0x0102_0304u32.encode(&mut buf, ByteOrder::Big);
        assert_eq!(buf, [1, 2, 3, 4]);
        0x0102_0304u32.encode(&mut buf, ByteOrder::Little);
        assert_eq!(buf, [4, 3, 2, 1]);
        assert_eq!(u32::decode(&[1, 2, 3, 4], ByteOrder::Big), 0x0102_0304);
    }

    #[test]
    fn integer_narrowing_rejects_overflow() {
        assert_eq!(u8::from_value(Value::Int(255)), Ok(255));
        assert!(matches!(
            u8::from_value(Value::Int(256)),
            Err(MemoryError::ValueOutOfRange {
                ty: PrimitiveType::UInt8,
                ..
            })
        ));
        assert!(matches!(
            u32::from_value(Value::Int(-1)),
            Err(MemoryError::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            i64::from_value(Value::UInt(u64::MAX)),
            Err(MemoryError::ValueOutOfRange { .. })
        ));
        assert_eq!(i16::from_value(Value::UInt(7)), Ok(7));
    }

    #[test]
    fn float_into_integer_is_a_mismatch() {
        assert!(matches!(
            i32::from_value(Value::Float(1.0)),
            Err(MemoryError::TypeMismatch {
                ty: PrimitiveType::Int32,
                ..
            })
        ));
    }

    #[test]
    fn float32_rejects_finite_overflow_only() {
        assert!(matches!(
            f32::from_value(Value::Float(1e300)),
            Err(MemoryError::ValueOutOfRange { .. })
        ));
        assert!(f32::from_value(Value::Float(f64::INFINITY))
            .unwrap()
            .is_infinite());
        assert!(f32::from_value(Value::Float(f64::NAN)).unwrap().is_nan());
        assert_eq!(f32::from_value(Value::Int(3)), Ok(3.0));
    }

    #[test]
    fn integers_into_floats_must_be_exact() {
        let two_24 = 1i64 << 24;
        assert_eq!(f32::from_value(Value::Int(two_24)), Ok(16_777_216.0));
        assert_eq!(f32::from_value(Value::Int(-two_24)), Ok(-16_777_216.0));
        assert!(matches!(
            f32::from_value(Value::Int(two_24 + 1)),
            Err(MemoryError::ValueOutOfRange {
                ty: PrimitiveType::Float32,
                value: Value::Int(16_777_217),
                ..
            })
        ));

        let two_53 = 1u64 << 53;
        assert_eq!(f64::from_value(Value::UInt(two_53)), Ok(two_53 as f64));
        assert!(matches!(
            f64::from_value(Value::UInt(two_53 + 1)),
            Err(MemoryError::ValueOutOfRange {
                ty: PrimitiveType::Float64,
                ..
            })
        ));
        assert!(matches!(
            f64::from_value(Value::Int(i64::MAX)),
            Err(MemoryError::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            f64::from_value(Value::UInt(u64::MAX)),
            Err(MemoryError::ValueOutOfRange { .. })
        ));
        assert_eq!(f64::from_value(Value::Int(i64::MIN)), Ok(-9.223372036854775808e18));
    }

    #[test]
    fn pointer_accepts_addresses_and_non_negative_integers() {
        assert_eq!(
            Address::from_value(Value::Pointer(Address(64))),
            Ok(Address(64))
        );
        assert_eq!(Address::from_value(Value::UInt(8)), Ok(Address(8)));
        assert!(matches!(
            Address::from_value(Value::Int(-8)),
            Err(MemoryError::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            Address::from_value(Value::Float(0.0)),
            Err(MemoryError::TypeMismatch { .. })
        ));
    }

    fn arb_order() -> impl Strategy<Value = ByteOrder> {
        prop_oneof![
            Just(ByteOrder::Native),
            Just(ByteOrder::Little),
            Just(ByteOrder::Big),
        ]
    }

    proptest! {
        #[test]
        fn i64_codec_inverts(v in any::<i64>(), order in arb_order()) {
            let mut buf = [0u8; 8];
            v.encode(&mut buf, order);
            prop_assert_eq!(i64::decode(&buf, order), v);
        }

        #[test]
        fn f64_codec_preserves_bits(bits in any::<u64>(), order in arb_order()) {
            let v = f64::from_bits(bits);
            let mut buf = [0u8; 8];
            v.encode(&mut buf, order);
            prop_assert_eq!(f64::decode(&buf, order).to_bits(), bits);
        }

        #[test]
        fn swapped_order_reverses_bytes(v in any::<u32>()) {
            let mut le = [0u8; 4];
            let mut be = [0u8; 4];
            v.encode(&mut le, ByteOrder::Little);
            v.encode(&mut be, ByteOrder::Big);
            be.reverse();
            prop_assert_eq!(le, be);
        }

        #[test]
        fn value_round_trip_i16(v in any::<i16>()) {
            prop_assert_eq!(i16::from_value(v.into_value()), Ok(v));
        }
    }
}
