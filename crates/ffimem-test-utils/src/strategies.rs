//! Proptest strategies for primitive types and values.

use ffimem_core::{Address, ByteOrder, PrimitiveType, Value};
use proptest::prelude::*;

/// Any primitive type.
pub fn arb_primitive_type() -> impl Strategy<Value = PrimitiveType> {
    proptest::sample::select(PrimitiveType::ALL.to_vec())
}

/// Any byte order.
pub fn arb_byte_order() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![
        Just(ByteOrder::Native),
        Just(ByteOrder::Little),
        Just(ByteOrder::Big),
    ]
}

/// A value exactly representable in `ty`.
///
/// Float32 values are generated as `f32` and widened, so they survive the
/// round trip bit-for-bit.
pub fn arb_value_for(ty: PrimitiveType) -> BoxedStrategy<Value> {
    match ty {
        PrimitiveType::Int8 => any::<i8>().prop_map(|v| Value::Int(v.into())).boxed(),
        PrimitiveType::UInt8 => any::<u8>().prop_map(|v| Value::UInt(v.into())).boxed(),
        PrimitiveType::Int16 => any::<i16>().prop_map(|v| Value::Int(v.into())).boxed(),
        PrimitiveType::UInt16 => any::<u16>().prop_map(|v| Value::UInt(v.into())).boxed(),
        PrimitiveType::Int32 => any::<i32>().prop_map(|v| Value::Int(v.into())).boxed(),
        PrimitiveType::UInt32 => any::<u32>().prop_map(|v| Value::UInt(v.into())).boxed(),
        PrimitiveType::Int64 => any::<i64>().prop_map(Value::Int).boxed(),
        PrimitiveType::UInt64 => any::<u64>().prop_map(Value::UInt).boxed(),
        PrimitiveType::Float32 => any::<f32>().prop_map(|v| Value::Float(v.into())).boxed(),
        PrimitiveType::Float64 => any::<f64>().prop_map(Value::Float).boxed(),
        PrimitiveType::Pointer => any::<usize>()
            .prop_map(|v| Value::Pointer(Address(v)))
            .boxed(),
    }
}

/// A type paired with a vector of values representable in it.
pub fn arb_typed_values(max_len: usize) -> impl Strategy<Value = (PrimitiveType, Vec<Value>)> {
    arb_primitive_type().prop_flat_map(move |ty| {
        proptest::collection::vec(arb_value_for(ty), 0..=max_len).prop_map(move |vs| (ty, vs))
    })
}
