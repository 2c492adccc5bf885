//! Property tests for the accessor contract.

use ffimem_core::{MemoryError, PrimitiveType, TypeTable};
use ffimem_region::{MemoryRegion, NativeBuffer, RegionConfig};
use ffimem_test_utils::{
    arb_byte_order, arb_primitive_type, arb_typed_values, arb_value_for, patterned, same_value,
};
use proptest::prelude::*;

fn width(ty: PrimitiveType) -> usize {
    TypeTable::native().width(ty)
}

/// A type, a value of it, and an in-bounds offset within a 64-byte region.
fn arb_placed_value() -> impl Strategy<Value = (PrimitiveType, ffimem_core::Value, usize)> {
    arb_primitive_type().prop_flat_map(|ty| {
        (Just(ty), arb_value_for(ty), 0..=64 - width(ty))
    })
}

proptest! {
    #[test]
    fn put_then_get_returns_value((ty, value, offset) in arb_placed_value(), order in arb_byte_order()) {
        let mut bytes = vec![0u8; 64];
        let config = RegionConfig::default().with_byte_order(order);
        let mut region = MemoryRegion::with_config(&mut bytes, config);

        prop_assert_eq!(region.put_value(ty, offset, value), Ok(offset + width(ty)));
        let back = region.get_value(ty, offset).unwrap();
        prop_assert!(same_value(&back, &value), "{} != {}", back, value);
    }

    #[test]
    fn put_touches_only_its_span((ty, value, offset) in arb_placed_value()) {
        let original = patterned(64);
        let mut bytes = original.clone();
        MemoryRegion::new(&mut bytes).put_value(ty, offset, value).unwrap();

        let end = offset + width(ty);
        prop_assert_eq!(&bytes[..offset], &original[..offset]);
        prop_assert_eq!(&bytes[end..], &original[end..]);
    }

    #[test]
    fn fresh_buffer_reads_zero(ty in arb_primitive_type(), count in 1usize..16) {
        let mut buffer = NativeBuffer::for_type(ty, count).unwrap();
        let region = buffer.region();
        for value in region.read_array_of(ty, count).unwrap() {
            prop_assert!(value.is_zero(), "{}", value);
        }
    }

    #[test]
    fn array_round_trip((ty, values) in arb_typed_values(16), lead in 0usize..8) {
        let size = lead + values.len() * width(ty);
        let mut bytes = vec![0u8; size];
        let mut region = MemoryRegion::new(&mut bytes);

        let end = region.put_array_of(ty, lead, &values).unwrap();
        prop_assert_eq!(end, lead + values.len() * width(ty));

        let back = region.get_array_of(ty, lead, values.len()).unwrap();
        prop_assert_eq!(back.len(), values.len());
        for (a, b) in back.iter().zip(&values) {
            prop_assert!(same_value(a, b), "{} != {}", a, b);
        }
    }

    #[test]
    fn generic_array_round_trip(values in proptest::collection::vec(any::<i32>(), 0..32)) {
        let mut bytes = vec![0u8; values.len() * 4];
        let mut region = MemoryRegion::new(&mut bytes);
        prop_assert_eq!(region.write_array_of_int32(&values), Ok(values.len() * 4));
        prop_assert_eq!(region.read_array_of_int32(values.len()), Ok(values));
    }

    #[test]
    fn out_of_bounds_put_mutates_nothing(
        (ty, value, _) in arb_placed_value(),
        size in 0usize..16,
        overhang in 1usize..8,
    ) {
        let w = width(ty);
        // Start so that the value ends `overhang` bytes past the end.
        let offset = (size + overhang).saturating_sub(w);
        prop_assume!(offset + w > size);

        let original = patterned(size);
        let mut bytes = original.clone();
        let err = MemoryRegion::new(&mut bytes).put_value(ty, offset, value);
        let is_oob = matches!(err, Err(MemoryError::OutOfBounds { .. }));
        prop_assert!(is_oob, "{:?}", err);
        prop_assert_eq!(bytes, original);
    }

    #[test]
    fn out_of_bounds_get_fails(ty in arb_primitive_type(), size in 0usize..16) {
        let mut bytes = vec![0u8; size];
        let region = MemoryRegion::new(&mut bytes);
        // One byte past the last offset where `ty` still fits.
        let offset = size.saturating_sub(width(ty)) + 1;
        let result = region.get_value(ty, offset);
        let is_oob = matches!(result, Err(MemoryError::OutOfBounds { .. }));
        prop_assert!(is_oob);
    }

    #[test]
    fn failed_array_write_keeps_prefix((ty, values) in arb_typed_values(8), keep in 0usize..8) {
        prop_assume!(keep < values.len());
        let w = width(ty);
        let mut bytes = vec![0u8; keep * w + w - 1];
        let mut region = MemoryRegion::new(&mut bytes);

        let err = region.put_array_of(ty, 0, &values).unwrap_err();
        prop_assert_eq!(err.element(), Some(keep));

        let prefix = region.get_array_of(ty, 0, keep).unwrap();
        for (a, b) in prefix.iter().zip(&values) {
            prop_assert!(same_value(a, b));
        }
    }
}
