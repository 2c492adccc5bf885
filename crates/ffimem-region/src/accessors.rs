//! Named per-type accessors (`get_int32`, `put_array_of_float64`, …).
//!
//! These are thin instantiations of the generic methods on
//! [`MemoryRegion`]; no access logic lives here.

use ffimem_core::{Address, MemoryError};

use crate::region::MemoryRegion;

macro_rules! typed_accessors {
    ($(
        $t:ty, $name:literal => $get:ident, $put:ident, $read:ident, $write:ident,
            $get_array:ident, $read_array:ident, $put_array:ident, $write_array:ident;
    )*) => {
        impl MemoryRegion<'_> {$(
            #[doc = concat!("Read an `", $name, "` at `offset`.")]
            pub fn $get(&self, offset: usize) -> Result<$t, MemoryError> {
                self.get::<$t>(offset)
            }

            #[doc = concat!("Write an `", $name, "` at `offset`, returning the next offset.")]
            pub fn $put(&mut self, offset: usize, value: $t) -> Result<usize, MemoryError> {
                self.put::<$t>(offset, value)
            }

            #[doc = concat!("Read an `", $name, "` at offset 0.")]
            pub fn $read(&self) -> Result<$t, MemoryError> {
                self.read::<$t>()
            }

            #[doc = concat!("Write an `", $name, "` at offset 0.")]
            pub fn $write(&mut self, value: $t) -> Result<usize, MemoryError> {
                self.write::<$t>(value)
            }

            #[doc = concat!("Read `length` consecutive `", $name, "` values at `offset`.")]
            pub fn $get_array(&self, offset: usize, length: usize) -> Result<Vec<$t>, MemoryError> {
                self.get_array::<$t>(offset, length)
            }

            #[doc = concat!("Read `length` consecutive `", $name, "` values at offset 0.")]
            pub fn $read_array(&self, length: usize) -> Result<Vec<$t>, MemoryError> {
                self.read_array::<$t>(length)
            }

            #[doc = concat!("Write `", $name, "` values at `offset`, returning the next offset.")]
            pub fn $put_array(&mut self, offset: usize, values: &[$t]) -> Result<usize, MemoryError> {
                self.put_array::<$t>(offset, values)
            }

            #[doc = concat!("Write `", $name, "` values at offset 0, returning bytes written.")]
            pub fn $write_array(&mut self, values: &[$t]) -> Result<usize, MemoryError> {
                self.write_array::<$t>(values)
            }
        )*}
    };
}

typed_accessors! {
    i8, "int8" => get_int8, put_int8, read_int8, write_int8,
        get_array_of_int8, read_array_of_int8, put_array_of_int8, write_array_of_int8;
    u8, "uint8" => get_uint8, put_uint8, read_uint8, write_uint8,
        get_array_of_uint8, read_array_of_uint8, put_array_of_uint8, write_array_of_uint8;
    i16, "int16" => get_int16, put_int16, read_int16, write_int16,
        get_array_of_int16, read_array_of_int16, put_array_of_int16, write_array_of_int16;
    u16, "uint16" => get_uint16, put_uint16, read_uint16, write_uint16,
        get_array_of_uint16, read_array_of_uint16, put_array_of_uint16, write_array_of_uint16;
    i32, "int32" => get_int32, put_int32, read_int32, write_int32,
        get_array_of_int32, read_array_of_int32, put_array_of_int32, write_array_of_int32;
    u32, "uint32" => get_uint32, put_uint32, read_uint32, write_uint32,
        get_array_of_uint32, read_array_of_uint32, put_array_of_uint32, write_array_of_uint32;
    i64, "int64" => get_int64, put_int64, read_int64, write_int64,
        get_array_of_int64, read_array_of_int64, put_array_of_int64, write_array_of_int64;
    u64, "uint64" => get_uint64, put_uint64, read_uint64, write_uint64,
        get_array_of_uint64, read_array_of_uint64, put_array_of_uint64, write_array_of_uint64;
    f32, "float32" => get_float32, put_float32, read_float32, write_float32,
        get_array_of_float32, read_array_of_float32, put_array_of_float32, write_array_of_float32;
    f64, "float64" => get_float64, put_float64, read_float64, write_float64,
        get_array_of_float64, read_array_of_float64, put_array_of_float64, write_array_of_float64;
    Address, "pointer" => get_pointer, put_pointer, read_pointer, write_pointer,
        get_array_of_pointer, read_array_of_pointer, put_array_of_pointer, write_array_of_pointer;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_accessors_delegate_to_generic_ones() {
        let mut bytes = [0u8; 16];
        let mut region = MemoryRegion::new(&mut bytes);
        assert_eq!(region.write_int16(-3), Ok(2));
        assert_eq!(region.read_int16(), Ok(-3));
        assert_eq!(region.put_float32(4, 0.25), Ok(8));
        assert_eq!(region.get_float32(4), Ok(0.25));
        assert_eq!(region.put_array_of_uint8(8, &[1, 2, 3]), Ok(11));
        assert_eq!(region.get_array_of_uint8(8, 3), Ok(vec![1, 2, 3]));
    }
}
