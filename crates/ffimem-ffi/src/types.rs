//! C-compatible type codes, configs, and tagged values.
//!
//! Enum codes cross the boundary as plain `i32` and are checked on the way
//! in, so an out-of-range code from C is an error rather than UB.

use ffimem_core::{Address, ByteOrder, PrimitiveType, Value, ValueKind};
use ffimem_region::RegionConfig;

use crate::status::FfiStatus;

/// Primitive type code.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FfiPrimitiveType {
    /// Signed 8-bit integer.
    Int8 = 0,
    /// Unsigned 8-bit integer.
    UInt8 = 1,
    /// Signed 16-bit integer.
    Int16 = 2,
    /// Unsigned 16-bit integer.
    UInt16 = 3,
    /// Signed 32-bit integer.
    Int32 = 4,
    /// Unsigned 32-bit integer.
    UInt32 = 5,
    /// Signed 64-bit integer.
    Int64 = 6,
    /// Unsigned 64-bit integer.
    UInt64 = 7,
    /// IEEE-754 binary32.
    Float32 = 8,
    /// IEEE-754 binary64.
    Float64 = 9,
    /// Native pointer-sized address.
    Pointer = 10,
}

impl FfiPrimitiveType {
    /// Decode a type code received from C.
    pub fn from_code(code: i32) -> Result<PrimitiveType, FfiStatus> {
        usize::try_from(code)
            .ok()
            .and_then(PrimitiveType::from_index)
            .ok_or(FfiStatus::UnknownType)
    }
}

impl From<PrimitiveType> for FfiPrimitiveType {
    fn from(ty: PrimitiveType) -> Self {
        match ty {
            PrimitiveType::Int8 => Self::Int8,
            PrimitiveType::UInt8 => Self::UInt8,
            PrimitiveType::Int16 => Self::Int16,
            PrimitiveType::UInt16 => Self::UInt16,
            PrimitiveType::Int32 => Self::Int32,
            PrimitiveType::UInt32 => Self::UInt32,
            PrimitiveType::Int64 => Self::Int64,
            PrimitiveType::UInt64 => Self::UInt64,
            PrimitiveType::Float32 => Self::Float32,
            PrimitiveType::Float64 => Self::Float64,
            PrimitiveType::Pointer => Self::Pointer,
        }
    }
}

/// Byte order code.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FfiByteOrder {
    /// Host byte order.
    Native = 0,
    /// Little-endian.
    Little = 1,
    /// Big-endian.
    Big = 2,
}

impl FfiByteOrder {
    /// Decode a byte order code received from C.
    pub fn from_code(code: i32) -> Result<ByteOrder, FfiStatus> {
        match code {
            0 => Ok(ByteOrder::Native),
            1 => Ok(ByteOrder::Little),
            2 => Ok(ByteOrder::Big),
            _ => Err(FfiStatus::InvalidArgument),
        }
    }
}

/// Region configuration passed by pointer; null means defaults.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FfiRegionConfig {
    /// An [`FfiByteOrder`] code.
    pub byte_order: i32,
    /// Nonzero to reject misaligned scalar accesses.
    pub check_alignment: u8,
}

impl Default for FfiRegionConfig {
    fn default() -> Self {
        Self {
            byte_order: FfiByteOrder::Native as i32,
            check_alignment: 0,
        }
    }
}

impl TryFrom<&FfiRegionConfig> for RegionConfig {
    type Error = FfiStatus;

    fn try_from(c: &FfiRegionConfig) -> Result<Self, FfiStatus> {
        Ok(RegionConfig::new()
            .with_byte_order(FfiByteOrder::from_code(c.byte_order)?)
            .with_alignment_check(c.check_alignment != 0))
    }
}

/// Which field of an [`FfiValue`] is meaningful.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FfiValueKind {
    /// `int_value`.
    Signed = 0,
    /// `uint_value`.
    Unsigned = 1,
    /// `float_value`.
    Float = 2,
    /// `uint_value`, holding an address.
    Pointer = 3,
}

/// A tagged host value.
///
/// Only the field selected by `kind` is read; the others are zeroed on
/// output.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FfiValue {
    /// An [`FfiValueKind`] code.
    pub kind: i32,
    /// Payload for signed values.
    pub int_value: i64,
    /// Payload for unsigned values and pointers.
    pub uint_value: u64,
    /// Payload for floating-point values.
    pub float_value: f64,
}

impl From<Value> for FfiValue {
    fn from(value: Value) -> Self {
        let kind = match value.kind() {
            ValueKind::Signed => FfiValueKind::Signed,
            ValueKind::Unsigned => FfiValueKind::Unsigned,
            ValueKind::Float => FfiValueKind::Float,
            ValueKind::Pointer => FfiValueKind::Pointer,
        } as i32;
        let mut out = FfiValue {
            kind,
            ..FfiValue::default()
        };
        match value {
            Value::Int(v) => out.int_value = v,
            Value::UInt(v) => out.uint_value = v,
            Value::Float(v) => out.float_value = v,
            Value::Pointer(a) => out.uint_value = a.0 as u64,
        }
        out
    }
}

impl TryFrom<&FfiValue> for Value {
    type Error = FfiStatus;

    fn try_from(v: &FfiValue) -> Result<Self, FfiStatus> {
        match v.kind {
            0 => Ok(Value::Int(v.int_value)),
            1 => Ok(Value::UInt(v.uint_value)),
            2 => Ok(Value::Float(v.float_value)),
            3 => usize::try_from(v.uint_value)
                .map(|a| Value::Pointer(Address(a)))
                .map_err(|_| FfiStatus::ValueOutOfRange),
            _ => Err(FfiStatus::InvalidArgument),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_codes_match_core_order() {
        for ty in PrimitiveType::ALL {
            let code = FfiPrimitiveType::from(ty) as i32;
            assert_eq!(FfiPrimitiveType::from_code(code), Ok(ty));
        }
        assert_eq!(FfiPrimitiveType::from_code(-1), Err(FfiStatus::UnknownType));
        assert_eq!(FfiPrimitiveType::from_code(11), Err(FfiStatus::UnknownType));
    }

    #[test]
    fn byte_order_codes() {
        assert_eq!(FfiByteOrder::from_code(2), Ok(ByteOrder::Big));
        assert_eq!(FfiByteOrder::from_code(3), Err(FfiStatus::InvalidArgument));
    }

    #[test]
    fn config_conversion() {
        let c = FfiRegionConfig {
            byte_order: FfiByteOrder::Little as i32,
            check_alignment: 1,
        };
        let config = RegionConfig::try_from(&c).unwrap();
        assert_eq!(config.byte_order, ByteOrder::Little);
        assert!(config.check_alignment);
        assert_eq!(
            RegionConfig::try_from(&FfiRegionConfig::default()),
            Ok(RegionConfig::default())
        );
    }

    #[test]
    fn values_cross_the_boundary() {
        for value in [
            Value::Int(-3),
            Value::UInt(u64::MAX),
            Value::Float(0.25),
            Value::Pointer(Address(0x1000)),
        ] {
            let ffi = FfiValue::from(value);
            assert_eq!(Value::try_from(&ffi), Ok(value));
        }
    }

    #[test]
    fn unknown_value_kind_is_rejected() {
        let v = FfiValue {
            kind: 9,
            ..FfiValue::default()
        };
        assert_eq!(Value::try_from(&v), Err(FfiStatus::InvalidArgument));
    }
}
