//! Host-side values and native addresses.

use std::fmt;

use crate::types::ValueKind;

/// An opaque native address, as stored in a `pointer` slot.
///
/// The accessor never dereferences an `Address`; it only moves the bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub usize);

impl Address {
    /// The null address.
    pub const NULL: Address = Address(0);

    /// Whether this is the null address.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<usize> for Address {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// A dynamically typed host value crossing the memory boundary.
///
/// Used by the tagged access path, where the element type is only known
/// at runtime as a [`PrimitiveType`](crate::PrimitiveType).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating-point number.
    Float(f64),
    /// Native address.
    Pointer(Address),
}

impl Value {
    /// Representation class of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Signed,
            Self::UInt(_) => ValueKind::Unsigned,
            Self::Float(_) => ValueKind::Float,
            Self::Pointer(_) => ValueKind::Pointer,
        }
    }

    /// Whether this is the zero value of its kind.
    pub fn is_zero(&self) -> bool {
        match *self {
            Self::Int(v) => v == 0,
            Self::UInt(v) => v == 0,
            Self::Float(v) => v == 0.0,
            Self::Pointer(a) => a.is_null(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Pointer(a) => write!(f, "{a}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Address> for Value {
    fn from(v: Address) -> Self {
        Self::Pointer(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values() {
        assert!(Value::Int(0).is_zero());
        assert!(Value::UInt(0).is_zero());
        assert!(Value::Float(-0.0).is_zero());
        assert!(Value::Pointer(Address::NULL).is_zero());
        assert!(!Value::Int(-1).is_zero());
    }

    #[test]
    fn address_displays_as_hex() {
        assert_eq!(Address(0xdead).to_string(), "0xdead");
        assert_eq!(Value::Pointer(Address(16)).to_string(), "0x10");
    }
}
