//! Primitive type tags and byte order.

use std::fmt;

/// One of the fixed-width primitive types addressable in native memory.
///
/// Discriminants are dense and start at zero so the tag can index the
/// [`TypeTable`](crate::TypeTable) directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    /// Signed 8-bit integer (`int8_t`, `char`).
    Int8,
    /// Unsigned 8-bit integer (`uint8_t`, `unsigned char`).
    UInt8,
    /// Signed 16-bit integer (`int16_t`, `short`).
    Int16,
    /// Unsigned 16-bit integer (`uint16_t`, `unsigned short`).
    UInt16,
    /// Signed 32-bit integer (`int32_t`, `int`).
    Int32,
    /// Unsigned 32-bit integer (`uint32_t`, `unsigned int`).
    UInt32,
    /// Signed 64-bit integer (`int64_t`, `long long`).
    Int64,
    /// Unsigned 64-bit integer (`uint64_t`, `unsigned long long`).
    UInt64,
    /// IEEE-754 single precision (`float`).
    Float32,
    /// IEEE-754 double precision (`double`).
    Float64,
    /// Native data pointer (`void *`).
    Pointer,
}

impl PrimitiveType {
    /// Every primitive type, in discriminant order.
    pub const ALL: [PrimitiveType; 11] = [
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Float32,
        Self::Float64,
        Self::Pointer,
    ];

    /// Canonical lowercase name, as used in `get_<name>` accessors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Pointer => "pointer",
        }
    }

    /// Host value representation for this type.
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 => ValueKind::Signed,
            Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64 => ValueKind::Unsigned,
            Self::Float32 | Self::Float64 => ValueKind::Float,
            Self::Pointer => ValueKind::Pointer,
        }
    }

    /// Index of this type in [`PrimitiveType::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a type by its [`index`](Self::index).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Host-side representation class of a primitive type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Two's-complement signed integer.
    Signed,
    /// Unsigned integer.
    Unsigned,
    /// IEEE-754 float.
    Float,
    /// Opaque native address.
    Pointer,
}

/// Byte order used to encode and decode multi-byte values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// The host platform's byte order.
    #[default]
    Native,
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}
