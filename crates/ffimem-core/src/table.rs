//! Explicit type table: byte widths and C name aliases.
//!
//! The region accessor consults a [`TypeTable`] for element strides on the
//! tagged (`PrimitiveType`) path instead of reaching for a global size
//! lookup. [`TypeTable::NATIVE`] describes the host ABI.

use std::ffi::c_long;
use std::mem::size_of;

use crate::error::MemoryError;
use crate::types::PrimitiveType;

/// Mapping from [`PrimitiveType`] to byte width, plus name resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeTable {
    widths: [usize; PrimitiveType::ALL.len()],
}

/// C type aliases accepted by [`TypeTable::resolve`], excluding the
/// platform-dependent `long` family which is resolved separately.
const ALIASES: &[(&str, PrimitiveType)] = &[
    ("char", PrimitiveType::Int8),
    ("schar", PrimitiveType::Int8),
    ("uchar", PrimitiveType::UInt8),
    ("short", PrimitiveType::Int16),
    ("sshort", PrimitiveType::Int16),
    ("ushort", PrimitiveType::UInt16),
    ("int", PrimitiveType::Int32),
    ("sint", PrimitiveType::Int32),
    ("uint", PrimitiveType::UInt32),
    ("long_long", PrimitiveType::Int64),
    ("slong_long", PrimitiveType::Int64),
    ("ulong_long", PrimitiveType::UInt64),
    ("float", PrimitiveType::Float32),
    ("double", PrimitiveType::Float64),
];

impl TypeTable {
    /// Widths of the host platform's C ABI.
    pub const NATIVE: TypeTable = TypeTable {
        widths: [
            size_of::<i8>(),
            size_of::<u8>(),
            size_of::<i16>(),
            size_of::<u16>(),
            size_of::<i32>(),
            size_of::<u32>(),
            size_of::<i64>(),
            size_of::<u64>(),
            size_of::<f32>(),
            size_of::<f64>(),
            size_of::<*const u8>(),
        ],
    };

    /// The host platform's table.
    pub const fn native() -> &'static TypeTable {
        &Self::NATIVE
    }

    /// Byte width of `ty`.
    pub const fn width(&self, ty: PrimitiveType) -> usize {
        self.widths[ty.index()]
    }

    /// Natural alignment of `ty`. Equal to its width for every primitive.
    pub const fn alignment(&self, ty: PrimitiveType) -> usize {
        self.width(ty)
    }

    /// Resolve a type name to a primitive type.
    ///
    /// Accepts canonical names (`int8` … `pointer`), case-insensitively, and
    /// the C aliases `char`, `uchar`, `short`, `int`, `long_long`, `float`,
    /// `double` and friends. `long`/`slong`/`ulong` map to the integer type
    /// matching the platform's `c_long`.
    pub fn resolve(&self, name: &str) -> Result<PrimitiveType, MemoryError> {
        let lowered = name.to_ascii_lowercase();
        if let Some(ty) = PrimitiveType::ALL.iter().find(|t| t.name() == lowered) {
            return Ok(*ty);
        }
        if let Some((_, ty)) = ALIASES.iter().find(|(alias, _)| *alias == lowered) {
            return Ok(*ty);
        }
        match lowered.as_str() {
            "long" | "slong" => Ok(Self::native_long(true)),
            "ulong" => Ok(Self::native_long(false)),
            _ => Err(MemoryError::UnknownType {
                name: name.to_string(),
            }),
        }
    }

    fn native_long(signed: bool) -> PrimitiveType {
        match (size_of::<c_long>(), signed) {
            (8, true) => PrimitiveType::Int64,
            (8, false) => PrimitiveType::UInt64,
            (_, true) => PrimitiveType::Int32,
            (_, false) => PrimitiveType::UInt32,
        }
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::NATIVE
    }
}
