//! ffimem: typed, bounds-checked access to native memory for FFI bindings.
//!
//! This is the top-level facade crate that re-exports the public API of the
//! ffimem sub-crates. The C ABI lives separately in `ffimem-ffi`.
//!
//! # Quick start
//!
//! ```rust
//! use ffimem::prelude::*;
//!
//! let mut bytes = [0u8; 8];
//! let mut region = MemoryRegion::new(&mut bytes);
//!
//! let next = region.put_uint32(0, 0xDEADBEEF).unwrap();
//! assert_eq!(next, 4);
//! assert_eq!(region.get_uint32(0), Ok(0xDEADBEEF));
//! assert_eq!(region.get_uint32(4), Ok(0));
//!
//! // Values that do not fit are rejected and nothing is written.
//! let err = region.put_value(PrimitiveType::UInt8, 4, Value::UInt(256));
//! assert!(matches!(err, Err(MemoryError::ValueOutOfRange { .. })));
//!
//! // Runtime type names resolve through the type table.
//! let ty = region.types().resolve("short").unwrap();
//! assert_eq!(region.write_array_of(ty, &[Value::Int(1), Value::Int(2)]), Ok(4));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ffimem-core` | Type tags, type table, values, codec trait, errors |
//! | [`region`] | `ffimem-region` | `MemoryRegion`, `NativeBuffer`, `RegionConfig` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Type system and errors (`ffimem-core`).
///
/// Contains [`types::PrimitiveType`], the width and alias table
/// [`types::TypeTable`], host [`types::Value`]s, and [`types::MemoryError`].
pub use ffimem_core as types;

/// The region accessor and owned buffers (`ffimem-region`).
pub use ffimem_region as region;

/// Common imports for typical ffimem usage.
///
/// ```rust
/// use ffimem::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use ffimem_core::{
        Address, ByteOrder, MemoryError, Primitive, PrimitiveType, TypeTable, Value, ValueKind,
    };

    // Regions
    pub use ffimem_region::{Extent, MemoryRegion, NativeBuffer, RegionConfig};
}
