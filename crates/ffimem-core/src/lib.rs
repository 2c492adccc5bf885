//! Core types for the ffimem workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! type system shared by the region accessor and the C bindings:
//! primitive type tags, the explicit width/alias table, host values,
//! the per-type codec trait, and the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod primitive;
pub mod table;
pub mod types;
pub mod value;

pub use error::MemoryError;
pub use primitive::Primitive;
pub use table::TypeTable;
pub use types::{ByteOrder, PrimitiveType, ValueKind};
pub use value::{Address, Value};
