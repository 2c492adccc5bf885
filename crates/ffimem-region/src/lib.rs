//! Bounds-checked typed access to native memory regions.
//!
//! A [`MemoryRegion`] addresses a contiguous span of memory it does not
//! own: a borrowed Rust slice, a buffer handed over by native code, or a
//! [`NativeBuffer`] allocated by the caller. On top of it sit scalar
//! `get`/`put` accessors for every [`PrimitiveType`](ffimem_core::PrimitiveType)
//! and the bulk array operations derived from them.
//!
//! # Architecture
//!
//! ```text
//! MemoryRegion<'a>
//! ├── Extent (Bounded(size) | Unbounded)      bounds checks
//! ├── RegionConfig (byte order, alignment)    codec parameters
//! ├── get::<T> / put::<T>                     scalar primitives
//! │   └── raw::{load, store}                  the only memory touches
//! └── bulk::{read_strided, write_strided}     every array operation
//! ```
//!
//! Array reads iterate `offset + i * width` and collect in order; array
//! writes fold over the input threading the offset, so
//! `put_array(offset, xs)` returns `offset + xs.len() * width`. A failed
//! bulk write leaves the elements before the failure written.
//!
//! # Thread safety
//!
//! Regions are neither `Send` nor `Sync`. Nothing here locks; a bulk
//! operation is a sequence of independent scalar accesses and is not
//! atomic with respect to other agents touching the same memory.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod accessors;
pub mod buffer;
mod bulk;
pub mod config;
pub mod extent;
mod raw;
pub mod region;

pub use buffer::NativeBuffer;
pub use config::RegionConfig;
pub use extent::Extent;
pub use region::MemoryRegion;
