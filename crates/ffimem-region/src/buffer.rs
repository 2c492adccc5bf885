//! Owned, zeroed native buffers that lend out [`MemoryRegion`]s.
//!
//! A [`NativeBuffer`] is the allocator-side collaborator of the accessor:
//! it owns the bytes, the regions it hands out only borrow them. Storage
//! is a boxed `u64` slice, so the base address is 8-byte aligned and every
//! primitive at a width-multiple offset is naturally aligned.

use std::mem::size_of;
use std::ptr::NonNull;

use ffimem_core::{MemoryError, PrimitiveType, TypeTable};

use crate::config::RegionConfig;
use crate::extent::Extent;
use crate::region::MemoryRegion;

const WORD: usize = size_of::<u64>();

/// A heap buffer of native memory, zero-initialized on creation and freed
/// on drop.
#[derive(Clone)]
pub struct NativeBuffer {
    words: Box<[u64]>,
    size: usize,
    type_hint: Option<PrimitiveType>,
    config: RegionConfig,
}

impl NativeBuffer {
    /// Allocate `size` zeroed bytes.
    ///
    /// Fails with [`MemoryError::AllocationFailed`] if the allocator cannot
    /// provide the storage.
    pub fn new(size: usize) -> Result<Self, MemoryError> {
        let len = size.div_ceil(WORD);
        let mut words = Vec::new();
        if let Err(e) = words.try_reserve_exact(len) {
            log::debug!("cannot allocate {size} byte buffer: {e}");
            return Err(MemoryError::AllocationFailed { size });
        }
        words.resize(len, 0u64);
        Ok(Self {
            words: words.into_boxed_slice(),
            size,
            type_hint: None,
            config: RegionConfig::default(),
        })
    }

    /// Allocate zeroed space for `count` elements of `ty`.
    ///
    /// Fails with [`MemoryError::InvalidOffset`] if the byte size overflows
    /// and with [`MemoryError::AllocationFailed`] if it cannot be allocated.
    pub fn for_type(ty: PrimitiveType, count: usize) -> Result<Self, MemoryError> {
        let width = TypeTable::native().width(ty);
        let size = width
            .checked_mul(count)
            .ok_or(MemoryError::InvalidOffset {
                offset: width as i128 * count as i128,
                element: None,
            })?;
        let mut buffer = Self::new(size)?;
        buffer.type_hint = Some(ty);
        Ok(buffer)
    }

    /// Replace the configuration used for regions lent by this buffer.
    pub fn with_config(mut self, config: RegionConfig) -> Self {
        self.config = config;
        self
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the buffer is zero bytes long.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Element type the buffer was sized for, if any.
    pub fn type_hint(&self) -> Option<PrimitiveType> {
        self.type_hint
    }

    /// Number of `type_hint` elements the buffer holds, if typed.
    pub fn count(&self) -> Option<usize> {
        self.type_hint
            .map(|ty| self.size / TypeTable::native().width(ty))
    }

    /// Configuration used for regions lent by this buffer.
    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    /// Base address of the storage.
    pub fn as_ptr(&self) -> *const u8 {
        self.words.as_ptr().cast()
    }

    /// Mutable base address of the storage.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.words.as_mut_ptr().cast()
    }

    /// The buffer's bytes.
    #[allow(unsafe_code)]
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: `words` holds at least `size` initialized bytes and u8 has
        // no alignment requirement.
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.size) }
    }

    /// A region over the whole buffer.
    pub fn region(&mut self) -> MemoryRegion<'_> {
        let base = NonNull::from(&mut self.words[..]).cast::<u8>();
        MemoryRegion::from_parts(base, Extent::Bounded(self.size), self.config)
    }
}

impl std::fmt::Debug for NativeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeBuffer")
            .field("address", &self.as_ptr())
            .field("size", &self.size)
            .field("type_hint", &self.type_hint)
            .finish()
    }
}
