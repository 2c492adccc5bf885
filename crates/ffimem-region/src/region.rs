//! The [`MemoryRegion`] accessor.

use std::ffi::CStr;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use ffimem_core::{with_primitive, MemoryError, Primitive, PrimitiveType, TypeTable, Value};

use crate::bulk;
use crate::config::RegionConfig;
use crate::extent::Extent;
use crate::raw;

/// Widest primitive encoding, in bytes.
const SCRATCH_BYTES: usize = 16;

/// A typed view over a contiguous span of memory the view does not own.
///
/// The lifetime `'a` ties the view to whatever lends the memory: a
/// `&'a mut [u8]`, a [`NativeBuffer`](crate::NativeBuffer), or nothing at
/// all for regions built from raw parts, where validity is the caller's
/// promise.
///
/// Reads take `&self`, writes take `&mut self`. Scalar writes that fail
/// leave memory untouched.
pub struct MemoryRegion<'a> {
    base: NonNull<u8>,
    extent: Extent,
    config: RegionConfig,
    _memory: PhantomData<&'a mut [u8]>,
}

impl<'a> MemoryRegion<'a> {
    /// View a byte slice with the default configuration.
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self::with_config(bytes, RegionConfig::default())
    }

    /// View a byte slice with `config`.
    pub fn with_config(bytes: &'a mut [u8], config: RegionConfig) -> Self {
        let size = bytes.len();
        Self {
            base: NonNull::from(bytes).cast::<u8>(),
            extent: Extent::Bounded(size),
            config,
            _memory: PhantomData,
        }
    }

    /// View `size` bytes of native memory starting at `ptr`.
    ///
    /// Fails with [`MemoryError::NullPointer`] if `ptr` is null.
    ///
    /// # Safety
    ///
    /// `[ptr, ptr + size)` must be valid for reads and writes for `'a`, and
    /// nothing else may access it while the region is in use.
    #[allow(unsafe_code)]
    pub unsafe fn from_raw_parts(
        ptr: *mut u8,
        size: usize,
        config: RegionConfig,
    ) -> Result<Self, MemoryError> {
        let base = NonNull::new(ptr).ok_or(MemoryError::NullPointer)?;
        log::trace!("wrapping {size} bytes at {ptr:p}");
        Ok(Self::from_parts(base, Extent::Bounded(size), config))
    }

    /// View native memory of unknown size starting at `ptr`.
    ///
    /// Only address-space overflow is checked; every access is trusted to
    /// be in bounds.
    ///
    /// # Safety
    ///
    /// Every offset later accessed through the region must be valid for
    /// reads and writes for `'a`, and nothing else may access that memory
    /// while the region is in use.
    #[allow(unsafe_code)]
    pub unsafe fn unbounded(ptr: *mut u8, config: RegionConfig) -> Result<Self, MemoryError> {
        let base = NonNull::new(ptr).ok_or(MemoryError::NullPointer)?;
        log::trace!("wrapping unbounded memory at {ptr:p}");
        Ok(Self::from_parts(base, Extent::Unbounded, config))
    }

    pub(crate) fn from_parts(base: NonNull<u8>, extent: Extent, config: RegionConfig) -> Self {
        Self {
            base,
            extent,
            config,
            _memory: PhantomData,
        }
    }

    // ── Introspection ───────────────────────────────────────────────

    /// Size in bytes, or `None` for an unbounded region.
    pub fn size(&self) -> Option<usize> {
        self.extent.size()
    }

    /// The region's extent.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// The region's configuration.
    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    /// The type table used for strides on the tagged access path.
    pub fn types(&self) -> &'static TypeTable {
        TypeTable::native()
    }

    /// Base address of the region.
    pub fn as_ptr(&self) -> *const u8 {
        self.base.as_ptr()
    }

    /// Mutable base address of the region.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.base.as_ptr()
    }

    /// Bytes addressable after `offset`; `None` when unbounded.
    pub fn remaining(&self, offset: usize) -> Option<usize> {
        self.extent.remaining(offset)
    }

    /// Check that `count` consecutive `ty` elements starting at `offset`
    /// fit in the region.
    ///
    /// Bulk writes are not transactional; callers that need all-or-nothing
    /// behavior validate with this first.
    pub fn check_array(
        &self,
        ty: PrimitiveType,
        offset: usize,
        count: usize,
    ) -> Result<(), MemoryError> {
        let width = self.types().width(ty);
        let len = count.checked_mul(width).ok_or(MemoryError::InvalidOffset {
            offset: offset as i128,
            element: None,
        })?;
        self.extent.check(offset, len).map(|_| ())
    }

    /// Bounds check plus, when configured, an alignment check.
    fn check_access(&self, offset: usize, ty: PrimitiveType) -> Result<(), MemoryError> {
        let end = self.extent.check(offset, self.types().width(ty))?;
        let base = self.base.as_ptr() as usize;
        if base.checked_add(end).is_none() {
            return Err(MemoryError::InvalidOffset {
                offset: offset as i128,
                element: None,
            });
        }
        let align = self.types().alignment(ty);
        if self.config.check_alignment && (base + offset) % align != 0 {
            return Err(MemoryError::Misaligned { offset, align });
        }
        Ok(())
    }

    /// Bounds check for untyped byte ranges.
    fn check_span(&self, offset: usize, len: usize) -> Result<(), MemoryError> {
        let end = self.extent.check(offset, len)?;
        if (self.base.as_ptr() as usize).checked_add(end).is_none() {
            return Err(MemoryError::InvalidOffset {
                offset: offset as i128,
                element: None,
            });
        }
        Ok(())
    }

    // ── Scalar access ───────────────────────────────────────────────

    /// Decode a `T` from `[offset, offset + T::WIDTH)`.
    #[allow(unsafe_code)]
    pub fn get<T: Primitive>(&self, offset: usize) -> Result<T, MemoryError> {
        self.check_access(offset, T::TYPE)?;
        let mut scratch = [0u8; SCRATCH_BYTES];
        let bytes = &mut scratch[..T::WIDTH];
        // SAFETY: check_access proved [offset, offset + WIDTH) is inside
        // the region, which is valid for reads per its constructor.
        unsafe { raw::load(self.base, offset, bytes) };
        Ok(T::decode(bytes, self.config.byte_order))
    }

    /// Encode `value` into `[offset, offset + T::WIDTH)`.
    ///
    /// Returns the offset just past the written value.
    #[allow(unsafe_code)]
    pub fn put<T: Primitive>(&mut self, offset: usize, value: T) -> Result<usize, MemoryError> {
        self.check_access(offset, T::TYPE)?;
        let mut scratch = [0u8; SCRATCH_BYTES];
        let bytes = &mut scratch[..T::WIDTH];
        value.encode(bytes, self.config.byte_order);
        // SAFETY: check_access proved the range is inside the region, which
        // is valid for writes per its constructor; `&mut self` excludes
        // other views through this region.
        unsafe { raw::store(self.base, offset, bytes) };
        Ok(offset + T::WIDTH)
    }

    /// Decode a `T` at offset 0.
    pub fn read<T: Primitive>(&self) -> Result<T, MemoryError> {
        self.get(0)
    }

    /// Encode `value` at offset 0, returning `T::WIDTH`.
    pub fn write<T: Primitive>(&mut self, value: T) -> Result<usize, MemoryError> {
        self.put(0, value)
    }

    // ── Array access ────────────────────────────────────────────────

    /// Decode `length` consecutive `T`s starting at `offset`.
    pub fn get_array<T: Primitive>(
        &self,
        offset: usize,
        length: usize,
    ) -> Result<Vec<T>, MemoryError> {
        bulk::read_strided(offset, length, T::WIDTH, |at| self.get::<T>(at))
    }

    /// Decode `length` consecutive `T`s starting at offset 0.
    pub fn read_array<T: Primitive>(&self, length: usize) -> Result<Vec<T>, MemoryError> {
        self.get_array(0, length)
    }

    /// Encode `values` consecutively starting at `offset`.
    ///
    /// Returns `offset + values.len() * T::WIDTH`. If an element fails,
    /// the elements before it remain written.
    pub fn put_array<T: Primitive>(
        &mut self,
        offset: usize,
        values: &[T],
    ) -> Result<usize, MemoryError> {
        bulk::write_strided(offset, values.iter().copied(), T::WIDTH, |at, v| {
            self.put::<T>(at, v)
        })
    }

    /// Encode `values` consecutively from offset 0, returning the number
    /// of bytes written.
    pub fn write_array<T: Primitive>(&mut self, values: &[T]) -> Result<usize, MemoryError> {
        self.put_array(0, values)
    }

    // ── Tagged access ───────────────────────────────────────────────

    /// Decode a value of runtime type `ty` at `offset`.
    pub fn get_value(&self, ty: PrimitiveType, offset: usize) -> Result<Value, MemoryError> {
        with_primitive!(ty, T => self.get::<T>(offset).map(Primitive::into_value))
    }

    /// Encode `value` as runtime type `ty` at `offset`.
    ///
    /// The value is narrowed first; values not representable in `ty` are
    /// rejected with [`MemoryError::ValueOutOfRange`] or
    /// [`MemoryError::TypeMismatch`] and nothing is written.
    pub fn put_value(
        &mut self,
        ty: PrimitiveType,
        offset: usize,
        value: Value,
    ) -> Result<usize, MemoryError> {
        with_primitive!(ty, T => {
            let narrowed = T::from_value(value)?;
            self.put::<T>(offset, narrowed)
        })
    }

    /// Decode `length` values of runtime type `ty` starting at `offset`.
    pub fn get_array_of(
        &self,
        ty: PrimitiveType,
        offset: usize,
        length: usize,
    ) -> Result<Vec<Value>, MemoryError> {
        let width = self.types().width(ty);
        bulk::read_strided(offset, length, width, |at| self.get_value(ty, at))
    }

    /// Decode `length` values of runtime type `ty` starting at offset 0.
    pub fn read_array_of(
        &self,
        ty: PrimitiveType,
        length: usize,
    ) -> Result<Vec<Value>, MemoryError> {
        self.get_array_of(ty, 0, length)
    }

    /// Encode `values` as runtime type `ty` starting at `offset`.
    ///
    /// Same offset threading and partial-write behavior as
    /// [`put_array`](Self::put_array).
    pub fn put_array_of(
        &mut self,
        ty: PrimitiveType,
        offset: usize,
        values: &[Value],
    ) -> Result<usize, MemoryError> {
        let width = self.types().width(ty);
        bulk::write_strided(offset, values.iter().copied(), width, |at, v| {
            self.put_value(ty, at, v)
        })
    }

    /// Encode `values` as runtime type `ty` from offset 0, returning the
    /// number of bytes written.
    pub fn write_array_of(
        &mut self,
        ty: PrimitiveType,
        values: &[Value],
    ) -> Result<usize, MemoryError> {
        self.put_array_of(ty, 0, values)
    }

    // ── Byte access ─────────────────────────────────────────────────

    /// Copy `length` raw bytes starting at `offset`.
    #[allow(unsafe_code)]
    pub fn get_bytes(&self, offset: usize, length: usize) -> Result<Vec<u8>, MemoryError> {
        self.check_span(offset, length)?;
        let mut out = vec![0u8; length];
        // SAFETY: check_span proved the range is inside the region.
        unsafe { raw::load(self.base, offset, &mut out) };
        Ok(out)
    }

    /// Copy `data` into the region at `offset`, returning the offset just
    /// past it.
    #[allow(unsafe_code)]
    pub fn put_bytes(&mut self, offset: usize, data: &[u8]) -> Result<usize, MemoryError> {
        self.check_span(offset, data.len())?;
        // SAFETY: check_span proved the range is inside the region; `data`
        // is a Rust borrow and cannot alias memory behind `&mut self`.
        unsafe { raw::store(self.base, offset, data) };
        Ok(offset + data.len())
    }

    /// Read the NUL-terminated string starting at `offset`, without the
    /// terminator.
    ///
    /// Bounded regions fail with [`MemoryError::UnterminatedString`] when
    /// no NUL precedes the end; unbounded regions scan until one is found.
    #[allow(unsafe_code)]
    pub fn get_c_string(&self, offset: usize) -> Result<Vec<u8>, MemoryError> {
        if let Extent::Bounded(size) = self.extent {
            let tail = self.get_bytes(offset, size.saturating_sub(offset))?;
            return match tail.iter().position(|&b| b == 0) {
                Some(nul) => Ok(tail[..nul].to_vec()),
                None => Err(MemoryError::UnterminatedString { offset, size }),
            };
        }
        let mut out = Vec::new();
        let mut at = offset;
        loop {
            self.check_span(at, 1)?;
            // SAFETY: unbounded regions promise every accessed offset is
            // readable; check_span ruled out address-space overflow.
            let byte = unsafe { raw::load_byte(self.base, at) };
            if byte == 0 {
                return Ok(out);
            }
            out.push(byte);
            at += 1;
        }
    }

    /// Write `s` including its NUL terminator at `offset`, returning the
    /// offset just past the terminator.
    pub fn put_c_string(&mut self, offset: usize, s: &CStr) -> Result<usize, MemoryError> {
        self.put_bytes(offset, s.to_bytes_with_nul())
    }

    /// Zero every byte of a bounded region, returning how many were cleared.
    ///
    /// An unbounded region has no known extent; nothing is cleared.
    #[allow(unsafe_code)]
    pub fn clear(&mut self) -> usize {
        let size = self.extent.size().unwrap_or(0);
        // SAFETY: the whole bounded extent is valid for writes.
        unsafe { raw::fill(self.base, 0, size, 0) };
        size
    }

    // ── Sub-regions ─────────────────────────────────────────────────

    /// A region covering `[offset, offset + size)` of this one.
    ///
    /// The slice borrows `self` mutably, so the parent cannot be used
    /// while the slice is alive.
    #[allow(unsafe_code)]
    pub fn slice(&mut self, offset: usize, size: usize) -> Result<MemoryRegion<'_>, MemoryError> {
        self.check_span(offset, size)?;
        // SAFETY: offset + size is within the region, so offset is too.
        let base = unsafe { raw::advance(self.base, offset) };
        Ok(MemoryRegion::from_parts(base, Extent::Bounded(size), self.config))
    }

    /// A region starting at `offset` and running to the end of this one.
    #[allow(unsafe_code)]
    pub fn offset_by(&mut self, offset: usize) -> Result<MemoryRegion<'_>, MemoryError> {
        self.check_span(offset, 0)?;
        let extent = match self.extent {
            Extent::Bounded(size) => Extent::Bounded(size - offset),
            Extent::Unbounded => Extent::Unbounded,
        };
        // SAFETY: offset is at most the end of a bounded region; unbounded
        // regions promise the memory at any accessed offset is valid.
        let base = unsafe { raw::advance(self.base, offset) };
        Ok(MemoryRegion::from_parts(base, extent, self.config))
    }
}

impl fmt::Debug for MemoryRegion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRegion")
            .field("address", &self.base)
            .field("extent", &self.extent)
            .field("config", &self.config)
            .finish()
    }
}
