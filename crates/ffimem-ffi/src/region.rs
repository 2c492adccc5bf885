//! Region lifecycle and access FFI.
//!
//! A handle refers either to caller-owned memory wrapped with
//! [`ffimem_region_wrap`] (or its unbounded variant) or to a zeroed buffer
//! allocated by [`ffimem_buffer_create`]. The global `REGIONS` lock is held
//! for the whole of each call, so calls on any handles are serialized.
//!
//! Offsets are `i64`; negative offsets fail with `InvalidOffset`. Arrays
//! cross the boundary as caller-allocated buffers laid out in host byte
//! order, whatever the region's configured byte order is.

use std::ffi::{c_char, c_void, CStr};
use std::ptr::NonNull;
use std::sync::Mutex;

use ffimem_core::{
    with_primitive, ByteOrder, MemoryError, Primitive, PrimitiveType, TypeTable, Value,
};
use ffimem_region::{MemoryRegion, NativeBuffer, RegionConfig};

use crate::handle::HandleTable;
use crate::status::FfiStatus;
use crate::types::{FfiPrimitiveType, FfiRegionConfig, FfiValue};

enum RegionEntry {
    Owned(NativeBuffer),
    Foreign {
        base: NonNull<u8>,
        size: Option<usize>,
        config: RegionConfig,
    },
}

// SAFETY: foreign memory is owned by the C caller, who promised at wrap
// time that it stays valid until destroy and is touched only through this
// handle. Access is serialized by the REGIONS mutex, so moving the pointer
// between threads does not create concurrent access.
#[allow(unsafe_code)]
unsafe impl Send for RegionEntry {}

impl RegionEntry {
    #[allow(unsafe_code)]
    fn region(&mut self) -> Result<MemoryRegion<'_>, MemoryError> {
        match self {
            Self::Owned(buffer) => Ok(buffer.region()),
            // SAFETY: validity of the foreign span is the wrap contract.
            Self::Foreign { base, size, config } => unsafe {
                match *size {
                    Some(size) => MemoryRegion::from_raw_parts(base.as_ptr(), size, *config),
                    None => MemoryRegion::unbounded(base.as_ptr(), *config),
                }
            },
        }
    }
}

static REGIONS: Mutex<HandleTable<RegionEntry>> = Mutex::new(HandleTable::new());

type CallResult = Result<(), FfiStatus>;

/// Log a rejected access and map it to its status code.
fn reject(e: MemoryError) -> FfiStatus {
    log::debug!("region access rejected: {e}");
    FfiStatus::from(&e)
}

fn to_offset(offset: i64) -> Result<usize, FfiStatus> {
    usize::try_from(offset).map_err(|_| {
        reject(MemoryError::InvalidOffset {
            offset: offset.into(),
            element: None,
        })
    })
}

fn from_offset(offset: usize) -> Result<i64, FfiStatus> {
    i64::try_from(offset).map_err(|_| FfiStatus::InvalidOffset)
}

#[allow(unsafe_code)]
fn read_config(config: *const FfiRegionConfig) -> Result<RegionConfig, FfiStatus> {
    if config.is_null() {
        return Ok(RegionConfig::default());
    }
    // SAFETY: non-null config points to a valid FfiRegionConfig per caller
    // contract.
    RegionConfig::try_from(unsafe { &*config })
}

/// Store a non-null out-pointer value; null out-pointers are skipped.
#[allow(unsafe_code)]
fn write_opt<T>(out: *mut T, value: T) {
    if !out.is_null() {
        // SAFETY: non-null out-pointers are valid per caller contract.
        unsafe { *out = value };
    }
}

/// Caller-provided input bytes, or `InvalidArgument` for a null non-empty
/// buffer.
#[allow(unsafe_code)]
fn input<'a>(data: *const c_void, len: usize) -> Result<&'a [u8], FfiStatus> {
    if len == 0 {
        return Ok(&[]);
    }
    if data.is_null() {
        return Err(FfiStatus::InvalidArgument);
    }
    // SAFETY: data is valid for len bytes per caller contract.
    Ok(unsafe { std::slice::from_raw_parts(data.cast::<u8>(), len) })
}

/// Caller-provided output bytes, or `InvalidArgument` for a null non-empty
/// buffer.
#[allow(unsafe_code)]
fn output<'a>(out: *mut c_void, len: usize) -> Result<&'a mut [u8], FfiStatus> {
    if len == 0 {
        return Ok(&mut []);
    }
    if out.is_null() {
        return Err(FfiStatus::InvalidArgument);
    }
    // SAFETY: out is valid for len bytes per caller contract and does not
    // overlap the region being accessed.
    Ok(unsafe { std::slice::from_raw_parts_mut(out.cast::<u8>(), len) })
}

/// Bytes needed for `count` elements of `ty`.
fn array_bytes(ty: PrimitiveType, count: usize) -> Result<usize, FfiStatus> {
    TypeTable::native()
        .width(ty)
        .checked_mul(count)
        .ok_or(FfiStatus::InvalidArgument)
}

fn status(result: CallResult) -> i32 {
    match result {
        Ok(()) => FfiStatus::Ok as i32,
        Err(s) => s as i32,
    }
}

fn register(entry: RegionEntry, handle_out: *mut u64) -> i32 {
    let handle = ffi_lock!(REGIONS).insert(entry);
    write_opt(handle_out, handle);
    FfiStatus::Ok as i32
}

/// Run `f` against the region behind `handle`, holding the table lock.
fn with_region<F>(handle: u64, f: F) -> i32
where
    F: FnOnce(&mut MemoryRegion<'_>) -> CallResult,
{
    let mut regions = ffi_lock!(REGIONS);
    let Some(entry) = regions.get_mut(handle) else {
        return FfiStatus::InvalidHandle as i32;
    };
    status(
        entry
            .region()
            .map_err(reject)
            .and_then(|mut region| f(&mut region)),
    )
}

// ── Lifecycle ───────────────────────────────────────────────────────

/// Wrap `size` bytes of caller-owned memory at `ptr`.
///
/// The memory must stay valid, and be accessed only through the returned
/// handle, until [`ffimem_region_destroy`]. `config` may be null.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_wrap(
    ptr: *mut c_void,
    size: usize,
    config: *const FfiRegionConfig,
    handle_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if handle_out.is_null() {
            return FfiStatus::InvalidArgument as i32;
        }
        let Some(base) = NonNull::new(ptr.cast::<u8>()) else {
            return FfiStatus::NullPointer as i32;
        };
        let config = match read_config(config) {
            Ok(c) => c,
            Err(s) => return s as i32,
        };
        log::trace!("wrapping {size} caller bytes at {ptr:p}");
        register(
            RegionEntry::Foreign {
                base,
                size: Some(size),
                config,
            },
            handle_out,
        )
    })
}

/// Wrap caller-owned memory of unknown size at `ptr`.
///
/// Accesses are trusted to be in bounds. Same validity contract as
/// [`ffimem_region_wrap`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_wrap_unbounded(
    ptr: *mut c_void,
    config: *const FfiRegionConfig,
    handle_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if handle_out.is_null() {
            return FfiStatus::InvalidArgument as i32;
        }
        let Some(base) = NonNull::new(ptr.cast::<u8>()) else {
            return FfiStatus::NullPointer as i32;
        };
        let config = match read_config(config) {
            Ok(c) => c,
            Err(s) => return s as i32,
        };
        log::trace!("wrapping unbounded caller memory at {ptr:p}");
        register(
            RegionEntry::Foreign {
                base,
                size: None,
                config,
            },
            handle_out,
        )
    })
}

/// Allocate a zeroed buffer for `count` elements of type code `ty`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_buffer_create(
    ty: i32,
    count: usize,
    config: *const FfiRegionConfig,
    handle_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if handle_out.is_null() {
            return FfiStatus::InvalidArgument as i32;
        }
        let created = FfiPrimitiveType::from_code(ty).and_then(|ty| {
            let config = read_config(config)?;
            NativeBuffer::for_type(ty, count)
                .map(|b| b.with_config(config))
                .map_err(reject)
        });
        match created {
            Ok(buffer) => register(RegionEntry::Owned(buffer), handle_out),
            Err(s) => s as i32,
        }
    })
}

/// Allocate a zeroed buffer of `size` bytes.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_buffer_create_bytes(
    size: usize,
    config: *const FfiRegionConfig,
    handle_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if handle_out.is_null() {
            return FfiStatus::InvalidArgument as i32;
        }
        let created = read_config(config).and_then(|config| {
            NativeBuffer::new(size)
                .map(|b| b.with_config(config))
                .map_err(reject)
        });
        match created {
            Ok(buffer) => register(RegionEntry::Owned(buffer), handle_out),
            Err(s) => s as i32,
        }
    })
}

/// Release a region. Buffers are freed; wrapped memory is left to its owner.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_destroy(handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(REGIONS).remove(handle) {
            Some(_) => FfiStatus::Ok as i32,
            None => FfiStatus::InvalidHandle as i32,
        }
    })
}

/// Write the region size in bytes to `size_out`, or -1 if unbounded.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_size(handle: u64, size_out: *mut i64) -> i32 {
    ffi_guard!({
        if size_out.is_null() {
            return FfiStatus::InvalidArgument as i32;
        }
        with_region(handle, |region| {
            let size = match region.size() {
                Some(size) => from_offset(size)?,
                None => -1,
            };
            write_opt(size_out, size);
            Ok(())
        })
    })
}

// ── Scalar access ───────────────────────────────────────────────────

/// Read one value of type code `ty` at `offset` into `value_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_get(
    handle: u64,
    ty: i32,
    offset: i64,
    value_out: *mut FfiValue,
) -> i32 {
    ffi_guard!({
        if value_out.is_null() {
            return FfiStatus::InvalidArgument as i32;
        }
        with_region(handle, |region| {
            let ty = FfiPrimitiveType::from_code(ty)?;
            let value = region.get_value(ty, to_offset(offset)?).map_err(reject)?;
            write_opt(value_out, FfiValue::from(value));
            Ok(())
        })
    })
}

/// Write `*value` as type code `ty` at `offset`.
///
/// On success the offset just past the value is written to `next_out`,
/// which may be null.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_put(
    handle: u64,
    ty: i32,
    offset: i64,
    value: *const FfiValue,
    next_out: *mut i64,
) -> i32 {
    ffi_guard!({
        if value.is_null() {
            return FfiStatus::InvalidArgument as i32;
        }
        // SAFETY: value is non-null and valid per caller contract.
        let value = match Value::try_from(unsafe { &*value }) {
            Ok(v) => v,
            Err(s) => return s as i32,
        };
        with_region(handle, |region| {
            let ty = FfiPrimitiveType::from_code(ty)?;
            let next = region
                .put_value(ty, to_offset(offset)?, value)
                .map_err(reject)?;
            write_opt(next_out, from_offset(next)?);
            Ok(())
        })
    })
}

// ── Array access ────────────────────────────────────────────────────

fn get_array(
    region: &mut MemoryRegion<'_>,
    ty: PrimitiveType,
    offset: usize,
    length: usize,
    out: &mut [u8],
) -> CallResult {
    if out.len() < array_bytes(ty, length)? {
        return Err(FfiStatus::BufferTooSmall);
    }
    with_primitive!(ty, T => {
        let values = region.get_array::<T>(offset, length).map_err(reject)?;
        let mut host = MemoryRegion::new(out);
        host.write_array(&values).map_err(reject)?;
        Ok(())
    })
}

fn put_array(
    region: &mut MemoryRegion<'_>,
    ty: PrimitiveType,
    offset: usize,
    data: &[u8],
) -> Result<usize, FfiStatus> {
    with_primitive!(ty, T => {
        let values: Vec<T> = data
            .chunks_exact(T::WIDTH)
            .map(|chunk| T::decode(chunk, ByteOrder::Native))
            .collect();
        region.put_array(offset, &values).map_err(reject)
    })
}

/// Read `length` elements of type code `ty` starting at `offset` into
/// `out`, a host-order buffer of `out_len` bytes.
///
/// Fails with `BufferTooSmall` if `out_len < length * width`. Nothing is
/// written to `out` on failure.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_get_array(
    handle: u64,
    ty: i32,
    offset: i64,
    length: usize,
    out: *mut c_void,
    out_len: usize,
) -> i32 {
    ffi_guard!({
        with_region(handle, |region| {
            let ty = FfiPrimitiveType::from_code(ty)?;
            let offset = to_offset(offset)?;
            get_array(region, ty, offset, length, output(out, out_len)?)
        })
    })
}

/// Read `length` elements of type code `ty` from offset 0 into `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_read_array(
    handle: u64,
    ty: i32,
    length: usize,
    out: *mut c_void,
    out_len: usize,
) -> i32 {
    ffimem_region_get_array(handle, ty, 0, length, out, out_len)
}

/// Write `count` host-order elements of type code `ty` from `data`
/// starting at `offset`.
///
/// On success the offset just past the last element is written to
/// `next_out` (may be null). If an element fails, earlier elements stay
/// written.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_put_array(
    handle: u64,
    ty: i32,
    offset: i64,
    data: *const c_void,
    count: usize,
    next_out: *mut i64,
) -> i32 {
    ffi_guard!({
        with_region(handle, |region| {
            let ty = FfiPrimitiveType::from_code(ty)?;
            let offset = to_offset(offset)?;
            let data = input(data, array_bytes(ty, count)?)?;
            let next = put_array(region, ty, offset, data)?;
            write_opt(next_out, from_offset(next)?);
            Ok(())
        })
    })
}

/// Write `count` host-order elements from `data` starting at offset 0.
///
/// On success the number of bytes written goes to `written_out` (may be
/// null).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_write_array(
    handle: u64,
    ty: i32,
    data: *const c_void,
    count: usize,
    written_out: *mut i64,
) -> i32 {
    ffimem_region_put_array(handle, ty, 0, data, count, written_out)
}

// ── Byte access ─────────────────────────────────────────────────────

/// Copy `length` raw bytes at `offset` into `out` (`out_len` bytes).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_get_bytes(
    handle: u64,
    offset: i64,
    length: usize,
    out: *mut c_void,
    out_len: usize,
) -> i32 {
    ffi_guard!({
        with_region(handle, |region| {
            let offset = to_offset(offset)?;
            if out_len < length {
                return Err(FfiStatus::BufferTooSmall);
            }
            let out = output(out, out_len)?;
            let bytes = region.get_bytes(offset, length).map_err(reject)?;
            out[..length].copy_from_slice(&bytes);
            Ok(())
        })
    })
}

/// Copy `len` raw bytes from `data` into the region at `offset`.
///
/// On success the offset just past them goes to `next_out` (may be null).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_put_bytes(
    handle: u64,
    offset: i64,
    data: *const c_void,
    len: usize,
    next_out: *mut i64,
) -> i32 {
    ffi_guard!({
        with_region(handle, |region| {
            let offset = to_offset(offset)?;
            let next = region
                .put_bytes(offset, input(data, len)?)
                .map_err(reject)?;
            write_opt(next_out, from_offset(next)?);
            Ok(())
        })
    })
}

/// Zero a bounded region. The number of bytes cleared goes to
/// `cleared_out` (may be null); unbounded regions clear nothing.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_region_clear(handle: u64, cleared_out: *mut u64) -> i32 {
    ffi_guard!({
        with_region(handle, |region| {
            let cleared = region.clear();
            write_opt(cleared_out, cleared as u64);
            Ok(())
        })
    })
}

// ── Type queries ────────────────────────────────────────────────────

/// Write the width in bytes of type code `ty` to `size_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_type_size(ty: i32, size_out: *mut usize) -> i32 {
    ffi_guard!({
        if size_out.is_null() {
            return FfiStatus::InvalidArgument as i32;
        }
        match FfiPrimitiveType::from_code(ty) {
            Ok(ty) => {
                write_opt(size_out, TypeTable::native().width(ty));
                FfiStatus::Ok as i32
            }
            Err(s) => s as i32,
        }
    })
}

/// Resolve a NUL-terminated type name or C alias (`"int"`, `"double"`,
/// `"ulong"`, ...) to a type code written to `ty_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_type_resolve(name: *const c_char, ty_out: *mut i32) -> i32 {
    ffi_guard!({
        if name.is_null() || ty_out.is_null() {
            return FfiStatus::InvalidArgument as i32;
        }
        // SAFETY: name is a valid NUL-terminated string per caller contract.
        let Ok(name) = unsafe { CStr::from_ptr(name) }.to_str() else {
            return FfiStatus::InvalidArgument as i32;
        };
        match TypeTable::native().resolve(name) {
            Ok(ty) => {
                write_opt(ty_out, FfiPrimitiveType::from(ty) as i32);
                FfiStatus::Ok as i32
            }
            Err(e) => reject(e) as i32,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FfiByteOrder, FfiValueKind};
    use ffimem_test_utils::patterned;
    use proptest::prelude::*;

    const INT16: i32 = FfiPrimitiveType::Int16 as i32;
    const INT32: i32 = FfiPrimitiveType::Int32 as i32;
    const UINT8: i32 = FfiPrimitiveType::UInt8 as i32;
    const UINT32: i32 = FfiPrimitiveType::UInt32 as i32;
    const FLOAT64: i32 = FfiPrimitiveType::Float64 as i32;

    fn bytes_buffer(size: usize) -> u64 {
        let mut h = 0u64;
        assert_eq!(
            ffimem_buffer_create_bytes(size, std::ptr::null(), &mut h),
            FfiStatus::Ok as i32
        );
        h
    }

    fn uint(v: u64) -> FfiValue {
        FfiValue {
            kind: FfiValueKind::Unsigned as i32,
            uint_value: v,
            ..FfiValue::default()
        }
    }

    fn int(v: i64) -> FfiValue {
        FfiValue {
            kind: FfiValueKind::Signed as i32,
            int_value: v,
            ..FfiValue::default()
        }
    }

    #[test]
    fn buffer_put_get_round_trip() {
        let h = bytes_buffer(8);
        let mut next = 0i64;
        assert_eq!(
            ffimem_region_put(h, UINT32, 0, &uint(0xDEADBEEF), &mut next),
            FfiStatus::Ok as i32
        );
        assert_eq!(next, 4);

        let mut out = FfiValue::default();
        assert_eq!(ffimem_region_get(h, UINT32, 0, &mut out), 0);
        assert_eq!(out, uint(0xDEADBEEF));
        assert_eq!(ffimem_region_get(h, UINT32, 4, &mut out), 0);
        assert_eq!(out, uint(0));

        assert_eq!(ffimem_region_destroy(h), FfiStatus::Ok as i32);
    }

    #[test]
    fn unallocatable_buffers_report_allocation_failure() {
        let mut h = 0u64;
        assert_eq!(
            ffimem_buffer_create(UINT8, usize::MAX, std::ptr::null(), &mut h),
            FfiStatus::AllocationFailed as i32
        );
        assert_eq!(
            ffimem_buffer_create(FLOAT64, usize::MAX, std::ptr::null(), &mut h),
            FfiStatus::InvalidOffset as i32
        );
        assert_eq!(
            ffimem_buffer_create_bytes(usize::MAX, std::ptr::null(), &mut h),
            FfiStatus::AllocationFailed as i32
        );
        assert_eq!(h, 0);
    }

    #[test]
    fn destroyed_handle_is_invalid() {
        let h = bytes_buffer(4);
        assert_eq!(ffimem_region_destroy(h), 0);
        assert_eq!(ffimem_region_destroy(h), FfiStatus::InvalidHandle as i32);
        let mut out = FfiValue::default();
        assert_eq!(
            ffimem_region_get(h, UINT8, 0, &mut out),
            FfiStatus::InvalidHandle as i32
        );
    }

    #[test]
    fn wrapped_memory_sees_writes() {
        let mut bytes = patterned(2);
        let mut h = 0u64;
        assert_eq!(
            ffimem_region_wrap(
                bytes.as_mut_ptr().cast(),
                bytes.len(),
                std::ptr::null(),
                &mut h
            ),
            0
        );

        assert_eq!(
            ffimem_region_put(h, INT32, 0, &int(5), std::ptr::null_mut()),
            FfiStatus::OutOfBounds as i32
        );
        assert_eq!(
            ffimem_region_put(h, UINT8, 1, &uint(9), std::ptr::null_mut()),
            0
        );
        assert_eq!(ffimem_region_destroy(h), 0);
        assert_eq!(bytes, vec![0, 9]);
    }

    #[test]
    fn wrap_rejects_null_memory() {
        let mut h = 0u64;
        assert_eq!(
            ffimem_region_wrap(std::ptr::null_mut(), 4, std::ptr::null(), &mut h),
            FfiStatus::NullPointer as i32
        );
        assert_eq!(
            ffimem_region_wrap_unbounded(std::ptr::null_mut(), std::ptr::null(), &mut h),
            FfiStatus::NullPointer as i32
        );
    }

    #[test]
    fn negative_offset_is_invalid() {
        let h = bytes_buffer(8);
        let mut out = FfiValue::default();
        assert_eq!(
            ffimem_region_get(h, UINT8, -1, &mut out),
            FfiStatus::InvalidOffset as i32
        );
        ffimem_region_destroy(h);
    }

    #[test]
    fn narrowing_failures_map_to_status() {
        let h = bytes_buffer(8);
        assert_eq!(
            ffimem_region_put(h, UINT8, 0, &uint(256), std::ptr::null_mut()),
            FfiStatus::ValueOutOfRange as i32
        );
        let float = FfiValue {
            kind: FfiValueKind::Float as i32,
            float_value: 1.5,
            ..FfiValue::default()
        };
        assert_eq!(
            ffimem_region_put(h, INT32, 0, &float, std::ptr::null_mut()),
            FfiStatus::TypeMismatch as i32
        );
        assert_eq!(
            ffimem_region_put(h, 42, 0, &float, std::ptr::null_mut()),
            FfiStatus::UnknownType as i32
        );
        ffimem_region_destroy(h);
    }

    #[test]
    fn int16_array_through_host_buffers() {
        let h = bytes_buffer(4);
        let src: [i16; 2] = [1, 2];
        let mut written = 0i64;
        assert_eq!(
            ffimem_region_write_array(h, INT16, src.as_ptr().cast(), 2, &mut written),
            0
        );
        assert_eq!(written, 4);

        let mut dst = [0i16; 2];
        assert_eq!(
            ffimem_region_read_array(h, INT16, 2, dst.as_mut_ptr().cast(), 4),
            0
        );
        assert_eq!(dst, [1, 2]);
        ffimem_region_destroy(h);
    }

    #[test]
    fn short_output_buffer_is_reported() {
        let h = bytes_buffer(16);
        let mut dst = [0u8; 7];
        assert_eq!(
            ffimem_region_get_array(h, FLOAT64, 0, 1, dst.as_mut_ptr().cast(), dst.len()),
            FfiStatus::BufferTooSmall as i32
        );
        assert_eq!(
            ffimem_region_get_bytes(h, 0, 8, dst.as_mut_ptr().cast(), dst.len()),
            FfiStatus::BufferTooSmall as i32
        );
        ffimem_region_destroy(h);
    }

    #[test]
    fn big_endian_region_exposes_host_order_arrays() {
        let config = FfiRegionConfig {
            byte_order: FfiByteOrder::Big as i32,
            check_alignment: 0,
        };
        let mut h = 0u64;
        assert_eq!(ffimem_buffer_create(UINT32, 1, &config, &mut h), 0);
        assert_eq!(
            ffimem_region_put(h, UINT32, 0, &uint(0x01020304), std::ptr::null_mut()),
            0
        );

        let mut raw = [0u8; 4];
        assert_eq!(
            ffimem_region_get_bytes(h, 0, 4, raw.as_mut_ptr().cast(), 4),
            0
        );
        assert_eq!(raw, [1, 2, 3, 4]);

        let mut host = [0u32; 1];
        assert_eq!(
            ffimem_region_get_array(h, UINT32, 0, 1, host.as_mut_ptr().cast(), 4),
            0
        );
        assert_eq!(host, [0x01020304]);
        ffimem_region_destroy(h);
    }

    #[test]
    fn partial_array_write_keeps_prefix() {
        let h = bytes_buffer(5);
        let src: [u16; 3] = [0x1111, 0x2222, 0x3333];
        let mut next = -7i64;
        assert_eq!(
            ffimem_region_put_array(h, FfiPrimitiveType::UInt16 as i32, 0, src.as_ptr().cast(), 3, &mut next),
            FfiStatus::OutOfBounds as i32
        );
        assert_eq!(next, -7);
        let mut raw = [0u8; 5];
        assert_eq!(
            ffimem_region_get_bytes(h, 0, 5, raw.as_mut_ptr().cast(), 5),
            0
        );
        assert_eq!(raw, [0x11, 0x11, 0x22, 0x22, 0]);
        ffimem_region_destroy(h);
    }

    #[test]
    fn size_and_clear() {
        let h = bytes_buffer(6);
        let mut size = 0i64;
        assert_eq!(ffimem_region_size(h, &mut size), 0);
        assert_eq!(size, 6);

        let data = [0xffu8; 6];
        assert_eq!(
            ffimem_region_put_bytes(h, 0, data.as_ptr().cast(), 6, std::ptr::null_mut()),
            0
        );
        let mut cleared = 0u64;
        assert_eq!(ffimem_region_clear(h, &mut cleared), 0);
        assert_eq!(cleared, 6);

        let mut out = FfiValue::default();
        assert_eq!(ffimem_region_get(h, UINT32, 2, &mut out), 0);
        assert_eq!(out, uint(0));
        ffimem_region_destroy(h);
    }

    #[test]
    fn unbounded_region_reports_no_size() {
        let mut bytes = [0u8; 8];
        let mut h = 0u64;
        assert_eq!(
            ffimem_region_wrap_unbounded(bytes.as_mut_ptr().cast(), std::ptr::null(), &mut h),
            0
        );
        let mut size = 0i64;
        assert_eq!(ffimem_region_size(h, &mut size), 0);
        assert_eq!(size, -1);

        assert_eq!(
            ffimem_region_put(h, INT32, 4, &int(-2), std::ptr::null_mut()),
            0
        );
        let mut cleared = 1u64;
        assert_eq!(ffimem_region_clear(h, &mut cleared), 0);
        assert_eq!(cleared, 0);
        ffimem_region_destroy(h);
        assert_eq!(&bytes[4..], &(-2i32).to_ne_bytes());
    }

    #[test]
    fn type_queries() {
        let mut size = 0usize;
        assert_eq!(ffimem_type_size(FLOAT64, &mut size), 0);
        assert_eq!(size, 8);
        assert_eq!(
            ffimem_type_size(-3, &mut size),
            FfiStatus::UnknownType as i32
        );

        let mut ty = -1i32;
        assert_eq!(ffimem_type_resolve(c"double".as_ptr(), &mut ty), 0);
        assert_eq!(ty, FLOAT64);
        assert_eq!(ffimem_type_resolve(c"int".as_ptr(), &mut ty), 0);
        assert_eq!(ty, INT32);
        assert_eq!(
            ffimem_type_resolve(c"quad".as_ptr(), &mut ty),
            FfiStatus::UnknownType as i32
        );
    }

    #[test]
    fn typed_buffer_is_zeroed() {
        let mut h = 0u64;
        assert_eq!(ffimem_buffer_create(INT32, 3, std::ptr::null(), &mut h), 0);
        let mut size = 0i64;
        ffimem_region_size(h, &mut size);
        assert_eq!(size, 12);
        let mut dst = [7i32; 3];
        assert_eq!(
            ffimem_region_read_array(h, INT32, 3, dst.as_mut_ptr().cast(), 12),
            0
        );
        assert_eq!(dst, [0; 3]);
        ffimem_region_destroy(h);
    }

    proptest! {
        #[test]
        fn uint32_round_trip_at_any_offset(v in any::<u32>(), offset in 0i64..=12) {
            let h = bytes_buffer(16);
            prop_assert_eq!(
                ffimem_region_put(h, UINT32, offset, &uint(v.into()), std::ptr::null_mut()),
                0
            );
            let mut out = FfiValue::default();
            prop_assert_eq!(ffimem_region_get(h, UINT32, offset, &mut out), 0);
            prop_assert_eq!(out, uint(v.into()));
            ffimem_region_destroy(h);
        }
    }
}
