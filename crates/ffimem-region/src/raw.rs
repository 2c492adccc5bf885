//! Low-level primitives that touch region memory.
//!
//! Every read or write of foreign memory in this crate goes through one of
//! these functions. Callers bounds-check first; these only copy bytes.
//! Copies are byte-wise, so unaligned offsets are fine.

#![allow(unsafe_code)]

use std::ptr::{self, NonNull};

/// Copy `out.len()` bytes starting at `base + offset` into `out`.
///
/// # Safety
///
/// `[base + offset, base + offset + out.len())` must be valid for reads
/// and must not overlap `out`.
pub(crate) unsafe fn load(base: NonNull<u8>, offset: usize, out: &mut [u8]) {
    // SAFETY: range validity and disjointness are the caller's contract.
    unsafe { ptr::copy_nonoverlapping(base.as_ptr().add(offset), out.as_mut_ptr(), out.len()) }
}

/// Read the single byte at `base + offset`.
///
/// # Safety
///
/// `base + offset` must be valid for reads.
pub(crate) unsafe fn load_byte(base: NonNull<u8>, offset: usize) -> u8 {
    // SAFETY: validity is the caller's contract; u8 has no alignment.
    unsafe { ptr::read(base.as_ptr().add(offset)) }
}

/// Copy `data` to `base + offset`.
///
/// # Safety
///
/// `[base + offset, base + offset + data.len())` must be valid for writes
/// and must not overlap `data`.
pub(crate) unsafe fn store(base: NonNull<u8>, offset: usize, data: &[u8]) {
    // SAFETY: range validity and disjointness are the caller's contract.
    unsafe { ptr::copy_nonoverlapping(data.as_ptr(), base.as_ptr().add(offset), data.len()) }
}

/// Set `len` bytes starting at `base + offset` to `byte`.
///
/// # Safety
///
/// `[base + offset, base + offset + len)` must be valid for writes.
pub(crate) unsafe fn fill(base: NonNull<u8>, offset: usize, len: usize, byte: u8) {
    // SAFETY: range validity is the caller's contract.
    unsafe { ptr::write_bytes(base.as_ptr().add(offset), byte, len) }
}

/// Pointer to `base + offset`.
///
/// # Safety
///
/// `base + offset` must be within (or one past the end of) the same
/// allocation as `base`.
pub(crate) unsafe fn advance(base: NonNull<u8>, offset: usize) -> NonNull<u8> {
    // SAFETY: in-bounds per caller contract, so the result is non-null.
    unsafe { NonNull::new_unchecked(base.as_ptr().add(offset)) }
}
