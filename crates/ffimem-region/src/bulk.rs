//! The two bulk algorithms every array operation is built from.
//!
//! Both are parameterized by the element width and a scalar accessor, so
//! the generic (`T: Primitive`) and tagged (`PrimitiveType`) paths share
//! one implementation.

use ffimem_core::MemoryError;

/// Upper bound on up-front allocation for array reads. Lengths beyond this
/// grow the vector as elements are read, so a bogus length fails on its
/// first out-of-bounds element instead of on allocation.
const PREALLOC_LIMIT: usize = 4096;

/// Offset of element `index` in an array starting at `offset`.
pub(crate) fn element_offset(
    offset: usize,
    index: usize,
    width: usize,
) -> Result<usize, MemoryError> {
    index
        .checked_mul(width)
        .and_then(|delta| offset.checked_add(delta))
        .ok_or(MemoryError::InvalidOffset {
            offset: offset as i128 + index as i128 * width as i128,
            element: Some(index),
        })
}

/// Read `length` elements at `offset + i * width` in index order.
///
/// The first failing element aborts the read; its index is attached to the
/// error and no partial result is returned.
pub(crate) fn read_strided<V>(
    offset: usize,
    length: usize,
    width: usize,
    mut read: impl FnMut(usize) -> Result<V, MemoryError>,
) -> Result<Vec<V>, MemoryError> {
    let mut out = Vec::with_capacity(length.min(PREALLOC_LIMIT));
    for index in 0..length {
        let at = element_offset(offset, index, width)?;
        out.push(read(at).map_err(|e| e.at_element(index))?);
    }
    Ok(out)
}

/// Write `values` in order, threading the offset through the fold.
///
/// Returns the offset just past the last element written. On failure the
/// elements before the failing one stay written.
pub(crate) fn write_strided<V>(
    offset: usize,
    values: impl IntoIterator<Item = V>,
    width: usize,
    mut write: impl FnMut(usize, V) -> Result<usize, MemoryError>,
) -> Result<usize, MemoryError> {
    values
        .into_iter()
        .enumerate()
        .try_fold(offset, |at, (index, value)| {
            if let Err(e) = write(at, value) {
                log::debug!(
                    "bulk write aborted at element {index}: {} bytes already written",
                    at - offset
                );
                return Err(e.at_element(index));
            }
            element_offset(at, 1, width).map_err(|e| e.at_element(index))
        })
}
