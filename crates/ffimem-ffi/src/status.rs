//! C-compatible status codes.
//!
//! [`FfiStatus`] is a `repr(i32)` enum covering every error an entry point
//! can report, with a conversion from [`MemoryError`].

use ffimem_core::MemoryError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FfiStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or the region was already destroyed.
    InvalidHandle = -1,
    /// Offset is negative or overflows the address space.
    InvalidOffset = -2,
    /// Access range leaves the region.
    OutOfBounds = -3,
    /// Value is not representable in the target type.
    ValueOutOfRange = -4,
    /// A required pointer is null.
    NullPointer = -5,
    /// Value kind cannot be stored in the target type.
    TypeMismatch = -6,
    /// Type name or type code is not recognized.
    UnknownType = -7,
    /// An argument is malformed (bad enum code, invalid UTF-8, ...).
    InvalidArgument = -8,
    /// Caller-provided buffer is too small.
    BufferTooSmall = -9,
    /// No NUL terminator before the end of the region.
    UnterminatedString = -10,
    /// Address is not aligned for the accessed type.
    Misaligned = -11,
    /// Buffer storage could not be allocated.
    AllocationFailed = -12,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&MemoryError> for FfiStatus {
    fn from(e: &MemoryError) -> Self {
        match e {
            MemoryError::InvalidOffset { .. } => FfiStatus::InvalidOffset,
            MemoryError::OutOfBounds { .. } => FfiStatus::OutOfBounds,
            MemoryError::ValueOutOfRange { .. } => FfiStatus::ValueOutOfRange,
            MemoryError::TypeMismatch { .. } => FfiStatus::TypeMismatch,
            MemoryError::NullPointer => FfiStatus::NullPointer,
            MemoryError::UnknownType { .. } => FfiStatus::UnknownType,
            MemoryError::UnterminatedString { .. } => FfiStatus::UnterminatedString,
            MemoryError::Misaligned { .. } => FfiStatus::Misaligned,
            MemoryError::AllocationFailed { .. } => FfiStatus::AllocationFailed,
        }
    }
}
