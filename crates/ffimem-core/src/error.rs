//! Error types for typed memory access.

use std::error::Error;
use std::fmt;

use crate::types::PrimitiveType;
use crate::value::Value;

/// Errors from scalar, bulk, and byte-level region access.
///
/// Bulk operations report the first failing element through the
/// `element` field of the variant the scalar access produced, so callers
/// can match on the same variant whether the failure came from a scalar
/// or an array call.
#[derive(Clone, Debug, PartialEq)]
pub enum MemoryError {
    /// The offset is negative, or computing it overflowed the address space.
    InvalidOffset {
        /// The offending offset, widened so negative and overflowed values
        /// are both representable.
        offset: i128,
        /// Index of the failing element in a bulk operation.
        element: Option<usize>,
    },
    /// The access range `[offset, offset + width)` leaves the region.
    OutOfBounds {
        /// Start of the attempted access.
        offset: usize,
        /// Number of bytes the access needed.
        width: usize,
        /// Size of the region in bytes.
        size: usize,
        /// Index of the failing element in a bulk operation.
        element: Option<usize>,
    },
    /// The value cannot be represented in the target type without loss.
    ValueOutOfRange {
        /// Target type.
        ty: PrimitiveType,
        /// The rejected value.
        value: Value,
        /// Index of the failing element in a bulk operation.
        element: Option<usize>,
    },
    /// The value's kind cannot be stored in the target type at all
    /// (e.g. a float into an integer slot).
    TypeMismatch {
        /// Target type.
        ty: PrimitiveType,
        /// The rejected value.
        value: Value,
        /// Index of the failing element in a bulk operation.
        element: Option<usize>,
    },
    /// The region's base address is null.
    NullPointer,
    /// A type name did not resolve to a primitive type.
    UnknownType {
        /// The unresolved name.
        name: String,
    },
    /// No NUL terminator was found before the end of the region.
    UnterminatedString {
        /// Where the scan started.
        offset: usize,
        /// Size of the region in bytes.
        size: usize,
    },
    /// The absolute address is not aligned for the accessed type.
    Misaligned {
        /// Offset of the access within the region.
        offset: usize,
        /// Required alignment in bytes.
        align: usize,
    },
    /// Owned storage of the requested size could not be allocated.
    AllocationFailed {
        /// Requested size in bytes.
        size: usize,
    },
}

impl MemoryError {
    /// Attach the index of the failing element of a bulk operation.
    ///
    /// Variants without an element slot are returned unchanged.
    pub fn at_element(mut self, index: usize) -> Self {
        match &mut self {
            Self::InvalidOffset { element, .. }
            | Self::OutOfBounds { element, .. }
            | Self::ValueOutOfRange { element, .. }
            | Self::TypeMismatch { element, .. } => *element = Some(index),
            _ => {}
        }
        self
    }

    /// Index of the failing element, if this error came from a bulk operation.
    pub fn element(&self) -> Option<usize> {
        match self {
            Self::InvalidOffset { element, .. }
            | Self::OutOfBounds { element, .. }
            | Self::ValueOutOfRange { element, .. }
            | Self::TypeMismatch { element, .. } => *element,
            _ => None,
        }
    }
}

fn write_element(f: &mut fmt::Formatter<'_>, element: &Option<usize>) -> fmt::Result {
    if let Some(idx) = element {
        write!(f, " (element {idx})")?;
    }
    Ok(())
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOffset { offset, element } => {
                write!(f, "invalid memory offset {offset}")?;
                write_element(f, element)
            }
            Self::OutOfBounds {
                offset,
                width,
                size,
                element,
            } => {
                write!(
                    f,
                    "memory access offset={offset} width={width} is out of bounds of {size} bytes"
                )?;
                write_element(f, element)
            }
            Self::ValueOutOfRange { ty, value, element } => {
                write!(f, "value {value} is out of range for {ty}")?;
                write_element(f, element)
            }
            Self::TypeMismatch { ty, value, element } => {
                write!(f, "cannot store {:?} value {value} as {ty}", value.kind())?;
                write_element(f, element)
            }
            Self::NullPointer => write!(f, "attempted to access a null pointer"),
            Self::UnknownType { name } => write!(f, "unknown primitive type '{name}'"),
            Self::UnterminatedString { offset, size } => {
                write!(
                    f,
                    "no NUL terminator between offset {offset} and end of region ({size} bytes)"
                )
            }
            Self::Misaligned { offset, align } => {
                write!(f, "offset {offset} is not {align}-byte aligned")
            }
            Self::AllocationFailed { size } => {
                write!(f, "failed to allocate {size} bytes")
            }
        }
    }
}

impl Error for MemoryError {}
