//! Region extents and the bounds check every access goes through.

use ffimem_core::MemoryError;

/// How far a region reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extent {
    /// Exactly this many bytes are addressable.
    Bounded(usize),
    /// The size is unknown; only address-space overflow is checked.
    Unbounded,
}

impl Extent {
    /// Size in bytes, if known.
    pub const fn size(self) -> Option<usize> {
        match self {
            Self::Bounded(size) => Some(size),
            Self::Unbounded => None,
        }
    }

    /// Whether the extent is [`Extent::Bounded`].
    pub const fn is_bounded(self) -> bool {
        matches!(self, Self::Bounded(_))
    }

    /// Check that `[offset, offset + len)` is addressable and return its end.
    pub fn check(self, offset: usize, len: usize) -> Result<usize, MemoryError> {
        let end = offset
            .checked_add(len)
            .ok_or(MemoryError::InvalidOffset {
                offset: offset as i128,
                element: None,
            })?;
        match self {
            Self::Bounded(size) if end > size => Err(MemoryError::OutOfBounds {
                offset,
                width: len,
                size,
                element: None,
            }),
            _ => Ok(end),
        }
    }

    /// Bytes left after `offset`; `None` when unbounded.
    ///
    /// Returns `Some(0)` when `offset` is at or past the end.
    pub fn remaining(self, offset: usize) -> Option<usize> {
        self.size().map(|size| size.saturating_sub(offset))
    }
}
