//! Region configuration parameters.

use ffimem_core::ByteOrder;

/// Configuration for how a region encodes values.
///
/// Copied into every region (and every slice of it) at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionConfig {
    /// Byte order for multi-byte values.
    ///
    /// Default: [`ByteOrder::Native`]. Anything else is only useful for
    /// memory shared with a foreign-endian producer.
    pub byte_order: ByteOrder,

    /// Reject scalar accesses whose absolute address is not a multiple of
    /// the type width.
    ///
    /// Default: `false`. Unaligned accesses are always performed with
    /// byte copies, so this is a conformance check, not a safety one.
    pub check_alignment: bool,
}

impl RegionConfig {
    /// Default byte order.
    pub const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::Native;

    /// Default alignment checking.
    pub const DEFAULT_CHECK_ALIGNMENT: bool = false;

    /// Create a config with default values.
    pub const fn new() -> Self {
        Self {
            byte_order: Self::DEFAULT_BYTE_ORDER,
            check_alignment: Self::DEFAULT_CHECK_ALIGNMENT,
        }
    }

    /// Use `order` for multi-byte values.
    pub const fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Enable or disable alignment checking.
    pub const fn with_alignment_check(mut self, enabled: bool) -> Self {
        self.check_alignment = enabled;
        self
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self::new()
    }
}
