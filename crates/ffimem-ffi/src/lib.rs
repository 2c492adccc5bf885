//! C FFI bindings for ffimem memory regions.
//!
//! Regions live in a handle table and are addressed from C by opaque `u64`
//! handles. Every entry point returns an `i32` [`FfiStatus`] and writes its
//! results through out-pointers, which are only written on success.
//! This is the only crate besides `ffimem-region` that contains `unsafe`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_char;

/// Run an FFI body, converting a panic into [`FfiStatus::Panicked`].
///
/// The panic message is stored per thread for
/// [`ffimem_last_panic_message`].
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(status) => status,
            Err(payload) => {
                let message = $crate::panic_message(payload.as_ref());
                log::error!("panic caught at FFI boundary: {message}");
                $crate::LAST_PANIC.with(|cell| *cell.borrow_mut() = message);
                $crate::status::FfiStatus::Panicked as i32
            }
        }
    };
}

/// Lock a mutex, returning [`FfiStatus::InternalError`] from the enclosing
/// function if it is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => {
                log::error!("handle table mutex poisoned");
                return $crate::status::FfiStatus::InternalError as i32;
            }
        }
    };
}

mod handle;
pub mod region;
pub mod status;
pub mod types;

pub use status::FfiStatus;
pub use types::{FfiByteOrder, FfiPrimitiveType, FfiRegionConfig, FfiValue, FfiValueKind};

thread_local! {
    pub(crate) static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_owned()
    }
}

/// Copy the message of the last panic caught on this thread into `buf`.
///
/// Writes at most `buf_len - 1` bytes followed by a NUL. Returns the full
/// message length in bytes (excluding the NUL), so callers can pass a null
/// `buf` first to size their buffer. Returns 0 if no panic was caught.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffimem_last_panic_message(buf: *mut c_char, buf_len: usize) -> i32 {
    LAST_PANIC.with(|cell| {
        let message = cell.borrow();
        let bytes = message.as_bytes();
        if !buf.is_null() && buf_len > 0 {
            let n = bytes.len().min(buf_len - 1);
            // SAFETY: buf is valid for buf_len bytes per caller contract and
            // n + 1 <= buf_len.
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), n);
                *buf.add(n) = 0;
            }
        }
        i32::try_from(bytes.len()).unwrap_or(i32::MAX)
    })
}
