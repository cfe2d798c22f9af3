//! Byte-level reinterpretation for ABI mirror structures
//!
//! Debuggee memory arrives as raw byte buffers; the mirrors in this crate are
//! plain-old-data, so reading one out of a buffer is a bounds check plus an
//! unaligned copy. No endianness conversion is performed: the buffers come from
//! the same little-endian target the mirrors describe.

use crate::error::{AbiError, AbiResult};
use std::{mem, slice};
use tracing::debug;

/// Marker trait for plain-old-data ABI mirrors.
///
/// # Safety
///
/// Implementors must be `#[repr(C)]`, contain no implicit padding bytes, and be
/// valid for every bit pattern. The mirrors in this crate satisfy all three
/// because the platform layouts carry their alignment filler as explicit fields
/// and every field is a plain integer (or a nested `Pod` struct).
pub unsafe trait Pod: Copy + Sized + 'static {
    /// View the structure as its raw byte representation
    fn as_bytes(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self as *const Self as *const u8, mem::size_of::<Self>()) }
    }

    /// Reconstruct the structure from bytes captured out of a debuggee.
    ///
    /// Trailing bytes beyond the structure size are ignored; the buffer may sit
    /// at any alignment.
    fn read_from(bytes: &[u8]) -> AbiResult<Self> {
        let expected = mem::size_of::<Self>();
        if bytes.len() < expected {
            debug!(
                expected,
                actual = bytes.len(),
                "buffer too small for ABI structure"
            );
            return Err(AbiError::buffer_too_small(expected, bytes.len()));
        }

        Ok(unsafe { (bytes.as_ptr() as *const Self).read_unaligned() })
    }
}
