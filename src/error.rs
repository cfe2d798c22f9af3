//! Custom error types for dbgeng-abi

use thiserror::Error;

/// Main error type for ABI mirror validation and decoding
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AbiError {
    #[error("Buffer too small: expected {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("Exception parameter count {count} exceeds capacity {capacity}")]
    TooManyParameters { count: u32, capacity: u32 },

    #[error("Invalid NT image signature: {0:#010X}")]
    InvalidSignature(u32),

    #[error("Unknown creation flag bits: {value:#010X}")]
    UnknownFlags { value: u32 },
}

/// Result type alias for ABI operations
pub type AbiResult<T> = Result<T, AbiError>;

impl AbiError {
    /// Creates a buffer too small error
    pub fn buffer_too_small(expected: usize, actual: usize) -> Self {
        AbiError::BufferTooSmall { expected, actual }
    }

    /// Creates a too many parameters error
    pub fn too_many_parameters(count: u32, capacity: u32) -> Self {
        AbiError::TooManyParameters { count, capacity }
    }

    /// Creates an unknown flags error
    pub fn unknown_flags(value: u32) -> Self {
        AbiError::UnknownFlags { value }
    }
}
