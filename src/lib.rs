//! ABI-compatible Windows/DbgEng definitions for debugger interop
//!
//! This crate mirrors the handful of structures and constants a debugger-interop
//! layer exchanges with the Windows debugging engine but which are missing from
//! the headers available to it: 64-bit exception records, PE image headers,
//! virtual-memory region descriptors, WinDbg extension-API placeholders, and
//! process-creation flags. Every mirror reproduces the platform byte layout
//! exactly (field order, integer widths, explicit alignment filler, fixed array
//! capacities) so instances can be reinterpreted to and from raw debuggee memory.
//!
//! The crate declares data shapes only. Populating these records from a live
//! target and acting on their contents is the job of the surrounding debugger
//! layer.

pub mod error;
pub mod pod;
pub mod types;

// Re-export main types for convenience
pub use error::{AbiError, AbiResult};
pub use pod::Pod;
pub use types::{
    CreationFlags, ExceptionRecord64, ImageDataDirectory, ImageFileHeader, ImageNtHeaders64,
    ImageOptionalHeader64, MemoryBasicInformation64, WindbgExtensionApis32, WindbgExtensionApis64,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
