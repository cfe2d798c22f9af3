//! ABI mirror definitions missing from the interop layer's headers
//!
//! Field order, integer widths, filler fields, and array capacities in these
//! modules reproduce the platform layouts bit for bit; the named constants keep
//! their canonical platform values.

#![allow(non_camel_case_types)]

pub mod creation;
pub mod exception;
pub mod extension;
pub mod image;
pub mod memory;

// Re-export commonly used types
pub use creation::CreationFlags;
pub use exception::{ExceptionRecord64, EXCEPTION_MAXIMUM_PARAMETERS};
pub use extension::{WindbgExtensionApis32, WindbgExtensionApis64};
pub use image::{
    ImageDataDirectory, ImageFileHeader, ImageNtHeaders64, ImageOptionalHeader64,
    IMAGE_NUMBEROF_DIRECTORY_ENTRIES,
};
pub use memory::MemoryBasicInformation64;

// Platform integer aliases, so the mirror declarations read like the headers
// they stand in for.
// See https://learn.microsoft.com/en-us/windows/win32/winprog/windows-data-types

pub type BYTE = u8;
pub type UCHAR = u8;
pub type BOOLEAN = u8;

pub type WORD = u16;
pub type USHORT = u16;
pub type SHORT = i16;

pub type DWORD = u32;
pub type ULONG = u32;
pub type UINT = u32;
pub type LONG = i32;
pub type INT = i32;
pub type BOOL = i32;
pub type HRESULT = i32;

pub type DWORD64 = u64;
pub type ULONGLONG = u64;
pub type ULONG64 = u64;
pub type QWORD = u64;
pub type LONGLONG = i64;
pub type LONG64 = i64;
