//! WinDbg extension-API placeholder mirrors
//!
//! The engine's interface signatures name these structures, but the interop
//! layer never exchanges real data through them. Each mirror carries the single
//! unsupported-marker field the platform declares, so the types exist and size
//! correctly without pulling in the full extension API.

use crate::pod::Pod;
use crate::types::DWORD;
use serde::{Deserialize, Serialize};

/// Mirror of `WINDBG_EXTENSION_APIS32`; never populated with real data
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindbgExtensionApis32 {
    pub not_supported: DWORD,
}

unsafe impl Pod for WindbgExtensionApis32 {}

/// Mirror of `WINDBG_EXTENSION_APIS64`; never populated with real data
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindbgExtensionApis64 {
    pub not_supported: DWORD,
}

unsafe impl Pod for WindbgExtensionApis64 {}
