//! Virtual-memory region descriptor mirror
//!
//! `MemoryBasicInformation64` is a snapshot of one virtual-memory range in the
//! debuggee's address space, valid only at the instant it was queried.

use crate::pod::Pod;
use crate::types::{DWORD, ULONGLONG};
use serde::{Deserialize, Serialize};

// Region state values
pub const MEM_COMMIT: DWORD = 0x1000;
pub const MEM_RESERVE: DWORD = 0x2000;
pub const MEM_FREE: DWORD = 0x10000;

// Region type values
pub const MEM_PRIVATE: DWORD = 0x20000;
pub const MEM_MAPPED: DWORD = 0x40000;
pub const MEM_IMAGE: DWORD = 0x1000000;

// Page protection values
pub const PAGE_NOACCESS: DWORD = 0x01;
pub const PAGE_READONLY: DWORD = 0x02;
pub const PAGE_READWRITE: DWORD = 0x04;
pub const PAGE_WRITECOPY: DWORD = 0x08;
pub const PAGE_EXECUTE: DWORD = 0x10;
pub const PAGE_EXECUTE_READ: DWORD = 0x20;
pub const PAGE_EXECUTE_READWRITE: DWORD = 0x40;
pub const PAGE_EXECUTE_WRITECOPY: DWORD = 0x80;
pub const PAGE_GUARD: DWORD = 0x100;
pub const PAGE_NOCACHE: DWORD = 0x200;
pub const PAGE_WRITECOMBINE: DWORD = 0x400;

/// Mirror of the platform `MEMORY_BASIC_INFORMATION64` layout (48 bytes)
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBasicInformation64 {
    pub base_address: ULONGLONG,
    pub allocation_base: ULONGLONG,
    pub allocation_protect: DWORD,
    /// Alignment filler required by the platform layout
    pub alignment1: DWORD,
    pub region_size: ULONGLONG,
    pub state: DWORD,
    pub protect: DWORD,
    pub region_type: DWORD,
    /// Alignment filler required by the platform layout
    pub alignment2: DWORD,
}

unsafe impl Pod for MemoryBasicInformation64 {}

impl MemoryBasicInformation64 {
    /// Check if the region is committed
    pub fn is_committed(&self) -> bool {
        self.state == MEM_COMMIT
    }

    /// Check if the region is reserved but not committed
    pub fn is_reserved(&self) -> bool {
        self.state == MEM_RESERVE
    }

    /// Check if the region is free
    pub fn is_free(&self) -> bool {
        self.state == MEM_FREE
    }

    /// Check if the region was readable when snapshotted
    pub fn is_readable(&self) -> bool {
        self.protect != PAGE_NOACCESS && (self.protect & PAGE_GUARD) == 0
    }

    /// Check if the region was writable when snapshotted
    pub fn is_writable(&self) -> bool {
        (self.protect
            & (PAGE_READWRITE | PAGE_WRITECOPY | PAGE_EXECUTE_READWRITE | PAGE_EXECUTE_WRITECOPY))
            != 0
    }

    /// Check if the region was executable when snapshotted
    pub fn is_executable(&self) -> bool {
        (self.protect
            & (PAGE_EXECUTE | PAGE_EXECUTE_READ | PAGE_EXECUTE_READWRITE | PAGE_EXECUTE_WRITECOPY))
            != 0
    }

    /// Check if the guard page flag was set
    pub fn is_guard(&self) -> bool {
        (self.protect & PAGE_GUARD) != 0
    }

    /// Check if the region backs a mapped image
    pub fn is_image(&self) -> bool {
        self.region_type == MEM_IMAGE
    }

    /// Check if the region is private to the debuggee
    pub fn is_private(&self) -> bool {
        self.region_type == MEM_PRIVATE
    }

    /// First debuggee address past the end of the region
    pub fn end_address(&self) -> ULONGLONG {
        self.base_address.wrapping_add(self.region_size)
    }

    /// Check if a debuggee address falls inside the region
    pub fn contains(&self, address: ULONGLONG) -> bool {
        address >= self.base_address && address < self.end_address()
    }
}
