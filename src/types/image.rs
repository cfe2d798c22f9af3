//! PE image header mirrors
//!
//! Read-only shapes for the headers of a module loaded in the debuggee. The
//! interop layer receives these marshaled out of target memory; nothing here
//! parses a PE file from disk.

use crate::error::{AbiError, AbiResult};
use crate::pod::Pod;
use crate::types::{BYTE, DWORD, ULONGLONG, WORD};
use serde::{Deserialize, Serialize};

/// Number of entries in the optional header's data-directory table
pub const IMAGE_NUMBEROF_DIRECTORY_ENTRIES: usize = 16;

/// MZ
pub const IMAGE_DOS_SIGNATURE: WORD = 0x5A4D;
/// PE00
pub const IMAGE_NT_SIGNATURE: DWORD = 0x0000_4550;

pub const IMAGE_NT_OPTIONAL_HDR32_MAGIC: WORD = 0x10B;
pub const IMAGE_NT_OPTIONAL_HDR64_MAGIC: WORD = 0x20B;

// Machine types the debugger layer distinguishes
pub const IMAGE_FILE_MACHINE_I386: WORD = 0x014C;
pub const IMAGE_FILE_MACHINE_AMD64: WORD = 0x8664;
pub const IMAGE_FILE_MACHINE_ARM64: WORD = 0xAA64;

// Data-directory indexes
pub const IMAGE_DIRECTORY_ENTRY_EXPORT: usize = 0;
pub const IMAGE_DIRECTORY_ENTRY_IMPORT: usize = 1;
pub const IMAGE_DIRECTORY_ENTRY_RESOURCE: usize = 2;
pub const IMAGE_DIRECTORY_ENTRY_EXCEPTION: usize = 3;
pub const IMAGE_DIRECTORY_ENTRY_SECURITY: usize = 4;
pub const IMAGE_DIRECTORY_ENTRY_BASERELOC: usize = 5;
pub const IMAGE_DIRECTORY_ENTRY_DEBUG: usize = 6;
pub const IMAGE_DIRECTORY_ENTRY_ARCHITECTURE: usize = 7;
pub const IMAGE_DIRECTORY_ENTRY_GLOBALPTR: usize = 8;
pub const IMAGE_DIRECTORY_ENTRY_TLS: usize = 9;
pub const IMAGE_DIRECTORY_ENTRY_LOAD_CONFIG: usize = 10;
pub const IMAGE_DIRECTORY_ENTRY_BOUND_IMPORT: usize = 11;
pub const IMAGE_DIRECTORY_ENTRY_IAT: usize = 12;
pub const IMAGE_DIRECTORY_ENTRY_DELAY_IMPORT: usize = 13;
pub const IMAGE_DIRECTORY_ENTRY_COM_DESCRIPTOR: usize = 14;
pub const IMAGE_DIRECTORY_ENTRY_RESERVED: usize = 15;

/// Mirror of `IMAGE_FILE_HEADER` (20 bytes)
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFileHeader {
    pub machine: WORD,
    pub number_of_sections: WORD,
    pub time_date_stamp: DWORD,
    pub pointer_to_symbol_table: DWORD,
    pub number_of_symbols: DWORD,
    pub size_of_optional_header: WORD,
    pub characteristics: WORD,
}

unsafe impl Pod for ImageFileHeader {}

/// Mirror of `IMAGE_DATA_DIRECTORY` (8 bytes): a virtual address and size pair
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDataDirectory {
    pub virtual_address: DWORD,
    pub size: DWORD,
}

unsafe impl Pod for ImageDataDirectory {}

impl ImageDataDirectory {
    /// Check if this directory entry is present in the image
    pub fn is_present(&self) -> bool {
        self.virtual_address != 0 && self.size != 0
    }
}

/// Mirror of `IMAGE_OPTIONAL_HEADER64` (240 bytes)
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOptionalHeader64 {
    pub magic: WORD,
    pub major_linker_version: BYTE,
    pub minor_linker_version: BYTE,
    pub size_of_code: DWORD,
    pub size_of_initialized_data: DWORD,
    pub size_of_uninitialized_data: DWORD,
    pub address_of_entry_point: DWORD,
    pub base_of_code: DWORD,
    pub image_base: ULONGLONG,
    pub section_alignment: DWORD,
    pub file_alignment: DWORD,
    pub major_operating_system_version: WORD,
    pub minor_operating_system_version: WORD,
    pub major_image_version: WORD,
    pub minor_image_version: WORD,
    pub major_subsystem_version: WORD,
    pub minor_subsystem_version: WORD,
    pub win32_version_value: DWORD,
    pub size_of_image: DWORD,
    pub size_of_headers: DWORD,
    pub check_sum: DWORD,
    pub subsystem: WORD,
    pub dll_characteristics: WORD,
    pub size_of_stack_reserve: ULONGLONG,
    pub size_of_stack_commit: ULONGLONG,
    pub size_of_heap_reserve: ULONGLONG,
    pub size_of_heap_commit: ULONGLONG,
    pub loader_flags: DWORD,
    pub number_of_rva_and_sizes: DWORD,
    pub data_directory: [ImageDataDirectory; IMAGE_NUMBEROF_DIRECTORY_ENTRIES],
}

unsafe impl Pod for ImageOptionalHeader64 {}

impl ImageOptionalHeader64 {
    /// Check if this is a PE32+ (64-bit) optional header
    pub fn is_pe32_plus(&self) -> bool {
        self.magic == IMAGE_NT_OPTIONAL_HDR64_MAGIC
    }

    /// Returns the data-directory entry at `index`.
    ///
    /// `None` when the index is past the table capacity or past the count the
    /// image itself declares in `number_of_rva_and_sizes`.
    pub fn directory_entry(&self, index: usize) -> Option<&ImageDataDirectory> {
        if index >= self.number_of_rva_and_sizes as usize {
            return None;
        }
        self.data_directory.get(index)
    }
}

/// Mirror of `IMAGE_NT_HEADERS64` (264 bytes)
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageNtHeaders64 {
    pub signature: DWORD,
    pub file_header: ImageFileHeader,
    pub optional_header: ImageOptionalHeader64,
}

unsafe impl Pod for ImageNtHeaders64 {}

impl ImageNtHeaders64 {
    /// Check for the `PE\0\0` signature
    pub fn is_valid(&self) -> bool {
        self.signature == IMAGE_NT_SIGNATURE
    }

    /// Checks the `PE\0\0` signature, reporting the actual value on mismatch
    pub fn validate(&self) -> AbiResult<()> {
        if !self.is_valid() {
            return Err(AbiError::InvalidSignature(self.signature));
        }
        Ok(())
    }

    /// Debuggee virtual address of the module entry point, or `None` for images
    /// without one
    pub fn entry_point(&self) -> Option<ULONGLONG> {
        let rva = self.optional_header.address_of_entry_point;
        if rva == 0 {
            None
        } else {
            // Header contents come from an untrusted target, so never overflow
            Some(self.optional_header.image_base.wrapping_add(rva as ULONGLONG))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::mem::{offset_of, size_of};

    #[test]
    fn test_file_header_layout() {
        assert_eq!(size_of::<ImageFileHeader>(), 20);

        assert_eq!(offset_of!(ImageFileHeader, machine), 0);
        assert_eq!(offset_of!(ImageFileHeader, number_of_sections), 2);
        assert_eq!(offset_of!(ImageFileHeader, time_date_stamp), 4);
        assert_eq!(offset_of!(ImageFileHeader, pointer_to_symbol_table), 8);
        assert_eq!(offset_of!(ImageFileHeader, number_of_symbols), 12);
        assert_eq!(offset_of!(ImageFileHeader, size_of_optional_header), 16);
        assert_eq!(offset_of!(ImageFileHeader, characteristics), 18);
    }

    #[test]
    fn test_data_directory_layout() {
        assert_eq!(size_of::<ImageDataDirectory>(), 8);
        assert_eq!(offset_of!(ImageDataDirectory, virtual_address), 0);
        assert_eq!(offset_of!(ImageDataDirectory, size), 4);
    }

    #[test]
    fn test_optional_header_layout() {
        assert_eq!(size_of::<ImageOptionalHeader64>(), 240);

        assert_eq!(offset_of!(ImageOptionalHeader64, magic), 0);
        assert_eq!(offset_of!(ImageOptionalHeader64, major_linker_version), 2);
        assert_eq!(offset_of!(ImageOptionalHeader64, minor_linker_version), 3);
        assert_eq!(offset_of!(ImageOptionalHeader64, size_of_code), 4);
        assert_eq!(offset_of!(ImageOptionalHeader64, address_of_entry_point), 16);
        assert_eq!(offset_of!(ImageOptionalHeader64, image_base), 24);
        assert_eq!(offset_of!(ImageOptionalHeader64, section_alignment), 32);
        assert_eq!(offset_of!(ImageOptionalHeader64, win32_version_value), 52);
        assert_eq!(offset_of!(ImageOptionalHeader64, subsystem), 68);
        assert_eq!(offset_of!(ImageOptionalHeader64, size_of_stack_reserve), 72);
        assert_eq!(offset_of!(ImageOptionalHeader64, loader_flags), 104);
        assert_eq!(
            offset_of!(ImageOptionalHeader64, number_of_rva_and_sizes),
            108
        );
        assert_eq!(offset_of!(ImageOptionalHeader64, data_directory), 112);
    }

    #[test]
    fn test_nt_headers_layout() {
        assert_eq!(size_of::<ImageNtHeaders64>(), 264);

        assert_eq!(offset_of!(ImageNtHeaders64, signature), 0);
        assert_eq!(offset_of!(ImageNtHeaders64, file_header), 4);
        assert_eq!(offset_of!(ImageNtHeaders64, optional_header), 24);
    }

    #[test]
    fn test_constants() {
        assert_eq!(IMAGE_NUMBEROF_DIRECTORY_ENTRIES, 16);
        assert_eq!(IMAGE_DOS_SIGNATURE, 0x5A4D);
        assert_eq!(IMAGE_NT_SIGNATURE, 0x00004550);
        assert_eq!(IMAGE_NT_OPTIONAL_HDR32_MAGIC, 0x10B);
        assert_eq!(IMAGE_NT_OPTIONAL_HDR64_MAGIC, 0x20B);
        assert_eq!(IMAGE_FILE_MACHINE_I386, 0x014C);
        assert_eq!(IMAGE_FILE_MACHINE_AMD64, 0x8664);
        assert_eq!(IMAGE_FILE_MACHINE_ARM64, 0xAA64);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_EXPORT, 0);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_IMPORT, 1);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_RESOURCE, 2);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_EXCEPTION, 3);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_SECURITY, 4);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_BASERELOC, 5);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_DEBUG, 6);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_ARCHITECTURE, 7);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_GLOBALPTR, 8);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_TLS, 9);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_LOAD_CONFIG, 10);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_BOUND_IMPORT, 11);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_IAT, 12);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_DELAY_IMPORT, 13);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_COM_DESCRIPTOR, 14);
        assert_eq!(IMAGE_DIRECTORY_ENTRY_RESERVED, 15);

        // The index table covers the whole fixed directory array
        assert_eq!(
            IMAGE_DIRECTORY_ENTRY_RESERVED + 1,
            IMAGE_NUMBEROF_DIRECTORY_ENTRIES
        );
    }

    #[test]
    fn test_signature_validation() {
        let mut headers = ImageNtHeaders64::default();
        assert!(!headers.is_valid());
        assert_eq!(
            headers.validate().unwrap_err(),
            AbiError::InvalidSignature(0)
        );

        headers.signature = IMAGE_NT_SIGNATURE;
        assert!(headers.is_valid());
        assert!(headers.validate().is_ok());
    }

    #[test]
    fn test_data_directory_bounds() {
        let mut header = ImageOptionalHeader64::default();
        header.number_of_rva_and_sizes = IMAGE_NUMBEROF_DIRECTORY_ENTRIES as u32;
        header.data_directory[IMAGE_DIRECTORY_ENTRY_IMPORT] = ImageDataDirectory {
            virtual_address: 0x4000,
            size: 0x1F4,
        };

        let import = header.directory_entry(IMAGE_DIRECTORY_ENTRY_IMPORT).unwrap();
        assert!(import.is_present());
        assert_eq!(import.virtual_address, 0x4000);

        // Past the table capacity
        assert!(header.directory_entry(16).is_none());

        // Within capacity but past the image's declared count
        header.number_of_rva_and_sizes = 2;
        assert!(header.directory_entry(IMAGE_DIRECTORY_ENTRY_RESOURCE).is_none());
        assert!(header.directory_entry(IMAGE_DIRECTORY_ENTRY_IMPORT).is_some());
    }

    #[test]
    fn test_entry_point() {
        let mut headers = ImageNtHeaders64::default();
        headers.optional_header.image_base = 0x0001_4000_0000;
        assert_eq!(headers.entry_point(), None);

        headers.optional_header.address_of_entry_point = 0x1260;
        assert_eq!(headers.entry_point(), Some(0x0001_4000_1260));
    }

    #[test]
    fn test_byte_roundtrip() {
        let mut headers = ImageNtHeaders64::default();
        headers.signature = IMAGE_NT_SIGNATURE;
        headers.file_header.machine = IMAGE_FILE_MACHINE_AMD64;
        headers.file_header.number_of_sections = 6;
        headers.file_header.size_of_optional_header = 240;
        headers.optional_header.magic = IMAGE_NT_OPTIONAL_HDR64_MAGIC;
        headers.optional_header.image_base = 0x0001_4000_0000;
        headers.optional_header.subsystem = 3; // console
        headers.optional_header.number_of_rva_and_sizes = 16;

        let bytes = headers.as_bytes();
        assert_eq!(bytes.len(), 264);

        let back = ImageNtHeaders64::read_from(bytes).unwrap();
        assert_eq!(back, headers);

        // The signature occupies the first four bytes: "PE\0\0"
        assert_eq!(&bytes[0..4], b"PE\0\0");
    }
}
