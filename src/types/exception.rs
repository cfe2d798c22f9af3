//! 64-bit exception record mirror
//!
//! `ExceptionRecord64` is filled in from debuggee memory by the engine; this
//! crate only guarantees its shape. The chained-record field is an address in
//! the debuggee's address space and is never dereferenced locally.

use crate::error::{AbiError, AbiResult};
use crate::pod::Pod;
use crate::types::{DWORD, DWORD64};
use serde::{Deserialize, Serialize};

/// Maximum number of exception parameters
pub const EXCEPTION_MAXIMUM_PARAMETERS: usize = 15;

/// Exception flag bit: the faulting operation cannot be restarted
pub const EXCEPTION_NONCONTINUABLE: DWORD = 0x1;

// Well-known exception codes surfaced by the debugger engine
pub const EXCEPTION_ACCESS_VIOLATION: DWORD = 0xC000_0005;
pub const EXCEPTION_BREAKPOINT: DWORD = 0x8000_0003;
pub const EXCEPTION_SINGLE_STEP: DWORD = 0x8000_0004;
pub const EXCEPTION_ILLEGAL_INSTRUCTION: DWORD = 0xC000_001D;
pub const EXCEPTION_INT_DIVIDE_BY_ZERO: DWORD = 0xC000_0094;
pub const EXCEPTION_STACK_OVERFLOW: DWORD = 0xC000_00FD;

/// Mirror of the platform `EXCEPTION_RECORD64` layout (152 bytes)
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRecord64 {
    pub exception_code: DWORD,
    pub exception_flags: DWORD,
    /// Debuggee address of a chained record, or zero
    pub exception_record: DWORD64,
    /// Debuggee address at which the exception occurred
    pub exception_address: DWORD64,
    pub number_parameters: DWORD,
    /// Alignment filler required by the platform layout
    pub unused_alignment: DWORD,
    pub exception_information: [DWORD64; EXCEPTION_MAXIMUM_PARAMETERS],
}

unsafe impl Pod for ExceptionRecord64 {}

impl ExceptionRecord64 {
    /// Returns the populated parameters, clamped to the array capacity.
    ///
    /// A corrupt record can report more parameters than the fixed array holds;
    /// the slice never exceeds [`EXCEPTION_MAXIMUM_PARAMETERS`].
    pub fn parameters(&self) -> &[DWORD64] {
        let count = (self.number_parameters as usize).min(EXCEPTION_MAXIMUM_PARAMETERS);
        &self.exception_information[..count]
    }

    /// Checks that the parameter count fits the fixed array
    pub fn validate(&self) -> AbiResult<()> {
        if self.number_parameters as usize > EXCEPTION_MAXIMUM_PARAMETERS {
            return Err(AbiError::too_many_parameters(
                self.number_parameters,
                EXCEPTION_MAXIMUM_PARAMETERS as u32,
            ));
        }
        Ok(())
    }

    /// Returns the debuggee address of the chained record, if any
    pub fn chained_record(&self) -> Option<DWORD64> {
        if self.exception_record == 0 {
            None
        } else {
            Some(self.exception_record)
        }
    }

    /// Check if execution can be continued past this exception
    pub fn is_continuable(&self) -> bool {
        (self.exception_flags & EXCEPTION_NONCONTINUABLE) == 0
    }

    /// Check if this record reports a breakpoint
    pub fn is_breakpoint(&self) -> bool {
        self.exception_code == EXCEPTION_BREAKPOINT
    }

    /// Check if this record reports an access violation
    pub fn is_access_violation(&self) -> bool {
        self.exception_code == EXCEPTION_ACCESS_VIOLATION
    }
}
