//! Process-creation flag set
//!
//! The `dwCreationFlags` bits a debugger passes when launching a target.
//! A valid value is a bitwise union of zero or more of the named constants.

use crate::error::{AbiError, AbiResult};
use crate::types::DWORD;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use tracing::debug;

/// Process-creation flags
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationFlags {
    value: DWORD,
}

impl CreationFlags {
    // dwCreationFlags values
    pub const DEBUG_PROCESS: DWORD = 0x00000001;
    pub const DEBUG_ONLY_THIS_PROCESS: DWORD = 0x00000002;
    pub const CREATE_SUSPENDED: DWORD = 0x00000004;
    pub const DETACHED_PROCESS: DWORD = 0x00000008;
    pub const CREATE_NEW_CONSOLE: DWORD = 0x00000010;
    pub const NORMAL_PRIORITY_CLASS: DWORD = 0x00000020;
    pub const IDLE_PRIORITY_CLASS: DWORD = 0x00000040;
    pub const HIGH_PRIORITY_CLASS: DWORD = 0x00000080;
    pub const REALTIME_PRIORITY_CLASS: DWORD = 0x00000100;
    pub const CREATE_NEW_PROCESS_GROUP: DWORD = 0x00000200;
    pub const CREATE_UNICODE_ENVIRONMENT: DWORD = 0x00000400;
    pub const CREATE_SEPARATE_WOW_VDM: DWORD = 0x00000800;
    pub const CREATE_SHARED_WOW_VDM: DWORD = 0x00001000;
    pub const CREATE_FORCEDOS: DWORD = 0x00002000;
    pub const BELOW_NORMAL_PRIORITY_CLASS: DWORD = 0x00004000;
    pub const ABOVE_NORMAL_PRIORITY_CLASS: DWORD = 0x00008000;
    pub const STACK_SIZE_PARAM_IS_A_RESERVATION: DWORD = 0x00010000;
    pub const CREATE_BREAKAWAY_FROM_JOB: DWORD = 0x01000000;
    pub const CREATE_PRESERVE_CODE_AUTHZ_LEVEL: DWORD = 0x02000000;
    pub const CREATE_DEFAULT_ERROR_MODE: DWORD = 0x04000000;
    pub const CREATE_NO_WINDOW: DWORD = 0x08000000;
    pub const PROFILE_USER: DWORD = 0x10000000;
    pub const PROFILE_KERNEL: DWORD = 0x20000000;
    pub const PROFILE_SERVER: DWORD = 0x40000000;
    pub const CREATE_IGNORE_SYSTEM_DEFAULT: DWORD = 0x80000000;

    /// Union of every named flag
    pub const KNOWN_MASK: DWORD = 0xFF01FFFF;

    /// Union of the priority-class flags
    pub const PRIORITY_MASK: DWORD = Self::NORMAL_PRIORITY_CLASS
        | Self::IDLE_PRIORITY_CLASS
        | Self::HIGH_PRIORITY_CLASS
        | Self::REALTIME_PRIORITY_CLASS
        | Self::BELOW_NORMAL_PRIORITY_CLASS
        | Self::ABOVE_NORMAL_PRIORITY_CLASS;

    const FLAG_NAMES: [(DWORD, &'static str); 25] = [
        (Self::DEBUG_PROCESS, "DEBUG_PROCESS"),
        (Self::DEBUG_ONLY_THIS_PROCESS, "DEBUG_ONLY_THIS_PROCESS"),
        (Self::CREATE_SUSPENDED, "CREATE_SUSPENDED"),
        (Self::DETACHED_PROCESS, "DETACHED_PROCESS"),
        (Self::CREATE_NEW_CONSOLE, "CREATE_NEW_CONSOLE"),
        (Self::NORMAL_PRIORITY_CLASS, "NORMAL_PRIORITY_CLASS"),
        (Self::IDLE_PRIORITY_CLASS, "IDLE_PRIORITY_CLASS"),
        (Self::HIGH_PRIORITY_CLASS, "HIGH_PRIORITY_CLASS"),
        (Self::REALTIME_PRIORITY_CLASS, "REALTIME_PRIORITY_CLASS"),
        (Self::CREATE_NEW_PROCESS_GROUP, "CREATE_NEW_PROCESS_GROUP"),
        (Self::CREATE_UNICODE_ENVIRONMENT, "CREATE_UNICODE_ENVIRONMENT"),
        (Self::CREATE_SEPARATE_WOW_VDM, "CREATE_SEPARATE_WOW_VDM"),
        (Self::CREATE_SHARED_WOW_VDM, "CREATE_SHARED_WOW_VDM"),
        (Self::CREATE_FORCEDOS, "CREATE_FORCEDOS"),
        (Self::BELOW_NORMAL_PRIORITY_CLASS, "BELOW_NORMAL_PRIORITY_CLASS"),
        (Self::ABOVE_NORMAL_PRIORITY_CLASS, "ABOVE_NORMAL_PRIORITY_CLASS"),
        (
            Self::STACK_SIZE_PARAM_IS_A_RESERVATION,
            "STACK_SIZE_PARAM_IS_A_RESERVATION",
        ),
        (Self::CREATE_BREAKAWAY_FROM_JOB, "CREATE_BREAKAWAY_FROM_JOB"),
        (
            Self::CREATE_PRESERVE_CODE_AUTHZ_LEVEL,
            "CREATE_PRESERVE_CODE_AUTHZ_LEVEL",
        ),
        (Self::CREATE_DEFAULT_ERROR_MODE, "CREATE_DEFAULT_ERROR_MODE"),
        (Self::CREATE_NO_WINDOW, "CREATE_NO_WINDOW"),
        (Self::PROFILE_USER, "PROFILE_USER"),
        (Self::PROFILE_KERNEL, "PROFILE_KERNEL"),
        (Self::PROFILE_SERVER, "PROFILE_SERVER"),
        (Self::CREATE_IGNORE_SYSTEM_DEFAULT, "CREATE_IGNORE_SYSTEM_DEFAULT"),
    ];

    /// Create new creation flags from a raw value
    pub const fn new(value: DWORD) -> Self {
        CreationFlags { value }
    }

    /// Empty flag set
    pub const fn empty() -> Self {
        CreationFlags { value: 0 }
    }

    /// Validating constructor: rejects values carrying unknown bits
    pub fn try_from_raw(value: DWORD) -> AbiResult<Self> {
        let unknown = value & !Self::KNOWN_MASK;
        if unknown != 0 {
            debug!(value, unknown, "creation flags carry unknown bits");
            return Err(AbiError::unknown_flags(value));
        }
        Ok(CreationFlags { value })
    }

    /// Get the raw flag value
    pub const fn raw(&self) -> DWORD {
        self.value
    }

    /// Check if all bits of `mask` are set
    pub const fn contains(&self, mask: DWORD) -> bool {
        (self.value & mask) == mask
    }

    /// Check that the value is a union of named constants only
    pub const fn is_valid(&self) -> bool {
        (self.value & !Self::KNOWN_MASK) == 0
    }

    /// Check if either debug flag is set
    pub const fn is_debug(&self) -> bool {
        (self.value & (Self::DEBUG_PROCESS | Self::DEBUG_ONLY_THIS_PROCESS)) != 0
    }

    /// Check if the target starts suspended
    pub const fn is_suspended(&self) -> bool {
        self.contains(Self::CREATE_SUSPENDED)
    }

    /// The priority-class bits, if any are set
    pub const fn priority_class(&self) -> Option<DWORD> {
        let bits = self.value & Self::PRIORITY_MASK;
        if bits == 0 {
            None
        } else {
            Some(bits)
        }
    }

    /// Add flags
    pub const fn with(mut self, mask: DWORD) -> Self {
        self.value |= mask;
        self
    }

    /// Remove flags
    pub const fn without(mut self, mask: DWORD) -> Self {
        self.value &= !mask;
        self
    }
}

impl BitOr for CreationFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        CreationFlags {
            value: self.value | rhs.value,
        }
    }
}

impl BitOrAssign for CreationFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.value |= rhs.value;
    }
}

impl From<DWORD> for CreationFlags {
    fn from(value: DWORD) -> Self {
        CreationFlags::new(value)
    }
}

impl fmt::Display for CreationFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value == 0 {
            return write!(f, "0");
        }

        let mut first = true;
        for (bit, name) in Self::FLAG_NAMES {
            if (self.value & bit) != 0 {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }

        let unknown = self.value & !Self::KNOWN_MASK;
        if unknown != 0 {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{:#010X}", unknown)?;
        }

        Ok(())
    }
}
