//! # Error Handling
//!
//! This module defines the error types used across the **procsched** crate.
//! Every failed OS call is captured as an [`Error::Os`] value carrying the
//! call name, the raw `errno` and its description, instead of leaving the
//! caller to inspect `errno` after the fact.

use std::{ffi::CStr, fmt, io};

use thiserror::Error;

/// The OS primitive that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syscall {
    GetScheduler,
    SetScheduler,
    GetPriorityMin,
    GetPriorityMax,
    GetPriority,
    SetPriority,
    GetParam,
    SetParam,
}

impl Syscall {
    /// Returns the C name of the call, as used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Syscall::GetScheduler => "sched_getscheduler",
            Syscall::SetScheduler => "sched_setscheduler",
            Syscall::GetPriorityMin => "sched_get_priority_min",
            Syscall::GetPriorityMax => "sched_get_priority_max",
            Syscall::GetPriority => "getpriority",
            Syscall::SetPriority => "setpriority",
            Syscall::GetParam => "sched_getparam",
            Syscall::SetParam => "sched_setparam",
        }
    }
}

impl fmt::Display for Syscall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error types returned by the procsched library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An OS call failed with the given `errno`.
    #[error("{syscall} returned errno {errno} ({description})")]
    Os {
        syscall: Syscall,
        errno: i32,
        description: String,
    },
}

impl Error {
    /// Builds an error for `syscall` from a raw `errno` value.
    pub fn from_errno(syscall: Syscall, errno: i32) -> Error {
        Error::Os {
            syscall,
            errno,
            description: describe_errno(errno),
        }
    }

    /// Builds an error for `syscall` from the calling thread's current `errno`.
    pub fn last_os_error(syscall: Syscall) -> Error {
        let errno = io::Error::last_os_error().raw_os_error().unwrap_or(0);
        Error::from_errno(syscall, errno)
    }

    /// The call that failed.
    pub fn syscall(&self) -> Syscall {
        match self {
            Error::Os { syscall, .. } => *syscall,
        }
    }

    /// The raw `errno` value.
    pub fn errno(&self) -> i32 {
        match self {
            Error::Os { errno, .. } => *errno,
        }
    }
}

/// Returned when a policy name is not one of the recognized literals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown policy <{0}>.")]
pub struct UnknownPolicy(pub String);

fn describe_errno(errno: i32) -> String {
    // SAFETY: strerror returns a pointer to a NUL-terminated string owned by
    //         libc. The tool is single-threaded, and the string is copied out
    //         before any other libc call can overwrite it.
    unsafe {
        let ptr = libc::strerror(errno);
        if ptr.is_null() {
            return format!("Unknown error {errno}");
        }
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

/// A convenient type alias for results returned by the procsched library.
pub type Result<T> = std::result::Result<T, Error>;
