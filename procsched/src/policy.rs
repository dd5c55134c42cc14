use std::{fmt, str::FromStr};

use crate::error::UnknownPolicy;


/// The priority `sched_setscheduler` requires for the time-sharing class.
///
/// Niceness for that class is set separately through `setpriority`.
pub const NEUTRAL_PRIORITY: i32 = 0;

/// The process whose scheduling attributes are read or changed.
///
/// Pid `0` refers to the calling process, as in the underlying calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Target(libc::pid_t);

impl Target {
    /// The calling process.
    pub const SELF: Target = Target(0);

    pub const fn new(pid: libc::pid_t) -> Target {
        Target(pid)
    }

    pub const fn pid(self) -> libc::pid_t {
        self.0
    }
}

impl From<libc::pid_t> for Target {
    fn from(pid: libc::pid_t) -> Target {
        Target(pid)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scheduling policies, as reported by `sched_getscheduler`.
///
/// Only the three classes in `sched.h` that this tool manipulates are named;
/// anything else the kernel reports (`SCHED_BATCH`, `SCHED_IDLE`, ...) is kept
/// as its raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Standard time-sharing policy. Priority is the process niceness.
    Other,

    /// First-in, first-out real-time policy.
    Fifo,

    /// Round-robin real-time policy. Like FIFO with time-slicing between
    /// processes of equal priority.
    RoundRobin,

    /// A policy code outside the recognized classes.
    Unknown(i32),
}

impl Policy {
    /// Maps a raw policy code to a [`Policy`].
    pub const fn from_raw(raw: i32) -> Policy {
        match raw {
            libc::SCHED_OTHER => Policy::Other,
            libc::SCHED_FIFO => Policy::Fifo,
            libc::SCHED_RR => Policy::RoundRobin,
            other => Policy::Unknown(other),
        }
    }

    /// The raw policy code passed to the kernel.
    pub const fn as_raw(self) -> i32 {
        match self {
            Policy::Other => libc::SCHED_OTHER,
            Policy::Fifo => libc::SCHED_FIFO,
            Policy::RoundRobin => libc::SCHED_RR,
            Policy::Unknown(raw) => raw,
        }
    }

    /// The `sched.h` name, for recognized policies only.
    pub const fn name(self) -> Option<&'static str> {
        match self {
            Policy::Other => Some("SCHED_OTHER"),
            Policy::Fifo => Some("SCHED_FIFO"),
            Policy::RoundRobin => Some("SCHED_RR"),
            Policy::Unknown(_) => None,
        }
    }

    pub const fn is_time_sharing(self) -> bool {
        matches!(self, Policy::Other)
    }

    pub const fn is_real_time(self) -> bool {
        matches!(self, Policy::Fifo | Policy::RoundRobin)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown policy ({})", self.as_raw()),
        }
    }
}

impl FromStr for Policy {
    type Err = UnknownPolicy;

    /// Accepts exactly `SCHED_FIFO`, `SCHED_RR` and `SCHED_OTHER`.
    fn from_str(s: &str) -> Result<Policy, UnknownPolicy> {
        match s {
            "SCHED_FIFO" => Ok(Policy::Fifo),
            "SCHED_RR" => Ok(Policy::RoundRobin),
            "SCHED_OTHER" => Ok(Policy::Other),
            other => Err(UnknownPolicy(other.to_owned())),
        }
    }
}
