//! Which priority facility applies to which scheduling class.

use crate::policy::Policy;


/// The facility used to read or write the priority of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pathway {
    /// Process niceness, through `getpriority`/`setpriority`.
    Niceness,
    /// The `sched_priority` field, through `sched_getparam`/`sched_setparam`.
    RealTimeParam,
}

impl Pathway {
    /// Selects the pathway for a process currently scheduled under `policy`.
    ///
    /// Unrecognized policies go through the real-time parameter as a best
    /// effort; whatever the kernel makes of that is reported to the caller.
    pub const fn for_policy(policy: Policy) -> Pathway {
        match policy {
            Policy::Other => Pathway::Niceness,
            Policy::Fifo | Policy::RoundRobin | Policy::Unknown(_) => Pathway::RealTimeParam,
        }
    }

    /// The label printed in front of a priority read through this pathway.
    pub const fn read_label(self) -> &'static str {
        match self {
            Pathway::Niceness => "getpriority: priority",
            Pathway::RealTimeParam => "sched_getparam: sched_priority",
        }
    }
}
