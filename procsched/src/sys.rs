//! # libc Backend
//!
//! [`System`] implements [`SchedService`] directly on top of the libc
//! scheduling calls. Each call's return value is checked on the spot and
//! `errno` is captured into an [`Error`] before anything else can clobber it.

use crate::{
    error::{Error, Result, Syscall},
    policy::{Policy, Target},
    service::SchedService,
};


/// Calls a libc function returning `-1` on failure and converts the outcome
/// into a [`Result`] carrying the non-negative return value.
macro_rules! libc_call {
    ($syscall: expr, $call: expr) => {{
        // SAFETY: the wrapped scheduling calls only read or write the plain
        //         `sched_param` value handed to them by reference.
        let ret = unsafe { $call };
        if ret == -1 {
            Err(Error::last_os_error($syscall))
        } else {
            Ok(ret)
        }
    }};
}

/// The kernel's scheduler, reached through libc.
#[derive(Debug, Default, Clone, Copy)]
pub struct System;

impl System {
    pub fn new() -> System {
        System
    }
}

fn errno_location() -> *mut libc::c_int {
    // SAFETY: __errno_location always returns a valid pointer to the calling
    //         thread's errno.
    unsafe { libc::__errno_location() }
}

impl SchedService for System {
    fn get_policy(&mut self, target: Target) -> Result<Policy> {
        libc_call!(
            Syscall::GetScheduler,
            libc::sched_getscheduler(target.pid())
        )
        .map(Policy::from_raw)
    }

    fn set_policy(&mut self, target: Target, policy: Policy, priority: i32) -> Result<()> {
        let param = libc::sched_param {
            sched_priority: priority,
        };
        libc_call!(
            Syscall::SetScheduler,
            libc::sched_setscheduler(target.pid(), policy.as_raw(), &param)
        )
        .map(drop)
    }

    fn priority_min(&mut self, policy: Policy) -> Result<i32> {
        libc_call!(
            Syscall::GetPriorityMin,
            libc::sched_get_priority_min(policy.as_raw())
        )
    }

    fn priority_max(&mut self, policy: Policy) -> Result<i32> {
        libc_call!(
            Syscall::GetPriorityMax,
            libc::sched_get_priority_max(policy.as_raw())
        )
    }

    fn get_nice(&mut self, target: Target) -> Result<i32> {
        // -1 is a legitimate niceness, so errno is the only failure signal.
        // SAFETY: errno_location points to this thread's errno.
        unsafe { *errno_location() = 0 };
        // SAFETY: getpriority has no pointer arguments.
        let nice = unsafe { libc::getpriority(libc::PRIO_PROCESS, target.pid() as libc::id_t) };
        // SAFETY: as above.
        let errno = unsafe { *errno_location() };
        if errno != 0 {
            Err(Error::from_errno(Syscall::GetPriority, errno))
        } else {
            Ok(nice)
        }
    }

    fn set_nice(&mut self, target: Target, value: i32) -> Result<()> {
        libc_call!(
            Syscall::SetPriority,
            libc::setpriority(libc::PRIO_PROCESS, target.pid() as libc::id_t, value)
        )
        .map(drop)
    }

    fn get_param(&mut self, target: Target) -> Result<i32> {
        let mut param = libc::sched_param { sched_priority: 0 };
        libc_call!(
            Syscall::GetParam,
            libc::sched_getparam(target.pid(), &mut param)
        )?;
        Ok(param.sched_priority)
    }

    fn set_param(&mut self, target: Target, priority: i32) -> Result<()> {
        let param = libc::sched_param {
            sched_priority: priority,
        };
        libc_call!(
            Syscall::SetParam,
            libc::sched_setparam(target.pid(), &param)
        )
        .map(drop)
    }
}
