//! # Mock Scheduling Service
//!
//! [`MockScheduler`] keeps the scheduling attributes of a handful of fake
//! processes in memory and applies the same validation the Linux scheduler
//! does for the three managed classes. Every primitive call is recorded so
//! tests can check which calls were issued and in what order.

use std::collections::HashMap;

use procsched::{Error, NEUTRAL_PRIORITY, Policy, Result, SchedService, Syscall, Target};

#[cfg(test)]
mod tests;

const NICE_MIN: i32 = -20;
const NICE_MAX: i32 = 19;
const RT_PRIORITY_MIN: i32 = 1;
const RT_PRIORITY_MAX: i32 = 99;

/// Pid the mock answers for when asked about [`Target::SELF`].
const DEFAULT_SELF_PID: libc::pid_t = 1000;

/// Scheduling attributes of one simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessState {
    pub policy: Policy,
    /// The `sched_priority` field; always 0 outside the real-time classes.
    pub rt_priority: i32,
    pub nice: i32,
}

impl ProcessState {
    pub const fn time_sharing(nice: i32) -> ProcessState {
        ProcessState {
            policy: Policy::Other,
            rt_priority: 0,
            nice,
        }
    }

    pub const fn real_time(policy: Policy, rt_priority: i32) -> ProcessState {
        ProcessState {
            policy,
            rt_priority,
            nice: 0,
        }
    }
}

impl Default for ProcessState {
    fn default() -> ProcessState {
        ProcessState::time_sharing(0)
    }
}

/// A single call made against the mock, in the order it was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    GetPolicy(Target),
    SetPolicy {
        target: Target,
        policy: Policy,
        priority: i32,
    },
    PriorityMin(Policy),
    PriorityMax(Policy),
    GetNice(Target),
    SetNice {
        target: Target,
        value: i32,
    },
    GetParam(Target),
    SetParam {
        target: Target,
        priority: i32,
    },
}

impl Call {
    /// Returns `true` for calls that change scheduling state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::SetPolicy { .. } | Call::SetNice { .. } | Call::SetParam { .. }
        )
    }
}

/// In-memory stand-in for the kernel scheduler.
#[derive(Debug, Clone)]
pub struct MockScheduler {
    self_pid: libc::pid_t,
    processes: HashMap<libc::pid_t, ProcessState>,
    failures: HashMap<Syscall, i32>,
    privileged: bool,
    calls: Vec<Call>,
}

impl Default for MockScheduler {
    fn default() -> MockScheduler {
        MockScheduler::new()
    }
}

impl MockScheduler {
    /// Creates a privileged scheduler knowing only the calling process, which
    /// starts out time-sharing with niceness 0.
    pub fn new() -> MockScheduler {
        MockScheduler {
            self_pid: DEFAULT_SELF_PID,
            processes: HashMap::from([(DEFAULT_SELF_PID, ProcessState::default())]),
            failures: HashMap::new(),
            privileged: true,
            calls: Vec::new(),
        }
    }

    /// Adds or replaces a simulated process.
    pub fn with_process(mut self, pid: libc::pid_t, state: ProcessState) -> MockScheduler {
        self.processes.insert(pid, state);
        self
    }

    /// Replaces the state of the calling process.
    pub fn with_self(self, state: ProcessState) -> MockScheduler {
        let pid = self.self_pid;
        self.with_process(pid, state)
    }

    /// Makes every later call of `syscall` fail with `errno`.
    pub fn with_failure(mut self, syscall: Syscall, errno: i32) -> MockScheduler {
        self.failures.insert(syscall, errno);
        self
    }

    /// Without privileges, real-time policies and lowering niceness are
    /// refused like they are for an unprivileged user.
    pub fn unprivileged(mut self) -> MockScheduler {
        self.privileged = false;
        self
    }

    /// Current state of a simulated process.
    pub fn process(&self, target: Target) -> Option<ProcessState> {
        self.processes.get(&self.resolve(target)).copied()
    }

    /// All calls issued so far.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Only the calls that change scheduling state.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|call| call.is_mutation())
            .copied()
            .collect()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn resolve(&self, target: Target) -> libc::pid_t {
        if target == Target::SELF {
            self.self_pid
        } else {
            target.pid()
        }
    }

    fn enter(&mut self, call: Call, syscall: Syscall) -> Result<()> {
        self.calls.push(call);
        match self.failures.get(&syscall) {
            Some(&errno) => Err(Error::from_errno(syscall, errno)),
            None => Ok(()),
        }
    }

    fn lookup(&mut self, target: Target, syscall: Syscall) -> Result<&mut ProcessState> {
        let pid = self.resolve(target);
        if pid < 0 {
            return Err(Error::from_errno(syscall, libc::EINVAL));
        }
        self.processes
            .get_mut(&pid)
            .ok_or_else(|| Error::from_errno(syscall, libc::ESRCH))
    }

    fn bounds(policy: Policy, syscall: Syscall) -> Result<(i32, i32)> {
        match policy {
            Policy::Fifo | Policy::RoundRobin => Ok((RT_PRIORITY_MIN, RT_PRIORITY_MAX)),
            Policy::Other => Ok((NEUTRAL_PRIORITY, NEUTRAL_PRIORITY)),
            Policy::Unknown(libc::SCHED_BATCH | libc::SCHED_IDLE) => {
                Ok((NEUTRAL_PRIORITY, NEUTRAL_PRIORITY))
            }
            Policy::Unknown(_) => Err(Error::from_errno(syscall, libc::EINVAL)),
        }
    }
}

impl SchedService for MockScheduler {
    fn get_policy(&mut self, target: Target) -> Result<Policy> {
        self.enter(Call::GetPolicy(target), Syscall::GetScheduler)?;
        Ok(self.lookup(target, Syscall::GetScheduler)?.policy)
    }

    fn set_policy(&mut self, target: Target, policy: Policy, priority: i32) -> Result<()> {
        let syscall = Syscall::SetScheduler;
        self.enter(
            Call::SetPolicy {
                target,
                policy,
                priority,
            },
            syscall,
        )?;

        // Like the kernel: the pid is resolved before the parameters are
        // validated.
        let privileged = self.privileged;
        let process = self.lookup(target, syscall)?;
        let (min, max) = MockScheduler::bounds(policy, syscall)?;
        if !(min..=max).contains(&priority) {
            return Err(Error::from_errno(syscall, libc::EINVAL));
        }
        if policy.is_real_time() && !privileged {
            return Err(Error::from_errno(syscall, libc::EPERM));
        }
        process.policy = policy;
        process.rt_priority = priority;
        Ok(())
    }

    fn priority_min(&mut self, policy: Policy) -> Result<i32> {
        self.enter(Call::PriorityMin(policy), Syscall::GetPriorityMin)?;
        MockScheduler::bounds(policy, Syscall::GetPriorityMin).map(|(min, _)| min)
    }

    fn priority_max(&mut self, policy: Policy) -> Result<i32> {
        self.enter(Call::PriorityMax(policy), Syscall::GetPriorityMax)?;
        MockScheduler::bounds(policy, Syscall::GetPriorityMax).map(|(_, max)| max)
    }

    fn get_nice(&mut self, target: Target) -> Result<i32> {
        self.enter(Call::GetNice(target), Syscall::GetPriority)?;
        Ok(self.lookup(target, Syscall::GetPriority)?.nice)
    }

    fn set_nice(&mut self, target: Target, value: i32) -> Result<()> {
        let syscall = Syscall::SetPriority;
        self.enter(Call::SetNice { target, value }, syscall)?;

        let privileged = self.privileged;
        let process = self.lookup(target, syscall)?;
        let value = value.clamp(NICE_MIN, NICE_MAX);
        if value < process.nice && !privileged {
            return Err(Error::from_errno(syscall, libc::EACCES));
        }
        process.nice = value;
        Ok(())
    }

    fn get_param(&mut self, target: Target) -> Result<i32> {
        self.enter(Call::GetParam(target), Syscall::GetParam)?;
        Ok(self.lookup(target, Syscall::GetParam)?.rt_priority)
    }

    fn set_param(&mut self, target: Target, priority: i32) -> Result<()> {
        let syscall = Syscall::SetParam;
        self.enter(Call::SetParam { target, priority }, syscall)?;

        let process = self.lookup(target, syscall)?;
        let (min, max) = MockScheduler::bounds(process.policy, syscall)?;
        if !(min..=max).contains(&priority) {
            return Err(Error::from_errno(syscall, libc::EINVAL));
        }
        process.rt_priority = priority;
        Ok(())
    }
}
