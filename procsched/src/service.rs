//! # Scheduling Service
//!
//! The [`SchedService`] trait is the uniform interface over the OS scheduling
//! primitives. Implementors provide the individual calls; the operations that
//! depend on the scheduling class are provided on top of them and dispatch
//! through [`Pathway`].

use crate::{
    error::Result,
    pathway::Pathway,
    policy::{Policy, Target},
};

/// Read and write access to process scheduling attributes.
///
/// Every method performs exactly one OS call (provided methods at most two)
/// and reports failure through its return value. Nothing is cached: each call
/// reflects the state of the target at that instant.
pub trait SchedService {
    /// Reads the scheduling policy of `target` (`sched_getscheduler`).
    fn get_policy(&mut self, target: Target) -> Result<Policy>;

    /// Sets policy and class priority of `target` in one call
    /// (`sched_setscheduler`).
    ///
    /// For [`Policy::Other`] the kernel only accepts
    /// [`NEUTRAL_PRIORITY`](crate::NEUTRAL_PRIORITY) here.
    fn set_policy(&mut self, target: Target, policy: Policy, priority: i32) -> Result<()>;

    /// Lowest legal priority for `policy` (`sched_get_priority_min`).
    fn priority_min(&mut self, policy: Policy) -> Result<i32>;

    /// Highest legal priority for `policy` (`sched_get_priority_max`).
    fn priority_max(&mut self, policy: Policy) -> Result<i32>;

    /// Reads the niceness of `target` (`getpriority(PRIO_PROCESS, ..)`).
    fn get_nice(&mut self, target: Target) -> Result<i32>;

    /// Sets the niceness of `target` (`setpriority(PRIO_PROCESS, ..)`).
    fn set_nice(&mut self, target: Target, value: i32) -> Result<()>;

    /// Reads the `sched_priority` field of `target` (`sched_getparam`).
    fn get_param(&mut self, target: Target) -> Result<i32>;

    /// Sets the `sched_priority` field of `target` (`sched_setparam`).
    fn set_param(&mut self, target: Target, priority: i32) -> Result<()>;

    /// Returns the `(min, max)` priority range for `policy`.
    ///
    /// Fails as soon as either bound fails. Callers that must report each
    /// bound's failure on its own query `priority_min` and `priority_max`
    /// separately.
    fn get_priority_bounds(&mut self, policy: Policy) -> Result<(i32, i32)> {
        Ok((self.priority_min(policy)?, self.priority_max(policy)?))
    }

    /// Reads the priority of `target`, interpreted for `policy`.
    fn get_priority_for_class(&mut self, target: Target, policy: Policy) -> Result<i32> {
        match Pathway::for_policy(policy) {
            Pathway::Niceness => self.get_nice(target),
            Pathway::RealTimeParam => self.get_param(target),
        }
    }

    /// Sets the priority of `target`, interpreted for the class it is
    /// currently scheduled under.
    fn set_priority_for_class(
        &mut self,
        target: Target,
        current_policy: Policy,
        value: i32,
    ) -> Result<()> {
        match Pathway::for_policy(current_policy) {
            Pathway::Niceness => self.set_nice(target, value),
            Pathway::RealTimeParam => self.set_param(target, value),
        }
    }
}
