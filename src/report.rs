//! Inspection of the scheduling state of a process.
//!
//! A [`SchedulingState`] is read fresh from the [`SchedService`] every time;
//! nothing is cached between inspections. Each sub-read is kept as its own
//! result so one failure does not hide the others.

use std::io::Write;

use anyhow::Context;
use procsched::{Error, Pathway, Policy, SchedService, Target};
use tracing::debug;

use crate::console::Console;


/// What could be read once the policy of the target was known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDetails {
    pub policy: Policy,
    pub min: Result<i32, Error>,
    pub max: Result<i32, Error>,
    /// Facility the priority was read through, chosen from `policy`.
    pub pathway: Pathway,
    pub priority: Result<i32, Error>,
}

/// Snapshot of the scheduling attributes of a process at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingState {
    pub target: Target,
    /// The policy and everything read for it, or the error that prevented
    /// reading the policy. Bounds and priority depend on the policy and are
    /// not attempted without it.
    pub details: Result<PolicyDetails, Error>,
}

impl SchedulingState {
    /// Reads the current state of `target`.
    pub fn inspect<S: SchedService>(service: &mut S, target: Target) -> SchedulingState {
        let details = service.get_policy(target).map(|policy| {
            let pathway = Pathway::for_policy(policy);
            PolicyDetails {
                policy,
                min: service.priority_min(policy),
                max: service.priority_max(policy),
                pathway,
                priority: service.get_priority_for_class(target, policy),
            }
        });

        debug!(pid = %target, ?details, "inspected");

        SchedulingState { target, details }
    }

    /// The policy, if it could be read.
    pub fn policy(&self) -> Option<Policy> {
        self.details.as_ref().ok().map(|details| details.policy)
    }

    /// The current `sched_priority`, only when the target is in a real-time
    /// class and the value could be read.
    pub fn real_time_priority(&self) -> Option<i32> {
        let details = self.details.as_ref().ok()?;
        if details.policy.is_real_time() {
            details.priority.as_ref().ok().copied()
        } else {
            None
        }
    }

    /// Writes the report: values to `console.out`, failures to `console.err`.
    pub fn write_to<O: Write, E: Write>(
        &self,
        console: &mut Console<O, E>,
    ) -> Result<(), anyhow::Error> {
        write_state(self, console).context("failed to write scheduling report")
    }
}

fn write_state<O: Write, E: Write>(
    state: &SchedulingState,
    console: &mut Console<O, E>,
) -> std::io::Result<()> {
    writeln!(
        console.out,
        "\nCurrent scheduling parameters for process {}:",
        state.target
    )?;

    match &state.details {
        Err(err) => writeln!(console.err, "{err}")?,
        Ok(details) => {
            writeln!(
                console.out,
                "sched_getscheduler returned {}: {}",
                details.policy.as_raw(),
                details.policy
            )?;
            write_value(console, "priority min", &details.min)?;
            write_value(console, "priority max", &details.max)?;
            write_value(console, details.pathway.read_label(), &details.priority)?;
        }
    }

    writeln!(console.out)?;
    console.out.flush()
}

fn write_value<O: Write, E: Write>(
    console: &mut Console<O, E>,
    label: &str,
    value: &Result<i32, Error>,
) -> std::io::Result<()> {
    match value {
        Ok(value) => writeln!(console.out, "{label}={value}"),
        Err(err) => writeln!(console.err, "{err}"),
    }
}

/// Inspects `target`, writes the report and returns the state.
pub fn report<S, O, E>(
    service: &mut S,
    target: Target,
    console: &mut Console<O, E>,
) -> Result<SchedulingState, anyhow::Error>
where
    S: SchedService,
    O: Write,
    E: Write,
{
    let state = SchedulingState::inspect(service, target);
    state.write_to(console)?;
    Ok(state)
}
