//! Moving a process to a requested policy and priority.
//!
//! The controller always reports the state before and after a change. In
//! between it plans the calls needed to reach the requested state from the
//! observed one and issues them once each, in order. A failed call is
//! reported and the remaining steps still run, so partial outcomes (policy
//! changed, priority rejected) show up in the final report.

use std::io::Write;

use anyhow::Context;
use procsched::{Error, NEUTRAL_PRIORITY, Policy, SchedService, Target};
use tracing::{debug, instrument, warn};

use crate::{
    console::Console,
    report::{SchedulingState, report},
};


/// The change a caller asked for. Absent fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionRequest {
    pub target: Target,
    pub policy: Option<Policy>,
    pub priority: Option<i32>,
}

/// How a policy change is carried out, by target class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyChange {
    /// Policy and priority are set by the same `sched_setscheduler` call.
    Atomic,
    /// `sched_setscheduler` only accepts [`NEUTRAL_PRIORITY`]; the niceness is
    /// applied by a separate call afterwards.
    NeutralThenNiceness,
}

impl PolicyChange {
    pub const fn for_policy(policy: Policy) -> PolicyChange {
        if policy.is_time_sharing() {
            PolicyChange::NeutralThenNiceness
        } else {
            PolicyChange::Atomic
        }
    }
}

/// Priority passed along with a policy change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyPriority {
    Value(i32),
    /// The lowest priority of the new class, queried when the step runs.
    ClassMinimum,
}

/// A single call in a transition plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    SetPolicy {
        policy: Policy,
        priority: PolicyPriority,
    },
    /// Set the priority as understood by the class `policy`.
    SetPriority { policy: Policy, value: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("current policy of pid {0} is unknown, priority left unchanged")]
    CurrentPolicyUnknown(Target),
}

/// Computes the calls that take the target from `before` to the requested
/// state.
pub fn plan(request: &TransitionRequest, before: &SchedulingState) -> Result<Vec<Step>, PlanError> {
    let Some(policy) = request.policy else {
        // Without a policy change, the priority is interpreted for the class
        // observed before the change.
        let Some(value) = request.priority else {
            return Ok(Vec::new());
        };
        let current = before
            .policy()
            .ok_or(PlanError::CurrentPolicyUnknown(request.target))?;
        return Ok(vec![Step::SetPriority {
            policy: current,
            value,
        }]);
    };

    let steps = match PolicyChange::for_policy(policy) {
        PolicyChange::NeutralThenNiceness => {
            let mut steps = vec![Step::SetPolicy {
                policy,
                priority: PolicyPriority::Value(NEUTRAL_PRIORITY),
            }];
            if let Some(value) = request.priority {
                steps.push(Step::SetPriority { policy, value });
            }
            steps
        }
        PolicyChange::Atomic => {
            let priority = match (request.priority, before.real_time_priority()) {
                (Some(value), _) | (None, Some(value)) => PolicyPriority::Value(value),
                (None, None) => PolicyPriority::ClassMinimum,
            };
            vec![Step::SetPolicy { policy, priority }]
        }
    };

    Ok(steps)
}

/// Result of one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: Step,
    pub result: Result<(), Error>,
}

/// Everything observed and done during one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub before: SchedulingState,
    pub outcomes: Vec<StepOutcome>,
    pub after: SchedulingState,
}

fn apply<S: SchedService>(service: &mut S, target: Target, step: Step) -> Result<(), Error> {
    match step {
        Step::SetPolicy { policy, priority } => {
            let priority = match priority {
                PolicyPriority::Value(value) => value,
                PolicyPriority::ClassMinimum => service.get_priority_bounds(policy)?.0,
            };
            service.set_policy(target, policy, priority)
        }
        Step::SetPriority { policy, value } => service.set_priority_for_class(target, policy, value),
    }
}

fn announce<O: Write, E: Write>(
    request: &TransitionRequest,
    console: &mut Console<O, E>,
) -> std::io::Result<()> {
    let pid = request.target;
    match (request.policy, request.priority) {
        (Some(policy), Some(priority)) => writeln!(
            console.out,
            "trying to change pid {pid} to policy {policy} and priority {priority}:"
        ),
        (Some(policy), None) => writeln!(console.out, "trying to change pid {pid} to policy {policy}:"),
        (None, Some(priority)) => {
            writeln!(console.out, "trying to change pid {pid} to priority {priority}:")
        }
        (None, None) => Ok(()),
    }
}

/// Reports the state of the target, applies the request and reports the
/// state again.
///
/// OS call failures never abort the transition; only failing to write the
/// output does.
#[instrument(name = "transition", skip_all, fields(pid = %request.target))]
pub fn run<S, O, E>(
    service: &mut S,
    request: &TransitionRequest,
    console: &mut Console<O, E>,
) -> Result<Transition, anyhow::Error>
where
    S: SchedService,
    O: Write,
    E: Write,
{
    let before = report(service, request.target, console)?;

    announce(request, console).context("failed to write transition header")?;

    let mut outcomes = Vec::new();
    match plan(request, &before) {
        Ok(steps) => {
            debug!(?steps, "planned");
            for step in steps {
                let result = apply(service, request.target, step);
                if let Err(err) = &result {
                    warn!(?step, %err, "step failed");
                    writeln!(console.err, "{err}").context("failed to write step failure")?;
                }
                outcomes.push(StepOutcome { step, result });
            }
        }
        Err(err) => {
            warn!(%err, "nothing to apply");
            writeln!(console.err, "{err}").context("failed to write plan failure")?;
        }
    }

    let after = report(service, request.target, console)?;

    Ok(Transition {
        before,
        outcomes,
        after,
    })
}
