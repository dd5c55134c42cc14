//! Top-level flow of one invocation.

use std::io::Write;

use anyhow::Context;
use procsched::SchedService;
use tracing::info;

use crate::{
    cli::Invocation,
    console::Console,
    report::{SchedulingState, report},
    transition,
};

#[cfg(test)]
mod tests;

/// Runs the inspection and/or transition requested by `invocation`.
///
/// Returns every state that was reported, in order. `-g` adds one inspection,
/// a requested change adds a before and an after inspection; both flags
/// together produce all three.
pub fn run<S, O, E>(
    invocation: &Invocation,
    service: &mut S,
    console: &mut Console<O, E>,
) -> Result<Vec<SchedulingState>, anyhow::Error>
where
    S: SchedService,
    O: Write,
    E: Write,
{
    for positional in &invocation.positionals {
        writeln!(console.out, "Non-option argument {positional}")
            .context("failed to echo argument")?;
    }

    let mut reports = Vec::new();

    if invocation.inspect {
        info!(pid = %invocation.target, "inspecting");
        reports.push(report(service, invocation.target, console)?);
    }

    if invocation.modifies() {
        let done = transition::run(service, &invocation.request(), console)?;
        reports.push(done.before);
        reports.push(done.after);
    }

    Ok(reports)
}
