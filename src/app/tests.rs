use procsched::{Policy, Target};
use procsched_mock::{Call, MockScheduler, ProcessState};

use super::*;

fn invoke(args: &[&str], sched: &mut MockScheduler) -> (Vec<SchedulingState>, Console<Vec<u8>, Vec<u8>>) {
    let invocation = Invocation::parse(args.iter().copied()).unwrap();
    let mut console = Console::buffered();
    let reports = run(&invocation, sched, &mut console).unwrap();
    (reports, console)
}

#[test]
fn test_inspect_only_never_mutates() {
    let mut sched = MockScheduler::new().with_process(4242, ProcessState::real_time(Policy::Fifo, 9));

    let (reports, console) = invoke(&["-g", "-p", "4242"], &mut sched);

    assert_eq!(reports.len(), 1);
    assert!(sched.mutations().is_empty());
    assert!(console.out_text().contains("sched_getparam: sched_priority=9\n"));
}

#[test]
fn test_set_produces_before_and_after_reports() {
    let mut sched = MockScheduler::new();

    let (reports, console) = invoke(&["-s", "5"], &mut sched);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].details.as_ref().unwrap().priority, Ok(0));
    assert_eq!(reports[1].details.as_ref().unwrap().priority, Ok(5));
    assert_eq!(
        sched.mutations(),
        [Call::SetNice {
            target: Target::SELF,
            value: 5,
        }]
    );
    assert_eq!(
        console
            .out_text()
            .matches("Current scheduling parameters for process 0:")
            .count(),
        2
    );
}

#[test]
fn test_inspect_and_set_report_three_times() {
    let mut sched = MockScheduler::new();

    let (reports, _) = invoke(&["-g", "-s", "1"], &mut sched);

    assert_eq!(reports.len(), 3);
    assert_eq!(sched.mutations().len(), 1);
}

#[test]
fn test_policy_flag_alone_triggers_transition() {
    let mut sched = MockScheduler::new();

    let (reports, _) = invoke(&["-P", "SCHED_RR"], &mut sched);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[1].policy(), Some(Policy::RoundRobin));
}

#[test]
fn test_positionals_are_echoed() {
    let mut sched = MockScheduler::new();

    let (reports, console) = invoke(&["foo", "bar"], &mut sched);

    assert!(reports.is_empty());
    assert!(sched.calls().is_empty());
    assert_eq!(
        console.out_text(),
        "Non-option argument foo\nNon-option argument bar\n"
    );
}

#[test]
fn test_os_failures_do_not_fail_the_run() {
    let mut sched = MockScheduler::new();

    let (reports, console) = invoke(&["-p", "999", "-s", "3", "-P", "SCHED_FIFO"], &mut sched);

    assert_eq!(reports.len(), 2);
    assert!(console.err_text().contains("No such process"));
}
