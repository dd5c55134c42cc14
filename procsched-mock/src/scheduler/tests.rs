use super::*;

#[test]
fn test_set_policy_on_missing_process_reports_esrch_first() {
    // Out-of-range priority too; the missing pid wins.
    let mut sched = MockScheduler::new();

    let err = sched
        .set_policy(Target::new(999), Policy::Fifo, 500)
        .unwrap_err();

    assert_eq!(err.syscall(), Syscall::SetScheduler);
    assert_eq!(err.errno(), libc::ESRCH);
}

#[test]
fn test_set_policy_rejects_out_of_range_priority() {
    let mut sched = MockScheduler::new();

    let err = sched.set_policy(Target::SELF, Policy::Fifo, 500).unwrap_err();
    assert_eq!(err.errno(), libc::EINVAL);

    let err = sched.set_policy(Target::SELF, Policy::Other, 5).unwrap_err();
    assert_eq!(err.errno(), libc::EINVAL);

    assert_eq!(sched.process(Target::SELF), Some(ProcessState::default()));
}

#[test]
fn test_calls_are_recorded_even_when_failing() {
    let mut sched = MockScheduler::new().with_failure(Syscall::SetPriority, libc::EACCES);

    let err = sched.set_nice(Target::SELF, -5).unwrap_err();

    assert_eq!(err.errno(), libc::EACCES);
    assert_eq!(
        sched.mutations(),
        [Call::SetNice {
            target: Target::SELF,
            value: -5,
        }]
    );
}
