use super::*;

fn parse(args: &[&str]) -> Result<Invocation, InputError> {
    Invocation::parse(args.iter().copied())
}

#[test]
fn test_defaults() {
    let invocation = parse(&[]).unwrap();
    assert_eq!(invocation.target, Target::SELF);
    assert!(!invocation.inspect);
    assert!(!invocation.modifies());
    assert!(invocation.positionals.is_empty());
}

#[test]
fn test_policy_literals() {
    for (literal, policy) in [
        ("SCHED_FIFO", Policy::Fifo),
        ("SCHED_RR", Policy::RoundRobin),
        ("SCHED_OTHER", Policy::Other),
    ] {
        let invocation = parse(&["-P", literal]).unwrap();
        assert_eq!(invocation.policy, Some(policy));
    }
}

#[test]
fn test_unknown_policy_exits_with_2() {
    let err = parse(&["-P", "SCHED_BATCH"]).unwrap_err();
    assert_eq!(
        err,
        InputError::UnknownPolicy(UnknownPolicy("SCHED_BATCH".to_owned()))
    );
    assert_eq!(err.exit_code(), 2);
    assert_eq!(err.to_string(), "Unknown policy <SCHED_BATCH>.");
}

#[test]
fn test_full_set() {
    let invocation = parse(&["-s", "10", "-P", "SCHED_RR", "-p", "4242"]).unwrap();
    assert_eq!(invocation.priority, Some(10));
    assert_eq!(invocation.policy, Some(Policy::RoundRobin));
    assert_eq!(invocation.target, Target::new(4242));
    assert!(invocation.modifies());
    assert_eq!(
        invocation.request(),
        TransitionRequest {
            target: Target::new(4242),
            policy: Some(Policy::RoundRobin),
            priority: Some(10),
        }
    );
}

#[test]
fn test_clustered_and_attached_arguments() {
    let invocation = parse(&["-gp123", "-PSCHED_FIFO", "-gs", "5"]).unwrap();
    assert!(invocation.inspect);
    assert_eq!(invocation.target, Target::new(123));
    assert_eq!(invocation.policy, Some(Policy::Fifo));
    assert_eq!(invocation.priority, Some(5));
}

#[test]
fn test_negative_niceness_is_an_argument() {
    let invocation = parse(&["-s", "-5"]).unwrap();
    assert_eq!(invocation.priority, Some(-5));
}

#[test]
fn test_missing_argument() {
    for flag in ['s', 'p', 'P'] {
        let err = parse(&["-g", &format!("-{flag}")]).unwrap_err();
        assert_eq!(err, InputError::MissingArgument(flag));
        assert_eq!(err.exit_code(), 1);
    }
    assert_eq!(
        parse(&["-s"]).unwrap_err().to_string(),
        "Option -s requires an argument."
    );
}

#[test]
fn test_unknown_option() {
    let err = parse(&["-g", "-x"]).unwrap_err();
    assert_eq!(err, InputError::UnknownOption("-x".to_owned()));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(err.to_string(), "Unknown option `-x'.");

    let err = parse(&["--verbose"]).unwrap_err();
    assert_eq!(err, InputError::UnknownOption("--verbose".to_owned()));
}

#[test]
fn test_invalid_number() {
    let err = parse(&["-p", "abc"]).unwrap_err();
    assert_eq!(
        err,
        InputError::InvalidNumber {
            option: 'p',
            value: "abc".to_owned()
        }
    );
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_first_error_wins() {
    let err = parse(&["-P", "bogus", "-x"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    let err = parse(&["-x", "-P", "bogus"]).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_positionals_are_collected() {
    let invocation = parse(&["foo", "-g", "-", "bar", "--", "-s", "1"]).unwrap();
    assert!(invocation.inspect);
    assert_eq!(invocation.priority, None);
    assert_eq!(invocation.positionals, ["foo", "-", "bar", "-s", "1"]);
}

#[test]
fn test_help_and_version() {
    assert!(parse(&["-h"]).unwrap().help);
    assert!(parse(&["--help"]).unwrap().help);
    assert!(parse(&["-v"]).unwrap().version);
    assert!(parse(&["--version"]).unwrap().version);
}
