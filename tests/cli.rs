use std::process::{Command, Output};

fn schedctl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schedctl"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run schedctl")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_unknown_policy_exits_before_inspection() {
    let output = schedctl(&["-s", "1", "-P", "SCHED_DEADLINE"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert_eq!(stderr(&output), "Unknown policy <SCHED_DEADLINE>.\n");
}

#[test]
fn test_unknown_flag_exits_with_1() {
    let output = schedctl(&["-q"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Unknown option `-q'.\n");
}

#[test]
fn test_missing_argument_exits_with_1() {
    let output = schedctl(&["-g", "-p"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert_eq!(stderr(&output), "Option -p requires an argument.\n");
}

#[test]
fn test_inspect_self() {
    let output = schedctl(&["-g"]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.starts_with("\nCurrent scheduling parameters for process 0:\n"), "{out}");
    assert!(out.contains("sched_getscheduler returned "), "{out}");
}

#[test]
fn test_missing_process_still_exits_with_0() {
    let output = schedctl(&["-g", "-p", "2147483647"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("sched_getscheduler returned errno 3"));
}

#[test]
fn test_positional_arguments_are_echoed() {
    let output = schedctl(&["stray"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Non-option argument stray\n");
}
