use std::{env, io, process::ExitCode};

#[cfg(all(feature = "real-sched", not(feature = "mock-sched")))]
use procsched::System as Scheduler;
#[cfg(feature = "mock-sched")]
use procsched_mock::MockScheduler as Scheduler;
use schedctl::{
    app,
    cli::{Invocation, print_help},
    console::Console,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[cfg(not(any(feature = "real-sched", feature = "mock-sched")))]
compile_error!("either the `real-sched` or the `mock-sched` feature must be enabled");

fn init_tracing() {
    if env::var("RUST_LOG").is_err() {
        let rust_log = "error,schedctl=error";
        // SAFETY: set_var is called first thing in main, before any other
        //         thread exists.
        unsafe { env::set_var("RUST_LOG", rust_log) };
    }

    // stdout carries the reports, diagnostics stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let invocation = match Invocation::parse(env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    if invocation.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if invocation.version {
        println!("schedctl v{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let mut scheduler = Scheduler::new();
    let mut console = Console::stdio();

    if let Err(err) = app::run(&invocation, &mut scheduler, &mut console) {
        error!(error = format!("{err:#}"));
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
