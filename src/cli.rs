//! Command line decoding.
//!
//! Flags follow getopt conventions: short flags can be clustered (`-gs 5`),
//! option arguments can be attached (`-p123`) or given as the next token even
//! when that token starts with a dash (`-s -5`), and `--` ends option
//! processing. Positional tokens may appear anywhere and are collected.

use procsched::{Policy, Target, UnknownPolicy};
use thiserror::Error;

use crate::transition::TransitionRequest;

#[cfg(test)]
mod tests;

/// Input errors, detected before any scheduling call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Option -{0} requires an argument.")]
    MissingArgument(char),

    #[error("Unknown option `{0}'.")]
    UnknownOption(String),

    #[error("Invalid numeric argument <{value}> for option -{option}.")]
    InvalidNumber { option: char, value: String },

    #[error(transparent)]
    UnknownPolicy(#[from] UnknownPolicy),
}

impl InputError {
    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            InputError::UnknownPolicy(_) => 2,
            InputError::MissingArgument(_)
            | InputError::UnknownOption(_)
            | InputError::InvalidNumber { .. } => 1,
        }
    }
}

/// Everything decoded from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// `-p`: process to work on, the calling process by default.
    pub target: Target,
    /// `-g`: print the current state.
    pub inspect: bool,
    /// `-s`: requested priority.
    pub priority: Option<i32>,
    /// `-P`: requested policy.
    pub policy: Option<Policy>,
    /// Tokens that are not options.
    pub positionals: Vec<String>,
    /// `-h`, `--help`
    pub help: bool,
    /// `-v`, `--version`
    pub version: bool,
}

impl Invocation {
    /// Decodes the arguments following the program name.
    pub fn parse<I, S>(args: I) -> Result<Invocation, InputError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let mut invocation = Invocation::default();

        while let Some(arg) = args.next() {
            if arg == "--" {
                invocation.positionals.extend(args.by_ref());
                break;
            }

            if let Some(long) = arg.strip_prefix("--") {
                match long {
                    "help" => invocation.help = true,
                    "version" => invocation.version = true,
                    _ => return Err(InputError::UnknownOption(arg)),
                }
                continue;
            }

            let cluster = match arg.strip_prefix('-') {
                Some(cluster) if !cluster.is_empty() => cluster,
                _ => {
                    invocation.positionals.push(arg);
                    continue;
                }
            };

            for (index, flag) in cluster.char_indices() {
                match flag {
                    'g' => invocation.inspect = true,
                    'h' => invocation.help = true,
                    'v' => invocation.version = true,
                    's' => {
                        let value = option_value(flag, &cluster[index + 1..], &mut args)?;
                        invocation.priority = Some(parse_number(flag, value)?);
                        break;
                    }
                    'p' => {
                        let value = option_value(flag, &cluster[index + 1..], &mut args)?;
                        invocation.target = Target::new(parse_number(flag, value)?);
                        break;
                    }
                    'P' => {
                        let value = option_value(flag, &cluster[index + 1..], &mut args)?;
                        invocation.policy = Some(value.parse()?);
                        break;
                    }
                    other => return Err(InputError::UnknownOption(format!("-{other}"))),
                }
            }
        }

        Ok(invocation)
    }

    /// Returns `true` when a policy or priority change was requested.
    pub fn modifies(&self) -> bool {
        self.policy.is_some() || self.priority.is_some()
    }

    /// The change requested on the command line.
    pub fn request(&self) -> TransitionRequest {
        TransitionRequest {
            target: self.target,
            policy: self.policy,
            priority: self.priority,
        }
    }
}

/// Returns the argument of `option`: the rest of its cluster when present,
/// otherwise the next token, whatever it looks like.
fn option_value<I>(option: char, attached: &str, args: &mut I) -> Result<String, InputError>
where
    I: Iterator<Item = String>,
{
    if attached.is_empty() {
        args.next().ok_or(InputError::MissingArgument(option))
    } else {
        Ok(attached.to_owned())
    }
}

fn parse_number(option: char, value: String) -> Result<i32, InputError> {
    value
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidNumber { option, value })
}

/// Prints usage information.
pub fn print_help() {
    println!("schedctl");
    println!("Usage: schedctl [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -g               Print the current scheduling policy and priority");
    println!("  -s <PRIORITY>    Change the priority (niceness for SCHED_OTHER)");
    println!("  -P <POLICY>      Change the policy: SCHED_FIFO, SCHED_RR or SCHED_OTHER");
    println!("  -p <PID>         Process to inspect or change (default: 0, the caller)");
    println!("  -h, --help       Print this help message");
    println!("  -v, --version    Print version information");
    println!();
    println!("Any change is reported with the state before and after it.");
    println!("Diagnostics can be enabled with RUST_LOG, e.g. RUST_LOG=schedctl=debug");
}
