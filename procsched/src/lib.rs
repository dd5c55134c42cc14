//! # procsched Library
//!
//! The **procsched** crate wraps the Linux process scheduling calls behind the
//! [`SchedService`] trait. The [`System`] type talks to the kernel through
//! `libc`; other implementations (see the `procsched-mock` crate) can stand in
//! for it in tests.
//!
//! Scheduling classes do not share a priority scale. Time-sharing uses the
//! process niceness, the real-time classes use the `sched_priority` field.
//! [`Pathway`] decides which of the two applies to a given [`Policy`].
mod error;
mod pathway;
mod policy;
mod service;
mod sys;

pub use error::{Error, Result, Syscall, UnknownPolicy};
pub use pathway::Pathway;
pub use policy::{NEUTRAL_PRIORITY, Policy, Target};
pub use service::SchedService;
pub use sys::System;
