//! Inspect and change the scheduling policy and priority of a process.
//!
//! The [`report`] module reads and prints the state of a process, the
//! [`transition`] module plans and applies changes, and [`app::run`] ties both
//! to a decoded command line.
pub mod app;
pub mod cli;
pub mod console;
pub mod report;
pub mod transition;
