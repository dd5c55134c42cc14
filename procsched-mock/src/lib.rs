//! # procsched-mock Library
//!
//! In-memory implementation of the procsched scheduling service for testing.

mod scheduler;

pub use scheduler::{Call, MockScheduler, ProcessState};
