//! Output streams for reports.
//!
//! Informational results go to `out`, failed OS calls to `err`. Tests swap
//! both for in-memory buffers.

use std::io::{self, Stderr, Stdout, Write};

pub struct Console<O: Write, E: Write> {
    pub out: O,
    pub err: E,
}

impl Console<Stdout, Stderr> {
    /// A console writing to the process's standard output and error.
    pub fn stdio() -> Console<Stdout, Stderr> {
        Console::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Console<O, E> {
    pub fn new(out: O, err: E) -> Console<O, E> {
        Console { out, err }
    }
}

impl Console<Vec<u8>, Vec<u8>> {
    /// A console capturing both streams in memory.
    pub fn buffered() -> Console<Vec<u8>, Vec<u8>> {
        Console::new(Vec::new(), Vec::new())
    }

    /// Everything written to `out` so far.
    pub fn out_text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    /// Everything written to `err` so far.
    pub fn err_text(&self) -> String {
        String::from_utf8_lossy(&self.err).into_owned()
    }
}
