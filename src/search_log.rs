//! Progress reporting for the search. The search never prints; callers pass in whichever
//! `SearchLog` suits them, and `NoopLog` discards everything.

use std::fmt;

pub trait SearchLog {
    fn log(&self, message: fmt::Arguments<'_>);
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl SearchLog for NoopLog {
    fn log(&self, _message: fmt::Arguments<'_>) {}
}

/// Forwards messages to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl SearchLog for TracingLog {
    fn log(&self, message: fmt::Arguments<'_>) {
        tracing::debug!(target: "staggered_squares::search", "{message}");
    }
}

impl<F: Fn(fmt::Arguments<'_>)> SearchLog for F {
    fn log(&self, message: fmt::Arguments<'_>) {
        self(message);
    }
}
