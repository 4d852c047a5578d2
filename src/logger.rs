//! Progress and error reporting.
//!
//! The batch driver never checks whether anyone is listening: it always
//! receives a [`Logger`], and "no logging" is the [`NullLogger`].
//! [`ConsoleLogger`] forwards to the `log` facade; the binary installs
//! `env_logger` behind it.

/// Leveled sink for progress and error messages.
pub trait Logger {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Logger that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn info(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Logger backed by the `log` crate macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn info(&self, message: &str) {
        log::info!("{message}");
    }

    fn error(&self, message: &str) {
        log::error!("{message}");
    }
}
