//! Script logging.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::internal::InternalCalls;

/// Severity of a script log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Info,
    Warn,
    Error,
    Critical,
}

impl LogLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forwards messages to the host's log at a fixed severity per method.
#[derive(Clone, Copy)]
pub struct Log<'a> {
    calls: &'a dyn InternalCalls,
}

impl<'a> Log<'a> {
    pub(crate) fn new(calls: &'a dyn InternalCalls) -> Self {
        Self { calls }
    }

    /// Log at trace level.
    pub fn trace(&self, text: impl AsRef<str>) {
        self.calls.log(LogLevel::Trace, text.as_ref());
    }

    /// Log at info level.
    pub fn info(&self, text: impl AsRef<str>) {
        self.calls.log(LogLevel::Info, text.as_ref());
    }

    /// Log a warning.
    pub fn warn(&self, text: impl AsRef<str>) {
        self.calls.log(LogLevel::Warn, text.as_ref());
    }

    /// Log an error.
    pub fn error(&self, text: impl AsRef<str>) {
        self.calls.log(LogLevel::Error, text.as_ref());
    }

    /// Log an unrecoverable error.
    pub fn critical(&self, text: impl AsRef<str>) {
        self.calls.log(LogLevel::Critical, text.as_ref());
    }
}
