//! Diagnostic side channel.
//!
//! Rejected configs and dropped frequencies are reported to a
//! [`DiagnosticSink`] owned by the [`Engine`](crate::Engine). Reports never
//! affect results; a sink only decides where they go.

use log::{debug, error, warn};

use crate::error::ConfigError;

/// Something worth telling the caller about that is not part of a result.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A config failed validation and the operation was aborted.
    Rejected {
        /// Operation that rejected the config.
        operation: &'static str,
        /// Why it was rejected.
        error: ConfigError,
    },
    /// A computed frequency was not finite and was left out of the output.
    Anomaly {
        /// Label of the config being processed.
        label: String,
        /// Position in the interval pattern, counted from the start index.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// A scale is about to be computed.
    Building {
        /// Label of the config being processed.
        label: String,
        /// Length of the interval pattern after augmentation.
        intervals: usize,
    },
}

/// Receiver for [`Diagnostic`]s.
///
/// Sinks are shared by every call made through an engine, possibly from
/// several threads at once.
pub trait DiagnosticSink: Send + Sync {
    /// Records one diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::Rejected { operation, error } => {
                error!("{}: check your config values are valid: {}", operation, error);
            }
            Diagnostic::Anomaly {
                label,
                index,
                value,
            } => {
                warn!("{}: note {} is not a finite frequency ({}), dropped", label, index, value);
            }
            Diagnostic::Building { label, intervals } => {
                debug!("{}: building scale from {} intervals", label, intervals);
            }
        }
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl DiagnosticSink for Silent {
    fn report(&self, _diagnostic: Diagnostic) {}
}
