use std::sync::Arc;

use serde_json::Value;

use crate::augment::AugmentRequest;
use crate::config::ScaleConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink, Silent};
use crate::error::ConfigError;
use crate::freq::NoteRequest;
use crate::octaves::{OctaveConfig, OctaveScale};

/// Entry point for every operation on raw JSON configs.
///
/// An engine holds nothing but its diagnostic sink, so one instance can be
/// shared freely between threads and calls never affect each other.
#[derive(Clone)]
pub struct Engine {
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

impl Engine {
    /// Engine that reports diagnostics through `log`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(LogSink))
    }

    /// Engine that reports nothing.
    pub fn silent() -> Self {
        Self::with_sink(Arc::new(Silent))
    }

    /// Engine that reports to `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    /// Frequencies of the scale or chord described by `config`.
    ///
    /// Fails if the config is not an object, `intervals` is missing or not a
    /// non-empty array of numbers, any numeric property is not a finite
    /// number, `numSemitones` is not above zero, or any other numeric
    /// property except `rootNote` is negative.
    pub fn build_scale(&self, config: &Value) -> Result<Vec<f64>, ConfigError> {
        let config = self.checked("build_scale", ScaleConfig::from_config(config))?;
        Ok(config.frequencies(self.sink.as_ref()))
    }

    /// Frequency of one note, see [`NoteRequest::from_config`].
    pub fn frequency(&self, config: &Value) -> Result<f64, ConfigError> {
        let request = self.checked("frequency", NoteRequest::from_config(config))?;
        Ok(request.frequency())
    }

    /// Augmented pattern, see [`AugmentRequest::from_config`].
    pub fn augment(&self, config: &Value) -> Result<Vec<f64>, ConfigError> {
        let request = self.checked("augment", AugmentRequest::from_config(config))?;
        Ok(request.run())
    }

    /// Multi-octave scale centred on `startFreq`, see
    /// [`OctaveConfig::from_config`].
    pub fn octave_scale(&self, config: &Value) -> Result<OctaveScale, ConfigError> {
        let config = self.checked("octave_scale", OctaveConfig::from_config(config))?;
        Ok(config.build())
    }

    fn checked<T>(
        &self,
        operation: &'static str,
        result: Result<T, ConfigError>,
    ) -> Result<T, ConfigError> {
        result.map_err(|error| {
            self.sink.report(Diagnostic::Rejected {
                operation,
                error: error.clone(),
            });
            error
        })
    }
}
