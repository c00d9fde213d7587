//! Equal temperament frequencies for scales, chords and interval patterns.
//!
//! Every operation takes a JSON object as its config, checks it, and either
//! returns its result or a [`ConfigError`] saying which property was wrong:
//!
//! ```
//! use serde_json::json;
//!
//! let scale = freqi::build_scale(&json!({
//!     "startFreq": 440,
//!     "intervals": [0, 4, 7],
//!     "numNotes": 6,
//! }))
//! .unwrap();
//! assert_eq!(scale.len(), 6);
//! assert_eq!(scale[3], 880.0);
//!
//! assert!(freqi::build_scale(&json!({ "startFreq": -1, "intervals": [0] })).is_err());
//! ```
//!
//! The free functions report rejected configs through the `log` crate. Use
//! an [`Engine`] to choose a different [`DiagnosticSink`].

#![warn(missing_docs)]

pub mod augment;
pub mod config;
pub mod diagnostics;
mod engine;
pub mod error;
pub mod freq;
pub mod octaves;
pub mod render;
mod scale;
mod validate;

use serde_json::Value;

pub use augment::{augment_intervals, AugmentRequest};
pub use config::{ScaleConfig, MAX_NOTES};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, Silent};
pub use engine::Engine;
pub use error::{ConfigError, ErrorKind};
pub use freq::{equal_temperament, NoteRequest};
pub use octaves::{OctaveConfig, OctaveScale};

/// Pitch-class names of the twelve-tone chromatic scale, starting from C.
///
/// For display only; nothing in this crate derives note names.
pub const CHROMATIC_SCALE: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Scale frequencies in playback order, see [`Engine::build_scale`].
pub fn build_scale(config: &Value) -> Result<Vec<f64>, ConfigError> {
    Engine::new().build_scale(config)
}

/// Frequency of a single note, see [`Engine::frequency`].
pub fn frequency(config: &Value) -> Result<f64, ConfigError> {
    Engine::new().frequency(config)
}

/// Augmented interval pattern, see [`Engine::augment`].
pub fn augment(config: &Value) -> Result<Vec<f64>, ConfigError> {
    Engine::new().augment(config)
}

/// Multi-octave scale, see [`Engine::octave_scale`].
pub fn octave_scale(config: &Value) -> Result<OctaveScale, ConfigError> {
    Engine::new().octave_scale(config)
}
