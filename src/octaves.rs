//! Multi-octave equal temperament scale centred on a start frequency.
//!
//! Octaves are generated alternately below and above the start frequency.
//! Lower octaves are prepended and upper octaves appended, so the result is
//! always in ascending pitch order, with the start frequency itself at
//! [`OctaveScale::centre_freq_index`].

use serde::Serialize;
use serde_json::Value;

use crate::config::{DEFAULT_START_FREQ, MAX_NOTES};
use crate::error::ConfigError;
use crate::validate::{read_flag, read_number, read_whole, Bound, Field, Kind, Schema, Unknown};

const START_FREQ: Field = Field::optional("startFreq", Kind::Number, Bound::NonNegative);
const NUM_OCTAVES: Field =
    Field::optional("numOctaves", Kind::Whole, Bound::NonNegative).at_most(MAX_NOTES);
const NUM_SEMITONES: Field =
    Field::optional("numSemitones", Kind::Whole, Bound::Positive).at_most(MAX_NOTES);
const DOWN_FIRST: Field = Field::optional("downFirst", Kind::Flag, Bound::Signed);

pub(crate) const OCTAVE_SCHEMA: Schema = Schema {
    fields: &[START_FREQ, NUM_OCTAVES, NUM_SEMITONES, DOWN_FIRST],
    unknown: Unknown::NonNegativeNumber,
};

/// A generated multi-octave scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OctaveScale {
    /// Frequencies in ascending order.
    pub scale: Vec<f64>,
    /// Position of the start frequency in `scale`.
    pub centre_freq_index: usize,
}

/// Settings for [`OctaveScale`] generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctaveConfig {
    /// Frequency the scale is centred on.
    pub start_freq: f64,
    /// Octaves to generate in total, split between below and above.
    pub num_octaves: usize,
    /// Steps per octave.
    pub num_semitones: usize,
    /// Whether the first octave generated lies below the start frequency.
    pub down_first: bool,
}

impl Default for OctaveConfig {
    fn default() -> Self {
        Self {
            start_freq: DEFAULT_START_FREQ,
            num_octaves: 2,
            num_semitones: 12,
            down_first: true,
        }
    }
}

impl OctaveConfig {
    /// Reads `{ startFreq?, numOctaves?, numSemitones?, downFirst? }`.
    ///
    /// `null` means "all defaults". Missing fields take the values of
    /// [`OctaveConfig::default`]. The scale may hold at most [`MAX_NOTES`]
    /// generated notes, so `numOctaves * numSemitones` is capped too.
    pub fn from_config(config: &Value) -> Result<Self, ConfigError> {
        if config.is_null() {
            return Ok(Self::default());
        }
        let map = OCTAVE_SCHEMA.check(config)?;
        let defaults = Self::default();
        let parsed = Self {
            start_freq: read_number(map, &START_FREQ)?.unwrap_or(defaults.start_freq),
            num_octaves: read_whole(map, &NUM_OCTAVES)?.unwrap_or(defaults.num_octaves),
            num_semitones: read_whole(map, &NUM_SEMITONES)?.unwrap_or(defaults.num_semitones),
            down_first: read_flag(map, &DOWN_FIRST)?.unwrap_or(defaults.down_first),
        };
        match parsed.num_octaves.checked_mul(parsed.num_semitones) {
            Some(total) if total <= MAX_NOTES => Ok(parsed),
            _ => Err(ConfigError::range_violation(
                NUM_OCTAVES.name,
                format!("times numSemitones must be at most {}", MAX_NOTES),
            )),
        }
    }

    fn is_down_octave(&self, octave: usize) -> bool {
        let remainder = if self.down_first { 0 } else { 1 };
        octave % 2 == remainder
    }

    /// Index the start frequency ends up at.
    pub fn centre_freq_index(&self) -> usize {
        let n = self.num_octaves;
        let semis = self.num_semitones;
        let down_octaves = if n % 2 == 1 && self.down_first {
            n / 2 + 1
        } else {
            n / 2
        };
        semis.saturating_mul(down_octaves)
    }

    /// Generates the scale. Its length is `num_octaves * num_semitones + 1`.
    pub fn build(&self) -> OctaveScale {
        let semis = self.num_semitones as f64;
        let mut below: Vec<Vec<f64>> = Vec::new();
        let mut above: Vec<f64> = Vec::new();
        let mut low = self.start_freq;
        let mut high = self.start_freq;

        for octave in 0..self.num_octaves {
            if self.is_down_octave(octave) {
                below.push(
                    (1..=self.num_semitones)
                        .rev()
                        .map(|j| low / (j as f64 / semis).exp2())
                        .collect(),
                );
                low /= 2.0;
            } else {
                above.extend((1..=self.num_semitones).map(|i| high * (i as f64 / semis).exp2()));
                high *= 2.0;
            }
        }

        // later downward octaves were prepended, so they come first
        let mut scale: Vec<f64> = below.into_iter().rev().flatten().collect();
        scale.extend(above);

        let centre_freq_index = self.centre_freq_index().min(scale.len());
        scale.insert(centre_freq_index, self.start_freq);

        OctaveScale {
            scale,
            centre_freq_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_default_scale() {
        let out = OctaveConfig::default().build();
        assert_eq!(out.scale.len(), 25);
        assert_eq!(out.centre_freq_index, 12);
        assert_eq!(out.scale[0], 220.0);
        assert_eq!(out.scale[12], 440.0);
        assert_eq!(out.scale[24], 880.0);
    }

    #[test]
    fn test_scale_ascends() {
        for down_first in [true, false] {
            for num_octaves in 0..5 {
                let config = OctaveConfig {
                    num_octaves,
                    down_first,
                    ..OctaveConfig::default()
                };
                let out = config.build();
                assert_eq!(out.scale.len(), num_octaves * 12 + 1);
                assert_eq!(out.scale[out.centre_freq_index], 440.0);
                assert!(out.scale.windows(2).all(|w| w[0] < w[1]), "{:?}", config);
            }
        }
    }

    #[test]
    fn test_centre_index() {
        let at = |num_octaves, down_first| {
            OctaveConfig {
                num_octaves,
                down_first,
                ..OctaveConfig::default()
            }
            .centre_freq_index()
        };
        assert_eq!(at(1, true), 12);
        assert_eq!(at(1, false), 0);
        assert_eq!(at(3, true), 24);
        assert_eq!(at(3, false), 12);
        assert_eq!(at(4, true), 24);
        assert_eq!(at(0, true), 0);
    }

    #[test]
    fn test_from_config() {
        assert_eq!(
            OctaveConfig::from_config(&Value::Null).unwrap(),
            OctaveConfig::default()
        );

        let config = OctaveConfig::from_config(&json!({
            "startFreq": 261.63,
            "numOctaves": 3,
            "numSemitones": 19,
            "downFirst": false,
        }))
        .unwrap();
        assert_eq!(config.num_semitones, 19);
        assert!(!config.down_first);
        assert_eq!(config.build().scale.len(), 3 * 19 + 1);
    }

    #[test]
    fn test_from_config_rejects_bad_values() {
        let reject = |config: Value| OctaveConfig::from_config(&config).unwrap_err().kind();
        assert_eq!(reject(json!({ "downFirst": "yes" })), ErrorKind::Type);
        assert_eq!(reject(json!({ "numOctaves": -1 })), ErrorKind::Range);
        assert_eq!(reject(json!({ "numSemitones": 0 })), ErrorKind::Range);
        assert_eq!(reject(json!({ "startFreq": "440" })), ErrorKind::Type);
        assert_eq!(reject(json!(12)), ErrorKind::Type);
        assert_eq!(reject(json!({ "numOctaves": 1e18 })), ErrorKind::Range);
        assert_eq!(reject(json!({ "numSemitones": 1e19 })), ErrorKind::Range);
        // each count fits on its own, the product does not
        let err = OctaveConfig::from_config(&json!({ "numOctaves": 300, "numSemitones": 300 }))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.field(), "numOctaves");
    }

    #[test]
    fn test_centre_index_saturates() {
        let config = OctaveConfig {
            num_octaves: usize::MAX,
            num_semitones: usize::MAX,
            ..OctaveConfig::default()
        };
        assert_eq!(config.centre_freq_index(), usize::MAX);
    }
}
