//! Single-note equal temperament frequency.

use serde_json::Value;

use crate::config::{NUM_SEMITONES, START_FREQ};
use crate::error::ConfigError;
use crate::validate::{
    read_flag, read_number, require, Bound, Field, Kind, Schema, Unknown,
};

const INTERVAL: Field = Field::required("interval", Kind::Number, Bound::Signed);
const UPWARDS_SCALE: Field = Field::optional("upwardsScale", Kind::Flag, Bound::Signed);

pub(crate) const NOTE_SCHEMA: Schema = Schema {
    fields: &[
        Field { required: true, ..START_FREQ },
        Field { required: true, ..NUM_SEMITONES },
        INTERVAL,
        UPWARDS_SCALE,
    ],
    unknown: Unknown::NonNegativeNumber,
};

/// Frequency of the note `interval` steps away from `start_freq`, with the
/// octave split into `num_semitones` equal steps.
///
/// `upwards` picks the formula; when `None` it is inferred from the sign of
/// `interval`. Upwards the result is `start_freq * 2^(interval / n)`,
/// downwards `start_freq / 2^(|interval| / n)`.
///
/// ```
/// use freqi::equal_temperament;
///
/// assert_eq!(equal_temperament(440.0, 12.0, 12.0, None), 880.0);
/// assert_eq!(equal_temperament(440.0, 12.0, -12.0, None), 220.0);
/// ```
pub fn equal_temperament(
    start_freq: f64,
    num_semitones: f64,
    interval: f64,
    upwards: Option<bool>,
) -> f64 {
    if upwards.unwrap_or(interval >= 0.0) {
        start_freq * (interval / num_semitones).exp2()
    } else {
        start_freq / (interval.abs() / num_semitones).exp2()
    }
}

/// A checked single-note request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteRequest {
    /// Reference pitch in Hz, zero or higher.
    pub start_freq: f64,
    /// Equal divisions of the octave, above zero.
    pub num_semitones: f64,
    /// Signed step count from the reference pitch.
    pub interval: f64,
    /// Forces the direction of the formula.
    pub upwards_scale: Option<bool>,
}

impl NoteRequest {
    /// Reads `{ startFreq, numSemitones, interval, upwardsScale? }`.
    pub fn from_config(config: &Value) -> Result<Self, ConfigError> {
        let map = NOTE_SCHEMA.check(config)?;
        Ok(Self {
            start_freq: require(&START_FREQ, read_number(map, &START_FREQ)?)?,
            num_semitones: require(&NUM_SEMITONES, read_number(map, &NUM_SEMITONES)?)?,
            interval: require(&INTERVAL, read_number(map, &INTERVAL)?)?,
            upwards_scale: read_flag(map, &UPWARDS_SCALE)?,
        })
    }

    /// The frequency this request describes.
    pub fn frequency(&self) -> f64 {
        equal_temperament(
            self.start_freq,
            self.num_semitones,
            self.interval,
            self.upwards_scale,
        )
    }
}
