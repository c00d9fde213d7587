//! Scale config: defaults, normalization and the checked, typed form.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ConfigError;
use crate::validate::{
    get, read_number, read_numbers, read_whole, require, Bound, Field, Kind, RawMap, Schema,
    Unknown,
};

/// Reference pitch used when `startFreq` is not given (A4).
pub const DEFAULT_START_FREQ: f64 = 440.0;

/// Equal divisions per octave used when `numSemitones` is not given.
pub const DEFAULT_NUM_SEMITONES: f64 = 12.0;

/// Label used when `type` is not given.
pub const DEFAULT_LABEL: &str = "unknown";

/// Largest count or index any config may ask for.
///
/// Applies to `intervalStartIndex`, `numNotes`, `repeatMultiple` and the
/// augmenter's `difference`, and to the total note count of an octave scale.
pub const MAX_NOTES: usize = 1 << 16;

pub(crate) const START_FREQ: Field =
    Field::optional("startFreq", Kind::Number, Bound::NonNegative);
pub(crate) const NUM_SEMITONES: Field =
    Field::optional("numSemitones", Kind::Number, Bound::Positive);
const ROOT_NOTE: Field = Field::optional("rootNote", Kind::Number, Bound::Signed);
const INTERVAL_START_INDEX: Field =
    Field::optional("intervalStartIndex", Kind::Whole, Bound::NonNegative)
        .alias("inversionStartNote")
        .at_most(MAX_NOTES);
const INTERVALS: Field = Field::required("intervals", Kind::Numbers, Bound::Signed);
const REPEAT_MULTIPLE: Field =
    Field::optional("repeatMultiple", Kind::Whole, Bound::NonNegative).at_most(MAX_NOTES);
const NUM_NOTES: Field =
    Field::optional("numNotes", Kind::Whole, Bound::NonNegative).at_most(MAX_NOTES);
const AMOUNT_TO_ADD: Field = Field::optional("amountToAdd", Kind::Number, Bound::NonNegative);
const LABEL: Field = Field::optional("type", Kind::Label, Bound::Signed);

pub(crate) const SCALE_SCHEMA: Schema = Schema {
    fields: &[
        START_FREQ,
        NUM_SEMITONES,
        ROOT_NOTE,
        INTERVAL_START_INDEX,
        INTERVALS,
        REPEAT_MULTIPLE,
        NUM_NOTES,
        AMOUNT_TO_ADD,
        LABEL,
    ],
    unknown: Unknown::NonNegativeNumber,
};

/// A fully populated scale config.
///
/// Serializes to the same camelCase object [`build_scale`](crate::build_scale)
/// accepts, so a typed config can be handed to any engine entry point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleConfig {
    /// Reference pitch in Hz.
    pub start_freq: f64,
    /// Equal divisions of the octave.
    pub num_semitones: f64,
    /// Offset added to every interval.
    pub root_note: f64,
    /// Position in the (possibly augmented) pattern where iteration begins.
    pub interval_start_index: usize,
    /// Semitone offsets that shape the scale or chord.
    pub intervals: Vec<f64>,
    /// Passes through `intervals` after which augmentation stops adding.
    pub repeat_multiple: usize,
    /// Requested number of notes.
    pub num_notes: usize,
    /// Added to every interval produced by augmentation.
    pub amount_to_add: f64,
    /// Diagnostic label; never affects computation.
    #[serde(rename = "type")]
    pub label: String,
}

impl ScaleConfig {
    /// Config with every optional field at its default.
    pub fn new(intervals: Vec<f64>) -> Self {
        Self {
            start_freq: DEFAULT_START_FREQ,
            num_semitones: DEFAULT_NUM_SEMITONES,
            root_note: 0.0,
            interval_start_index: 0,
            num_notes: intervals.len(),
            intervals,
            repeat_multiple: 0,
            amount_to_add: DEFAULT_NUM_SEMITONES,
            label: DEFAULT_LABEL.to_string(),
        }
    }

    /// Checks a raw config, fills in defaults and converts it.
    ///
    /// Validation looks at the object as the caller wrote it, so defaulted
    /// fields are never flagged.
    pub fn from_config(config: &Value) -> Result<Self, ConfigError> {
        let raw = SCALE_SCHEMA.check(config)?;
        Self::from_normalized(&normalize(raw))
    }

    fn from_normalized(map: &RawMap) -> Result<Self, ConfigError> {
        let intervals = require(&INTERVALS, read_numbers(map, &INTERVALS)?)?;
        let num_semitones = read_number(map, &NUM_SEMITONES)?.unwrap_or(DEFAULT_NUM_SEMITONES);
        Ok(Self {
            start_freq: read_number(map, &START_FREQ)?.unwrap_or(DEFAULT_START_FREQ),
            num_semitones,
            root_note: read_number(map, &ROOT_NOTE)?.unwrap_or(0.0),
            interval_start_index: read_whole(map, &INTERVAL_START_INDEX)?.unwrap_or(0),
            repeat_multiple: read_whole(map, &REPEAT_MULTIPLE)?.unwrap_or(0),
            num_notes: read_whole(map, &NUM_NOTES)?.unwrap_or(intervals.len()),
            amount_to_add: read_number(map, &AMOUNT_TO_ADD)?.unwrap_or(num_semitones),
            label: match get(map, &LABEL) {
                Some((_, Value::String(label))) => label.clone(),
                Some((_, other)) => other.to_string(),
                None => DEFAULT_LABEL.to_string(),
            },
            intervals,
        })
    }
}

/// Fills in a default for every absent field.
///
/// Supplied values are copied as they are, valid or not, and the
/// `inversionStartNote` spelling is folded into `intervalStartIndex`.
/// `numNotes` defaults to the length of `intervals` when that is an array,
/// and `amountToAdd` to whatever `numSemitones` ends up as.
pub(crate) fn normalize(raw: &RawMap) -> RawMap {
    let mut map = raw.clone();

    if let Some(alias) = INTERVAL_START_INDEX.alias {
        if let Some(value) = map.remove(alias) {
            map.entry(INTERVAL_START_INDEX.name).or_insert(value);
        }
    }

    map.entry(START_FREQ.name).or_insert(json!(DEFAULT_START_FREQ));
    map.entry(NUM_SEMITONES.name).or_insert(json!(DEFAULT_NUM_SEMITONES));
    map.entry(ROOT_NOTE.name).or_insert(json!(0));
    map.entry(INTERVAL_START_INDEX.name).or_insert(json!(0));
    map.entry(REPEAT_MULTIPLE.name).or_insert(json!(0));
    map.entry(LABEL.name).or_insert(json!(DEFAULT_LABEL));

    if !map.contains_key(NUM_NOTES.name) {
        if let Some(len) = map.get(INTERVALS.name).and_then(Value::as_array).map(Vec::len) {
            map.insert(NUM_NOTES.name.to_string(), json!(len));
        }
    }

    if !map.contains_key(AMOUNT_TO_ADD.name) {
        let semitones = map[NUM_SEMITONES.name].clone();
        map.insert(AMOUNT_TO_ADD.name.to_string(), semitones);
    }

    map
}
