//! Pattern augmentation.
//!
//! Extends an interval pattern by walking it cyclically, adding a growing
//! amount to each copied value. Used when more notes are asked for than the
//! pattern holds, e.g. to continue a scale into the next octaves.

use serde_json::Value;

use crate::config::MAX_NOTES;
use crate::error::ConfigError;
use crate::validate::{
    read_number, read_numbers, read_whole, require, Bound, Field, Kind, Schema, Unknown,
};

const ORIGINAL_ARRAY: Field = Field::required("originalArray", Kind::Numbers, Bound::Signed);
const DIFFERENCE: Field =
    Field::required("difference", Kind::Whole, Bound::Positive).at_most(MAX_NOTES);
const AMOUNT_TO_ADD: Field = Field::required("amountToAdd", Kind::Number, Bound::NonNegative);
const REPEAT_MULTIPLE: Field =
    Field::required("repeatMultiple", Kind::Whole, Bound::NonNegative).at_most(MAX_NOTES);

pub(crate) const AUGMENT_SCHEMA: Schema = Schema {
    fields: &[ORIGINAL_ARRAY, DIFFERENCE, AMOUNT_TO_ADD, REPEAT_MULTIPLE],
    unknown: Unknown::Ignore,
};

/// A checked augmentation request.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentRequest {
    /// Pattern to extend; never empty once checked.
    pub original: Vec<f64>,
    /// Number of values to generate.
    pub difference: usize,
    /// Added to the values of the first generated pass.
    pub amount_to_add: f64,
    /// Full passes after which the added amount drops to zero.
    pub repeat_multiple: usize,
}

impl AugmentRequest {
    /// Reads `{ originalArray, difference, amountToAdd, repeatMultiple }`.
    ///
    /// All four are required. `difference` must be a whole number above
    /// zero, `repeatMultiple` a whole number, `amountToAdd` zero or higher.
    /// Neither count may exceed [`MAX_NOTES`].
    pub fn from_config(config: &Value) -> Result<Self, ConfigError> {
        let map = AUGMENT_SCHEMA.check(config)?;
        Ok(Self {
            original: require(&ORIGINAL_ARRAY, read_numbers(map, &ORIGINAL_ARRAY)?)?,
            difference: require(&DIFFERENCE, read_whole(map, &DIFFERENCE)?)?,
            amount_to_add: require(&AMOUNT_TO_ADD, read_number(map, &AMOUNT_TO_ADD)?)?,
            repeat_multiple: require(&REPEAT_MULTIPLE, read_whole(map, &REPEAT_MULTIPLE)?)?,
        })
    }

    /// Runs [`augment_intervals`] on this request.
    pub fn run(&self) -> Vec<f64> {
        augment_intervals(
            &self.original,
            self.difference,
            self.amount_to_add,
            self.repeat_multiple,
        )
    }
}

/// Returns `original` followed by `difference` generated values.
///
/// Generation walks `original` from index 0. Each generated value is the
/// value under the cursor plus a running addend that starts at
/// `amount_to_add`. After a value is generated:
///
/// 1. if it was number `len * repeat_multiple - 1` (counting from 0), the
///    cursor goes back to 0 and the addend drops to 0 for good;
/// 2. otherwise, if the cursor was on the last element, the cursor goes back
///    to 0 and the addend doubles;
/// 3. otherwise the cursor advances.
///
/// With `repeat_multiple == 0` rule 1 never fires. With `amount_to_add == 0`
/// the doubling is a no-op and the pattern simply repeats.
///
/// `difference` is not capped here; configs read through
/// [`AugmentRequest::from_config`] hold it to [`MAX_NOTES`].
///
/// ```
/// use freqi::augment_intervals;
///
/// assert_eq!(
///     augment_intervals(&[0.0, 1.0, 2.0], 3, 12.0, 0),
///     vec![0.0, 1.0, 2.0, 12.0, 13.0, 14.0]
/// );
/// ```
pub fn augment_intervals(
    original: &[f64],
    difference: usize,
    amount_to_add: f64,
    repeat_multiple: usize,
) -> Vec<f64> {
    let mut out = Vec::new();
    // growth falls back to push when the full size cannot be reserved
    let _ = out.try_reserve(original.len().saturating_add(difference));
    out.extend_from_slice(original);
    if original.is_empty() {
        return out;
    }

    let last = original.len() - 1;
    let repeat_point = original
        .len()
        .checked_mul(repeat_multiple)
        .and_then(|n| n.checked_sub(1));

    let mut cursor = 0;
    let mut addend = amount_to_add;
    for step in 0..difference {
        out.push(original[cursor] + addend);

        if Some(step) == repeat_point {
            cursor = 0;
            addend = 0.0;
        } else if cursor == last {
            cursor = 0;
            addend += addend;
        } else {
            cursor += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_single_pass() {
        let out = augment_intervals(&[0.0, 1.0, 2.0], 3, 12.0, 0);
        assert_eq!(out, vec![0.0, 1.0, 2.0, 12.0, 13.0, 14.0]);
    }

    #[test]
    fn test_addend_doubles_each_pass() {
        let out = augment_intervals(&[0.0, 4.0, 7.0], 9, 12.0, 0);
        assert_eq!(
            out,
            vec![0.0, 4.0, 7.0, 12.0, 16.0, 19.0, 24.0, 28.0, 31.0, 48.0, 52.0, 55.0]
        );
    }

    #[test]
    fn test_repeat_point_resets() {
        let out = augment_intervals(&[-5.0, 0.0, 7.0], 10, 12.0, 2);
        assert_eq!(
            out,
            vec![-5.0, 0.0, 7.0, 7.0, 12.0, 19.0, 19.0, 24.0, 31.0, -5.0, 0.0, 7.0, -5.0]
        );
        assert_eq!(out[10 + 3 - 1], out[0]);
    }

    #[test]
    fn test_zero_amount_repeats_pattern() {
        let out = augment_intervals(&[0.0, 7.0], 5, 0.0, 0);
        assert_eq!(out, vec![0.0, 7.0, 0.0, 7.0, 0.0, 7.0, 0.0]);
    }

    #[test]
    fn test_single_element_pattern() {
        // every step ends a pass
        let out = augment_intervals(&[1.0], 3, 2.0, 0);
        assert_eq!(out, vec![1.0, 3.0, 5.0, 9.0]);

        // first step hits the repeat point
        let out = augment_intervals(&[1.0], 3, 2.0, 1);
        assert_eq!(out, vec![1.0, 3.0, 1.0, 1.0]);
    }

    #[test]
    fn test_empty_pattern_is_returned_unchanged() {
        assert!(augment_intervals(&[], 4, 12.0, 0).is_empty());
    }

    #[test]
    fn test_request_from_config() {
        let request = AugmentRequest::from_config(&json!({
            "originalArray": [-5, 0, 7],
            "difference": 1,
            "amountToAdd": 12,
            "repeatMultiple": 0,
        }))
        .unwrap();
        assert_eq!(request.run(), vec![-5.0, 0.0, 7.0, 7.0]);
    }

    #[test]
    fn test_request_rejects_bad_values() {
        let base = json!({
            "originalArray": [-5, 0, 7],
            "difference": 3,
            "amountToAdd": 12,
            "repeatMultiple": 0,
        });
        let with = |key: &str, value: Value| {
            let mut config = base.clone();
            config[key] = value;
            AugmentRequest::from_config(&config).unwrap_err().kind()
        };

        assert_eq!(with("difference", json!(0)), ErrorKind::Range);
        assert_eq!(with("difference", json!(-1)), ErrorKind::Range);
        assert_eq!(with("difference", json!("3")), ErrorKind::Type);
        assert_eq!(with("difference", json!(f64::NAN)), ErrorKind::Type);
        assert_eq!(with("amountToAdd", json!(-2)), ErrorKind::Range);
        assert_eq!(with("amountToAdd", json!("12")), ErrorKind::Type);
        assert_eq!(with("repeatMultiple", json!(-5)), ErrorKind::Range);
        assert_eq!(with("repeatMultiple", json!("0")), ErrorKind::Type);
        assert_eq!(with("originalArray", json!([f64::NAN, 1])), ErrorKind::Type);
        assert_eq!(with("originalArray", json!([])), ErrorKind::Type);
        assert_eq!(with("difference", json!(1e19)), ErrorKind::Range);
        assert_eq!(with("difference", json!(MAX_NOTES + 1)), ErrorKind::Range);
        assert_eq!(with("repeatMultiple", json!(1e18)), ErrorKind::Range);
    }

    #[test]
    fn test_difference_limit_is_inclusive() {
        let request = AugmentRequest::from_config(&json!({
            "originalArray": [0],
            "difference": MAX_NOTES,
            "amountToAdd": 0,
            "repeatMultiple": 0,
        }))
        .unwrap();
        assert_eq!(request.run().len(), MAX_NOTES + 1);
    }
}
